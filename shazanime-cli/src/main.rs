//! shazanime CLI
//!
//! Identify anime songs and find the theme they belong to.

mod commands;
mod error;
mod spinner;

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

use commands::config::{run_config_path, run_config_show};
use commands::history::{run_history_clear, run_history_grouped, run_history_list};
use commands::identify::run_identify;
use commands::resolve::run_resolve;

#[derive(Parser)]
#[command(name = "shazanime")]
#[command(about = "Find the anime theme behind a song", long_about = None)]
struct Cli {
    /// Show debug output (search stages, requests)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve an already-identified song to an anime theme
    Resolve {
        /// Artist as reported by the recognition service
        #[arg(short, long, default_value = "")]
        artist: String,

        /// Song title as reported by the recognition service
        #[arg(short, long)]
        title: String,

        /// Don't record the match in the history log
        #[arg(long)]
        no_history: bool,
    },

    /// Recognize an audio clip, then resolve it to an anime theme
    Identify {
        /// Audio file to upload to the recognition backend
        file: PathBuf,

        /// Don't record the match in the history log
        #[arg(long)]
        no_history: bool,
    },

    /// Show or clear previously resolved themes
    History {
        #[command(subcommand)]
        action: Option<HistoryAction>,
    },

    /// Show endpoint configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum HistoryAction {
    /// List entries, newest first
    List,

    /// List entries grouped by anime
    Grouped,

    /// Delete all entries
    Clear,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current settings and where they come from
    Show,

    /// Print the config file path
    Path,
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        // Prefix match: covers the binary and every shazanime_* crate
        .filter_module("shazanime", level)
        .parse_default_env()
        .format(|buf, record| match record.level() {
            log::Level::Info => writeln!(buf, "{}", record.args()),
            level => writeln!(buf, "{}: {}", level.to_string().to_lowercase(), record.args()),
        })
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Resolve {
            artist,
            title,
            no_history,
        } => run_resolve(&artist, &title, no_history, cli.verbose),
        Commands::Identify { file, no_history } => run_identify(&file, no_history, cli.verbose),
        Commands::History { action } => match action.unwrap_or(HistoryAction::List) {
            HistoryAction::List => run_history_list(),
            HistoryAction::Grouped => run_history_grouped(),
            HistoryAction::Clear => run_history_clear(),
        },
        Commands::Config { action } => match action {
            ConfigAction::Show => run_config_show(),
            ConfigAction::Path => run_config_path(),
        },
    };

    if let Err(e) = result {
        eprintln!("{} {}", "\u{2718}".if_supports_color(Stderr, |t| t.red()), e);
        std::process::exit(1);
    }
}
