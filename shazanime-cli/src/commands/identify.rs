use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use shazanime_themes::{RecognitionClient, ThemesConfig};

use super::{build_resolver, new_runtime, print_match, record_history};
use crate::error::CliError;
use crate::spinner;

/// Recognize an audio clip and resolve the result.
pub(crate) fn run_identify(file: &Path, no_history: bool, verbose: bool) -> Result<(), CliError> {
    let config = ThemesConfig::load()?;
    let recognizer = RecognitionClient::new(&config.recognition)?;
    let resolver = build_resolver(&config)?;
    let rt = new_runtime()?;

    rt.block_on(async {
        let pb = spinner::start(format!("Identifying {}...", file.display()), verbose);
        let song = match recognizer.recognize_file(file).await {
            Ok(song) => song,
            Err(e) => {
                pb.finish_and_clear();
                return Err(CliError::from(e));
            }
        };

        pb.set_message(format!("Searching for '{}'...", song.title));
        let found = resolver.find_match(&song.artist, &song.title).await;
        pb.finish_and_clear();

        log::info!(
            "Recognized: {} by {}",
            song.title.if_supports_color(Stdout, |t| t.bold()),
            song.artist,
        );
        if song.original_title != song.title {
            log::info!("  Original title: {}", song.original_title);
        }
        if let Some(url) = &song.apple_music_url {
            log::info!("  Apple Music: {}", url.if_supports_color(Stdout, |t| t.dimmed()));
        }
        if let Some(url) = &song.shazam_url {
            log::info!("  Shazam: {}", url.if_supports_color(Stdout, |t| t.dimmed()));
        }

        match found {
            Some(m) => {
                print_match(&m);
                if !no_history {
                    record_history(&m.details, song.cover_art.as_deref().unwrap_or(""));
                }
            }
            None => {
                log::info!(
                    "{} Not an anime theme, or not in the database",
                    "\u{2718}".if_supports_color(Stdout, |t| t.yellow()),
                );
            }
        }
        Ok(())
    })
}
