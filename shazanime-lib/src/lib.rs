//! Application services shared by shazanime frontends: settings paths,
//! mapping-table loading and the recognition history log.

pub mod error;
pub mod history;
pub mod mappings;
pub mod settings;

pub use error::HistoryError;
pub use history::{AnimeGroup, HISTORY_LIMIT, HistoryEntry, HistoryLog};
pub use mappings::{MappingsOrigin, load_mappings, load_mappings_from};
pub use shazanime_core::{NameMappings, ResolvedThemeDetails};
