//! All backend logic independent of how the app is run.
//!
//! Notes live in a vault the user chooses, organised in country folders. stampline
//! adds a dated link to the active note into one target note, directly under an
//! anchor line. Settings live in its own app data directory (see [app_data]).

pub mod app_data;
pub mod classify;
pub mod config;
pub mod country;
pub mod format;
pub mod insert;
pub mod link;
pub mod notes;
pub mod notify;
pub mod store;
pub mod suggest;

pub use app_data::app_data_dir;
pub use classify::{classify, Classification, ClassifyError, DocumentRef};
pub use config::{default_config_path, load_config, save_config, Config, ConfigError};
pub use country::CountryTable;
pub use format::{format_link_line, DATE_FORMAT};
pub use insert::{extract_date, insert_under_anchor, InsertError};
pub use link::{LinkCommand, LinkError, LinkOutcome, ReadyLink};
pub use notes::{scan_note_paths, vault_relative, ScanError};
pub use notify::Notifier;
pub use store::{MemoryStore, NoteStore, StoreError, VaultStore};
pub use suggest::suggest_notes;
