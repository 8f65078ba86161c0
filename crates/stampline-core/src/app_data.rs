//! Where stampline keeps its settings.
//!
//! Notes stay in the vault the user points us at. Only settings live here.

use std::path::PathBuf;

/// Returns the directory where stampline stores `config.toml`.
/// On Linux: `~/.config/stampline/`.
/// Creates the directory if it doesn't exist; returns `None` if we can't determine the path.
pub fn app_data_dir() -> Option<PathBuf> {
    let dir = directories::ProjectDirs::from("app", "Stampline", "stampline")?
        .config_dir()
        .to_path_buf();
    std::fs::create_dir_all(&dir).ok()?;
    Some(dir)
}
