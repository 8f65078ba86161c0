//! Discovering markdown notes in the user's vault.
//!
//! The vault is chosen by the user; we only read its layout here.

use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// Scans `root` for all `.md` files and returns their vault-relative paths (`/`-separated, sorted).
/// Hidden files and folders are skipped. Does not follow symlinks into directories (walkdir default).
pub fn scan_note_paths(root: &Path) -> Result<Vec<String>, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::NotADirectory(root.to_path_buf()));
    }
    let mut paths = Vec::new();
    for entry in WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e))
    {
        let entry = entry.map_err(|e| ScanError::Walk(e.to_string()))?;
        let path = entry.path();
        if path.extension().map_or(false, |e| e == "md") && entry.file_type().is_file() {
            if let Ok(rel) = path.strip_prefix(root) {
                paths.push(to_vault_string(rel));
            }
        }
    }
    paths.sort();
    Ok(paths)
}

fn is_hidden(entry: &walkdir::DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|s| s.starts_with('.'))
        .unwrap_or(false)
}

/// Maps `path` to its vault-relative form. Relative paths that exist under the
/// current directory are resolved first; anything else relative is taken as
/// already vault-relative.
pub fn vault_relative(root: &Path, path: &Path) -> Result<String, ScanError> {
    let root = root
        .canonicalize()
        .map_err(|e| ScanError::Read(root.to_path_buf(), e))?;
    if path.is_absolute() || path.exists() {
        let abs = path
            .canonicalize()
            .map_err(|e| ScanError::Read(path.to_path_buf(), e))?;
        let rel = abs
            .strip_prefix(&root)
            .map_err(|_| ScanError::OutsideVault(path.to_path_buf()))?;
        return Ok(to_vault_string(rel));
    }
    if path.components().any(|c| !matches!(c, Component::Normal(_) | Component::CurDir)) {
        return Err(ScanError::OutsideVault(path.to_path_buf()));
    }
    Ok(to_vault_string(path))
}

fn to_vault_string(rel: &Path) -> String {
    rel.components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),
    #[error("walk error: {0}")]
    Walk(String),
    #[error("read error for {0}: {1}")]
    Read(PathBuf, std::io::Error),
    #[error("not inside the vault: {0}")]
    OutsideVault(PathBuf),
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn vault() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("Canada/Projects")).unwrap();
        fs::create_dir_all(root.join(".obsidian")).unwrap();
        fs::write(root.join("Applied.md"), "# Applied\n").unwrap();
        fs::write(root.join("Canada/Projects/Trip.md"), "").unwrap();
        fs::write(root.join("Canada/photo.png"), "").unwrap();
        fs::write(root.join(".obsidian/workspace.md"), "").unwrap();
        dir
    }

    #[test]
    fn scan_lists_markdown_only() {
        let dir = vault();
        let paths = scan_note_paths(dir.path()).unwrap();
        assert_eq!(paths, vec!["Applied.md", "Canada/Projects/Trip.md"]);
    }

    #[test]
    fn scan_rejects_files() {
        let dir = vault();
        let err = scan_note_paths(&dir.path().join("Applied.md"));
        assert!(matches!(err, Err(ScanError::NotADirectory(_))));
    }

    #[test]
    fn relative_from_absolute() {
        let dir = vault();
        let abs = dir.path().join("Canada/Projects/Trip.md");
        assert_eq!(vault_relative(dir.path(), &abs).unwrap(), "Canada/Projects/Trip.md");
    }

    #[test]
    fn relative_passthrough() {
        let dir = vault();
        let rel = Path::new("Germany/Not Yet Created.md");
        assert_eq!(vault_relative(dir.path(), rel).unwrap(), "Germany/Not Yet Created.md");
    }

    #[test]
    fn parent_dirs_rejected() {
        let dir = vault();
        let err = vault_relative(dir.path(), Path::new("../elsewhere/x.md"));
        assert!(matches!(err, Err(ScanError::OutsideVault(_))));
    }

    #[test]
    fn absolute_outside_vault_rejected() {
        let dir = vault();
        let other = tempfile::tempdir().unwrap();
        let file = other.path().join("x.md");
        fs::write(&file, "").unwrap();
        assert!(matches!(vault_relative(dir.path(), &file), Err(ScanError::OutsideVault(_))));
    }
}
