//! Works out which country a note belongs to and what its link should be called,
//! based only on the folders it sits in.

use tracing::debug;

use crate::country::CountryTable;

/// Snapshot of the note the command runs on. Paths are vault-relative with `/` separators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRef {
    pub path: String,
    /// File name without its extension.
    pub basename: String,
    pub parent_folder_name: Option<String>,
    pub grandparent_folder_name: Option<String>,
}

impl DocumentRef {
    /// Build from a vault-relative path such as `Canada/Projects/Trip.md`.
    pub fn from_vault_path(path: &str) -> Self {
        let normalized = path.replace('\\', "/");
        let trimmed = normalized.trim_start_matches("./").trim_start_matches('/');
        let parts: Vec<&str> = trimmed.split('/').filter(|p| !p.is_empty()).collect();

        let (file, folders) = match parts.split_last() {
            Some((file, folders)) => (*file, folders),
            None => ("", &[][..]),
        };
        let mut folders = folders.iter().rev();
        let parent_folder_name = folders.next().map(|s| s.to_string());
        let grandparent_folder_name = folders.next().map(|s| s.to_string());

        Self {
            path: parts.join("/"),
            basename: strip_extension(file).to_string(),
            parent_folder_name,
            grandparent_folder_name,
        }
    }
}

/// `Note A.md` → `Note A`; dotfiles and extensionless names are left alone.
fn strip_extension(file: &str) -> &str {
    match file.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => file,
    }
}

/// Country (lowercase table key) and the label to show in the link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub country: String,
    pub display_name: String,
}

/// A note directly in a country folder is labelled by its own name; a note one folder
/// deeper is labelled by that inner folder (original casing).
pub fn classify(doc: &DocumentRef, table: &CountryTable) -> Result<Classification, ClassifyError> {
    if let Some(parent) = doc.parent_folder_name.as_deref() {
        if table.contains(parent) {
            debug!(path = %doc.path, country = parent, "note sits directly in a country folder");
            return Ok(Classification {
                country: parent.to_lowercase(),
                display_name: doc.basename.clone(),
            });
        }
    }
    if let (Some(grandparent), Some(parent)) = (
        doc.grandparent_folder_name.as_deref(),
        doc.parent_folder_name.as_deref(),
    ) {
        if table.contains(grandparent) {
            debug!(path = %doc.path, country = grandparent, "note is nested one level in a country folder");
            return Ok(Classification {
                country: grandparent.to_lowercase(),
                display_name: parent.to_string(),
            });
        }
    }
    Err(ClassifyError::NoCountryFolder(doc.path.clone()))
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClassifyError {
    #[error("no country folder above {0}")]
    NoCountryFolder(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify_path(path: &str) -> Result<Classification, ClassifyError> {
        classify(&DocumentRef::from_vault_path(path), &CountryTable::builtin())
    }

    #[test]
    fn document_ref_from_nested_path() {
        let doc = DocumentRef::from_vault_path("Canada/Projects/Trip.md");
        assert_eq!(doc.path, "Canada/Projects/Trip.md");
        assert_eq!(doc.basename, "Trip");
        assert_eq!(doc.parent_folder_name.as_deref(), Some("Projects"));
        assert_eq!(doc.grandparent_folder_name.as_deref(), Some("Canada"));
    }

    #[test]
    fn document_ref_at_vault_root() {
        let doc = DocumentRef::from_vault_path("Inbox.md");
        assert_eq!(doc.basename, "Inbox");
        assert_eq!(doc.parent_folder_name, None);
        assert_eq!(doc.grandparent_folder_name, None);
    }

    #[test]
    fn document_ref_normalizes_separators() {
        let doc = DocumentRef::from_vault_path("./Germany\\Note A.md");
        assert_eq!(doc.path, "Germany/Note A.md");
        assert_eq!(doc.parent_folder_name.as_deref(), Some("Germany"));
    }

    #[test]
    fn direct_child_uses_basename() {
        let c = classify_path("Germany/Note A.md").unwrap();
        assert_eq!(c.country, "germany");
        assert_eq!(c.display_name, "Note A");
    }

    #[test]
    fn nested_child_uses_folder_name() {
        let c = classify_path("Canada/Projects/Trip.md").unwrap();
        assert_eq!(c.country, "canada");
        assert_eq!(c.display_name, "Projects");
    }

    #[test]
    fn parent_wins_over_grandparent() {
        let c = classify_path("Canada/Germany/Visa.md").unwrap();
        assert_eq!(c.country, "germany");
        assert_eq!(c.display_name, "Visa");
    }

    #[test]
    fn padded_folder_names_are_not_countries() {
        for path in ["Germany /Note.md", " Canada/Projects/Trip.md"] {
            assert_eq!(
                classify_path(path),
                Err(ClassifyError::NoCountryFolder(path.to_string())),
                "{path:?}"
            );
        }
    }

    #[test]
    fn unknown_folders_fail() {
        for path in ["Inbox.md", "Work/Notes/Todo.md", "Canada/A/B/Deep.md", "Atlantis/Note.md"] {
            assert_eq!(
                classify_path(path),
                Err(ClassifyError::NoCountryFolder(path.to_string())),
                "{path}"
            );
        }
    }
}
