//! The "add link" command: classify the active note, format its line, put it under the
//! anchor in the target note.
//!
//! Read, compute and write happen one after another for a single invocation. Nothing
//! serializes two invocations against the same target, so overlapping runs can lose
//! an insertion.

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::classify::{classify, Classification, ClassifyError, DocumentRef};
use crate::config::Config;
use crate::country::CountryTable;
use crate::format::format_link_line;
use crate::insert::{insert_under_anchor, InsertError};
use crate::notify::Notifier;
use crate::store::{NoteStore, StoreError};

/// Everything the command needs besides the note store.
#[derive(Debug, Clone)]
pub struct LinkCommand {
    target_note: Option<String>,
    default_country: String,
    anchor_line: String,
    table: CountryTable,
    today: NaiveDate,
}

/// A note that passed the enablement checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadyLink {
    pub target: String,
    pub document: DocumentRef,
    pub classification: Classification,
}

/// What a successful run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkOutcome {
    pub target: String,
    pub line: String,
    /// Full target content after insertion.
    pub content: String,
}

impl LinkCommand {
    pub fn new(config: &Config, today: NaiveDate) -> Self {
        Self {
            target_note: config.target_note().map(str::to_string),
            default_country: config.default_country.clone(),
            anchor_line: config.anchor_line.clone(),
            table: config.country_table(),
            today,
        }
    }

    /// The configured target note. This is the first precondition and needs no vault access.
    pub fn check_target(&self) -> Result<&str, LinkError> {
        self.target_note.as_deref().ok_or(LinkError::NoTargetConfigured)
    }

    /// Checks, in order, that a target is configured, a note is active, and the note
    /// sits in a country folder.
    pub fn check(&self, active: Option<&str>) -> Result<ReadyLink, LinkError> {
        let target = self.check_target()?.to_string();
        let active = active
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(LinkError::NoActiveDocument)?;
        let document = DocumentRef::from_vault_path(active);
        let classification = classify(&document, &self.table)?;
        Ok(ReadyLink {
            target,
            document,
            classification,
        })
    }

    /// Line that would be inserted for `ready`.
    pub fn link_line(&self, ready: &ReadyLink) -> String {
        format_link_line(
            &ready.document.path,
            &ready.classification,
            &self.default_country,
            &self.table,
            self.today,
        )
    }

    /// Computes the new target content without writing it.
    pub async fn preview(&self, store: &dyn NoteStore, active: Option<&str>) -> Result<LinkOutcome, LinkError> {
        let ready = self.check(active)?;
        let line = self.link_line(&ready);
        let current = store.read_note(&ready.target).await?;
        let content = insert_under_anchor(&current, &self.anchor_line, &line, self.today)?;
        debug!(note = %ready.target, %line, "computed insertion");
        Ok(LinkOutcome {
            target: ready.target,
            line,
            content,
        })
    }

    /// Inserts the link and writes the target back. On any error the target is left untouched.
    pub async fn run(&self, store: &dyn NoteStore, active: Option<&str>) -> Result<LinkOutcome, LinkError> {
        let outcome = self.preview(store, active).await?;
        store.write_note(&outcome.target, &outcome.content).await?;
        info!(note = %outcome.target, line = %outcome.line, "link added");
        Ok(outcome)
    }

    /// [`run`](Self::run), reporting the result as a user notice.
    pub async fn run_with_notice(
        &self,
        store: &dyn NoteStore,
        notifier: &dyn Notifier,
        active: Option<&str>,
    ) -> Result<LinkOutcome, LinkError> {
        let result = self.run(store, active).await;
        match &result {
            Ok(outcome) => notifier.notify(&format!("Added link to {}", outcome.target)),
            Err(e) => notifier.notify(&e.to_string()),
        }
        result
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LinkError {
    #[error("No target note selected")]
    NoTargetConfigured,
    #[error("No active file")]
    NoActiveDocument,
    #[error("No country folder")]
    NoCountryFolder(#[source] ClassifyError),
    #[error("Anchor line not found in target note")]
    AnchorNotFound(#[source] InsertError),
    #[error("{0}")]
    Store(#[from] StoreError),
}

impl From<ClassifyError> for LinkError {
    fn from(e: ClassifyError) -> Self {
        LinkError::NoCountryFolder(e)
    }
}

impl From<InsertError> for LinkError {
    fn from(e: InsertError) -> Self {
        LinkError::AnchorNotFound(e)
    }
}
