//! Error types for the storage layer.

use papershelf_core::{AuthorId, AuthorName, PaperId};
use thiserror::Error;

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur during storage operations.
///
/// `Database` covers connection and query failures; it aborts the current
/// operation but not the process. The `Duplicate*` and `Empty*` variants
/// are integrity violations detected before commit — the offending
/// transaction is rolled back and nothing is written.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database connection or query error.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Paper not found by id.
    #[error("paper not found: {0}")]
    PaperNotFound(PaperId),

    /// Author not found by id.
    #[error("author not found: {0}")]
    AuthorNotFound(AuthorId),

    /// A fully created paper must have a bib entry; this one has none.
    #[error("no bib entry stored for paper {0}")]
    BibMissing(PaperId),

    /// The bibtex key is already taken by another paper.
    #[error("bibtex key already exists: {0}")]
    DuplicateBibKey(String),

    /// The new bib text is byte-identical to another stored entry.
    #[error("bib entry text already exists under another key")]
    DuplicateBibText,

    /// Renaming an author onto an existing (last_name, first_name) pair.
    #[error("author already exists: {0}")]
    DuplicateAuthor(AuthorName),

    /// The same author appears more than once in a paper's author list.
    #[error("author listed more than once: {0}")]
    RepeatedAuthor(AuthorName),

    /// Papers must carry a non-empty title.
    #[error("paper title must not be empty")]
    EmptyTitle,

    /// A paper must list at least one author.
    #[error("paper must list at least one author")]
    EmptyAuthorList,

    /// Migration error.
    #[error("migration error: {0}")]
    Migration(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl StoreError {
    /// Whether the error is an integrity violation: the requested change
    /// was rejected before commit and the database is unchanged.
    pub fn is_integrity_violation(&self) -> bool {
        matches!(
            self,
            StoreError::DuplicateBibKey(_)
                | StoreError::DuplicateBibText
                | StoreError::DuplicateAuthor(_)
                | StoreError::RepeatedAuthor(_)
                | StoreError::EmptyTitle
                | StoreError::EmptyAuthorList
        )
    }
}
