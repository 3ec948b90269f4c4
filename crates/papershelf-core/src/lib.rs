//! papershelf-core: domain types and decision logic for the papershelf
//! reference manager.
//!
//! This crate is pure: it knows nothing about the database or the
//! terminal. It provides:
//!
//! - Typed records for papers, authors, and bib entries
//! - Author-query parsing (`"Last, First"` with a mandatory comma)
//! - The search outcome model, including disambiguation between
//!   candidates that share a title or an author
//! - The dialog state machine the interactive shell drives
//!
//! Storage access and the resolver live in `papershelf-store`; the CLI
//! lives in the `cli` crate.

pub mod dialog;
pub mod outcome;
pub mod query;
pub mod types;

pub use dialog::{DialogStep, SearchDialog};
pub use outcome::{Candidate, Disambiguation, SearchOutcome};
pub use query::{AuthorName, QueryParseError, SearchMode};
pub use types::{Author, AuthorId, BibEntry, BibEntryId, Paper, PaperId, ResolvedPaper};
