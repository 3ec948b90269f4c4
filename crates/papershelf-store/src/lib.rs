//! papershelf-store: PostgreSQL storage layer for the papershelf
//! reference manager.
//!
//! This crate provides:
//! - Type-safe database operations via sqlx over the `papers`, `authors`,
//!   `bib_entries`, and `authorships` tables
//! - Embedded, idempotent schema migrations
//! - The [`Resolver`], which turns a title or author query into a fully
//!   assembled paper (or a disambiguation candidate list)
//! - Transactional entry-editor mutations (add paper, update fields,
//!   rename authors, replace author lists)
//!
//! The store is the single owner of database access: one [`Store`] is
//! constructed at process start and passed by handle to the resolver and
//! the CLI, and its pool is closed on shutdown.

pub mod error;
pub mod models;
pub mod profile;
pub mod resolver;
pub mod schema;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use models::{AuthorRow, BibRow, NewPaper, PaperField, PaperRow};
pub use profile::ConnectionProfile;
pub use resolver::{ResolveError, Resolver};
pub use store::{Store, StoreConfig};

// Re-export papershelf-core for downstream crates
pub use papershelf_core;
