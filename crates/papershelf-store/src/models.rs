//! Database models for the storage layer.
//!
//! These types map directly to database rows and are used for sqlx
//! queries. They are separate from the domain types in papershelf-core;
//! conversions live next to the row types.

use papershelf_core::{Author, AuthorId, AuthorName, BibEntry, BibEntryId, Paper, PaperId};
use sqlx::FromRow;

/// Database row for the `papers` table.
#[derive(Debug, Clone, FromRow)]
pub struct PaperRow {
    pub id: i64,
    pub title: String,
    pub summary: Option<String>,
}

impl PaperRow {
    pub fn paper_id(&self) -> PaperId {
        PaperId(self.id)
    }
}

impl From<PaperRow> for Paper {
    fn from(row: PaperRow) -> Self {
        Paper {
            id: PaperId(row.id),
            title: row.title,
            summary: row.summary,
        }
    }
}

/// Database row for the `authors` table.
#[derive(Debug, Clone, FromRow)]
pub struct AuthorRow {
    pub id: i64,
    pub last_name: String,
    pub first_name: String,
}

impl AuthorRow {
    pub fn author_id(&self) -> AuthorId {
        AuthorId(self.id)
    }
}

impl From<AuthorRow> for Author {
    fn from(row: AuthorRow) -> Self {
        Author {
            id: AuthorId(row.id),
            last_name: row.last_name,
            first_name: row.first_name,
        }
    }
}

/// Database row for the `bib_entries` table.
#[derive(Debug, Clone, FromRow)]
pub struct BibRow {
    pub id: i64,
    pub paper_id: i64,
    pub bibtex_key: String,
    pub raw_text: String,
}

impl From<BibRow> for BibEntry {
    fn from(row: BibRow) -> Self {
        BibEntry {
            id: BibEntryId(row.id),
            bibtex_key: row.bibtex_key,
            raw_text: row.raw_text,
        }
    }
}

/// Input for creating a new paper with its bib entry and author list.
///
/// The author order is the listing order and is preserved through the
/// `authorships.position` column.
#[derive(Debug, Clone)]
pub struct NewPaper {
    pub title: String,
    pub summary: Option<String>,
    pub bibtex_key: String,
    pub bib_text: String,
    pub authors: Vec<AuthorName>,
}

/// Mutable columns of the `papers` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaperField {
    Title,
    Summary,
}

impl PaperField {
    pub fn column(&self) -> &'static str {
        match self {
            PaperField::Title => "title",
            PaperField::Summary => "summary",
        }
    }
}
