//! Typed records for the entities stored in the database.
//!
//! Ids wrap the `BIGSERIAL` columns of their tables. Because the ids are
//! sequence-assigned, ascending id order equals insertion order, which is
//! what the disambiguation tie-break relies on.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::query::AuthorName;

/// Unique identifier for a paper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaperId(pub i64);

impl fmt::Display for PaperId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PaperId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// Unique identifier for an author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthorId(pub i64);

impl fmt::Display for AuthorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AuthorId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// Unique identifier for a bib entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BibEntryId(pub i64);

impl fmt::Display for BibEntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stored publication.
///
/// Titles are not unique: two papers may share a title and are then told
/// apart by their author groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paper {
    pub id: PaperId,
    pub title: String,
    pub summary: Option<String>,
}

/// A stored author. Identity is the `(last_name, first_name)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: AuthorId,
    pub last_name: String,
    pub first_name: String,
}

impl Author {
    /// The author's identity pair, as used for lookups and uniqueness.
    pub fn name(&self) -> AuthorName {
        AuthorName {
            last_name: self.last_name.clone(),
            first_name: self.first_name.clone(),
        }
    }
}

impl fmt::Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.last_name, self.first_name)
    }
}

/// The bibliographic record attached to exactly one paper.
///
/// `raw_text` is opaque to the system; it is stored and displayed as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BibEntry {
    pub id: BibEntryId,
    pub bibtex_key: String,
    pub raw_text: String,
}

/// A paper fully assembled for display: the paper itself, its authors in
/// listing order, and its bib entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedPaper {
    pub paper: Paper,
    pub authors: Vec<Author>,
    pub bib: BibEntry,
}

impl ResolvedPaper {
    /// Render the ordered author list as `"A, B and C, D"`.
    pub fn author_line(&self) -> String {
        format_author_group(&self.authors)
    }
}

/// Join author names with `" and "`, preserving listing order.
pub fn format_author_group(authors: &[Author]) -> String {
    authors
        .iter()
        .map(Author::to_string)
        .collect::<Vec<_>>()
        .join(" and ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn author(id: i64, last: &str, first: &str) -> Author {
        Author {
            id: AuthorId(id),
            last_name: last.to_string(),
            first_name: first.to_string(),
        }
    }

    #[test]
    fn author_display_is_last_comma_first() {
        assert_eq!(author(1, "Doe", "Jane").to_string(), "Doe, Jane");
    }

    #[test]
    fn author_group_joined_with_and() {
        let authors = vec![author(1, "Doe", "Jane"), author(2, "Roe", "Richard")];
        assert_eq!(format_author_group(&authors), "Doe, Jane and Roe, Richard");
    }

    #[test]
    fn empty_author_group_renders_empty() {
        assert_eq!(format_author_group(&[]), "");
    }

    #[test]
    fn paper_id_parses_from_str() {
        assert_eq!("42".parse::<PaperId>().unwrap(), PaperId(42));
        assert!("nope".parse::<PaperId>().is_err());
    }
}
