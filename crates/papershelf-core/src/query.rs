//! Parsing of human-entered search queries.
//!
//! Title queries are taken verbatim (exact, case-sensitive match).
//! Author queries must be `"<last_name>, <first_name>"`: the string is
//! split on the first comma and both halves are trimmed, so
//! `"Doe,Jane"` and `" Doe , Jane "` name the same author. A missing
//! comma is a user-input error, not a crash; the caller re-prompts.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which field a search runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchMode {
    Author,
    Title,
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchMode::Author => write!(f, "author"),
            SearchMode::Title => write!(f, "title"),
        }
    }
}

/// Recoverable errors in user-entered queries. The shell reports the
/// message and prompts again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryParseError {
    /// The query string was empty or whitespace-only.
    #[error("query must not be empty")]
    EmptyQuery,

    /// An author query had no comma separating last and first name.
    #[error("author must be given as \"last name, first name\" (got {0:?})")]
    MissingComma(String),

    /// One side of the comma was empty after trimming.
    #[error("author name is incomplete (got {0:?})")]
    IncompleteName(String),
}

/// An author's identity pair as entered by the user or stored in the
/// database.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AuthorName {
    pub last_name: String,
    pub first_name: String,
}

impl AuthorName {
    pub fn new(last_name: impl Into<String>, first_name: impl Into<String>) -> Self {
        Self {
            last_name: last_name.into(),
            first_name: first_name.into(),
        }
    }

    /// Parse `"<last>, <first>"`, splitting on the first comma and
    /// trimming surrounding whitespace on both halves.
    pub fn parse(raw: &str) -> Result<Self, QueryParseError> {
        if raw.trim().is_empty() {
            return Err(QueryParseError::EmptyQuery);
        }
        let (last, first) = raw
            .split_once(',')
            .ok_or_else(|| QueryParseError::MissingComma(raw.to_string()))?;
        let last = last.trim();
        let first = first.trim();
        if last.is_empty() || first.is_empty() {
            return Err(QueryParseError::IncompleteName(raw.to_string()));
        }
        Ok(Self::new(last, first))
    }
}

impl fmt::Display for AuthorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.last_name, self.first_name)
    }
}

/// Validate a title query: exact matching only, so the single rule is
/// that the query must not be empty.
pub fn validate_title_query(raw: &str) -> Result<&str, QueryParseError> {
    if raw.is_empty() {
        return Err(QueryParseError::EmptyQuery);
    }
    Ok(raw)
}
