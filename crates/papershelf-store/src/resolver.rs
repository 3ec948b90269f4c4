//! The resolver: maps a user query to a disambiguated paper.
//!
//! A search either resolves to exactly one paper (with its ordered
//! authors and bib entry), produces a candidate list the caller must
//! choose from, or finds nothing. The resolver holds no state beyond the
//! injected store handle: the same query against the same data always
//! yields the same outcome, with candidates in ascending paper-id order.

use papershelf_core::{
    AuthorName, Candidate, Disambiguation, PaperId, QueryParseError, ResolvedPaper, SearchOutcome,
};
use thiserror::Error;

use crate::error::StoreError;
use crate::models::PaperRow;
use crate::store::Store;

/// Errors a search can end in. Input errors are recoverable (the shell
/// re-prompts); store errors abort the current operation.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error(transparent)]
    Input(#[from] QueryParseError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Query resolution over a store handle.
#[derive(Debug, Clone)]
pub struct Resolver {
    store: Store,
}

impl Resolver {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Search by exact, case-sensitive title match.
    pub async fn search_by_title(&self, title: &str) -> Result<SearchOutcome, ResolveError> {
        let title = papershelf_core::query::validate_title_query(title)?;
        let rows = self.store.papers_by_title(title).await?;
        Ok(self.outcome_from_rows(rows).await?)
    }

    /// Search by author, parsing `"<last>, <first>"` first. A malformed
    /// name is an input error, reported and re-promptable, never a crash.
    pub async fn search_by_author(&self, raw: &str) -> Result<SearchOutcome, ResolveError> {
        let name = AuthorName::parse(raw)?;
        Ok(self.search_by_author_name(&name).await?)
    }

    /// Search by an already-parsed author name.
    ///
    /// The author is matched exactly by (last_name, first_name); their
    /// papers are found regardless of authorship position. An author row
    /// without any authorship yields `NotFound` rather than an error.
    pub async fn search_by_author_name(
        &self,
        name: &AuthorName,
    ) -> Result<SearchOutcome, StoreError> {
        let Some(author) = self.store.author_by_name(name).await? else {
            tracing::debug!(%name, "author not found");
            return Ok(SearchOutcome::NotFound);
        };
        let rows = self.store.papers_by_author(author.author_id()).await?;
        self.outcome_from_rows(rows).await
    }

    /// Fully assemble one paper: ordered authors plus bib entry. Used for
    /// the single-match case and after a disambiguation choice.
    pub async fn resolve_paper(&self, id: PaperId) -> Result<ResolvedPaper, StoreError> {
        let paper = self.store.get_paper(id).await?;
        let authors = self.store.authors_for_paper(id).await?;
        let bib = self.store.bib_for_paper(id).await?;
        Ok(ResolvedPaper {
            paper: paper.into(),
            authors: authors.into_iter().map(Into::into).collect(),
            bib: bib.into(),
        })
    }

    async fn outcome_from_rows(&self, rows: Vec<PaperRow>) -> Result<SearchOutcome, StoreError> {
        match rows.len() {
            0 => Ok(SearchOutcome::NotFound),
            1 => {
                let resolved = self.resolve_paper(rows[0].paper_id()).await?;
                Ok(SearchOutcome::Resolved(resolved))
            }
            _ => {
                let mut candidates = Vec::with_capacity(rows.len());
                for row in rows {
                    let authors = self.store.authors_for_paper(row.paper_id()).await?;
                    candidates.push(Candidate {
                        paper: row.into(),
                        authors: authors.into_iter().map(Into::into).collect(),
                    });
                }
                Ok(SearchOutcome::Ambiguous(Disambiguation::from_candidates(
                    candidates,
                )))
            }
        }
    }
}
