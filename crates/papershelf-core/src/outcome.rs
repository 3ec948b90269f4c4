//! Search outcomes and disambiguation between candidate papers.
//!
//! A search ends in one of three ways: nothing matched, exactly one
//! paper matched, or several did. The last case is not an error — it is
//! a control-flow result carrying the candidate list; the caller shows
//! it, collects a selection index, and resolves the chosen paper id.

use serde::{Deserialize, Serialize};

use crate::types::{format_author_group, Author, Paper, PaperId, ResolvedPaper};

/// Result of a search, before or after disambiguation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchOutcome {
    /// Exactly one paper matched; fully assembled for display.
    Resolved(ResolvedPaper),
    /// Several papers matched; the caller must pick one.
    Ambiguous(Disambiguation),
    /// No paper matched the query.
    NotFound,
}

/// One selectable candidate: a paper plus its ordered author group.
///
/// The author group doubles as the disambiguation label when several
/// papers share a title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub paper: Paper,
    pub authors: Vec<Author>,
}

impl Candidate {
    /// One-line label: title plus author group.
    pub fn label(&self) -> String {
        format!(
            "title: {}\n   authors: {}",
            self.paper.title,
            format_author_group(&self.authors)
        )
    }
}

/// A multi-candidate search result awaiting a user selection.
///
/// Candidates are kept in ascending paper-id order (insertion order), so
/// repeated identical queries present the same numbering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Disambiguation {
    candidates: Vec<Candidate>,
}

impl Disambiguation {
    /// Build from an unordered candidate set; sorts by ascending paper id.
    pub fn from_candidates(mut candidates: Vec<Candidate>) -> Self {
        candidates.sort_by_key(|c| c.paper.id);
        Self { candidates }
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Map a zero-based selection index back to the paper id it names.
    /// Out-of-range indices return `None`; the caller re-prompts.
    pub fn select(&self, index: usize) -> Option<PaperId> {
        self.candidates.get(index).map(|c| c.paper.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AuthorId;

    fn candidate(id: i64, title: &str) -> Candidate {
        Candidate {
            paper: Paper {
                id: PaperId(id),
                title: title.to_string(),
                summary: None,
            },
            authors: vec![Author {
                id: AuthorId(id),
                last_name: "Doe".to_string(),
                first_name: "Jane".to_string(),
            }],
        }
    }

    #[test]
    fn candidates_sorted_by_ascending_paper_id() {
        let d = Disambiguation::from_candidates(vec![
            candidate(7, "B"),
            candidate(2, "A"),
            candidate(5, "C"),
        ]);
        let ids: Vec<_> = d.candidates().iter().map(|c| c.paper.id.0).collect();
        assert_eq!(ids, vec![2, 5, 7]);
    }

    #[test]
    fn ordering_is_stable_across_builds() {
        let build = || {
            Disambiguation::from_candidates(vec![candidate(3, "X"), candidate(1, "X")])
        };
        assert_eq!(build(), build());
    }

    #[test]
    fn select_maps_index_to_paper_id() {
        let d = Disambiguation::from_candidates(vec![candidate(9, "B"), candidate(4, "A")]);
        assert_eq!(d.select(0), Some(PaperId(4)));
        assert_eq!(d.select(1), Some(PaperId(9)));
        assert_eq!(d.select(2), None);
    }

    #[test]
    fn label_names_title_and_author_group() {
        let label = candidate(1, "Deep Stuff").label();
        assert!(label.contains("Deep Stuff"));
        assert!(label.contains("Doe, Jane"));
    }
}
