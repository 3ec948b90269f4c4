//! State machine for the interactive search dialog.
//!
//! The shell owns the terminal; this machine owns the control flow. Each
//! user input moves the dialog one step, and the shell renders whatever
//! state comes back. The resolver is invoked by the shell between
//! `AwaitingQuery` and `outcome_received`, and again after a
//! disambiguation choice; the machine itself never touches storage.

use crate::outcome::{Disambiguation, SearchOutcome};
use crate::query::SearchMode;
use crate::types::{PaperId, ResolvedPaper};

/// The states of one search interaction.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchDialog {
    /// No search in progress.
    Idle,
    /// Waiting for the user to pick author or title search.
    AwaitingMode,
    /// Waiting for the query string.
    AwaitingQuery { mode: SearchMode },
    /// Multiple candidates; waiting for a selection index.
    AwaitingChoice { disambiguation: Disambiguation },
    /// Search finished with exactly one paper.
    Resolved(ResolvedPaper),
    /// Search ended without a paper (not found, or an operation failed).
    Failed(String),
}

/// Result of feeding a disambiguation choice into the dialog.
#[derive(Debug, Clone, PartialEq)]
pub enum DialogStep {
    /// A valid candidate was picked. The caller resolves `paper` against
    /// storage and feeds the result back via `outcome_received`.
    Selected {
        dialog: SearchDialog,
        paper: PaperId,
    },
    /// The index was out of range; still awaiting a valid choice.
    Retry(SearchDialog),
}

impl SearchDialog {
    pub fn new() -> Self {
        SearchDialog::Idle
    }

    /// Start (or restart) a search.
    pub fn begin(self) -> Self {
        SearchDialog::AwaitingMode
    }

    /// The user picked a search mode.
    pub fn mode_selected(self, mode: SearchMode) -> Self {
        match self {
            SearchDialog::AwaitingMode => SearchDialog::AwaitingQuery { mode },
            other => other.unexpected("mode selection"),
        }
    }

    /// A resolver outcome arrived, either for the initial query or for a
    /// re-resolution after a disambiguation choice.
    pub fn outcome_received(self, outcome: SearchOutcome) -> Self {
        match self {
            SearchDialog::AwaitingQuery { .. } | SearchDialog::AwaitingChoice { .. } => {
                match outcome {
                    SearchOutcome::Resolved(paper) => SearchDialog::Resolved(paper),
                    SearchOutcome::Ambiguous(d) if d.is_empty() => {
                        SearchDialog::Failed("no matching paper found".to_string())
                    }
                    SearchOutcome::Ambiguous(disambiguation) => {
                        SearchDialog::AwaitingChoice { disambiguation }
                    }
                    SearchOutcome::NotFound => {
                        SearchDialog::Failed("no matching paper found".to_string())
                    }
                }
            }
            other => other.unexpected("search outcome"),
        }
    }

    /// The user entered a zero-based selection index.
    pub fn choice_made(self, index: usize) -> DialogStep {
        match self {
            SearchDialog::AwaitingChoice { disambiguation } => {
                match disambiguation.select(index) {
                    Some(paper) => DialogStep::Selected {
                        dialog: SearchDialog::AwaitingChoice { disambiguation },
                        paper,
                    },
                    None => DialogStep::Retry(SearchDialog::AwaitingChoice { disambiguation }),
                }
            }
            other => DialogStep::Retry(other.unexpected("disambiguation choice")),
        }
    }

    /// Record a failure (e.g. a storage error) and end the search.
    pub fn fail(self, message: impl Into<String>) -> Self {
        SearchDialog::Failed(message.into())
    }

    /// True once the dialog reached a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, SearchDialog::Resolved(_) | SearchDialog::Failed(_))
    }

    fn unexpected(self, input: &str) -> Self {
        SearchDialog::Failed(format!("unexpected {input} in state {}", self.state_name()))
    }

    fn state_name(&self) -> &'static str {
        match self {
            SearchDialog::Idle => "idle",
            SearchDialog::AwaitingMode => "awaiting-mode",
            SearchDialog::AwaitingQuery { .. } => "awaiting-query",
            SearchDialog::AwaitingChoice { .. } => "awaiting-choice",
            SearchDialog::Resolved(_) => "resolved",
            SearchDialog::Failed(_) => "failed",
        }
    }
}

impl Default for SearchDialog {
    fn default() -> Self {
        Self::new()
    }
}
