//! SEARCH command - resolve a paper by title or author.

use anyhow::Result;
use clap::Args;

use papershelf_store::papershelf_core::SearchOutcome;
use papershelf_store::{ResolveError, Resolver, Store};

use super::{pick_candidate, print_resolved};

/// Arguments for the search command.
#[derive(Args)]
pub struct SearchArgs {
    /// Exact paper title to look up
    #[arg(long, conflicts_with = "author")]
    pub title: Option<String>,

    /// Author to look up, as "last name, first name"
    #[arg(short, long)]
    pub author: Option<String>,
}

/// Execute the search command.
pub async fn execute(store: &Store, args: SearchArgs) -> Result<()> {
    let resolver = Resolver::new(store.clone());

    let outcome = match (&args.title, &args.author) {
        (Some(title), _) => resolver.search_by_title(title).await,
        (None, Some(author)) => resolver.search_by_author(author).await,
        (None, None) => {
            anyhow::bail!("pass --title or --author");
        }
    };

    let outcome = match outcome {
        Ok(outcome) => outcome,
        // Malformed input is user-visible and recoverable, not a crash.
        Err(ResolveError::Input(e)) => {
            println!("{e}");
            return Ok(());
        }
        Err(ResolveError::Store(e)) => return Err(e.into()),
    };

    match outcome {
        SearchOutcome::Resolved(paper) => print_resolved(&paper),
        SearchOutcome::Ambiguous(disambiguation) => {
            let index = pick_candidate(&disambiguation)?;
            // select() is total for indices pick_candidate accepts
            let Some(id) = disambiguation.select(index) else {
                anyhow::bail!("candidate index out of range");
            };
            let paper = resolver.resolve_paper(id).await?;
            print_resolved(&paper);
        }
        SearchOutcome::NotFound => println!("no paper found"),
    }

    Ok(())
}
