//! ADD command - store a new paper with its authors and bib entry.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use papershelf_store::papershelf_core::AuthorName;
use papershelf_store::{NewPaper, Store};

/// Arguments for the add command.
#[derive(Args)]
pub struct AddArgs {
    /// Paper title
    #[arg(long)]
    pub title: String,

    /// Author as "last name, first name"; repeat in listing order
    #[arg(short, long = "author", required = true)]
    pub authors: Vec<String>,

    /// Unique bibtex key to cite the paper by
    #[arg(short = 'k', long)]
    pub bibtex_key: String,

    /// Bib entry text, inline
    #[arg(long, conflicts_with = "bib_file", required_unless_present = "bib_file")]
    pub bib: Option<String>,

    /// Read the bib entry text from a file
    #[arg(long)]
    pub bib_file: Option<std::path::PathBuf>,

    /// One-sentence summary of the paper
    #[arg(short, long)]
    pub summary: Option<String>,
}

/// Execute the add command.
pub async fn execute(store: &Store, args: AddArgs) -> Result<()> {
    let mut authors = Vec::with_capacity(args.authors.len());
    for raw in &args.authors {
        authors.push(AuthorName::parse(raw)?);
    }

    let bib_text = match (args.bib, args.bib_file) {
        (Some(text), _) => text,
        (None, Some(path)) => std::fs::read_to_string(&path)
            .with_context(|| format!("cannot read bib file {}", path.display()))?,
        (None, None) => unreachable!("clap enforces one of --bib / --bib-file"),
    };

    let new = NewPaper {
        title: args.title,
        summary: args.summary,
        bibtex_key: args.bibtex_key,
        bib_text,
        authors,
    };

    let id = store.add_paper(&new).await?;
    println!(
        "{} {} (paper id {})",
        "Added".green().bold(),
        new.title,
        id
    );
    Ok(())
}
