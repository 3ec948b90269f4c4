//! UPDATE command - change stored papers, bib entries, and authors.
//!
//! Every update names an id that must already exist (found via search)
//! and asks for confirmation before committing, unless --yes is given.
//! Ids themselves are immutable.

use anyhow::{Context, Result};
use clap::{Args, Subcommand, ValueEnum};
use colored::Colorize;

use papershelf_store::papershelf_core::{AuthorId, AuthorName, PaperId};
use papershelf_store::{PaperField, Store};

use super::confirm;

/// Arguments for the update command.
#[derive(Args)]
pub struct UpdateArgs {
    /// Skip the confirmation prompt
    #[arg(short, long, global = true)]
    pub yes: bool,

    #[command(subcommand)]
    pub target: UpdateTarget,
}

#[derive(Subcommand)]
pub enum UpdateTarget {
    /// Change a paper's title or summary
    Paper {
        /// Paper id
        #[arg(long)]
        id: i64,

        /// Which field to change
        #[arg(long)]
        field: Field,

        /// The new value
        #[arg(long)]
        value: String,
    },

    /// Replace the bib entry text of a paper (the key is immutable)
    Bib {
        /// Paper id the bib entry belongs to
        #[arg(long)]
        paper_id: i64,

        /// New bib entry text, inline
        #[arg(long, conflicts_with = "file", required_unless_present = "file")]
        text: Option<String>,

        /// Read the new bib entry text from a file
        #[arg(long)]
        file: Option<std::path::PathBuf>,
    },

    /// Rename an author (rejected if the new name already exists)
    Author {
        /// Author id
        #[arg(long)]
        id: i64,

        /// New name as "last name, first name"
        #[arg(long)]
        name: String,
    },

    /// Replace a paper's ordered author list
    Authors {
        /// Paper id
        #[arg(long)]
        paper_id: i64,

        /// Author as "last name, first name"; repeat in listing order
        #[arg(short, long = "author", required = true)]
        authors: Vec<String>,
    },
}

/// Mutable paper columns, as exposed on the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Field {
    Title,
    Summary,
}

impl From<Field> for PaperField {
    fn from(field: Field) -> Self {
        match field {
            Field::Title => PaperField::Title,
            Field::Summary => PaperField::Summary,
        }
    }
}

/// Execute the update command.
pub async fn execute(store: &Store, args: UpdateArgs) -> Result<()> {
    match args.target {
        UpdateTarget::Paper { id, field, value } => {
            if !confirmed(args.yes, &format!("change {field:?} of paper {id} to {value:?}"))? {
                return Ok(());
            }
            store.update_paper(PaperId(id), field.into(), &value).await?;
        }
        UpdateTarget::Bib { paper_id, text, file } => {
            let text = match (text, file) {
                (Some(text), _) => text,
                (None, Some(path)) => std::fs::read_to_string(&path)
                    .with_context(|| format!("cannot read bib file {}", path.display()))?,
                (None, None) => unreachable!("clap enforces one of --text / --file"),
            };
            if !confirmed(args.yes, &format!("replace the bib entry of paper {paper_id}"))? {
                return Ok(());
            }
            store.update_bib(PaperId(paper_id), &text).await?;
        }
        UpdateTarget::Author { id, name } => {
            let name = AuthorName::parse(&name)?;
            if !confirmed(args.yes, &format!("rename author {id} to {name:?}"))? {
                return Ok(());
            }
            store.rename_author(AuthorId(id), &name).await?;
        }
        UpdateTarget::Authors { paper_id, authors } => {
            let mut names = Vec::with_capacity(authors.len());
            for raw in &authors {
                names.push(AuthorName::parse(raw)?);
            }
            if !confirmed(
                args.yes,
                &format!("replace the author list of paper {paper_id}"),
            )? {
                return Ok(());
            }
            store.set_paper_authors(PaperId(paper_id), &names).await?;
        }
    }

    println!("{}", "Updated.".green().bold());
    Ok(())
}

fn confirmed(skip: bool, what: &str) -> Result<bool> {
    if skip {
        return Ok(true);
    }
    let proceed = confirm(&format!("You wish to {what}. Proceed?"))?;
    if !proceed {
        println!("Stopping update process...");
    }
    Ok(proceed)
}
