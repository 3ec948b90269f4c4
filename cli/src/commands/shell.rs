//! SHELL command - interactive menu over search, add, and update.
//!
//! The search flow is driven by the `SearchDialog` state machine from
//! papershelf-core: the shell renders each state, feeds user input in,
//! and runs the resolver between states. Invalid input re-prompts; it
//! never aborts the session.

use anyhow::Result;
use colored::Colorize;

use papershelf_store::papershelf_core::{
    AuthorName, DialogStep, PaperId, SearchDialog, SearchMode, SearchOutcome,
};
use papershelf_store::{NewPaper, PaperField, ResolveError, Resolver, Store};

use super::{confirm, pick_candidate, print_resolved, prompt_nonempty, read_line};

/// Execute the interactive shell.
pub async fn execute(store: &Store) -> Result<()> {
    loop {
        let choice = prompt_nonempty(
            "\nWhat do you want to do?\n\
             1) Search the database\n\
             2) Add an entry\n\
             3) Update an entry\n\
             4) (Q)uit\n\
             Your choice: ",
        )?;
        match choice.to_lowercase().as_str() {
            "1" => run_search(store).await?,
            "2" => run_add(store).await?,
            "3" => run_update(store).await?,
            "4" | "q" | "quit" => {
                println!("Closing connection...");
                return Ok(());
            }
            _ => println!("Your input was invalid"),
        }
    }
}

/// One full search interaction, driven by the dialog state machine.
async fn run_search(store: &Store) -> Result<()> {
    let resolver = Resolver::new(store.clone());
    let mut dialog = SearchDialog::new().begin();

    loop {
        dialog = match dialog {
            SearchDialog::AwaitingMode => {
                let answer = prompt_nonempty(
                    "Search interface\nPlease choose a method:\n\
                     1) Search by author\n\
                     2) Search by paper title\n\
                     Your choice: ",
                )?;
                match answer.as_str() {
                    "1" => SearchDialog::AwaitingMode.mode_selected(SearchMode::Author),
                    "2" => SearchDialog::AwaitingMode.mode_selected(SearchMode::Title),
                    _ => {
                        println!("Please choose a valid option.");
                        SearchDialog::AwaitingMode
                    }
                }
            }
            SearchDialog::AwaitingQuery { mode } => {
                let prompt = match mode {
                    SearchMode::Author => "Please enter the author as \"last name, first name\": ",
                    SearchMode::Title => "Please enter the paper title: ",
                };
                let query = prompt_nonempty(prompt)?;
                let outcome = match mode {
                    SearchMode::Author => resolver.search_by_author(&query).await,
                    SearchMode::Title => resolver.search_by_title(&query).await,
                };
                match outcome {
                    Ok(outcome) => {
                        SearchDialog::AwaitingQuery { mode }.outcome_received(outcome)
                    }
                    // Recoverable input error: report and ask again.
                    Err(ResolveError::Input(e)) => {
                        println!("{e}");
                        SearchDialog::AwaitingQuery { mode }
                    }
                    Err(ResolveError::Store(e)) => {
                        SearchDialog::AwaitingQuery { mode }.fail(e.to_string())
                    }
                }
            }
            SearchDialog::AwaitingChoice { disambiguation } => {
                let index = pick_candidate(&disambiguation)?;
                match (SearchDialog::AwaitingChoice { disambiguation }).choice_made(index) {
                    DialogStep::Selected { dialog, paper } => {
                        step_resolve(&resolver, dialog, paper).await
                    }
                    DialogStep::Retry(dialog) => {
                        println!("Please choose a valid number.");
                        dialog
                    }
                }
            }
            SearchDialog::Resolved(paper) => {
                print_resolved(&paper);
                return Ok(());
            }
            SearchDialog::Failed(message) => {
                println!("{message}");
                return Ok(());
            }
            idle @ SearchDialog::Idle => idle.begin(),
        };
    }
}

/// Resolve a chosen candidate and feed the result back into the dialog.
async fn step_resolve(resolver: &Resolver, dialog: SearchDialog, paper: PaperId) -> SearchDialog {
    match resolver.resolve_paper(paper).await {
        Ok(resolved) => dialog.outcome_received(SearchOutcome::Resolved(resolved)),
        Err(e) => dialog.fail(e.to_string()),
    }
}

/// Prompt for all fields of a new paper and store it.
async fn run_add(store: &Store) -> Result<()> {
    println!("Please enter the necessary information.");
    let title = prompt_nonempty("Paper title: ")?;

    let mut authors = Vec::new();
    println!("Authors as \"last name, first name\", in listing order; empty line to finish.");
    loop {
        let raw = read_line(&format!("Author {}: ", authors.len() + 1))?;
        if raw.is_empty() {
            if authors.is_empty() {
                println!("At least one author is required.");
                continue;
            }
            break;
        }
        match AuthorName::parse(&raw) {
            Ok(name) => authors.push(name),
            Err(e) => println!("{e}"),
        }
    }

    let bibtex_key = prompt_nonempty("bibtex key: ")?;
    let bib_text = match read_line("Read bib entry from a file? [y/N]: ")?.to_lowercase().as_str()
    {
        "y" | "yes" | "1" => {
            let path = prompt_nonempty("Enter filename: ")?;
            match std::fs::read_to_string(&path) {
                Ok(text) => text,
                Err(e) => {
                    println!("cannot read {path}: {e}");
                    return Ok(());
                }
            }
        }
        _ => prompt_nonempty("bib entry: ")?,
    };
    let summary = read_line("Summary of the paper (optional): ")?;
    let summary = if summary.is_empty() { None } else { Some(summary) };

    let new = NewPaper {
        title,
        summary,
        bibtex_key,
        bib_text,
        authors,
    };
    match store.add_paper(&new).await {
        Ok(id) => println!("{} {} (paper id {})", "Added".green().bold(), new.title, id),
        Err(e) => println!("Could not add entry: {e}"),
    }
    Ok(())
}

/// Prompt-driven update of a paper field, a bib entry, or an author name.
async fn run_update(store: &Store) -> Result<()> {
    let target = prompt_nonempty(
        "Which information do you want to update?\n\
         1) paper\n\
         2) bib\n\
         3) author\n\
         4) abort\n\
         Your choice: ",
    )?;
    let result = match target.to_lowercase().as_str() {
        "1" | "paper" => update_paper_flow(store).await,
        "2" | "bib" => update_bib_flow(store).await,
        "3" | "author" => update_author_flow(store).await,
        "4" | "abort" => {
            println!("Stopping update process...");
            return Ok(());
        }
        other => {
            println!("'{other}' cannot be updated in this manner.");
            return Ok(());
        }
    };
    if let Err(e) = result {
        println!("Could not update entry: {e}");
    }
    Ok(())
}

async fn update_paper_flow(store: &Store) -> Result<()> {
    let field = loop {
        let answer = prompt_nonempty(
            "Which field?\n1) title\n2) summary\nYour choice: ",
        )?;
        match answer.to_lowercase().as_str() {
            "1" | "title" => break PaperField::Title,
            "2" | "summary" => break PaperField::Summary,
            _ => println!("Please choose a valid option."),
        }
    };
    let id = prompt_paper_id()?;
    let value = prompt_nonempty("Enter the new information: ")?;
    if confirm(&format!(
        "You wish to change {} of paper {id} to {value:?}. Proceed?",
        field.column()
    ))? {
        store.update_paper(id, field, &value).await?;
        println!("{}", "Updated.".green().bold());
    } else {
        println!("Stopping update process...");
    }
    Ok(())
}

async fn update_bib_flow(store: &Store) -> Result<()> {
    println!("Only the bib text can be updated - the bibtex key cannot be changed.");
    let id = prompt_paper_id()?;
    let text = prompt_nonempty("Enter the new bib entry: ")?;
    if confirm(&format!("You wish to replace the bib entry of paper {id}. Proceed?"))? {
        store.update_bib(id, &text).await?;
        println!("{}", "Updated.".green().bold());
    } else {
        println!("Stopping update process...");
    }
    Ok(())
}

async fn update_author_flow(store: &Store) -> Result<()> {
    println!("Only an author's name can be updated.");
    let raw = prompt_nonempty("Author id: ")?;
    let Ok(id) = raw.parse() else {
        println!("Please enter a numeric id.");
        return Ok(());
    };
    let id = papershelf_store::papershelf_core::AuthorId(id);
    let name = loop {
        let raw = prompt_nonempty("New name as \"last name, first name\": ")?;
        match AuthorName::parse(&raw) {
            Ok(name) => break name,
            Err(e) => println!("{e}"),
        }
    };
    if confirm(&format!("You wish to rename author {id} to '{name}'. Proceed?"))? {
        store.rename_author(id, &name).await?;
        println!("{}", "Updated.".green().bold());
    } else {
        println!("Stopping update process...");
    }
    Ok(())
}

fn prompt_paper_id() -> Result<PaperId> {
    loop {
        let raw = prompt_nonempty("Paper id: ")?;
        match raw.parse::<i64>() {
            Ok(id) => return Ok(PaperId(id)),
            Err(_) => println!("Please enter a numeric id."),
        }
    }
}
