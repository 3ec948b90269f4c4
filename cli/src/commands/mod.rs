//! Shared helpers for the CLI commands: store construction, line-based
//! prompting, and result rendering.

pub mod add;
pub mod search;
pub mod shell;
pub mod update;

use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};
use colored::Colorize;

use papershelf_store::papershelf_core::{Disambiguation, ResolvedPaper};
use papershelf_store::{schema, ConnectionProfile, Store, StoreConfig};

/// Build the store from CLI connection options.
///
/// Precedence: explicit URL (flag or `DATABASE_URL`), then the profile
/// file section. Having neither is a reportable configuration error.
pub async fn connect(
    database_url: Option<&str>,
    config: Option<&Path>,
    section: &str,
) -> Result<Store> {
    let url = match (database_url, config) {
        (Some(url), _) => url.to_string(),
        (None, Some(path)) => ConnectionProfile::load(path, section)?.database_url(),
        (None, None) => bail!(
            "no connection parameters: pass --database-url (or set DATABASE_URL) \
             or --config with a profile file"
        ),
    };
    let store = Store::connect(StoreConfig::new(url))
        .await
        .context("could not connect to the database")?;
    Ok(store)
}

/// `init` command: the schema is created on connect; report the state.
pub async fn init(store: &Store) -> Result<()> {
    if schema::is_schema_initialized(store.pool()).await? {
        println!("{}", "Schema is in place.".green());
    } else {
        bail!("schema initialization did not take effect");
    }
    Ok(())
}

/// Print a prompt and read one trimmed line from stdin. A closed input
/// stream is an error, so the prompt loops terminate instead of spinning.
pub fn read_line(prompt: &str) -> Result<String> {
    print!("{prompt}");
    io::stdout().flush()?;
    read_trimmed_line(&mut io::stdin().lock())
}

fn read_trimmed_line(reader: &mut impl BufRead) -> Result<String> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        bail!("input closed");
    }
    Ok(line.trim().to_string())
}

/// Prompt until the user enters something non-empty.
pub fn prompt_nonempty(prompt: &str) -> Result<String> {
    loop {
        let answer = read_line(prompt)?;
        if !answer.is_empty() {
            return Ok(answer);
        }
    }
}

/// Parse a 1-based menu choice. Anything non-numeric becomes `None` so
/// the caller re-prompts instead of crashing.
pub fn parse_choice(input: &str) -> Option<usize> {
    input.trim().parse::<usize>().ok().and_then(|n| n.checked_sub(1))
}

/// Yes/no confirmation.
pub fn confirm(prompt: &str) -> Result<bool> {
    let answer = read_line(&format!("{prompt} [y/N]: "))?.to_lowercase();
    Ok(matches!(answer.as_str(), "y" | "yes" | "1"))
}

/// Render a candidate list and prompt until a valid 1-based index comes
/// back; returns the zero-based index.
pub fn pick_candidate(disambiguation: &Disambiguation) -> Result<usize> {
    println!("Following papers found:");
    for (i, candidate) in disambiguation.candidates().iter().enumerate() {
        println!("{}) {}", (i + 1).to_string().bold(), candidate.label());
    }
    loop {
        let answer = read_line("Choose paper to extract: ")?;
        match parse_choice(&answer) {
            Some(index) if index < disambiguation.len() => return Ok(index),
            _ => println!("Please choose a valid number."),
        }
    }
}

/// Print a fully resolved paper.
pub fn print_resolved(paper: &ResolvedPaper) {
    println!("{} {}", "title:".cyan(), paper.paper.title);
    println!("{} {}", "authors:".cyan(), paper.author_line());
    println!(
        "{} {}",
        "summary:".cyan(),
        paper.paper.summary.as_deref().unwrap_or("(none)")
    );
    println!("{} {}", "bib key:".cyan(), paper.bib.bibtex_key);
    println!("{} {}", "bib entry:".cyan(), paper.bib.raw_text);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn choice_is_one_based() {
        assert_eq!(parse_choice("1"), Some(0));
        assert_eq!(parse_choice(" 3 "), Some(2));
    }

    #[test]
    fn invalid_choices_are_none() {
        assert_eq!(parse_choice("0"), None);
        assert_eq!(parse_choice("x"), None);
        assert_eq!(parse_choice(""), None);
        assert_eq!(parse_choice("-2"), None);
    }

    #[test]
    fn lines_are_trimmed() {
        let mut input = io::Cursor::new(" yes \n");
        assert_eq!(read_trimmed_line(&mut input).unwrap(), "yes");
    }

    #[test]
    fn exhausted_input_is_an_error_not_an_empty_line() {
        let mut input = io::Cursor::new("");
        assert!(read_trimmed_line(&mut input).is_err());

        // A blank line is still a plain empty string, not an error.
        let mut blank = io::Cursor::new("\n");
        assert_eq!(read_trimmed_line(&mut blank).unwrap(), "");
    }
}
