//! Interactive demo for the tabmatch completion engine.
//!
//! Loads candidate terms from a file or the command line, then runs a small
//! read-type-complete loop: every line typed becomes the query, and empty
//! lines cycle through the completions the way a Tab press would.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};

use tabmatch::prelude::*;

#[derive(Parser)]
#[command(name = "tabmatch")]
#[command(about = "Interactive tab-completion engine demo", long_about = None)]
#[command(version)]
struct Cli {
    /// Candidate file (one term per line)
    #[arg(short, long)]
    dict: Option<PathBuf>,

    /// Candidate terms given inline
    terms: Vec<String>,

    /// Matching mode
    #[arg(short, long, value_enum, default_value = "exact")]
    mode: ModeChoice,

    /// Ignore case while matching
    #[arg(short, long)]
    ignore_case: bool,

    /// Step one item at a time instead of scanning to the next match
    #[arg(long)]
    first_match: bool,

    /// Cycle through non-matching candidates too
    #[arg(long)]
    show_all: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeChoice {
    /// Prefix matching
    Exact,
    /// Damerau-Levenshtein distance
    Fuzzy,
    /// The query is a regular expression
    Regex,
}

impl From<ModeChoice> for MatchMode {
    fn from(choice: ModeChoice) -> Self {
        match choice {
            ModeChoice::Exact => MatchMode::Exact,
            ModeChoice::Fuzzy => MatchMode::Fuzzy,
            ModeChoice::Regex => MatchMode::Regex,
        }
    }
}

fn load_terms(cli: &Cli) -> Result<Vec<String>> {
    let mut terms = cli.terms.clone();

    if let Some(path) = &cli.dict {
        let file = File::open(path)
            .with_context(|| format!("cannot open candidate file {}", path.display()))?;
        for line in BufReader::new(file).lines() {
            let line = line.context("cannot read candidate file")?;
            let line = line.trim();
            if !line.is_empty() {
                terms.push(line.to_owned());
            }
        }
    }

    Ok(terms)
}

fn banner(comp: &Completion) {
    println!(
        "{} {:?} mode, {} candidates loaded",
        "tabmatch".bold(),
        comp.mode(),
        comp.size() - 1
    );
    println!("type a query, press enter on an empty line to cycle, ctrl-d to quit");
}

fn run(mut comp: Completion) -> RlResult<()> {
    let mut editor = DefaultEditor::new()?;

    loop {
        match editor.readline("tabmatch> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    // an empty line plays the role of the Tab key
                } else if !comp.type_text(line) {
                    println!("{}: input rejected", "warning".yellow());
                    continue;
                } else {
                    editor.add_history_entry(line)?;
                }

                match comp.complete() {
                    Some(result) if result == comp.typed_text() => {
                        println!("  {}", result.dimmed());
                    }
                    Some(result) => {
                        println!("  {}", result.green());
                    }
                    None => {
                        println!("{}: engine is unhealthy", "error".red().bold());
                        break;
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
            }
            Err(ReadlineError::Eof) => {
                println!("bye");
                break;
            }
            Err(err) => return Err(err),
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let terms = load_terms(&cli)?;

    let comp = Completion::builder()
        .mode(cli.mode.into())
        .ignore_case(cli.ignore_case)
        .first_match(cli.first_match)
        .show_all(cli.show_all)
        .terms(terms)
        .build();

    banner(&comp);
    run(comp).context("readline loop failed")?;
    Ok(())
}
