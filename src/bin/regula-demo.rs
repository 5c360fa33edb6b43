//! A small CLI exercising parser -> automaton -> transform -> regex
//! end-to-end, standing in for the excluded graphical front-end. Grounded
//! in `dandy-cli`'s subcommand shape (`union.rs`, `intersection.rs`,
//! `equivalence.rs`), trimmed to this crate's single combined `Automaton`
//! type.

use clap::{Parser, Subcommand, ValueEnum};
use regula::automaton::persist::PersistError;
use regula::automaton::AutomatonError;
use regula::grammar::GrammarError;
use regula::regex::RegexError;
use regula::{Automaton, Grammar};
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Parser)]
#[command(name = "regula-demo", about = "Inspect and combine automata, grammars and regexes")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Kind {
    Automaton,
    Grammar,
}

#[derive(Subcommand)]
enum Command {
    /// Print a loaded automaton or grammar as a transition table / textual form.
    Show {
        #[arg(value_enum, default_value = "automaton")]
        kind: Kind,
        path: PathBuf,
    },
    /// Determinize, remove unreachable/dead states and merge equivalent ones.
    Minimize { path: PathBuf },
    /// Report whether the automaton accepts no words at all.
    IsEmpty { path: PathBuf },
    /// Report whether the automaton's language is finite.
    IsFinite { path: PathBuf },
    /// Union, intersect, or take the difference of two automata.
    Combine {
        #[arg(value_enum)]
        op: BinaryOp,
        first: PathBuf,
        second: PathBuf,
    },
    /// Check whether two automata accept the same language.
    Equivalent { first: PathBuf, second: PathBuf },
    /// Convert an automaton to its right-linear grammar form.
    ToGrammar { path: PathBuf },
    /// Convert a right-linear grammar to its automaton form.
    ToAutomaton { path: PathBuf },
    /// Compile a regex pattern to a DFA and print it.
    CompileRegex { pattern: String },
    /// Check whether a word (space-separated symbols) is accepted.
    Accept { path: PathBuf, word: String },
}

#[derive(Debug, Error)]
enum DemoError {
    #[error("reading {0}: {1}")]
    Io(PathBuf, std::io::Error),
    #[error("loading automaton: {0}")]
    Persist(#[from] PersistError),
    #[error("parsing grammar: {0}")]
    Grammar(#[from] GrammarError),
    #[error("compiling regex: {0}")]
    Regex(#[from] RegexError),
    #[error("{0}")]
    Automaton(#[from] AutomatonError),
}

fn read(path: &PathBuf) -> Result<String, DemoError> {
    fs::read_to_string(path).map_err(|e| DemoError::Io(path.clone(), e))
}

fn load_automaton(path: &PathBuf) -> Result<Automaton, DemoError> {
    Ok(Automaton::load(&read(path)?)?)
}

fn load_grammar(path: &PathBuf) -> Result<Grammar, DemoError> {
    Ok(regula::grammar::parse::parse(&read(path)?)?)
}

fn run(cli: Cli) -> Result<(), DemoError> {
    match cli.command {
        Command::Show { kind, path } => match kind {
            Kind::Automaton => println!("{}", load_automaton(&path)?.to_table()),
            Kind::Grammar => println!("{}", load_grammar(&path)?),
        },
        Command::Minimize { path } => {
            let mut a = load_automaton(&path)?.determinize();
            a.minimize()?;
            println!("{}", a.to_table());
        }
        Command::IsEmpty { path } => {
            println!("{}", load_automaton(&path)?.is_empty());
        }
        Command::IsFinite { path } => {
            println!("{}", load_automaton(&path)?.is_finite());
        }
        Command::Combine { op, first, second } => {
            let a = load_automaton(&first)?;
            let b = load_automaton(&second)?;
            let combined = match op {
                BinaryOp::Union => a.union(&b),
                BinaryOp::Intersection => a.intersection(&b),
                BinaryOp::Difference => a.difference(&b),
            };
            println!("{}", combined.to_table());
        }
        Command::Equivalent { first, second } => {
            let a = load_automaton(&first)?;
            let b = load_automaton(&second)?;
            println!("{}", a.is_equivalent_to(&b));
        }
        Command::ToGrammar { path } => {
            let a = load_automaton(&path)?;
            println!("{}", Grammar::from_automaton(&a));
        }
        Command::ToAutomaton { path } => {
            let g = load_grammar(&path)?;
            println!("{}", g.to_automaton().to_table());
        }
        Command::CompileRegex { pattern } => {
            let a = regula::regex::to_automaton(&pattern)?;
            println!("{}", a.to_table());
        }
        Command::Accept { path, word } => {
            let a = load_automaton(&path)?;
            let symbols: Vec<&str> = word.split_whitespace().collect();
            println!("{}", a.accept(&symbols));
        }
    }
    Ok(())
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum BinaryOp {
    Union,
    Intersection,
    Difference,
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
