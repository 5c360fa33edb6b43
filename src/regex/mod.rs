//! The extended regex dialect (`|`, concatenation, `*`, `?`, parens,
//! alphanumeric terminals, `&` epsilon) compiled directly to a DFA via a
//! threaded syntax tree and the De Simone/Aho `down`/`up` walks — no
//! intermediate NFA or Thompson construction (unlike the teacher's
//! `Regex::to_nfa`; see DESIGN.md).

mod compile;
mod parser;
mod tree;

use crate::automaton::Automaton;
use thiserror::Error;
use tree::{NodeId, Tree};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegexError {
    #[error("unexpected end of pattern")]
    UnexpectedEnd,
    #[error("unexpected character '{0}' at position {1}")]
    UnexpectedChar(char, usize),
    #[error("mismatched parentheses")]
    MismatchedParentheses,
    #[error("empty group `()` is not a valid subexpression")]
    EmptyGroup,
    #[error("alternation with an empty branch is not a valid subexpression")]
    EmptyAlternative,
    #[error("trailing input after a complete expression")]
    TrailingInput,
}

/// A parsed (and threaded) regex, ready to compile to a DFA.
pub struct Regex {
    tree: Tree,
    root: Option<NodeId>,
}

/// Parses `input` against the regex dialect (§4.4).
pub fn parse(input: &str) -> Result<Regex, RegexError> {
    let (tree, root) = parser::parse(input)?;
    Ok(Regex { tree, root })
}

impl Regex {
    /// Compiles this regex to an equivalent DFA via the De Simone/Aho
    /// construction.
    pub fn to_automaton(&self) -> Automaton {
        compile::compile(&self.tree, self.root)
    }
}

/// Parses and compiles in one step.
pub fn to_automaton(input: &str) -> Result<Automaton, RegexError> {
    parse(input).map(|r| r.to_automaton())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_regexes_are_rejected() {
        assert!(parse("*").is_err());
        assert!(parse("(a(a|b)*").is_err());
        assert!(parse("a(a))*").is_err());
        assert!(parse("()").is_err());
    }

    #[test]
    fn compiles_to_a_deterministic_automaton() {
        let a = to_automaton("1?(01)*0?").unwrap();
        assert!(a.is_deterministic());
    }
}
