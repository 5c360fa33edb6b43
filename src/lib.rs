//! Finite automata, regular grammars and a regex compiler over a shared
//! state/symbol model.
//!
//! An [`automaton::Automaton`] is a single transition relation that may or
//! may not be deterministic; [`automaton::transform`] holds the
//! determinize / minimize / union / intersection / complement family.
//! [`grammar::Grammar`] converts to and from automata. [`regex`] compiles
//! an extended regular expression directly to a DFA via a threaded syntax
//! tree (the De Simone/Aho construction), without going through an
//! intermediate NFA.
//!
//! ```text
//! S -> 0S | 1A | 0
//! A -> 0B | 1S | 1
//! B -> 0A | 1B
//! ```
//!
//! is the textual grammar form read by [`grammar::parse`]; automata persist
//! as JSON via [`automaton::persist`].

pub mod automaton;
pub mod grammar;
pub mod regex;
pub mod table;

pub use automaton::{Automaton, AutomatonError};
pub use grammar::{Grammar, GrammarError};
pub use regex::{Regex, RegexError};
