//! Right-linear (regular) grammars and their bidirectional conversion
//! to/from [`Automaton`]. The teacher has no grammar module; this one is
//! grounded directly on `examples/original_source/tools/grammar.py`
//! (`RegularGrammar.from_nfa`) and `tools/nfa.py`
//! (`from_regular_grammar`), kept in the teacher's idiom (`Rc<str>`
//! interning, `thiserror` errors, ordered views).

pub mod parse;

use crate::automaton::{Automaton, EPSILON};
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::rc::Rc;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GrammarError {
    #[error("grammar text does not match `N -> a1 | a2 | ...`: {0}")]
    InvalidGrammar(String),
}

/// A right-linear grammar: productions are either `N -> tM` (terminal
/// followed by a non-terminal), `N -> t` (a single terminal), or `N -> &`
/// (epsilon, only meaningful on the initial symbol).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Grammar {
    initial_symbol: Rc<str>,
    productions: HashMap<Rc<str>, BTreeSet<Rc<str>>>,
}

impl Grammar {
    pub fn new(initial_symbol: impl Into<Rc<str>>) -> Self {
        Self {
            initial_symbol: initial_symbol.into(),
            productions: HashMap::new(),
        }
    }

    pub fn add_production(&mut self, non_terminal: impl Into<Rc<str>>, rhs: impl Into<Rc<str>>) {
        self.productions
            .entry(non_terminal.into())
            .or_default()
            .insert(rhs.into());
    }

    pub fn initial_symbol(&self) -> &str {
        &self.initial_symbol
    }

    pub fn non_terminals(&self) -> Vec<&str> {
        let mut out: Vec<&str> = self.productions.keys().map(|s| s.as_ref()).collect();
        out.sort_unstable();
        out
    }

    pub fn productions_of(&self, non_terminal: &str) -> Vec<&str> {
        let mut out: Vec<&str> = self
            .productions
            .get(non_terminal)
            .into_iter()
            .flatten()
            .map(|s| s.as_ref())
            .collect();
        out.sort_unstable();
        out
    }

    /// Converts this grammar to an automaton: one state per non-terminal
    /// plus a shared accepting "done" state `X` that every `N -> t`
    /// production (without a following non-terminal) transitions into.
    pub fn to_automaton(&self) -> Automaton {
        let mut a = Automaton::new();
        a.add_state(self.initial_symbol.clone());
        for nt in self.productions.keys() {
            a.add_state(nt.clone());
        }
        let sink: Rc<str> = a.fresh_name("X");
        a.add_state(sink.clone());
        a.set_accepting(&sink, true);

        for (nt, rhss) in &self.productions {
            for rhs in rhss {
                if rhs.as_ref() == EPSILON {
                    if nt.as_ref() == self.initial_symbol.as_ref() {
                        a.set_accepting(nt, true);
                    }
                    continue;
                }
                let mut chars = rhs.chars();
                let terminal = chars
                    .next()
                    .expect("productions are validated non-empty by the parser");
                let rest: String = chars.collect();
                let terminal = terminal.to_string();
                if rest.is_empty() {
                    a.union_transition_target(nt, Rc::from(terminal.as_str()), sink.clone());
                } else {
                    a.union_transition_target(nt, Rc::from(terminal.as_str()), Rc::from(rest.as_str()));
                }
            }
        }
        a
    }

    /// Converts an automaton to a grammar, following
    /// `examples/original_source/tools/grammar.py`'s `from_nfa` exactly,
    /// including the `S'` special case when the initial state itself is
    /// accepting (epsilon is folded into a fresh initial symbol, since a
    /// right-linear production can't otherwise derive the empty word from
    /// a symbol that also has real productions without overloading it).
    pub fn from_automaton(a: &Automaton) -> Grammar {
        let mut productions: HashMap<Rc<str>, BTreeSet<Rc<str>>> = HashMap::new();
        for ((from, symbol), targets) in &a.transitions {
            for target in targets {
                let entry = productions.entry(from.clone()).or_default();
                entry.insert(Rc::from(format!("{symbol}{target}")));
                if a.accepting_of(target) {
                    entry.insert(symbol.clone());
                }
            }
        }

        let mut initial_symbol = a
            .initial_state()
            .map(Rc::from)
            .unwrap_or_else(|| Rc::from("S"));
        if a.initial_state().map_or(false, |s| a.accepting_of(s)) {
            let fresh: Rc<str> = Rc::from(format!("{initial_symbol}'"));
            let mut rhs = productions.get(&initial_symbol).cloned().unwrap_or_default();
            rhs.insert(Rc::from(EPSILON));
            productions.insert(fresh.clone(), rhs);
            initial_symbol = fresh;
        }
        Grammar {
            initial_symbol,
            productions,
        }
    }
}

impl fmt::Display for Grammar {
    /// Textual grammar form (§6): `N -> a1 | a2 | ...`, one line per
    /// non-terminal, initial symbol's line first.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut rest: Vec<&Rc<str>> = self
            .productions
            .keys()
            .filter(|nt| nt.as_ref() != self.initial_symbol.as_ref())
            .collect();
        rest.sort();
        let mut order = Vec::with_capacity(self.productions.len());
        if self.productions.contains_key(&self.initial_symbol) {
            order.push(self.initial_symbol.clone());
        }
        order.extend(rest.into_iter().cloned());

        for nt in order {
            let rhss = self.productions_of(&nt);
            writeln!(f, "{nt} -> {}", rhss.join(" | "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn div3_automaton() -> Automaton {
        let mut a = Automaton::new();
        a.add_state("S");
        a.add_state("A");
        a.add_state("B");
        a.toggle_accepting("S").unwrap();
        a.set_transition("S", "0", ["S"]).unwrap();
        a.set_transition("S", "1", ["A"]).unwrap();
        a.set_transition("A", "0", ["B"]).unwrap();
        a.set_transition("A", "1", ["S"]).unwrap();
        a.set_transition("B", "0", ["A"]).unwrap();
        a.set_transition("B", "1", ["B"]).unwrap();
        a
    }

    #[test]
    fn from_automaton_matches_the_worked_example() {
        let grammar = Grammar::from_automaton(&div3_automaton());
        assert_eq!(grammar.initial_symbol(), "S'");
        assert_eq!(grammar.productions_of("S'"), vec!["&", "0", "0S", "1A"]);
        assert_eq!(grammar.productions_of("S"), vec!["0", "0S", "1A"]);
        assert_eq!(grammar.productions_of("A"), vec!["0B", "1", "1S"]);
        assert_eq!(grammar.productions_of("B"), vec!["0A", "1B"]);
    }

    #[test]
    fn round_trip_preserves_language() {
        let original = div3_automaton();
        let grammar = Grammar::from_automaton(&original);
        let rebuilt = grammar.to_automaton();
        assert!(rebuilt.is_equivalent_to(&original));
    }

    #[test]
    fn epsilon_only_grammar_accepts_empty_word() {
        let mut g = Grammar::new("S");
        g.add_production("S", EPSILON);
        let a = g.to_automaton();
        assert!(a.accept(&[]));
    }
}
