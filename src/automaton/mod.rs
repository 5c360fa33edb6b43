//! The core automaton type: one transition relation shared by
//! deterministic and non-deterministic automata alike.
//!
//! Unlike the teacher's `Dfa`/`Nfa` split, determinism here is a property
//! you can ask about (`is_deterministic`), not a type. Transformations
//! that require determinism (merge-equivalent, minimize) check it
//! explicitly and return [`AutomatonError::NonDeterministic`] rather than
//! being unreachable at the type level.

use std::collections::{BTreeSet, HashMap};
use std::rc::Rc;
use thiserror::Error;
use unicode_segmentation::UnicodeSegmentation;

pub mod eval;
pub mod persist;
mod render;
pub mod transform;

pub use eval::{DeterministicEvaluator, Evaluator};
pub use persist::PersistError;

/// The distinguished epsilon token. Never a member of an automaton's
/// alphabet; used by [`crate::grammar`] productions and the regex dialect.
pub const EPSILON: &str = "&";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AutomatonError {
    #[error("state '{0}' does not exist")]
    UnknownState(String),
    #[error("automaton has a non-deterministic transition")]
    NonDeterministic,
    #[error("relabeling requires at most 26 states, has {0}")]
    TooManyStates(usize),
}

/// A single transition relation `(Q, Σ, δ, q0, F)` over opaque string
/// identifiers. May be deterministic or not; see [`Automaton::is_deterministic`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Automaton {
    pub(crate) alphabet: BTreeSet<Rc<str>>,
    pub(crate) states: HashMap<Rc<str>, bool>,
    pub(crate) initial_state: Option<Rc<str>>,
    pub(crate) transitions: HashMap<(Rc<str>, Rc<str>), BTreeSet<Rc<str>>>,
}

impl Automaton {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a state. The first state ever added becomes the initial state.
    /// Adding a state that already exists is a no-op.
    pub fn add_state(&mut self, name: impl Into<Rc<str>>) {
        let name = name.into();
        let had_initial = self.initial_state.is_some();
        self.states.entry(name.clone()).or_insert(false);
        if !had_initial {
            self.initial_state = Some(name);
        }
    }

    /// Removes a state and every transition that mentions it. The initial
    /// state cannot be removed (silent no-op). Removing a non-existent
    /// state is a no-op.
    pub fn remove_state(&mut self, name: &str) {
        if self.initial_state.as_deref() == Some(name) {
            return;
        }
        self.states.remove(name);
        self.transitions.retain(|(from, _), targets| {
            if from.as_ref() == name {
                return false;
            }
            targets.retain(|t| t.as_ref() != name);
            !targets.is_empty()
        });
    }

    /// Adds a symbol to the alphabet. Adding [`EPSILON`] is a no-op: Σ
    /// never contains the epsilon token.
    pub fn add_symbol(&mut self, symbol: impl Into<Rc<str>>) {
        let symbol = symbol.into();
        if symbol.as_ref() != EPSILON {
            self.alphabet.insert(symbol);
        }
    }

    /// Removes a symbol from the alphabet and every transition on it.
    pub fn remove_symbol(&mut self, symbol: &str) {
        self.alphabet.remove(symbol);
        self.transitions.retain(|(_, sym), _| sym.as_ref() != symbol);
    }

    /// Flips whether `name` is an accepting state.
    pub fn toggle_accepting(&mut self, name: &str) -> Result<(), AutomatonError> {
        match self.states.get_mut(name) {
            Some(accepting) => {
                *accepting = !*accepting;
                Ok(())
            }
            None => Err(AutomatonError::UnknownState(name.to_string())),
        }
    }

    /// Sets δ(from, symbol) to exactly `targets`. Validates every state
    /// name before mutating; on error the automaton is left unchanged.
    /// An empty target set removes the `(from, symbol)` entry entirely.
    pub fn set_transition(
        &mut self,
        from: &str,
        symbol: &str,
        targets: impl IntoIterator<Item = impl Into<Rc<str>>>,
    ) -> Result<(), AutomatonError> {
        let targets: BTreeSet<Rc<str>> = targets.into_iter().map(Into::into).collect();
        if !self.states.contains_key(from) {
            return Err(AutomatonError::UnknownState(from.to_string()));
        }
        for t in &targets {
            if !self.states.contains_key(t.as_ref()) {
                return Err(AutomatonError::UnknownState(t.to_string()));
            }
        }
        let from: Rc<str> = self.states.get_key_value(from).unwrap().0.clone();
        let symbol: Rc<str> = Rc::from(symbol);
        if targets.is_empty() {
            self.transitions.remove(&(from, symbol));
        } else {
            self.alphabet.insert(symbol.clone());
            self.transitions.insert((from, symbol), targets);
        }
        Ok(())
    }

    /// Sets accepting status directly; used internally by builders
    /// (grammar/regex conversion, transformations) that already know the
    /// state exists.
    pub(crate) fn set_accepting(&mut self, name: &str, accepting: bool) {
        if let Some(slot) = self.states.get_mut(name) {
            *slot = accepting;
        }
    }

    pub(crate) fn accepting_of(&self, name: &str) -> bool {
        self.states.get(name).copied().unwrap_or(false)
    }

    pub fn is_accepting(&self, name: &str) -> bool {
        self.accepting_of(name)
    }

    pub fn contains_state(&self, name: &str) -> bool {
        self.states.contains_key(name)
    }

    pub fn initial_state(&self) -> Option<&str> {
        self.initial_state.as_deref()
    }

    pub fn transition(&self, from: &str, symbol: &str) -> Option<&BTreeSet<Rc<str>>> {
        self.transitions.get(&(Rc::from(from), Rc::from(symbol)))
    }

    /// The full transition relation `δ`, as `(from, symbol) -> targets`,
    /// ordered the same way as `states()`/`alphabet()`: rows by state order,
    /// each row's columns by alphabet order, targets sorted. The collaborator
    /// counterpart of the original's `NFA.transition_table`.
    pub fn transition_table(&self) -> Vec<((&str, &str), Vec<&str>)> {
        let alphabet = self.alphabet();
        let mut table = Vec::new();
        for from in self.states() {
            for symbol in &alphabet {
                if let Some(targets) = self.transition(from, symbol) {
                    let targets: Vec<&str> = targets.iter().map(|t| t.as_ref()).collect();
                    table.push(((from, *symbol), targets));
                }
            }
        }
        table
    }

    /// `Q`, ordered with the initial state first, then the rest
    /// lexicographically by identifier. Feeds relabeling and persisted
    /// output as well as test assertions on state counts/order.
    pub fn states(&self) -> Vec<&str> {
        self.ordered_state_names()
            .into_iter()
            .map(|name| self.states.get_key_value(name.as_ref()).unwrap().0.as_ref())
            .collect()
    }

    pub(crate) fn ordered_state_names(&self) -> Vec<Rc<str>> {
        let mut rest: Vec<Rc<str>> = self
            .states
            .keys()
            .filter(|s| self.initial_state.as_ref() != Some(*s))
            .cloned()
            .collect();
        rest.sort();
        let mut out = Vec::with_capacity(self.states.len());
        if let Some(initial) = &self.initial_state {
            out.push(initial.clone());
        }
        out.extend(rest);
        out
    }

    /// `Σ`, lexicographically ordered.
    pub fn alphabet(&self) -> Vec<&str> {
        self.alphabet.iter().map(|s| s.as_ref()).collect()
    }

    /// `F`, lexicographically ordered.
    pub fn final_states(&self) -> Vec<&str> {
        let mut out: Vec<&str> = self
            .states
            .iter()
            .filter(|(_, &acc)| acc)
            .map(|(name, _)| name.as_ref())
            .collect();
        out.sort_unstable();
        out
    }

    pub fn is_deterministic(&self) -> bool {
        self.transitions.values().all(|targets| targets.len() == 1)
    }

    /// General (possibly non-deterministic) membership test: steps a
    /// frontier of states through the whole word, accepting iff any state
    /// in the final frontier is accepting.
    pub fn accept(&self, word: &[&str]) -> bool {
        let mut evaluator = Evaluator::new(self);
        evaluator.step_all(word);
        evaluator.is_accepting()
    }

    /// Deterministic fast-path membership. Fails with
    /// [`AutomatonError::NonDeterministic`] the first time it would have
    /// to follow more than one target.
    pub fn accept_deterministic(&self, word: &[&str]) -> Result<bool, AutomatonError> {
        let mut evaluator = DeterministicEvaluator::new(self);
        for symbol in word {
            evaluator.step(symbol)?;
        }
        Ok(evaluator.is_accepting())
    }

    /// Convenience for plain `&str` input when the alphabet is
    /// single-grapheme: splits `string` into extended grapheme clusters
    /// and checks each as one symbol. See [`Automaton::graphemes_only`].
    pub fn accept_graphemes(&self, string: &str) -> bool {
        let graphemes: Vec<&str> = string.graphemes(true).collect();
        self.accept(&graphemes)
    }

    /// Whether every symbol in the alphabet is a single grapheme cluster,
    /// i.e. whether [`Automaton::accept_graphemes`] can see every symbol.
    pub fn graphemes_only(&self) -> bool {
        self.alphabet.iter().all(|s| s.graphemes(true).count() == 1)
    }

    pub fn evaluator(&self) -> Evaluator<'_> {
        Evaluator::new(self)
    }

    pub fn deterministic_evaluator(&self) -> DeterministicEvaluator<'_> {
        DeterministicEvaluator::new(self)
    }

    /// Unions `target` into δ(from, symbol), creating the entry if absent.
    /// Used by builders (grammar/regex conversion) that assemble a fresh
    /// automaton incrementally and already know `from`/`target` exist.
    pub(crate) fn union_transition_target(&mut self, from: &Rc<str>, symbol: Rc<str>, target: Rc<str>) {
        self.alphabet.insert(symbol.clone());
        self.transitions
            .entry((from.clone(), symbol))
            .or_default()
            .insert(target);
    }

    pub(crate) fn fresh_name(&self, wanted: &str) -> Rc<str> {
        if !self.states.contains_key(wanted) {
            return Rc::from(wanted);
        }
        (0u64..)
            .map(|i| Rc::<str>::from(format!("{wanted}{i}")))
            .find(|n| !self.states.contains_key(n.as_ref()))
            .expect("state namespace is unbounded")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bdiv3() -> Automaton {
        // Binary strings divisible by 3, deterministic, 3 states.
        let mut a = Automaton::new();
        a.add_state("S0");
        a.add_state("S1");
        a.add_state("S2");
        a.toggle_accepting("S0").unwrap();
        a.set_transition("S0", "0", ["S0"]).unwrap();
        a.set_transition("S0", "1", ["S1"]).unwrap();
        a.set_transition("S1", "0", ["S2"]).unwrap();
        a.set_transition("S1", "1", ["S0"]).unwrap();
        a.set_transition("S2", "0", ["S1"]).unwrap();
        a.set_transition("S2", "1", ["S2"]).unwrap();
        a
    }

    #[test]
    fn accepts_multiples_of_three() {
        let a = bdiv3();
        assert!(a.accept(&[]));
        assert!(a.accept(&["1", "1", "0"])); // 6
        assert!(a.accept(&["1", "0", "0", "1"])); // 9
        assert!(!a.accept(&["1"])); // 1
        assert!(!a.accept(&["1", "0"])); // 2
    }

    #[test]
    fn states_are_initial_first_then_sorted() {
        let a = bdiv3();
        assert_eq!(a.states(), vec!["S0", "S1", "S2"]);
    }

    #[test]
    fn transition_table_lists_the_whole_relation_in_order() {
        let a = bdiv3();
        let table = a.transition_table();
        assert_eq!(table.len(), 6);
        assert_eq!(table[0], (("S0", "0"), vec!["S0"]));
        assert_eq!(table[1], (("S0", "1"), vec!["S1"]));
    }

    #[test]
    fn remove_state_protects_initial() {
        let mut a = bdiv3();
        let initial = a.initial_state().unwrap().to_string();
        a.remove_state(&initial);
        assert!(a.contains_state(&initial));
        a.remove_state("S1");
        assert!(!a.contains_state("S1"));
        assert!(a.transition("S0", "1").is_none());
    }

    #[test]
    fn set_transition_rejects_unknown_state_without_mutating() {
        let mut a = bdiv3();
        let before = a.clone();
        let err = a.set_transition("S0", "0", ["nope"]).unwrap_err();
        assert_eq!(err, AutomatonError::UnknownState("nope".to_string()));
        assert_eq!(a, before);
    }

    #[test]
    fn epsilon_never_joins_the_alphabet() {
        let mut a = Automaton::new();
        a.add_state("S0");
        a.add_symbol(EPSILON);
        assert!(a.alphabet().is_empty());
    }

    #[test]
    fn accept_graphemes_matches_accept_on_single_char_alphabets() {
        let a = bdiv3();
        assert!(a.graphemes_only());
        assert!(a.accept_graphemes("110"));
        assert!(!a.accept_graphemes("1"));
    }
}
