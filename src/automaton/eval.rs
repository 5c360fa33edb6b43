//! Stepping through an automaton one symbol at a time, the way
//! `dandy`'s `DfaEvaluator`/`NfaEvaluator` do.

use super::{Automaton, AutomatonError};
use std::collections::BTreeSet;
use std::rc::Rc;

/// General evaluator: tracks a frontier of states, unioning
/// `δ(q, symbol)` over the whole frontier on each step. Works for both
/// deterministic and non-deterministic automata.
pub struct Evaluator<'a> {
    automaton: &'a Automaton,
    frontier: BTreeSet<Rc<str>>,
}

impl<'a> Evaluator<'a> {
    pub fn new(automaton: &'a Automaton) -> Self {
        let frontier = automaton.initial_state.clone().into_iter().collect();
        Self { automaton, frontier }
    }

    pub fn step(&mut self, symbol: &str) {
        let mut next = BTreeSet::new();
        for state in &self.frontier {
            if let Some(targets) = self.automaton.transition(state, symbol) {
                next.extend(targets.iter().cloned());
            }
        }
        self.frontier = next;
    }

    pub fn step_all(&mut self, word: &[&str]) {
        for symbol in word {
            self.step(symbol);
        }
    }

    pub fn is_accepting(&self) -> bool {
        self.frontier.iter().any(|s| self.automaton.accepting_of(s))
    }

    pub fn current_frontier(&self) -> impl Iterator<Item = &str> {
        self.frontier.iter().map(|s| s.as_ref())
    }
}

/// Fast-path evaluator for automata known (or hoped) to be deterministic.
/// Errors out the first time it would need to branch.
pub struct DeterministicEvaluator<'a> {
    automaton: &'a Automaton,
    current: Option<Rc<str>>,
}

impl<'a> DeterministicEvaluator<'a> {
    pub fn new(automaton: &'a Automaton) -> Self {
        Self {
            automaton,
            current: automaton.initial_state.clone(),
        }
    }

    pub fn step(&mut self, symbol: &str) -> Result<(), AutomatonError> {
        let Some(current) = &self.current else {
            return Ok(());
        };
        match self.automaton.transition(current, symbol) {
            None => self.current = None,
            Some(targets) if targets.len() == 1 => {
                self.current = targets.iter().next().cloned();
            }
            Some(_) => return Err(AutomatonError::NonDeterministic),
        }
        Ok(())
    }

    pub fn is_accepting(&self) -> bool {
        self.current
            .as_ref()
            .map_or(false, |s| self.automaton.accepting_of(s))
    }

    pub fn current_state(&self) -> Option<&str> {
        self.current.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::super::Automaton;

    #[test]
    fn deterministic_evaluator_tracks_a_single_state() {
        let mut a = Automaton::new();
        a.add_state("q0");
        a.add_state("q1");
        a.toggle_accepting("q1").unwrap();
        a.set_transition("q0", "a", ["q1"]).unwrap();
        let mut ev = a.deterministic_evaluator();
        ev.step("a").unwrap();
        assert!(ev.is_accepting());
        assert_eq!(ev.current_state(), Some("q1"));
    }

    #[test]
    fn deterministic_evaluator_errors_on_branching() {
        let mut a = Automaton::new();
        a.add_state("q0");
        a.add_state("q1");
        a.add_state("q2");
        a.set_transition("q0", "a", ["q1", "q2"]).unwrap();
        let mut ev = a.deterministic_evaluator();
        assert!(ev.step("a").is_err());
    }
}
