//! JSON persistence, in the same two-phase "parse shape, then validate
//! into the domain type" shape as the teacher's `ParsedDfa -> Dfa` /
//! `ParsedNfa -> Nfa`. Field names follow
//! `examples/original_source/automata/nfa.py`'s `save`/`load`.

use super::Automaton;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::rc::Rc;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PersistError {
    #[error("invalid JSON: {0}")]
    Json(String),
    #[error("initial state '{0}' is not a known state")]
    UnknownInitialState(String),
    #[error("transition references unknown state '{0}'")]
    UnknownTransitionState(String),
    #[error("transition references unknown symbol '{0}'")]
    UnknownTransitionSymbol(String),
    #[error("final state '{0}' is not a known state")]
    UnknownFinalState(String),
}

#[derive(Serialize, Deserialize)]
struct AutomatonDto {
    states: Vec<String>,
    alphabet: Vec<String>,
    transitions: Vec<TransitionDto>,
    initial_state: String,
    final_states: Vec<String>,
}

/// A transition as the 3-tuple `(from_state, symbol, sorted_targets)`,
/// matching `examples/original_source/automata/nfa.py`'s
/// `[(k[0], k[1], sorted(v)), ...]` save shape exactly.
#[derive(Serialize, Deserialize)]
struct TransitionDto(String, String, Vec<String>);

impl Automaton {
    fn to_dto(&self) -> AutomatonDto {
        let mut transitions: Vec<TransitionDto> = self
            .transitions
            .iter()
            .map(|((from, symbol), targets)| {
                TransitionDto(
                    from.to_string(),
                    symbol.to_string(),
                    targets.iter().map(|t| t.to_string()).collect(),
                )
            })
            .collect();
        transitions.sort_by(|a, b| (&a.0, &a.1).cmp(&(&b.0, &b.1)));

        AutomatonDto {
            states: self.states().into_iter().map(str::to_string).collect(),
            alphabet: self.alphabet().into_iter().map(str::to_string).collect(),
            transitions,
            initial_state: self.initial_state().unwrap_or_default().to_string(),
            final_states: self.final_states().into_iter().map(str::to_string).collect(),
        }
    }

    /// Serializes to the JSON automaton format (§6): `states`, `alphabet`,
    /// `transitions`, `initial_state`, `final_states`.
    pub fn save(&self) -> String {
        serde_json::to_string_pretty(&self.to_dto())
            .expect("an Automaton built through the public API always serializes")
    }

    /// Parses and validates the JSON automaton format. Every transition
    /// endpoint and symbol, and the initial state itself, must name a
    /// declared state/symbol.
    pub fn load(json: &str) -> Result<Automaton, PersistError> {
        let dto: AutomatonDto =
            serde_json::from_str(json).map_err(|e| PersistError::Json(e.to_string()))?;

        let mut automaton = Automaton::new();
        // Ensure the declared initial state really is added first.
        if !dto.states.iter().any(|s| s == &dto.initial_state) {
            return Err(PersistError::UnknownInitialState(dto.initial_state));
        }
        automaton.add_state(dto.initial_state.clone());
        for state in &dto.states {
            automaton.add_state(state.clone());
        }
        for symbol in &dto.alphabet {
            automaton.add_symbol(symbol.clone());
        }
        for final_state in &dto.final_states {
            if !automaton.contains_state(final_state) {
                return Err(PersistError::UnknownFinalState(final_state.clone()));
            }
            automaton.set_accepting(final_state, true);
        }
        for t in &dto.transitions {
            let (from, symbol, to) = (&t.0, &t.1, &t.2);
            if !automaton.contains_state(from) {
                return Err(PersistError::UnknownTransitionState(from.clone()));
            }
            if !dto.alphabet.iter().any(|s| s == symbol) {
                return Err(PersistError::UnknownTransitionSymbol(symbol.clone()));
            }
            let mut targets: BTreeSet<Rc<str>> = BTreeSet::new();
            for target in to {
                if !automaton.contains_state(target) {
                    return Err(PersistError::UnknownTransitionState(target.clone()));
                }
                targets.insert(Rc::from(target.as_str()));
            }
            automaton
                .transitions
                .insert((Rc::from(from.as_str()), Rc::from(symbol.as_str())), targets);
        }
        Ok(automaton)
    }
}
