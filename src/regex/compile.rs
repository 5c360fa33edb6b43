//! The De Simone/Aho construction: builds a DFA directly from the
//! threaded tree, without an intermediate NFA. Grounded in
//! `examples/original_source/tools/regex.py`'s `regex_to_dfa`.

use super::tree::{down, up, Kind, Memo, NodeId, Tree, END_ID};
use crate::automaton::Automaton;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::rc::Rc;

pub(crate) fn compile(tree: &Tree, root: Option<NodeId>) -> Automaton {
    let Some(root) = root else {
        let mut a = Automaton::new();
        a.add_state("q0");
        a.toggle_accepting("q0").unwrap();
        return a;
    };

    let mut memo = Memo::default();
    let empty_visited: HashSet<NodeId> = HashSet::new();
    let initial_composition = down(tree, root, &empty_visited, &mut memo);

    let mut automaton = Automaton::new();
    // Canonicalize compositions: the same set of reachable leaves, no
    // matter which state first produced it, gets one DFA state.
    let mut lookup: HashMap<BTreeSet<NodeId>, Rc<str>> = HashMap::new();
    let mut compositions: HashMap<Rc<str>, BTreeSet<NodeId>> = HashMap::new();

    let initial_name: Rc<str> = Rc::from("q0");
    automaton.add_state(initial_name.clone());
    automaton.set_accepting(&initial_name, initial_composition.contains(&END_ID));
    lookup.insert(initial_composition.clone(), initial_name.clone());
    compositions.insert(initial_name.clone(), initial_composition);

    let mut worklist = vec![initial_name];
    while let Some(state_name) = worklist.pop() {
        let composition = compositions[&state_name].clone();
        let mut by_symbol: HashMap<char, Vec<NodeId>> = HashMap::new();
        for &node_id in &composition {
            if let Kind::Terminal(c) = tree.get(node_id).kind {
                by_symbol.entry(c).or_default().push(node_id);
            }
        }

        for (symbol, nodes) in by_symbol {
            let mut next_composition: BTreeSet<NodeId> = BTreeSet::new();
            for node_id in nodes {
                let successor = tree.get(node_id).right.unwrap();
                next_composition.extend(up(tree, successor, &empty_visited, &mut memo));
            }
            let target_name = match lookup.get(&next_composition) {
                Some(name) => name.clone(),
                None => {
                    let name: Rc<str> = Rc::from(format!("q{}", compositions.len()));
                    automaton.add_state(name.clone());
                    automaton.set_accepting(&name, next_composition.contains(&END_ID));
                    lookup.insert(next_composition.clone(), name.clone());
                    compositions.insert(name.clone(), next_composition);
                    worklist.push(name.clone());
                    name
                }
            };
            let symbol = symbol.to_string();
            automaton
                .set_transition(&state_name, &symbol, [target_name])
                .expect("states were just added above");
        }
    }
    automaton
}
