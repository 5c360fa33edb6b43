//! Determinize, prune, merge, minimize, and the boolean algebra
//! (union/intersection/complement/containment/equivalence) over
//! [`Automaton`]. Grounded in `dandy`'s `Dfa::product_construction`,
//! `merge_nondistinguishable_states`, `state_equivalence_classes_idx`,
//! and `Nfa::to_dfa`; composite naming and the merge-candidate algorithm
//! follow `examples/original_source/tools/nfa.py` exactly.

use super::{Automaton, AutomatonError};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::rc::Rc;

impl Automaton {
    /// Subset construction. Always returns a fresh, purely deterministic
    /// automaton (the "discard the non-deterministic residue" option from
    /// the spec) with composite states named by concatenating their
    /// constituent identifiers in sorted order.
    pub fn determinize(&self) -> Automaton {
        let mut result = Automaton::new();
        let Some(initial) = self.initial_state.clone() else {
            return result;
        };

        let composite_name = |set: &BTreeSet<Rc<str>>| -> Rc<str> {
            let mut names: Vec<&str> = set.iter().map(|s| s.as_ref()).collect();
            names.sort_unstable();
            Rc::from(names.concat())
        };

        let initial_set: BTreeSet<Rc<str>> = BTreeSet::from([initial]);
        let initial_name = composite_name(&initial_set);
        let mut seen: HashMap<BTreeSet<Rc<str>>, Rc<str>> = HashMap::new();
        seen.insert(initial_set.clone(), initial_name.clone());
        result.add_state(initial_name.clone());
        result.set_accepting(
            &initial_name,
            initial_set.iter().any(|s| self.accepting_of(s)),
        );

        let mut worklist = vec![initial_set];
        while let Some(current) = worklist.pop() {
            let current_name = seen[&current].clone();
            for symbol in &self.alphabet {
                let mut union_set: BTreeSet<Rc<str>> = BTreeSet::new();
                for q in &current {
                    if let Some(targets) = self.transitions.get(&(q.clone(), symbol.clone())) {
                        union_set.extend(targets.iter().cloned());
                    }
                }
                if union_set.is_empty() {
                    continue;
                }
                let name = match seen.get(&union_set) {
                    Some(n) => n.clone(),
                    None => {
                        let n = composite_name(&union_set);
                        seen.insert(union_set.clone(), n.clone());
                        result.add_state(n.clone());
                        result.set_accepting(&n, union_set.iter().any(|s| self.accepting_of(s)));
                        worklist.push(union_set);
                        n
                    }
                };
                result
                    .set_transition(&current_name, symbol, [name])
                    .expect("states were just added above");
            }
        }
        result
    }

    fn retain_states(&mut self, keep: &HashSet<Rc<str>>) {
        self.states.retain(|name, _| keep.contains(name));
        self.transitions.retain(|(from, _), targets| {
            if !keep.contains(from) {
                return false;
            }
            targets.retain(|t| keep.contains(t));
            !targets.is_empty()
        });
    }

    fn forward_reachable(&self) -> HashSet<Rc<str>> {
        let Some(initial) = self.initial_state.clone() else {
            return HashSet::new();
        };
        let mut reachable = HashSet::from([initial.clone()]);
        let mut frontier = vec![initial];
        while let Some(q) = frontier.pop() {
            for symbol in &self.alphabet {
                if let Some(targets) = self.transitions.get(&(q.clone(), symbol.clone())) {
                    for t in targets {
                        if reachable.insert(t.clone()) {
                            frontier.push(t.clone());
                        }
                    }
                }
            }
        }
        reachable
    }

    /// Deletes every state not forward-reachable from q0.
    pub fn remove_unreachable(&mut self) {
        let reachable = self.forward_reachable();
        self.retain_states(&reachable);
    }

    /// States that are accepting or can reach an accepting state, the
    /// recursive "alive" definition used by `remove_dead` and `is_finite`.
    fn alive_states(&self) -> HashSet<Rc<str>> {
        let mut alive: HashSet<Rc<str>> = self
            .states
            .iter()
            .filter(|(_, &acc)| acc)
            .map(|(n, _)| n.clone())
            .collect();
        loop {
            let mut changed = false;
            for name in self.states.keys() {
                if alive.contains(name) {
                    continue;
                }
                let reaches_alive = self.alphabet.iter().any(|symbol| {
                    self.transitions
                        .get(&(name.clone(), symbol.clone()))
                        .map_or(false, |targets| targets.iter().any(|t| alive.contains(t)))
                });
                if reaches_alive {
                    alive.insert(name.clone());
                    changed = true;
                }
            }
            if !changed {
                break;
            }
        }
        alive
    }

    /// Deletes every state that is neither accepting nor able to reach an
    /// accepting state. The initial state is never removed, even if dead.
    pub fn remove_dead(&mut self) {
        let mut alive = self.alive_states();
        if let Some(initial) = &self.initial_state {
            alive.insert(initial.clone());
        }
        self.retain_states(&alive);
    }

    fn canonical_pair(a: &Rc<str>, b: &Rc<str>) -> (Rc<str>, Rc<str>) {
        if a <= b {
            (a.clone(), b.clone())
        } else {
            (b.clone(), a.clone())
        }
    }

    /// Hopcroft-style partition refinement over a *deterministic*
    /// automaton: repeatedly narrows a candidate set of undistinguishable
    /// pairs, treating a missing transition as a shared "nowhere" value
    /// (two states both missing `a` stay candidates for `a`; one missing
    /// and one present are distinguished).
    pub fn merge_equivalent(&mut self) -> Result<(), AutomatonError> {
        if !self.is_deterministic() {
            return Err(AutomatonError::NonDeterministic);
        }
        let states: Vec<Rc<str>> = self.states.keys().cloned().collect();
        let target = |p: &Rc<str>, a: &Rc<str>| -> Option<Rc<str>> {
            self.transitions
                .get(&(p.clone(), a.clone()))
                .and_then(|t| t.iter().next().cloned())
        };

        let (finals, nonfinals): (Vec<Rc<str>>, Vec<Rc<str>>) =
            states.iter().cloned().partition(|s| self.accepting_of(s));
        let mut candidates: HashSet<(Rc<str>, Rc<str>)> = HashSet::new();
        for group in [&finals, &nonfinals] {
            for i in 0..group.len() {
                for j in (i + 1)..group.len() {
                    candidates.insert(Self::canonical_pair(&group[i], &group[j]));
                }
            }
        }

        loop {
            let snapshot = candidates.clone();
            candidates.retain(|(p, q)| {
                self.alphabet.iter().all(|a| match (target(p, a), target(q, a)) {
                    (None, None) => true,
                    (Some(x), Some(y)) => x == y || snapshot.contains(&Self::canonical_pair(&x, &y)),
                    _ => false,
                })
            });
            if candidates == snapshot {
                break;
            }
        }

        let mut parent: HashMap<Rc<str>, Rc<str>> =
            states.iter().map(|s| (s.clone(), s.clone())).collect();
        let find_root = |parent: &HashMap<Rc<str>, Rc<str>>, x: &Rc<str>| -> Rc<str> {
            let mut cur = x.clone();
            while let Some(p) = parent.get(&cur) {
                if *p == cur {
                    break;
                }
                cur = p.clone();
            }
            cur
        };
        for (p, q) in &candidates {
            let rp = find_root(&parent, p);
            let rq = find_root(&parent, q);
            if rp == rq {
                continue;
            }
            let is_initial = |r: &Rc<str>| self.initial_state.as_ref() == Some(r);
            let keep = if is_initial(&rp) {
                rp.clone()
            } else if is_initial(&rq) {
                rq.clone()
            } else if rp <= rq {
                rp.clone()
            } else {
                rq.clone()
            };
            let drop = if keep == rp { rq } else { rp };
            parent.insert(drop, keep);
        }
        let mapping: HashMap<Rc<str>, Rc<str>> = states
            .iter()
            .map(|s| (s.clone(), find_root(&parent, s)))
            .collect();

        let mut new_states: HashMap<Rc<str>, bool> = HashMap::new();
        for s in &states {
            new_states.insert(mapping[s].clone(), self.accepting_of(s));
        }
        let mut new_transitions: HashMap<(Rc<str>, Rc<str>), BTreeSet<Rc<str>>> = HashMap::new();
        for ((from, sym), targets) in &self.transitions {
            let new_targets: BTreeSet<Rc<str>> = targets.iter().map(|t| mapping[t].clone()).collect();
            new_transitions
                .entry((mapping[from].clone(), sym.clone()))
                .or_default()
                .extend(new_targets);
        }
        self.states = new_states;
        self.transitions = new_transitions;
        self.initial_state = self.initial_state.as_ref().map(|s| mapping[s].clone());
        Ok(())
    }

    /// Requires the automaton to already be deterministic; composes
    /// remove-unreachable, remove-dead and merge-equivalent in that order.
    pub fn minimize(&mut self) -> Result<(), AutomatonError> {
        if !self.is_deterministic() {
            return Err(AutomatonError::NonDeterministic);
        }
        self.remove_unreachable();
        self.remove_dead();
        self.merge_equivalent()
    }

    /// Empty iff, after determinizing and minimizing a clone, no
    /// accepting state survives. Short-circuits on the cheaper
    /// `has_reachable_accepting_state` check first: reachability alone
    /// already answers emptiness without paying for determinize+minimize.
    pub fn is_empty(&self) -> bool {
        if !self.has_reachable_accepting_state() {
            return true;
        }
        let mut clone = self.determinize();
        clone.minimize().expect("determinize always yields a deterministic automaton");
        clone.final_states().is_empty()
    }

    /// A cheaper emptiness-adjacent query: is there *any* accepting state
    /// reachable from q0, without fully determinizing/minimizing first?
    pub fn has_reachable_accepting_state(&self) -> bool {
        self.forward_reachable().iter().any(|s| self.accepting_of(s))
    }

    /// Finite iff no cycle lies on a path from q0 to an accepting state.
    /// A cycle confined to states that can never reach acceptance (a dead
    /// loop) doesn't make the language infinite, so the search is
    /// restricted to states that are both reachable from q0 and alive.
    pub fn is_finite(&self) -> bool {
        if self.initial_state.is_none() {
            return true;
        }
        let reachable = self.forward_reachable();
        let alive = self.alive_states();
        let live: HashSet<Rc<str>> = reachable.intersection(&alive).cloned().collect();
        let mut adjacency: HashMap<Rc<str>, Vec<Rc<str>>> = HashMap::new();
        for q in &live {
            let mut outs = Vec::new();
            for symbol in &self.alphabet {
                if let Some(targets) = self.transitions.get(&(q.clone(), symbol.clone())) {
                    outs.extend(targets.iter().filter(|t| live.contains(*t)).cloned());
                }
            }
            adjacency.insert(q.clone(), outs);
        }

        #[derive(Clone, Copy, PartialEq, Eq)]
        enum Color {
            White,
            Gray,
            Black,
        }
        let mut color: HashMap<Rc<str>, Color> =
            live.iter().map(|s| (s.clone(), Color::White)).collect();

        fn has_cycle(
            node: &Rc<str>,
            adjacency: &HashMap<Rc<str>, Vec<Rc<str>>>,
            color: &mut HashMap<Rc<str>, Color>,
        ) -> bool {
            color.insert(node.clone(), Color::Gray);
            if let Some(next) = adjacency.get(node) {
                for n in next {
                    match color.get(n) {
                        Some(Color::Gray) => return true,
                        Some(Color::Black) => {}
                        _ => {
                            if has_cycle(n, adjacency, color) {
                                return true;
                            }
                        }
                    }
                }
            }
            color.insert(node.clone(), Color::Black);
            false
        }

        for s in &live {
            if color[s] == Color::White && has_cycle(s, &adjacency, &mut color) {
                return false;
            }
        }
        true
    }

    /// Renames every state of a clone by prefixing it, used to make two
    /// automata's state spaces disjoint before combining them.
    fn relabel_prefixed(&self, prefix: &str) -> Automaton {
        let mut out = Automaton::new();
        out.alphabet = self.alphabet.clone();
        for (name, &accepting) in &self.states {
            let renamed: Rc<str> = Rc::from(format!("{prefix}{name}"));
            out.states.insert(renamed, accepting);
        }
        out.initial_state = self
            .initial_state
            .as_ref()
            .map(|s| Rc::from(format!("{prefix}{s}")) as Rc<str>);
        for ((from, sym), targets) in &self.transitions {
            let new_from: Rc<str> = Rc::from(format!("{prefix}{from}"));
            let new_targets: BTreeSet<Rc<str>> = targets
                .iter()
                .map(|t| Rc::from(format!("{prefix}{t}")) as Rc<str>)
                .collect();
            out.transitions.insert((new_from, sym.clone()), new_targets);
        }
        out
    }

    /// Disjoint union with a fresh initial state carrying epsilon-like
    /// reachability to both original initial states (folded directly into
    /// its transitions, since this type has no epsilon edges).
    pub fn union(&self, other: &Automaton) -> Automaton {
        let a = self.relabel_prefixed("A#");
        let b = other.relabel_prefixed("B#");
        let mut result = Automaton::new();
        result.alphabet = a.alphabet.union(&b.alphabet).cloned().collect();
        for (name, &acc) in a.states.iter().chain(b.states.iter()) {
            result.states.insert(name.clone(), acc);
        }
        for (k, v) in a.transitions.iter().chain(b.transitions.iter()) {
            result.transitions.insert(k.clone(), v.clone());
        }
        let (Some(a0), Some(b0)) = (a.initial_state.clone(), b.initial_state.clone()) else {
            return if a.initial_state.is_some() { a } else { b };
        };
        let s0 = result.fresh_name("s0");
        let accepting = a.accepting_of(&a0) || b.accepting_of(&b0);
        result.states.insert(s0.clone(), accepting);
        for symbol in result.alphabet.clone() {
            let mut targets = BTreeSet::new();
            if let Some(t) = a.transitions.get(&(a0.clone(), symbol.clone())) {
                targets.extend(t.iter().cloned());
            }
            if let Some(t) = b.transitions.get(&(b0.clone(), symbol.clone())) {
                targets.extend(t.iter().cloned());
            }
            if !targets.is_empty() {
                result.transitions.insert((s0.clone(), symbol), targets);
            }
        }
        result.initial_state = Some(s0);
        result
    }

    /// Determinizes both operands, then a product construction over
    /// reachable state pairs; a pair's transition is only defined when
    /// both sides define it.
    pub fn intersection(&self, other: &Automaton) -> Automaton {
        let a = self.determinize();
        let b = other.determinize();
        let mut result = Automaton::new();
        result.alphabet = a.alphabet.intersection(&b.alphabet).cloned().collect();

        let (Some(a0), Some(b0)) = (a.initial_state.clone(), b.initial_state.clone()) else {
            return result;
        };
        let pair_name = |p: &str, q: &str| -> Rc<str> { Rc::from(format!("({p},{q})")) };
        let initial_name = pair_name(&a0, &b0);
        result.add_state(initial_name.clone());
        result.set_accepting(&initial_name, a.accepting_of(&a0) && b.accepting_of(&b0));

        let mut seen: HashMap<(Rc<str>, Rc<str>), Rc<str>> = HashMap::new();
        seen.insert((a0.clone(), b0.clone()), initial_name.clone());
        let mut worklist = vec![(a0, b0)];
        while let Some((pa, pb)) = worklist.pop() {
            let from_name = seen[&(pa.clone(), pb.clone())].clone();
            for symbol in result.alphabet.clone() {
                let (Some(ta), Some(tb)) = (
                    a.transitions
                        .get(&(pa.clone(), symbol.clone()))
                        .and_then(|t| t.iter().next().cloned()),
                    b.transitions
                        .get(&(pb.clone(), symbol.clone()))
                        .and_then(|t| t.iter().next().cloned()),
                ) else {
                    continue;
                };
                let name = match seen.get(&(ta.clone(), tb.clone())) {
                    Some(n) => n.clone(),
                    None => {
                        let n = pair_name(&ta, &tb);
                        seen.insert((ta.clone(), tb.clone()), n.clone());
                        result.add_state(n.clone());
                        result.set_accepting(&n, a.accepting_of(&ta) && b.accepting_of(&tb));
                        worklist.push((ta, tb));
                        n
                    }
                };
                result
                    .set_transition(&from_name, &symbol, [name])
                    .expect("states were just added above");
            }
        }
        result.initial_state = Some(initial_name);
        result
    }

    /// Determinizes, totalizes with a dead sink absorbing every missing
    /// transition, then flips the accepting set.
    pub fn complement(&self) -> Automaton {
        let mut det = self.determinize();
        if det.states.is_empty() {
            // Q = ∅ has no initial state, so its language is ∅ and its
            // complement is Σ*: one accepting state, self-looping on every
            // symbol, rather than a state with no outgoing transitions
            // (which would accept only ε).
            det.add_state("q0");
            det.toggle_accepting("q0").unwrap();
            det.alphabet = self.alphabet.clone();
            for symbol in det.alphabet.clone() {
                det.transitions
                    .insert((Rc::from("q0"), symbol), BTreeSet::from([Rc::from("q0")]));
            }
            return det;
        }
        let sink = det.fresh_name("dead");
        let names: Vec<Rc<str>> = det.states.keys().cloned().collect();
        let missing_somewhere = names.iter().any(|name| {
            det.alphabet
                .iter()
                .any(|symbol| !det.transitions.contains_key(&(name.clone(), symbol.clone())))
        });
        if missing_somewhere {
            det.states.insert(sink.clone(), false);
            for symbol in det.alphabet.clone() {
                det.transitions
                    .entry((sink.clone(), symbol))
                    .or_insert_with(|| BTreeSet::from([sink.clone()]));
            }
            for name in &names {
                for symbol in det.alphabet.clone() {
                    det.transitions
                        .entry((name.clone(), symbol))
                        .or_insert_with(|| BTreeSet::from([sink.clone()]));
                }
            }
        }
        for accepting in det.states.values_mut() {
            *accepting = !*accepting;
        }
        det
    }

    /// `A \ B`, built as `A ∩ complement(B)`. Kept as its own entry point
    /// for callers who want the resulting automaton, rather than just the
    /// `is_subset_of` boolean below which uses the same construction.
    pub fn difference(&self, other: &Automaton) -> Automaton {
        self.intersection(&other.complement())
    }

    /// `A ⊆ B` iff `A ∩ complement(B)` is empty, the literal §4.2
    /// definition (see `is_equivalent_to` for the cheaper walk used for
    /// language equivalence).
    pub fn is_subset_of(&self, other: &Automaton) -> bool {
        self.difference(other).is_empty()
    }

    /// Language equivalence via an on-the-fly explored-pair walk over the
    /// determinized operands, rather than building the symmetric
    /// difference and testing emptiness.
    pub fn is_equivalent_to(&self, other: &Automaton) -> bool {
        let a = self.determinize();
        let b = other.determinize();
        let alphabet: BTreeSet<Rc<str>> = a.alphabet.union(&b.alphabet).cloned().collect();

        type Frontier = (Option<Rc<str>>, Option<Rc<str>>);
        let start: Frontier = (a.initial_state.clone(), b.initial_state.clone());
        let mut seen: HashSet<Frontier> = HashSet::from([start.clone()]);
        let mut stack = vec![start];
        while let Some((sa, sb)) = stack.pop() {
            let acc_a = sa.as_ref().map_or(false, |s| a.accepting_of(s));
            let acc_b = sb.as_ref().map_or(false, |s| b.accepting_of(s));
            if acc_a != acc_b {
                return false;
            }
            for symbol in &alphabet {
                let next_a = sa
                    .as_ref()
                    .and_then(|s| a.transitions.get(&(s.clone(), symbol.clone())))
                    .and_then(|t| t.iter().next().cloned());
                let next_b = sb
                    .as_ref()
                    .and_then(|s| b.transitions.get(&(s.clone(), symbol.clone())))
                    .and_then(|t| t.iter().next().cloned());
                let pair = (next_a, next_b);
                if seen.insert(pair.clone()) {
                    stack.push(pair);
                }
            }
        }
        true
    }

    fn apply_renaming(&mut self, mapping: &HashMap<Rc<str>, Rc<str>>) {
        let new_states: HashMap<Rc<str>, bool> = self
            .states
            .iter()
            .map(|(k, &v)| (mapping[k].clone(), v))
            .collect();
        let new_transitions: HashMap<(Rc<str>, Rc<str>), BTreeSet<Rc<str>>> = self
            .transitions
            .iter()
            .map(|((from, sym), targets)| {
                (
                    (mapping[from].clone(), sym.clone()),
                    targets.iter().map(|t| mapping[t].clone()).collect(),
                )
            })
            .collect();
        let new_initial = self.initial_state.as_ref().map(|s| mapping[s].clone());
        self.states = new_states;
        self.transitions = new_transitions;
        self.initial_state = new_initial;
    }

    /// Renames states to `q0, q1, ...` in `states()` order (initial first).
    pub fn relabel_numeric(&mut self) {
        let ordered = self.ordered_state_names();
        let mapping: HashMap<Rc<str>, Rc<str>> = ordered
            .iter()
            .enumerate()
            .map(|(i, s)| (s.clone(), Rc::from(format!("q{i}")) as Rc<str>))
            .collect();
        self.apply_renaming(&mapping);
    }

    /// Renames states to `S` (initial) plus `A, B, C, ...` (skipping `S`)
    /// in `states()` order. Fails if there are more than 26 states.
    pub fn relabel_alphabetic(&mut self) -> Result<(), AutomatonError> {
        let ordered = self.ordered_state_names();
        if ordered.len() > 26 {
            return Err(AutomatonError::TooManyStates(ordered.len()));
        }
        let mut letters = ('A'..='Z').filter(|&c| c != 'S');
        let mut mapping = HashMap::new();
        for (i, name) in ordered.iter().enumerate() {
            let label: Rc<str> = if i == 0 {
                Rc::from("S")
            } else {
                Rc::from(letters.next().expect("checked length above").to_string())
            };
            mapping.insert(name.clone(), label);
        }
        self.apply_renaming(&mapping);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ends_with_bb() -> Automaton {
        // NFA over {a, b}: accepts strings ending in "bb".
        let mut a = Automaton::new();
        a.add_state("S");
        a.add_state("A");
        a.add_state("B");
        a.toggle_accepting("B").unwrap();
        a.set_transition("S", "a", ["S"]).unwrap();
        a.set_transition("S", "b", ["S", "A"]).unwrap();
        a.set_transition("A", "b", ["B"]).unwrap();
        a
    }

    #[test]
    fn determinize_preserves_language_and_is_deterministic() {
        let nfa = ends_with_bb();
        let dfa = nfa.determinize();
        assert!(dfa.is_deterministic());
        for (word, expected) in [
            (vec!["b", "b"], true),
            (vec!["a", "b", "a", "a", "b", "b"], true),
            (vec!["a"], false),
            (vec!["b", "a"], false),
        ] {
            assert_eq!(dfa.accept(&word), expected, "word {word:?}");
            assert_eq!(nfa.accept(&word), expected, "word {word:?}");
        }
    }

    #[test]
    fn bdiv3_minimizes_to_three_states() {
        let mut a = Automaton::new();
        for s in ["S0", "S1", "S2", "S3", "S4", "S5"] {
            a.add_state(s);
        }
        a.toggle_accepting("S0").unwrap();
        a.toggle_accepting("S3").unwrap();
        // Two copies of mod-3 glued so merge-equivalent has real work to do.
        a.set_transition("S0", "0", ["S0"]).unwrap();
        a.set_transition("S0", "1", ["S1"]).unwrap();
        a.set_transition("S1", "0", ["S2"]).unwrap();
        a.set_transition("S1", "1", ["S0"]).unwrap();
        a.set_transition("S2", "0", ["S1"]).unwrap();
        a.set_transition("S2", "1", ["S2"]).unwrap();
        a.set_transition("S3", "0", ["S3"]).unwrap();
        a.set_transition("S3", "1", ["S4"]).unwrap();
        a.set_transition("S4", "0", ["S5"]).unwrap();
        a.set_transition("S4", "1", ["S3"]).unwrap();
        a.set_transition("S5", "0", ["S4"]).unwrap();
        a.set_transition("S5", "1", ["S5"]).unwrap();
        // S3 unreachable from S0; minimize should drop it then merge down to 3.
        a.minimize().unwrap();
        assert_eq!(a.states().len(), 3);
    }

    #[test]
    fn union_intersection_complement_agree_with_accept() {
        let mut aa = Automaton::new();
        aa.add_state("q0");
        aa.add_state("q1");
        aa.add_state("q2");
        aa.toggle_accepting("q2").unwrap();
        aa.set_transition("q0", "a", ["q1"]).unwrap();
        aa.set_transition("q1", "a", ["q2"]).unwrap();

        let mut bb = Automaton::new();
        bb.add_state("r0");
        bb.add_state("r1");
        bb.add_state("r2");
        bb.toggle_accepting("r2").unwrap();
        bb.set_transition("r0", "b", ["r1"]).unwrap();
        bb.set_transition("r1", "b", ["r2"]).unwrap();

        let union = aa.union(&bb);
        assert!(union.accept(&["a", "a"]));
        assert!(union.accept(&["b", "b"]));
        assert!(!union.accept(&["a"]));

        let intersection = aa.intersection(&bb);
        assert!(intersection.is_empty());

        let not_aa = aa.complement();
        assert!(!not_aa.accept(&["a", "a"]));
        assert!(not_aa.accept(&["a"]));
        assert!(not_aa.accept(&[]));
    }

    #[test]
    fn equivalence_and_containment() {
        let a = ends_with_bb().determinize();
        let b = ends_with_bb(); // same language, different shape
        assert!(a.is_equivalent_to(&b));
        assert!(a.is_subset_of(&b));
        assert!(b.is_subset_of(&a));

        let mut only_a = Automaton::new();
        only_a.add_state("q0");
        only_a.toggle_accepting("q0").unwrap();
        only_a.set_transition("q0", "a", ["q0"]).unwrap();
        assert!(!a.is_equivalent_to(&only_a));
    }

    #[test]
    fn relabel_alphabetic_reserves_s_for_initial() {
        let mut a = Automaton::new();
        a.add_state("zzz");
        a.add_state("aaa");
        a.relabel_alphabetic().unwrap();
        assert_eq!(a.initial_state(), Some("S"));
        let mut names = a.states();
        names.sort();
        assert_eq!(names, vec!["A", "S"]);
    }

    #[test]
    fn relabel_alphabetic_rejects_too_many_states() {
        let mut a = Automaton::new();
        for i in 0..27 {
            a.add_state(format!("s{i}"));
        }
        assert_eq!(
            a.relabel_alphabetic().unwrap_err(),
            AutomatonError::TooManyStates(27)
        );
    }

    #[test]
    fn finiteness() {
        let mut finite = Automaton::new();
        finite.add_state("q0");
        finite.add_state("q1");
        finite.toggle_accepting("q1").unwrap();
        finite.set_transition("q0", "a", ["q1"]).unwrap();
        assert!(finite.is_finite());

        let mut infinite = Automaton::new();
        infinite.add_state("q0");
        infinite.toggle_accepting("q0").unwrap();
        infinite.set_transition("q0", "a", ["q0"]).unwrap();
        assert!(!infinite.is_finite());
    }

    /// A cycle that can never reach an accepting state doesn't make the
    /// language infinite (grounded in the original's `useless_loop.json`).
    #[test]
    fn a_dead_loop_does_not_make_the_language_infinite() {
        let mut a = Automaton::new();
        a.add_state("q0");
        a.add_state("dead");
        a.add_state("q1");
        a.toggle_accepting("q1").unwrap();
        a.set_transition("q0", "a", ["q1"]).unwrap();
        a.set_transition("q0", "b", ["dead"]).unwrap();
        a.set_transition("dead", "b", ["dead"]).unwrap();
        assert!(a.is_finite());
    }

    /// The complement of Q = ∅ (no initial state) is Σ*, not just {ε}.
    #[test]
    fn complement_of_a_stateless_automaton_accepts_every_word() {
        let mut empty = Automaton::new();
        empty.add_symbol("a");
        empty.add_symbol("b");
        assert!(empty.initial_state().is_none());

        let universal = empty.complement();
        assert!(universal.accept(&[]));
        assert!(universal.accept(&["a", "b", "a"]));
        assert!(universal.accept(&["b", "b", "b", "b"]));
    }
}
