//! The literal end-to-end scenarios and cross-module invariants, kept as
//! an integration test the way the teacher's `tests/` directory holds
//! whole-crate scenarios rather than single-module unit tests.

use regula::automaton::AutomatonError;
use regula::grammar::Grammar;
use regula::regex;
use regula::Automaton;

fn accepts_binary(a: &Automaton, word: &str) -> bool {
    a.accept_graphemes(word)
}

/// Binary strings divisible by 3, written directly rather than loaded
/// from a fixture file (there's no bundled example corpus at build time).
fn divisible_by_three() -> Automaton {
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
fn scenario_1_divisibility_by_3_binary() {
    let a = divisible_by_three();
    for word in ["110100111", "111111000", "1110000001"] {
        assert!(accepts_binary(&a, word), "expected accept: {word}");
    }
    for word in ["1000000110", "110001", "1010001010"] {
        assert!(!accepts_binary(&a, word), "expected reject: {word}");
    }
}

/// A non-deterministic automaton for `(a|b)*bb`.
fn ends_with_bb() -> Automaton {
    let mut a = Automaton::new();
    a.add_state("q0");
    a.add_state("q1");
    a.add_state("q2");
    a.toggle_accepting("q2").unwrap();
    a.set_transition("q0", "a", ["q0"]).unwrap();
    a.set_transition("q0", "b", ["q0", "q1"]).unwrap();
    a.set_transition("q1", "b", ["q2"]).unwrap();
    a
}

#[test]
fn scenario_2_ends_with_bb() {
    let nfa = ends_with_bb();
    assert!(!nfa.is_deterministic());
    assert_eq!(
        nfa.clone().minimize().unwrap_err(),
        AutomatonError::NonDeterministic
    );

    let dfa = nfa.determinize();
    assert!(dfa.is_deterministic());
    for word in ["bb", "abaabbabaabb", "babb", "abbabbabb"] {
        assert!(accepts_binary(&dfa, word) == accepts_binary(&nfa, word));
        assert!(accepts_binary(&dfa, word), "expected accept: {word}");
    }
    for word in ["", "abba", "bbbbbba", "absbb"] {
        assert!(!accepts_binary(&dfa, word), "expected reject: {word}");
    }
}

/// A 6-state NFA for the same divisible-by-3 language, with an
/// unreachable duplicate component, used to exercise minimize down to 3
/// states (the "bdiv3" fixture).
fn bdiv3() -> Automaton {
    let mut a = Automaton::new();
    a.add_state("S");
    a.add_state("A");
    a.add_state("B");
    a.add_state("S2");
    a.add_state("A2");
    a.add_state("B2");
    a.toggle_accepting("S").unwrap();
    a.toggle_accepting("S2").unwrap();
    a.set_transition("S", "0", ["S"]).unwrap();
    a.set_transition("S", "1", ["A"]).unwrap();
    a.set_transition("A", "0", ["B"]).unwrap();
    a.set_transition("A", "1", ["S"]).unwrap();
    a.set_transition("B", "0", ["A"]).unwrap();
    a.set_transition("B", "1", ["B"]).unwrap();
    a.set_transition("S2", "0", ["S2"]).unwrap();
    a.set_transition("S2", "1", ["A2"]).unwrap();
    a.set_transition("A2", "0", ["B2"]).unwrap();
    a.set_transition("A2", "1", ["S2"]).unwrap();
    a.set_transition("B2", "0", ["A2"]).unwrap();
    a.set_transition("B2", "1", ["B2"]).unwrap();
    a
}

#[test]
fn scenario_3_bdiv3_minimizes_to_3_states() {
    let mut a = bdiv3();
    a.minimize().unwrap();
    assert_eq!(a.states().len(), 3);
    assert!(accepts_binary(&a, ""));
    assert!(accepts_binary(&a, "110")); // 6, divisible by 3
    assert!(!accepts_binary(&a, "1")); // 1
}

#[test]
fn scenario_4_regex_compile() {
    let a = regex::to_automaton("1?(01)*0?").unwrap();
    assert!(a.is_deterministic());
    for word in ["", "0", "1", "0101", "10101"] {
        assert!(accepts_binary(&a, word), "expected accept: {word}");
    }
    for word in ["11", "00", "1010100"] {
        assert!(!accepts_binary(&a, word), "expected reject: {word}");
    }

    let b = regex::to_automaton("(a(ba)*a|ba)*(ab)*").unwrap();
    assert!(b.is_deterministic());
    for word in ["", "aa", "ab", "ba", "baaaab", "aabaababaaba"] {
        assert!(accepts_binary(&b, word), "expected accept: {word}");
    }
    for word in ["a", "bb", "ababa"] {
        assert!(!accepts_binary(&b, word), "expected reject: {word}");
    }

    for pattern in ["*", "?", "(a(a|b)*", "a(a))*"] {
        assert!(regex::parse(pattern).is_err(), "expected error for {pattern}");
    }
}

#[test]
fn scenario_5_grammar_round_trip() {
    let a = divisible_by_three();
    let grammar = Grammar::from_automaton(&a);
    assert_eq!(grammar.initial_symbol(), "S'");
    assert_eq!(grammar.productions_of("S'"), vec!["&", "0", "0S", "1A"]);
    assert_eq!(grammar.productions_of("S"), vec!["0", "0S", "1A"]);
    assert_eq!(grammar.productions_of("A"), vec!["0B", "1", "1S"]);
    assert_eq!(grammar.productions_of("B"), vec!["0A", "1B"]);

    let rebuilt = grammar.to_automaton();
    assert!(rebuilt.is_equivalent_to(&a));
}

#[test]
fn scenario_6_emptiness_and_finiteness() {
    // aa.json equivalent: language {"aa"}.
    let mut aa = Automaton::new();
    aa.add_state("q0");
    aa.add_state("q1");
    aa.add_state("q2");
    aa.toggle_accepting("q2").unwrap();
    aa.set_transition("q0", "a", ["q1"]).unwrap();
    aa.set_transition("q1", "a", ["q2"]).unwrap();
    assert!(!aa.is_empty());
    assert!(aa.is_finite());

    // one1.json equivalent: at least one '1'.
    let mut one1 = Automaton::new();
    one1.add_state("q0");
    one1.add_state("q1");
    one1.toggle_accepting("q1").unwrap();
    one1.set_transition("q0", "0", ["q0"]).unwrap();
    one1.set_transition("q0", "1", ["q1"]).unwrap();
    one1.set_transition("q1", "0", ["q1"]).unwrap();
    one1.set_transition("q1", "1", ["q1"]).unwrap();
    assert!(!one1.is_empty());
    assert!(!one1.is_finite());

    // empty.json equivalent: no accepting state at all.
    let mut empty = Automaton::new();
    empty.add_state("q0");
    assert!(empty.is_empty());

    let aa_bbb_cccc = regex::to_automaton("aa|bbb|cccc").unwrap();
    assert!(!aa_bbb_cccc.is_empty());
    assert!(aa_bbb_cccc.is_finite());
}

#[test]
fn invariant_complement_twice_is_equivalent() {
    let a = divisible_by_three();
    let double_complement = a.complement().complement();
    assert!(double_complement.is_equivalent_to(&a));
}

#[test]
fn invariant_self_operations() {
    let a = divisible_by_three();
    assert!(a.union(&a).is_equivalent_to(&a));
    assert!(a.intersection(&a).is_equivalent_to(&a));
    assert!(a.is_subset_of(&a));
    assert!(a.is_equivalent_to(&a));
}

#[test]
fn invariant_determinize_preserves_language() {
    let nfa = ends_with_bb();
    let dfa = nfa.determinize();
    for word in ["", "bb", "abaabbabaabb", "ba", "abba"] {
        assert_eq!(accepts_binary(&nfa, word), accepts_binary(&dfa, word));
    }
}

#[test]
fn invariant_save_load_round_trips() {
    let a = divisible_by_three();
    let json = a.save();
    let loaded = Automaton::load(&json).unwrap();
    assert_eq!(a, loaded);
}
