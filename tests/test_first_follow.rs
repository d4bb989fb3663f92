mod support;

use std::collections::BTreeSet;

use cfg_fixpoint::{Cfg, GrammarRule, Symbol, SymbolSource};
use test_case::test_case;

use support::{expected, load, names, EXPRESSIONS};

fn first(cfg: &Cfg, name: &str) -> BTreeSet<String> {
    let sets = cfg.predict_sets().unwrap();
    let sym = cfg.sym_source().get(name).unwrap();
    names(cfg, sets.first(sym).unwrap())
}

fn follow(cfg: &Cfg, name: &str) -> BTreeSet<String> {
    let sets = cfg.predict_sets().unwrap();
    let sym = cfg.sym_source().get(name).unwrap();
    names(cfg, sets.follow(sym).unwrap())
}

#[test]
fn test_nullable_prefix() {
    let cfg = load("S -> A B\nA -> a\nA -> ε\nB -> b");

    assert_eq!(first(&cfg, "A"), expected(&["a", "ε"]));
    assert_eq!(first(&cfg, "B"), expected(&["b"]));
    assert_eq!(first(&cfg, "S"), expected(&["a", "b"]));
    assert_eq!(follow(&cfg, "A"), expected(&["b"]));
    assert_eq!(follow(&cfg, "S"), expected(&["$"]));
    assert_eq!(follow(&cfg, "B"), expected(&["$"]));
}

#[test]
fn test_start_symbol_follow_is_end_of_input() {
    let cfg = load("S -> a B c\nB -> b");

    assert_eq!(follow(&cfg, "S"), expected(&["$"]));
    assert_eq!(follow(&cfg, "B"), expected(&["c"]));
}

#[test_case("E", &["(", "id"] ; "expression")]
#[test_case("E'", &["+", "ε"] ; "expression tail")]
#[test_case("T", &["(", "id"] ; "term")]
#[test_case("T'", &["*", "ε"] ; "term tail")]
#[test_case("F", &["(", "id"] ; "factor")]
#[test_case("id", &["id"] ; "terminal")]
fn test_expression_first_sets(sym: &str, elements: &[&str]) {
    let cfg = load(EXPRESSIONS);
    assert_eq!(first(&cfg, sym), expected(elements));
}

#[test_case("E", &[")", "$"] ; "expression")]
#[test_case("E'", &[")", "$"] ; "expression tail")]
#[test_case("T", &["+", ")", "$"] ; "term")]
#[test_case("T'", &["+", ")", "$"] ; "term tail")]
#[test_case("F", &["*", "+", ")", "$"] ; "factor")]
fn test_expression_follow_sets(sym: &str, elements: &[&str]) {
    let cfg = load(EXPRESSIONS);
    assert_eq!(follow(&cfg, sym), expected(elements));
}

#[test]
fn test_left_recursion() {
    let cfg = load("E -> E + n\nE -> n");

    assert_eq!(first(&cfg, "E"), expected(&["n"]));
    assert_eq!(follow(&cfg, "E"), expected(&["+", "$"]));
}

#[test]
fn test_nullable_cycle() {
    let cfg = load("S -> A s\nA -> B\nB -> A\nA -> ε");

    assert_eq!(first(&cfg, "A"), expected(&["ε"]));
    assert_eq!(first(&cfg, "B"), expected(&["ε"]));
    assert_eq!(first(&cfg, "S"), expected(&["s"]));
    assert_eq!(follow(&cfg, "B"), expected(&["s"]));
}

#[test]
fn test_builder_grammar() {
    let mut cfg = Cfg::new();
    let [start, a, x, b, c, y] = cfg.sym();
    cfg.rule(start)
        .rhs([a, x, b])
        .rhs([c])
        .rule(b)
        .rhs([a, a])
        .rhs([a, c])
        .rule(c)
        .rhs([x])
        .rhs([y])
        .rule(a)
        .rhs([]);

    let sets = cfg.predict_sets().unwrap();
    let epsilon = SymbolSource::epsilon();
    let elements = |sym| sets.first(sym).unwrap().elements().clone();

    let set = |syms: &[Symbol]| syms.iter().copied().collect::<BTreeSet<_>>();

    assert_eq!(elements(start), set(&[x, y]));
    assert_eq!(elements(a), set(&[epsilon]));
    assert_eq!(elements(b), set(&[epsilon, x, y]));
    assert_eq!(elements(c), set(&[x, y]));
    assert_eq!(cfg.rules().filter(|rule| rule.lhs() == b).count(), 2);
}

#[test]
fn test_set_names_and_display() {
    let cfg = load("S -> A b\nA -> a");
    let sets = cfg.predict_sets().unwrap();
    let a = cfg.sym_source().get("A").unwrap();

    assert_eq!(sets.first(a).unwrap().name(), "FIRST(A)");
    assert_eq!(sets.follow(a).unwrap().name(), "FOLLOW(A)");
    assert_eq!(
        sets.follow(a).unwrap().display(cfg.sym_source()).to_string(),
        "FOLLOW(A) = {b}"
    );
    assert!(sets.follow(cfg.sym_source().get("b").unwrap()).is_none());
    assert_eq!(sets.follow_sets().count(), 2);
}
