#![allow(dead_code)]

use std::collections::BTreeSet;

use cfg_fixpoint::{Cfg, ResolvedSet};

pub const EXPRESSIONS: &str = "
# Expressions without left recursion.
E -> T E'
E' -> + T E'
E' -> ε
T -> F T'
T' -> * F T'
T' -> ε
F -> ( E )
F -> id
";

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn load(text: &str) -> Cfg {
    init_logging();
    Cfg::load(text).unwrap()
}

/// Names of the set's elements.
pub fn names(cfg: &Cfg, set: &ResolvedSet) -> BTreeSet<String> {
    set.iter()
        .map(|&sym| cfg.sym_source().name_of(sym).into_owned())
        .collect()
}

pub fn expected(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|&name| name.to_owned()).collect()
}
