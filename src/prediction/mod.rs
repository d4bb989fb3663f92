//! Prediction for predictive parsers: FIRST, FOLLOW and FIRST+ sets.

mod generator;

use std::collections::{btree_map, btree_set, BTreeMap, BTreeSet};
use std::fmt;

#[cfg(feature = "serialize")]
use serde::Serialize;

pub use self::generator::Generator;
use crate::error::Error;
use crate::fixpoint::{MonotoneSet, PlayStats};
use crate::grammar::Cfg;
use crate::symbol::{Symbol, SymbolSource};

/// A set frozen after the fixed point was reached.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize))]
pub struct ResolvedSet {
    name: String,
    elements: BTreeSet<Symbol>,
}

impl ResolvedSet {
    /// Returns the set's name, such as `FIRST(A)`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the set's elements.
    pub fn elements(&self) -> &BTreeSet<Symbol> {
        &self.elements
    }

    /// Checks whether the set contains the element.
    pub fn contains(&self, element: Symbol) -> bool {
        self.elements.contains(&element)
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Checks whether the set has no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Iterates over the elements in the order of their IDs.
    pub fn iter(&self) -> btree_set::Iter<'_, Symbol> {
        self.elements.iter()
    }

    /// Displays the set, as in `FOLLOW(A) = {$, b}`.
    pub fn display<'a>(&'a self, source: &'a SymbolSource) -> DisplayResolved<'a> {
        DisplayResolved { set: self, source }
    }
}

impl<'a> From<&'a MonotoneSet> for ResolvedSet {
    fn from(set: &'a MonotoneSet) -> Self {
        ResolvedSet {
            name: set.name().to_owned(),
            elements: set.iter().collect(),
        }
    }
}

/// Formats a resolved set with symbol names.
#[derive(Clone, Copy)]
pub struct DisplayResolved<'a> {
    set: &'a ResolvedSet,
    source: &'a SymbolSource,
}

impl<'a> fmt::Display for DisplayResolved<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} = {{", self.set.name)?;
        for (i, &sym) in self.set.elements.iter().enumerate() {
            if i != 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", self.source.name_of(sym))?;
        }
        write!(f, "}}")
    }
}

/// FIRST, FOLLOW and FIRST+ sets of a grammar, at their fixed point.
#[derive(Clone, Debug)]
pub struct PredictSets {
    pub(crate) first: BTreeMap<Symbol, ResolvedSet>,
    pub(crate) follow: BTreeMap<Symbol, ResolvedSet>,
    pub(crate) first_plus: Vec<ResolvedSet>,
    pub(crate) stats: PlayStats,
}

impl PredictSets {
    /// Returns FIRST(sym), for any symbol except ε and `$`.
    pub fn first(&self, sym: Symbol) -> Option<&ResolvedSet> {
        self.first.get(&sym)
    }

    /// Returns FOLLOW(sym), for nonterminals.
    pub fn follow(&self, sym: Symbol) -> Option<&ResolvedSet> {
        self.follow.get(&sym)
    }

    /// Returns the FIRST+ set of the rule at the given index.
    pub fn first_plus(&self, rule: usize) -> Option<&ResolvedSet> {
        self.first_plus.get(rule)
    }

    /// Iterates over FIRST sets, ordered by symbol.
    pub fn first_sets(&self) -> btree_map::Iter<'_, Symbol, ResolvedSet> {
        self.first.iter()
    }

    /// Iterates over FOLLOW sets, ordered by symbol.
    pub fn follow_sets(&self) -> btree_map::Iter<'_, Symbol, ResolvedSet> {
        self.follow.iter()
    }

    /// Returns FIRST+ sets, in the order of rules.
    pub fn first_plus_sets(&self) -> &[ResolvedSet] {
        &self.first_plus
    }

    /// Returns counters from the computation.
    pub fn stats(&self) -> PlayStats {
        self.stats
    }
}

impl Cfg {
    /// Computes FIRST, FOLLOW and FIRST+ sets of the grammar.
    pub fn predict_sets(&self) -> Result<PredictSets, Error> {
        Generator::new(self)?.solve()
    }
}
