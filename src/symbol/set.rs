//! Informs whether symbols are terminal or nonterminal.

use std::{iter, ops};

use bit_vec::BitVec;

use crate::grammar::Cfg;
use crate::rule::GrammarRule;
use crate::symbol::{Symbol, SymbolSource};

/// A set of symbols in the form of a bit vector.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SymbolBitSet {
    bit_vec: BitVec,
}

/// An iterator over a symbol set.
pub struct Iter<'a> {
    iter: iter::Enumerate<bit_vec::Iter<'a>>,
}

impl SymbolBitSet {
    /// Constructs a `SymbolBitSet` over the grammar's symbol universe.
    pub fn from_elem(grammar: &Cfg, elem: bool) -> Self {
        SymbolBitSet {
            bit_vec: BitVec::from_elem(grammar.sym_source().num_syms(), elem),
        }
    }

    /// Gathers information about whether symbols are terminal or nonterminal.
    /// Constructs a set of terminal symbols. The reserved ε and `$` are not terminals.
    ///
    /// Constructs a data structure in O(n) time.
    pub fn terminal_set(grammar: &Cfg) -> Self {
        let mut set = SymbolBitSet::from_elem(grammar, true);
        set.set(SymbolSource::epsilon(), false);
        set.set(SymbolSource::end_of_input(), false);
        for rule in grammar.rules() {
            set.set(rule.lhs(), false);
        }
        set
    }

    /// Constructs a set of nonterminal symbols: symbols that head at least one rule.
    pub fn nonterminal_set(grammar: &Cfg) -> Self {
        let mut set = SymbolBitSet::from_elem(grammar, false);
        for rule in grammar.rules() {
            set.set(rule.lhs(), true);
        }
        set
    }

    /// Set the entry for a symbol. Symbols outside the universe are ignored.
    pub fn set(&mut self, sym: Symbol, value: bool) {
        if sym.usize() < self.bit_vec.len() {
            self.bit_vec.set(sym.usize(), value);
        }
    }

    /// Checks whether a given symbol is in this set.
    pub fn has_sym(&self, sym: Symbol) -> bool {
        self.bit_vec.get(sym.usize()).unwrap_or(false)
    }

    /// Iterates over symbols in the set.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            iter: self.bit_vec.iter().enumerate(),
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = Symbol;

    fn next(&mut self) -> Option<Self::Item> {
        for (id, is_present) in &mut self.iter {
            if is_present {
                return Some(Symbol::from(id));
            }
        }
        None
    }
}

static TRUE: bool = true;
static FALSE: bool = false;

impl ops::Index<Symbol> for SymbolBitSet {
    type Output = bool;

    fn index(&self, index: Symbol) -> &Self::Output {
        if self.has_sym(index) {
            &TRUE
        } else {
            &FALSE
        }
    }
}
