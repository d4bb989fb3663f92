//! Source

use std::borrow::Cow;
use std::collections::BTreeMap;

use crate::symbol::repr::{SymbolRepr, FIRST_ID, NULL_ID};
use crate::symbol::Symbol;

/// Name of the empty string marker.
pub const EPSILON_NAME: &str = "ε";
/// Name of the end-of-input marker.
pub const END_OF_INPUT_NAME: &str = "$";

/// A source of numeric symbols.
///
/// Every source starts with two reserved symbols: the empty string marker ε and
/// the end-of-input marker `$`. They may appear as elements of FIRST and FOLLOW
/// sets, but never on the left-hand side of a rule.
#[allow(missing_copy_implementations)]
#[derive(Clone, Debug)]
pub struct SymbolSource {
    next_id: SymbolRepr,
    names: Vec<Option<String>>,
    by_name: BTreeMap<String, Symbol>,
}

impl Default for SymbolSource {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolSource {
    /// Creates a source of numeric symbols that holds only the reserved symbols.
    pub fn new() -> Self {
        let mut source = SymbolSource {
            next_id: FIRST_ID,
            names: vec![],
            by_name: BTreeMap::new(),
        };
        source.named(EPSILON_NAME);
        source.named(END_OF_INPUT_NAME);
        source
    }

    /// The empty string marker, ε.
    #[inline]
    pub fn epsilon() -> Symbol {
        Symbol::from(FIRST_ID)
    }

    /// The end-of-input marker, `$`.
    #[inline]
    pub fn end_of_input() -> Symbol {
        Symbol::from(FIRST_ID + 1)
    }

    /// Checks whether the symbol is ε or `$`.
    #[inline]
    pub fn is_reserved(sym: Symbol) -> bool {
        sym == Self::epsilon() || sym == Self::end_of_input()
    }

    /// Returns generated symbols.
    pub fn sym<const N: usize>(&mut self) -> [Symbol; N] {
        let mut result = [Self::epsilon(); N];
        for dest in &mut result {
            *dest = self.next_sym();
        }
        result
    }

    /// Generates a new unique symbol.
    pub fn next_sym(&mut self) -> Symbol {
        let ret = self.next_id.into();
        self.next_id += 1;
        debug_assert_ne!(self.next_id, NULL_ID, "ran out of Symbol space?");
        self.names.push(None);
        ret
    }

    /// Returns the symbol with the given name, generating it if the name is new.
    pub fn named(&mut self, name: &str) -> Symbol {
        if let Some(&sym) = self.by_name.get(name) {
            return sym;
        }
        let sym = self.next_sym();
        self.names[sym.usize()] = Some(name.to_owned());
        self.by_name.insert(name.to_owned(), sym);
        sym
    }

    /// Looks up a symbol by name.
    pub fn get(&self, name: &str) -> Option<Symbol> {
        self.by_name.get(name).copied()
    }

    /// Returns the symbol's name. Unnamed symbols are called `g` followed by their ID.
    pub fn name_of(&self, sym: Symbol) -> Cow<'_, str> {
        match self.names.get(sym.usize()) {
            Some(Some(name)) => Cow::Borrowed(name.as_str()),
            _ => Cow::Owned(format!("g{}", sym.usize())),
        }
    }

    /// Checks whether the symbol was generated by this source.
    pub fn contains(&self, sym: Symbol) -> bool {
        sym.usize() < self.num_syms()
    }

    /// Returns the number of symbols in use.
    pub fn num_syms(&self) -> usize {
        self.next_id as usize
    }

    /// Returns an iterator over all symbols in use, reserved ones included.
    pub fn symbols(&self) -> impl Iterator<Item = Symbol> {
        (0..self.num_syms()).map(Symbol::from)
    }
}
