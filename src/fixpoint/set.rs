//! Append-only sets with change tracking.

use std::fmt;
use std::mem;

use bit_vec::BitVec;

use crate::symbol::{Symbol, SymbolSource};

/// Identifies a set owned by a [`Player`](super::Player).
#[derive(Clone, Copy, Debug, Hash, Eq, Ord, PartialEq, PartialOrd)]
pub struct SetId(pub(crate) usize);

impl SetId {
    /// Cast the set's ID to `usize`.
    #[inline]
    pub fn usize(self) -> usize {
        self.0
    }
}

impl From<usize> for SetId {
    #[inline]
    fn from(id: usize) -> Self {
        SetId(id)
    }
}

/// A named set of symbols that only grows.
///
/// The set is dirty iff it grew since the last call to `take_dirty`. Adding an
/// element that is already present changes nothing.
#[derive(Clone, Debug)]
pub struct MonotoneSet {
    name: String,
    elements: BitVec,
    len: usize,
    dirty: bool,
}

impl MonotoneSet {
    /// Creates an empty set, with room for symbols of IDs up to `universe`.
    pub fn new<N>(name: N, universe: usize) -> Self
    where
        N: Into<String>,
    {
        MonotoneSet {
            name: name.into(),
            elements: BitVec::from_elem(universe, false),
            len: 0,
            dirty: false,
        }
    }

    /// Returns the set's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Checks whether the set contains the element.
    pub fn contains(&self, element: Symbol) -> bool {
        self.elements.get(element.usize()).unwrap_or(false)
    }

    /// Inserts the element. The set becomes dirty if the element was absent.
    pub fn add(&mut self, element: Symbol) {
        if self.contains(element) {
            return;
        }
        let id = element.usize();
        if id >= self.elements.len() {
            self.elements.grow(id + 1 - self.elements.len(), false);
        }
        self.elements.set(id, true);
        self.len += 1;
        self.dirty = true;
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Checks whether the set has no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Checks whether the set grew since its dependents were last notified.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clears the dirty flag, returning its previous value.
    pub fn take_dirty(&mut self) -> bool {
        mem::replace(&mut self.dirty, false)
    }

    /// Iterates over elements in the order of their IDs.
    pub fn iter(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.elements
            .iter()
            .enumerate()
            .filter_map(|(id, present)| if present { Some(Symbol::from(id)) } else { None })
    }

    /// Displays the set's contents, as in `FIRST(A) = {a, ε}`.
    pub fn display<'a>(&'a self, source: &'a SymbolSource) -> DisplaySet<'a> {
        DisplaySet { set: self, source }
    }
}

/// Formats a set with its name and elements.
#[derive(Clone, Copy)]
pub struct DisplaySet<'a> {
    set: &'a MonotoneSet,
    source: &'a SymbolSource,
}

impl<'a> fmt::Display for DisplaySet<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} = {{", self.set.name)?;
        for (i, sym) in self.set.iter().enumerate() {
            if i != 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", self.source.name_of(sym))?;
        }
        write!(f, "}}")
    }
}
