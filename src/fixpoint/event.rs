//! Guarded set unions.

use std::fmt;

use super::set::{MonotoneSet, SetId};
use crate::symbol::{Symbol, SymbolSource};

/// Identifies an event registered with a [`Player`](super::Player).
#[derive(Clone, Copy, Debug, Hash, Eq, Ord, PartialEq, PartialOrd)]
pub struct EventId(pub(crate) usize);

impl EventId {
    /// Cast the event's ID to `usize`.
    #[inline]
    pub fn usize(self) -> usize {
        self.0
    }
}

/// A condition that must hold for an event to fire.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Assertion {
    /// The set must contain the element.
    Contains {
        /// The set to look into.
        set: SetId,
        /// The required element.
        element: Symbol,
    },
}

impl Assertion {
    fn holds(&self, sets: &[MonotoneSet]) -> bool {
        match *self {
            Assertion::Contains { set, element } => sets[set.usize()].contains(element),
        }
    }
}

/// A change applied when an event fires.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Outcome {
    /// Every element of `source` except ε is added to `target`.
    UnionFrom {
        /// The set that grows.
        target: SetId,
        /// The set whose elements are copied.
        source: SetId,
    },
    /// A single element is added to `target`.
    AddLiteral {
        /// The set that grows.
        target: SetId,
        /// The element.
        literal: Symbol,
    },
}

impl Outcome {
    /// Returns the set this outcome grows.
    pub fn target(&self) -> SetId {
        match *self {
            Outcome::UnionFrom { target, .. } | Outcome::AddLiteral { target, .. } => target,
        }
    }

    fn apply(&self, sets: &mut [MonotoneSet], epsilon: Symbol) {
        match *self {
            Outcome::UnionFrom { target, source } => {
                let elements: Vec<Symbol> = sets[source.usize()]
                    .iter()
                    .filter(|&element| element != epsilon)
                    .collect();
                let target = &mut sets[target.usize()];
                for element in elements {
                    target.add(element);
                }
            }
            Outcome::AddLiteral { target, literal } => {
                sets[target.usize()].add(literal);
            }
        }
    }
}

/// A propagation rule: if all assertions hold, apply all outcomes.
///
/// A new event is dirty, so it is played at least once.
#[derive(Clone, Debug)]
pub struct Event {
    assertions: Vec<Assertion>,
    outcomes: Vec<Outcome>,
    dirty: bool,
}

impl Default for Event {
    fn default() -> Self {
        Self::new()
    }
}

impl Event {
    /// Creates an event with no assertions and no outcomes.
    pub fn new() -> Self {
        Event {
            assertions: vec![],
            outcomes: vec![],
            dirty: true,
        }
    }

    /// Requires `set` to contain `element`.
    pub fn when_contains(mut self, set: SetId, element: Symbol) -> Self {
        self.assertions.push(Assertion::Contains { set, element });
        self
    }

    /// Adds the elements of `source`, except ε, to `target`.
    pub fn union_from(mut self, target: SetId, source: SetId) -> Self {
        self.outcomes.push(Outcome::UnionFrom { target, source });
        self
    }

    /// Adds `literal` to `target`.
    pub fn add_literal(mut self, target: SetId, literal: Symbol) -> Self {
        self.outcomes.push(Outcome::AddLiteral { target, literal });
        self
    }

    /// Returns the assertions, in order.
    pub fn assertions(&self) -> &[Assertion] {
        &self.assertions
    }

    /// Returns the outcomes, in order.
    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }

    /// Iterates over every set this event reads or writes.
    pub fn sets(&self) -> impl Iterator<Item = SetId> + '_ {
        let asserted = self.assertions.iter().map(|assertion| match *assertion {
            Assertion::Contains { set, .. } => set,
        });
        let affected = self.outcomes.iter().flat_map(|outcome| match *outcome {
            Outcome::UnionFrom { target, source } => [Some(target), Some(source)],
            Outcome::AddLiteral { target, .. } => [Some(target), None],
        });
        asserted.chain(affected.flatten())
    }

    /// Checks whether the event must be played again.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Schedules the event to be played again.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Plays the event against the current contents of `sets`.
    ///
    /// Clears the dirty flag first. If an assertion fails, nothing happens and
    /// `false` is returned. Otherwise every outcome is applied in order, and each
    /// target that grew has its dirty flag taken and is pushed onto `grown`, so
    /// that its dependents can be notified once per growth.
    pub fn play(
        &mut self,
        sets: &mut [MonotoneSet],
        epsilon: Symbol,
        grown: &mut Vec<SetId>,
    ) -> bool {
        self.dirty = false;
        if !self.assertions.iter().all(|assertion| assertion.holds(&*sets)) {
            return false;
        }
        for outcome in &self.outcomes {
            outcome.apply(sets, epsilon);
            let target = outcome.target();
            if sets[target.usize()].take_dirty() {
                grown.push(target);
            }
        }
        true
    }

    /// Displays the event in the form
    /// `if FIRST(A) contains ε then FIRST(S) gets the elements of FIRST(B)`.
    pub fn display<'a>(
        &'a self,
        sets: &'a [MonotoneSet],
        source: &'a SymbolSource,
    ) -> DisplayEvent<'a> {
        DisplayEvent {
            event: self,
            sets,
            source,
        }
    }
}

/// Formats an event with set and symbol names.
#[derive(Clone, Copy)]
pub struct DisplayEvent<'a> {
    event: &'a Event,
    sets: &'a [MonotoneSet],
    source: &'a SymbolSource,
}

impl<'a> DisplayEvent<'a> {
    fn set_name(&self, set: SetId) -> &'a str {
        self.sets.get(set.usize()).map_or("?", |set| set.name())
    }
}

impl<'a> fmt::Display for DisplayEvent<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, assertion) in self.event.assertions.iter().enumerate() {
            let word = if i == 0 { "if" } else { "and" };
            match *assertion {
                Assertion::Contains { set, element } => write!(
                    f,
                    "{} {} contains {} ",
                    word,
                    self.set_name(set),
                    self.source.name_of(element)
                )?,
            }
        }
        if !self.event.assertions.is_empty() {
            write!(f, "then ")?;
        }
        for (i, outcome) in self.event.outcomes.iter().enumerate() {
            if i != 0 {
                write!(f, " and ")?;
            }
            match *outcome {
                Outcome::UnionFrom { target, source } => write!(
                    f,
                    "{} gets the elements of {}",
                    self.set_name(target),
                    self.set_name(source)
                )?,
                Outcome::AddLiteral { target, literal } => write!(
                    f,
                    "{} gets the element {}",
                    self.set_name(target),
                    self.source.name_of(literal)
                )?,
            }
        }
        Ok(())
    }
}
