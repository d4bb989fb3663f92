//! Errors raised while setting up or running the set computation.

use std::error;
use std::fmt;

use crate::fixpoint::{EventId, SetId};
use crate::symbol::Symbol;

/// An error in the grammar or in the configuration of the solver.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error {
    /// The grammar has no rules, so it has no start symbol.
    EmptyGrammar,
    /// A right-hand side refers to a symbol that has no FIRST set.
    UndefinedSymbol {
        /// Index of the offending rule.
        rule: usize,
        /// The symbol without a FIRST set.
        symbol: Symbol,
    },
    /// A reserved symbol, ε or `$`, is used as a left-hand side.
    ReservedHead {
        /// Index of the offending rule.
        rule: usize,
        /// The reserved symbol.
        symbol: Symbol,
    },
    /// An event refers to a set the player does not own.
    UndefinedSet {
        /// The offending event.
        event: EventId,
        /// The unknown set.
        set: SetId,
    },
    /// The player ran more rounds than its diagnostic limit allows.
    RoundLimitExceeded {
        /// The configured limit.
        limit: usize,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::EmptyGrammar => write!(f, "the grammar has no rules"),
            Error::UndefinedSymbol { rule, symbol } => write!(
                f,
                "rule {} refers to symbol {} which has no FIRST set",
                rule,
                symbol.usize()
            ),
            Error::ReservedHead { rule, symbol } => write!(
                f,
                "rule {} has the reserved symbol {} on its left-hand side",
                rule,
                symbol.usize()
            ),
            Error::UndefinedSet { event, set } => write!(
                f,
                "event {} refers to undefined set {}",
                event.usize(),
                set.usize()
            ),
            Error::RoundLimitExceeded { limit } => {
                write!(f, "no fixed point reached within {} rounds", limit)
            }
        }
    }
}

impl error::Error for Error {}
