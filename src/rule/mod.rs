//! This module defines grammar rules. Each rule in a context-free grammar
//! consists of a single symbol on its left-hand side and an array of symbols
//! on its right-hand side. An empty right-hand side derives ε.

pub mod builder;

use std::fmt;

use crate::symbol::{Symbol, SymbolSource};

/// Trait for rules of a context-free grammar.
pub trait GrammarRule {
    /// Returns the rule's left-hand side.
    fn lhs(&self) -> Symbol;
    /// Returns the rule's right-hand side.
    fn rhs(&self) -> &[Symbol];

    /// Displays the rule with symbol names taken from the given source.
    fn display<'a>(&'a self, source: &'a SymbolSource) -> DisplayRule<'a> {
        DisplayRule {
            lhs: self.lhs(),
            rhs: self.rhs(),
            source,
        }
    }
}

impl<'a, R> GrammarRule for &'a R
where
    R: GrammarRule,
{
    fn lhs(&self) -> Symbol {
        (**self).lhs()
    }
    fn rhs(&self) -> &[Symbol] {
        (**self).rhs()
    }
}

/// Typical grammar rule representation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Rule {
    lhs: Symbol,
    /// The rule's right-hand side.
    pub rhs: Vec<Symbol>,
}

impl GrammarRule for Rule {
    fn lhs(&self) -> Symbol {
        self.lhs
    }

    fn rhs(&self) -> &[Symbol] {
        &self.rhs
    }
}

impl Rule {
    /// Creates a new rule.
    pub fn new(lhs: Symbol, rhs: Vec<Symbol>) -> Self {
        Rule { lhs, rhs }
    }
}

/// Formats a rule as `A -> B c`, or `A -> ε` when the right-hand side is empty.
#[derive(Clone, Copy)]
pub struct DisplayRule<'a> {
    lhs: Symbol,
    rhs: &'a [Symbol],
    source: &'a SymbolSource,
}

impl<'a> fmt::Display for DisplayRule<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ->", self.source.name_of(self.lhs))?;
        if self.rhs.is_empty() {
            return write!(f, " {}", self.source.name_of(SymbolSource::epsilon()));
        }
        for &sym in self.rhs {
            write!(f, " {}", self.source.name_of(sym))?;
        }
        Ok(())
    }
}
