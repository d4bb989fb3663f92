//! Definitions of the context-free grammar type.

use std::slice;

use crate::rule::builder::RuleBuilder;
use crate::rule::{GrammarRule, Rule};
use crate::symbol::{Symbol, SymbolBitSet, SymbolSource};

/// Basic representation of context-free grammars.
///
/// The start symbol is the left-hand side of the first rule.
#[derive(Clone, Debug, Default)]
pub struct Cfg {
    /// The symbol source.
    sym_source: SymbolSource,
    /// The array of rules.
    rules: Vec<Rule>,
}

impl Cfg {
    /// Creates an empty context-free grammar.
    pub fn new() -> Self {
        Cfg {
            sym_source: SymbolSource::new(),
            rules: vec![],
        }
    }

    /// Returns generated symbols.
    pub fn sym<const N: usize>(&mut self) -> [Symbol; N] {
        self.sym_source.sym()
    }

    /// Returns the symbol with the given name, generating it if the name is new.
    pub fn named(&mut self, name: &str) -> Symbol {
        self.sym_source.named(name)
    }

    /// Returns an immutable reference to the grammar's symbol source.
    pub fn sym_source(&self) -> &SymbolSource {
        &self.sym_source
    }

    /// Starts building a new rule.
    pub fn rule(&mut self, lhs: Symbol) -> RuleBuilder<'_> {
        RuleBuilder::new(self).rule(lhs)
    }

    /// Adds a rule. Occurrences of ε are dropped from the right-hand side, so that
    /// `A -> ε` is stored with an empty right-hand side.
    pub fn add_rule(&mut self, lhs: Symbol, rhs: &[Symbol]) {
        let epsilon = SymbolSource::epsilon();
        let rhs = rhs.iter().copied().filter(|&sym| sym != epsilon).collect();
        self.rules.push(Rule::new(lhs, rhs));
    }

    /// Returns an iterator over the grammar's rules, in the order of addition.
    pub fn rules(&self) -> slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    /// Returns the number of rules.
    pub fn num_rules(&self) -> usize {
        self.rules.len()
    }

    /// Returns the start symbol, if the grammar has any rules.
    pub fn start_sym(&self) -> Option<Symbol> {
        self.rules.first().map(|rule| rule.lhs())
    }

    /// Returns the set of terminal symbols.
    pub fn terminal_symbols(&self) -> SymbolBitSet {
        SymbolBitSet::terminal_set(self)
    }

    /// Returns the set of nonterminal symbols.
    pub fn nonterminal_symbols(&self) -> SymbolBitSet {
        SymbolBitSet::nonterminal_set(self)
    }
}
