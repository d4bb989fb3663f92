//! Translation of the FIRST, FOLLOW and FIRST+ recurrences into events.

use std::collections::BTreeMap;

use log::{debug, trace};

use crate::error::Error;
use crate::fixpoint::{Event, MonotoneSet, Player, SetId};
use crate::grammar::Cfg;
use crate::prediction::{PredictSets, ResolvedSet};
use crate::rule::GrammarRule;
use crate::symbol::{Symbol, SymbolBitSet, SymbolSource};

/// Builds the sets and events whose fixed point holds FIRST, FOLLOW and FIRST+ sets.
///
/// A prefix `s1 … si` of a right-hand side is nullable when every FIRST(sk) contains
/// ε. Each event asserts that one such prefix is nullable and grows a set from the
/// symbol that follows it.
pub struct Generator<'a> {
    grammar: &'a Cfg,
    terminals: SymbolBitSet,
    nonterminals: SymbolBitSet,
    sets: Vec<MonotoneSet>,
    events: Vec<Event>,
    first: BTreeMap<Symbol, SetId>,
    follow: BTreeMap<Symbol, SetId>,
    first_plus: Vec<SetId>,
    round_limit: Option<usize>,
}

impl<'a> Generator<'a> {
    /// Validates the grammar, then creates all sets and events.
    pub fn new(grammar: &'a Cfg) -> Result<Self, Error> {
        let start = grammar.start_sym().ok_or(Error::EmptyGrammar)?;
        validate(grammar)?;

        let mut this = Generator {
            grammar,
            terminals: grammar.terminal_symbols(),
            nonterminals: grammar.nonterminal_symbols(),
            sets: vec![],
            events: vec![],
            first: BTreeMap::new(),
            follow: BTreeMap::new(),
            first_plus: vec![],
            round_limit: None,
        };

        let source = grammar.sym_source();
        for sym in source.symbols() {
            if SymbolSource::is_reserved(sym) {
                continue;
            }
            let first = this.add_set(format!("FIRST({})", source.name_of(sym)));
            this.first.insert(sym, first);
            if this.terminals.has_sym(sym) {
                this.sets[first.usize()].add(sym);
            } else {
                let follow = this.add_set(format!("FOLLOW({})", source.name_of(sym)));
                this.follow.insert(sym, follow);
            }
        }
        let start_follow = this.follow_of(start);
        this.sets[start_follow.usize()].add(SymbolSource::end_of_input());

        this.first_events();
        this.follow_events();
        this.first_plus_events();
        debug!(
            "generated {} sets and {} events for {} rules",
            this.sets.len(),
            this.events.len(),
            grammar.num_rules()
        );
        Ok(this)
    }

    /// Sets a diagnostic limit on the number of rounds the player may run.
    pub fn round_limit(mut self, limit: Option<usize>) -> Self {
        self.round_limit = limit;
        self
    }

    /// Returns the sets, in creation order.
    pub fn sets(&self) -> &[MonotoneSet] {
        &self.sets
    }

    /// Returns the events, in registration order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Gives mutable access to the events, for example to change their order.
    pub fn events_mut(&mut self) -> &mut [Event] {
        &mut self.events
    }

    /// Plays all events to a fixed point and returns the resolved sets.
    pub fn solve(self) -> Result<PredictSets, Error> {
        let (mut player, index) = self.into_player()?;
        let stats = player.play()?;
        let mut sets: Vec<Option<ResolvedSet>> = player
            .into_sets()
            .iter()
            .map(|set| Some(ResolvedSet::from(set)))
            .collect();
        let mut take = |id: SetId| sets[id.usize()].take().unwrap_or_default();
        Ok(PredictSets {
            first: index.first.into_iter().map(|(sym, id)| (sym, take(id))).collect(),
            follow: index.follow.into_iter().map(|(sym, id)| (sym, take(id))).collect(),
            first_plus: index.first_plus.into_iter().map(&mut take).collect(),
            stats,
        })
    }

    fn into_player(self) -> Result<(Player, SetIndex), Error> {
        let player = Player::new(self.sets, self.events, SymbolSource::epsilon())?
            .round_limit(self.round_limit);
        let index = SetIndex {
            first: self.first,
            follow: self.follow,
            first_plus: self.first_plus,
        };
        Ok((player, index))
    }

    fn add_set(&mut self, name: String) -> SetId {
        let id = SetId::from(self.sets.len());
        self.sets
            .push(MonotoneSet::new(name, self.grammar.sym_source().num_syms()));
        id
    }

    fn push_event(&mut self, event: Event) {
        trace!(
            "{}",
            event.display(&self.sets, self.grammar.sym_source())
        );
        self.events.push(event);
    }

    fn first_of(&self, sym: Symbol) -> SetId {
        self.first[&sym]
    }

    fn follow_of(&self, sym: Symbol) -> SetId {
        self.follow[&sym]
    }

    /// An event that asserts every symbol in `prefix` is nullable.
    fn nullable(&self, prefix: &[Symbol]) -> Event {
        prefix.iter().fold(Event::new(), |event, &sym| {
            event.when_contains(self.first_of(sym), SymbolSource::epsilon())
        })
    }

    /// Checks whether no longer prefix can be nullable once `sym` is part of it.
    fn ends_nullable_prefixes(&self, sym: Symbol) -> bool {
        if self.terminals.has_sym(sym) {
            debug_assert!(
                !self.sets[self.first_of(sym).usize()].contains(SymbolSource::epsilon()),
                "FIRST set of a terminal contains ε"
            );
            true
        } else {
            false
        }
    }

    /// For `A -> s1 … sn` and every `i`: if `s1 … si` is nullable, FIRST(A) gets
    /// FIRST(si+1), or ε when the whole right-hand side is nullable.
    fn first_events(&mut self) {
        let grammar = self.grammar;
        for rule in grammar.rules() {
            let head = self.first_of(rule.lhs());
            let rhs = rule.rhs();
            for i in 0..=rhs.len() {
                let event = self.nullable(&rhs[..i]);
                if i == rhs.len() {
                    self.push_event(event.add_literal(head, SymbolSource::epsilon()));
                    break;
                }
                let next = self.first_of(rhs[i]);
                self.push_event(event.union_from(head, next));
                if self.ends_nullable_prefixes(rhs[i]) {
                    break;
                }
            }
        }
    }

    /// For `A -> … B si+1 … sj …` with `si+1 … sj-1` nullable: FOLLOW(B) gets
    /// FIRST(sj), or FOLLOW(A) when the rest of the right-hand side is nullable.
    fn follow_events(&mut self) {
        let grammar = self.grammar;
        for rule in grammar.rules() {
            let rhs = rule.rhs();
            for (i, &sym) in rhs.iter().enumerate() {
                if !self.nonterminals.has_sym(sym) {
                    continue;
                }
                let follow = self.follow_of(sym);
                for j in i + 1..=rhs.len() {
                    let event = self.nullable(&rhs[i + 1..j]);
                    if j == rhs.len() {
                        let head = self.follow_of(rule.lhs());
                        self.push_event(event.union_from(follow, head));
                        break;
                    }
                    let next = self.first_of(rhs[j]);
                    self.push_event(event.union_from(follow, next));
                    if self.ends_nullable_prefixes(rhs[j]) {
                        break;
                    }
                }
            }
        }
    }

    /// Like FIRST, but each rule grows its own FIRST+ set, which gets FOLLOW(A)
    /// in place of ε.
    fn first_plus_events(&mut self) {
        let grammar = self.grammar;
        let source = grammar.sym_source();
        for rule in grammar.rules() {
            let first_plus = self.add_set(format!("FIRST+({})", rule.display(source)));
            self.first_plus.push(first_plus);
            let rhs = rule.rhs();
            for i in 0..=rhs.len() {
                let event = self.nullable(&rhs[..i]);
                if i == rhs.len() {
                    let head = self.follow_of(rule.lhs());
                    self.push_event(event.union_from(first_plus, head));
                    break;
                }
                let next = self.first_of(rhs[i]);
                self.push_event(event.union_from(first_plus, next));
                if self.ends_nullable_prefixes(rhs[i]) {
                    break;
                }
            }
        }
    }
}

/// Maps symbols and rules to the sets that hold their results.
struct SetIndex {
    first: BTreeMap<Symbol, SetId>,
    follow: BTreeMap<Symbol, SetId>,
    first_plus: Vec<SetId>,
}

fn validate(grammar: &Cfg) -> Result<(), Error> {
    let source = grammar.sym_source();
    for (index, rule) in grammar.rules().enumerate() {
        let lhs = rule.lhs();
        if SymbolSource::is_reserved(lhs) {
            return Err(Error::ReservedHead {
                rule: index,
                symbol: lhs,
            });
        }
        if !source.contains(lhs) {
            return Err(Error::UndefinedSymbol {
                rule: index,
                symbol: lhs,
            });
        }
        for &sym in rule.rhs() {
            if !source.contains(sym) || sym == SymbolSource::end_of_input() {
                return Err(Error::UndefinedSymbol {
                    rule: index,
                    symbol: sym,
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example() -> Cfg {
        let mut cfg = Cfg::new();
        let [s, a, b] = [cfg.named("S"), cfg.named("A"), cfg.named("B")];
        let [x, y] = [cfg.named("a"), cfg.named("b")];
        cfg.rule(s)
            .rhs([a, b])
            .rule(a)
            .rhs([x])
            .rhs([])
            .rule(b)
            .rhs([y]);
        cfg
    }

    #[test]
    fn test_event_texts() {
        let cfg = example();
        let generator = Generator::new(&cfg).unwrap();
        let texts: Vec<String> = generator
            .events()
            .iter()
            .map(|event| {
                event
                    .display(generator.sets(), cfg.sym_source())
                    .to_string()
            })
            .collect();
        assert_eq!(
            texts,
            vec![
                "FIRST(S) gets the elements of FIRST(A)",
                "if FIRST(A) contains ε then FIRST(S) gets the elements of FIRST(B)",
                "if FIRST(A) contains ε and FIRST(B) contains ε then FIRST(S) gets the element ε",
                "FIRST(A) gets the elements of FIRST(a)",
                "FIRST(A) gets the element ε",
                "FIRST(B) gets the elements of FIRST(b)",
                "FOLLOW(A) gets the elements of FIRST(B)",
                "if FIRST(B) contains ε then FOLLOW(A) gets the elements of FOLLOW(S)",
                "FOLLOW(B) gets the elements of FOLLOW(S)",
                "FIRST+(S -> A B) gets the elements of FIRST(A)",
                "if FIRST(A) contains ε then FIRST+(S -> A B) gets the elements of FIRST(B)",
                "if FIRST(A) contains ε and FIRST(B) contains ε \
                 then FIRST+(S -> A B) gets the elements of FOLLOW(S)",
                "FIRST+(A -> a) gets the elements of FIRST(a)",
                "FIRST+(A -> ε) gets the elements of FOLLOW(A)",
                "FIRST+(B -> b) gets the elements of FIRST(b)",
            ]
        );
    }

    #[test]
    fn test_sets_only_grow_between_rounds() {
        let cfg = example();
        let (mut player, _) = Generator::new(&cfg).unwrap().into_player().unwrap();
        let mut previous: Vec<Vec<Symbol>> =
            player.sets().iter().map(|set| set.iter().collect()).collect();
        let bound = player.sets().len() * cfg.sym_source().num_syms() + 1;
        let mut rounds = 0;
        while player.play_round() {
            rounds += 1;
            for (set, before) in player.sets().iter().zip(&previous) {
                assert!(before.iter().all(|&sym| set.contains(sym)), "{} shrank", set.name());
            }
            previous = player.sets().iter().map(|set| set.iter().collect()).collect();
            assert!(rounds <= bound);
        }
        assert_eq!(rounds, player.stats().rounds);
    }

    #[test]
    fn test_start_follow_is_seeded() {
        let cfg = example();
        let generator = Generator::new(&cfg).unwrap();
        let s = cfg.sym_source().get("S").unwrap();
        let start_follow = generator.follow_of(s);
        assert!(generator.sets()[start_follow.usize()].contains(SymbolSource::end_of_input()));
    }

    #[test]
    fn test_terminal_stops_prefix_enumeration() {
        let mut cfg = Cfg::new();
        let [s, a] = [cfg.named("S"), cfg.named("A")];
        let [x, y] = [cfg.named("x"), cfg.named("y")];
        cfg.rule(s).rhs([a, x, a, y]).rule(a).rhs([]);
        let generator = Generator::new(&cfg).unwrap();
        // FIRST: 2 for S, 1 for A. FOLLOW: 1 per occurrence of A. FIRST+: 2 for S, 1 for A.
        assert_eq!(generator.events().len(), 3 + 2 + 3);
    }
}
