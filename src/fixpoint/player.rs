//! The worklist driver.

use bit_matrix::BitMatrix;
use log::debug;

use super::event::{Event, EventId};
use super::set::{MonotoneSet, SetId};
use crate::error::Error;
use crate::symbol::Symbol;

/// Counters collected while playing.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct PlayStats {
    /// Rounds in which at least one event was played.
    pub rounds: usize,
    /// Events played.
    pub evaluations: usize,
    /// Events played whose assertions all held.
    pub firings: usize,
}

/// Plays dirty events until none is left.
///
/// The player owns all sets and events. Dependents are indexed in a matrix with
/// a row per set and a column per event, fixed at construction.
#[derive(Debug)]
pub struct Player {
    sets: Vec<MonotoneSet>,
    events: Vec<Event>,
    dependents: BitMatrix,
    epsilon: Symbol,
    round_limit: Option<usize>,
    stats: PlayStats,
}

impl Player {
    /// Creates a player. `epsilon` is the element that unions never transfer.
    ///
    /// Fails if an event refers to a set outside `sets`.
    pub fn new(
        mut sets: Vec<MonotoneSet>,
        events: Vec<Event>,
        epsilon: Symbol,
    ) -> Result<Self, Error> {
        let mut dependents = BitMatrix::new(sets.len(), events.len());
        for (event_id, event) in events.iter().enumerate() {
            for set in event.sets() {
                if set.usize() >= sets.len() {
                    return Err(Error::UndefinedSet {
                        event: EventId(event_id),
                        set,
                    });
                }
                dependents.set(set.usize(), event_id, true);
            }
        }
        // Every event starts dirty, so growth from seeding needs no notification.
        for set in &mut sets {
            set.take_dirty();
        }
        Ok(Player {
            sets,
            events,
            dependents,
            epsilon,
            round_limit: None,
            stats: PlayStats::default(),
        })
    }

    /// Sets a diagnostic limit on the number of rounds. `None` means no limit.
    pub fn round_limit(mut self, limit: Option<usize>) -> Self {
        self.round_limit = limit;
        self
    }

    /// Returns the sets.
    pub fn sets(&self) -> &[MonotoneSet] {
        &self.sets
    }

    /// Returns a set.
    pub fn set(&self, id: SetId) -> &MonotoneSet {
        &self.sets[id.usize()]
    }

    /// Returns the events, in registration order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Iterates over events that read or write the given set.
    pub fn dependents(&self, set: SetId) -> impl Iterator<Item = EventId> + '_ {
        self.dependents
            .iter_row(set.usize())
            .enumerate()
            .filter_map(|(id, present)| if present { Some(EventId(id)) } else { None })
    }

    /// Returns counters collected so far.
    pub fn stats(&self) -> PlayStats {
        self.stats
    }

    /// Checks whether any event is waiting to be played.
    pub fn has_dirty(&self) -> bool {
        self.events.iter().any(Event::is_dirty)
    }

    /// Plays every dirty event once, in registration order. Dependents of a set
    /// that grew are marked dirty; those after the current event are played in
    /// the same round.
    ///
    /// Returns `false` if no event was dirty.
    pub fn play_round(&mut self) -> bool {
        let mut played = false;
        let mut grown = vec![];
        for id in 0..self.events.len() {
            if !self.events[id].is_dirty() {
                continue;
            }
            played = true;
            self.stats.evaluations += 1;
            if self.events[id].play(&mut self.sets, self.epsilon, &mut grown) {
                self.stats.firings += 1;
            }
            for set in grown.drain(..) {
                for (event, dependent) in self.dependents.iter_row(set.usize()).enumerate() {
                    if dependent {
                        self.events[event].mark_dirty();
                    }
                }
            }
        }
        if played {
            self.stats.rounds += 1;
        }
        played
    }

    /// Plays rounds until a fixed point is reached.
    pub fn play(&mut self) -> Result<PlayStats, Error> {
        loop {
            if let Some(limit) = self.round_limit {
                if self.stats.rounds >= limit && self.has_dirty() {
                    return Err(Error::RoundLimitExceeded { limit });
                }
            }
            if !self.play_round() {
                break;
            }
        }
        debug!(
            "fixed point of {} sets and {} events reached after {} rounds, {} evaluations, {} firings",
            self.sets.len(),
            self.events.len(),
            self.stats.rounds,
            self.stats.evaluations,
            self.stats.firings
        );
        Ok(self.stats)
    }

    /// Returns the sets, consuming the player.
    pub fn into_sets(self) -> Vec<MonotoneSet> {
        self.sets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::SymbolSource;

    fn universe() -> (SymbolSource, [Symbol; 3]) {
        let mut source = SymbolSource::new();
        let syms = [source.named("x"), source.named("y"), source.named("z")];
        (source, syms)
    }

    #[test]
    fn test_chain_reaches_fixed_point() {
        let (source, [x, y, _]) = universe();
        let epsilon = SymbolSource::epsilon();
        let mut sets: Vec<_> = (0..3)
            .map(|i| MonotoneSet::new(format!("S{}", i), source.num_syms()))
            .collect();
        sets[2].add(x);
        sets[2].add(y);
        let events = vec![
            Event::new().union_from(SetId(0), SetId(1)),
            Event::new().union_from(SetId(1), SetId(2)),
        ];
        let mut player = Player::new(sets, events, epsilon).unwrap();
        let stats = player.play().unwrap();

        assert_eq!(player.set(SetId(0)).iter().collect::<Vec<_>>(), vec![x, y]);
        assert!(!player.has_dirty());
        assert_eq!(stats.rounds, 3);
        assert_eq!(stats, player.stats());
    }

    #[test]
    fn test_guard_fires_after_growth() {
        let (source, [x, _, z]) = universe();
        let epsilon = SymbolSource::epsilon();
        let mut sets: Vec<_> = ["A", "B", "C"]
            .iter()
            .map(|&name| MonotoneSet::new(name, source.num_syms()))
            .collect();
        sets[1].add(z);
        let events = vec![
            Event::new()
                .when_contains(SetId(0), epsilon)
                .union_from(SetId(2), SetId(1)),
            Event::new().add_literal(SetId(0), epsilon).add_literal(SetId(0), x),
        ];
        let mut player = Player::new(sets, events, epsilon).unwrap();
        player.play().unwrap();

        assert_eq!(player.set(SetId(2)).iter().collect::<Vec<_>>(), vec![z]);
        assert_eq!(
            player.dependents(SetId(0)).collect::<Vec<_>>(),
            vec![EventId(0), EventId(1)]
        );
        assert_eq!(player.dependents(SetId(1)).collect::<Vec<_>>(), vec![EventId(0)]);
    }

    #[test]
    fn test_undefined_set() {
        let epsilon = SymbolSource::epsilon();
        let sets = vec![MonotoneSet::new("A", 2)];
        let events = vec![Event::new().union_from(SetId(0), SetId(3))];
        let err = Player::new(sets, events, epsilon).unwrap_err();
        assert_eq!(
            err,
            Error::UndefinedSet {
                event: EventId(0),
                set: SetId(3)
            }
        );
    }

    #[test]
    fn test_round_limit() {
        let (source, [x, y, z]) = universe();
        let epsilon = SymbolSource::epsilon();
        let mut sets: Vec<_> = (0..4)
            .map(|i| MonotoneSet::new(format!("S{}", i), source.num_syms()))
            .collect();
        sets[3].add(x);
        sets[3].add(y);
        sets[3].add(z);
        // Registered backwards, so that each round moves the elements one step.
        let events = vec![
            Event::new().union_from(SetId(0), SetId(1)),
            Event::new().union_from(SetId(1), SetId(2)),
            Event::new().union_from(SetId(2), SetId(3)),
        ];
        let mut player = Player::new(sets, events, epsilon)
            .unwrap()
            .round_limit(Some(1));
        assert_eq!(
            player.play().unwrap_err(),
            Error::RoundLimitExceeded { limit: 1 }
        );
    }
}
