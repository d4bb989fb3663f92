//! An incremental solver for monotone set equations.
//!
//! Each equation is an [`Event`]: "if these sets contain these elements, grow one
//! set with the contents of another, or with a literal". Sets are append-only
//! over a finite universe of symbols, so a [`Player`] that replays only events
//! whose inputs grew always terminates.

mod event;
mod player;
mod set;

pub use self::event::{Assertion, DisplayEvent, Event, EventId, Outcome};
pub use self::player::{PlayStats, Player};
pub use self::set::{DisplaySet, MonotoneSet, SetId};
