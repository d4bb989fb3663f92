//! Computation of FIRST, FOLLOW and FIRST+ sets for context-free grammars.
//!
//! The sets are computed by a small incremental solver for monotone set equations.
//! Each equation is an [`Event`](fixpoint::Event): a guarded union of sets. The
//! [`Player`](fixpoint::Player) keeps re-evaluating events whose inputs have grown,
//! until a fixed point is reached.
//!
//! ```
//! use cfg_fixpoint::Cfg;
//!
//! let cfg = Cfg::load("S -> A b\nA -> a\nA -> ε").unwrap();
//! let sets = cfg.predict_sets().unwrap();
//! let s = cfg.sym_source().get("S").unwrap();
//! assert_eq!(sets.first(s).unwrap().name(), "FIRST(S)");
//! ```

#![deny(
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    unused_qualifications
)]
#![deny(unsafe_code)]
#![cfg_attr(test, deny(warnings))]

pub mod error;
pub mod fixpoint;
mod grammar;
pub mod load;
pub mod prediction;
pub mod rule;
pub mod symbol;

pub use error::Error;
pub use grammar::Cfg;
pub use load::LoadError;
pub use prediction::{Generator, PredictSets, ResolvedSet};
pub use rule::{GrammarRule, Rule};
pub use symbol::{Symbol, SymbolBitSet, SymbolSource};
