use std::num::NonZeroU32;

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

pub type SymbolRepr = u32;
/// The first usable symbol ID.
pub const FIRST_ID: SymbolRepr = 0;
/// An ID that no symbol can have.
pub const NULL_ID: SymbolRepr = !0;

/// A common grammar symbol type.
#[derive(Clone, Copy, Debug, Hash, Eq, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Symbol(NonZeroU32);

impl From<SymbolRepr> for Symbol {
    #[inline]
    fn from(id: SymbolRepr) -> Self {
        debug_assert_ne!(
            id, NULL_ID,
            "invalid conversion from a null id to non-null Symbol"
        );
        match NonZeroU32::new(id.wrapping_add(1)) {
            Some(nonzero) => Symbol(nonzero),
            None => unreachable!("symbol id overflow"),
        }
    }
}

impl From<Symbol> for SymbolRepr {
    #[inline]
    fn from(sym: Symbol) -> Self {
        sym.0.get().wrapping_sub(1)
    }
}
