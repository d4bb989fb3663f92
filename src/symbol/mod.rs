//! A type that can represent symbols in a context-free grammar. Symbols are distinguished by their
//! IDs.

mod repr;
pub mod set;
pub mod source;

pub use self::repr::Symbol;
use self::repr::SymbolRepr;
pub use self::set::SymbolBitSet;
pub use self::source::SymbolSource;

impl Symbol {
    /// Cast the symbol's ID to `usize`.
    #[inline]
    pub fn usize(self) -> usize {
        self.into()
    }
}

impl From<usize> for Symbol {
    #[inline]
    fn from(id: usize) -> Self {
        Symbol::from(id as SymbolRepr)
    }
}

impl From<Symbol> for usize {
    #[inline]
    fn from(sym: Symbol) -> Self {
        let id: SymbolRepr = sym.into();
        id as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_id_conversions() {
        let sym = Symbol::from(7usize);
        assert_eq!(sym.usize(), 7);
        let id: usize = sym.into();
        assert_eq!(id, 7);
        assert!(Symbol::from(0usize) < Symbol::from(1usize));
    }
}
