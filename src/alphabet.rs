use std::fmt::Debug;

use itertools::Itertools;

use crate::math::Bijection;

/// Symbols of an [`Alphabet`] are addressed by their position in it.
pub type SymbolIndex = usize;

/// An alphabet is the ordered collection of input symbols that a machine reads. Every symbol
/// is a non-empty label, no label occurs twice, and the position of a symbol is the order in
/// which it was declared. This order has no influence on the behavior of a machine, but it
/// determines the order in which transitions are considered and written out.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Alphabet {
    symbols: Bijection<String, SymbolIndex>,
}

impl Alphabet {
    /// Creates an alphabet without any symbols.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Tries to create an alphabet from the given labels, which are taken in order. If a label
    /// occurs more than once, it is returned as the error.
    ///
    /// # Example
    /// ```
    /// use transducers::alphabet::Alphabet;
    ///
    /// let alphabet = Alphabet::try_from_symbols(["x", "y"]).unwrap();
    /// assert_eq!(alphabet.index_of("y"), Some(1));
    /// assert_eq!(Alphabet::try_from_symbols(["x", "x"]), Err("x".to_string()));
    /// ```
    pub fn try_from_symbols<S, I>(symbols: I) -> Result<Self, String>
    where
        S: Into<String>,
        I: IntoIterator<Item = S>,
    {
        let mut alphabet = Self::empty();
        for sym in symbols {
            let sym = sym.into();
            if alphabet.push(sym.clone()).is_none() {
                return Err(sym);
            }
        }
        Ok(alphabet)
    }

    /// Appends a new symbol and returns its index. If the symbol is already present, the
    /// alphabet remains unchanged and `None` is returned.
    pub fn push<S: Into<String>>(&mut self, symbol: S) -> Option<SymbolIndex> {
        let idx = self.size();
        self.symbols.insert_no_overwrite(symbol.into(), idx).ok()?;
        Some(idx)
    }

    /// Returns the number of symbols.
    pub fn size(&self) -> usize {
        self.symbols.len()
    }

    /// Returns true if the alphabet has no symbols.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Returns an iterator over the indices of all symbols, in declaration order.
    pub fn universe(&self) -> std::ops::Range<SymbolIndex> {
        0..self.size()
    }

    /// Gives the label of the symbol at position `index`.
    pub fn symbol(&self, index: SymbolIndex) -> Option<&str> {
        self.symbols.get_by_right(&index).map(String::as_str)
    }

    /// Looks up the position of the symbol with the given label.
    pub fn index_of(&self, symbol: &str) -> Option<SymbolIndex> {
        self.symbols.get_by_left(symbol).copied()
    }

    /// Iterates over the labels of all symbols, in declaration order.
    pub fn symbols(&self) -> impl Iterator<Item = &str> + '_ {
        self.universe().filter_map(|idx| self.symbol(idx))
    }
}

impl Debug for Alphabet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{{}}}", self.symbols().join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols_keep_declaration_order() {
        let alphabet = Alphabet::try_from_symbols(["z", "a", "m"]).unwrap();
        assert_eq!(alphabet.symbols().collect::<Vec<_>>(), vec!["z", "a", "m"]);
        assert_eq!(alphabet.symbol(0), Some("z"));
        assert_eq!(alphabet.index_of("m"), Some(2));
        assert_eq!(alphabet.index_of("q"), None);
        assert_eq!(alphabet.universe(), 0..3);
        assert_eq!(format!("{alphabet:?}"), "{z, a, m}");
    }

    #[test]
    fn duplicates_are_rejected() {
        let mut alphabet = Alphabet::empty();
        assert!(alphabet.is_empty());
        assert_eq!(alphabet.push("a"), Some(0));
        assert_eq!(alphabet.push("a"), None);
        assert_eq!(alphabet.push("b"), Some(1));
        assert_eq!(alphabet.size(), 2);
    }
}
