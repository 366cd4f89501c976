//! Process-wide interned names.
//!
//! JSON objects can be decoded with symbolic keys instead of plain text.
//! A symbol only exists once something has interned it, which lets the
//! non-creating key mode drop keys nobody has declared.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;

static SYMBOLS: Lazy<RwLock<HashSet<Arc<str>>>> = Lazy::new(|| RwLock::new(HashSet::new()));

/// An interned name.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(Arc<str>);

impl Symbol {
    /// Returns the symbol for `name`, creating it if needed.
    pub fn intern(name: &str) -> Self {
        if let Some(existing) = Self::existing(name) {
            return existing;
        }
        let mut table = SYMBOLS.write();
        if let Some(sym) = table.get(name) {
            return Symbol(Arc::clone(sym));
        }
        let sym: Arc<str> = Arc::from(name);
        table.insert(Arc::clone(&sym));
        Symbol(sym)
    }

    /// Returns the symbol for `name` only if it was interned before.
    pub fn existing(name: &str) -> Option<Self> {
        SYMBOLS.read().get(name).map(|sym| Symbol(Arc::clone(sym)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ":{}", self.0)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_is_idempotent() {
        let a = Symbol::intern("symbol_test_idempotent");
        let b = Symbol::intern("symbol_test_idempotent");
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "symbol_test_idempotent");
    }

    #[test]
    fn test_existing_does_not_create() {
        assert!(Symbol::existing("symbol_test_never_interned").is_none());
        Symbol::intern("symbol_test_interned_later");
        assert!(Symbol::existing("symbol_test_interned_later").is_some());
    }
}
