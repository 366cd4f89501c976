//! Resolution results and the engine producing them.

mod resolve;

pub use resolve::Resolver;

use crate::types::{CastFailure, Value};

/// Whether a name was found in the schema or the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Found,
    NotFound,
}

impl Presence {
    pub fn is_found(self) -> bool {
        self == Presence::Found
    }
}

/// Which store key supplied a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    /// The variable's own name.
    Original,
    /// An alias, by name.
    Alias(String),
}

/// Where an entry of the error trail came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Store(Origin),
    Default,
}

/// The final value of a resolution with its provenance.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved {
    /// `(store, value, original | alias:NAME)`
    Store { value: Value, origin: Origin },
    /// `(default, value, schema)`: the schema's default, cast.
    Schema(Value),
    /// `(default, empty, system)`: nothing usable was found.
    System,
}

/// One failed attempt recorded while resolving.
#[derive(Debug, Clone, PartialEq)]
pub struct Attempt {
    pub source: Source,
    pub failure: CastFailure,
}

/// Resolution result for one variable name.
///
/// `errors` keeps probes in the order they happened: the original store
/// key, then aliases in declaration order, then the default.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub name: String,
    pub schema: Presence,
    pub store: Presence,
    pub errors: Vec<Attempt>,
    pub resolved: Resolved,
}

impl Invocation {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            schema: Presence::Found,
            store: Presence::NotFound,
            errors: Vec::new(),
            resolved: Resolved::System,
        }
    }

    /// A name the schema does not declare; the raw store value passes through.
    pub(crate) fn undeclared(name: &str, raw: Option<&Value>) -> Self {
        let (store, resolved) = match raw {
            Some(value) => (
                Presence::Found,
                Resolved::Store {
                    value: value.clone(),
                    origin: Origin::Original,
                },
            ),
            None => (Presence::NotFound, Resolved::System),
        };
        Self {
            name: name.to_string(),
            schema: Presence::NotFound,
            store,
            errors: Vec::new(),
            resolved,
        }
    }

    pub(crate) fn record(&mut self, source: Source, failure: CastFailure) {
        self.errors.push(Attempt { source, failure });
    }

    /// The resolved value, `None` when resolution ended empty.
    pub fn value(&self) -> Option<&Value> {
        match &self.resolved {
            Resolved::Store { value, .. } | Resolved::Schema(value) => Some(value),
            Resolved::System => None,
        }
    }

    pub fn into_value(self) -> Option<Value> {
        match self.resolved {
            Resolved::Store { value, .. } | Resolved::Schema(value) => Some(value),
            Resolved::System => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.resolved == Resolved::System
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undeclared_found_passes_value_through() {
        let raw = Value::from("x");
        let inv = Invocation::undeclared("FOO", Some(&raw));
        assert_eq!(inv.schema, Presence::NotFound);
        assert!(inv.store.is_found());
        assert_eq!(inv.value(), Some(&raw));
    }

    #[test]
    fn test_undeclared_missing_is_system_empty() {
        let inv = Invocation::undeclared("FOO", None);
        assert!(!inv.store.is_found());
        assert!(inv.is_empty());
        assert_eq!(inv.into_value(), None);
    }
}
