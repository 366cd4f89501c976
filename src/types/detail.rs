//! Structured cast failures.

use std::fmt;

use super::reference::TypeRef;
use super::value::Value;

/// One element of an error detail tree.
///
/// A single cast attempt produces either `Parsing`/`Validation` entries from
/// its own logic or exactly one `Nested` entry relaying inner failures.
#[derive(Debug, Clone, PartialEq)]
pub enum Detail {
    Text(String),
    /// A fragment to emphasise when rendered.
    Highlight(String),
    /// Business-rule failure.
    Validation(Vec<Detail>),
    /// Structural or format failure.
    Parsing(Vec<Detail>),
    /// Every failing element of a collection type.
    Nested(Vec<CastFailure>),
}

impl Detail {
    pub fn text(s: impl Into<String>) -> Self {
        Detail::Text(s.into())
    }

    pub fn highlight(s: impl Into<String>) -> Self {
        Detail::Highlight(s.into())
    }

    /// `[Text(prefix), Highlight(a), Text(", "), Highlight(b), ...]`
    pub fn enumerate<I, S>(prefix: &str, items: I) -> Vec<Detail>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out = vec![Detail::text(prefix)];
        for (i, item) in items.into_iter().enumerate() {
            if i > 0 {
                out.push(Detail::text(", "));
            }
            out.push(Detail::Highlight(item.into()));
        }
        out
    }
}

impl fmt::Display for Detail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Detail::Text(s) | Detail::Highlight(s) => f.write_str(s),
            Detail::Validation(parts) | Detail::Parsing(parts) => write_all(f, parts),
            Detail::Nested(failures) => {
                for (i, failure) in failures.iter().enumerate() {
                    if i > 0 {
                        f.write_str("; ")?;
                    }
                    write!(f, "{failure}")?;
                }
                Ok(())
            }
        }
    }
}

fn write_all(f: &mut fmt::Formatter<'_>, parts: &[Detail]) -> fmt::Result {
    for part in parts {
        write!(f, "{part}")?;
    }
    Ok(())
}

/// A value that failed casting, the type that rejected it and why.
#[derive(Debug, Clone, PartialEq)]
pub struct CastFailure {
    pub value: Value,
    pub type_ref: TypeRef,
    pub details: Vec<Detail>,
}

impl CastFailure {
    pub fn new(value: Value, type_ref: TypeRef, details: Vec<Detail>) -> Self {
        Self {
            value,
            type_ref,
            details,
        }
    }

    /// Inner failures when this failure relays a collection's elements.
    pub fn nested(&self) -> &[CastFailure] {
        self.details
            .iter()
            .find_map(|d| match d {
                Detail::Nested(inner) => Some(inner.as_slice()),
                _ => None,
            })
            .unwrap_or(&[])
    }

    pub fn is_parsing(&self) -> bool {
        self.details.iter().any(|d| matches!(d, Detail::Parsing(_)))
    }

    pub fn is_validation(&self) -> bool {
        self.details
            .iter()
            .any(|d| matches!(d, Detail::Validation(_)))
    }
}

impl fmt::Display for CastFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} is not a valid {}", self.value.to_text(), self.type_ref.id())?;
        if !self.details.is_empty() {
            f.write_str(": ")?;
            write_all(f, &self.details)?;
        }
        Ok(())
    }
}

/// Canonical outcome of casting one value.
pub type CastResult = Result<Value, CastFailure>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enumerate_interleaves_separators() {
        let parts = Detail::enumerate("one of ", ["a", "b"]);
        assert_eq!(
            parts,
            vec![
                Detail::text("one of "),
                Detail::highlight("a"),
                Detail::text(", "),
                Detail::highlight("b"),
            ]
        );
    }

    #[test]
    fn test_failure_display_is_plain_text() {
        let failure = CastFailure::new(
            Value::from("x"),
            TypeRef::new("integer"),
            vec![Detail::Parsing(vec![
                Detail::text("unexpected "),
                Detail::highlight("x"),
            ])],
        );
        assert_eq!(
            failure.to_string(),
            "\"x\" is not a valid integer: unexpected x"
        );
    }
}
