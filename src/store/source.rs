use toml::Value as TomlValue;

use super::StoreError;
use crate::types::{Key, Value};

/// A named raw value contributed by a source.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreEntry {
    pub name: String,
    pub value: Value,
}

impl StoreEntry {
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Something that can populate a [`Store`](super::Store).
pub trait StoreSource: Send + Sync + std::fmt::Debug {
    fn entries(&self) -> Result<Vec<StoreEntry>, StoreError>;
}

/// Converts a TOML value into a raw store value.
///
/// Datetimes become their RFC 3339 text; tables become text-keyed maps.
pub(crate) fn toml_to_value(value: TomlValue) -> Value {
    match value {
        TomlValue::String(s) => Value::String(s),
        TomlValue::Integer(i) => Value::Integer(i),
        TomlValue::Float(f) => Value::Float(f),
        TomlValue::Boolean(b) => Value::Bool(b),
        TomlValue::Datetime(dt) => Value::String(dt.to_string()),
        TomlValue::Array(items) => Value::List(items.into_iter().map(toml_to_value).collect()),
        TomlValue::Table(table) => Value::Map(
            table
                .into_iter()
                .map(|(k, v)| (Key::Text(k), toml_to_value(v)))
                .collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toml_scalars() {
        assert_eq!(toml_to_value(TomlValue::Integer(3)), Value::Integer(3));
        assert_eq!(
            toml_to_value(TomlValue::String("x".into())),
            Value::from("x")
        );
        assert_eq!(toml_to_value(TomlValue::Boolean(true)), Value::Bool(true));
    }

    #[test]
    fn test_toml_table_becomes_map() {
        let table: toml::Table = toml::from_str("a = 1\nb = [\"x\"]").unwrap();
        let value = toml_to_value(TomlValue::Table(table));
        let map = value.as_map().unwrap();
        assert_eq!(map[&Key::Text("a".into())], Value::Integer(1));
        assert_eq!(map[&Key::Text("b".into())], Value::from(vec!["x"]));
    }
}
