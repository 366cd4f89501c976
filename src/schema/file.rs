//! Schemas declared in TOML.
//!
//! Each top-level table declares one variable:
//!
//! ```toml
//! [DATABASE_URL]
//! type = "url"
//! groups = ["database"]
//! required = ["database"]
//! aliases = ["DB_URL"]
//!
//! [POOL_SIZE]
//! type = { id = "integer", scope = "positive" }
//! groups = ["database"]
//! default = 10
//!
//! [PEERS]
//! type = { id = "csv", of = { id = "url" } }
//! groups = ["cluster"]
//! contexts = { env = ["prod", "staging"] }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use super::{Rule, Schema, SchemaError, Variable};
use crate::store::toml_to_value;
use crate::types::{OptionValue, Registry, TypeRef, Value};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TypeDef {
    Bare(String),
    Table(toml::Table),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct VariableDef {
    #[serde(rename = "type")]
    type_def: TypeDef,
    #[serde(default)]
    groups: Vec<String>,
    doc: Option<String>,
    default: Option<toml::Value>,
    required: Option<Vec<String>>,
    #[serde(default)]
    aliases: Vec<String>,
    #[serde(default)]
    contexts: BTreeMap<String, Vec<String>>,
}

impl Schema {
    /// Parses and validates a TOML schema document.
    pub fn from_toml_str(registry: &Registry, contents: &str) -> Result<Self, SchemaError> {
        let defs: BTreeMap<String, VariableDef> = toml::from_str(contents)?;
        let mut variables = Vec::with_capacity(defs.len());
        for (name, def) in defs {
            let variable = into_variable(&name, def)?;
            variables.push((name, variable));
        }
        Schema::define(registry, variables)
    }

    /// Loads and validates a TOML schema file.
    pub fn from_file(registry: &Registry, path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let path = path.as_ref();
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(SchemaError::FileNotFound(path.to_path_buf()));
            }
            Err(e) => {
                return Err(SchemaError::ReadError {
                    path: path.to_path_buf(),
                    source: e,
                })
            }
        };
        Self::from_toml_str(registry, &contents).map_err(|e| match e {
            SchemaError::DeserializeError(source) => SchemaError::ParseError {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }
}

fn into_variable(name: &str, def: VariableDef) -> Result<Variable, SchemaError> {
    let type_ref = match def.type_def {
        TypeDef::Bare(id) => TypeRef::new(id),
        TypeDef::Table(table) => type_from_table(table)
            .map_err(|reason| SchemaError::invalid(name, Rule::MalformedType(reason)))?,
    };

    let mut variable = Variable::new(type_ref);
    variable.groups = def.groups;
    variable.doc = def.doc;
    variable.default = def.default.map(toml_to_value);
    variable.aliases = def.aliases;
    variable.contexts = def.contexts.into_iter().collect();
    if let Some(groups) = def.required {
        variable = variable.required_in(groups);
    }
    Ok(variable)
}

fn type_from_table(mut table: toml::Table) -> Result<TypeRef, String> {
    let id = match table.remove("id") {
        Some(toml::Value::String(id)) => id,
        Some(_) => return Err("'id' must be a string".to_string()),
        None => return Err("missing 'id'".to_string()),
    };

    let mut type_ref = TypeRef::new(id);
    for (key, value) in table {
        let option = match value {
            toml::Value::String(s) => OptionValue::Text(s),
            toml::Value::Array(items) => {
                OptionValue::List(items.into_iter().map(toml_to_value).collect::<Vec<Value>>())
            }
            toml::Value::Table(inner) => OptionValue::from(type_from_table(inner)?),
            other => return Err(format!("option '{key}' has unsupported value {other}")),
        };
        type_ref = type_ref.with(key, option);
    }
    Ok(type_ref)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Context;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SCHEMA: &str = r#"
        [DATABASE_URL]
        type = "url"
        groups = ["database"]
        doc = "Primary database"
        required = ["database"]
        aliases = ["DB_URL", "POSTGRES_URL"]

        [POOL_SIZE]
        type = { id = "integer", scope = "positive" }
        groups = ["database"]
        default = 10

        [LOG_LEVEL]
        type = { id = "enum", values = ["debug", "info"] }
        groups = ["logging"]
        default = "info"

        [PEERS]
        type = { id = "csv", of = { id = "integer", scope = "positive" } }
        groups = ["cluster"]
        contexts = { env = ["prod"] }
    "#;

    #[test]
    fn test_loads_schema() {
        let schema = Schema::from_toml_str(&Registry::new(), SCHEMA).unwrap();
        assert_eq!(schema.len(), 4);

        let url = schema.get("DATABASE_URL").unwrap();
        assert_eq!(url.type_ref(), &TypeRef::new("url"));
        assert_eq!(url.aliases(), ["DB_URL", "POSTGRES_URL"]);
        assert_eq!(url.documentation(), Some("Primary database"));
        assert!(url.is_required_in("database", &Context::new()));

        let pool = schema.get("POOL_SIZE").unwrap();
        assert_eq!(
            pool.type_ref(),
            &TypeRef::new("integer").with("scope", "positive")
        );
        assert_eq!(pool.raw_default(&Context::new()), Some(Value::Integer(10)));

        let peers = schema.get("PEERS").unwrap();
        assert_eq!(
            peers.type_ref(),
            &TypeRef::new("csv").with("of", TypeRef::new("integer").with("scope", "positive"))
        );
        assert!(!peers.visible_in(&Context::new().with("env", "dev")));
    }

    #[test]
    fn test_missing_groups_names_variable() {
        let err = Schema::from_toml_str(&Registry::new(), "[HOST]\ntype = \"string\"\n")
            .unwrap_err();
        assert_eq!(err.variable(), Some("HOST"));
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let result = Schema::from_toml_str(
            &Registry::new(),
            "[HOST]\ntype = \"string\"\ngroups = [\"web\"]\ndefualt = \"x\"\n",
        );
        assert!(matches!(result, Err(SchemaError::DeserializeError(_))));
    }

    #[test]
    fn test_type_table_without_id() {
        let err = Schema::from_toml_str(
            &Registry::new(),
            "[HOST]\ntype = { scope = \"positive\" }\ngroups = [\"web\"]\n",
        )
        .unwrap_err();
        assert!(matches!(
            err,
            SchemaError::Invalid {
                rule: Rule::MalformedType(_),
                ..
            }
        ));
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{SCHEMA}").unwrap();

        let schema = Schema::from_file(&Registry::new(), file.path()).unwrap();
        assert!(schema.contains("LOG_LEVEL"));
    }

    #[test]
    fn test_from_file_missing() {
        let result = Schema::from_file(&Registry::new(), "/nonexistent/schema.toml");
        assert!(matches!(result, Err(SchemaError::FileNotFound(_))));
    }

    #[test]
    fn test_from_file_parse_error_carries_path() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[HOST").unwrap();

        let result = Schema::from_file(&Registry::new(), file.path());
        assert!(matches!(result, Err(SchemaError::ParseError { .. })));
    }
}
