//! Variable schemas: declaration, validation and context filtering.

mod error;
mod file;
mod variable;

use std::collections::{BTreeMap, HashSet};

pub use error::{Rule, SchemaError};
pub use variable::{LazyDefault, Required, RequiredFn, Variable};

use crate::context::Context;
use crate::types::Registry;

/// A validated set of variable specifications keyed by name.
///
/// ## Example
///
/// ```
/// use envschema::{Registry, Schema, TypeRef, Variable};
///
/// let registry = Registry::new();
/// let schema = Schema::define(&registry, [
///     ("DATABASE_URL", Variable::new("url").group("database").required_in(["database"])),
///     ("POOL_SIZE", Variable::new(TypeRef::new("integer").with("scope", "positive"))
///         .group("database")
///         .default(10)),
/// ])?;
/// assert_eq!(schema.len(), 2);
/// # Ok::<(), envschema::SchemaError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Schema {
    variables: BTreeMap<String, Variable>,
}

impl Schema {
    /// Validates every specification and builds the schema.
    ///
    /// Fails on the first variable breaking a structural rule or naming a
    /// type the registry cannot dispatch with the given options.
    pub fn define<I, S>(registry: &Registry, variables: I) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = (S, Variable)>,
        S: Into<String>,
    {
        let mut defined = BTreeMap::new();
        for (name, variable) in variables {
            let name = name.into();
            check(&name, &variable)?;
            registry
                .validate(&variable.type_ref)
                .map_err(|source| SchemaError::Type {
                    name: name.clone(),
                    source,
                })?;
            defined.insert(name, variable);
        }
        Ok(Self { variables: defined })
    }

    pub fn get(&self, name: &str) -> Option<&Variable> {
        self.variables.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Variables in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Variable)> {
        self.variables.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.variables.keys().map(String::as_str)
    }

    /// The variables visible in `ctx`.
    pub fn for_context(&self, ctx: &Context) -> Schema {
        Schema {
            variables: self
                .variables
                .iter()
                .filter(|(_, v)| v.visible_in(ctx))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        }
    }

    /// Variable names under every group they declare.
    pub fn groups(&self) -> BTreeMap<String, Vec<String>> {
        let mut groups: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (name, variable) in &self.variables {
            for group in &variable.groups {
                groups.entry(group.clone()).or_default().push(name.clone());
            }
        }
        groups
    }
}

fn check(name: &str, variable: &Variable) -> Result<(), SchemaError> {
    let fail = |rule| Err(SchemaError::invalid(name, rule));

    if name.is_empty() {
        return fail(Rule::EmptyName);
    }
    if variable.groups.is_empty() {
        return fail(Rule::MissingGroups);
    }
    if variable.groups.iter().any(String::is_empty) {
        return fail(Rule::EmptyGroup);
    }
    if variable.default.is_some() && variable.default_lazy.is_some() {
        return fail(Rule::DefaultAndLazyDefault);
    }
    if variable.default.is_some() && variable.required.is_some() {
        return fail(Rule::DefaultAndRequired);
    }

    let mut seen = HashSet::new();
    for alias in &variable.aliases {
        if alias.is_empty() {
            return fail(Rule::EmptyAlias);
        }
        if alias == name {
            return fail(Rule::SelfAlias(alias.clone()));
        }
        if !seen.insert(alias.as_str()) {
            return fail(Rule::DuplicateAlias(alias.clone()));
        }
    }

    if let Some((dimension, _)) = variable
        .contexts
        .iter()
        .find(|(_, allowed)| allowed.is_empty())
    {
        return fail(Rule::EmptyContextFilter(dimension.clone()));
    }
    Ok(())
}
