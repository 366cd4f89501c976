//! Declarative variable specifications.

use std::fmt;
use std::sync::Arc;

use crate::context::Context;
use crate::types::{TypeRef, Value};

/// Computes a default from the context; `None` declines.
pub type LazyDefault = Arc<dyn Fn(&Context) -> Option<Value> + Send + Sync>;

/// Computes the groups a variable is mandatory in.
pub type RequiredFn = Arc<dyn Fn(&Context) -> Vec<String> + Send + Sync>;

/// Where a variable is mandatory.
#[derive(Clone)]
pub enum Required {
    Groups(Vec<String>),
    Dynamic(RequiredFn),
}

impl fmt::Debug for Required {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Required::Groups(groups) => f.debug_tuple("Groups").field(groups).finish(),
            Required::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

/// Specification of one variable.
///
/// Built freely; invariants are checked when the variable is passed to
/// [`Schema::define`](super::Schema::define).
///
/// ```
/// use envschema::{TypeRef, Variable};
///
/// let pool = Variable::new(TypeRef::new("integer").with("scope", "positive"))
///     .group("database")
///     .doc("Connection pool size")
///     .default(10)
///     .alias("DB_POOL");
/// assert_eq!(pool.aliases(), ["DB_POOL"]);
/// ```
#[derive(Clone)]
#[must_use]
pub struct Variable {
    pub(crate) type_ref: TypeRef,
    pub(crate) groups: Vec<String>,
    pub(crate) doc: Option<String>,
    pub(crate) default: Option<Value>,
    pub(crate) default_lazy: Option<LazyDefault>,
    pub(crate) required: Option<Required>,
    pub(crate) contexts: Vec<(String, Vec<String>)>,
    pub(crate) aliases: Vec<String>,
}

impl Variable {
    pub fn new(type_ref: impl Into<TypeRef>) -> Self {
        Self {
            type_ref: type_ref.into(),
            groups: Vec::new(),
            doc: None,
            default: None,
            default_lazy: None,
            required: None,
            contexts: Vec::new(),
            aliases: Vec::new(),
        }
    }

    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.groups.push(group.into());
        self
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn default_lazy<F>(mut self, f: F) -> Self
    where
        F: Fn(&Context) -> Option<Value> + Send + Sync + 'static,
    {
        self.default_lazy = Some(Arc::new(f));
        self
    }

    /// Marks the variable mandatory in the listed groups.
    pub fn required_in<I, S>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required = Some(Required::Groups(groups.into_iter().map(Into::into).collect()));
        self
    }

    /// Marks the variable mandatory in the groups `f` returns for a context.
    pub fn required_when<F>(mut self, f: F) -> Self
    where
        F: Fn(&Context) -> Vec<String> + Send + Sync + 'static,
    {
        self.required = Some(Required::Dynamic(Arc::new(f)));
        self
    }

    /// Restricts visibility to contexts whose `dimension` is one of `values`.
    pub fn context<I, S>(mut self, dimension: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.contexts.push((
            dimension.into(),
            values.into_iter().map(Into::into).collect(),
        ));
        self
    }

    /// Adds an alternate store key, tried in declaration order.
    pub fn alias(mut self, name: impl Into<String>) -> Self {
        self.aliases.push(name.into());
        self
    }

    pub fn type_ref(&self) -> &TypeRef {
        &self.type_ref
    }

    pub fn groups(&self) -> &[String] {
        &self.groups
    }

    pub fn documentation(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn context_filters(&self) -> &[(String, Vec<String>)] {
        &self.contexts
    }

    pub fn has_default(&self) -> bool {
        self.default.is_some() || self.default_lazy.is_some()
    }

    /// The raw default for `ctx`, before casting.
    pub fn raw_default(&self, ctx: &Context) -> Option<Value> {
        match (&self.default, &self.default_lazy) {
            (Some(value), _) => Some(value.clone()),
            (None, Some(lazy)) => lazy(ctx),
            (None, None) => None,
        }
    }

    pub fn is_required_in(&self, group: &str, ctx: &Context) -> bool {
        match &self.required {
            None => false,
            Some(Required::Groups(groups)) => groups.iter().any(|g| g == group),
            Some(Required::Dynamic(f)) => f(ctx).iter().any(|g| g == group),
        }
    }

    /// Every filter dimension must be present in `ctx` with an allowed value.
    pub fn visible_in(&self, ctx: &Context) -> bool {
        self.contexts.iter().all(|(dimension, allowed)| {
            ctx.get(dimension)
                .is_some_and(|value| allowed.iter().any(|a| a == value))
        })
    }
}

impl fmt::Debug for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Variable")
            .field("type_ref", &self.type_ref)
            .field("groups", &self.groups)
            .field("doc", &self.doc)
            .field("default", &self.default)
            .field("default_lazy", &self.default_lazy.as_ref().map(|_| ".."))
            .field("required", &self.required)
            .field("contexts", &self.contexts)
            .field("aliases", &self.aliases)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_required_groups() {
        let var = Variable::new("string").group("db").required_in(["db"]);
        let ctx = Context::new();
        assert!(var.is_required_in("db", &ctx));
        assert!(!var.is_required_in("cache", &ctx));
    }

    #[test]
    fn test_dynamic_required_groups() {
        let var = Variable::new("string").group("db").required_when(|ctx| {
            if ctx.get("env") == Some("prod") {
                vec!["db".to_string()]
            } else {
                Vec::new()
            }
        });
        assert!(var.is_required_in("db", &Context::new().with("env", "prod")));
        assert!(!var.is_required_in("db", &Context::new().with("env", "dev")));
    }

    #[test]
    fn test_visibility_requires_every_dimension() {
        let var = Variable::new("string")
            .group("db")
            .context("env", ["prod", "staging"])
            .context("region", ["eu"]);
        assert!(var.visible_in(&Context::new().with("env", "prod").with("region", "eu")));
        assert!(!var.visible_in(&Context::new().with("env", "prod").with("region", "us")));
        assert!(!var.visible_in(&Context::new().with("env", "prod")));
    }

    #[test]
    fn test_lazy_default_may_decline() {
        let var = Variable::new("string").group("db").default_lazy(|ctx| {
            ctx.get("env").map(|env| Value::from(format!("{env}.example.com")))
        });
        assert_eq!(
            var.raw_default(&Context::new().with("env", "dev")),
            Some(Value::from("dev.example.com"))
        );
        assert_eq!(var.raw_default(&Context::new()), None);
    }
}
