//! The cast protocol and the registry dispatching type references.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::trace;

use super::detail::{CastFailure, CastResult, Detail};
use super::error::TypeError;
use super::reference::{Options, TypeRef};
use super::value::Value;
use super::{base64, boolean, csv, email, enumeration, float, integer, json, string, term, url};

/// Deepest chain of nested type references a cast may follow.
pub const MAX_NESTING: usize = 8;

/// What a type implementation returns for one raw value.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Ok(Value),
    /// Rejected without further detail.
    Fail,
    Err(Vec<Detail>),
}

impl Outcome {
    pub fn parsing(parts: Vec<Detail>) -> Self {
        Outcome::Err(vec![Detail::Parsing(parts)])
    }

    pub fn validation(parts: Vec<Detail>) -> Self {
        Outcome::Err(vec![Detail::Validation(parts)])
    }

    /// Attaches the raw value and type reference to a failure.
    pub fn into_result(self, raw: &Value, type_ref: &TypeRef) -> CastResult {
        match self {
            Outcome::Ok(value) => Ok(value),
            Outcome::Fail => Err(CastFailure::new(raw.clone(), type_ref.clone(), Vec::new())),
            Outcome::Err(details) => Err(CastFailure::new(raw.clone(), type_ref.clone(), details)),
        }
    }
}

/// A casting implementation.
///
/// Implementations parse their own options. Malformed options are reported
/// as [`TypeError`], never as a cast failure.
pub trait Cast: Send + Sync + fmt::Debug {
    /// Checks options without casting anything.
    fn validate(&self, _options: &Options, _caster: &Caster<'_>) -> Result<(), TypeError> {
        Ok(())
    }

    fn cast(&self, raw: &Value, options: &Options, caster: &Caster<'_>)
        -> Result<Outcome, TypeError>;
}

/// Dispatches type references through a [`Registry`], tracking how deep
/// nested types (CSV of base64 of ...) have recursed.
#[derive(Debug, Clone, Copy)]
pub struct Caster<'a> {
    registry: &'a Registry,
    depth: usize,
}

impl<'a> Caster<'a> {
    pub fn cast(&self, raw: &Value, type_ref: &TypeRef) -> Result<CastResult, TypeError> {
        let imp = self.registry.lookup(type_ref.id())?;
        let inner = self.descend()?;
        let outcome = imp.cast(raw, type_ref.options(), &inner)?;
        trace!(type_id = type_ref.id(), ok = matches!(outcome, Outcome::Ok(_)), "cast");
        Ok(outcome.into_result(raw, type_ref))
    }

    pub fn validate(&self, type_ref: &TypeRef) -> Result<(), TypeError> {
        let imp = self.registry.lookup(type_ref.id())?;
        imp.validate(type_ref.options(), &self.descend()?)
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    fn descend(&self) -> Result<Caster<'a>, TypeError> {
        if self.depth >= MAX_NESTING {
            return Err(TypeError::NestingTooDeep { limit: MAX_NESTING });
        }
        Ok(Caster {
            registry: self.registry,
            depth: self.depth + 1,
        })
    }
}

/// Type implementations keyed by identifier.
///
/// [`Registry::new`] comes loaded with the built-in types; custom types are
/// added with [`Registry::register`] and dispatched identically.
#[derive(Debug, Clone)]
pub struct Registry {
    types: HashMap<String, Arc<dyn Cast>>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register(boolean::ID, boolean::Boolean);
        registry.register(integer::ID, integer::Integer);
        registry.register(float::ID, float::Float);
        registry.register(string::ID, string::Text);
        registry.register(enumeration::ID, enumeration::Enumeration);
        registry.register(email::ID, email::Email);
        registry.register(url::ID, url::Url);
        registry.register(csv::ID, csv::Csv);
        registry.register(json::ID, json::Json);
        registry.register(base64::ID, base64::Base64);
        registry.register(term::ID, term::Term);
        registry
    }

    pub fn empty() -> Self {
        Self {
            types: HashMap::new(),
        }
    }

    /// Registers `imp` under `id`, replacing any previous implementation.
    pub fn register(&mut self, id: impl Into<String>, imp: impl Cast + 'static) {
        self.types.insert(id.into(), Arc::new(imp));
    }

    pub fn contains(&self, id: &str) -> bool {
        self.types.contains_key(id)
    }

    pub fn caster(&self) -> Caster<'_> {
        Caster {
            registry: self,
            depth: 0,
        }
    }

    /// Casts `raw` through `type_ref`.
    pub fn cast(&self, raw: &Value, type_ref: &TypeRef) -> Result<CastResult, TypeError> {
        self.caster().cast(raw, type_ref)
    }

    /// Checks that `type_ref` names a known type with acceptable options.
    pub fn validate(&self, type_ref: &TypeRef) -> Result<(), TypeError> {
        self.caster().validate(type_ref)
    }

    fn lookup(&self, id: &str) -> Result<&Arc<dyn Cast>, TypeError> {
        self.types
            .get(id)
            .ok_or_else(|| TypeError::UnknownType(id.to_string()))
    }
}
