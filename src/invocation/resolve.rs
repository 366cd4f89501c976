//! The resolution algorithm.
//!
//! For a declared variable:
//!
//! 1. the variable's own name is looked up in the store and cast;
//! 2. only when that name is absent, aliases are tried in order and the
//!    first one that casts wins;
//! 3. otherwise the default (literal or lazy) is cast, and a default that
//!    fails to cast still leaves the value empty.
//!
//! Cast failures never escape as errors; they are recorded on the
//! [`Invocation`] in probe order. Only configuration mistakes in type
//! references surface as [`TypeError`].

use std::collections::BTreeMap;

use tracing::{debug, trace};

use super::{Invocation, Origin, Presence, Resolved, Source};
use crate::context::Context;
use crate::schema::{Schema, Variable};
use crate::store::Store;
use crate::types::{Registry, TypeError};

/// Resolves variable names against one context.
///
/// The schema is filtered for the context once, at construction.
///
/// ## Example
///
/// ```
/// use envschema::{Context, Registry, Resolver, Schema, Store, Variable};
///
/// let registry = Registry::new();
/// let schema = Schema::define(&registry, [
///     ("PORT", Variable::new("integer").group("web").default(8080)),
/// ])?;
/// let ctx = Context::new().with("env", "dev");
/// let resolver = Resolver::new(&registry, &schema, &ctx);
///
/// let store: Store = [("PORT", "not-a-port")].into_iter().collect();
/// let invocation = resolver.resolve("PORT", &store)?;
/// assert_eq!(invocation.value().and_then(|v| v.as_i64()), Some(8080));
/// assert_eq!(invocation.errors.len(), 1);
/// # Ok::<(), envschema::Error>(())
/// ```
#[derive(Debug)]
pub struct Resolver<'a> {
    registry: &'a Registry,
    context: &'a Context,
    schema: Schema,
}

impl<'a> Resolver<'a> {
    pub fn new(registry: &'a Registry, schema: &Schema, context: &'a Context) -> Self {
        Self {
            registry,
            context,
            schema: schema.for_context(context),
        }
    }

    /// The schema as visible in this resolver's context.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn context(&self) -> &Context {
        self.context
    }

    /// Resolves one name against a store snapshot.
    pub fn resolve(&self, name: &str, store: &Store) -> Result<Invocation, TypeError> {
        let Some(variable) = self.schema.get(name) else {
            trace!(variable = name, "not declared in schema");
            return Ok(Invocation::undeclared(name, store.get(name)));
        };

        let mut invocation = Invocation::new(name);

        if let Some(raw) = store.get(name) {
            invocation.store = Presence::Found;
            match self.registry.cast(raw, &variable.type_ref)? {
                Ok(value) => {
                    trace!(variable = name, "resolved from store");
                    invocation.resolved = Resolved::Store {
                        value,
                        origin: Origin::Original,
                    };
                    return Ok(invocation);
                }
                Err(failure) => {
                    debug!(variable = name, %failure, "store value rejected");
                    invocation.record(Source::Store(Origin::Original), failure);
                }
            }
        } else {
            for alias in &variable.aliases {
                let Some(raw) = store.get(alias) else {
                    trace!(variable = name, alias = alias.as_str(), "alias absent");
                    continue;
                };
                invocation.store = Presence::Found;
                match self.registry.cast(raw, &variable.type_ref)? {
                    Ok(value) => {
                        trace!(variable = name, alias = alias.as_str(), "resolved from alias");
                        invocation.resolved = Resolved::Store {
                            value,
                            origin: Origin::Alias(alias.clone()),
                        };
                        return Ok(invocation);
                    }
                    Err(failure) => {
                        debug!(variable = name, alias = alias.as_str(), %failure, "alias value rejected");
                        invocation.record(Source::Store(Origin::Alias(alias.clone())), failure);
                    }
                }
            }
        }

        self.fall_back(variable, invocation)
    }

    fn fall_back(
        &self,
        variable: &Variable,
        mut invocation: Invocation,
    ) -> Result<Invocation, TypeError> {
        let Some(raw) = variable.raw_default(self.context) else {
            trace!(variable = invocation.name.as_str(), "no default");
            invocation.resolved = Resolved::System;
            return Ok(invocation);
        };

        match self.registry.cast(&raw, &variable.type_ref)? {
            Ok(value) => {
                debug!(variable = invocation.name.as_str(), "using schema default");
                invocation.resolved = Resolved::Schema(value);
            }
            Err(failure) => {
                debug!(variable = invocation.name.as_str(), %failure, "default rejected");
                invocation.record(Source::Default, failure);
                invocation.resolved = Resolved::System;
            }
        }
        Ok(invocation)
    }

    /// Resolves every visible variable, in name order.
    pub fn resolve_all(&self, store: &Store) -> Result<BTreeMap<String, Invocation>, TypeError> {
        self.schema
            .names()
            .map(|name| Ok((name.to_string(), self.resolve(name, store)?)))
            .collect()
    }

    /// Variables required in `group` whose invocation ended empty.
    ///
    /// Variables without an invocation in `invocations` count as empty.
    pub fn missing_required<'i>(
        &'i self,
        group: &str,
        invocations: &BTreeMap<String, Invocation>,
    ) -> Vec<&'i str> {
        self.schema
            .iter()
            .filter(|(_, variable)| variable.is_required_in(group, self.context))
            .filter(|(name, _)| invocations.get(*name).map_or(true, Invocation::is_empty))
            .map(|(name, _)| name)
            .collect()
    }
}
