//! Typed resolution of configuration variables against a declarative schema.
//!
//! A [`Schema`] declares variables with a [`TypeRef`], groups, defaults,
//! aliases and context filters. A [`Resolver`] looks each name up in a
//! [`Store`] snapshot, casts the raw value through the [`Registry`], falls
//! back to aliases and defaults, and returns an [`Invocation`] recording the
//! value, where it came from and every cast failure along the way.
//!
//! ```
//! use envschema::{Context, Registry, Resolver, Schema, Store, TypeRef, Variable};
//!
//! let registry = Registry::new();
//! let schema = Schema::define(&registry, [
//!     ("WORKERS", Variable::new(TypeRef::new("csv").with("of", "integer"))
//!         .group("jobs")
//!         .alias("JOB_WORKERS")),
//! ])?;
//!
//! let store: Store = [("JOB_WORKERS", "1,2,q")].into_iter().collect();
//! let ctx = Context::new();
//! let invocation = Resolver::new(&registry, &schema, &ctx).resolve("WORKERS", &store)?;
//!
//! assert!(invocation.is_empty());
//! assert_eq!(invocation.errors[0].failure.nested().len(), 1);
//! # Ok::<(), envschema::Error>(())
//! ```

pub mod context;
mod error;
pub mod invocation;
pub mod schema;
pub mod store;
pub mod types;

pub use context::Context;
pub use error::Error;
pub use invocation::{Attempt, Invocation, Origin, Presence, Resolved, Resolver, Source};
pub use schema::{Rule, Schema, SchemaError, Variable};
pub use store::{Store, StoreError};
pub use types::{Cast, CastFailure, CastResult, Detail, Outcome, Registry, TypeError, TypeRef, Value};
