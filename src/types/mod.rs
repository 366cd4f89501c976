//! The cast protocol and the built-in types.
//!
//! Every type implements [`Cast`]; the [`Registry`] dispatches a
//! [`TypeRef`] to its implementation and normalizes the [`Outcome`] into a
//! [`CastResult`] carrying the raw value and type reference on failure.
//!
//! | id        | options                          |
//! |-----------|----------------------------------|
//! | `boolean` |                                  |
//! | `integer` | `scope = "positive"`             |
//! | `float`   |                                  |
//! | `string`  |                                  |
//! | `enum`    | `values` (required list)         |
//! | `email`   |                                  |
//! | `url`     |                                  |
//! | `csv`     | `of` (type, default `string`)    |
//! | `json`    | `keys = strings\|atoms\|atoms!`  |
//! | `base64`  | `of` (type, default `string`)    |
//! | `term`    |                                  |

pub mod base64;
pub mod boolean;
pub mod csv;
mod detail;
pub mod email;
pub mod enumeration;
mod error;
pub mod float;
pub mod integer;
pub mod json;
mod reference;
mod registry;
pub mod string;
mod symbol;
pub mod term;
pub mod url;
mod value;

pub use detail::{CastFailure, CastResult, Detail};
pub use error::TypeError;
pub use reference::{OptionValue, Options, TypeRef};
pub use registry::{Cast, Caster, Outcome, Registry, MAX_NESTING};
pub use symbol::Symbol;
pub use value::{Key, Value};
