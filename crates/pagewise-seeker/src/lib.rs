//! Seeker - search-query emulation for in-memory resource collections.
//!
//! Remote search endpoints accept a free-text query made of space separated
//! `field:value` tokens. Seeker compiles such a query once and evaluates it
//! against records held in memory, so that a mock service can answer search
//! requests the way the real backend would.
//!
//! # Quick Start
//!
//! ```rust
//! use pagewise_seeker::compile;
//! use serde_json::json;
//!
//! let records = vec![
//!     json!({"name": "Acme Corp", "tags": "beta"}),
//!     json!({"name": "Other", "tags": "beta"}),
//!     json!({"name": "Acme Labs", "tags": "gamma"}),
//! ];
//!
//! let query = compile("name:acme* tags:beta").unwrap();
//! let results = query.filter(&records);
//! assert_eq!(results.len(), 1);
//! assert_eq!(results[0]["name"], "Acme Corp");
//! ```
//!
//! # Query Semantics
//!
//! ```text
//! match = every term matches (an empty query matches everything)
//! ```
//!
//! - **Tokens**: split on whitespace, then on the first `:`. A token with no
//!   `:` is a [`SeekerError::MalformedQueryTerm`].
//! - **`type`**: always dropped, the collection already fixes the type.
//! - **`name`**: always fuzzy, compiled as `*value*`.
//! - **Wildcards**: a value containing `*` becomes a case-insensitive pattern
//!   where `*` is any run of characters. No other anchoring is added.
//! - **Literals**: anything else is compared for exact, case-sensitive
//!   equality against the field's string form.
//! - **Repeats**: a repeated field replaces the earlier term.
//!
//! | Field value | Literal matcher | Pattern matcher |
//! |-------------|-----------------|-----------------|
//! | string | exact equality | regex search |
//! | number / bool | `to_string()` equality | regex search on `to_string()` |
//! | absent / null | equals `""` only | never matches |

mod error;
mod matcher;
mod query;
mod terms;
mod value;

pub use error::{Result, SeekerError};
pub use matcher::{Matcher, QueryTerm};
pub use query::CompiledQuery;
pub use terms::{compile, DROPPED_FIELD, FUZZY_FIELD, WILDCARD};
pub use value::{natural_string, FieldSource};
