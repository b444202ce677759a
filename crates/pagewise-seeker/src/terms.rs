//! Query-string compilation.
//!
//! [`compile`] turns `"name:acme* tags:beta"` into a [`CompiledQuery`]. Patterns
//! are built here, once, so evaluation never touches the regex compiler.

use crate::error::{Result, SeekerError};
use crate::matcher::{Matcher, QueryTerm};
use crate::query::CompiledQuery;

/// Wildcard marker: any run of characters, including none.
pub const WILDCARD: char = '*';

/// Field that is always dropped from a query.
///
/// The resource type is fixed by the collection being searched.
pub const DROPPED_FIELD: &str = "type";

/// Field that is always matched fuzzily.
pub const FUZZY_FIELD: &str = "name";

const SEPARATOR: char = ':';

/// Compiles a free-text query of space separated `field:value` tokens.
///
/// # Errors
///
/// Returns [`SeekerError::MalformedQueryTerm`] for a token without a `:` or
/// with an empty field name.
///
/// # Example
///
/// ```
/// use pagewise_seeker::compile;
///
/// let query = compile("type:organization name:acme tags:beta").unwrap();
/// assert_eq!(query.len(), 2);
/// assert!(query.get("name").unwrap().matcher.is_pattern());
/// assert!(!query.get("tags").unwrap().matcher.is_pattern());
/// assert!(query.get("type").is_none());
/// ```
pub fn compile(query: &str) -> Result<CompiledQuery> {
    let mut compiled = CompiledQuery::new();

    for token in query.split_whitespace() {
        let (field, raw) = split_term(token)?;

        if field == DROPPED_FIELD {
            continue;
        }

        let matcher = if field == FUZZY_FIELD {
            Matcher::wildcard(field, &format!("{WILDCARD}{raw}{WILDCARD}"))?
        } else {
            Matcher::from_raw(field, raw)?
        };

        compiled.insert(QueryTerm::new(field, matcher));
    }

    tracing::trace!(query, terms = compiled.len(), "compiled search query");
    Ok(compiled)
}

fn split_term(token: &str) -> Result<(&str, &str)> {
    match token.split_once(SEPARATOR) {
        Some((field, raw)) if !field.is_empty() => Ok((field, raw)),
        _ => Err(SeekerError::MalformedQueryTerm(token.to_string())),
    }
}
