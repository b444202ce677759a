//! Matchers and compiled query terms.
//!
//! A [`QueryTerm`] pairs a field name with a [`Matcher`]: either a literal
//! string compared for exact equality, or a pattern compiled from a wildcard
//! value.

use regex::{Regex, RegexBuilder};

use crate::error::{Result, SeekerError};
use crate::terms::WILDCARD;
use crate::value::{natural_string, FieldSource};

/// How a term compares against a field's string form.
#[derive(Debug, Clone)]
pub enum Matcher {
    /// Exact, case-sensitive equality.
    Literal(String),
    /// Case-insensitive, unanchored pattern search.
    Pattern(Regex),
}

impl Matcher {
    /// Creates a literal matcher.
    pub fn literal(value: impl Into<String>) -> Self {
        Matcher::Literal(value.into())
    }

    /// Compiles a wildcard value into a pattern matcher.
    ///
    /// Every `*` becomes `.*`; every other character is matched literally.
    pub fn wildcard(field: &str, raw: &str) -> Result<Self> {
        let pattern = raw
            .split(WILDCARD)
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join(".*");

        RegexBuilder::new(&pattern)
            .case_insensitive(true)
            .build()
            .map(Matcher::Pattern)
            .map_err(|source| SeekerError::InvalidPattern {
                field: field.to_string(),
                source,
            })
    }

    /// Builds the matcher for a raw value: a pattern if it carries a wildcard,
    /// a literal otherwise.
    pub fn from_raw(field: &str, raw: &str) -> Result<Self> {
        if raw.contains(WILDCARD) {
            Matcher::wildcard(field, raw)
        } else {
            Ok(Matcher::literal(raw))
        }
    }

    /// Returns `true` for pattern matchers.
    pub fn is_pattern(&self) -> bool {
        matches!(self, Matcher::Pattern(_))
    }

    /// The literal value or the pattern source.
    pub fn as_str(&self) -> &str {
        match self {
            Matcher::Literal(s) => s,
            Matcher::Pattern(re) => re.as_str(),
        }
    }

    /// Tests a field's string form.
    ///
    /// An absent value compares as `""` for literals and never matches a
    /// pattern.
    pub fn matches(&self, value: Option<&str>) -> bool {
        match self {
            Matcher::Literal(expected) => value.unwrap_or("") == expected,
            Matcher::Pattern(re) => value.is_some_and(|v| re.is_match(v)),
        }
    }
}

/// A single compiled `field:value` term.
#[derive(Debug, Clone)]
pub struct QueryTerm {
    /// The record field this term inspects.
    pub field: String,
    /// How the field's value is compared.
    pub matcher: Matcher,
}

impl QueryTerm {
    /// Creates a new term.
    pub fn new(field: impl Into<String>, matcher: Matcher) -> Self {
        QueryTerm {
            field: field.into(),
            matcher,
        }
    }

    /// Evaluates this term against a record.
    pub fn matches<S: FieldSource + ?Sized>(&self, record: &S) -> bool {
        let value = natural_string(record.field_value(&self.field));
        self.matcher.matches(value.as_deref())
    }
}
