//! Compiled queries and their evaluation.
//!
//! A [`CompiledQuery`] holds at most one [`QueryTerm`] per field. Evaluation is
//! a logical AND across the terms, one lookup and one comparison per term.

use crate::matcher::QueryTerm;
use crate::value::FieldSource;

/// A set of compiled terms, unique per field.
///
/// # Example
///
/// ```
/// use pagewise_seeker::{CompiledQuery, Matcher, QueryTerm};
/// use serde_json::json;
///
/// let mut query = CompiledQuery::new();
/// query.insert(QueryTerm::new("tags", Matcher::literal("beta")));
///
/// assert!(query.matches(&json!({"tags": "beta"})));
/// assert!(!query.matches(&json!({"tags": "gamma"})));
/// ```
#[derive(Debug, Clone, Default)]
pub struct CompiledQuery {
    terms: Vec<QueryTerm>,
}

impl CompiledQuery {
    /// Creates an empty query. An empty query matches every record.
    pub fn new() -> Self {
        CompiledQuery::default()
    }

    /// Adds a term, replacing any earlier term on the same field.
    pub fn insert(&mut self, term: QueryTerm) {
        match self.terms.iter_mut().find(|t| t.field == term.field) {
            Some(existing) => *existing = term,
            None => self.terms.push(term),
        }
    }

    /// Returns the term for `field`, if any.
    pub fn get(&self, field: &str) -> Option<&QueryTerm> {
        self.terms.iter().find(|t| t.field == field)
    }

    /// Returns the terms in first-insertion order.
    pub fn terms(&self) -> &[QueryTerm] {
        &self.terms
    }

    /// Number of terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Returns `true` if this query has no terms (matches everything).
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    // ========================================================================
    // Execution
    // ========================================================================

    /// Tests if a single record matches every term.
    pub fn matches<S: FieldSource + ?Sized>(&self, record: &S) -> bool {
        self.terms.iter().all(|term| term.matches(record))
    }

    /// Filters a slice, returning references to matching records in order.
    pub fn filter<'a, S: FieldSource>(&self, records: &'a [S]) -> Vec<&'a S> {
        records.iter().filter(|r| self.matches(*r)).collect()
    }

    /// Filters and clones matching records.
    pub fn filter_cloned<S: FieldSource + Clone>(&self, records: &[S]) -> Vec<S> {
        self.filter(records).into_iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compile;
    use crate::matcher::Matcher;
    use serde_json::{json, Value};

    fn organizations() -> Vec<Value> {
        vec![
            json!({"id": 1, "name": "Acme Corp", "tags": "beta"}),
            json!({"id": 2, "name": "Other", "tags": "beta"}),
            json!({"id": 3, "name": "Acme Labs", "tags": "gamma"}),
        ]
    }

    #[test]
    fn empty_query_matches_everything() {
        let query = CompiledQuery::new();
        let records = organizations();
        assert_eq!(query.filter(&records).len(), 3);
        assert!(query.matches(&json!({})));
    }

    #[test]
    fn fuzzy_name_and_literal_tag() {
        let query = compile("name:acme* tags:beta").unwrap();
        let records = organizations();
        let results = query.filter(&records);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0]["id"], 1);
    }

    #[test]
    fn name_is_substring_without_wildcard() {
        let query = compile("name:LABS").unwrap();
        let records = organizations();
        let ids: Vec<_> = query.filter(&records).iter().map(|r| r["id"].clone()).collect();
        assert_eq!(ids, vec![json!(3)]);
    }

    #[test]
    fn literal_terms_need_exact_equality() {
        let query = compile("tags:Beta").unwrap();
        assert!(query.filter(&organizations()).is_empty());

        let query = compile("tags:beta id:2").unwrap();
        let records = organizations();
        let results = query.filter(&records);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0]["name"], "Other");
    }

    #[test]
    fn records_missing_a_field_are_filtered_out() {
        let records = vec![json!({"name": "Acme"}), json!({"name": "Acme", "tags": "beta"})];
        let query = compile("tags:beta").unwrap();
        assert_eq!(query.filter(&records).len(), 1);

        let query = compile("tags:b*").unwrap();
        assert_eq!(query.filter(&records).len(), 1);
    }

    #[test]
    fn filter_preserves_input_order() {
        let query = compile("tags:beta").unwrap();
        let ids: Vec<_> = query
            .filter_cloned(&organizations())
            .into_iter()
            .map(|r| r["id"].as_u64().unwrap())
            .collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn insert_replaces_same_field() {
        let mut query = CompiledQuery::new();
        query.insert(QueryTerm::new("tags", Matcher::literal("alpha")));
        query.insert(QueryTerm::new("id", Matcher::literal("1")));
        query.insert(QueryTerm::new("tags", Matcher::literal("beta")));

        assert_eq!(query.len(), 2);
        assert_eq!(query.terms()[0].field, "tags");
        assert_eq!(query.terms()[0].matcher.as_str(), "beta");
        assert_eq!(query.filter(&organizations()).len(), 1);
    }
}
