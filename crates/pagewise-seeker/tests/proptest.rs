//! Property-based tests for seeker using proptest.

use pagewise_seeker::{compile, CompiledQuery, Matcher, QueryTerm};
use proptest::prelude::*;
use serde_json::{json, Value};

// ============================================================================
// Test helpers
// ============================================================================

fn record(name: &str, tags: &str) -> Value {
    json!({"name": name, "tags": tags})
}

// Strategy to generate records with short lowercase fields
fn record_strategy() -> impl Strategy<Value = Value> {
    ("[a-zA-Z]{1,10}", "[a-z]{1,6}").prop_map(|(name, tags)| record(&name, &tags))
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// Filter should never return more records than the input.
    #[test]
    fn filter_never_grows_collection(
        records in prop::collection::vec(record_strategy(), 0..50),
        tag in "[a-z]{1,6}",
    ) {
        let query = compile(&format!("tags:{tag}")).unwrap();
        prop_assert!(query.filter(&records).len() <= records.len());
    }

    /// Literal terms match exactly the records with an equal field.
    #[test]
    fn literal_matches_only_equal_values(
        records in prop::collection::vec(record_strategy(), 0..50),
        tag in "[a-z]{1,6}",
    ) {
        let query = compile(&format!("tags:{tag}")).unwrap();
        let expected = records.iter().filter(|r| r["tags"] == tag.as_str()).count();
        prop_assert_eq!(query.filter(&records).len(), expected);
    }

    /// Literals are case-sensitive.
    #[test]
    fn literal_is_case_sensitive(tag in "[a-z]{1,6}") {
        let query = compile(&format!("tags:{}", tag.to_uppercase())).unwrap();
        prop_assert!(!query.matches(&record("x", &tag)));
    }

    /// Name terms behave like case-insensitive substring search.
    #[test]
    fn name_is_case_insensitive_substring(name in "[a-zA-Z]{1,12}", start in 0usize..12, len in 1usize..6) {
        let start = start.min(name.len() - 1);
        let end = (start + len).min(name.len());
        let needle = &name[start..end];

        let upper = compile(&format!("name:{}", needle.to_uppercase())).unwrap();
        let lower = compile(&format!("name:{}", needle.to_lowercase())).unwrap();
        let r = record(&name, "t");

        prop_assert!(upper.matches(&r));
        prop_assert!(lower.matches(&r));
    }

    /// Monotonicity: adding a term never increases the result count.
    #[test]
    fn adding_terms_narrows_results(
        records in prop::collection::vec(record_strategy(), 0..50),
        tag in "[a-z]{1,3}",
        name in "[a-z]{1,3}",
    ) {
        let one = compile(&format!("tags:{tag}*")).unwrap();
        let two = compile(&format!("tags:{tag}* name:{name}")).unwrap();
        prop_assert!(two.filter(&records).len() <= one.filter(&records).len());
    }

    /// A repeated field behaves like its last occurrence alone.
    #[test]
    fn repeated_field_equals_last(
        records in prop::collection::vec(record_strategy(), 0..30),
        first in "[a-z]{1,6}",
        last in "[a-z]{1,6}",
    ) {
        let repeated = compile(&format!("tags:{first} tags:{last}")).unwrap();
        let single = compile(&format!("tags:{last}")).unwrap();
        prop_assert_eq!(repeated.filter(&records).len(), single.filter(&records).len());
    }

    /// The type field never affects the outcome.
    #[test]
    fn type_field_is_ignored(records in prop::collection::vec(record_strategy(), 0..30), kind in "[a-z]{1,8}") {
        let with_type = compile(&format!("type:{kind}")).unwrap();
        prop_assert_eq!(with_type.filter(&records).len(), records.len());
    }

    /// An empty query matches everything.
    #[test]
    fn empty_query_matches_all(records in prop::collection::vec(record_strategy(), 0..30)) {
        let query = CompiledQuery::new();
        prop_assert_eq!(query.filter(&records).len(), records.len());
    }

    /// A lone wildcard matches any present value.
    #[test]
    fn lone_wildcard_matches_present_values(tag in "[a-z]{0,6}") {
        let mut query = CompiledQuery::new();
        query.insert(QueryTerm::new("tags", Matcher::wildcard("tags", "*").unwrap()));
        prop_assert!(query.matches(&record("x", &tag)));
        let bare = json!({"name": "x"});
        prop_assert!(!query.matches(&bare));
    }
}
