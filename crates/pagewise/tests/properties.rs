//! Property tests for paging over the mock service.

use std::sync::Arc;

use pagewise::resources::ORGANIZATIONS;
use pagewise::{Attributes, Client, Config, Scope};
use pagewise_mock::MockService;
use proptest::prelude::*;
use serde_json::Value;

fn client_with(records: usize, per_page: usize) -> (Arc<MockService>, Client) {
    let config = Config::default().with_per_page(per_page);
    let service = MockService::new(config.clone()).with(&ORGANIZATIONS, "organizations");
    for i in 0..records {
        service
            .store()
            .insert("organizations", Attributes::from([("name", format!("org {i}"))]));
    }
    let service = Arc::new(service);
    (service.clone(), Client::new(service, config))
}

proptest! {
    #[test]
    fn entries_cover_every_record_once_in_order(records in 0usize..40, per_page in 1usize..8) {
        let (_, client) = client_with(records, per_page);
        let mut organizations = client.collection(&ORGANIZATIONS);
        organizations.all(Attributes::new()).unwrap();

        let ids: Vec<u64> = organizations
            .all_entries()
            .unwrap()
            .iter()
            .filter_map(|r| r.id().and_then(Value::as_u64))
            .collect();
        let expected: Vec<u64> = (1..=records as u64).collect();
        prop_assert_eq!(ids, expected);
    }

    #[test]
    fn page_count_is_ceiling(records in 1usize..40, per_page in 1usize..8) {
        let (service, client) = client_with(records, per_page);
        let mut organizations = client.collection(&ORGANIZATIONS);
        organizations.all(Attributes::new()).unwrap();

        let pages: Vec<usize> = organizations.each_page().map(|p| p.unwrap().len()).collect();
        prop_assert_eq!(pages.len(), records.div_ceil(per_page));
        prop_assert!(pages.iter().all(|len| *len >= 1 && *len <= per_page));
        prop_assert_eq!(service.requests().len(), pages.len());
    }

    #[test]
    fn scope_always_wins(scoped in 0i64..100, requested in 0i64..100) {
        let scope = Scope::root().with("organization_id", scoped);
        let applied = scope.applied_to(Attributes::from([("organization_id", requested)]));
        prop_assert_eq!(applied.get("organization_id"), Some(&Value::from(scoped)));
    }
}
