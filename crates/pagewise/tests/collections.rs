//! Collection scenarios against the in-memory mock service.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use pagewise::resources::{CATEGORIES, MEMBERSHIPS, ORGANIZATIONS, SECTIONS};
use pagewise::{Attributes, Client, Collection, Config, Error, Record, Scope, Transport, TransportError};
use pagewise_mock::MockService;
use serde_json::{json, Value};

fn setup(per_page: usize) -> (Arc<MockService>, Client) {
    let config = Config::default().with_per_page(per_page);
    let service = MockService::new(config.clone())
        .with(&ORGANIZATIONS, "organizations")
        .with(&MEMBERSHIPS, "memberships")
        .with(&CATEGORIES, "categories")
        .with(&SECTIONS, "sections");
    let service = Arc::new(service);
    (service.clone(), Client::new(service, config))
}

fn seed_organizations(service: &MockService, names: &[&str]) {
    for name in names {
        service
            .store()
            .insert("organizations", Attributes::from([("name", *name)]));
    }
}

/// Forwards to the mock, failing the `fail_on`-th request (1-based).
struct FailOn {
    inner: Arc<MockService>,
    fail_on: usize,
    calls: AtomicUsize,
}

impl Transport for FailOn {
    fn request(&self, operation: &str, params: &Attributes) -> Result<Attributes, TransportError> {
        if self.calls.fetch_add(1, Ordering::SeqCst) + 1 == self.fail_on {
            return Err(TransportError::Failure("boom".into()));
        }
        self.inner.request(operation, params)
    }
}

fn failing_client(service: &Arc<MockService>, fail_on: usize) -> Client {
    let transport = FailOn {
        inner: Arc::clone(service),
        fail_on,
        calls: AtomicUsize::new(0),
    };
    Client::new(transport, Config::default().with_per_page(2))
}

fn ids(records: &[Record]) -> Vec<u64> {
    records.iter().filter_map(|r| r.id().and_then(Value::as_u64)).collect()
}

fn first_page(client: &Client) -> Collection {
    let mut organizations = client.collection(&ORGANIZATIONS);
    organizations.all(Attributes::new()).unwrap();
    organizations
}

#[test]
fn all_entries_walks_every_page_in_order() {
    let (service, client) = setup(2);
    seed_organizations(&service, &["a", "b", "c", "d", "e"]);

    let organizations = first_page(&client);
    assert_eq!(organizations.len(), 2);
    assert_eq!(organizations.count(), Some(5));

    let entries = organizations.all_entries().unwrap();
    assert_eq!(ids(&entries), [1, 2, 3, 4, 5]);
    assert_eq!(
        service.requests(),
        ["get_organizations", "get_organizations", "get_organizations"]
    );
}

#[test]
fn each_page_is_restartable() {
    let (service, client) = setup(2);
    seed_organizations(&service, &["a", "b", "c", "d", "e"]);
    let organizations = first_page(&client);

    let walk = |c: &Collection| -> Vec<Vec<u64>> {
        c.each_page()
            .map(|page| ids(page.unwrap().records()))
            .collect()
    };

    let first = walk(&organizations);
    let second = walk(&organizations);
    assert_eq!(first, [vec![1, 2], vec![3, 4], vec![5]]);
    assert_eq!(first, second);
}

#[test]
fn each_entry_is_lazy() {
    let (service, client) = setup(2);
    seed_organizations(&service, &["a", "b", "c", "d", "e"]);
    let organizations = first_page(&client);
    service.clear_requests();

    let taken: Vec<_> = organizations.each_entry().take(3).map(Result::unwrap).collect();
    assert_eq!(ids(&taken), [1, 2, 3]);
    assert_eq!(service.requests(), ["get_organizations"]);
}

#[test]
fn next_page_without_link_makes_no_request() {
    let (service, client) = setup(2);
    seed_organizations(&service, &["a", "b", "c"]);

    let first = first_page(&client);
    assert!(first.previous_page().unwrap().is_none());

    let last = first.next_page().unwrap().unwrap();
    assert_eq!(ids(last.records()), [3]);
    assert!(!last.cursor().has_next());

    service.clear_requests();
    assert!(last.next_page().unwrap().is_none());
    assert!(service.requests().is_empty());

    let back = last.previous_page().unwrap().unwrap();
    assert_eq!(ids(back.records()), [1, 2]);
}

#[test]
fn empty_collection_has_single_empty_page() {
    let (_, client) = setup(2);
    let organizations = first_page(&client);
    assert!(organizations.is_empty());
    assert_eq!(organizations.each_page().count(), 1);
    assert!(organizations.all_entries().unwrap().is_empty());
}

#[test]
fn get_is_quiet_resolve_is_not() {
    let (service, client) = setup(2);
    seed_organizations(&service, &["a"]);
    let organizations = client.collection(&ORGANIZATIONS);

    assert!(organizations.get("missing-id").unwrap().is_none());
    assert!(matches!(
        organizations.resolve("missing-id"),
        Err(Error::NotFound { ref resource, .. }) if resource == "organization"
    ));

    let found = organizations.get(1).unwrap().unwrap();
    assert_eq!(found.get("name"), Some(&json!("a")));
    assert!(!found.is_new_record());
}

#[test]
fn scoped_create_then_resolve_carries_scope() {
    let (_, client) = setup(10);
    let category = client
        .collection(&CATEGORIES)
        .create(Attributes::from([("name", "Guides"), ("locale", "en")]))
        .unwrap();
    let category_id = category.identity().cloned().unwrap();

    let sections = category.children(&SECTIONS, "category_id").unwrap();
    let created = sections
        .create(Attributes::from([
            ("name", json!("Billing")),
            ("locale", json!("en")),
            ("category_id", json!(999)),
        ]))
        .unwrap();
    assert_eq!(created.get("category_id"), Some(&category_id));

    let resolved = sections.resolve(created.identity().cloned().unwrap()).unwrap();
    assert_eq!(resolved.get("category_id"), Some(&category_id));
    assert_eq!(resolved.get("name"), Some(&json!("Billing")));

    let mut listed = sections.clone();
    listed.all(Attributes::new()).unwrap();
    assert_eq!(listed.len(), 1);
}

#[test]
fn create_quiet_records_validation_failures() {
    let (service, client) = setup(10);
    let sections = client.scoped(&SECTIONS, Scope::root().with("category_id", 3));

    let section = sections
        .create_quiet(Attributes::from([("name", "FAQ")]))
        .unwrap();
    assert!(section.is_new_record());
    assert_eq!(section.errors(), ["locale is required".to_string()]);
    assert!(service.store().is_empty("sections"));

    let err = sections.create(Attributes::from([("name", "FAQ")])).unwrap_err();
    assert!(err.is_validation_failure());
}

#[test]
fn update_and_destroy_round_trip() {
    let (service, client) = setup(10);
    let sections = client.scoped(&SECTIONS, Scope::root().with("category_id", 3));
    let mut section = sections
        .create(Attributes::from([("name", "FAQ"), ("locale", "en")]))
        .unwrap();

    section.set("name", "Questions");
    section.save().unwrap();
    let reloaded = section.reload().unwrap();
    assert_eq!(reloaded.get("name"), Some(&json!("Questions")));

    section.destroy().unwrap();
    assert!(sections.get(section.identity().cloned().unwrap()).unwrap().is_none());
    assert!(service.store().is_empty("sections"));
}

#[test]
fn memberships_scope_by_either_parent() {
    let (service, client) = setup(10);
    for (org, user) in [(1, 10), (1, 11), (2, 10)] {
        service.store().insert(
            "memberships",
            Attributes::from([("organization_id", org), ("user_id", user)]),
        );
    }

    let mut by_org = client.scoped(&MEMBERSHIPS, Scope::root().with("organization_id", 1));
    by_org.all(Attributes::new()).unwrap();
    assert_eq!(by_org.len(), 2);

    let mut by_user = client.scoped(&MEMBERSHIPS, Scope::root().with("user_id", 10));
    by_user.all(Attributes::new()).unwrap();
    assert_eq!(ids(by_user.records()), [1, 3]);
}

#[test]
fn scope_overrides_params() {
    let (service, client) = setup(10);
    service.store().insert(
        "memberships",
        Attributes::from([("organization_id", 1), ("user_id", 10)]),
    );

    let mut memberships = client.scoped(&MEMBERSHIPS, Scope::root().with("organization_id", 2));
    memberships
        .all(Attributes::from([("organization_id", 1)]))
        .unwrap();
    assert!(memberships.is_empty());
}

#[test]
fn each_page_stops_after_a_failed_fetch() {
    let (service, _) = setup(2);
    seed_organizations(&service, &["a", "b", "c", "d", "e"]);
    let client = failing_client(&service, 2);

    let mut pages = first_page(&client).each_page();
    let page = pages.next().unwrap().unwrap();
    assert_eq!(ids(page.records()), [1, 2]);
    assert!(matches!(pages.next(), Some(Err(Error::Transport(ref r))) if r == "boom"));
    assert!(pages.next().is_none());
    assert!(pages.next().is_none());
}

#[test]
fn each_entry_stops_after_a_failed_fetch() {
    let (service, _) = setup(2);
    seed_organizations(&service, &["a", "b", "c", "d", "e"]);
    let client = failing_client(&service, 3);

    let mut entries = first_page(&client).each_entry();
    let mut seen = Vec::new();
    for _ in 0..4 {
        seen.push(entries.next().unwrap().unwrap());
    }
    assert_eq!(ids(&seen), [1, 2, 3, 4]);
    assert!(matches!(entries.next(), Some(Err(Error::Transport(_)))));
    assert!(entries.next().is_none());
    assert!(entries.next().is_none());
}
