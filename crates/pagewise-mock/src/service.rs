//! Transport implementation answering from a [`MockStore`].

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use pagewise::{Attributes, Binding, Config, Transport, TransportError, QUERY_PARAM, SEARCH_ROOT};
use pagewise_seeker::{compile, natural_string, SeekerError};
use serde_json::Value;

use crate::page::{paginate, PageLayout, DEFAULT_PER_PAGE};
use crate::store::MockStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    List,
    Get,
    Search,
    Create,
    Update,
    Destroy,
}

#[derive(Debug, Clone)]
struct Route {
    binding: &'static Binding,
    store_key: String,
    action: Action,
}

/// In-memory service dispatching named operations to mounted bindings.
///
/// # Example
///
/// ```rust
/// use pagewise::{resources, Attributes, Client, Config};
/// use pagewise_mock::MockService;
/// use std::sync::Arc;
///
/// let mut service = MockService::new(Config::default());
/// service.mount(&resources::ORGANIZATIONS, "organizations");
/// service.store().insert("organizations", Attributes::from([("name", "Acme")]));
///
/// let service = Arc::new(service);
/// let client = Client::new(service.clone(), Config::default());
///
/// let acme = client.collection(&resources::ORGANIZATIONS).resolve(1).unwrap();
/// assert_eq!(acme.get("name"), Some(&serde_json::json!("Acme")));
/// assert_eq!(service.requests(), ["get_organization"]);
/// ```
#[derive(Debug)]
pub struct MockService {
    config: Config,
    store: MockStore,
    routes: HashMap<&'static str, Route>,
    log: Mutex<Vec<String>>,
}

impl MockService {
    /// Creates a service with an empty store and no routes.
    pub fn new(config: Config) -> Self {
        MockService {
            config,
            store: MockStore::new(),
            routes: HashMap::new(),
            log: Mutex::new(Vec::new()),
        }
    }

    /// Registers every operation `binding` declares, backed by `store_key`.
    pub fn mount(&mut self, binding: &'static Binding, store_key: &str) -> &mut Self {
        let optional = [
            (binding.search_method, Action::Search),
            (binding.create_method, Action::Create),
            (binding.update_method, Action::Update),
            (binding.destroy_method, Action::Destroy),
        ];
        let declared = [
            (Some(binding.collection_method), Action::List),
            (Some(binding.model_method), Action::Get),
        ];

        for (method, action) in declared.into_iter().chain(optional) {
            if let Some(method) = method {
                self.routes.insert(
                    method,
                    Route {
                        binding,
                        store_key: store_key.to_string(),
                        action,
                    },
                );
            }
        }
        tracing::debug!(resource = binding.name, store_key, "mounted");
        self
    }

    /// Builder form of [`mount`](Self::mount).
    pub fn with(mut self, binding: &'static Binding, store_key: &str) -> Self {
        self.mount(binding, store_key);
        self
    }

    /// The backing store.
    pub fn store(&self) -> &MockStore {
        &self.store
    }

    /// The service configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Operation names received so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.log.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Forgets the received operations.
    pub fn clear_requests(&self) {
        self.log.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }

    fn page_layout<'a>(&'a self, root: &'a str) -> PageLayout<'a> {
        PageLayout::new(root, &self.config.url).per_page(self.config.per_page.unwrap_or(DEFAULT_PER_PAGE))
    }

    fn list(&self, route: &Route, params: &Attributes) -> Result<Attributes, TransportError> {
        let binding = route.binding;
        let records = self.scoped_values(route, params);
        paginate(records, params, &self.page_layout(binding.collection_root))
    }

    fn search(&self, route: &Route, params: &Attributes) -> Result<Attributes, TransportError> {
        let query = params
            .get_str(QUERY_PARAM)
            .ok_or_else(|| TransportError::Failure("search requires a query".into()))?;

        let compiled = compile(query).map_err(|err| match err {
            SeekerError::MalformedQueryTerm(term) => TransportError::MalformedQuery(term),
            other => TransportError::Failure(other.to_string()),
        })?;

        let results = compiled.filter_cloned(&self.scoped_values(route, params));
        tracing::debug!(query, matched = results.len(), "search answered");

        let layout = self
            .page_layout(SEARCH_ROOT)
            .path("/search.json")
            .link_param(QUERY_PARAM, query);
        paginate(results, params, &layout)
    }

    fn get(&self, route: &Route, params: &Attributes) -> Result<Attributes, TransportError> {
        let binding = route.binding;
        let lookup = model_params(binding, params)?;

        let found = match lookup.get("id") {
            Some(id) => self
                .store
                .get(&route.store_key, id)
                .filter(|record| matches_all(record, &lookup)),
            None => self
                .store
                .values(&route.store_key)
                .into_iter()
                .find(|record| matches_all(record, &lookup)),
        };

        let record = found.ok_or_else(|| {
            TransportError::not_found(binding.name, Value::from(lookup.clone()).to_string())
        })?;
        Ok(Attributes::new().with(binding.model_root, record))
    }

    fn create(&self, route: &Route, params: &Attributes) -> Result<Attributes, TransportError> {
        let binding = route.binding;
        let attributes = model_params(binding, params)?;

        let missing: Vec<String> = binding
            .required
            .iter()
            .filter(|field| matches!(attributes.get(field), None | Some(Value::Null)))
            .map(|field| format!("{field} is required"))
            .collect();
        if !missing.is_empty() {
            return Err(TransportError::unprocessable(binding.name, missing));
        }

        let record = self.store.insert(&route.store_key, attributes);
        Ok(Attributes::new().with(binding.model_root, record))
    }

    fn update(&self, route: &Route, params: &Attributes) -> Result<Attributes, TransportError> {
        let binding = route.binding;
        let changes = model_params(binding, params)?;
        let id = identity(binding, &changes)?;

        let record = self
            .store
            .update(&route.store_key, &id, &changes)
            .ok_or_else(|| TransportError::not_found(binding.name, format!("id={id}")))?;
        Ok(Attributes::new().with(binding.model_root, record))
    }

    fn destroy(&self, route: &Route, params: &Attributes) -> Result<Attributes, TransportError> {
        let binding = route.binding;
        let id = identity(binding, &model_params(binding, params)?)?;

        self.store
            .remove(&route.store_key, &id)
            .ok_or_else(|| TransportError::not_found(binding.name, format!("id={id}")))?;
        Ok(Attributes::new())
    }

    /// Records of the route's store matching the binding's scope parameters
    /// present in `params`.
    fn scoped_values(&self, route: &Route, params: &Attributes) -> Vec<Attributes> {
        let scope: Attributes = route
            .binding
            .scopes
            .iter()
            .filter_map(|name| params.get(name).map(|v| (*name, v.clone())))
            .collect();

        let mut records = self.store.values(&route.store_key);
        records.retain(|record| matches_all(record, &scope));
        records
    }
}

impl Transport for MockService {
    fn request(&self, operation: &str, params: &Attributes) -> Result<Attributes, TransportError> {
        self.log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(operation.to_string());

        let route = self
            .routes
            .get(operation)
            .ok_or_else(|| TransportError::Failure(format!("unknown operation '{operation}'")))?;

        tracing::trace!(operation, action = ?route.action, "mock request");
        match route.action {
            Action::List => self.list(route, params),
            Action::Get => self.get(route, params),
            Action::Search => self.search(route, params),
            Action::Create => self.create(route, params),
            Action::Update => self.update(route, params),
            Action::Destroy => self.destroy(route, params),
        }
    }
}

fn model_params(binding: &Binding, params: &Attributes) -> Result<Attributes, TransportError> {
    params
        .get(binding.model_root)
        .cloned()
        .and_then(Attributes::from_value)
        .ok_or_else(|| TransportError::Failure(format!("expected an object under '{}'", binding.model_root)))
}

fn identity(binding: &Binding, attributes: &Attributes) -> Result<Value, TransportError> {
    attributes
        .get("id")
        .filter(|id| !id.is_null())
        .cloned()
        .ok_or_else(|| TransportError::Failure(format!("{} id is required", binding.name)))
}

/// Every entry of `expected` equals the record's field by string form.
fn matches_all(record: &Attributes, expected: &Attributes) -> bool {
    expected
        .iter()
        .all(|(field, value)| natural_string(record.get(field)) == natural_string(Some(value)))
}
