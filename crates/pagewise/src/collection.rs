//! Paged collections.
//!
//! A [`Collection`] is one page of a remote resource collection plus the
//! cursor needed to reach its neighbours. Every fetch replaces the stored
//! records and cursor; previously visited pages are not retained.
//!
//! # Modes
//!
//! ```text
//! all(params)
//!   ├─ params has `filtered` and `url`  → search continuation
//!   │     decode query from the url, search(query, residual params)
//!   └─ otherwise                        → listing
//!         scope over params, collection_method, body[collection_root]
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! let mut memberships = client.scoped(&MEMBERSHIPS, Scope::root().with("organization_id", 7));
//! memberships.all(Attributes::new())?;
//!
//! for entry in memberships.each_entry() {
//!     println!("{:?}", entry?.id());
//! }
//! ```

use std::fmt;

use serde_json::Value;

use crate::attributes::{Attributes, Record};
use crate::binding::{Binding, SEARCH_ROOT};
use crate::client::Client;
use crate::error::{Error, Result};
use crate::link::{PageCursor, PageLink, FILTERED_PARAM, PER_PAGE_PARAM, QUERY_PARAM, URL_PARAM};
use crate::pages::{Entries, Pages};
use crate::resource::Resource;
use crate::scope::Scope;

/// Identity or filter used to resolve a single record.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    /// Fetch by `id`.
    Id(Value),
    /// Fetch by an explicit parameter mapping.
    Filter(Attributes),
}

impl From<Value> for Lookup {
    /// Objects become filters, anything else an identity.
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => Lookup::Filter(map.into()),
            other => Lookup::Id(other),
        }
    }
}

impl From<Attributes> for Lookup {
    fn from(attrs: Attributes) -> Self {
        Lookup::Filter(attrs)
    }
}

impl From<&str> for Lookup {
    fn from(id: &str) -> Self {
        Lookup::Id(Value::from(id))
    }
}

impl From<String> for Lookup {
    fn from(id: String) -> Self {
        Lookup::Id(Value::from(id))
    }
}

macro_rules! lookup_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Lookup {
                fn from(id: $t) -> Self {
                    Lookup::Id(Value::from(id))
                }
            }
        )*
    };
}

lookup_from_int!(i32, i64, u32, u64);

impl fmt::Display for Lookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lookup::Id(id) => write!(f, "id={id}"),
            Lookup::Filter(attrs) => write!(f, "{}", serde_json::to_string(attrs).unwrap_or_default()),
        }
    }
}

/// One page of a scoped resource collection.
///
/// Cloning yields an independent snapshot sharing the client.
#[derive(Clone)]
pub struct Collection {
    client: Client,
    binding: &'static Binding,
    scope: Scope,
    records: Vec<Record>,
    cursor: PageCursor,
    filter_query: Option<String>,
}

impl Collection {
    pub(crate) fn new(client: Client, binding: &'static Binding, scope: Scope) -> Self {
        Collection {
            client,
            binding,
            scope,
            records: Vec::new(),
            cursor: PageCursor::default(),
            filter_query: None,
        }
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    /// The collection type's binding.
    pub fn binding(&self) -> &'static Binding {
        self.binding
    }

    /// The scope carried by every fetch.
    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    /// Records of the current page.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Unwraps into the current page's records.
    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    /// Number of records on the current page.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the current page holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Total record count reported by the last fetch.
    pub fn count(&self) -> Option<u64> {
        self.cursor.count
    }

    /// Cursor state of the current page.
    pub fn cursor(&self) -> &PageCursor {
        &self.cursor
    }

    /// The query of the search that produced this page, if any.
    pub fn filter_query(&self) -> Option<&str> {
        self.filter_query.as_deref()
    }

    // ========================================================================
    // Fetching
    // ========================================================================

    /// Fetches a page, replacing the current records and cursor.
    ///
    /// Dispatches to a search continuation when `params` carries both the
    /// `filtered` marker and a `url` location; lists otherwise.
    pub fn all(&mut self, params: Attributes) -> Result<&mut Self> {
        if is_search_request(&params) {
            self.search_page(params)?;
        } else {
            self.collection_page(params)?;
        }
        Ok(self)
    }

    /// Runs a free-text search, replacing the current records and cursor.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedOperation`] when the binding declares no search
    /// operation; transport failures propagate unchanged.
    pub fn search(&mut self, query: &str, params: Attributes) -> Result<&mut Self> {
        let method = self.binding.search_method.ok_or(Error::UnsupportedOperation {
            resource: self.binding.name,
            operation: "search",
        })?;

        let mut request = self.scope.applied_to(params);
        request.insert(QUERY_PARAM, query);
        self.apply_defaults(&mut request);

        tracing::debug!(resource = self.binding.name, query, "searching");
        let body = self.client.request(method, &request)?;
        self.load(method, &body, SEARCH_ROOT, true)?;
        self.filter_query = Some(query.to_string());
        Ok(self)
    }

    /// Fetches all pages and collects every record.
    pub fn all_entries(&self) -> Result<Vec<Record>> {
        self.each_entry().collect()
    }

    fn collection_page(&mut self, params: Attributes) -> Result<()> {
        let method = self.binding.collection_method;
        let root = self.binding.collection_root;
        let mut request = self.scope.applied_to(params);
        self.apply_defaults(&mut request);

        tracing::debug!(resource = self.binding.name, scoped = !self.scope.is_root(), "listing");
        let body = self.client.request(method, &request)?;
        self.load(method, &body, root, false)?;
        self.filter_query = None;
        Ok(())
    }

    fn search_page(&mut self, mut params: Attributes) -> Result<()> {
        let marker = params.remove(FILTERED_PARAM);
        let location = match params.remove(URL_PARAM) {
            Some(Value::String(loc)) => loc,
            other => return Err(Error::InvalidLink(format!("expected a location, got {other:?}"))),
        };

        let link = PageLink::Search(location);
        let query = link
            .filter_query()
            .or_else(|| marker.and_then(|m| m.as_str().map(str::to_string)))
            .ok_or_else(|| Error::InvalidLink(format!("no query in '{}'", link.location())))?;

        let mut residual = link.search_params();
        residual.merge(&params);
        self.search(&query, residual)?;
        Ok(())
    }

    fn apply_defaults(&self, request: &mut Attributes) {
        if let Some(per_page) = self.client.config().per_page {
            if !request.contains_key(URL_PARAM) && !request.contains_key(PER_PAGE_PARAM) {
                request.insert(PER_PAGE_PARAM, per_page);
            }
        }
    }

    fn load(&mut self, operation: &str, body: &Attributes, root: &str, search: bool) -> Result<()> {
        let records = match body.get(root) {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| {
                    Record::from_value(item.clone())
                        .ok_or_else(|| Error::invalid_response(operation, format!("non-object entry in '{root}'")))
                })
                .collect::<Result<Vec<_>>>()?,
            Some(_) => {
                tracing::warn!(operation, root, "collection root is not a list");
                return Err(Error::invalid_response(operation, format!("'{root}' is not a list")));
            }
        };

        self.records = records;
        self.cursor = PageCursor::from_body(body, search);
        tracing::trace!(
            operation,
            records = self.records.len(),
            next = self.cursor.has_next(),
            previous = self.cursor.has_previous(),
            "page loaded"
        );
        Ok(())
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    /// Fetches the next page into a fresh collection.
    ///
    /// Returns `Ok(None)` without any request when there is no next link.
    pub fn next_page(&self) -> Result<Option<Collection>> {
        self.follow(self.cursor.next.as_ref())
    }

    /// Fetches the previous page into a fresh collection.
    ///
    /// Returns `Ok(None)` without any request when there is no previous link.
    pub fn previous_page(&self) -> Result<Option<Collection>> {
        self.follow(self.cursor.previous.as_ref())
    }

    /// Lazily walks this page and every following one.
    ///
    /// Each call starts over from the current page.
    pub fn each_page(&self) -> Pages {
        Pages::new(self.clone())
    }

    /// Lazily walks every record of this page and the following ones.
    pub fn each_entry(&self) -> Entries {
        Entries::new(self.each_page())
    }

    /// An empty collection with the same binding, scope and client.
    pub fn new_page(&self) -> Collection {
        Collection::new(self.client.clone(), self.binding, self.scope.clone())
    }

    fn follow(&self, link: Option<&PageLink>) -> Result<Option<Collection>> {
        let Some(link) = link else {
            tracing::trace!(resource = self.binding.name, "no page link");
            return Ok(None);
        };

        let mut params = Attributes::new().with(URL_PARAM, link.location());
        if link.is_search() && self.binding.is_searchable() {
            let marker = self
                .filter_query
                .clone()
                .map(Value::from)
                .unwrap_or(Value::Bool(true));
            params.insert(FILTERED_PARAM, marker);
        }

        let mut page = self.new_page();
        page.all(params)?;
        Ok(Some(page))
    }

    // ========================================================================
    // Single resources
    // ========================================================================

    /// Fetches a single record by identity or filter.
    ///
    /// The request is `{model_root: scope + lookup}`.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] when no record matches; other failures propagate.
    pub fn resolve(&self, lookup: impl Into<Lookup>) -> Result<Resource> {
        let lookup = lookup.into();
        let binding = self.binding;

        let mut inner = self.scope.to_attributes();
        match &lookup {
            Lookup::Id(id) => {
                inner.insert("id", id.clone());
            }
            Lookup::Filter(filter) => inner.merge(filter),
        }
        let params = Attributes::new().with(binding.model_root, inner);

        let mut body = self.client.request(binding.model_method, &params)?;
        match body.remove(binding.model_root) {
            Some(Value::Object(map)) => Ok(Resource::persisted(self.client.clone(), binding, map.into())),
            None | Some(Value::Null) => Err(Error::NotFound {
                resource: binding.name.to_string(),
                detail: lookup.to_string(),
            }),
            Some(_) => Err(Error::invalid_response(
                binding.model_method,
                format!("'{}' is not an object", binding.model_root),
            )),
        }
    }

    /// Quiet version of [`resolve`](Self::resolve): `Ok(None)` when the record
    /// does not exist.
    pub fn get(&self, lookup: impl Into<Lookup>) -> Result<Option<Resource>> {
        match self.resolve(lookup) {
            Ok(resource) => Ok(Some(resource)),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// An unsaved resource with the scope applied over `attributes`.
    pub fn new_resource(&self, attributes: Attributes) -> Resource {
        Resource::new(self.client.clone(), self.binding, self.scope.applied_to(attributes))
    }

    /// Creates a resource, failing on any error.
    ///
    /// Scope values override the same keys in `attributes`.
    pub fn create(&self, attributes: Attributes) -> Result<Resource> {
        let mut resource = self.new_resource(attributes);
        resource.save()?;
        Ok(resource)
    }

    /// Creates a resource, recording a validation failure on the result.
    ///
    /// Check [`Resource::is_new_record`] and [`Resource::errors`] for
    /// success. Transport failures still propagate.
    pub fn create_quiet(&self, attributes: Attributes) -> Result<Resource> {
        let mut resource = self.new_resource(attributes);
        resource.save_quiet()?;
        Ok(resource)
    }
}

fn is_search_request(params: &Attributes) -> bool {
    params.is_set(FILTERED_PARAM) && params.is_set(URL_PARAM)
}

impl fmt::Debug for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collection")
            .field("resource", &self.binding.name)
            .field("scope", &self.scope)
            .field("records", &self.records.len())
            .field("cursor", &self.cursor)
            .field("filter_query", &self.filter_query)
            .finish()
    }
}
