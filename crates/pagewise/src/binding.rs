//! Static per-collection-type configuration.
//!
//! A [`Binding`] names the remote operations a collection type dispatches to
//! and the response fields wrapping its payload. Bindings are declared once as
//! `static` values and never change at runtime.
//!
//! # Example
//!
//! ```rust
//! use pagewise::Binding;
//!
//! pub static TICKET_FIELDS: Binding = Binding::new(
//!     "ticket_field",
//!     "get_ticket_fields",
//!     "ticket_fields",
//!     "get_ticket_field",
//!     "ticket_field",
//! )
//! .creatable("create_ticket_field")
//! .destroyable("destroy_ticket_field")
//! .requires(&["title", "type"]);
//!
//! assert!(!TICKET_FIELDS.is_searchable());
//! ```

/// Response field wrapping search results.
pub const SEARCH_ROOT: &str = "results";

/// Operation names and payload roots for one collection type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    /// Singular resource name, used in errors and logs.
    pub name: &'static str,
    /// Operation listing one page of the collection.
    pub collection_method: &'static str,
    /// Response field wrapping the listed records.
    pub collection_root: &'static str,
    /// Operation fetching a single record.
    pub model_method: &'static str,
    /// Response (and request) field wrapping a single record.
    pub model_root: &'static str,
    /// Operation answering free-text searches, for searchable collections.
    pub search_method: Option<&'static str>,
    /// Operation creating a record.
    pub create_method: Option<&'static str>,
    /// Operation updating a record.
    pub update_method: Option<&'static str>,
    /// Operation destroying a record.
    pub destroy_method: Option<&'static str>,
    /// Names of the scope parameters a scoped collection carries.
    pub scopes: &'static [&'static str],
    /// Attributes a new record must carry before it is created.
    pub required: &'static [&'static str],
}

impl Binding {
    /// Declares a read-only, unscoped, non-searchable binding.
    pub const fn new(
        name: &'static str,
        collection_method: &'static str,
        collection_root: &'static str,
        model_method: &'static str,
        model_root: &'static str,
    ) -> Self {
        Binding {
            name,
            collection_method,
            collection_root,
            model_method,
            model_root,
            search_method: None,
            create_method: None,
            update_method: None,
            destroy_method: None,
            scopes: &[],
            required: &[],
        }
    }

    /// Declares the search operation.
    pub const fn searchable(self, method: &'static str) -> Self {
        Binding {
            search_method: Some(method),
            ..self
        }
    }

    /// Declares the create operation.
    pub const fn creatable(self, method: &'static str) -> Self {
        Binding {
            create_method: Some(method),
            ..self
        }
    }

    /// Declares the update operation.
    pub const fn updatable(self, method: &'static str) -> Self {
        Binding {
            update_method: Some(method),
            ..self
        }
    }

    /// Declares the destroy operation.
    pub const fn destroyable(self, method: &'static str) -> Self {
        Binding {
            destroy_method: Some(method),
            ..self
        }
    }

    /// Declares the scope parameter names.
    pub const fn scoped_by(self, scopes: &'static [&'static str]) -> Self {
        Binding { scopes, ..self }
    }

    /// Declares the attributes required on create.
    pub const fn requires(self, required: &'static [&'static str]) -> Self {
        Binding { required, ..self }
    }

    /// Returns `true` if the collection supports free-text search.
    pub const fn is_searchable(&self) -> bool {
        self.search_method.is_some()
    }

    /// Returns `true` if `name` is a declared scope parameter.
    pub fn has_scope(&self, name: &str) -> bool {
        self.scopes.iter().any(|s| *s == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static WIDGETS: Binding = Binding::new("widget", "get_widgets", "widgets", "get_widget", "widget")
        .searchable("search_widget")
        .scoped_by(&["shelf_id"]);

    #[test]
    fn builder_sets_only_requested_operations() {
        assert_eq!(WIDGETS.search_method, Some("search_widget"));
        assert!(WIDGETS.is_searchable());
        assert_eq!(WIDGETS.create_method, None);
        assert!(WIDGETS.required.is_empty());
    }

    #[test]
    fn scope_membership() {
        assert!(WIDGETS.has_scope("shelf_id"));
        assert!(!WIDGETS.has_scope("id"));
    }
}
