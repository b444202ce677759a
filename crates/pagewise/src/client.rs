//! Entry point for obtaining collections.
//!
//! A [`Client`] owns the transport handle and the [`Config`]. Root-level
//! collections come from [`Client::collection`]; collections nested under a
//! parent come from [`Client::scoped`] or from
//! [`Resource::children`](crate::Resource::children), which derives the scope
//! from the parent's identity.

use std::fmt;
use std::sync::Arc;

use crate::attributes::Attributes;
use crate::binding::Binding;
use crate::collection::Collection;
use crate::config::Config;
use crate::error::Result;
use crate::resource::Resource;
use crate::scope::Scope;
use crate::transport::Transport;

/// Shared handle to a transport plus configuration.
///
/// Cloning is cheap; every collection and resource keeps its own clone.
#[derive(Clone)]
pub struct Client {
    transport: Arc<dyn Transport>,
    config: Arc<Config>,
}

impl Client {
    /// Creates a client over `transport`.
    pub fn new(transport: impl Transport + 'static, config: Config) -> Self {
        Client {
            transport: Arc::new(transport),
            config: Arc::new(config),
        }
    }

    /// The client configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// A root-level collection with an empty scope.
    pub fn collection(&self, binding: &'static Binding) -> Collection {
        Collection::new(self.clone(), binding, Scope::root())
    }

    /// A collection whose every fetch carries `scope`.
    ///
    /// Parameters the binding does not declare are still sent; a warning is
    /// logged for each.
    pub fn scoped(&self, binding: &'static Binding, scope: Scope) -> Collection {
        for (name, _) in scope.iter().filter(|(n, _)| !binding.has_scope(n)) {
            tracing::warn!(resource = binding.name, scope = name, "undeclared scope parameter");
        }
        Collection::new(self.clone(), binding, scope)
    }

    /// Wraps attributes as an unsaved resource of `binding`.
    pub fn new_resource(&self, binding: &'static Binding, attributes: Attributes) -> Resource {
        Resource::new(self.clone(), binding, attributes)
    }

    pub(crate) fn request(&self, operation: &str, params: &Attributes) -> Result<Attributes> {
        tracing::debug!(operation, params = params.len(), "dispatching request");
        self.transport.request(operation, params).map_err(|err| {
            tracing::debug!(operation, error = %err, "request failed");
            err.into()
        })
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
