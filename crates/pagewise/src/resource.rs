//! Single resources bound to their collection type.
//!
//! A [`Resource`] is a record plus what it needs to save itself: the client
//! and the [`Binding`]. Create and update send `{model_root: attributes}` and
//! merge the returned `body[model_root]` back in.

use std::fmt;

use serde_json::Value;

use crate::attributes::{Attributes, Record};
use crate::binding::Binding;
use crate::client::Client;
use crate::collection::Collection;
use crate::error::{Error, Result};
use crate::scope::Scope;

/// A record that can be saved, destroyed and navigated from.
#[derive(Clone)]
pub struct Resource {
    client: Client,
    binding: &'static Binding,
    attributes: Attributes,
    persisted: bool,
    errors: Vec<String>,
}

impl Resource {
    pub(crate) fn new(client: Client, binding: &'static Binding, attributes: Attributes) -> Self {
        Resource {
            client,
            binding,
            attributes,
            persisted: false,
            errors: Vec::new(),
        }
    }

    pub(crate) fn persisted(client: Client, binding: &'static Binding, attributes: Attributes) -> Self {
        Resource {
            persisted: true,
            ..Resource::new(client, binding, attributes)
        }
    }

    /// The resource's binding.
    pub fn binding(&self) -> &'static Binding {
        self.binding
    }

    /// Borrows the attributes.
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Returns an attribute value.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.attributes.get(field)
    }

    /// Sets an attribute value.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.attributes.insert(field, value);
        self
    }

    /// The `id` attribute, unless absent or `null`.
    pub fn identity(&self) -> Option<&Value> {
        self.attributes.get("id").filter(|v| !v.is_null())
    }

    /// Returns `true` until a save succeeds.
    pub fn is_new_record(&self) -> bool {
        !self.persisted
    }

    /// Messages from the last rejected quiet save.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Copies the attributes out as a plain record.
    pub fn to_record(&self) -> Record {
        Record::new(self.attributes.clone())
    }

    /// Unwraps into a plain record.
    pub fn into_record(self) -> Record {
        Record::new(self.attributes)
    }

    /// Creates or updates the resource remotely.
    ///
    /// # Errors
    ///
    /// - [`Error::ValidationFailure`] when required attributes are missing on
    ///   create, or the remote side rejects the attributes
    /// - [`Error::MissingIdentity`] when updating without an `id`
    /// - [`Error::UnsupportedOperation`] when the binding lacks the operation
    pub fn save(&mut self) -> Result<()> {
        let binding = self.binding;

        let method = if self.is_new_record() {
            self.check_required()?;
            binding.create_method.ok_or(Error::UnsupportedOperation {
                resource: binding.name,
                operation: "create",
            })?
        } else {
            self.require_identity()?;
            binding.update_method.ok_or(Error::UnsupportedOperation {
                resource: binding.name,
                operation: "update",
            })?
        };

        let params = Attributes::new().with(binding.model_root, self.attributes.clone());
        let mut body = self.client.request(method, &params)?;

        match body.remove(binding.model_root) {
            Some(Value::Object(map)) => self.attributes.merge(&map.into()),
            None | Some(Value::Null) => {}
            Some(_) => {
                return Err(Error::invalid_response(
                    method,
                    format!("'{}' is not an object", binding.model_root),
                ))
            }
        }

        self.persisted = true;
        self.errors.clear();
        tracing::debug!(resource = binding.name, id = ?self.identity(), "saved");
        Ok(())
    }

    /// Quiet version of [`save`](Self::save).
    ///
    /// A validation failure is recorded in [`errors`](Self::errors) and
    /// reported as `Ok(false)`; every other error propagates.
    pub fn save_quiet(&mut self) -> Result<bool> {
        match self.save() {
            Ok(()) => Ok(true),
            Err(Error::ValidationFailure { messages, .. }) => {
                self.errors = messages;
                Ok(false)
            }
            Err(err) => Err(err),
        }
    }

    /// Destroys the resource remotely.
    pub fn destroy(&self) -> Result<()> {
        let binding = self.binding;
        let id = self.require_identity()?.clone();
        let method = binding.destroy_method.ok_or(Error::UnsupportedOperation {
            resource: binding.name,
            operation: "destroy",
        })?;

        let params = Attributes::new().with(binding.model_root, Attributes::new().with("id", id));
        self.client.request(method, &params)?;
        Ok(())
    }

    /// A collection of `child` resources scoped to this one.
    ///
    /// The scope is `{foreign_key: identity}`, e.g. the sections of a
    /// category are scoped by `category_id`.
    pub fn children(&self, child: &'static Binding, foreign_key: &str) -> Result<Collection> {
        let id = self.require_identity()?.clone();
        Ok(self.client.scoped(child, Scope::root().with(foreign_key, id)))
    }

    /// Re-fetches this resource through its binding.
    pub fn reload(&self) -> Result<Resource> {
        let id = self.require_identity()?.clone();
        self.client.collection(self.binding).resolve(id)
    }

    fn require_identity(&self) -> Result<&Value> {
        self.identity().ok_or(Error::MissingIdentity(self.binding.name))
    }

    fn check_required(&self) -> Result<()> {
        let missing: Vec<String> = self
            .binding
            .required
            .iter()
            .filter(|field| {
                matches!(self.attributes.get(field), None | Some(Value::Null))
            })
            .map(|field| format!("{field} is required"))
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::ValidationFailure {
                resource: self.binding.name.to_string(),
                messages: missing,
            })
        }
    }
}

impl fmt::Debug for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resource")
            .field("resource", &self.binding.name)
            .field("attributes", &self.attributes)
            .field("persisted", &self.persisted)
            .field("errors", &self.errors)
            .finish()
    }
}
