//! Scoping parameters carried by every fetch of a collection.
//!
//! A [`Scope`] is fixed when the collection is created: empty for a root
//! collection, `{category_id: X}` for "sections of category X". Scope values
//! always win over caller-supplied parameters and attributes.

use serde_json::Value;

use crate::attributes::Attributes;

/// Ordered list of named scope parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scope {
    params: Vec<(String, Value)>,
}

impl Scope {
    /// The empty scope of a root-level collection.
    pub fn root() -> Self {
        Scope::default()
    }

    /// Adds a parameter, replacing an earlier one with the same name.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.params.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.params.push((name, value)),
        }
        self
    }

    /// Returns the value of a scope parameter.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.params.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Returns `true` for the empty scope.
    pub fn is_root(&self) -> bool {
        self.params.is_empty()
    }

    /// Number of scope parameters.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Returns `true` if there are no scope parameters.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Iterates parameters in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.params.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Writes every scope parameter into `target`, overwriting existing keys.
    pub fn apply(&self, target: &mut Attributes) {
        for (name, value) in &self.params {
            target.insert(name.clone(), value.clone());
        }
    }

    /// Returns `attrs` with the scope applied on top.
    pub fn applied_to(&self, mut attrs: Attributes) -> Attributes {
        self.apply(&mut attrs);
        attrs
    }

    /// The scope as a standalone mapping.
    pub fn to_attributes(&self) -> Attributes {
        self.applied_to(Attributes::new())
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Scope {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Scope::root(), |scope, (k, v)| scope.with(k, v))
    }
}
