//! Field access and string coercion for record values.
//!
//! Records reach the matcher as JSON objects. The [`FieldSource`] trait is the
//! seam between a record type and the evaluator, and [`natural_string`] turns a
//! JSON value into the form a term is compared against.

use std::borrow::Cow;

use serde_json::{Map, Value};

/// Types whose fields can be looked up by name for query evaluation.
///
/// # Manual Implementation
///
/// ```
/// use pagewise_seeker::FieldSource;
/// use serde_json::{Map, Value};
///
/// struct Row {
///     fields: Map<String, Value>,
/// }
///
/// impl FieldSource for Row {
///     fn field_value(&self, field: &str) -> Option<&Value> {
///         self.fields.get(field)
///     }
/// }
/// ```
pub trait FieldSource {
    /// Returns the raw value of `field`, or `None` if the record lacks it.
    fn field_value(&self, field: &str) -> Option<&Value>;
}

impl FieldSource for Map<String, Value> {
    fn field_value(&self, field: &str) -> Option<&Value> {
        self.get(field)
    }
}

impl FieldSource for Value {
    /// Non-object values have no fields.
    fn field_value(&self, field: &str) -> Option<&Value> {
        match self {
            Value::Object(map) => map.get(field),
            _ => None,
        }
    }
}

impl<T: FieldSource + ?Sized> FieldSource for &T {
    fn field_value(&self, field: &str) -> Option<&Value> {
        (**self).field_value(field)
    }
}

/// Coerces a field value to its natural string form.
///
/// - `String` is borrowed as-is
/// - `Number` and `Bool` use their display form
/// - arrays and objects are rendered as compact JSON
/// - `null` and a missing field are both absent (`None`)
pub fn natural_string(value: Option<&Value>) -> Option<Cow<'_, str>> {
    match value? {
        Value::Null => None,
        Value::String(s) => Some(Cow::Borrowed(s.as_str())),
        Value::Bool(b) => Some(Cow::Owned(b.to_string())),
        Value::Number(n) => Some(Cow::Owned(n.to_string())),
        other => Some(Cow::Owned(other.to_string())),
    }
}
