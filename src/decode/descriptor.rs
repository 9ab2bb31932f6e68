//! Property descriptors and model decoding.
//!
//! Each generated model publishes a static table of its JSON properties and
//! their kinds. Decoding checks the incoming object against that table,
//! keeps only the declared properties, deserializes, and finally runs the
//! model's own validation.

use std::any::Any;
use std::fmt;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::DecodeError;
use crate::error::{ProtocolError, ValidationFailure};

/// Declared JSON kind of a model property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyType {
    /// Integral JSON number.
    Integer,
    /// Any JSON number.
    Number,
    /// JSON string.
    String,
    /// JSON boolean.
    Boolean,
    /// JSON string from a closed set of values.
    Enum(&'static [&'static str]),
    /// Nested JSON object.
    Model,
    /// JSON array whose items all have the given kind.
    List(&'static Self),
    /// Free-form value, never checked.
    Any,
}

impl PropertyType {
    /// Returns true if `value` is acceptable for this kind.
    ///
    /// `null` is accepted for every kind: absent and null both mean "not set".
    #[must_use]
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (_, Value::Null) | (Self::Any, _) => true,
            (Self::Integer, Value::Number(n)) => n.is_i64() || n.is_u64(),
            (Self::Number, Value::Number(_))
            | (Self::String, Value::String(_))
            | (Self::Boolean, Value::Bool(_))
            | (Self::Model, Value::Object(_)) => true,
            (Self::Enum(allowed), Value::String(s)) => allowed.contains(&s.as_str()),
            (Self::List(item), Value::Array(items)) => items.iter().all(|v| item.accepts(v)),
            _ => false,
        }
    }

    /// Short name used in error messages.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Number => "number",
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Enum(_) => "enum value",
            Self::Model => "object",
            Self::List(_) => "list",
            Self::Any => "any",
        }
    }
}

/// One declared property of a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Property {
    /// JSON field name
    pub name: &'static str,
    /// Declared kind
    pub kind: PropertyType,
}

impl Property {
    /// Declares a property.
    #[must_use]
    pub const fn new(name: &'static str, kind: PropertyType) -> Self {
        Self { name, kind }
    }
}

/// A constraint a model instance does not satisfy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// The offending property
    pub field: &'static str,
    /// Human-readable description
    pub message: String,
}

impl Violation {
    /// Creates a violation with a custom message.
    #[must_use]
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }

    /// A required property is missing or null.
    #[must_use]
    pub fn required(field: &'static str) -> Self {
        Self::new(field, format!("'{field}' can't be null"))
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// A generated data model.
///
/// # Example
///
/// ```
/// use serde::Deserialize;
/// use wallee_sdk::decode::{Model, Property, PropertyType, Violation};
///
/// #[derive(Deserialize)]
/// struct Label {
///     id: Option<i64>,
///     name: Option<String>,
/// }
///
/// impl Model for Label {
///     const NAME: &'static str = "Label";
///     const PROPERTIES: &'static [Property] = &[
///         Property::new("id", PropertyType::Integer),
///         Property::new("name", PropertyType::String),
///     ];
///
///     fn validate(&self) -> Vec<Violation> {
///         self.id.is_none().then(|| Violation::required("id")).into_iter().collect()
///     }
/// }
/// ```
pub trait Model: DeserializeOwned + Any + Send + Sync {
    /// Model name used in errors.
    const NAME: &'static str;

    /// Declared JSON properties.
    const PROPERTIES: &'static [Property];

    /// Returns every violated constraint, in declaration order.
    fn validate(&self) -> Vec<Violation> {
        Vec::new()
    }
}

/// Decodes a JSON object into `M`.
///
/// # Errors
///
/// - [`ProtocolError::Shape`] if `value` is not an object or does not
///   deserialize
/// - [`ProtocolError::TypeMismatch`] if a declared property has the wrong kind
/// - [`DecodeError::Validation`] if the built object fails [`Model::validate`]
pub fn decode_model<M: Model>(value: Value) -> Result<M, DecodeError> {
    let Value::Object(object) = value else {
        return Err(DecodeError::shape(
            M::NAME,
            format!("expected object, found {}", json_kind(&value)),
        ));
    };

    let projected = project::<M>(object)?;
    let model: M = serde_json::from_value(Value::Object(projected))
        .map_err(|e| DecodeError::shape(M::NAME, e.to_string()))?;

    let violations = model.validate();
    if violations.is_empty() {
        Ok(model)
    } else {
        tracing::debug!(model = M::NAME, count = violations.len(), "validation failed");
        Err(DecodeError::Validation(Box::new(ValidationFailure::new(
            M::NAME,
            model,
            violations,
        ))))
    }
}

/// Keeps the declared properties of `object`, checking their kinds.
fn project<M: Model>(mut object: Map<String, Value>) -> Result<Map<String, Value>, DecodeError> {
    let mut projected = Map::with_capacity(M::PROPERTIES.len());

    for property in M::PROPERTIES {
        let Some(value) = object.remove(property.name) else {
            continue;
        };
        if !property.kind.accepts(&value) {
            return Err(ProtocolError::TypeMismatch {
                model: M::NAME,
                field: property.name,
                expected: property.kind.name(),
                found: json_kind(&value),
            }
            .into());
        }
        projected.insert(property.name.to_string(), value);
    }

    if !object.is_empty() {
        tracing::trace!(model = M::NAME, dropped = object.len(), "ignoring undeclared fields");
    }

    Ok(projected)
}

/// Names the JSON kind of `value`.
pub(crate) const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}
