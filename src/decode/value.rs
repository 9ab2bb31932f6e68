//! The [`Decode`] trait and its implementations for plain JSON types.

use serde_json::Value;

use super::DecodeError;
use super::descriptor::json_kind;

/// A type a success response body can be decoded into.
///
/// Models implement it via [`impl_model_decode!`](crate::impl_model_decode),
/// polymorphic families via [`impl_one_of_decode!`](crate::impl_one_of_decode).
pub trait Decode: Sized + Send + 'static {
    /// Decodes a parsed JSON body. An empty body arrives as `null`.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError`] if the value does not fit the type.
    fn decode(value: Value) -> Result<Self, DecodeError>;
}

impl Decode for Value {
    fn decode(value: Value) -> Result<Self, DecodeError> {
        Ok(value)
    }
}

impl Decode for () {
    fn decode(_value: Value) -> Result<Self, DecodeError> {
        Ok(())
    }
}

impl Decode for String {
    fn decode(value: Value) -> Result<Self, DecodeError> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(DecodeError::shape(
                "string",
                format!("found {}", json_kind(&other)),
            )),
        }
    }
}

impl Decode for bool {
    fn decode(value: Value) -> Result<Self, DecodeError> {
        value
            .as_bool()
            .ok_or_else(|| DecodeError::shape("boolean", format!("found {}", json_kind(&value))))
    }
}

impl Decode for i64 {
    fn decode(value: Value) -> Result<Self, DecodeError> {
        value
            .as_i64()
            .ok_or_else(|| DecodeError::shape("i64", format!("found {value}")))
    }
}

impl Decode for u64 {
    fn decode(value: Value) -> Result<Self, DecodeError> {
        value
            .as_u64()
            .ok_or_else(|| DecodeError::shape("u64", format!("found {value}")))
    }
}

impl<T: Decode> Decode for Option<T> {
    fn decode(value: Value) -> Result<Self, DecodeError> {
        match value {
            Value::Null => Ok(None),
            other => T::decode(other).map(Some),
        }
    }
}

impl<T: Decode> Decode for Vec<T> {
    fn decode(value: Value) -> Result<Self, DecodeError> {
        match value {
            Value::Null => Ok(Vec::new()),
            Value::Array(items) => items.into_iter().map(T::decode).collect(),
            other => Err(DecodeError::shape(
                "list",
                format!("found {}", json_kind(&other)),
            )),
        }
    }
}
