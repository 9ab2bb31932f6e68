//! Response decoding: from raw HTTP responses to typed results.
//!
//! The pipeline runs in a fixed order:
//! 1. [`classify`] the status into exactly one [`StatusClass`]
//! 2. parse the body as JSON
//! 3. resolve polymorphic families through their discriminator ([`OneOf`])
//! 4. check declared property kinds and drop unknown fields ([`Model`])
//! 5. validate the constructed object ([`Model::validate`])
//!
//! Any type the client can return implements [`Decode`].

mod decoder;
mod descriptor;
mod error;
mod one_of;
mod value;


pub use decoder::{ResponseDecoder, StatusClass, classify};
pub use descriptor::{Model, Property, PropertyType, Violation, decode_model};
pub use error::DecodeError;
pub use one_of::{OneOf, Variant, decode_one_of};
pub use value::Decode;

/// Implements [`Decode`] for types implementing [`Model`].
#[macro_export]
macro_rules! impl_model_decode {
    ($($model:ty),+ $(,)?) => {
        $(
            impl $crate::decode::Decode for $model {
                fn decode(
                    value: ::serde_json::Value,
                ) -> ::std::result::Result<Self, $crate::decode::DecodeError> {
                    $crate::decode::decode_model(value)
                }
            }
        )+
    };
}

/// Implements [`Decode`] for polymorphic families implementing [`OneOf`].
#[macro_export]
macro_rules! impl_one_of_decode {
    ($($family:ty),+ $(,)?) => {
        $(
            impl $crate::decode::Decode for $family {
                fn decode(
                    value: ::serde_json::Value,
                ) -> ::std::result::Result<Self, $crate::decode::DecodeError> {
                    $crate::decode::decode_one_of(value)
                }
            }
        )+
    };
}
