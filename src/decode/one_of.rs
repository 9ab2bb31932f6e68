//! Polymorphic response families resolved through a discriminator field.

use serde_json::Value;

use super::DecodeError;
use crate::error::ProtocolError;

/// Constructor for one member of a polymorphic family.
pub struct Variant<F> {
    /// Discriminator value selecting this member
    pub tag: &'static str,
    /// Builds the family value from the full JSON object
    pub build: fn(Value) -> Result<F, DecodeError>,
}

impl<F> Variant<F> {
    /// Declares a family member.
    #[must_use]
    pub const fn new(tag: &'static str, build: fn(Value) -> Result<F, DecodeError>) -> Self {
        Self { tag, build }
    }
}

impl<F> std::fmt::Debug for Variant<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Variant").field("tag", &self.tag).finish_non_exhaustive()
    }
}

/// A family of response types sharing a discriminator field.
///
/// The table of members is static: resolution never inspects anything but
/// the discriminator value.
pub trait OneOf: Sized + 'static {
    /// Family name used in errors.
    const FAMILY: &'static str;

    /// JSON field holding the discriminator.
    const DISCRIMINATOR: &'static str;

    /// Known members keyed by discriminator value.
    const VARIANTS: &'static [Variant<Self>];
}

/// Decodes a member of family `F`.
///
/// # Errors
///
/// - [`ProtocolError::MissingDiscriminator`] if the field is absent or not
///   a string
/// - [`ProtocolError::UnknownDiscriminator`] if no member has the tag
/// - whatever the selected member's constructor returns
pub fn decode_one_of<F: OneOf>(value: Value) -> Result<F, DecodeError> {
    let tag = value
        .get(F::DISCRIMINATOR)
        .and_then(Value::as_str)
        .ok_or(ProtocolError::MissingDiscriminator {
            family: F::FAMILY,
            field: F::DISCRIMINATOR,
        })?;

    let variant = F::VARIANTS
        .iter()
        .find(|variant| variant.tag == tag)
        .ok_or_else(|| ProtocolError::UnknownDiscriminator {
            family: F::FAMILY,
            field: F::DISCRIMINATOR,
            value: tag.to_string(),
        })?;

    tracing::trace!(family = F::FAMILY, tag, "resolved polymorphic response");
    (variant.build)(value)
}
