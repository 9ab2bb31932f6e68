//! Operations on a transaction, returned polymorphically.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{TransactionCompletion, string_enum};
use crate::decode::{DecodeError, Model, OneOf, Property, PropertyType, Variant, decode_model};

string_enum! {
    /// Progress of a void.
    TransactionVoidState {
        Create => "CREATE",
        Pending => "PENDING",
        Failed => "FAILED",
        Successful => "SUCCESSFUL",
    }
}

string_enum! {
    /// Progress of a refund.
    RefundState {
        Create => "CREATE",
        Scheduled => "SCHEDULED",
        Pending => "PENDING",
        ManualCheck => "MANUAL_CHECK",
        Failed => "FAILED",
        Successful => "SUCCESSFUL",
    }
}

/// Cancellation of an authorized transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionVoid {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_transaction: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processor_reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<TransactionVoidState>,
}

impl Model for TransactionVoid {
    const NAME: &'static str = "TransactionVoid";
    const PROPERTIES: &'static [Property] = &[
        Property::new("id", PropertyType::Integer),
        Property::new("version", PropertyType::Integer),
        Property::new("linkedTransaction", PropertyType::Integer),
        Property::new("processorReference", PropertyType::String),
        Property::new("state", PropertyType::Enum(TransactionVoidState::VALUES)),
    ];
}

/// Money returned to the buyer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Refund {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant_reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<RefundState>,
}

impl Model for Refund {
    const NAME: &'static str = "Refund";
    const PROPERTIES: &'static [Property] = &[
        Property::new("id", PropertyType::Integer),
        Property::new("version", PropertyType::Integer),
        Property::new("amount", PropertyType::Number),
        Property::new("externalId", PropertyType::String),
        Property::new("merchantReference", PropertyType::String),
        Property::new("state", PropertyType::Enum(RefundState::VALUES)),
    ];
}

crate::impl_model_decode!(TransactionVoid, Refund);

/// Any operation performed on a transaction.
///
/// Responses carry a `type` field naming the concrete operation.
#[derive(Debug, Clone, PartialEq)]
pub enum TransactionOperation {
    Completion(TransactionCompletion),
    Void(TransactionVoid),
    Refund(Refund),
}

impl TransactionOperation {
    /// Id of the underlying operation.
    #[must_use]
    pub const fn id(&self) -> Option<i64> {
        match self {
            Self::Completion(op) => op.id,
            Self::Void(op) => op.id,
            Self::Refund(op) => op.id,
        }
    }
}

fn completion(value: Value) -> Result<TransactionOperation, DecodeError> {
    decode_model(value).map(TransactionOperation::Completion)
}

fn void(value: Value) -> Result<TransactionOperation, DecodeError> {
    decode_model(value).map(TransactionOperation::Void)
}

fn refund(value: Value) -> Result<TransactionOperation, DecodeError> {
    decode_model(value).map(TransactionOperation::Refund)
}

impl OneOf for TransactionOperation {
    const FAMILY: &'static str = "TransactionOperation";
    const DISCRIMINATOR: &'static str = "type";
    const VARIANTS: &'static [Variant<Self>] = &[
        Variant::new("COMPLETION", completion),
        Variant::new("VOID", void),
        Variant::new("REFUND", refund),
    ];
}

crate::impl_one_of_decode!(TransactionOperation);
