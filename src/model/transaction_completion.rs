//! Transaction completions.

use serde::{Deserialize, Serialize};

use super::string_enum;
use crate::decode::{Model, Property, PropertyType};

string_enum! {
    /// Progress of a completion.
    TransactionCompletionState {
        Create => "CREATE",
        Scheduled => "SCHEDULED",
        Pending => "PENDING",
        Failed => "FAILED",
        Successful => "SUCCESSFUL",
    }
}

/// Capture of an authorized transaction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionCompletion {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_space_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_transaction: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    /// Whether this completion ends the transaction
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_completion: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processor_reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_on: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<TransactionCompletionState>,
}

impl TransactionCompletion {
    /// Returns true once the completion reached a final state.
    #[must_use]
    pub const fn is_final(&self) -> bool {
        matches!(
            self.state,
            Some(TransactionCompletionState::Failed | TransactionCompletionState::Successful)
        )
    }
}

impl Model for TransactionCompletion {
    const NAME: &'static str = "TransactionCompletion";
    const PROPERTIES: &'static [Property] = &[
        Property::new("id", PropertyType::Integer),
        Property::new("version", PropertyType::Integer),
        Property::new("linkedSpaceId", PropertyType::Integer),
        Property::new("linkedTransaction", PropertyType::Integer),
        Property::new("amount", PropertyType::Number),
        Property::new("externalId", PropertyType::String),
        Property::new("lastCompletion", PropertyType::Boolean),
        Property::new("processorReference", PropertyType::String),
        Property::new("createdOn", PropertyType::String),
        Property::new(
            "state",
            PropertyType::Enum(TransactionCompletionState::VALUES),
        ),
    ];
}

crate::impl_model_decode!(TransactionCompletion);
