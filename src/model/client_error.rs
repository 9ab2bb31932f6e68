//! Body of a 4xx response.

use serde::{Deserialize, Serialize};

use super::string_enum;

string_enum! {
    /// Who is expected to fix a rejected request.
    ClientErrorType {
        /// The end user entered something invalid.
        EndUserError => "END_USER_ERROR",
        /// The account or space is misconfigured.
        ConfigurationError => "CONFIGURATION_ERROR",
        /// The calling code is wrong.
        DeveloperError => "DEVELOPER_ERROR",
    }
}

/// Error object returned with a 4xx status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientErrorBody {
    /// Error instance id, useful in support requests
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// When the error happened
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Message localized for the caller
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Message in the default language
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_message: Option<String>,
    /// Error category
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub error_type: Option<ClientErrorType>,
    /// Offending field, for validation errors
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ClientErrorBody {
    /// The localized message, else the default one.
    #[must_use]
    pub fn best_message(&self) -> Option<&str> {
        self.message
            .as_deref()
            .or(self.default_message.as_deref())
            .filter(|m| !m.trim().is_empty())
    }
}
