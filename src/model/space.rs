//! Spaces: the tenants every resource belongs to.

use serde::{Deserialize, Serialize};

use super::string_enum;
use crate::decode::{Model, Property, PropertyType};

string_enum! {
    /// Lifecycle state of a space.
    SpaceReferenceState {
        RestrictedActive => "RESTRICTED_ACTIVE",
        Active => "ACTIVE",
        Inactive => "INACTIVE",
        Deleting => "DELETING",
        Deleted => "DELETED",
    }
}

/// A space (tenant).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Space {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<SpaceReferenceState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technical_contact_addresses: Option<Vec<String>>,
}

impl Model for Space {
    const NAME: &'static str = "Space";
    const PROPERTIES: &'static [Property] = &[
        Property::new("id", PropertyType::Integer),
        Property::new("version", PropertyType::Integer),
        Property::new("account", PropertyType::Integer),
        Property::new("name", PropertyType::String),
        Property::new("state", PropertyType::Enum(SpaceReferenceState::VALUES)),
        Property::new("timeZone", PropertyType::String),
        Property::new(
            "technicalContactAddresses",
            PropertyType::List(&PropertyType::String),
        ),
    ];
}

crate::impl_model_decode!(Space);
