//! Metered fees of subscription products.

use serde::{Deserialize, Serialize};

use super::string_enum;
use crate::decode::{Model, Property, PropertyType, Violation};

string_enum! {
    /// How usage is priced across tiers.
    ProductMeteredTierPricing {
        /// The whole usage is charged at the cheapest reached tier.
        CheapestTierPricing => "CHEAPEST_TIER_PRICING",
        /// Each tier charges the usage that falls into it.
        IncrementalDiscountPricing => "INCREMENTAL_DISCOUNT_PRICING",
    }
}

/// One translation of a localized string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseTranslatedStringItem {
    /// IETF language tag, e.g. `en-US`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translation: Option<String>,
}

/// A localized string as sent by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseTranslatedString {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_languages: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<DatabaseTranslatedStringItem>>,
}

/// A localized string as sent by the client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseTranslatedStringCreate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<DatabaseTranslatedStringItem>>,
}

impl DatabaseTranslatedStringCreate {
    /// Adds a translation.
    #[must_use]
    pub fn with(mut self, language: impl Into<String>, translation: impl Into<String>) -> Self {
        self.items
            .get_or_insert_with(Vec::new)
            .push(DatabaseTranslatedStringItem {
                language: Some(language.into()),
                translation: Some(translation.into()),
            });
        self
    }
}

/// A metered fee as stored by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductMeteredFee {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_space_id: Option<i64>,
    /// Product component the fee belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<DatabaseTranslatedString>,
    /// Metric the usage is measured in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<DatabaseTranslatedString>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier_pricing: Option<ProductMeteredTierPricing>,
}

impl Model for ProductMeteredFee {
    const NAME: &'static str = "ProductMeteredFee";
    const PROPERTIES: &'static [Property] = &[
        Property::new("id", PropertyType::Integer),
        Property::new("version", PropertyType::Integer),
        Property::new("linkedSpaceId", PropertyType::Integer),
        Property::new("component", PropertyType::Integer),
        Property::new("description", PropertyType::Model),
        Property::new("metric", PropertyType::Integer),
        Property::new("name", PropertyType::Model),
        Property::new(
            "tierPricing",
            PropertyType::Enum(ProductMeteredTierPricing::VALUES),
        ),
    ];
}

/// Changes to an existing metered fee.
///
/// `id` and `version` identify the revision being changed; the server
/// rejects the update with 409 when the stored version moved on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductMeteredFeeUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<DatabaseTranslatedStringCreate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<DatabaseTranslatedStringCreate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier_pricing: Option<ProductMeteredTierPricing>,
}

impl ProductMeteredFeeUpdate {
    /// Starts an update of revision `version` of fee `id`.
    #[must_use]
    pub fn new(id: i64, version: i64) -> Self {
        Self {
            id: Some(id),
            version: Some(version),
            ..Self::default()
        }
    }
}

impl Model for ProductMeteredFeeUpdate {
    const NAME: &'static str = "ProductMeteredFeeUpdate";
    const PROPERTIES: &'static [Property] = &[
        Property::new("id", PropertyType::Integer),
        Property::new("version", PropertyType::Integer),
        Property::new("component", PropertyType::Integer),
        Property::new("description", PropertyType::Model),
        Property::new("metric", PropertyType::Integer),
        Property::new("name", PropertyType::Model),
        Property::new(
            "tierPricing",
            PropertyType::Enum(ProductMeteredTierPricing::VALUES),
        ),
    ];

    fn validate(&self) -> Vec<Violation> {
        let mut violations = Vec::new();
        if self.id.is_none() {
            violations.push(Violation::required("id"));
        }
        if self.version.is_none() {
            violations.push(Violation::required("version"));
        }
        violations
    }
}

crate::impl_model_decode!(ProductMeteredFee, ProductMeteredFeeUpdate);
