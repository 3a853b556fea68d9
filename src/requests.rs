//! # Request Forms
//!
//! Typed request bodies plus their validation. The update endpoint
//! validates in two passes: the item form up front, and the narrower
//! location form only once the orchestrator knows a location link
//! exists for the item (the location fields are conditional).

use serde::Deserialize;
use serde_json::Value;

use crate::service::error::ItemError;

/// Body of `PATCH /v2/item/{item_id}`.
///
/// `product_id` and `storefront_id` arrive in opaque encoded form and
/// are decoded inside the transaction. `width`/`height` are optional;
/// absence means "not requested" and produces no dimension write.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateItemForm {
    pub product_id: String,
    pub storefront_id: String,
    pub headlines: String,
    pub description: String,
    pub minimum_order: i64,
    pub price: i64,
    pub display_flag: bool,
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
}

impl UpdateItemForm {
    /// First validation pass over the raw body.
    pub fn from_body(body: &Value) -> Result<Self, ItemError> {
        let form: Self = serde_json::from_value(body.clone())
            .map_err(|e| ItemError::Validation(e.to_string()))?;

        for (field, value) in [
            ("product_id", &form.product_id),
            ("storefront_id", &form.storefront_id),
            ("headlines", &form.headlines),
            ("description", &form.description),
        ] {
            require_non_empty(field, value)?;
        }

        Ok(form)
    }
}

/// Location portion of the update body, validated only when the item
/// has a location link.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateLocationForm {
    #[serde(rename = "location_country_id")]
    pub country_id: String,
    #[serde(rename = "location_province_id")]
    pub province_id: String,
    #[serde(rename = "location_city_id")]
    pub city_id: String,
    pub latitude: String,
    pub longitude: String,
    pub title: String,
    pub address: String,
    pub google_maps: String,
}

impl UpdateLocationForm {
    /// Second, narrower validation pass over the same raw body.
    pub fn from_body(body: &Value) -> Result<Self, ItemError> {
        let form: Self = serde_json::from_value(body.clone())
            .map_err(|e| ItemError::Validation(e.to_string()))?;

        for (field, value) in [
            ("location_country_id", &form.country_id),
            ("location_province_id", &form.province_id),
            ("location_city_id", &form.city_id),
            ("title", &form.title),
        ] {
            require_non_empty(field, value)?;
        }

        Ok(form)
    }
}

fn require_non_empty(field: &str, value: &str) -> Result<(), ItemError> {
    if value.trim().is_empty() {
        return Err(ItemError::Validation(format!(
            "The field '{field}' is required"
        )));
    }
    Ok(())
}
