//! # Domain Rows
//!
//! Row structs for the item aggregate. An `Item` owns at most one
//! `Dimension` and at most one `Location` (reached through
//! `ItemLocationLink`); both children are optional.

use serde::Serialize;

/// Primary item record.
#[derive(Debug, Clone, Serialize)]
pub struct Item {
    pub item_id: i64,
    pub product_id: i64,
    pub storefront_id: i64,
    pub headlines: String,
    pub description: String,
    pub minimum_order: i64,
    pub price: i64,
    pub display_flag: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// Physical dimension of an item. 0-or-1 per item.
#[derive(Debug, Clone, Serialize)]
pub struct Dimension {
    pub dimension_id: i64,
    pub item_id: i64,
    pub width: f64,
    pub height: f64,
}

/// Geographic location. `title` is the change-detection key: location
/// updates are skipped entirely when the stored title matches the
/// requested one.
#[derive(Debug, Clone, Serialize)]
pub struct Location {
    pub location_id: i64,
    pub country_id: i64,
    pub province_id: i64,
    pub city_id: i64,
    pub latitude: String,
    pub longitude: String,
    pub title: String,
    pub address: String,
    pub google_maps: String,
}

/// Join row mapping one item to one location. 0-or-1 per item.
#[derive(Debug, Clone, Serialize)]
pub struct ItemLocationLink {
    pub item_x_location_id: i64,
    pub item_id: i64,
    pub location_id: i64,
}
