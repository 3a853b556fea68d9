//! Row-level reads and writes for the item aggregate tables.
//!
//! Lookups return `Option` via `OptionalExtension`; absence of an
//! optional child is a normal outcome, not an error.

use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::model::{Dimension, Item, ItemLocationLink, Location};

/// New values for the unconditional item field update.
#[derive(Debug, Clone)]
pub struct ItemFieldUpdate {
    pub product_id: i64,
    pub storefront_id: i64,
    pub headlines: String,
    pub description: String,
    pub minimum_order: i64,
    pub price: i64,
    pub display_flag: bool,
    pub updated_at: String,
}

/// New values for the full location field update.
#[derive(Debug, Clone)]
pub struct LocationFieldUpdate {
    pub country_id: i64,
    pub province_id: i64,
    pub city_id: i64,
    pub latitude: String,
    pub longitude: String,
    pub title: String,
    pub address: String,
    pub google_maps: String,
}

fn item_from_row(row: &Row<'_>) -> Result<Item, rusqlite::Error> {
    Ok(Item {
        item_id: row.get(0)?,
        product_id: row.get(1)?,
        storefront_id: row.get(2)?,
        headlines: row.get(3)?,
        description: row.get(4)?,
        minimum_order: row.get(5)?,
        price: row.get(6)?,
        display_flag: row.get(7)?,
        created_at: row.get(8)?,
        updated_at: row.get(9)?,
    })
}

const ITEM_COLUMNS: &str = "item_id, product_id, storefront_id, headlines, description, \
                            minimum_order, price, display_flag, created_at, updated_at";

pub fn find_item(conn: &Connection, item_id: i64) -> Result<Option<Item>, rusqlite::Error> {
    conn.query_row(
        &format!("SELECT {ITEM_COLUMNS} FROM items WHERE item_id = ?1"),
        params![item_id],
        item_from_row,
    )
    .optional()
}

pub fn find_item_by_headlines(
    conn: &Connection,
    headlines: &str,
) -> Result<Option<Item>, rusqlite::Error> {
    conn.query_row(
        &format!("SELECT {ITEM_COLUMNS} FROM items WHERE headlines = ?1"),
        params![headlines],
        item_from_row,
    )
    .optional()
}

pub fn update_item_fields(
    conn: &Connection,
    item_id: i64,
    fields: &ItemFieldUpdate,
) -> Result<(), rusqlite::Error> {
    conn.execute(
        r#"
        UPDATE items
           SET product_id = ?1, storefront_id = ?2, headlines = ?3, description = ?4,
               minimum_order = ?5, price = ?6, display_flag = ?7, updated_at = ?8
         WHERE item_id = ?9
        "#,
        params![
            fields.product_id,
            fields.storefront_id,
            fields.headlines,
            fields.description,
            fields.minimum_order,
            fields.price,
            fields.display_flag,
            fields.updated_at,
            item_id
        ],
    )?;
    Ok(())
}

pub fn delete_item_row(conn: &Connection, item_id: i64) -> Result<(), rusqlite::Error> {
    conn.execute("DELETE FROM items WHERE item_id = ?1", params![item_id])?;
    Ok(())
}

pub fn find_dimension_by_item(
    conn: &Connection,
    item_id: i64,
) -> Result<Option<Dimension>, rusqlite::Error> {
    conn.query_row(
        "SELECT dimension_id, item_id, width, height FROM dimensions WHERE item_id = ?1",
        params![item_id],
        |row| {
            Ok(Dimension {
                dimension_id: row.get(0)?,
                item_id: row.get(1)?,
                width: row.get(2)?,
                height: row.get(3)?,
            })
        },
    )
    .optional()
}

pub fn update_dimension_width(
    conn: &Connection,
    dimension_id: i64,
    width: f64,
) -> Result<(), rusqlite::Error> {
    conn.execute(
        "UPDATE dimensions SET width = ?1 WHERE dimension_id = ?2",
        params![width, dimension_id],
    )?;
    Ok(())
}

pub fn update_dimension_height(
    conn: &Connection,
    dimension_id: i64,
    height: f64,
) -> Result<(), rusqlite::Error> {
    conn.execute(
        "UPDATE dimensions SET height = ?1 WHERE dimension_id = ?2",
        params![height, dimension_id],
    )?;
    Ok(())
}

pub fn delete_dimension_by_item(conn: &Connection, item_id: i64) -> Result<(), rusqlite::Error> {
    conn.execute("DELETE FROM dimensions WHERE item_id = ?1", params![item_id])?;
    Ok(())
}

pub fn find_location_link(
    conn: &Connection,
    item_id: i64,
) -> Result<Option<ItemLocationLink>, rusqlite::Error> {
    conn.query_row(
        "SELECT item_x_location_id, item_id, location_id FROM item_x_locations WHERE item_id = ?1",
        params![item_id],
        |row| {
            Ok(ItemLocationLink {
                item_x_location_id: row.get(0)?,
                item_id: row.get(1)?,
                location_id: row.get(2)?,
            })
        },
    )
    .optional()
}

pub fn delete_location_link(conn: &Connection, link_id: i64) -> Result<(), rusqlite::Error> {
    conn.execute(
        "DELETE FROM item_x_locations WHERE item_x_location_id = ?1",
        params![link_id],
    )?;
    Ok(())
}

pub fn find_location(
    conn: &Connection,
    location_id: i64,
) -> Result<Option<Location>, rusqlite::Error> {
    conn.query_row(
        r#"
        SELECT location_id, country_id, province_id, city_id, latitude, longitude,
               title, address, google_maps
          FROM locations WHERE location_id = ?1
        "#,
        params![location_id],
        |row| {
            Ok(Location {
                location_id: row.get(0)?,
                country_id: row.get(1)?,
                province_id: row.get(2)?,
                city_id: row.get(3)?,
                latitude: row.get(4)?,
                longitude: row.get(5)?,
                title: row.get(6)?,
                address: row.get(7)?,
                google_maps: row.get(8)?,
            })
        },
    )
    .optional()
}

pub fn update_location_fields(
    conn: &Connection,
    location_id: i64,
    fields: &LocationFieldUpdate,
) -> Result<(), rusqlite::Error> {
    conn.execute(
        r#"
        UPDATE locations
           SET country_id = ?1, province_id = ?2, city_id = ?3, latitude = ?4,
               longitude = ?5, title = ?6, address = ?7, google_maps = ?8
         WHERE location_id = ?9
        "#,
        params![
            fields.country_id,
            fields.province_id,
            fields.city_id,
            fields.latitude,
            fields.longitude,
            fields.title,
            fields.address,
            fields.google_maps,
            location_id
        ],
    )?;
    Ok(())
}

pub fn delete_location(conn: &Connection, location_id: i64) -> Result<(), rusqlite::Error> {
    conn.execute(
        "DELETE FROM locations WHERE location_id = ?1",
        params![location_id],
    )?;
    Ok(())
}

// Items are created by the sibling ingest service; these inserts exist
// for seeding and for tests.

pub fn insert_item(
    conn: &Connection,
    headlines: &str,
    description: &str,
) -> Result<i64, rusqlite::Error> {
    let now = chrono::Utc::now().to_rfc3339();
    conn.execute(
        r#"
        INSERT INTO items (product_id, storefront_id, headlines, description,
                           minimum_order, price, display_flag, created_at, updated_at)
        VALUES (1, 1, ?1, ?2, 1, 0, 1, ?3, ?3)
        "#,
        params![headlines, description, now],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn insert_dimension(
    conn: &Connection,
    item_id: i64,
    width: f64,
    height: f64,
) -> Result<i64, rusqlite::Error> {
    conn.execute(
        "INSERT INTO dimensions (item_id, width, height) VALUES (?1, ?2, ?3)",
        params![item_id, width, height],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn insert_location(
    conn: &Connection,
    fields: &LocationFieldUpdate,
) -> Result<i64, rusqlite::Error> {
    conn.execute(
        r#"
        INSERT INTO locations (country_id, province_id, city_id, latitude, longitude,
                               title, address, google_maps)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
        "#,
        params![
            fields.country_id,
            fields.province_id,
            fields.city_id,
            fields.latitude,
            fields.longitude,
            fields.title,
            fields.address,
            fields.google_maps
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn insert_location_link(
    conn: &Connection,
    item_id: i64,
    location_id: i64,
) -> Result<i64, rusqlite::Error> {
    conn.execute(
        "INSERT INTO item_x_locations (item_id, location_id) VALUES (?1, ?2)",
        params![item_id, location_id],
    )?;
    Ok(conn.last_insert_rowid())
}
