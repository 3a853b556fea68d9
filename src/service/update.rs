//! Update orchestrator.
//!
//! Step order matters and is part of the contract:
//!
//! 1. Decode the item id (failure is internal, not validation).
//! 2. Load the item outside any transaction; absent is a read-only
//!    short-circuit.
//! 3. Headline pre-check against every item. The check does not exclude
//!    the item being updated, so renaming an item to its own current
//!    headline reports a conflict. Kept as-is; see DESIGN.md.
//! 4. Open the transaction. From here every failure path must unwind
//!    all writes; the transaction rolls back on drop.
//! 5. Decode the form's opaque ids.
//! 6. Unconditionally write all item fields, changed or not.
//! 7. If a dimension row exists, write only the fields that differ.
//! 8. If a location link exists, run the narrower location validation
//!    pass, then rewrite the location only when its title changed.
//! 9. Commit.

use chrono::Utc;
use rusqlite::Connection;
use serde_json::Value;

use crate::idcodec::IdCodec;
use crate::requests::{UpdateItemForm, UpdateLocationForm};
use crate::store::{self, ItemFieldUpdate, LocationFieldUpdate};

use super::diff::{self, DimensionWrite};
use super::error::{is_unique_violation, ItemError, ServiceResult};

/// Apply one update request to the item aggregate.
pub fn update_item(
    conn: &mut Connection,
    codec: &IdCodec,
    raw_item_id: &str,
    form: &UpdateItemForm,
    body: &Value,
) -> ServiceResult<()> {
    let item_id = codec.decode(raw_item_id)?;

    if store::find_item(conn, item_id)?.is_none() {
        return Err(ItemError::NotFound);
    }

    if store::find_item_by_headlines(conn, &form.headlines)?.is_some() {
        return Err(ItemError::DuplicateHeadline);
    }

    let tx = conn.transaction()?;

    let product_id = codec.decode(&form.product_id)?;
    let storefront_id = codec.decode(&form.storefront_id)?;

    let fields = ItemFieldUpdate {
        product_id,
        storefront_id,
        headlines: form.headlines.clone(),
        description: form.description.clone(),
        minimum_order: form.minimum_order,
        price: form.price,
        display_flag: form.display_flag,
        updated_at: Utc::now().to_rfc3339(),
    };
    store::update_item_fields(&tx, item_id, &fields).map_err(|err| {
        if is_unique_violation(&err) {
            ItemError::DuplicateHeadline
        } else {
            ItemError::Storage(err)
        }
    })?;

    if let Some(dimension) = store::find_dimension_by_item(&tx, item_id)? {
        for write in diff::dimension_writes(&dimension, form.width, form.height) {
            match write {
                DimensionWrite::Width(width) => {
                    store::update_dimension_width(&tx, dimension.dimension_id, width)?
                }
                DimensionWrite::Height(height) => {
                    store::update_dimension_height(&tx, dimension.dimension_id, height)?
                }
            }
        }
    }

    if let Some(link) = store::find_location_link(&tx, item_id)? {
        let location_form = UpdateLocationForm::from_body(body)?;

        // A dangling link (location row missing) is skipped like an
        // absent link.
        if let Some(location) = store::find_location(&tx, link.location_id)? {
            if diff::location_needs_update(&location.title, &location_form.title) {
                let country_id = codec.decode(&location_form.country_id)?;
                let province_id = codec.decode(&location_form.province_id)?;
                let city_id = codec.decode(&location_form.city_id)?;

                store::update_location_fields(
                    &tx,
                    location.location_id,
                    &LocationFieldUpdate {
                        country_id,
                        province_id,
                        city_id,
                        latitude: location_form.latitude.clone(),
                        longitude: location_form.longitude.clone(),
                        title: location_form.title.clone(),
                        address: location_form.address.clone(),
                        google_maps: location_form.google_maps.clone(),
                    },
                )?;
            }
        }
    }

    tx.commit()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::open_in_memory;
    use serde_json::json;

    fn codec() -> IdCodec {
        IdCodec::new("unit-test-secret")
    }

    fn body_for(codec: &IdCodec, headlines: &str) -> Value {
        json!({
            "product_id": codec.encode(7),
            "storefront_id": codec.encode(8),
            "headlines": headlines,
            "description": "updated description",
            "minimum_order": 2,
            "price": 9000,
            "display_flag": true,
        })
    }

    fn run(conn: &mut Connection, codec: &IdCodec, raw_id: &str, body: &Value) -> ServiceResult<()> {
        let form = UpdateItemForm::from_body(body)?;
        update_item(conn, codec, raw_id, &form, body)
    }

    #[test]
    fn test_update_missing_item_is_not_found() {
        let mut conn = open_in_memory().unwrap();
        let codec = codec();
        let body = body_for(&codec, "sofa");
        let err = run(&mut conn, &codec, &codec.encode(404), &body).unwrap_err();
        assert!(matches!(err, ItemError::NotFound));
    }

    #[test]
    fn test_update_bad_item_id_is_decode_error() {
        let mut conn = open_in_memory().unwrap();
        let codec = codec();
        let body = body_for(&codec, "sofa");
        let err = run(&mut conn, &codec, "not-a-token", &body).unwrap_err();
        assert!(matches!(err, ItemError::Decode(_)));
    }

    #[test]
    fn test_update_writes_all_item_fields() {
        let mut conn = open_in_memory().unwrap();
        let codec = codec();
        let item_id = store::insert_item(&conn, "sofa", "a sofa").unwrap();

        let body = body_for(&codec, "sofa-new");
        run(&mut conn, &codec, &codec.encode(item_id), &body).unwrap();

        let item = store::find_item(&conn, item_id).unwrap().unwrap();
        assert_eq!(item.headlines, "sofa-new");
        assert_eq!(item.product_id, 7);
        assert_eq!(item.storefront_id, 8);
        assert_eq!(item.price, 9000);
    }

    #[test]
    fn test_duplicate_headline_conflicts_with_zero_writes() {
        let mut conn = open_in_memory().unwrap();
        let codec = codec();
        let item_id = store::insert_item(&conn, "sofa", "a sofa").unwrap();
        store::insert_item(&conn, "chair", "a chair").unwrap();

        let body = body_for(&codec, "chair");
        let err = run(&mut conn, &codec, &codec.encode(item_id), &body).unwrap_err();
        assert!(matches!(err, ItemError::DuplicateHeadline));

        let item = store::find_item(&conn, item_id).unwrap().unwrap();
        assert_eq!(item.headlines, "sofa");
        assert_eq!(item.product_id, 1);
    }

    #[test]
    fn test_renaming_to_own_headline_still_conflicts() {
        // The pre-check does not exclude the item itself. Kept behavior.
        let mut conn = open_in_memory().unwrap();
        let codec = codec();
        let item_id = store::insert_item(&conn, "sofa", "a sofa").unwrap();

        let body = body_for(&codec, "sofa");
        let err = run(&mut conn, &codec, &codec.encode(item_id), &body).unwrap_err();
        assert!(matches!(err, ItemError::DuplicateHeadline));
    }

    #[test]
    fn test_dimension_height_written_width_skipped() {
        let mut conn = open_in_memory().unwrap();
        let codec = codec();
        let item_id = store::insert_item(&conn, "sofa", "a sofa").unwrap();
        store::insert_dimension(&conn, item_id, 10.0, 20.0).unwrap();

        let mut body = body_for(&codec, "sofa-new");
        body["width"] = json!(10.0);
        body["height"] = json!(25.0);
        run(&mut conn, &codec, &codec.encode(item_id), &body).unwrap();

        let dim = store::find_dimension_by_item(&conn, item_id).unwrap().unwrap();
        assert_eq!(dim.width, 10.0);
        assert_eq!(dim.height, 25.0);
        let item = store::find_item(&conn, item_id).unwrap().unwrap();
        assert_eq!(item.headlines, "sofa-new");
    }

    #[test]
    fn test_missing_dimension_is_skipped() {
        let mut conn = open_in_memory().unwrap();
        let codec = codec();
        let item_id = store::insert_item(&conn, "sofa", "a sofa").unwrap();

        let mut body = body_for(&codec, "sofa-new");
        body["width"] = json!(99.0);
        run(&mut conn, &codec, &codec.encode(item_id), &body).unwrap();

        assert!(store::find_dimension_by_item(&conn, item_id).unwrap().is_none());
    }

    fn seed_location(conn: &Connection, item_id: i64, title: &str) -> i64 {
        let location_id = store::insert_location(
            conn,
            &LocationFieldUpdate {
                country_id: 1,
                province_id: 2,
                city_id: 3,
                latitude: "-6.2".into(),
                longitude: "106.8".into(),
                title: title.into(),
                address: "Jl. Example 1".into(),
                google_maps: "https://maps.example/1".into(),
            },
        )
        .unwrap();
        store::insert_location_link(conn, item_id, location_id).unwrap();
        location_id
    }

    fn location_body(codec: &IdCodec, headlines: &str, title: &str) -> Value {
        let mut body = body_for(codec, headlines);
        body["location_country_id"] = json!(codec.encode(11));
        body["location_province_id"] = json!(codec.encode(12));
        body["location_city_id"] = json!(codec.encode(13));
        body["latitude"] = json!("-7.8");
        body["longitude"] = json!("110.4");
        body["title"] = json!(title);
        body["address"] = json!("Jl. Changed 2");
        body["google_maps"] = json!("https://maps.example/2");
        body
    }

    #[test]
    fn test_location_rewritten_when_title_changes() {
        let mut conn = open_in_memory().unwrap();
        let codec = codec();
        let item_id = store::insert_item(&conn, "sofa", "a sofa").unwrap();
        let location_id = seed_location(&conn, item_id, "warehouse");

        let body = location_body(&codec, "sofa-new", "depot");
        run(&mut conn, &codec, &codec.encode(item_id), &body).unwrap();

        let location = store::find_location(&conn, location_id).unwrap().unwrap();
        assert_eq!(location.title, "depot");
        assert_eq!(location.country_id, 11);
        assert_eq!(location.latitude, "-7.8");
    }

    #[test]
    fn test_location_untouched_when_title_stable() {
        let mut conn = open_in_memory().unwrap();
        let codec = codec();
        let item_id = store::insert_item(&conn, "sofa", "a sofa").unwrap();
        let location_id = seed_location(&conn, item_id, "warehouse");

        // Same title, different everything else: no location write.
        let body = location_body(&codec, "sofa-new", "warehouse");
        run(&mut conn, &codec, &codec.encode(item_id), &body).unwrap();

        let location = store::find_location(&conn, location_id).unwrap().unwrap();
        assert_eq!(location.latitude, "-6.2");
        assert_eq!(location.address, "Jl. Example 1");
        assert_eq!(location.country_id, 1);
    }

    #[test]
    fn test_location_validation_failure_rolls_back_item_write() {
        let mut conn = open_in_memory().unwrap();
        let codec = codec();
        let item_id = store::insert_item(&conn, "sofa", "a sofa").unwrap();
        seed_location(&conn, item_id, "warehouse");

        // Link exists but the body has no location fields: the second
        // validation pass fails after the item update, which must not
        // survive.
        let body = body_for(&codec, "sofa-new");
        let err = run(&mut conn, &codec, &codec.encode(item_id), &body).unwrap_err();
        assert!(matches!(err, ItemError::Validation(_)));

        let item = store::find_item(&conn, item_id).unwrap().unwrap();
        assert_eq!(item.headlines, "sofa");
    }

    #[test]
    fn test_geo_id_decode_failure_rolls_back_everything() {
        let mut conn = open_in_memory().unwrap();
        let codec = codec();
        let item_id = store::insert_item(&conn, "sofa", "a sofa").unwrap();
        store::insert_dimension(&conn, item_id, 10.0, 20.0).unwrap();
        seed_location(&conn, item_id, "warehouse");

        let mut body = location_body(&codec, "sofa-new", "depot");
        body["height"] = json!(25.0);
        body["location_city_id"] = json!("tampered-token");
        let err = run(&mut conn, &codec, &codec.encode(item_id), &body).unwrap_err();
        assert!(matches!(err, ItemError::Decode(_)));

        // Item and dimension writes preceding the failure are unwound.
        let item = store::find_item(&conn, item_id).unwrap().unwrap();
        assert_eq!(item.headlines, "sofa");
        let dim = store::find_dimension_by_item(&conn, item_id).unwrap().unwrap();
        assert_eq!(dim.height, 20.0);
    }
}
