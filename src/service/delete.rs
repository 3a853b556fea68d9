//! Delete orchestrator.
//!
//! Unlike update, the transaction opens before the existence check, so
//! the not-found path also unwinds through a rollback. Children are
//! removed before the parent: the storage schema is not assumed to
//! cascade deletes.

use rusqlite::Connection;

use crate::idcodec::IdCodec;
use crate::store;

use super::error::{ItemError, ServiceResult};

/// Remove an item and both of its optional children.
pub fn delete_item(conn: &mut Connection, codec: &IdCodec, raw_item_id: &str) -> ServiceResult<()> {
    let item_id = codec.decode(raw_item_id)?;

    let tx = conn.transaction()?;

    if store::find_item(&tx, item_id)?.is_none() {
        return Err(ItemError::NotFound);
    }

    if store::find_dimension_by_item(&tx, item_id)?.is_some() {
        store::delete_dimension_by_item(&tx, item_id)?;
    }

    if let Some(link) = store::find_location_link(&tx, item_id)? {
        store::delete_location(&tx, link.location_id)?;
        store::delete_location_link(&tx, link.item_x_location_id)?;
    }

    store::delete_item_row(&tx, item_id)?;

    tx.commit()?;
    Ok(())
}
