//! # Mutation Orchestration
//!
//! The core of the service: the update and delete orchestrators. Both
//! run against a caller-owned connection, open exactly one transaction,
//! and rely on `rusqlite::Transaction`'s rollback-on-drop so that every
//! early return after the transaction opens unwinds all writes.

pub mod delete;
pub mod diff;
pub mod error;
pub mod update;

pub use delete::delete_item;
pub use error::{ItemError, ServiceResult};
pub use update::update_item;
