//! item-api - transactional mutation service for the item aggregate
//!
//! An item is one primary record plus two optional children (a physical
//! dimension and a geographic location reached through a join row). The
//! service mutates all three as one consistency unit: every write of a
//! request commits together or not at all.

pub mod cli;
pub mod config;
pub mod idcodec;
pub mod model;
pub mod observability;
pub mod requests;
pub mod rest_api;
pub mod service;
pub mod store;
