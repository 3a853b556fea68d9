//! # REST API
//!
//! The HTTP surface: the `/v2/item` mutation endpoints, the wire
//! envelope, and the error-to-response mapping.

pub mod errors;
pub mod response;
pub mod routes;
pub mod server;

pub use response::Envelope;
pub use routes::AppState;
pub use server::HttpServer;
