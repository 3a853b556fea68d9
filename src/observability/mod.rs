//! # Observability
//!
//! Structured logging only. Internal error text (raw storage and decode
//! failures) goes through here and never onto the wire.

mod logger;

pub use logger::{Logger, Severity};
