//! Adapters connecting the application to the outside world.
//!
//! - `inbound` drives the application (HTTP handlers, CLI).
//! - `outbound` is driven by it (SQLite, image files, the remote API).

pub mod inbound;
pub mod outbound;
