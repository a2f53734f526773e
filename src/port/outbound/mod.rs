//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe infrastructure dependencies: the school table,
//! the image directory, and the HTTP API as seen from a client.

pub mod api;
pub mod image;
pub mod store;
