//! Inbound ports (driving side): interfaces that HTTP and CLI adapters call.

pub mod registry;
