//! Outbound adapters: storage, image files, and the remote API.

pub mod api;
pub mod disk;
pub mod memory;
pub mod sqlite;
