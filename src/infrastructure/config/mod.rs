//! Infrastructure configuration modules.

pub mod client;
pub mod database;
pub mod logging;
pub mod server;
pub mod settings;
pub mod upload;
