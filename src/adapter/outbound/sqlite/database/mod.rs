//! SQLite database modules.
//!
//! Connection pooling, embedded migrations, schema definitions, and
//! Diesel row types.

pub mod connection;
pub mod model;
pub mod schema;
