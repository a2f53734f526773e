//! SQLite persistence for the `schools` table using Diesel ORM.

pub mod database;
pub mod store;

pub use store::SqliteSchoolStore;
