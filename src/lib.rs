//! Schoolyard - a school directory with image uploads.
//!
//! Schools are registered through a multipart `POST /schools` (six text
//! fields plus an optional image) and listed newest-first through
//! `GET /schools`. A typed client, a registration form state machine, and
//! a searchable directory view model cover the client side.
//!
//! # Architecture
//!
//! The crate follows a hexagonal layout:
//!
//! - [`domain`] - School entity, field rules, upload policy, search
//! - [`port`] - Traits the application depends on
//! - [`application`] - Use cases and client view models
//! - [`adapter`] - HTTP and CLI inbound; SQLite, disk, and HTTP client outbound
//! - [`infrastructure`] - Configuration and wiring
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```
//! use schoolyard::domain::{filter_schools, School};
//!
//! let schools: Vec<School> = Vec::new();
//! assert!(filter_schools(&schools, "alpha").is_empty());
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;
