//! Application services (use cases).
//!
//! - [`school::SchoolService`] backs the HTTP API: validate, store the
//!   image, insert the row.
//! - [`form::RegistrationForm`] and [`directory::Directory`] are the client
//!   pages' view models, driven through a [`SchoolApi`](crate::port::outbound::api::SchoolApi).

pub mod directory;
pub mod form;
pub mod school;

pub use directory::{Directory, DirectoryState, EmptyReason};
pub use form::{Draft, FormState, RegistrationForm};
pub use school::SchoolService;
