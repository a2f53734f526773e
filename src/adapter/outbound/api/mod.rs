//! Client side of the school directory HTTP API.

pub mod client;
pub mod dto;

pub use client::HttpSchoolApi;
