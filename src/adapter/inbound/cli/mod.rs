//! CLI module graph.

pub mod command;
pub mod config;
pub mod dispatch;
pub mod migrate;
pub mod output;
pub mod schools;
pub mod serve;
