//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports define the extension points in the hexagonal architecture.
//! Adapters implement them to plug in storage, disk, and HTTP.
//!
//! # Architecture
//!
//! ```text
//!   ┌───────────┐                                   ┌──────────────┐
//!   │ HTTP / CLI│──► inbound::SchoolRegistry ──►    │  Application │
//!   └───────────┘                                   └──────┬───────┘
//!                                                          │
//!              ┌───────────────────────┬───────────────────┤
//!              ▼                       ▼                   ▼
//!       ┌─────────────┐        ┌──────────────┐    ┌──────────────┐
//!       │ SchoolStore │        │  ImageStore  │    │  SchoolApi   │
//!       │ (SQLite)    │        │  (disk)      │    │  (HTTP client│
//!       └─────────────┘        └──────────────┘    └──────────────┘
//! ```

pub mod inbound;
pub mod outbound;
