//! HTTP API.
//!
//! | Route                  | Method | Handler                      |
//! |------------------------|--------|------------------------------|
//! | `/health`              | GET    | liveness, plain `OK`         |
//! | `/schools`             | GET    | list, newest first           |
//! | `/schools`             | POST   | multipart create             |
//! | `/schools`             | other  | 405 with `Allow: GET, POST`  |
//! | `<public_path>/<file>` | GET    | stored images, read-only     |

pub mod handler;
pub mod multipart;
pub mod response;
pub mod router;
pub mod server;
