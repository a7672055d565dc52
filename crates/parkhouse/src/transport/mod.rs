//! Transport layer for parkhouse.
//!
//! Currently provides HTTP transport via axum. The console menu lives in the
//! `parkhouse` binary and talks to the service directly.

pub mod http;

pub use http::{ServerConfig, serve};
