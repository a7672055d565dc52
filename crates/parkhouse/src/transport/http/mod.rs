mod routes;
mod server;

pub use routes::{HealthCheckResponse, routes};
pub use server::{ServerConfig, serve};
