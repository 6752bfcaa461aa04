//! HTTP API module for the status resource, health, and metrics endpoints.

pub mod handlers;
pub mod routes;

pub use handlers::AppState;
pub use routes::{create_router, ApiDoc};
