//! Single-resource HTTP status service.
//!
//! The service keeps one string, the *status*, in memory and exposes it on
//! `/status`:
//!
//! ```text
//! GET  /status                -> 200 "idle"
//! POST /status?state=running  -> 200 "running"
//! GET  /status                -> 200 "running"
//! ```
//!
//! Nothing is persisted; the value resets on restart.
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`status`]: The shared status cell
//! - [`api`]: HTTP router, handlers and OpenAPI document
//! - [`metrics`]: Prometheus counters and latency histograms
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod status;
pub mod utils;

pub use config::Config;
pub use error::{ApiError, Result, ServiceError};
pub use status::StatusHolder;
