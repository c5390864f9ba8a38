//! # Quill API
//!
//! HTTP layer of the Quill blog service: routing, handlers, error mapping,
//! configuration and telemetry. The binaries in this package are thin
//! wrappers over these modules.

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod observability;
pub mod state;
pub mod telemetry;

pub use config::AppConfig;
pub use state::AppState;
