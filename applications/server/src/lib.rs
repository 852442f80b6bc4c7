//! Anonbeats Server Library
//!
//! Password-gated personal music server over a remote media host.
//!
//! This library exposes the core components for testing purposes.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod router;
pub mod state;

// Re-export commonly used types for convenience
pub use config::{GateSettings, ServerConfig, ServerSettings};
pub use error::{Result, ServerError};
pub use router::create_router;
pub use state::AppState;
