//! Core utilities, configuration, errors, and the shared HTTP client

pub mod config;
pub mod error;
pub mod http;

// Re-exports for convenience
pub use config::{Config, StoreBackend};
pub use error::{AppError, AppResult, FetchError, StoreError};
