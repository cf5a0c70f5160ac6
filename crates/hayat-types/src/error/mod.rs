//! Typed error definitions for Hayat Ai.
//!
//! Two domains:
//!
//! - [`GenerationError`] - per-request failures (validation, backend, artifact, image processing)
//! - [`ConfigError`] - startup configuration failures, always fatal
//!
//! Both are `Clone` + serde so they can cross the HTTP boundary and be matched in tests.

mod config;
mod generation;

pub use config::ConfigError;
pub use generation::GenerationError;

/// Standard Result type using GenerationError.
pub type Result<T> = std::result::Result<T, GenerationError>;
