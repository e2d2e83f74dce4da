//! Error types for the request cache
//!
//! Provides unified error handling using thiserror.
//!
//! The surface is deliberately small: cache reads express absence through
//! `Option`, and producer failures pass through the coalescer as the
//! caller's own error type. Only construction-time misconfiguration is an
//! error of this crate.

use thiserror::Error;

// == Config Error Enum ==
/// Construction-time configuration errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Capacity must be a positive entry count
    #[error("cache capacity must be positive, got {0}")]
    InvalidCapacity(usize),

    /// TTL must be a positive duration
    #[error("cache TTL must be a positive duration")]
    InvalidTtl,
}

// == Result Type Alias ==
/// Convenience Result type for configuration.
pub type Result<T> = std::result::Result<T, ConfigError>;
