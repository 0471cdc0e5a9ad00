//! Core utilities shared across the TAC crates
//!
//! This crate provides:
//!
//! - **Error handling**: Coded errors with context and recovery suggestions
//! - **Configuration**: TOML-based configuration with validation
//! - **Resilience**: Retry backoff and a circuit breaker for upstream calls
//!
//! # Example
//!
//! ```rust,no_run
//! use tac_core::config::Config;
//!
//! let config = Config::load(None).expect("invalid configuration");
//! println!("Searching {} m around the click", config.schema.search.radius_m);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

#[allow(missing_docs)]
pub mod config;
#[allow(missing_docs)]
pub mod error;
pub mod retry;

pub use error::{Error, ErrorCode, Result, ResultExt};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{Config, ConfigSchema};
    pub use crate::error::{exit_codes, Error, ErrorCode, Result, ResultExt};
    pub use crate::retry::{CircuitBreaker, CircuitBreakerConfig, CircuitState, RetryConfig};
}
