//! API client for the TAC Supabase backend
//!
//! This crate provides a resilient HTTP client for reading parking spots
//! from a Supabase (PostgREST) table.
//!
//! # Features
//!
//! - **Environment-based configuration**: Load URLs and keys from environment variables
//! - **Retry with exponential backoff**: Automatic retry for transient failures
//! - **Circuit breaker**: Prevent cascading failures during outages
//! - **Request correlation**: Track requests with unique IDs for debugging
//!
//! # Example
//!
//! ```rust,no_run
//! use tac_api_client::TacClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = TacClient::new()?;
//!
//!     let spots = client.spots("posto").list().await?;
//!     println!("{} parking spots known", spots.len());
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;

pub use client::TacClient;
pub use config::{ClientConfig, Environment};
pub use error::{ApiError, ApiResult};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::client::TacClient;
    pub use crate::config::{ClientConfig, Environment};
    pub use crate::endpoints::{SpotsApi, TableStatus};
    pub use crate::error::{ApiError, ApiResult};
}
