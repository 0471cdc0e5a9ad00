//! CLI utilities for TAC tools
//!
//! Provides shared CLI functionality:
//! - Output format selection
//! - Status messages and distance formatting
//! - Spinners for network waits

#![warn(missing_docs)]

pub mod output;
pub mod progress;

pub use output::{OutputFormat, Status};
