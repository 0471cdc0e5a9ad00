//! `.tac.toml` loading and schema
//!
//! Search defaults, the fallback location, the backend table, and log
//! settings. Every field has a default, so a missing file is not an error.

mod loader;
mod schema;

pub use loader::Config;
pub use schema::*;
