//! Endpoint-specific API implementations
//!
//! ## Mapping to the Supabase project
//!
//! | Module | Resource | Description |
//! |--------|----------|-------------|
//! | `spots` | `/rest/v1/<table>` | Read-only parking spot rows and reachability probe |

pub mod spots;

pub use spots::{SpotsApi, TableStatus};
