//! Domain layer of the Herald console.
//!
//! Holds the data model shared with the broadcast backend, the pure
//! reconciliation rules (reference resolution, session state, draft seeding),
//! and the [`gateway::BackendGateway`] seam the other layers plug into.

pub mod config;
pub mod error;
pub mod gateway;
pub mod roster;
pub mod session;

// Re-export common error type
pub use error::{HeraldError, Result};
pub use gateway::BackendGateway;
