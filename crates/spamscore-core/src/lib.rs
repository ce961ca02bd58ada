//! spamscore Core
//!
//! Types shared across the spamscore crates.
//!
//! This crate provides:
//! - The error type and result alias used by every library crate
//! - The `Score` produced by the scoring pipeline
//! - The default decision threshold

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{Score, DEFAULT_THRESHOLD};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::types::{Score, DEFAULT_THRESHOLD};
}
