//! # Gatepass Shared
//!
//! Cross-cutting types shared between the Gatepass crates.

pub mod types;

pub use types::*;
