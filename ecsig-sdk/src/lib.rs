#![deny(missing_docs)]

//! ecsig SDK - Complete SDK.
//!
//! Re-exports the ecsig components for convenient single-crate usage.

pub use ecsig_primitives as primitives;
pub use ecsig_message as message;
