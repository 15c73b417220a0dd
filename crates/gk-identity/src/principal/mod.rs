//! Principal Aggregate
//!
//! Authenticated identity model: mutable build-up, frozen snapshots, and
//! the read-only capability surface consumed by access-control layers.

pub mod entity;
pub mod details;

// Re-export main types
pub use entity::Principal;
pub use details::PrincipalDetails;
