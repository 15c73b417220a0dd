//! Principal Details Capability
//!
//! Narrow read-only contract that authentication middleware can hold
//! instead of the concrete entity. Object-safe, so `&dyn PrincipalDetails`
//! works at the seam.

use super::entity::Principal;

/// Read-only identity surface expected by access-control layers.
///
/// The four account-status flags default to `true`: this model carries no
/// expiry/lock lifecycle, and collaborators needing real semantics layer
/// them on by wrapping an implementation.
pub trait PrincipalDetails {
    /// Canonical identifier used for display and login resolution.
    fn effective_name(&self) -> &str;

    /// One authority token per role entry, order and cardinality preserved.
    fn authorities(&self) -> Vec<String>;

    /// Always empty; the real credential check happens upstream.
    fn credential_secret(&self) -> &str {
        ""
    }

    fn is_account_non_expired(&self) -> bool {
        true
    }

    fn is_account_non_locked(&self) -> bool {
        true
    }

    fn is_credentials_non_expired(&self) -> bool {
        true
    }

    fn is_enabled(&self) -> bool {
        true
    }
}

impl PrincipalDetails for Principal {
    fn effective_name(&self) -> &str {
        Principal::effective_name(self)
    }

    fn authorities(&self) -> Vec<String> {
        Principal::authorities(self)
    }
}
