//! Gatekeeper Identity
//!
//! Data model for an authenticated principal: identity fields, role
//! identifiers, allowed account identifiers, and frozen snapshots for
//! passing identity across trust boundaries.
//!
//! A [`Principal`] is built mutable by its owner (typically an
//! authentication layer populating it after login) and frozen via
//! [`Principal::to_immutable`] before being handed to downstream
//! consumers:
//!
//! ```
//! use gk_identity::Principal;
//!
//! let mut principal = Principal::new("kat@example.com");
//! principal.set_username("kat")?;
//! principal.set_roles(vec!["ADMIN".to_string()])?;
//!
//! let snapshot = principal.to_immutable();
//! principal.add_role("VIEWER")?;
//!
//! // The snapshot is isolated from later mutation.
//! assert_eq!(snapshot.roles(), ["ADMIN"]);
//! # Ok::<(), gk_identity::IdentityError>(())
//! ```

pub mod error;
pub mod principal;

pub use error::{IdentityError, Result};
pub use principal::{Principal, PrincipalDetails};
