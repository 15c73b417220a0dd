//! Principal Entity
//!
//! Authenticated identity with a mutable build-up phase and frozen
//! snapshots for handing across trust boundaries.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::sync::Arc;

use crate::error::{IdentityError, Result};

/// Field storage shared by both mutability states.
///
/// Serialized with camelCase names; the credential value is not a field
/// here and therefore never appears in output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PrincipalData {
    #[serde(default)]
    email: String,

    username: Option<String>,

    first_name: Option<String>,

    last_name: Option<String>,

    #[serde(default)]
    roles: Vec<String>,

    #[serde(default)]
    allowed_accounts: Vec<String>,
}

#[derive(Debug, Clone)]
enum Repr {
    /// Owned, settable field data.
    Mutable(Box<PrincipalData>),
    /// Shared snapshot; never mutated after construction, so safe for
    /// unrestricted concurrent reads.
    Frozen(Arc<PrincipalData>),
}

/// An authenticated principal.
///
/// Starts mutable so an authentication layer can populate it field by
/// field after login. [`Principal::to_immutable`] produces a frozen
/// snapshot whose storage is independent of the original; downstream
/// consumers holding the snapshot cannot observe (or cause) later
/// mutation. Freezing is one-directional.
///
/// Every setter returns [`IdentityError::FrozenMutation`] when invoked on
/// a frozen instance; all read accessors are total.
#[derive(Debug, Clone)]
pub struct Principal {
    repr: Repr,
}

impl Principal {
    /// Create a mutable principal with the given email, no names, and
    /// empty role/account lists.
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            repr: Repr::Mutable(Box::new(PrincipalData {
                email: email.into(),
                ..PrincipalData::default()
            })),
        }
    }

    fn data(&self) -> &PrincipalData {
        match &self.repr {
            Repr::Mutable(data) => data,
            Repr::Frozen(data) => data,
        }
    }

    fn data_mut(&mut self) -> Result<&mut PrincipalData> {
        match &mut self.repr {
            Repr::Mutable(data) => Ok(data),
            Repr::Frozen(data) => {
                tracing::warn!(
                    principal = %data.email,
                    "mutation attempted on frozen principal"
                );
                Err(IdentityError::FrozenMutation)
            }
        }
    }

    /// The canonical display/login name: username when present and
    /// non-empty, email otherwise.
    pub fn effective_name(&self) -> &str {
        let data = self.data();
        match data.username.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => &data.email,
        }
    }

    /// Derive authority tokens from the roles, one token per role entry,
    /// preserving order and duplicates. Allocates a fresh list per call.
    pub fn authorities(&self) -> Vec<String> {
        self.data().roles.clone()
    }

    /// Always empty: credentials are never stored in this model. Present
    /// only so authentication middleware expecting a credential field can
    /// adapt to this type; not a real authentication mechanism.
    pub fn credential_secret(&self) -> &str {
        ""
    }

    pub fn email(&self) -> &str {
        &self.data().email
    }

    pub fn username(&self) -> Option<&str> {
        self.data().username.as_deref()
    }

    pub fn first_name(&self) -> Option<&str> {
        self.data().first_name.as_deref()
    }

    pub fn last_name(&self) -> Option<&str> {
        self.data().last_name.as_deref()
    }

    /// Read-only view of the roles. Mutation goes through [`Principal::set_roles`]
    /// or [`Principal::add_role`].
    pub fn roles(&self) -> &[String] {
        &self.data().roles
    }

    /// Read-only view of the allowed accounts. Same access policy as
    /// [`Principal::roles`].
    pub fn allowed_accounts(&self) -> &[String] {
        &self.data().allowed_accounts
    }

    pub fn is_frozen(&self) -> bool {
        matches!(self.repr, Repr::Frozen(_))
    }

    pub fn set_email(&mut self, email: impl Into<String>) -> Result<()> {
        self.data_mut()?.email = email.into();
        Ok(())
    }

    pub fn set_username(&mut self, username: impl Into<String>) -> Result<()> {
        self.data_mut()?.username = Some(username.into());
        Ok(())
    }

    pub fn set_first_name(&mut self, first_name: impl Into<String>) -> Result<()> {
        self.data_mut()?.first_name = Some(first_name.into());
        Ok(())
    }

    pub fn set_last_name(&mut self, last_name: impl Into<String>) -> Result<()> {
        self.data_mut()?.last_name = Some(last_name.into());
        Ok(())
    }

    pub fn set_roles(&mut self, roles: Vec<String>) -> Result<()> {
        self.data_mut()?.roles = roles;
        Ok(())
    }

    pub fn add_role(&mut self, role: impl Into<String>) -> Result<()> {
        self.data_mut()?.roles.push(role.into());
        Ok(())
    }

    pub fn set_allowed_accounts(&mut self, accounts: Vec<String>) -> Result<()> {
        self.data_mut()?.allowed_accounts = accounts;
        Ok(())
    }

    pub fn add_allowed_account(&mut self, account: impl Into<String>) -> Result<()> {
        self.data_mut()?.allowed_accounts.push(account.into());
        Ok(())
    }

    /// The model carries no account-status lifecycle; expiry/lock logic is
    /// an external collaborator's responsibility.
    pub fn is_account_non_expired(&self) -> bool {
        true
    }

    pub fn is_account_non_locked(&self) -> bool {
        true
    }

    pub fn is_credentials_non_expired(&self) -> bool {
        true
    }

    pub fn is_enabled(&self) -> bool {
        true
    }

    /// Produce a frozen snapshot of the current field values.
    ///
    /// On a mutable instance this deep-copies the scalars and both
    /// collections into new shared storage; later mutation of `self` is
    /// not observable through the snapshot. On an already-frozen instance
    /// this returns a handle to the same snapshot without copying.
    pub fn to_immutable(&self) -> Principal {
        match &self.repr {
            Repr::Mutable(data) => Principal {
                repr: Repr::Frozen(Arc::new((**data).clone())),
            },
            Repr::Frozen(data) => Principal {
                repr: Repr::Frozen(Arc::clone(data)),
            },
        }
    }
}

impl Default for Principal {
    fn default() -> Self {
        Self::new("")
    }
}

/// Equality is over field values, independent of mutability state.
impl PartialEq for Principal {
    fn eq(&self, other: &Self) -> bool {
        self.data() == other.data()
    }
}

impl Eq for Principal {}

impl Serialize for Principal {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.data().serialize(serializer)
    }
}

/// Deserialization always yields a mutable principal; frozenness is a
/// process-local property, not data.
impl<'de> Deserialize<'de> for Principal {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        PrincipalData::deserialize(deserializer)
            .map(|data| Principal { repr: Repr::Mutable(Box::new(data)) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_principal() -> Principal {
        let mut p = Principal::new("kat@example.com");
        p.set_username("kat").unwrap();
        p.set_first_name("Kat").unwrap();
        p.set_last_name("Moss").unwrap();
        p.set_roles(vec!["ADMIN".to_string(), "VIEWER".to_string()]).unwrap();
        p.set_allowed_accounts(vec!["prod".to_string(), "staging".to_string()]).unwrap();
        p
    }

    fn frozen_storage(p: &Principal) -> &Arc<PrincipalData> {
        match &p.repr {
            Repr::Frozen(data) => data,
            Repr::Mutable(_) => panic!("expected frozen principal"),
        }
    }

    #[test]
    fn test_effective_name_prefers_username() {
        let p = sample_principal();
        assert_eq!(p.effective_name(), "kat");
    }

    #[test]
    fn test_effective_name_falls_back_to_email() {
        let p = Principal::new("kat@example.com");
        assert_eq!(p.effective_name(), "kat@example.com");

        let mut p = Principal::new("kat@example.com");
        p.set_username("").unwrap();
        assert_eq!(p.effective_name(), "kat@example.com");
    }

    #[test]
    fn test_default_has_empty_collections() {
        let p = Principal::default();
        assert!(!p.is_frozen());
        assert!(p.roles().is_empty());
        assert!(p.allowed_accounts().is_empty());
        assert!(p.is_enabled());
        assert!(p.is_account_non_expired());
        assert!(p.is_account_non_locked());
        assert!(p.is_credentials_non_expired());
    }

    #[test]
    fn test_snapshot_is_isolated_from_later_mutation() {
        let mut p = sample_principal();
        let frozen = p.to_immutable();

        p.add_role("NEW").unwrap();
        p.add_allowed_account("dev").unwrap();
        p.set_email("other@example.com").unwrap();

        assert_eq!(frozen.roles(), ["ADMIN", "VIEWER"]);
        assert_eq!(frozen.allowed_accounts(), ["prod", "staging"]);
        assert_eq!(frozen.email(), "kat@example.com");
        assert_eq!(p.roles(), ["ADMIN", "VIEWER", "NEW"]);
    }

    #[test]
    fn test_to_immutable_is_idempotent() {
        let frozen = sample_principal().to_immutable();
        let again = frozen.to_immutable();
        // Same snapshot storage, no new copy.
        assert!(Arc::ptr_eq(frozen_storage(&frozen), frozen_storage(&again)));
        assert_eq!(frozen, again);
    }

    #[test]
    fn test_setters_fail_on_frozen_and_leave_state_unchanged() {
        let mut frozen = sample_principal().to_immutable();

        assert!(matches!(frozen.set_email("x@example.com"), Err(IdentityError::FrozenMutation)));
        assert!(matches!(frozen.set_username("x"), Err(IdentityError::FrozenMutation)));
        assert!(matches!(frozen.set_first_name("X"), Err(IdentityError::FrozenMutation)));
        assert!(matches!(frozen.set_last_name("Y"), Err(IdentityError::FrozenMutation)));
        assert!(matches!(frozen.set_roles(vec![]), Err(IdentityError::FrozenMutation)));
        assert!(matches!(frozen.add_role("NEW"), Err(IdentityError::FrozenMutation)));
        assert!(matches!(frozen.set_allowed_accounts(vec![]), Err(IdentityError::FrozenMutation)));
        assert!(matches!(frozen.add_allowed_account("dev"), Err(IdentityError::FrozenMutation)));

        assert_eq!(frozen, sample_principal().to_immutable());
    }

    #[test]
    fn test_authorities_preserve_order_and_duplicates() {
        let mut p = Principal::new("kat@example.com");
        p.set_roles(vec!["A".to_string(), "A".to_string()]).unwrap();
        assert_eq!(p.authorities(), ["A", "A"]);
    }

    #[test]
    fn test_credential_secret_always_empty() {
        let p = sample_principal();
        assert_eq!(p.credential_secret(), "");
        assert_eq!(p.to_immutable().credential_secret(), "");
    }

    #[test]
    fn test_mutable_clone_does_not_share_storage() {
        let mut p = sample_principal();
        let copy = p.clone();
        p.add_role("NEW").unwrap();
        assert_eq!(copy.roles(), ["ADMIN", "VIEWER"]);
    }
}
