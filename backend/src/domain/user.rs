//! User identity primitives referenced by the claim ledger.
//!
//! The ledger does not own user records. It stores foreign keys and resolves
//! `{name, email}` summaries through the [`crate::domain::ports::UserDirectory`]
//! port when assembling the admin review queue.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a marketplace user.
///
/// # Examples
/// ```
/// use benefits_backend::domain::UserId;
///
/// let id = UserId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("valid uuid");
/// assert_eq!(id.to_string(), "3fa85f64-5717-4562-b3fc-2c963f66afa6");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Parse an identifier from its string form.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, uuid::Error> {
        Uuid::parse_str(raw.as_ref()).map(Self)
    }

    /// Wrap an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a fresh random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Underlying UUID value.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Public fields of a user resolved for the admin review queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSummary {
    /// User identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Contact email address.
    pub email: String,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn user_id_round_trips_through_display() {
        let id = UserId::random();
        let parsed = UserId::new(id.to_string()).expect("round trip");
        assert_eq!(parsed, id);
    }

    #[rstest]
    fn malformed_user_ids_are_rejected() {
        assert!(UserId::new("not-a-uuid").is_err());
    }
}
