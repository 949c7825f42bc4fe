//! Caller identity consumed by ledger operations.
//!
//! Identity is decoded by the external identity provider and passed into
//! every domain operation as an explicit argument. The domain never reads
//! ambient request state and never inspects tokens itself.

use serde::{Deserialize, Serialize};

use crate::domain::user::UserId;
use crate::domain::{Error, ErrorCode};

/// Role carried by an authenticated caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Regular marketplace member.
    User,
    /// Moderator with access to the review queue.
    Admin,
}

impl Role {
    /// Stable wire representation of the role.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }
}

impl std::str::FromStr for Role {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            other => Err(Error::new(
                ErrorCode::InvalidRequest,
                format!("unrecognised role: {other}"),
            )),
        }
    }
}

/// Verified caller identity attached to each ledger operation.
///
/// ## Invariants
/// - `verified` reflects the account state at the moment the token was
///   introspected; eligibility checks read it once, at claim creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Identifier of the authenticated user.
    pub user_id: UserId,
    /// Role granted by the identity provider.
    pub role: Role,
    /// Whether the account has completed verification.
    pub verified: bool,
}

impl Identity {
    /// Whether the caller holds the administrator role.
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Reject callers without the administrator role.
    pub fn require_admin(&self) -> Result<(), Error> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(Error::forbidden("administrator access required"))
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    fn identity(role: Role) -> Identity {
        Identity {
            user_id: UserId::random(),
            role,
            verified: false,
        }
    }

    #[rstest]
    #[case("user", Role::User)]
    #[case("admin", Role::Admin)]
    fn roles_parse_from_wire_values(#[case] raw: &str, #[case] expected: Role) {
        let role: Role = raw.parse().expect("known role");
        assert_eq!(role, expected);
        assert_eq!(role.as_str(), raw);
    }

    #[rstest]
    fn unknown_roles_are_rejected() {
        let err = "owner".parse::<Role>().expect_err("unknown role");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }

    #[rstest]
    fn require_admin_accepts_admins() {
        assert!(identity(Role::Admin).require_admin().is_ok());
    }

    #[rstest]
    fn require_admin_rejects_users() {
        let err = identity(Role::User)
            .require_admin()
            .expect_err("non-admin must fail");
        assert_eq!(err.code(), ErrorCode::Forbidden);
    }
}
