//! Port for claim ledger persistence.
//!
//! Duplicate prevention lives here, not in application code: adapters must
//! back [`ClaimRepository::insert`] with a storage-level uniqueness
//! constraint on `(user_id, deal_id)` so concurrent creates cannot both
//! succeed. The service layer treats [`ClaimRepositoryError::Duplicate`]
//! as the single source of truth for "already claimed".

use async_trait::async_trait;

use crate::domain::claim::{Claim, ClaimId, ClaimStatus};
use crate::domain::deal::DealId;
use crate::domain::user::UserId;

/// Errors raised by claim repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClaimRepositoryError {
    /// Repository connection could not be established.
    #[error("claim repository connection failed: {message}")]
    Connection {
        /// Adapter-provided failure description.
        message: String,
    },

    /// Query or mutation failed during execution.
    #[error("claim repository query failed: {message}")]
    Query {
        /// Adapter-provided failure description.
        message: String,
    },

    /// The `(user, deal)` uniqueness constraint rejected the insert.
    #[error("claim already exists for this user and deal")]
    Duplicate,
}

impl ClaimRepositoryError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Insert payload for a new claim.
///
/// `status` and `claimed_at` are not caller-supplied: adapters persist the
/// claim as `pending` with the insertion timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewClaim {
    /// The claiming user.
    pub user_id: UserId,
    /// The claimed deal.
    pub deal_id: DealId,
}

/// Port for claim storage and retrieval.
///
/// Listings return bare claims ordered newest-first; the service layer
/// batch-resolves referenced deals and users (read-side join) so the
/// write-side model stays strictly normalised.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClaimRepository: Send + Sync {
    /// Persist a new pending claim.
    ///
    /// Returns [`ClaimRepositoryError::Duplicate`] when a claim for the same
    /// `(user, deal)` pair already exists, regardless of its status.
    async fn insert(&self, new_claim: NewClaim) -> Result<Claim, ClaimRepositoryError>;

    /// All claims created by one user, newest first.
    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Claim>, ClaimRepositoryError>;

    /// Every claim in the ledger, newest first.
    async fn list_all(&self) -> Result<Vec<Claim>, ClaimRepositoryError>;

    /// Overwrite the status of an existing claim.
    ///
    /// Returns `Ok(None)` when no claim with `claim_id` exists. Timestamps
    /// and foreign keys are left untouched.
    async fn update_status(
        &self,
        claim_id: &ClaimId,
        status: ClaimStatus,
    ) -> Result<Option<Claim>, ClaimRepositoryError>;
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn constructor_messages_surface_in_display() {
        assert!(
            ClaimRepositoryError::connection("pool exhausted")
                .to_string()
                .contains("pool exhausted")
        );
        assert!(
            ClaimRepositoryError::query("bad statement")
                .to_string()
                .contains("bad statement")
        );
    }

    #[rstest]
    fn duplicate_error_names_the_constraint() {
        assert_eq!(
            ClaimRepositoryError::Duplicate.to_string(),
            "claim already exists for this user and deal"
        );
    }
}
