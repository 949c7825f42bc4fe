//! Driving ports for the claim ledger.
//!
//! HTTP handlers depend on these traits rather than on concrete services so
//! they stay testable without I/O. Every operation takes the caller identity
//! as an explicit argument.

use async_trait::async_trait;

use crate::domain::Error;
use crate::domain::claim::{Claim, ClaimDecision, ClaimDetails, ClaimId, ClaimWithDeal};
use crate::domain::deal::DealId;
use crate::domain::identity::Identity;

/// Request payload for creating a claim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateClaimRequest {
    /// Authenticated caller.
    pub caller: Identity,
    /// The deal being claimed.
    pub deal_id: DealId,
}

/// Request payload for an administrator status decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateClaimStatusRequest {
    /// Authenticated caller; must hold the administrator role.
    pub caller: Identity,
    /// The claim under review.
    pub claim_id: ClaimId,
    /// The verdict to apply.
    pub decision: ClaimDecision,
}

/// Claim ledger mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClaimsCommand: Send + Sync {
    /// Create a pending claim after eligibility checks pass.
    ///
    /// Fails with `NotFound` when the deal does not exist, `Forbidden` when
    /// a restricted deal is claimed by an unverified caller, and `Conflict`
    /// when the caller already claimed this deal.
    async fn create_claim(&self, request: CreateClaimRequest) -> Result<Claim, Error>;

    /// Apply an administrator verdict to an existing claim.
    ///
    /// Idempotent overwrite: repeating a decision leaves the claim in the
    /// same observable state. Fails with `Forbidden` for non-admin callers
    /// and `NotFound` for unknown claims.
    async fn update_claim_status(&self, request: UpdateClaimStatusRequest)
    -> Result<Claim, Error>;
}

/// Claim ledger reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClaimsQuery: Send + Sync {
    /// The caller's own claims with deals resolved, newest first.
    async fn list_claims_for_user(&self, caller: &Identity)
    -> Result<Vec<ClaimWithDeal>, Error>;

    /// Every claim with deal and claimant resolved, newest first.
    ///
    /// Fails with `Forbidden` for non-admin callers.
    async fn list_all_claims(&self, caller: &Identity) -> Result<Vec<ClaimDetails>, Error>;
}
