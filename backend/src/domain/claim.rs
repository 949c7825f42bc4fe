//! Claim ledger entities.
//!
//! A claim records one user's intent to redeem one deal. Claims are created
//! in the `pending` state, moderated by administrators, and never deleted.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::deal::{Deal, DealId};
use crate::domain::user::{UserId, UserSummary};
use crate::domain::{Error, ErrorCode};

/// Identifier of a ledger claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct ClaimId(Uuid);

impl ClaimId {
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

impl std::fmt::Display for ClaimId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Moderation state of a claim.
///
/// New claims always start `pending`. Administrators move them to `approved`
/// or `rejected`; re-review between the two terminal values is permitted as
/// an idempotent overwrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimStatus {
    /// Awaiting administrator review.
    Pending,
    /// Approved for redemption.
    Approved,
    /// Rejected by an administrator.
    Rejected,
}

impl ClaimStatus {
    /// Stable wire representation of the status.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl std::str::FromStr for ClaimStatus {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => Err(Error::new(
                ErrorCode::InvalidRequest,
                format!("unrecognised claim status: {other}"),
            )),
        }
    }
}

/// Administrator verdict applied to a pending (or re-reviewed) claim.
///
/// `pending` is deliberately unrepresentable here: the initial state is set
/// at creation and is unreachable through the update path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimDecision {
    /// Approve the claim for redemption.
    Approved,
    /// Reject the claim.
    Rejected,
}

impl ClaimDecision {
    /// Status the claim ends up in after this decision.
    pub fn as_status(self) -> ClaimStatus {
        match self {
            Self::Approved => ClaimStatus::Approved,
            Self::Rejected => ClaimStatus::Rejected,
        }
    }
}

impl std::str::FromStr for ClaimDecision {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => Err(Error::new(
                ErrorCode::InvalidRequest,
                format!("status must be approved or rejected, got: {other}"),
            )),
        }
    }
}

/// One user's attempt to redeem one deal.
///
/// ## Invariants
/// - At most one claim exists per `(user_id, deal_id)` pair; the storage
///   layer enforces this with a unique index.
/// - `user_id`, `deal_id`, and `claimed_at` are immutable after creation.
/// - `status` changes only through administrator decisions.
#[derive(Debug, Clone, PartialEq)]
pub struct Claim {
    /// Claim identifier, generated at creation.
    pub id: ClaimId,
    /// The claiming user.
    pub user_id: UserId,
    /// The claimed deal.
    pub deal_id: DealId,
    /// Moderation state.
    pub status: ClaimStatus,
    /// When the claim was created.
    pub claimed_at: DateTime<Utc>,
}

/// A claim with its deal resolved for the owner's dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct ClaimWithDeal {
    /// The claim record.
    pub claim: Claim,
    /// The referenced deal's public fields.
    pub deal: Deal,
}

/// A claim with deal and claimant resolved for the admin review queue.
#[derive(Debug, Clone, PartialEq)]
pub struct ClaimDetails {
    /// The claim record.
    pub claim: Claim,
    /// The referenced deal's public fields.
    pub deal: Deal,
    /// The claiming user's `{name, email}` summary.
    pub claimant: UserSummary,
}
