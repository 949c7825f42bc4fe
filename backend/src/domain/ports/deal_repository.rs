//! Port for deal catalogue persistence.

use async_trait::async_trait;

use crate::domain::deal::{AccessLevel, Deal, DealCategory, DealId};

/// Errors raised by deal repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DealRepositoryError {
    /// Repository connection could not be established.
    #[error("deal repository connection failed: {message}")]
    Connection {
        /// Adapter-provided failure description.
        message: String,
    },

    /// Query or mutation failed during execution.
    #[error("deal repository query failed: {message}")]
    Query {
        /// Adapter-provided failure description.
        message: String,
    },
}

impl DealRepositoryError {
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

/// Insert payload for a catalogue deal, used by seeding tooling.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDeal {
    /// Short headline shown in the catalogue.
    pub title: String,
    /// Longer description of the offer.
    pub description: String,
    /// Category the deal is filed under.
    pub category: DealCategory,
    /// Human-readable discount terms.
    pub discount: String,
    /// Name of the SaaS partner providing the discount.
    pub partner_name: String,
    /// Partner logo displayed on deal cards.
    pub logo_url: String,
    /// Link the user follows to redeem an approved claim.
    pub redemption_link: Option<String>,
    /// Whether the deal is open to all users or gated behind verification.
    pub access_level: AccessLevel,
    /// Free-text eligibility conditions shown to users.
    pub eligibility_conditions: String,
    /// Whether the deal is highlighted on the landing page.
    pub featured: bool,
}

/// Port for deal catalogue reads (plus inserts for seeding).
///
/// The claim ledger reads a deal's existence and access level through this
/// port; it never mutates deals.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DealRepository: Send + Sync {
    /// Fetch one deal by id. Returns `None` when the deal does not exist.
    async fn find_by_id(&self, deal_id: &DealId) -> Result<Option<Deal>, DealRepositoryError>;

    /// Batch-resolve deals by id for read-side joins.
    ///
    /// Missing ids are silently absent from the result; callers decide how
    /// to treat dangling references.
    async fn find_by_ids(&self, deal_ids: &[DealId]) -> Result<Vec<Deal>, DealRepositoryError>;

    /// Every deal in the catalogue, newest first.
    async fn list(&self) -> Result<Vec<Deal>, DealRepositoryError>;

    /// Insert a catalogue deal. Exercised by the `seed-deals` binary only.
    async fn insert(&self, new_deal: NewDeal) -> Result<Deal, DealRepositoryError>;
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn constructor_messages_surface_in_display() {
        assert!(
            DealRepositoryError::connection("refused")
                .to_string()
                .contains("refused")
        );
        assert!(
            DealRepositoryError::query("syntax")
                .to_string()
                .contains("syntax")
        );
    }
}
