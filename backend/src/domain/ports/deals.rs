//! Driving port for deal catalogue reads.

use async_trait::async_trait;

use crate::domain::Error;
use crate::domain::deal::{Deal, DealId};

/// Deal catalogue reads exposed to the HTTP layer.
///
/// Catalogue writes are deliberately absent: deal records are managed
/// outside the HTTP surface.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DealsQuery: Send + Sync {
    /// Every deal in the catalogue, newest first.
    async fn list_deals(&self) -> Result<Vec<Deal>, Error>;

    /// One deal by id, or `NotFound`.
    async fn get_deal(&self, deal_id: DealId) -> Result<Deal, Error>;
}
