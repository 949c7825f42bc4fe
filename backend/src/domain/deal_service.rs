//! Deal catalogue query service.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::Error;
use crate::domain::deal::{Deal, DealId};
use crate::domain::ports::{DealRepository, DealRepositoryError, DealsQuery};

fn map_repository_error(error: DealRepositoryError) -> Error {
    match error {
        DealRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("deal catalogue unavailable: {message}"))
        }
        DealRepositoryError::Query { message } => {
            Error::internal(format!("deal catalogue error: {message}"))
        }
    }
}

/// Catalogue read service implementing the [`DealsQuery`] driving port.
#[derive(Clone)]
pub struct DealCatalogueService<R> {
    deal_repo: Arc<R>,
}

impl<R> DealCatalogueService<R> {
    /// Create a new service over the catalogue repository.
    pub fn new(deal_repo: Arc<R>) -> Self {
        Self { deal_repo }
    }
}

#[async_trait]
impl<R> DealsQuery for DealCatalogueService<R>
where
    R: DealRepository,
{
    async fn list_deals(&self) -> Result<Vec<Deal>, Error> {
        self.deal_repo.list().await.map_err(map_repository_error)
    }

    async fn get_deal(&self, deal_id: DealId) -> Result<Deal, Error> {
        self.deal_repo
            .find_by_id(&deal_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found("Deal not found"))
    }
}
