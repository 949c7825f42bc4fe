//! PostgreSQL-backed `DealRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;
use uuid::Uuid;

use crate::domain::deal::{AccessLevel, Deal, DealCategory, DealId};
use crate::domain::ports::{DealRepository, DealRepositoryError, NewDeal};

use super::models::{DealRow, NewDealRow};
use super::pool::{DbPool, PoolError};
use super::schema::deals;

/// Diesel-backed implementation of the `DealRepository` port.
#[derive(Clone)]
pub struct DieselDealRepository {
    pool: DbPool,
}

impl DieselDealRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to domain deal repository errors.
fn map_pool_error(error: PoolError) -> DealRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            DealRepositoryError::connection(message)
        }
    }
}

/// Map Diesel errors to domain deal repository errors.
fn map_diesel_error(error: diesel::result::Error) -> DealRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            DealRepositoryError::connection("database connection error")
        }
        DieselError::NotFound => DealRepositoryError::query("record not found"),
        _ => DealRepositoryError::query("database error"),
    }
}

/// Convert a database row to a domain deal.
fn row_to_deal(row: DealRow) -> Deal {
    let category = row.category.parse().unwrap_or_else(|_| {
        tracing::warn!(
            deal_id = %row.id,
            value = %row.category,
            "unrecognised deal category, defaulting to Other"
        );
        DealCategory::Other
    });
    // Unknown access levels fail closed: the deal stays claimable only by
    // verified accounts.
    let access_level = row.access_level.parse().unwrap_or_else(|_| {
        tracing::warn!(
            deal_id = %row.id,
            value = %row.access_level,
            "unrecognised access level, defaulting to restricted"
        );
        AccessLevel::Restricted
    });

    Deal {
        id: DealId::from_uuid(row.id),
        title: row.title,
        description: row.description,
        category,
        discount: row.discount,
        partner_name: row.partner_name,
        logo_url: row.logo_url,
        redemption_link: row.redemption_link,
        access_level,
        eligibility_conditions: row.eligibility_conditions,
        featured: row.featured,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

#[async_trait]
impl DealRepository for DieselDealRepository {
    async fn find_by_id(&self, deal_id: &DealId) -> Result<Option<Deal>, DealRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<DealRow> = deals::table
            .filter(deals::id.eq(deal_id.as_uuid()))
            .select(DealRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(row_to_deal))
    }

    async fn find_by_ids(&self, deal_ids: &[DealId]) -> Result<Vec<Deal>, DealRepositoryError> {
        if deal_ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let ids: Vec<Uuid> = deal_ids.iter().map(|id| *id.as_uuid()).collect();
        let rows: Vec<DealRow> = deals::table
            .filter(deals::id.eq_any(ids))
            .select(DealRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(row_to_deal).collect())
    }

    async fn list(&self) -> Result<Vec<Deal>, DealRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<DealRow> = deals::table
            .order(deals::created_at.desc())
            .select(DealRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(row_to_deal).collect())
    }

    async fn insert(&self, new_deal: NewDeal) -> Result<Deal, DealRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewDealRow {
            id: Uuid::new_v4(),
            title: &new_deal.title,
            description: &new_deal.description,
            category: new_deal.category.as_str(),
            discount: &new_deal.discount,
            partner_name: &new_deal.partner_name,
            logo_url: &new_deal.logo_url,
            redemption_link: new_deal.redemption_link.as_deref(),
            access_level: new_deal.access_level.as_str(),
            eligibility_conditions: &new_deal.eligibility_conditions,
            featured: new_deal.featured,
        };

        let row: DealRow = diesel::insert_into(deals::table)
            .values(&new_row)
            .returning(DealRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(row_to_deal(row))
    }
}
