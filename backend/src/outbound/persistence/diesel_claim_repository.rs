//! PostgreSQL-backed `ClaimRepository` implementation using Diesel ORM.
//!
//! Duplicate prevention is delegated to the database: the claims table
//! carries a unique index on `(user_id, deal_id)`, and this adapter maps
//! the resulting unique-violation error to
//! [`ClaimRepositoryError::Duplicate`]. No read-before-write check exists
//! here, so concurrent creates for the same pair cannot both succeed.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;
use uuid::Uuid;

use crate::domain::claim::{Claim, ClaimId, ClaimStatus};
use crate::domain::deal::DealId;
use crate::domain::ports::{ClaimRepository, ClaimRepositoryError, NewClaim};
use crate::domain::user::UserId;

use super::models::{ClaimRow, NewClaimRow};
use super::pool::{DbPool, PoolError};
use super::schema::claims;

/// Diesel-backed implementation of the `ClaimRepository` port.
#[derive(Clone)]
pub struct DieselClaimRepository {
    pool: DbPool,
}

impl DieselClaimRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to domain claim repository errors.
fn map_pool_error(error: PoolError) -> ClaimRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            ClaimRepositoryError::connection(message)
        }
    }
}

/// Map Diesel errors to domain claim repository errors.
fn map_diesel_error(error: diesel::result::Error) -> ClaimRepositoryError {
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
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            ClaimRepositoryError::Duplicate
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            ClaimRepositoryError::connection("database connection error")
        }
        DieselError::NotFound => ClaimRepositoryError::query("record not found"),
        _ => ClaimRepositoryError::query("database error"),
    }
}

/// Convert a database row to a domain claim.
fn row_to_claim(row: ClaimRow) -> Result<Claim, ClaimRepositoryError> {
    let status: ClaimStatus = row.status.parse().map_err(|_| {
        tracing::warn!(claim_id = %row.id, value = %row.status, "unrecognised claim status");
        ClaimRepositoryError::query(format!("unrecognised claim status: {}", row.status))
    })?;

    Ok(Claim {
        id: ClaimId::from_uuid(row.id),
        user_id: UserId::from_uuid(row.user_id),
        deal_id: DealId::from_uuid(row.deal_id),
        status,
        claimed_at: row.claimed_at,
    })
}

fn rows_to_claims(rows: Vec<ClaimRow>) -> Result<Vec<Claim>, ClaimRepositoryError> {
    rows.into_iter().map(row_to_claim).collect()
}

#[async_trait]
impl ClaimRepository for DieselClaimRepository {
    async fn insert(&self, new_claim: NewClaim) -> Result<Claim, ClaimRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewClaimRow {
            id: Uuid::new_v4(),
            user_id: *new_claim.user_id.as_uuid(),
            deal_id: *new_claim.deal_id.as_uuid(),
        };

        let row: ClaimRow = diesel::insert_into(claims::table)
            .values(&new_row)
            .returning(ClaimRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_claim(row)
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Claim>, ClaimRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ClaimRow> = claims::table
            .filter(claims::user_id.eq(user_id.as_uuid()))
            .order(claims::claimed_at.desc())
            .select(ClaimRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_to_claims(rows)
    }

    async fn list_all(&self) -> Result<Vec<Claim>, ClaimRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ClaimRow> = claims::table
            .order(claims::claimed_at.desc())
            .select(ClaimRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_to_claims(rows)
    }

    async fn update_status(
        &self,
        claim_id: &ClaimId,
        status: ClaimStatus,
    ) -> Result<Option<Claim>, ClaimRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<ClaimRow> = diesel::update(claims::table)
            .filter(claims::id.eq(claim_id.as_uuid()))
            .set(claims::status.eq(status.as_str()))
            .returning(ClaimRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_claim).transpose()
    }
}
