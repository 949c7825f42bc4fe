//! PostgreSQL-backed `UserDirectory` implementation using Diesel ORM.
//!
//! Reads the users table that the identity side of the platform maintains.
//! The ledger never writes to it.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{UserDirectory, UserDirectoryError};
use crate::domain::user::{UserId, UserSummary};

use super::models::UserRow;
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the `UserDirectory` port.
#[derive(Clone)]
pub struct DieselUserDirectory {
    pool: DbPool,
}

impl DieselUserDirectory {
    /// Create a new directory with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to domain user directory errors.
fn map_pool_error(error: PoolError) -> UserDirectoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            UserDirectoryError::connection(message)
        }
    }
}

/// Map Diesel errors to domain user directory errors.
fn map_diesel_error(error: diesel::result::Error) -> UserDirectoryError {
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
            UserDirectoryError::connection("database connection error")
        }
        _ => UserDirectoryError::query("database error"),
    }
}

fn row_to_summary(row: UserRow) -> UserSummary {
    UserSummary {
        id: UserId::from_uuid(row.id),
        name: row.name,
        email: row.email,
    }
}

#[async_trait]
impl UserDirectory for DieselUserDirectory {
    async fn find_summaries(
        &self,
        user_ids: &[UserId],
    ) -> Result<Vec<UserSummary>, UserDirectoryError> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let ids: Vec<Uuid> = user_ids.iter().map(|id| *id.as_uuid()).collect();
        let rows: Vec<UserRow> = users::table
            .filter(users::id.eq_any(ids))
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(row_to_summary).collect())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let err = map_pool_error(PoolError::checkout("timed out"));

        assert!(matches!(err, UserDirectoryError::Connection { .. }));
        assert!(err.to_string().contains("timed out"));
    }

    #[rstest]
    fn rows_convert_to_summaries() {
        let id = Uuid::new_v4();
        let summary = row_to_summary(UserRow {
            id,
            name: "Ada".to_owned(),
            email: "ada@example.com".to_owned(),
        });

        assert_eq!(summary.id, UserId::from_uuid(id));
        assert_eq!(summary.email, "ada@example.com");
    }
}
