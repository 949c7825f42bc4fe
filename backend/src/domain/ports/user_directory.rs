//! Port for resolving user summaries.
//!
//! User accounts are owned by the identity side of the platform; the ledger
//! only resolves `{name, email}` when assembling the admin review queue.

use async_trait::async_trait;

use crate::domain::user::{UserId, UserSummary};

/// Errors raised by user directory adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserDirectoryError {
    /// Directory connection could not be established.
    #[error("user directory connection failed: {message}")]
    Connection {
        /// Adapter-provided failure description.
        message: String,
    },

    /// Lookup failed during execution.
    #[error("user directory query failed: {message}")]
    Query {
        /// Adapter-provided failure description.
        message: String,
    },
}

impl UserDirectoryError {
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

/// Port for batch user summary lookups.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Resolve summaries for the given user ids.
    ///
    /// Missing ids are silently absent from the result.
    async fn find_summaries(
        &self,
        user_ids: &[UserId],
    ) -> Result<Vec<UserSummary>, UserDirectoryError>;
}
