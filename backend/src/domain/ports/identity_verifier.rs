//! Port for bearer token verification.
//!
//! Token issuance and decoding belong to the external identity provider. The
//! ledger hands the opaque token to this port and receives the decoded
//! caller identity, keeping authentication mechanics out of the domain.

use async_trait::async_trait;

use crate::domain::identity::Identity;

/// Errors raised by identity verifier adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentityVerifierError {
    /// The provider rejected the token.
    #[error("token rejected: {message}")]
    Rejected {
        /// Provider-supplied rejection reason.
        message: String,
    },

    /// The provider returned a payload the adapter could not decode.
    #[error("identity payload could not be decoded: {message}")]
    Decode {
        /// Description of the malformed payload.
        message: String,
    },

    /// The provider could not be reached.
    #[error("identity provider unreachable: {message}")]
    Transport {
        /// Transport failure description.
        message: String,
    },
}

impl IdentityVerifierError {
    /// Create a rejection error with the given message.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }

    /// Create a decode error with the given message.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create a transport error with the given message.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }
}

/// Port for exchanging a bearer token for a caller identity.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    /// Verify an opaque bearer token with the identity provider.
    async fn verify(&self, token: &str) -> Result<Identity, IdentityVerifierError>;
}
