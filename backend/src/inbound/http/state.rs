//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{ClaimsCommand, ClaimsQuery, DealsQuery, IdentityVerifier};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Claim ledger mutations.
    pub claims: Arc<dyn ClaimsCommand>,
    /// Claim ledger reads.
    pub claims_query: Arc<dyn ClaimsQuery>,
    /// Deal catalogue reads.
    pub deals: Arc<dyn DealsQuery>,
    /// Bearer token verification via the identity provider.
    pub identity: Arc<dyn IdentityVerifier>,
}
