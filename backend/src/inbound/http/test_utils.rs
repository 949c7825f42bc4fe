//! Helpers shared by inbound HTTP handler tests.

use actix_web::web;
use std::sync::Arc;

use crate::domain::identity::{Identity, Role};
use crate::domain::ports::{
    MockClaimsCommand, MockClaimsQuery, MockDealsQuery, MockIdentityVerifier,
};
use crate::domain::user::UserId;
use crate::inbound::http::state::HttpState;

/// Mock port bundle assembled into an [`HttpState`] for handler tests.
pub(crate) struct TestPorts {
    pub claims: MockClaimsCommand,
    pub claims_query: MockClaimsQuery,
    pub deals: MockDealsQuery,
    pub identity: MockIdentityVerifier,
}

impl Default for TestPorts {
    fn default() -> Self {
        Self {
            claims: MockClaimsCommand::new(),
            claims_query: MockClaimsQuery::new(),
            deals: MockDealsQuery::new(),
            identity: MockIdentityVerifier::new(),
        }
    }
}

impl TestPorts {
    /// Stub the verifier to return `identity` for any token.
    pub fn with_identity(mut self, identity: Identity) -> Self {
        self.identity
            .expect_verify()
            .returning(move |_| Ok(identity.clone()));
        self
    }

    pub fn into_state(self) -> web::Data<HttpState> {
        web::Data::new(HttpState {
            claims: Arc::new(self.claims),
            claims_query: Arc::new(self.claims_query),
            deals: Arc::new(self.deals),
            identity: Arc::new(self.identity),
        })
    }
}

/// A regular verified user identity for tests.
pub(crate) fn member_identity() -> Identity {
    Identity {
        user_id: UserId::random(),
        role: Role::User,
        verified: true,
    }
}

/// An administrator identity for tests.
pub(crate) fn admin_identity() -> Identity {
    Identity {
        user_id: UserId::random(),
        role: Role::Admin,
        verified: true,
    }
}
