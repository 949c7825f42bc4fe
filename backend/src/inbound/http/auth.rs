//! Bearer identity extraction for HTTP handlers.
//!
//! Handlers receive [`Caller`] as an extractor: the `Authorization: Bearer`
//! header is handed to the configured [`crate::domain::ports::IdentityVerifier`]
//! and the decoded identity is passed on explicitly. The ledger never decodes
//! tokens itself.

use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;

use crate::domain::identity::Identity;
use crate::domain::ports::IdentityVerifierError;
use crate::domain::Error;
use crate::inbound::http::error::ApiError;
use crate::inbound::http::state::HttpState;

/// Authenticated caller extracted from the bearer token.
#[derive(Debug, Clone)]
pub struct Caller(Identity);

impl Caller {
    /// The decoded identity.
    pub fn identity(&self) -> &Identity {
        &self.0
    }

    /// Consume the extractor, yielding the identity.
    pub fn into_identity(self) -> Identity {
        self.0
    }
}

fn bearer_token(req: &HttpRequest) -> Result<String, Error> {
    let raw = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or_else(|| Error::unauthorized("login required"))?
        .to_str()
        .map_err(|_| Error::unauthorized("malformed authorization header"))?;

    raw.strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
        .ok_or_else(|| Error::unauthorized("bearer token required"))
}

fn map_verifier_error(error: IdentityVerifierError) -> Error {
    match error {
        IdentityVerifierError::Rejected { message } => {
            tracing::debug!(reason = %message, "identity provider rejected token");
            Error::unauthorized("invalid or expired token")
        }
        IdentityVerifierError::Decode { message } => {
            Error::internal(format!("identity payload decode failed: {message}"))
        }
        IdentityVerifierError::Transport { message } => {
            Error::service_unavailable(format!("identity provider unreachable: {message}"))
        }
    }
}

async fn extract_caller(req: HttpRequest) -> Result<Caller, Error> {
    let token = bearer_token(&req)?;
    let state = req
        .app_data::<web::Data<HttpState>>()
        .ok_or_else(|| Error::internal("HTTP state not configured"))?;
    let identity = state
        .identity
        .verify(&token)
        .await
        .map_err(map_verifier_error)?;
    Ok(Caller(identity))
}

impl FromRequest for Caller {
    type Error = ApiError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move { extract_caller(req).await.map_err(ApiError::from) })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::identity::Role;
    use crate::domain::user::UserId;
    use crate::inbound::http::test_utils::TestPorts;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test};

    async fn call(ports: TestPorts, authorization: Option<&str>) -> StatusCode {
        let app = test::init_service(
            App::new().app_data(ports.into_state()).route(
                "/whoami",
                web::get().to(|caller: Caller| async move {
                    HttpResponse::Ok().body(caller.identity().user_id.to_string())
                }),
            ),
        )
        .await;

        let mut req = test::TestRequest::get().uri("/whoami");
        if let Some(value) = authorization {
            req = req.insert_header((header::AUTHORIZATION, value));
        }
        test::call_service(&app, req.to_request()).await.status()
    }

    #[actix_web::test]
    async fn missing_header_is_unauthorised() {
        assert_eq!(
            call(TestPorts::default(), None).await,
            StatusCode::UNAUTHORIZED
        );
    }

    #[actix_web::test]
    async fn non_bearer_scheme_is_unauthorised() {
        assert_eq!(
            call(TestPorts::default(), Some("Basic dXNlcjpwdw==")).await,
            StatusCode::UNAUTHORIZED
        );
    }

    #[actix_web::test]
    async fn rejected_token_is_unauthorised() {
        let mut ports = TestPorts::default();
        ports
            .identity
            .expect_verify()
            .return_once(|_| Err(IdentityVerifierError::rejected("expired")));
        assert_eq!(
            call(ports, Some("Bearer expired-token")).await,
            StatusCode::UNAUTHORIZED
        );
    }

    #[actix_web::test]
    async fn provider_outage_is_service_unavailable() {
        let mut ports = TestPorts::default();
        ports
            .identity
            .expect_verify()
            .return_once(|_| Err(IdentityVerifierError::transport("connection refused")));
        assert_eq!(
            call(ports, Some("Bearer token")).await,
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[actix_web::test]
    async fn verified_token_yields_identity() {
        let identity = Identity {
            user_id: UserId::random(),
            role: Role::User,
            verified: true,
        };
        let mut ports = TestPorts::default();
        let returned = identity.clone();
        ports
            .identity
            .expect_verify()
            .withf(|token| token == "good-token")
            .return_once(move |_| Ok(returned));
        assert_eq!(call(ports, Some("Bearer good-token")).await, StatusCode::OK);
    }
}
