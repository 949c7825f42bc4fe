//! Reqwest-backed identity verifier adapter.
//!
//! This adapter owns transport details only: it POSTs the opaque bearer
//! token to the identity provider's introspection endpoint, maps timeout
//! and HTTP errors, and decodes the JSON payload into a caller identity.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;

use crate::domain::identity::{Identity, Role};
use crate::domain::ports::{IdentityVerifier, IdentityVerifierError};
use crate::domain::user::UserId;

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// JSON payload returned by the introspection endpoint.
#[derive(Debug, Deserialize)]
struct IntrospectionDto {
    user_id: uuid::Uuid,
    role: String,
    verified: bool,
}

impl IntrospectionDto {
    fn into_identity(self) -> Result<Identity, IdentityVerifierError> {
        let role: Role = self
            .role
            .parse()
            .map_err(|_| IdentityVerifierError::decode(format!("unrecognised role: {}", self.role)))?;
        Ok(Identity {
            user_id: UserId::from_uuid(self.user_id),
            role,
            verified: self.verified,
        })
    }
}

/// Identity verifier that introspects tokens over HTTP.
pub struct HttpIdentityVerifier {
    client: Client,
    endpoint: Url,
}

impl HttpIdentityVerifier {
    /// Build an adapter with the default request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(endpoint: Url) -> Result<Self, reqwest::Error> {
        Self::with_timeout(endpoint, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Build an adapter with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn with_timeout(endpoint: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl IdentityVerifier for HttpIdentityVerifier {
    async fn verify(&self, token: &str) -> Result<Identity, IdentityVerifierError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(token)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }

        parse_identity(body.as_ref())
    }
}

fn parse_identity(body: &[u8]) -> Result<Identity, IdentityVerifierError> {
    let decoded: IntrospectionDto = serde_json::from_slice(body).map_err(|error| {
        IdentityVerifierError::decode(format!("invalid introspection payload: {error}"))
    })?;
    decoded.into_identity()
}

fn map_transport_error(error: reqwest::Error) -> IdentityVerifierError {
    IdentityVerifierError::transport(error.to_string())
}

fn map_status_error(status: StatusCode, body: &[u8]) -> IdentityVerifierError {
    let body_preview = body_preview(body);
    let message = if body_preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), body_preview)
    };

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => IdentityVerifierError::rejected(message),
        _ if status.is_client_error() => IdentityVerifierError::decode(message),
        _ => IdentityVerifierError::transport(message),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for non-network mapping helpers.
    use super::*;
    use rstest::rstest;

    #[test]
    fn parses_introspection_payload_into_identity() {
        let body = r#"{
            "user_id": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
            "role": "admin",
            "verified": true
        }"#;

        let identity = parse_identity(body.as_bytes()).expect("payload should decode");
        assert!(identity.is_admin());
        assert!(identity.verified);
        assert_eq!(
            identity.user_id.to_string(),
            "3fa85f64-5717-4562-b3fc-2c963f66afa6"
        );
    }

    #[test]
    fn rejects_payloads_with_unknown_roles() {
        let body = r#"{
            "user_id": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
            "role": "owner",
            "verified": false
        }"#;

        let error = parse_identity(body.as_bytes()).expect_err("decode should fail");
        assert!(matches!(error, IdentityVerifierError::Decode { .. }));
    }

    #[test]
    fn rejects_malformed_json() {
        let error = parse_identity(b"not json").expect_err("decode should fail");
        assert!(matches!(error, IdentityVerifierError::Decode { .. }));
    }

    #[rstest]
    #[case::unauthorised(StatusCode::UNAUTHORIZED, "Rejected")]
    #[case::forbidden(StatusCode::FORBIDDEN, "Rejected")]
    #[case::bad_request(StatusCode::BAD_REQUEST, "Decode")]
    #[case::server_error(StatusCode::INTERNAL_SERVER_ERROR, "Transport")]
    #[case::bad_gateway(StatusCode::BAD_GATEWAY, "Transport")]
    fn maps_http_statuses_to_expected_errors(#[case] status: StatusCode, #[case] expected: &str) {
        let error = map_status_error(status, b"{\"error\":\"token expired\"}");
        let matched = match expected {
            "Rejected" => matches!(error, IdentityVerifierError::Rejected { .. }),
            "Decode" => matches!(error, IdentityVerifierError::Decode { .. }),
            "Transport" => matches!(error, IdentityVerifierError::Transport { .. }),
            _ => panic!("unsupported test expectation: {expected}"),
        };
        assert!(matched, "{status} should map to {expected}");
    }

    #[test]
    fn status_errors_carry_a_body_preview() {
        let error = map_status_error(StatusCode::UNAUTHORIZED, b"{\"error\":\"token expired\"}");
        assert!(error.to_string().contains("token expired"));
    }
}
