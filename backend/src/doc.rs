//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: All HTTP endpoints from the inbound layer (claims, deals,
//!   health)
//! - **Schemas**: Request and response payloads plus domain error wrappers
//!   ([`ErrorSchema`], [`ErrorCodeSchema`]) that provide OpenAPI definitions
//!   without coupling domain types to the utoipa framework
//! - **Security**: Bearer token authentication scheme
//!
//! The generated specification is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::claims::{
    AdminClaimResponse, ClaimResponse, ClaimantResponse, CreateClaimBody, MyClaimResponse,
    UpdateClaimBody,
};
use crate::inbound::http::deals::DealResponse;
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "BearerToken",
            SecurityScheme::Http(
                Http::builder()
                    .scheme(HttpAuthScheme::Bearer)
                    .description(Some(
                        "Opaque bearer token issued by the platform identity provider.",
                    ))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Benefits marketplace backend API",
        description = "HTTP interface for the deal catalogue and claim ledger.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0.html"
        )
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerToken" = [])),
    paths(
        crate::inbound::http::claims::create_claim,
        crate::inbound::http::claims::list_my_claims,
        crate::inbound::http::claims::list_all_claims,
        crate::inbound::http::claims::update_claim_status,
        crate::inbound::http::deals::list_deals,
        crate::inbound::http::deals::get_deal,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        CreateClaimBody,
        UpdateClaimBody,
        ClaimResponse,
        MyClaimResponse,
        AdminClaimResponse,
        ClaimantResponse,
        DealResponse,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "claims", description = "Claim ledger operations"),
        (name = "deals", description = "Deal catalogue reads"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
