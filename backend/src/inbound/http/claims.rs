//! Claim ledger HTTP handlers.
//!
//! ```text
//! POST /api/claims
//! GET  /api/claims/my-claims
//! GET  /api/claims            (admin)
//! PUT  /api/claims/{id}       (admin)
//! ```

use actix_web::{HttpResponse, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Error;
use crate::domain::claim::{Claim, ClaimDecision, ClaimDetails, ClaimId, ClaimWithDeal};
use crate::domain::deal::DealId;
use crate::domain::ports::{CreateClaimRequest, UpdateClaimStatusRequest};
use crate::inbound::http::auth::Caller;
use crate::inbound::http::deals::DealResponse;
use crate::inbound::http::error::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{missing_field_error, parse_uuid};

/// Request payload for claiming a deal.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateClaimBody {
    /// Identifier of the deal to claim.
    pub deal_id: Option<String>,
}

/// Request payload for an administrator status decision.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClaimBody {
    /// `approved` or `rejected`.
    pub status: Option<String>,
}

/// Response payload for a bare claim.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClaimResponse {
    /// Claim identifier.
    pub id: String,
    /// The claiming user.
    pub user_id: String,
    /// The claimed deal.
    pub deal_id: String,
    /// `pending`, `approved`, or `rejected`.
    pub status: String,
    /// Creation timestamp (RFC 3339).
    pub claimed_at: String,
}

impl From<Claim> for ClaimResponse {
    fn from(value: Claim) -> Self {
        Self {
            id: value.id.to_string(),
            user_id: value.user_id.to_string(),
            deal_id: value.deal_id.to_string(),
            status: value.status.as_str().to_owned(),
            claimed_at: value.claimed_at.to_rfc3339(),
        }
    }
}

/// Response payload for a claim on the owner's dashboard.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MyClaimResponse {
    /// Claim identifier.
    pub id: String,
    /// `pending`, `approved`, or `rejected`.
    pub status: String,
    /// Creation timestamp (RFC 3339).
    pub claimed_at: String,
    /// The claimed deal's public fields.
    pub deal: DealResponse,
}

impl From<ClaimWithDeal> for MyClaimResponse {
    fn from(value: ClaimWithDeal) -> Self {
        Self {
            id: value.claim.id.to_string(),
            status: value.claim.status.as_str().to_owned(),
            claimed_at: value.claim.claimed_at.to_rfc3339(),
            deal: DealResponse::from(value.deal),
        }
    }
}

/// Claimant summary embedded in admin review rows.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClaimantResponse {
    /// User identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Contact email address.
    pub email: String,
}

/// Response payload for a claim in the admin review queue.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminClaimResponse {
    /// Claim identifier.
    pub id: String,
    /// `pending`, `approved`, or `rejected`.
    pub status: String,
    /// Creation timestamp (RFC 3339).
    pub claimed_at: String,
    /// The claimed deal's public fields.
    pub deal: DealResponse,
    /// The claiming user's summary.
    pub user: ClaimantResponse,
}

impl From<ClaimDetails> for AdminClaimResponse {
    fn from(value: ClaimDetails) -> Self {
        Self {
            id: value.claim.id.to_string(),
            status: value.claim.status.as_str().to_owned(),
            claimed_at: value.claim.claimed_at.to_rfc3339(),
            deal: DealResponse::from(value.deal),
            user: ClaimantResponse {
                id: value.claimant.id.to_string(),
                name: value.claimant.name,
                email: value.claimant.email,
            },
        }
    }
}

fn parse_create_body(body: CreateClaimBody) -> Result<DealId, Error> {
    let raw = body.deal_id.ok_or_else(|| missing_field_error("dealId"))?;
    Ok(DealId::from_uuid(parse_uuid(&raw, "dealId")?))
}

fn parse_update_body(body: UpdateClaimBody) -> Result<ClaimDecision, Error> {
    let raw = body.status.ok_or_else(|| missing_field_error("status"))?;
    raw.parse()
}

/// Claim a deal on behalf of the authenticated caller.
#[utoipa::path(
    post,
    path = "/api/claims",
    request_body = CreateClaimBody,
    responses(
        (status = 201, description = "Claim created in the pending state", body = ClaimResponse),
        (status = 400, description = "Missing or malformed dealId", body = ErrorSchema),
        (status = 401, description = "Unauthenticated", body = ErrorSchema),
        (status = 403, description = "Deal restricted to verified users", body = ErrorSchema),
        (status = 404, description = "Deal not found", body = ErrorSchema),
        (status = 409, description = "Deal already claimed by this user", body = ErrorSchema)
    ),
    tags = ["claims"],
    operation_id = "createClaim"
)]
#[post("/claims")]
pub async fn create_claim(
    state: web::Data<HttpState>,
    caller: Caller,
    payload: web::Json<CreateClaimBody>,
) -> ApiResult<HttpResponse> {
    let deal_id = parse_create_body(payload.into_inner())?;
    let claim = state
        .claims
        .create_claim(CreateClaimRequest {
            caller: caller.into_identity(),
            deal_id,
        })
        .await?;
    Ok(HttpResponse::Created().json(ClaimResponse::from(claim)))
}

/// List the authenticated caller's claims with deals resolved.
#[utoipa::path(
    get,
    path = "/api/claims/my-claims",
    description = "The caller's claims, newest first, each with its deal resolved.",
    responses(
        (status = 200, description = "The caller's claims", body = [MyClaimResponse]),
        (status = 401, description = "Unauthenticated", body = ErrorSchema)
    ),
    tags = ["claims"],
    operation_id = "listMyClaims"
)]
#[get("/claims/my-claims")]
pub async fn list_my_claims(
    state: web::Data<HttpState>,
    caller: Caller,
) -> ApiResult<HttpResponse> {
    let claims = state
        .claims_query
        .list_claims_for_user(caller.identity())
        .await?;
    let payload: Vec<MyClaimResponse> = claims.into_iter().map(MyClaimResponse::from).collect();
    Ok(HttpResponse::Ok().json(payload))
}

/// List every claim for administrator review.
#[utoipa::path(
    get,
    path = "/api/claims",
    description = "Every claim, newest first, with deal and claimant resolved. Administrators only.",
    responses(
        (status = 200, description = "The review queue", body = [AdminClaimResponse]),
        (status = 401, description = "Unauthenticated", body = ErrorSchema),
        (status = 403, description = "Caller is not an administrator", body = ErrorSchema)
    ),
    tags = ["claims"],
    operation_id = "listAllClaims"
)]
#[get("/claims")]
pub async fn list_all_claims(
    state: web::Data<HttpState>,
    caller: Caller,
) -> ApiResult<HttpResponse> {
    let claims = state
        .claims_query
        .list_all_claims(caller.identity())
        .await?;
    let payload: Vec<AdminClaimResponse> =
        claims.into_iter().map(AdminClaimResponse::from).collect();
    Ok(HttpResponse::Ok().json(payload))
}

/// Apply an administrator verdict to a claim.
#[utoipa::path(
    put,
    path = "/api/claims/{id}",
    request_body = UpdateClaimBody,
    params(("id" = String, Path, description = "Claim identifier (UUID)")),
    responses(
        (status = 200, description = "Updated claim", body = ClaimResponse),
        (status = 400, description = "Status is not approved or rejected", body = ErrorSchema),
        (status = 401, description = "Unauthenticated", body = ErrorSchema),
        (status = 403, description = "Caller is not an administrator", body = ErrorSchema),
        (status = 404, description = "Claim not found", body = ErrorSchema)
    ),
    tags = ["claims"],
    operation_id = "updateClaimStatus"
)]
#[put("/claims/{id}")]
pub async fn update_claim_status(
    state: web::Data<HttpState>,
    caller: Caller,
    path: web::Path<String>,
    payload: web::Json<UpdateClaimBody>,
) -> ApiResult<HttpResponse> {
    let claim_id = ClaimId::from_uuid(parse_uuid(&path.into_inner(), "id")?);
    let decision = parse_update_body(payload.into_inner())?;
    let claim = state
        .claims
        .update_claim_status(UpdateClaimStatusRequest {
            caller: caller.into_identity(),
            claim_id,
            decision,
        })
        .await?;
    Ok(HttpResponse::Ok().json(ClaimResponse::from(claim)))
}
