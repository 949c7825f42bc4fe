//! Deal catalogue HTTP handlers.
//!
//! ```text
//! GET /api/deals
//! GET /api/deals/{id}
//! ```
//!
//! Catalogue reads are public; deal writes are not exposed over HTTP.

use actix_web::{HttpResponse, get, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::deal::{Deal, DealId};
use crate::inbound::http::error::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_uuid;

/// Response payload for a catalogue deal.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DealResponse {
    /// Deal identifier.
    pub id: String,
    /// Short headline shown in the catalogue.
    pub title: String,
    /// Longer description of the offer.
    pub description: String,
    /// Category the deal is filed under.
    pub category: String,
    /// Human-readable discount terms.
    pub discount: String,
    /// Name of the SaaS partner providing the discount.
    pub partner_name: String,
    /// Partner logo displayed on deal cards.
    pub logo_url: String,
    /// Link the user follows to redeem an approved claim.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redemption_link: Option<String>,
    /// `public` or `restricted`.
    pub access_level: String,
    /// Free-text eligibility conditions shown to users.
    pub eligibility_conditions: String,
    /// Whether the deal is highlighted on the landing page.
    pub featured: bool,
    /// Record creation timestamp (RFC 3339).
    pub created_at: String,
}

impl From<Deal> for DealResponse {
    fn from(value: Deal) -> Self {
        Self {
            id: value.id.to_string(),
            title: value.title,
            description: value.description,
            category: value.category.as_str().to_owned(),
            discount: value.discount,
            partner_name: value.partner_name,
            logo_url: value.logo_url,
            redemption_link: value.redemption_link,
            access_level: value.access_level.as_str().to_owned(),
            eligibility_conditions: value.eligibility_conditions,
            featured: value.featured,
            created_at: value.created_at.to_rfc3339(),
        }
    }
}

/// List the deal catalogue.
#[utoipa::path(
    get,
    path = "/api/deals",
    description = "List every deal in the catalogue, newest first.",
    security([]),
    responses(
        (status = 200, description = "Deal catalogue", body = [DealResponse]),
        (status = 503, description = "Catalogue unavailable", body = ErrorSchema)
    ),
    tags = ["deals"],
    operation_id = "listDeals"
)]
#[get("/deals")]
pub async fn list_deals(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let deals = state.deals.list_deals().await?;
    let payload: Vec<DealResponse> = deals.into_iter().map(DealResponse::from).collect();
    Ok(HttpResponse::Ok().json(payload))
}

/// Fetch one deal by id.
#[utoipa::path(
    get,
    path = "/api/deals/{id}",
    description = "Fetch a single catalogue deal.",
    security([]),
    params(("id" = String, Path, description = "Deal identifier (UUID)")),
    responses(
        (status = 200, description = "The deal", body = DealResponse),
        (status = 400, description = "Malformed identifier", body = ErrorSchema),
        (status = 404, description = "Deal not found", body = ErrorSchema)
    ),
    tags = ["deals"],
    operation_id = "getDeal"
)]
#[get("/deals/{id}")]
pub async fn get_deal(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let deal_id = DealId::from_uuid(parse_uuid(&path.into_inner(), "id")?);
    let deal = state.deals.get_deal(deal_id).await?;
    Ok(HttpResponse::Ok().json(DealResponse::from(deal)))
}
