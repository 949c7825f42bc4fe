//! End-to-end behaviour of the claim ledger over the HTTP surface.
//!
//! These tests run the real domain services against in-memory port
//! implementations, so every eligibility rule, duplicate rejection, and
//! read-side join is exercised exactly as in production, minus PostgreSQL.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use serde_json::json;
use uuid::Uuid;

use benefits_backend::domain::claim::{Claim, ClaimId, ClaimStatus};
use benefits_backend::domain::deal::{AccessLevel, Deal, DealCategory, DealId};
use benefits_backend::domain::identity::{Identity, Role};
use benefits_backend::domain::ports::{
    ClaimRepository, ClaimRepositoryError, DealRepository, DealRepositoryError, IdentityVerifier,
    IdentityVerifierError, NewClaim, NewDeal, UserDirectory, UserDirectoryError,
};
use benefits_backend::domain::user::{UserId, UserSummary};
use benefits_backend::domain::{ClaimLedgerService, DealCatalogueService};
use benefits_backend::inbound::http::claims::{
    create_claim, list_all_claims, list_my_claims, update_claim_status,
};
use benefits_backend::inbound::http::deals::{get_deal, list_deals};
use benefits_backend::inbound::http::state::HttpState;

/// In-memory claim store enforcing the `(user, deal)` uniqueness rule the
/// way the database index does: atomically, inside one lock.
#[derive(Default)]
struct InMemoryClaims {
    rows: Mutex<Vec<Claim>>,
    ticks: AtomicI64,
}

#[async_trait]
impl ClaimRepository for InMemoryClaims {
    async fn insert(&self, new_claim: NewClaim) -> Result<Claim, ClaimRepositoryError> {
        let mut rows = self.rows.lock().map_err(|_| {
            ClaimRepositoryError::connection("claim store lock poisoned")
        })?;
        if rows
            .iter()
            .any(|c| c.user_id == new_claim.user_id && c.deal_id == new_claim.deal_id)
        {
            return Err(ClaimRepositoryError::Duplicate);
        }
        // Monotonic timestamps so newest-first ordering is deterministic.
        let tick = self.ticks.fetch_add(1, Ordering::SeqCst);
        let claim = Claim {
            id: ClaimId::random(),
            user_id: new_claim.user_id,
            deal_id: new_claim.deal_id,
            status: ClaimStatus::Pending,
            claimed_at: Utc::now() + Duration::milliseconds(tick),
        };
        rows.push(claim.clone());
        Ok(claim)
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Claim>, ClaimRepositoryError> {
        let rows = self.rows.lock().map_err(|_| {
            ClaimRepositoryError::connection("claim store lock poisoned")
        })?;
        let mut claims: Vec<Claim> = rows
            .iter()
            .filter(|c| c.user_id == *user_id)
            .cloned()
            .collect();
        claims.sort_by(|a, b| b.claimed_at.cmp(&a.claimed_at));
        Ok(claims)
    }

    async fn list_all(&self) -> Result<Vec<Claim>, ClaimRepositoryError> {
        let rows = self.rows.lock().map_err(|_| {
            ClaimRepositoryError::connection("claim store lock poisoned")
        })?;
        let mut claims = rows.clone();
        claims.sort_by(|a, b| b.claimed_at.cmp(&a.claimed_at));
        Ok(claims)
    }

    async fn update_status(
        &self,
        claim_id: &ClaimId,
        status: ClaimStatus,
    ) -> Result<Option<Claim>, ClaimRepositoryError> {
        let mut rows = self.rows.lock().map_err(|_| {
            ClaimRepositoryError::connection("claim store lock poisoned")
        })?;
        for claim in rows.iter_mut() {
            if claim.id == *claim_id {
                claim.status = status;
                return Ok(Some(claim.clone()));
            }
        }
        Ok(None)
    }
}

#[derive(Default)]
struct InMemoryDeals {
    rows: Mutex<HashMap<DealId, Deal>>,
}

impl InMemoryDeals {
    fn seed(&self, deal: Deal) -> DealId {
        let id = deal.id;
        self.rows
            .lock()
            .expect("deal store lock poisoned")
            .insert(id, deal);
        id
    }
}

#[async_trait]
impl DealRepository for InMemoryDeals {
    async fn find_by_id(&self, deal_id: &DealId) -> Result<Option<Deal>, DealRepositoryError> {
        let rows = self
            .rows
            .lock()
            .map_err(|_| DealRepositoryError::connection("deal store lock poisoned"))?;
        Ok(rows.get(deal_id).cloned())
    }

    async fn find_by_ids(&self, deal_ids: &[DealId]) -> Result<Vec<Deal>, DealRepositoryError> {
        let rows = self
            .rows
            .lock()
            .map_err(|_| DealRepositoryError::connection("deal store lock poisoned"))?;
        Ok(deal_ids.iter().filter_map(|id| rows.get(id).cloned()).collect())
    }

    async fn list(&self) -> Result<Vec<Deal>, DealRepositoryError> {
        let rows = self
            .rows
            .lock()
            .map_err(|_| DealRepositoryError::connection("deal store lock poisoned"))?;
        let mut deals: Vec<Deal> = rows.values().cloned().collect();
        deals.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(deals)
    }

    async fn insert(&self, new_deal: NewDeal) -> Result<Deal, DealRepositoryError> {
        let now = Utc::now();
        let deal = Deal {
            id: DealId::random(),
            title: new_deal.title,
            description: new_deal.description,
            category: new_deal.category,
            discount: new_deal.discount,
            partner_name: new_deal.partner_name,
            logo_url: new_deal.logo_url,
            redemption_link: new_deal.redemption_link,
            access_level: new_deal.access_level,
            eligibility_conditions: new_deal.eligibility_conditions,
            featured: new_deal.featured,
            created_at: now,
            updated_at: now,
        };
        self.seed(deal.clone());
        Ok(deal)
    }
}

#[derive(Default)]
struct InMemoryUsers {
    rows: Mutex<HashMap<UserId, UserSummary>>,
}

impl InMemoryUsers {
    fn seed(&self, summary: UserSummary) {
        self.rows
            .lock()
            .expect("user store lock poisoned")
            .insert(summary.id, summary);
    }
}

#[async_trait]
impl UserDirectory for InMemoryUsers {
    async fn find_summaries(
        &self,
        user_ids: &[UserId],
    ) -> Result<Vec<UserSummary>, UserDirectoryError> {
        let rows = self
            .rows
            .lock()
            .map_err(|_| UserDirectoryError::connection("user store lock poisoned"))?;
        Ok(user_ids.iter().filter_map(|id| rows.get(id).cloned()).collect())
    }
}

/// Verifier that resolves tokens from a fixed table, standing in for the
/// external identity provider.
#[derive(Default)]
struct StaticVerifier {
    tokens: HashMap<String, Identity>,
}

impl StaticVerifier {
    fn with_token(mut self, token: &str, identity: Identity) -> Self {
        self.tokens.insert(token.to_owned(), identity);
        self
    }
}

#[async_trait]
impl IdentityVerifier for StaticVerifier {
    async fn verify(&self, token: &str) -> Result<Identity, IdentityVerifierError> {
        self.tokens
            .get(token)
            .cloned()
            .ok_or_else(|| IdentityVerifierError::rejected("unknown token"))
    }
}

struct Fixture {
    claims: Arc<InMemoryClaims>,
    deals: Arc<InMemoryDeals>,
    users: Arc<InMemoryUsers>,
    verifier: StaticVerifier,
}

impl Fixture {
    fn new() -> Self {
        Self {
            claims: Arc::new(InMemoryClaims::default()),
            deals: Arc::new(InMemoryDeals::default()),
            users: Arc::new(InMemoryUsers::default()),
            verifier: StaticVerifier::default(),
        }
    }

    fn grant(mut self, token: &str, identity: &Identity) -> Self {
        self.verifier = self.verifier.with_token(token, identity.clone());
        self
    }

    fn into_state(self) -> web::Data<HttpState> {
        let ledger = Arc::new(ClaimLedgerService::new(
            self.claims,
            self.deals.clone(),
            self.users,
        ));
        let catalogue = Arc::new(DealCatalogueService::new(self.deals));
        web::Data::new(HttpState {
            claims: ledger.clone(),
            claims_query: ledger,
            deals: catalogue,
            identity: Arc::new(self.verifier),
        })
    }
}

async fn spawn_app(
    state: web::Data<HttpState>,
) -> impl actix_web::dev::Service<
    actix_http::Request,
    Response = actix_web::dev::ServiceResponse,
    Error = actix_web::Error,
> {
    test::init_service(
        App::new().app_data(state).service(
            web::scope("/api")
                .service(create_claim)
                .service(list_my_claims)
                .service(list_all_claims)
                .service(update_claim_status)
                .service(list_deals)
                .service(get_deal),
        ),
    )
    .await
}

fn member(verified: bool) -> Identity {
    Identity {
        user_id: UserId::random(),
        role: Role::User,
        verified,
    }
}

fn admin() -> Identity {
    Identity {
        user_id: UserId::random(),
        role: Role::Admin,
        verified: true,
    }
}

fn deal(title: &str, access_level: AccessLevel) -> Deal {
    let now = Utc::now();
    Deal {
        id: DealId::random(),
        title: title.to_owned(),
        description: format!("{title} description"),
        category: DealCategory::Productivity,
        discount: "20% off".to_owned(),
        partner_name: "Partner".to_owned(),
        logo_url: "https://cdn.example.com/logo.png".to_owned(),
        redemption_link: None,
        access_level,
        eligibility_conditions: "None.".to_owned(),
        featured: false,
        created_at: now,
        updated_at: now,
    }
}

fn summary_for(identity: &Identity, name: &str) -> UserSummary {
    UserSummary {
        id: identity.user_id,
        name: name.to_owned(),
        email: format!("{}@example.com", name.to_lowercase()),
    }
}

fn post_claim(deal_id: &DealId, token: &str) -> actix_http::Request {
    test::TestRequest::post()
        .uri("/api/claims")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({ "dealId": deal_id.to_string() }))
        .to_request()
}

fn get_with_token(uri: &str, token: &str) -> actix_http::Request {
    test::TestRequest::get()
        .uri(uri)
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request()
}

fn claimed_titles(body: &serde_json::Value) -> Vec<&str> {
    body.as_array()
        .expect("claim list")
        .iter()
        .map(|claim| claim["deal"]["title"].as_str().expect("deal title"))
        .collect()
}

#[actix_web::test]
async fn claim_lifecycle_from_creation_to_approval() {
    let caller = member(true);
    let reviewer = admin();
    let fixture = Fixture::new()
        .grant("member-token", &caller)
        .grant("admin-token", &reviewer);
    let deal_id = fixture.deals.seed(deal("Notion Plus", AccessLevel::Public));
    fixture.users.seed(summary_for(&caller, "Ada"));
    let app = spawn_app(fixture.into_state()).await;

    // Create
    let res = test::call_service(&app, post_claim(&deal_id, "member-token")).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: serde_json::Value = test::read_body_json(res).await;
    assert_eq!(created["status"], "pending");
    let claim_id = created["id"].as_str().expect("claim id").to_owned();

    // Owner dashboard resolves the deal
    let res = test::call_service(
        &app,
        get_with_token("/api/claims/my-claims", "member-token"),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let mine: serde_json::Value = test::read_body_json(res).await;
    assert_eq!(mine[0]["deal"]["title"], "Notion Plus");

    // Review queue resolves the claimant
    let res = test::call_service(&app, get_with_token("/api/claims", "admin-token")).await;
    assert_eq!(res.status(), StatusCode::OK);
    let queue: serde_json::Value = test::read_body_json(res).await;
    assert_eq!(queue[0]["user"]["name"], "Ada");

    // Approve
    let res = test::call_service(
        &app,
        test::TestRequest::put()
            .uri(&format!("/api/claims/{claim_id}"))
            .insert_header(("Authorization", "Bearer admin-token"))
            .set_json(json!({ "status": "approved" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let updated: serde_json::Value = test::read_body_json(res).await;
    assert_eq!(updated["status"], "approved");

    // Re-review flips the verdict; the overwrite is idempotent
    for expected in ["rejected", "rejected"] {
        let res = test::call_service(
            &app,
            test::TestRequest::put()
                .uri(&format!("/api/claims/{claim_id}"))
                .insert_header(("Authorization", "Bearer admin-token"))
                .set_json(json!({ "status": "rejected" }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body["status"], expected);
    }
}

#[actix_web::test]
async fn restricted_deals_reject_unverified_callers() {
    let caller = member(false);
    let fixture = Fixture::new().grant("member-token", &caller);
    let deal_id = fixture.deals.seed(deal("AWS credits", AccessLevel::Restricted));
    let app = spawn_app(fixture.into_state()).await;

    let res = test::call_service(&app, post_claim(&deal_id, "member-token")).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    let body: serde_json::Value = test::read_body_json(res).await;
    assert_eq!(
        body["message"],
        "This deal is restricted to verified users only"
    );
}

#[actix_web::test]
async fn restricted_deals_accept_verified_callers() {
    let caller = member(true);
    let fixture = Fixture::new().grant("member-token", &caller);
    let deal_id = fixture.deals.seed(deal("AWS credits", AccessLevel::Restricted));
    let app = spawn_app(fixture.into_state()).await;

    let res = test::call_service(&app, post_claim(&deal_id, "member-token")).await;
    assert_eq!(res.status(), StatusCode::CREATED);
}

#[actix_web::test]
async fn unknown_deals_yield_not_found() {
    let caller = member(true);
    let fixture = Fixture::new().grant("member-token", &caller);
    let app = spawn_app(fixture.into_state()).await;

    let res = test::call_service(&app, post_claim(&DealId::random(), "member-token")).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = test::read_body_json(res).await;
    assert_eq!(body["message"], "Deal not found");
}

#[actix_web::test]
async fn repeat_claims_conflict_even_after_rejection() {
    let caller = member(true);
    let reviewer = admin();
    let fixture = Fixture::new()
        .grant("member-token", &caller)
        .grant("admin-token", &reviewer);
    let deal_id = fixture.deals.seed(deal("HubSpot", AccessLevel::Public));
    let app = spawn_app(fixture.into_state()).await;

    let res = test::call_service(&app, post_claim(&deal_id, "member-token")).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: serde_json::Value = test::read_body_json(res).await;
    let claim_id = created["id"].as_str().expect("claim id").to_owned();

    // A rejected claim still occupies the (user, deal) slot.
    let res = test::call_service(
        &app,
        test::TestRequest::put()
            .uri(&format!("/api/claims/{claim_id}"))
            .insert_header(("Authorization", "Bearer admin-token"))
            .set_json(json!({ "status": "rejected" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = test::call_service(&app, post_claim(&deal_id, "member-token")).await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body: serde_json::Value = test::read_body_json(res).await;
    assert_eq!(body["message"], "You have already claimed this deal");
}

#[actix_web::test]
async fn concurrent_claims_for_one_deal_yield_exactly_one_winner() {
    let caller = member(true);
    let fixture = Fixture::new().grant("member-token", &caller);
    let deal_id = fixture.deals.seed(deal("Stripe rebate", AccessLevel::Public));
    let app = spawn_app(fixture.into_state()).await;

    let (first, second) = tokio::join!(
        test::call_service(&app, post_claim(&deal_id, "member-token")),
        test::call_service(&app, post_claim(&deal_id, "member-token")),
    );

    let mut statuses = [first.status(), second.status()];
    statuses.sort();
    assert_eq!(statuses, [StatusCode::CREATED, StatusCode::CONFLICT]);
}

#[actix_web::test]
async fn dashboards_list_claims_newest_first() {
    let caller = member(true);
    let fixture = Fixture::new().grant("member-token", &caller);
    let first_deal = fixture.deals.seed(deal("First", AccessLevel::Public));
    let second_deal = fixture.deals.seed(deal("Second", AccessLevel::Public));
    let app = spawn_app(fixture.into_state()).await;

    for deal_id in [&first_deal, &second_deal] {
        let res = test::call_service(&app, post_claim(deal_id, "member-token")).await;
        assert_eq!(res.status(), StatusCode::CREATED);
    }

    let res = test::call_service(
        &app,
        get_with_token("/api/claims/my-claims", "member-token"),
    )
    .await;
    let mine: serde_json::Value = test::read_body_json(res).await;
    assert_eq!(mine[0]["deal"]["title"], "Second");
    assert_eq!(mine[1]["deal"]["title"], "First");
}

#[actix_web::test]
async fn dashboards_only_show_the_callers_claims() {
    let ada = member(true);
    let bob = member(true);
    let fixture = Fixture::new()
        .grant("ada-token", &ada)
        .grant("bob-token", &bob);
    let shared_deal = fixture.deals.seed(deal("Shared", AccessLevel::Public));
    let bob_deal = fixture.deals.seed(deal("Bob only", AccessLevel::Public));
    let app = spawn_app(fixture.into_state()).await;

    for (deal_id, token) in [
        (&shared_deal, "ada-token"),
        (&shared_deal, "bob-token"),
        (&bob_deal, "bob-token"),
    ] {
        let res = test::call_service(&app, post_claim(deal_id, token)).await;
        assert_eq!(res.status(), StatusCode::CREATED);
    }

    let res = test::call_service(&app, get_with_token("/api/claims/my-claims", "ada-token")).await;
    let mine: serde_json::Value = test::read_body_json(res).await;
    assert_eq!(claimed_titles(&mine), ["Shared"]);

    let res = test::call_service(&app, get_with_token("/api/claims/my-claims", "bob-token")).await;
    let mine: serde_json::Value = test::read_body_json(res).await;
    assert_eq!(claimed_titles(&mine), ["Bob only", "Shared"]);
}

#[actix_web::test]
async fn review_operations_require_the_admin_role() {
    let caller = member(true);
    let fixture = Fixture::new().grant("member-token", &caller);
    let deal_id = fixture.deals.seed(deal("Figma", AccessLevel::Public));
    let app = spawn_app(fixture.into_state()).await;

    let res = test::call_service(&app, post_claim(&deal_id, "member-token")).await;
    let created: serde_json::Value = test::read_body_json(res).await;
    let claim_id = created["id"].as_str().expect("claim id").to_owned();

    let res = test::call_service(&app, get_with_token("/api/claims", "member-token")).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = test::call_service(
        &app,
        test::TestRequest::put()
            .uri(&format!("/api/claims/{claim_id}"))
            .insert_header(("Authorization", "Bearer member-token"))
            .set_json(json!({ "status": "approved" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn missing_or_unknown_tokens_are_unauthorised() {
    let fixture = Fixture::new();
    let deal_id = fixture.deals.seed(deal("Figma", AccessLevel::Public));
    let app = spawn_app(fixture.into_state()).await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/claims")
            .set_json(json!({ "dealId": deal_id.to_string() }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = test::call_service(&app, post_claim(&deal_id, "forged-token")).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn verdicts_for_unknown_claims_yield_not_found() {
    let reviewer = admin();
    let fixture = Fixture::new().grant("admin-token", &reviewer);
    let app = spawn_app(fixture.into_state()).await;

    let res = test::call_service(
        &app,
        test::TestRequest::put()
            .uri(&format!("/api/claims/{}", Uuid::new_v4()))
            .insert_header(("Authorization", "Bearer admin-token"))
            .set_json(json!({ "status": "approved" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = test::read_body_json(res).await;
    assert_eq!(body["message"], "Claim not found");
}

#[actix_web::test]
async fn catalogue_reads_need_no_token() {
    let fixture = Fixture::new();
    let deal_id = fixture.deals.seed(deal("Figma", AccessLevel::Public));
    let app = spawn_app(fixture.into_state()).await;

    let res = test::call_service(&app, test::TestRequest::get().uri("/api/deals").to_request())
        .await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/deals/{deal_id}"))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(res).await;
    assert_eq!(body["title"], "Figma");
}
