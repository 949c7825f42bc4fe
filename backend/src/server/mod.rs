//! Server construction and middleware wiring.

mod config;

pub use config::{ConfigError, ServerConfig};

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use crate::Trace;
#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::domain::{ClaimLedgerService, DealCatalogueService};
use crate::inbound::http::claims::{
    create_claim, list_all_claims, list_my_claims, update_claim_status,
};
use crate::inbound::http::deals::{get_deal, list_deals};
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::state::HttpState;
use crate::outbound::identity::HttpIdentityVerifier;
use crate::outbound::persistence::{
    DbPool, DieselClaimRepository, DieselDealRepository, DieselUserDirectory, PoolConfig,
};

/// Assemble the shared HTTP state from database-backed adapters.
fn build_http_state(pool: &DbPool, verifier: HttpIdentityVerifier) -> web::Data<HttpState> {
    let claim_repo = Arc::new(DieselClaimRepository::new(pool.clone()));
    let deal_repo = Arc::new(DieselDealRepository::new(pool.clone()));
    let user_directory = Arc::new(DieselUserDirectory::new(pool.clone()));

    let ledger = Arc::new(ClaimLedgerService::new(
        claim_repo,
        deal_repo.clone(),
        user_directory,
    ));
    let catalogue = Arc::new(DealCatalogueService::new(deal_repo));

    web::Data::new(HttpState {
        claims: ledger.clone(),
        claims_query: ledger,
        deals: catalogue,
        identity: Arc::new(verifier),
    })
}

/// Mount the REST surface, trace middleware, and health probes on one app.
pub fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let api = web::scope("/api")
        .service(create_claim)
        // my-claims registers before the admin listing so the literal
        // segment is not swallowed by `/claims/{id}` lookalikes.
        .service(list_my_claims)
        .service(list_all_claims)
        .service(update_claim_status)
        .service(list_deals)
        .service(get_deal);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// Builds the connection pool and identity verifier, wires the domain
/// services into the shared HTTP state, and binds the listener. Marks the
/// health state ready once the socket is bound.
///
/// # Errors
///
/// Propagates [`std::io::Error`] when the pool, verifier, or listener cannot
/// be constructed.
pub async fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let pool = DbPool::new(PoolConfig::new(config.database_url()))
        .await
        .map_err(|e| std::io::Error::other(format!("database pool initialisation failed: {e}")))?;
    let verifier = HttpIdentityVerifier::new(config.identity_provider_url().clone())
        .map_err(|e| std::io::Error::other(format!("identity verifier build failed: {e}")))?;

    let http_state = build_http_state(&pool, verifier);
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), http_state.clone())
    })
    .bind(config.bind_addr())?
    .run();

    health_state.mark_ready();
    Ok(server)
}
