pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod services;
pub mod startup;
pub mod validation;

use axum::{
    Json, Router,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;

use crate::services::LedgerService;

#[derive(Clone)]
pub struct AppState {
    pub db: sqlx::PgPool,
    pub ledger: LedgerService,
}

impl AppState {
    pub fn new(db: sqlx::PgPool) -> Self {
        let ledger = LedgerService::new(db.clone());
        Self { db, ledger }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health,
        handlers::balance::get_balance,
        handlers::purchase::create_purchase,
        handlers::redeem::redeem_points,
    ),
    components(schemas(
        handlers::HealthStatus,
        handlers::balance::BalanceResponse,
        handlers::purchase::PurchaseRequest,
        handlers::purchase::PurchaseResponse,
        handlers::redeem::RedeemRequest,
        handlers::redeem::RedeemResponse,
        db::models::RewardTransaction,
        db::models::TransactionType,
    ))
)]
pub struct ApiDoc;

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/balance/", get(handlers::balance::get_balance))
        .route("/purchase/", post(handlers::purchase::create_purchase))
        .route("/redeem/", post(handlers::redeem::redeem_points))
        .route(
            "/api-docs/openapi.json",
            get(|| async { Json(ApiDoc::openapi()) }),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}
