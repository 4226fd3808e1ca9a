use axum::{Json, extract::State, response::IntoResponse};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::AppState;
use crate::auth::AuthUser;
use crate::db::{models::RewardTransaction, queries};
use crate::error::AppError;

#[derive(Serialize, ToSchema)]
pub struct BalanceResponse {
    pub username: String,
    pub total_points: i64,
    #[schema(value_type = String)]
    pub updated_at: DateTime<Utc>,
    /// Newest first.
    pub transactions: Vec<RewardTransaction>,
}

#[utoipa::path(
    get,
    path = "/balance/",
    responses(
        (status = 200, description = "Current balance with transaction history", body = BalanceResponse),
        (status = 401, description = "Missing or invalid identity")
    ),
    tag = "Rewards"
)]
pub async fn get_balance(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let balance = queries::get_or_create_balance(&state.db, user.user_id).await?;
    let transactions = queries::list_transactions(&state.db, balance.id).await?;

    Ok(Json(BalanceResponse {
        username: user.username,
        total_points: balance.total_points,
        updated_at: balance.updated_at,
        transactions,
    }))
}
