use axum::{Json, extract::State, response::IntoResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::AppState;
use crate::auth::AuthUser;
use crate::db::queries;
use crate::error::AppError;
use crate::validation;

#[derive(Debug, Deserialize, ToSchema)]
pub struct RedeemRequest {
    /// Number of points to redeem. Must be at least 1.
    pub points: i64,
}

#[derive(Serialize, ToSchema)]
pub struct RedeemResponse {
    pub message: String,
    pub new_balance: i64,
    pub points_redeemed: i64,
}

#[utoipa::path(
    post,
    path = "/redeem/",
    request_body = RedeemRequest,
    responses(
        (status = 200, description = "Points redeemed", body = RedeemResponse),
        (status = 400, description = "Validation error or insufficient points"),
        (status = 401, description = "Missing or invalid identity")
    ),
    tag = "Rewards"
)]
pub async fn redeem_points(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<RedeemRequest>,
) -> Result<impl IntoResponse, AppError> {
    validation::validate_redeem_points(payload.points)?;

    let balance = queries::get_or_create_balance(&state.db, user.user_id).await?;
    let updated = state.ledger.redeem_points(balance.id, payload.points).await?;

    Ok(Json(RedeemResponse {
        message: "Points redeemed successfully.".to_string(),
        new_balance: updated.total_points,
        points_redeemed: payload.points,
    }))
}
