use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::AppState;
use crate::auth::AuthUser;
use crate::db::queries;
use crate::error::AppError;
use crate::validation;

#[derive(Debug, Deserialize, ToSchema)]
pub struct PurchaseRequest {
    /// Purchase amount in currency units. Must be strictly positive.
    #[schema(value_type = f64)]
    pub amount: BigDecimal,
}

#[derive(Serialize, ToSchema)]
pub struct PurchaseResponse {
    pub message: String,
    pub new_balance: i64,
    #[schema(value_type = String)]
    pub amount_processed: BigDecimal,
}

#[utoipa::path(
    post,
    path = "/purchase/",
    request_body = PurchaseRequest,
    responses(
        (status = 201, description = "Purchase processed, points credited", body = PurchaseResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Missing or invalid identity")
    ),
    tag = "Rewards"
)]
pub async fn create_purchase(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<PurchaseRequest>,
) -> Result<impl IntoResponse, AppError> {
    validation::validate_purchase_amount(&payload.amount)?;

    let balance = queries::get_or_create_balance(&state.db, user.user_id).await?;
    let updated = state.ledger.add_points(balance.id, &payload.amount).await?;

    Ok((
        StatusCode::CREATED,
        Json(PurchaseResponse {
            message: "Points added successfully.".to_string(),
            new_balance: updated.total_points,
            amount_processed: payload.amount,
        }),
    ))
}
