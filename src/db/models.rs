use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::BigDecimal;
use utoipa::ToSchema;
use uuid::Uuid;

/// Loyalty points balance, one row per user. Created lazily on first access
/// and never deleted by this service.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Balance {
    pub id: Uuid,
    pub user_id: Uuid,
    pub total_points: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "transaction_type", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    Earned,
    Redeemed,
}

/// One entry in the append-only audit log. Rows are never updated or deleted
/// after insert.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, ToSchema)]
pub struct RewardTransaction {
    #[schema(value_type = String)]
    pub id: Uuid,
    #[schema(value_type = String)]
    pub balance_id: Uuid,
    pub transaction_type: TransactionType,
    pub points: i64,
    /// Purchase amount for EARNED entries, monetary value of the redeemed
    /// points for REDEEMED entries.
    #[schema(value_type = Option<String>)]
    pub reference_amount: Option<BigDecimal>,
    #[schema(value_type = String)]
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transaction_type_serializes_uppercase() {
        assert_eq!(
            serde_json::to_string(&TransactionType::Earned).unwrap(),
            r#""EARNED""#
        );
        assert_eq!(
            serde_json::to_string(&TransactionType::Redeemed).unwrap(),
            r#""REDEEMED""#
        );
    }
}
