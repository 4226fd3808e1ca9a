use crate::db::models::{Balance, RewardTransaction, TransactionType};
use sqlx::types::BigDecimal;
use sqlx::{PgPool, Postgres, Result, Transaction as SqlxTransaction};
use uuid::Uuid;

// --- Balance Queries ---

/// Returns the balance for `user_id`, creating an empty one if absent. The
/// upsert keeps concurrent first requests from racing a read-then-insert.
pub async fn get_or_create_balance(pool: &PgPool, user_id: Uuid) -> Result<Balance> {
    let inserted = sqlx::query_as::<_, Balance>(
        r#"
        INSERT INTO balances (id, user_id)
        VALUES ($1, $2)
        ON CONFLICT (user_id) DO NOTHING
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    match inserted {
        Some(balance) => Ok(balance),
        None => {
            sqlx::query_as::<_, Balance>("SELECT * FROM balances WHERE user_id = $1")
                .bind(user_id)
                .fetch_one(pool)
                .await
        }
    }
}

pub async fn get_balance(pool: &PgPool, id: Uuid) -> Result<Balance> {
    sqlx::query_as::<_, Balance>("SELECT * FROM balances WHERE id = $1")
        .bind(id)
        .fetch_one(pool)
        .await
}

/// Locks the balance row for the rest of the open transaction, serializing
/// concurrent mutations of the same user's balance.
pub async fn lock_balance(
    executor: &mut SqlxTransaction<'_, Postgres>,
    id: Uuid,
) -> Result<Balance> {
    sqlx::query_as::<_, Balance>("SELECT * FROM balances WHERE id = $1 FOR UPDATE")
        .bind(id)
        .fetch_one(&mut **executor)
        .await
}

pub async fn update_balance_points(
    executor: &mut SqlxTransaction<'_, Postgres>,
    id: Uuid,
    new_total: i64,
) -> Result<Balance> {
    sqlx::query_as::<_, Balance>(
        "UPDATE balances SET total_points = $1, updated_at = NOW() WHERE id = $2 RETURNING *",
    )
    .bind(new_total)
    .bind(id)
    .fetch_one(&mut **executor)
    .await
}

// --- Transaction Queries ---

/// Appends an audit-log entry. Must run inside the same transaction as the
/// balance mutation it records.
pub async fn append_transaction(
    executor: &mut SqlxTransaction<'_, Postgres>,
    balance_id: Uuid,
    transaction_type: TransactionType,
    points: i64,
    reference_amount: Option<BigDecimal>,
) -> Result<RewardTransaction> {
    sqlx::query_as::<_, RewardTransaction>(
        r#"
        INSERT INTO reward_transactions (
            id, balance_id, transaction_type, points, reference_amount
        ) VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(balance_id)
    .bind(transaction_type)
    .bind(points)
    .bind(reference_amount)
    .fetch_one(&mut **executor)
    .await
}

pub async fn list_transactions(pool: &PgPool, balance_id: Uuid) -> Result<Vec<RewardTransaction>> {
    sqlx::query_as::<_, RewardTransaction>(
        "SELECT * FROM reward_transactions WHERE balance_id = $1 ORDER BY created_at DESC, id DESC",
    )
    .bind(balance_id)
    .fetch_all(pool)
    .await
}
