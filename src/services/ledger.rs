use bigdecimal::{BigDecimal, ToPrimitive};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::models::{Balance, TransactionType};
use crate::db::queries;
use crate::error::AppError;

/// One point per 1000 currency units spent.
pub const POINTS_PER_CURRENCY_UNIT: i64 = 1000;
/// One point is worth 100 currency units when redeemed.
pub const VALUE_PER_POINT: i64 = 100;

/// Points earned by a purchase of `amount`: truncating division, never rounds
/// up. Returns `None` only if the quotient overflows i64.
pub fn earned_points(amount: &BigDecimal) -> Option<i64> {
    (amount / BigDecimal::from(POINTS_PER_CURRENCY_UNIT))
        .with_scale(0)
        .to_i64()
}

/// Monetary value of a redemption of `points`.
pub fn redemption_value(points: i64) -> BigDecimal {
    (BigDecimal::from(points) * BigDecimal::from(VALUE_PER_POINT)).with_scale(2)
}

/// The two mutating operations of the ledger. Each one runs its balance
/// update and audit-log append as a single database transaction, opened with
/// a row lock so concurrent operations on the same balance serialize.
#[derive(Clone)]
pub struct LedgerService {
    pool: PgPool,
}

impl LedgerService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Converts a purchase amount into points and credits them. A purchase
    /// too small to earn a point is accepted but changes nothing.
    pub async fn add_points(&self, balance_id: Uuid, amount: &BigDecimal) -> Result<Balance, AppError> {
        if amount < &BigDecimal::from(0) {
            return Err(AppError::InvalidAmount(format!(
                "amount must not be negative, got {}",
                amount
            )));
        }

        let earned = earned_points(amount).ok_or_else(|| {
            AppError::InvalidAmount(format!("amount out of range: {}", amount))
        })?;

        if earned == 0 {
            return Ok(queries::get_balance(&self.pool, balance_id).await?);
        }

        let mut tx = self.pool.begin().await?;
        let balance = queries::lock_balance(&mut tx, balance_id).await?;

        let updated =
            queries::update_balance_points(&mut tx, balance_id, balance.total_points + earned)
                .await?;
        queries::append_transaction(
            &mut tx,
            balance_id,
            TransactionType::Earned,
            earned,
            Some(amount.clone()),
        )
        .await?;

        tx.commit().await?;

        tracing::info!(%balance_id, earned, new_total = updated.total_points, "points earned");
        Ok(updated)
    }

    /// Debits `points` from the balance if sufficient, recording the monetary
    /// value of the redemption in the audit log.
    pub async fn redeem_points(&self, balance_id: Uuid, points: i64) -> Result<Balance, AppError> {
        if points < 0 {
            return Err(AppError::InvalidAmount(format!(
                "points must not be negative, got {}",
                points
            )));
        }

        let mut tx = self.pool.begin().await?;
        let balance = queries::lock_balance(&mut tx, balance_id).await?;

        // Checked under the row lock, so two concurrent redemptions cannot
        // both pass against a stale total.
        if points > balance.total_points {
            tx.rollback().await?;
            return Err(AppError::InsufficientPoints {
                balance: balance.total_points,
                requested: points,
            });
        }

        let updated =
            queries::update_balance_points(&mut tx, balance_id, balance.total_points - points)
                .await?;
        queries::append_transaction(
            &mut tx,
            balance_id,
            TransactionType::Redeemed,
            points,
            Some(redemption_value(points)),
        )
        .await?;

        tx.commit().await?;

        tracing::info!(%balance_id, points, new_total = updated.total_points, "points redeemed");
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).expect("valid decimal")
    }

    #[test]
    fn earns_one_point_per_thousand() {
        assert_eq!(earned_points(&dec("0")), Some(0));
        assert_eq!(earned_points(&dec("999")), Some(0));
        assert_eq!(earned_points(&dec("999.99")), Some(0));
        assert_eq!(earned_points(&dec("1000")), Some(1));
        assert_eq!(earned_points(&dec("1999.99")), Some(1));
        assert_eq!(earned_points(&dec("2500")), Some(2));
        assert_eq!(earned_points(&dec("1000000")), Some(1000));
    }

    #[test]
    fn earned_points_never_rounds_up() {
        assert_eq!(earned_points(&dec("2999.99")), Some(2));
        assert_eq!(earned_points(&dec("3000")), Some(3));
    }

    #[test]
    fn redemption_value_uses_fixed_rate() {
        assert_eq!(redemption_value(0), dec("0.00"));
        assert_eq!(redemption_value(2), dec("200.00"));
        assert_eq!(redemption_value(37), dec("3700.00"));
    }
}
