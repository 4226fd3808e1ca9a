use bigdecimal::BigDecimal;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

pub type ValidationResult = Result<(), ValidationError>;

/// Purchase amounts must be strictly positive at the API boundary. The ledger
/// itself tolerates zero, so this check is intentionally stricter.
pub fn validate_purchase_amount(amount: &BigDecimal) -> ValidationResult {
    if amount <= &BigDecimal::from(0) {
        return Err(ValidationError::new("amount", "must be greater than zero"));
    }

    Ok(())
}

/// Redemptions must request at least one point.
pub fn validate_redeem_points(points: i64) -> ValidationResult {
    if points < 1 {
        return Err(ValidationError::new("points", "must be at least 1"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn validates_purchase_amount() {
        let positive = BigDecimal::from_str("0.01").expect("valid decimal");
        let zero = BigDecimal::from(0);
        let negative = BigDecimal::from(-1);

        assert!(validate_purchase_amount(&positive).is_ok());
        assert!(validate_purchase_amount(&zero).is_err());
        assert!(validate_purchase_amount(&negative).is_err());
    }

    #[test]
    fn validates_redeem_points() {
        assert!(validate_redeem_points(1).is_ok());
        assert!(validate_redeem_points(250).is_ok());
        assert!(validate_redeem_points(0).is_err());
        assert!(validate_redeem_points(-3).is_err());
    }

    #[test]
    fn validation_error_display_includes_field() {
        let err = ValidationError::new("points", "must be at least 1");
        assert_eq!(err.to_string(), "points: must be at least 1");
    }
}
