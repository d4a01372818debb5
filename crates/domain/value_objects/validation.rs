use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("amount must be greater than zero")]
    NonPositiveAmount,
    #[error("invalid user_id")]
    InvalidUserId,
    #[error("billing_period must be monthly or yearly")]
    InvalidBillingPeriod,
    #[error("invalid next_billing_at, expected an RFC 3339 timestamp")]
    InvalidNextBillingAt,
}

pub(crate) fn required(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Missing(field));
    }
    Ok(trimmed.to_string())
}

pub(crate) fn positive_amount(amount: f64) -> Result<f64, ValidationError> {
    if amount.is_finite() && amount > 0.0 {
        Ok(amount)
    } else {
        Err(ValidationError::NonPositiveAmount)
    }
}

pub fn parse_user_id(value: &str) -> Result<Uuid, ValidationError> {
    let value = required("user_id", value)?;
    Uuid::parse_str(&value).map_err(|_| ValidationError::InvalidUserId)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_trims_and_rejects_blank() {
        assert_eq!(required("title", "  Netflix "), Ok("Netflix".to_string()));
        assert_eq!(required("title", "   "), Err(ValidationError::Missing("title")));
    }

    #[test]
    fn amount_must_be_positive_and_finite() {
        assert_eq!(positive_amount(9.99), Ok(9.99));
        for amount in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert_eq!(positive_amount(amount), Err(ValidationError::NonPositiveAmount));
        }
    }

    #[test]
    fn user_id_must_be_a_uuid() {
        let id = Uuid::new_v4();
        assert_eq!(parse_user_id(&id.to_string()), Ok(id));
        assert_eq!(parse_user_id("not-a-uuid"), Err(ValidationError::InvalidUserId));
        assert_eq!(parse_user_id(""), Err(ValidationError::Missing("user_id")));
    }
}
