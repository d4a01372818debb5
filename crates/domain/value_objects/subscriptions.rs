use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::domain::{
    entities::subscriptions::{InsertSubscriptionEntity, SubscriptionEntity},
    value_objects::{
        enums::billing_periods::BillingPeriod,
        validation::{ValidationError, parse_user_id, positive_amount, required},
    },
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubscriptionModel {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub amount: f64,
    pub currency: String,
    pub billing_period: BillingPeriod,
    pub next_billing_at: DateTime<Utc>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<SubscriptionEntity> for SubscriptionModel {
    fn from(value: SubscriptionEntity) -> Self {
        // The column has a CHECK constraint, so the fallback only covers rows
        // written around it.
        let billing_period = BillingPeriod::from_str(&value.billing_period).unwrap_or_else(|| {
            warn!(
                subscription_id = %value.id,
                billing_period = %value.billing_period,
                "subscriptions: unknown billing period in storage, reporting as monthly"
            );
            BillingPeriod::Monthly
        });

        Self {
            id: value.id,
            user_id: value.user_id,
            title: value.title,
            amount: value.amount,
            currency: value.currency,
            billing_period,
            next_billing_at: value.next_billing_at,
            active: value.active,
            created_at: value.created_at,
        }
    }
}

/// Request body of `POST /subscriptions`. Missing fields deserialize to empty
/// values so they fail validation with a field-specific message.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CreateSubscriptionRequest {
    pub user_id: String,
    pub title: String,
    pub amount: f64,
    pub currency: String,
    pub billing_period: String,
    pub next_billing_at: String,
}

impl CreateSubscriptionRequest {
    pub fn into_insert_entity(self) -> Result<InsertSubscriptionEntity, ValidationError> {
        let user_id = parse_user_id(&self.user_id)?;
        let title = required("title", &self.title)?;
        let amount = positive_amount(self.amount)?;
        let currency = required("currency", &self.currency)?;

        let billing_period = required("billing_period", &self.billing_period)?;
        let billing_period = BillingPeriod::from_str(&billing_period)
            .ok_or(ValidationError::InvalidBillingPeriod)?;

        let next_billing_at = required("next_billing_at", &self.next_billing_at)?;
        let next_billing_at = DateTime::parse_from_rfc3339(&next_billing_at)
            .map_err(|_| ValidationError::InvalidNextBillingAt)?
            .with_timezone(&Utc);

        Ok(InsertSubscriptionEntity {
            user_id,
            title,
            amount,
            currency,
            billing_period: billing_period.to_string(),
            next_billing_at,
            active: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn entity_with_period(billing_period: &str) -> SubscriptionEntity {
        let now = Utc::now();
        SubscriptionEntity {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            title: "Dropbox".to_string(),
            amount: 11.99,
            currency: "USD".to_string(),
            billing_period: billing_period.to_string(),
            next_billing_at: now,
            active: true,
            created_at: now,
        }
    }

    #[test]
    fn model_keeps_stored_billing_period() {
        let model = SubscriptionModel::from(entity_with_period("yearly"));
        assert_eq!(model.billing_period, BillingPeriod::Yearly);
    }

    #[test]
    fn unknown_stored_billing_period_is_reported_as_monthly() {
        let model = SubscriptionModel::from(entity_with_period("weekly"));
        assert_eq!(model.billing_period, BillingPeriod::Monthly);
    }

    fn valid_request() -> CreateSubscriptionRequest {
        CreateSubscriptionRequest {
            user_id: "1b4e28ba-2fa1-11d2-883f-0016d3cca427".to_string(),
            title: "Spotify".to_string(),
            amount: 59.99,
            currency: "TRY".to_string(),
            billing_period: "monthly".to_string(),
            next_billing_at: "2026-11-01T09:00:00+03:00".to_string(),
        }
    }

    #[test]
    fn valid_request_becomes_active_insert_entity() {
        let entity = valid_request().into_insert_entity().unwrap();

        assert_eq!(entity.title, "Spotify");
        assert_eq!(entity.billing_period, "monthly");
        assert!(entity.active);
        assert_eq!(
            entity.next_billing_at,
            Utc.with_ymd_and_hms(2026, 11, 1, 6, 0, 0).unwrap()
        );
    }

    #[test]
    fn each_invalid_field_is_reported() {
        let cases: Vec<(CreateSubscriptionRequest, ValidationError)> = vec![
            (
                CreateSubscriptionRequest {
                    user_id: "abc".to_string(),
                    ..valid_request()
                },
                ValidationError::InvalidUserId,
            ),
            (
                CreateSubscriptionRequest {
                    title: " ".to_string(),
                    ..valid_request()
                },
                ValidationError::Missing("title"),
            ),
            (
                CreateSubscriptionRequest {
                    amount: 0.0,
                    ..valid_request()
                },
                ValidationError::NonPositiveAmount,
            ),
            (
                CreateSubscriptionRequest {
                    currency: String::new(),
                    ..valid_request()
                },
                ValidationError::Missing("currency"),
            ),
            (
                CreateSubscriptionRequest {
                    billing_period: "weekly".to_string(),
                    ..valid_request()
                },
                ValidationError::InvalidBillingPeriod,
            ),
            (
                CreateSubscriptionRequest {
                    next_billing_at: "2026-11-01".to_string(),
                    ..valid_request()
                },
                ValidationError::InvalidNextBillingAt,
            ),
        ];

        for (request, expected) in cases {
            assert_eq!(request.into_insert_entity().unwrap_err(), expected);
        }
    }

    #[test]
    fn missing_fields_deserialize_to_validation_errors() {
        let request: CreateSubscriptionRequest =
            serde_json::from_str(r#"{"title":"Netflix"}"#).unwrap();
        assert_eq!(
            request.into_insert_entity().unwrap_err(),
            ValidationError::Missing("user_id")
        );
    }
}
