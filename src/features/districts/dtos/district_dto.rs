use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::districts::models::District;
use crate::shared::validation::validate_non_negative;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DistrictResponseDto {
    pub id: Uuid,
    pub name: String,
    #[schema(value_type = String, example = "15000.00")]
    pub shipping_cost: Decimal,
}

impl From<District> for DistrictResponseDto {
    fn from(d: District) -> Self {
        Self {
            id: d.id,
            name: d.name,
            shipping_cost: d.shipping_cost,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AdminDistrictDto {
    pub id: Uuid,
    pub name: String,
    #[schema(value_type = String)]
    pub shipping_cost: Decimal,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<District> for AdminDistrictDto {
    fn from(d: District) -> Self {
        Self {
            id: d.id,
            name: d.name,
            shipping_cost: d.shipping_cost,
            is_active: d.is_active,
            created_at: d.created_at,
            updated_at: d.updated_at,
        }
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateDistrictDto {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[serde(default)]
    #[validate(custom(function = validate_non_negative))]
    #[schema(value_type = String, example = "15000.00")]
    pub shipping_cost: Decimal,

    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateDistrictDto {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,

    #[validate(custom(function = validate_non_negative))]
    #[schema(value_type = Option<String>)]
    pub shipping_cost: Option<Decimal>,

    pub is_active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shipping_cost_must_not_be_negative() {
        let dto: CreateDistrictDto = serde_json::from_value(serde_json::json!({
            "name": "Kebayoran Baru",
            "shipping_cost": "-5000"
        }))
        .unwrap();
        assert!(dto.validate().is_err());

        let dto: CreateDistrictDto =
            serde_json::from_value(serde_json::json!({ "name": "Menteng" })).unwrap();
        assert!(dto.validate().is_ok());
        assert_eq!(dto.shipping_cost, Decimal::ZERO);
    }
}
