use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::customers::models::CustomerWithDistrict;
use crate::shared::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::shared::types::like_pattern;
use crate::shared::validation::PHONE_REGEX;

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct CustomerQuery {
    #[serde(default = "default_page")]
    #[param(minimum = 1)]
    pub page: i64,
    #[serde(default = "default_page_size")]
    #[param(minimum = 1, maximum = 100)]
    pub page_size: i64,
    /// Search in name, email or phone
    pub search: Option<String>,
    pub is_active: Option<bool>,
    pub district_id: Option<Uuid>,
}

impl CustomerQuery {
    pub fn offset(&self) -> i64 {
        (self.page.max(1) - 1) * self.limit()
    }

    pub fn limit(&self) -> i64 {
        self.page_size.clamp(1, MAX_PAGE_SIZE)
    }

    pub fn search_pattern(&self) -> Option<String> {
        like_pattern(self.search.as_deref())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CustomerResponseDto {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub district_id: Option<Uuid>,
    pub district_name: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CustomerWithDistrict> for CustomerResponseDto {
    fn from(row: CustomerWithDistrict) -> Self {
        let c = row.customer;
        Self {
            id: c.id,
            name: c.name,
            email: c.email,
            phone: c.phone,
            address: c.address,
            district_id: c.district_id,
            district_name: row.district_name,
            is_active: c.is_active,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCustomerDto {
    #[validate(length(min = 1, max = 150))]
    pub name: String,

    #[validate(email(message = "email must be a valid email address"))]
    pub email: Option<String>,

    #[validate(regex(path = *PHONE_REGEX, message = "phone must be 8-15 digits, optionally prefixed with +"))]
    pub phone: Option<String>,

    #[validate(length(max = 500))]
    pub address: Option<String>,

    pub district_id: Option<Uuid>,

    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCustomerDto {
    #[validate(length(min = 1, max = 150))]
    pub name: Option<String>,

    #[validate(email(message = "email must be a valid email address"))]
    pub email: Option<String>,

    #[validate(regex(path = *PHONE_REGEX, message = "phone must be 8-15 digits, optionally prefixed with +"))]
    pub phone: Option<String>,

    #[validate(length(max = 500))]
    pub address: Option<String>,

    pub district_id: Option<Uuid>,

    pub is_active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::faker::internet::en::SafeEmail;
    use fake::faker::name::en::Name;
    use fake::Fake;

    #[test]
    fn test_generated_customer_is_valid() {
        let dto = CreateCustomerDto {
            name: Name().fake(),
            email: Some(SafeEmail().fake()),
            phone: Some("+6281234567890".to_string()),
            address: None,
            district_id: None,
            is_active: true,
        };
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_bad_email_and_phone_rejected() {
        let dto: CreateCustomerDto = serde_json::from_value(serde_json::json!({
            "name": "Sari",
            "email": "sari-at-example",
            "phone": "0812-3456"
        }))
        .unwrap();

        let errors = dto.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("phone"));
    }
}
