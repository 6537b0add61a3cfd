use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::users::models::{AdminUser, UserRole};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AdminUserResponseDto {
    pub id: Uuid,
    pub auth_sub: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<AdminUser> for AdminUserResponseDto {
    fn from(u: AdminUser) -> Self {
        Self {
            id: u.id,
            auth_sub: u.auth_sub,
            name: u.name,
            email: u.email,
            role: u.role,
            is_active: u.is_active,
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}

fn default_role() -> UserRole {
    UserRole::Staff
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAdminUserDto {
    #[validate(length(min = 1, max = 255))]
    pub auth_sub: String,

    #[validate(length(min = 1, max = 150))]
    pub name: String,

    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,

    #[serde(default = "default_role")]
    pub role: UserRole,

    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateAdminUserDto {
    #[validate(length(min = 1, max = 150))]
    pub name: Option<String>,

    #[validate(email(message = "email must be a valid email address"))]
    pub email: Option<String>,

    pub role: Option<UserRole>,

    pub is_active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_defaults_to_staff() {
        let dto: CreateAdminUserDto = serde_json::from_value(serde_json::json!({
            "auth_sub": "auth0|abc",
            "name": "Dewi",
            "email": "dewi@shop.test"
        }))
        .unwrap();
        assert_eq!(dto.role, UserRole::Staff);
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_unknown_role_rejected() {
        let result = serde_json::from_value::<CreateAdminUserDto>(serde_json::json!({
            "auth_sub": "auth0|abc",
            "name": "Dewi",
            "email": "dewi@shop.test",
            "role": "owner"
        }));
        assert!(result.is_err());
    }
}
