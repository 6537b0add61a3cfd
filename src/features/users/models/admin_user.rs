use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::shared::constants::{ROLE_ADMIN, ROLE_STAFF};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Staff,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => ROLE_ADMIN,
            UserRole::Staff => ROLE_STAFF,
        }
    }
}

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct AdminUser {
    pub id: Uuid,
    /// Identity provider subject
    pub auth_sub: String,
    pub name: String,
    pub email: String,
    /// "admin" or "staff", enforced by a CHECK constraint
    pub role: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
