use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

/// Shipping destination with a flat shipping cost
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct District {
    pub id: Uuid,
    pub name: String,
    pub shipping_cost: Decimal,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
