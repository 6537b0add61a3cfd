use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Customer {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub district_id: Option<Uuid>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Customer row with the name of its district, if any
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct CustomerWithDistrict {
    #[sqlx(flatten)]
    pub customer: Customer,
    pub district_name: Option<String>,
}
