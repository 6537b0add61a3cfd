use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Hero carousel slide
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Slider {
    pub id: Uuid,
    pub title: String,
    pub subtitle: Option<String>,
    pub image_url: String,
    pub link_url: Option<String>,
    pub button_text: Option<String>,
    /// Ascending; ties broken by creation time
    pub display_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
