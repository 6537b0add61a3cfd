use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::categories::models::Category;
use crate::shared::validation::SLUG_REGEX;

/// Public view of a category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponseDto {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub banner_url: Option<String>,
}

impl From<Category> for CategoryResponseDto {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            name: c.name,
            slug: c.slug,
            description: c.description,
            image_url: c.image_url,
            banner_url: c.banner_url,
        }
    }
}

/// Back-office view of a category
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AdminCategoryDto {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub banner_url: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Category> for AdminCategoryDto {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            name: c.name,
            slug: c.slug,
            description: c.description,
            image_url: c.image_url,
            banner_url: c.banner_url,
            is_active: c.is_active,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCategoryDto {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    /// Derived from the name when omitted
    #[validate(length(min = 1, max = 120), regex(path = *SLUG_REGEX, message = "slug must be lowercase letters, digits and single hyphens"))]
    pub slug: Option<String>,

    pub description: Option<String>,

    #[validate(url(message = "image_url must be a valid URL"))]
    pub image_url: Option<String>,

    #[validate(url(message = "banner_url must be a valid URL"))]
    pub banner_url: Option<String>,

    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCategoryDto {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 120), regex(path = *SLUG_REGEX, message = "slug must be lowercase letters, digits and single hyphens"))]
    pub slug: Option<String>,

    pub description: Option<String>,

    #[validate(url(message = "image_url must be a valid URL"))]
    pub image_url: Option<String>,

    #[validate(url(message = "banner_url must be a valid URL"))]
    pub banner_url: Option<String>,

    pub is_active: Option<bool>,

    /// Set the field to null; each flag wins over a value sent alongside it
    #[serde(default)]
    pub clear_description: bool,

    #[serde(default)]
    pub clear_image_url: bool,

    #[serde(default)]
    pub clear_banner_url: bool,
}

fn patch_optional(value: Option<String>, clear: bool, current: Option<String>) -> Option<String> {
    if clear {
        None
    } else {
        value.or(current)
    }
}

impl UpdateCategoryDto {
    /// Merge onto the stored row. Omitted fields keep their value.
    pub fn apply_to(self, current: Category) -> Category {
        Category {
            name: self.name.unwrap_or(current.name),
            slug: self.slug.unwrap_or(current.slug),
            description: patch_optional(
                self.description,
                self.clear_description,
                current.description,
            ),
            image_url: patch_optional(self.image_url, self.clear_image_url, current.image_url),
            banner_url: patch_optional(self.banner_url, self.clear_banner_url, current.banner_url),
            is_active: self.is_active.unwrap_or(current.is_active),
            ..current
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::category_fixture;

    fn create_dto(json: serde_json::Value) -> CreateCategoryDto {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_create_defaults_to_active() {
        let dto = create_dto(serde_json::json!({ "name": "Shoes" }));
        assert!(dto.is_active);
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_create_rejects_bad_slug_and_url() {
        let dto = create_dto(serde_json::json!({ "name": "Shoes", "slug": "Mens Shoes" }));
        assert!(dto.validate().is_err());

        let dto = create_dto(serde_json::json!({ "name": "Shoes", "image_url": "not a url" }));
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_create_rejects_empty_name() {
        let dto = create_dto(serde_json::json!({ "name": "" }));
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
    }

    fn update_dto(json: serde_json::Value) -> UpdateCategoryDto {
        serde_json::from_value(json).unwrap()
    }

    fn decorated_category() -> Category {
        Category {
            image_url: Some("https://cdn.shop.test/shoes.jpg".to_string()),
            banner_url: Some("https://cdn.shop.test/shoes-banner.jpg".to_string()),
            ..category_fixture("Shoes", true)
        }
    }

    #[test]
    fn test_update_keeps_omitted_fields() {
        let current = decorated_category();
        let merged =
            update_dto(serde_json::json!({ "name": "Sneakers" })).apply_to(current.clone());

        assert_eq!(merged.name, "Sneakers");
        assert_eq!(merged.slug, current.slug);
        assert_eq!(merged.description, current.description);
        assert_eq!(merged.image_url, current.image_url);
        assert_eq!(merged.banner_url, current.banner_url);
        assert!(merged.is_active);
    }

    #[test]
    fn test_update_clear_flags_null_fields() {
        let current = decorated_category();
        let merged = update_dto(serde_json::json!({
            "clear_description": true,
            "clear_image_url": true,
            "clear_banner_url": true,
        }))
        .apply_to(current);

        assert!(merged.description.is_none());
        assert!(merged.image_url.is_none());
        assert!(merged.banner_url.is_none());
    }

    #[test]
    fn test_update_clear_wins_over_value() {
        let merged = update_dto(serde_json::json!({
            "image_url": "https://cdn.shop.test/new.jpg",
            "clear_image_url": true,
            "banner_url": "https://cdn.shop.test/new-banner.jpg",
        }))
        .apply_to(decorated_category());

        assert!(merged.image_url.is_none());
        assert_eq!(
            merged.banner_url.as_deref(),
            Some("https://cdn.shop.test/new-banner.jpg")
        );
    }
}
