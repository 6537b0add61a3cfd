use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidateUrl, ValidationError};

use crate::features::products::models::ProductWithCategory;
use crate::shared::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, MAX_PRODUCT_IMAGES};
use crate::shared::validation::validate_non_negative;

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

fn default_true() -> bool {
    true
}

fn validate_image_urls(images: &[String]) -> Result<(), ValidationError> {
    if images.iter().all(|url| url.validate_url()) {
        return Ok(());
    }
    let mut err = ValidationError::new("image_url");
    err.message = Some("every image must be a valid URL".into());
    Err(err)
}

/// Query params for the public product listing
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct ProductListQuery {
    /// Page number (1-indexed)
    #[serde(default = "default_page")]
    #[param(minimum = 1)]
    pub page: i64,
    /// Items per page
    #[serde(default = "default_page_size")]
    #[param(minimum = 1, maximum = 100)]
    pub page_size: i64,
    /// Only products of the category with this slug
    pub category: Option<String>,
}

impl ProductListQuery {
    pub fn offset(&self) -> i64 {
        (self.page.max(1) - 1) * self.limit()
    }
    pub fn limit(&self) -> i64 {
        self.page_size.clamp(1, MAX_PAGE_SIZE)
    }
}

/// Query params for the back-office product listing
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct AdminProductQuery {
    /// Page number (1-indexed)
    #[serde(default = "default_page")]
    #[param(minimum = 1)]
    pub page: i64,
    /// Items per page
    #[serde(default = "default_page_size")]
    #[param(minimum = 1, maximum = 100)]
    pub page_size: i64,
    /// Search in name or sku
    pub search: Option<String>,
    /// Filter by active flag
    pub is_active: Option<bool>,
    /// Filter by category
    pub category_id: Option<Uuid>,
}

impl AdminProductQuery {
    pub fn offset(&self) -> i64 {
        (self.page.max(1) - 1) * self.limit()
    }
    pub fn limit(&self) -> i64 {
        self.page_size.clamp(1, MAX_PAGE_SIZE)
    }
}

/// Category summary embedded in product responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductCategoryDto {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductResponseDto {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    #[schema(value_type = String, example = "199000.00")]
    pub price: Decimal,
    #[schema(value_type = Option<String>)]
    pub sale_price: Option<Decimal>,
    /// Price the customer pays
    #[schema(value_type = String)]
    pub effective_price: Decimal,
    pub discount_percent: u8,
    pub images: Vec<String>,
    pub primary_image: Option<String>,
    pub stock: i32,
    pub in_stock: bool,
    pub sku: String,
    pub is_active: bool,
    pub category: ProductCategoryDto,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ProductWithCategory> for ProductResponseDto {
    fn from(row: ProductWithCategory) -> Self {
        let p = row.product;
        Self {
            effective_price: p.effective_price(),
            discount_percent: p.discount_percent(),
            primary_image: p.primary_image().map(str::to_string),
            in_stock: p.in_stock(),
            id: p.id,
            name: p.name,
            description: p.description,
            price: p.price,
            sale_price: p.sale_price,
            images: p.images,
            stock: p.stock,
            sku: p.sku,
            is_active: p.is_active,
            category: ProductCategoryDto {
                id: p.category_id,
                name: row.category_name,
                slug: row.category_slug,
            },
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateProductDto {
    #[validate(length(min = 1, max = 200))]
    pub name: String,

    pub description: Option<String>,

    #[validate(custom(function = validate_non_negative))]
    #[schema(value_type = String, example = "199000.00")]
    pub price: Decimal,

    #[validate(custom(function = validate_non_negative))]
    #[schema(value_type = Option<String>)]
    pub sale_price: Option<Decimal>,

    #[serde(default)]
    #[validate(length(max = MAX_PRODUCT_IMAGES), custom(function = validate_image_urls))]
    pub images: Vec<String>,

    #[serde(default)]
    #[validate(range(min = 0))]
    pub stock: i32,

    #[validate(length(min = 1, max = 64))]
    pub sku: String,

    pub category_id: Uuid,

    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateProductDto {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,

    pub description: Option<String>,

    #[validate(custom(function = validate_non_negative))]
    #[schema(value_type = Option<String>)]
    pub price: Option<Decimal>,

    #[validate(custom(function = validate_non_negative))]
    #[schema(value_type = Option<String>)]
    pub sale_price: Option<Decimal>,

    /// Remove the sale price (takes precedence over `sale_price`)
    #[serde(default)]
    pub clear_sale_price: bool,

    /// Replaces the whole image list when present
    #[validate(length(max = MAX_PRODUCT_IMAGES), custom(function = validate_image_urls))]
    pub images: Option<Vec<String>>,

    #[validate(range(min = 0))]
    pub stock: Option<i32>,

    #[validate(length(min = 1, max = 64))]
    pub sku: Option<String>,

    pub category_id: Option<Uuid>,

    pub is_active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_dto(json: serde_json::Value) -> CreateProductDto {
        serde_json::from_value(json).unwrap()
    }

    fn valid_json() -> serde_json::Value {
        serde_json::json!({
            "name": "Linen Shirt",
            "price": "249000.00",
            "sku": "LIN-001",
            "category_id": Uuid::new_v4(),
            "images": ["https://cdn.shop.test/linen-1.jpg"]
        })
    }

    #[test]
    fn test_valid_product_passes() {
        let dto = create_dto(valid_json());
        assert!(dto.validate().is_ok());
        assert!(dto.is_active);
        assert_eq!(dto.stock, 0);
    }

    #[test]
    fn test_negative_values_rejected() {
        let mut json = valid_json();
        json["price"] = serde_json::json!("-1.00");
        let errors = create_dto(json).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("price"));

        let mut json = valid_json();
        json["stock"] = serde_json::json!(-3);
        let errors = create_dto(json).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("stock"));
    }

    #[test]
    fn test_image_rules() {
        let mut json = valid_json();
        json["images"] = serde_json::json!(["not-a-url"]);
        assert!(create_dto(json).validate().is_err());

        let mut json = valid_json();
        let too_many: Vec<String> = (0..11)
            .map(|i| format!("https://cdn.shop.test/{}.jpg", i))
            .collect();
        json["images"] = serde_json::json!(too_many);
        assert!(create_dto(json).validate().is_err());
    }
}
