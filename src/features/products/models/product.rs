use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for a product
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub sale_price: Option<Decimal>,
    /// Ordered; the first entry is the primary image
    pub images: Vec<String>,
    pub stock: i32,
    pub sku: String,
    pub category_id: Uuid,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Product joined with the id/name/slug of its category
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct ProductWithCategory {
    #[sqlx(flatten)]
    pub product: Product,
    pub category_name: String,
    pub category_slug: String,
}

impl Product {
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Sale price when it undercuts the list price, otherwise the list price
    pub fn effective_price(&self) -> Decimal {
        match self.sale_price {
            Some(sale) if sale < self.price => sale,
            _ => self.price,
        }
    }

    /// Whole-percent discount, rounded down
    pub fn discount_percent(&self) -> u8 {
        if self.price.is_zero() {
            return 0;
        }

        let discount = (self.price - self.effective_price()) * Decimal::ONE_HUNDRED / self.price;
        discount.floor().to_u8().unwrap_or(0)
    }

    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(price: i64, sale_price: Option<i64>, images: &[&str]) -> Product {
        Product {
            id: Uuid::new_v4(),
            name: "Canvas Sneaker".to_string(),
            description: None,
            price: Decimal::new(price, 2),
            sale_price: sale_price.map(|s| Decimal::new(s, 2)),
            images: images.iter().map(|s| s.to_string()).collect(),
            stock: 0,
            sku: "SNK-001".to_string(),
            category_id: Uuid::new_v4(),
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_primary_image_is_first() {
        let p = product(1000, None, &["https://cdn.test/a.jpg", "https://cdn.test/b.jpg"]);
        assert_eq!(p.primary_image(), Some("https://cdn.test/a.jpg"));
        assert_eq!(product(1000, None, &[]).primary_image(), None);
    }

    #[test]
    fn test_effective_price_and_discount() {
        let p = product(10000, Some(7499), &[]);
        assert_eq!(p.effective_price(), Decimal::new(7499, 2));
        assert_eq!(p.discount_percent(), 25);

        // sale price not lower than list price is ignored
        let p = product(10000, Some(12000), &[]);
        assert_eq!(p.effective_price(), Decimal::new(10000, 2));
        assert_eq!(p.discount_percent(), 0);
    }

    #[test]
    fn test_free_product_has_no_discount() {
        let p = product(0, Some(0), &[]);
        assert_eq!(p.discount_percent(), 0);
        assert!(!p.in_stock());
    }
}
