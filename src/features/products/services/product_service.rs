use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{map_db_error, AppError, Result};
use crate::features::products::dtos::{
    AdminProductQuery, CreateProductDto, ProductListQuery, UpdateProductDto,
};
use crate::features::products::models::{Product, ProductWithCategory};
use crate::shared::types::like_pattern;

const PRODUCT_COLUMNS: &str = "p.id, p.name, p.description, p.price, p.sale_price, p.images, \
     p.stock, p.sku, p.category_id, p.is_active, p.created_at, p.updated_at";

const JOINED_SELECT: &str = "c.name AS category_name, c.slug AS category_slug \
     FROM products p JOIN categories c ON c.id = p.category_id";

const SKU_CONFLICT: &str = "A product with this SKU already exists";

/// Reject a sale price above the list price
fn check_sale_price(price: Decimal, sale_price: Option<Decimal>) -> Result<()> {
    match sale_price {
        Some(sale) if sale > price => Err(AppError::Validation(
            "sale_price must not exceed price".to_string(),
        )),
        _ => Ok(()),
    }
}

/// Service for product operations
pub struct ProductService {
    pool: PgPool,
}

impl ProductService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Active products under an active category, newest first
    pub async fn list_active_with_category(&self) -> Result<Vec<ProductWithCategory>> {
        sqlx::query_as::<_, ProductWithCategory>(&format!(
            r#"
            SELECT {PRODUCT_COLUMNS}, {JOINED_SELECT}
            WHERE p.is_active = TRUE AND c.is_active = TRUE
            ORDER BY p.created_at DESC, p.id ASC
            "#
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list active products: {:?}", e);
            AppError::Database(e)
        })
    }

    /// Paginated storefront listing, optionally narrowed to one category slug
    pub async fn list_public(
        &self,
        query: &ProductListQuery,
    ) -> Result<(Vec<ProductWithCategory>, i64)> {
        let category = query
            .category
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM products p JOIN categories c ON c.id = p.category_id
            WHERE p.is_active = TRUE AND c.is_active = TRUE
              AND ($1::text IS NULL OR c.slug = $1)
            "#,
        )
        .bind(category)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count products: {:?}", e);
            AppError::Database(e)
        })?;

        let products = sqlx::query_as::<_, ProductWithCategory>(&format!(
            r#"
            SELECT {PRODUCT_COLUMNS}, {JOINED_SELECT}
            WHERE p.is_active = TRUE AND c.is_active = TRUE
              AND ($1::text IS NULL OR c.slug = $1)
            ORDER BY p.created_at DESC, p.id ASC
            LIMIT $2 OFFSET $3
            "#
        ))
        .bind(category)
        .bind(query.limit())
        .bind(query.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list products: {:?}", e);
            AppError::Database(e)
        })?;

        Ok((products, total))
    }

    /// Single product as the storefront sees it (product and category both active)
    pub async fn get_public(&self, id: Uuid) -> Result<ProductWithCategory> {
        sqlx::query_as::<_, ProductWithCategory>(&format!(
            r#"
            SELECT {PRODUCT_COLUMNS}, {JOINED_SELECT}
            WHERE p.id = $1 AND p.is_active = TRUE AND c.is_active = TRUE
            "#
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)?
        .ok_or_else(|| AppError::NotFound(format!("Product with id {} not found", id)))
    }

    /// Name/sku match among visible products. `pattern` is an ILIKE pattern.
    pub async fn search(&self, pattern: &str, limit: i64) -> Result<Vec<ProductWithCategory>> {
        sqlx::query_as::<_, ProductWithCategory>(&format!(
            r#"
            SELECT {PRODUCT_COLUMNS}, {JOINED_SELECT}
            WHERE p.is_active = TRUE AND c.is_active = TRUE
              AND (p.name ILIKE $1 OR p.sku ILIKE $1)
            ORDER BY p.created_at DESC, p.id ASC
            LIMIT $2
            "#
        ))
        .bind(pattern)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to search products: {:?}", e);
            AppError::Database(e)
        })
    }

    /// Back-office listing with search, active and category filters
    pub async fn list(
        &self,
        query: &AdminProductQuery,
    ) -> Result<(Vec<ProductWithCategory>, i64)> {
        let pattern = like_pattern(query.search.as_deref());

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM products p
            WHERE ($1::text IS NULL OR p.name ILIKE $1 OR p.sku ILIKE $1)
              AND ($2::bool IS NULL OR p.is_active = $2)
              AND ($3::uuid IS NULL OR p.category_id = $3)
            "#,
        )
        .bind(&pattern)
        .bind(query.is_active)
        .bind(query.category_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count products: {:?}", e);
            AppError::Database(e)
        })?;

        let products = sqlx::query_as::<_, ProductWithCategory>(&format!(
            r#"
            SELECT {PRODUCT_COLUMNS}, {JOINED_SELECT}
            WHERE ($1::text IS NULL OR p.name ILIKE $1 OR p.sku ILIKE $1)
              AND ($2::bool IS NULL OR p.is_active = $2)
              AND ($3::uuid IS NULL OR p.category_id = $3)
            ORDER BY p.created_at DESC, p.id ASC
            LIMIT $4 OFFSET $5
            "#
        ))
        .bind(&pattern)
        .bind(query.is_active)
        .bind(query.category_id)
        .bind(query.limit())
        .bind(query.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list products: {:?}", e);
            AppError::Database(e)
        })?;

        Ok((products, total))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<ProductWithCategory> {
        sqlx::query_as::<_, ProductWithCategory>(&format!(
            "SELECT {PRODUCT_COLUMNS}, {JOINED_SELECT} WHERE p.id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)?
        .ok_or_else(|| AppError::NotFound(format!("Product with id {} not found", id)))
    }

    async fn ensure_category(&self, category_id: Uuid) -> Result<()> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM categories WHERE id = $1)")
                .bind(category_id)
                .fetch_one(&self.pool)
                .await
                .map_err(AppError::Database)?;

        if !exists {
            return Err(AppError::BadRequest(format!(
                "Category with id {} does not exist",
                category_id
            )));
        }
        Ok(())
    }

    pub async fn create(&self, dto: CreateProductDto) -> Result<ProductWithCategory> {
        check_sale_price(dto.price, dto.sale_price)?;
        self.ensure_category(dto.category_id).await?;

        let product = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products
                (name, description, price, sale_price, images, stock, sku, category_id, is_active)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, name, description, price, sale_price, images, stock, sku,
                      category_id, is_active, created_at, updated_at
            "#,
        )
        .bind(&dto.name)
        .bind(&dto.description)
        .bind(dto.price)
        .bind(dto.sale_price)
        .bind(&dto.images)
        .bind(dto.stock)
        .bind(&dto.sku)
        .bind(dto.category_id)
        .bind(dto.is_active)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_db_error(e, SKU_CONFLICT))?;

        tracing::info!("Product created: id={}, sku={}", product.id, product.sku);
        self.get_by_id(product.id).await
    }

    pub async fn update(&self, id: Uuid, dto: UpdateProductDto) -> Result<ProductWithCategory> {
        let current = self.get_by_id(id).await?.product;

        let price = dto.price.unwrap_or(current.price);
        let sale_price = if dto.clear_sale_price {
            None
        } else {
            dto.sale_price.or(current.sale_price)
        };
        check_sale_price(price, sale_price)?;

        if let Some(category_id) = dto.category_id {
            if category_id != current.category_id {
                self.ensure_category(category_id).await?;
            }
        }

        sqlx::query(
            r#"
            UPDATE products
            SET name = COALESCE($1, name),
                description = COALESCE($2, description),
                price = COALESCE($3, price),
                sale_price = CASE WHEN $4 THEN NULL ELSE COALESCE($5, sale_price) END,
                images = COALESCE($6, images),
                stock = COALESCE($7, stock),
                sku = COALESCE($8, sku),
                category_id = COALESCE($9, category_id),
                is_active = COALESCE($10, is_active),
                updated_at = NOW()
            WHERE id = $11
            "#,
        )
        .bind(&dto.name)
        .bind(&dto.description)
        .bind(dto.price)
        .bind(dto.clear_sale_price)
        .bind(dto.sale_price)
        .bind(&dto.images)
        .bind(dto.stock)
        .bind(&dto.sku)
        .bind(dto.category_id)
        .bind(dto.is_active)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| map_db_error(e, SKU_CONFLICT))?;

        self.get_by_id(id).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Product with id {} not found", id)));
        }

        tracing::info!("Product deleted: id={}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_sale_price() {
        let price = Decimal::new(10000, 2);
        assert!(check_sale_price(price, None).is_ok());
        assert!(check_sale_price(price, Some(Decimal::new(7500, 2))).is_ok());
        assert!(check_sale_price(price, Some(price)).is_ok());
        assert!(matches!(
            check_sale_price(price, Some(Decimal::new(10001, 2))),
            Err(AppError::Validation(_))
        ));
    }
}
