use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{map_db_error, AppError, Result};
use crate::features::categories::dtos::{CreateCategoryDto, UpdateCategoryDto};
use crate::features::categories::models::Category;
use crate::shared::types::ListQuery;
use crate::shared::validation::slugify;

const CATEGORY_COLUMNS: &str =
    "id, name, slug, description, image_url, banner_url, is_active, created_at, updated_at";

const SLUG_CONFLICT: &str = "A category with this slug already exists";

/// Service for category operations
pub struct CategoryService {
    pool: PgPool,
}

impl CategoryService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All active categories ordered by name
    pub async fn list_active(&self) -> Result<Vec<Category>> {
        sqlx::query_as::<_, Category>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories WHERE is_active = TRUE ORDER BY name ASC, id ASC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list active categories: {:?}", e);
            AppError::Database(e)
        })
    }

    /// Active category by slug
    pub async fn get_active_by_slug(&self, slug: &str) -> Result<Category> {
        sqlx::query_as::<_, Category>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories WHERE slug = $1 AND is_active = TRUE"
        ))
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get category by slug: {:?}", e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound(format!("Category '{}' not found", slug)))
    }

    /// Active categories whose name matches an ILIKE pattern
    pub async fn search(&self, pattern: &str, limit: i64) -> Result<Vec<Category>> {
        sqlx::query_as::<_, Category>(&format!(
            r#"
            SELECT {CATEGORY_COLUMNS} FROM categories
            WHERE is_active = TRUE AND name ILIKE $1
            ORDER BY name ASC, id ASC
            LIMIT $2
            "#
        ))
        .bind(pattern)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to search categories: {:?}", e);
            AppError::Database(e)
        })
    }

    /// Paginated back-office listing, searchable by name or slug
    pub async fn list(&self, query: &ListQuery) -> Result<(Vec<Category>, i64)> {
        let pattern = query.search_pattern();

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM categories
            WHERE ($1::text IS NULL OR name ILIKE $1 OR slug ILIKE $1)
              AND ($2::bool IS NULL OR is_active = $2)
            "#,
        )
        .bind(&pattern)
        .bind(query.is_active)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count categories: {:?}", e);
            AppError::Database(e)
        })?;

        let categories = sqlx::query_as::<_, Category>(&format!(
            r#"
            SELECT {CATEGORY_COLUMNS} FROM categories
            WHERE ($1::text IS NULL OR name ILIKE $1 OR slug ILIKE $1)
              AND ($2::bool IS NULL OR is_active = $2)
            ORDER BY name ASC, id ASC
            LIMIT $3 OFFSET $4
            "#
        ))
        .bind(&pattern)
        .bind(query.is_active)
        .bind(query.limit())
        .bind(query.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list categories: {:?}", e);
            AppError::Database(e)
        })?;

        Ok((categories, total))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Category> {
        sqlx::query_as::<_, Category>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)?
        .ok_or_else(|| AppError::NotFound(format!("Category with id {} not found", id)))
    }

    pub async fn create(&self, dto: CreateCategoryDto) -> Result<Category> {
        let slug = match dto.slug {
            Some(slug) => slug,
            None => {
                let derived = slugify(&dto.name);
                if derived.is_empty() {
                    return Err(AppError::Validation(
                        "slug could not be derived from name, please provide one".to_string(),
                    ));
                }
                derived
            }
        };

        let category = sqlx::query_as::<_, Category>(&format!(
            r#"
            INSERT INTO categories (name, slug, description, image_url, banner_url, is_active)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {CATEGORY_COLUMNS}
            "#
        ))
        .bind(&dto.name)
        .bind(&slug)
        .bind(&dto.description)
        .bind(&dto.image_url)
        .bind(&dto.banner_url)
        .bind(dto.is_active)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_db_error(e, SLUG_CONFLICT))?;

        tracing::info!("Category created: id={}, slug={}", category.id, category.slug);
        Ok(category)
    }

    /// Partial update. `clear_*` flags null the matching optional field.
    pub async fn update(&self, id: Uuid, dto: UpdateCategoryDto) -> Result<Category> {
        let merged = dto.apply_to(self.get_by_id(id).await?);

        sqlx::query_as::<_, Category>(&format!(
            r#"
            UPDATE categories
            SET name = $1,
                slug = $2,
                description = $3,
                image_url = $4,
                banner_url = $5,
                is_active = $6,
                updated_at = NOW()
            WHERE id = $7
            RETURNING {CATEGORY_COLUMNS}
            "#
        ))
        .bind(&merged.name)
        .bind(&merged.slug)
        .bind(&merged.description)
        .bind(&merged.image_url)
        .bind(&merged.banner_url)
        .bind(merged.is_active)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_db_error(e, SLUG_CONFLICT))?
        .ok_or_else(|| AppError::NotFound(format!("Category with id {} not found", id)))
    }

    /// Delete a category. Refused while any product still references it.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let product_count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE category_id = $1")
                .bind(id)
                .fetch_one(&self.pool)
                .await
                .map_err(AppError::Database)?;

        if product_count > 0 {
            return Err(AppError::Conflict(format!(
                "Category still has {} product(s); move or delete them first",
                product_count
            )));
        }

        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            // a product inserted between the check and the delete trips the FK
            .map_err(|e| match map_db_error(e, SLUG_CONFLICT) {
                AppError::BadRequest(_) => {
                    AppError::Conflict("Category still has products".to_string())
                }
                other => other,
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Category with id {} not found",
                id
            )));
        }

        tracing::info!("Category deleted: id={}", id);
        Ok(())
    }
}
