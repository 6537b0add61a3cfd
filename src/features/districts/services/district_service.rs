use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{map_db_error, AppError, Result};
use crate::features::districts::dtos::{CreateDistrictDto, UpdateDistrictDto};
use crate::features::districts::models::District;
use crate::shared::types::ListQuery;

const DISTRICT_COLUMNS: &str = "id, name, shipping_cost, is_active, created_at, updated_at";

const NAME_CONFLICT: &str = "A district with this name already exists";

pub struct DistrictService {
    pool: PgPool,
}

impl DistrictService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_active(&self) -> Result<Vec<District>> {
        sqlx::query_as::<_, District>(&format!(
            "SELECT {DISTRICT_COLUMNS} FROM districts WHERE is_active = TRUE ORDER BY name ASC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list districts: {:?}", e);
            AppError::Database(e)
        })
    }

    pub async fn list(&self, query: &ListQuery) -> Result<(Vec<District>, i64)> {
        let pattern = query.search_pattern();

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM districts
            WHERE ($1::text IS NULL OR name ILIKE $1)
              AND ($2::bool IS NULL OR is_active = $2)
            "#,
        )
        .bind(&pattern)
        .bind(query.is_active)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)?;

        let districts = sqlx::query_as::<_, District>(&format!(
            r#"
            SELECT {DISTRICT_COLUMNS} FROM districts
            WHERE ($1::text IS NULL OR name ILIKE $1)
              AND ($2::bool IS NULL OR is_active = $2)
            ORDER BY name ASC
            LIMIT $3 OFFSET $4
            "#
        ))
        .bind(&pattern)
        .bind(query.is_active)
        .bind(query.limit())
        .bind(query.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok((districts, total))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<District> {
        sqlx::query_as::<_, District>(&format!(
            "SELECT {DISTRICT_COLUMNS} FROM districts WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)?
        .ok_or_else(|| AppError::NotFound(format!("District with id {} not found", id)))
    }

    pub async fn create(&self, dto: CreateDistrictDto) -> Result<District> {
        let district = sqlx::query_as::<_, District>(&format!(
            r#"
            INSERT INTO districts (name, shipping_cost, is_active)
            VALUES ($1, $2, $3)
            RETURNING {DISTRICT_COLUMNS}
            "#
        ))
        .bind(dto.name.trim())
        .bind(dto.shipping_cost)
        .bind(dto.is_active)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_db_error(e, NAME_CONFLICT))?;

        tracing::info!("District created: id={}, name={}", district.id, district.name);
        Ok(district)
    }

    pub async fn update(&self, id: Uuid, dto: UpdateDistrictDto) -> Result<District> {
        sqlx::query_as::<_, District>(&format!(
            r#"
            UPDATE districts
            SET name = COALESCE($1, name),
                shipping_cost = COALESCE($2, shipping_cost),
                is_active = COALESCE($3, is_active),
                updated_at = NOW()
            WHERE id = $4
            RETURNING {DISTRICT_COLUMNS}
            "#
        ))
        .bind(dto.name.as_deref().map(str::trim))
        .bind(dto.shipping_cost)
        .bind(dto.is_active)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_db_error(e, NAME_CONFLICT))?
        .ok_or_else(|| AppError::NotFound(format!("District with id {} not found", id)))
    }

    /// Refused (409) while customers are assigned to the district
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let customer_count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM customers WHERE district_id = $1")
                .bind(id)
                .fetch_one(&self.pool)
                .await
                .map_err(AppError::Database)?;

        if customer_count > 0 {
            return Err(AppError::Conflict(format!(
                "District is assigned to {} customer(s)",
                customer_count
            )));
        }

        let result = sqlx::query("DELETE FROM districts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| match map_db_error(e, NAME_CONFLICT) {
                AppError::BadRequest(_) => {
                    AppError::Conflict("District is assigned to customers".to_string())
                }
                other => other,
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("District with id {} not found", id)));
        }

        tracing::info!("District deleted: id={}", id);
        Ok(())
    }
}
