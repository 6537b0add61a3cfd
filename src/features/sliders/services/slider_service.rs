use std::time::Duration;

use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::sliders::dtos::{CreateSliderDto, UpdateSliderDto};
use crate::features::sliders::models::Slider;
use crate::shared::types::ListQuery;

const SLIDER_COLUMNS: &str = "id, title, subtitle, image_url, link_url, button_text, \
     display_order, is_active, created_at, updated_at";

pub struct SliderService {
    pool: PgPool,
    autoplay_interval: Duration,
}

impl SliderService {
    pub fn new(pool: PgPool, autoplay_interval: Duration) -> Self {
        Self {
            pool,
            autoplay_interval,
        }
    }

    /// Carousel auto-advance period advertised to clients
    pub fn autoplay_interval(&self) -> Duration {
        self.autoplay_interval
    }

    /// Active slides in display order
    pub async fn list_active(&self) -> Result<Vec<Slider>> {
        sqlx::query_as::<_, Slider>(&format!(
            r#"
            SELECT {SLIDER_COLUMNS} FROM sliders
            WHERE is_active = TRUE
            ORDER BY display_order ASC, created_at ASC
            "#
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list sliders: {:?}", e);
            AppError::Database(e)
        })
    }

    pub async fn list(&self, query: &ListQuery) -> Result<(Vec<Slider>, i64)> {
        let pattern = query.search_pattern();

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM sliders
            WHERE ($1::text IS NULL OR title ILIKE $1)
              AND ($2::bool IS NULL OR is_active = $2)
            "#,
        )
        .bind(&pattern)
        .bind(query.is_active)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)?;

        let sliders = sqlx::query_as::<_, Slider>(&format!(
            r#"
            SELECT {SLIDER_COLUMNS} FROM sliders
            WHERE ($1::text IS NULL OR title ILIKE $1)
              AND ($2::bool IS NULL OR is_active = $2)
            ORDER BY display_order ASC, created_at ASC
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

        Ok((sliders, total))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Slider> {
        sqlx::query_as::<_, Slider>(&format!(
            "SELECT {SLIDER_COLUMNS} FROM sliders WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)?
        .ok_or_else(|| AppError::NotFound(format!("Slider with id {} not found", id)))
    }

    pub async fn create(&self, dto: CreateSliderDto) -> Result<Slider> {
        let slider = sqlx::query_as::<_, Slider>(&format!(
            r#"
            INSERT INTO sliders
                (title, subtitle, image_url, link_url, button_text, display_order, is_active)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {SLIDER_COLUMNS}
            "#
        ))
        .bind(&dto.title)
        .bind(&dto.subtitle)
        .bind(&dto.image_url)
        .bind(&dto.link_url)
        .bind(&dto.button_text)
        .bind(dto.display_order)
        .bind(dto.is_active)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create slider: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!("Slider created: id={}", slider.id);
        Ok(slider)
    }

    pub async fn update(&self, id: Uuid, dto: UpdateSliderDto) -> Result<Slider> {
        sqlx::query_as::<_, Slider>(&format!(
            r#"
            UPDATE sliders
            SET title = COALESCE($1, title),
                subtitle = COALESCE($2, subtitle),
                image_url = COALESCE($3, image_url),
                link_url = COALESCE($4, link_url),
                button_text = COALESCE($5, button_text),
                display_order = COALESCE($6, display_order),
                is_active = COALESCE($7, is_active),
                updated_at = NOW()
            WHERE id = $8
            RETURNING {SLIDER_COLUMNS}
            "#
        ))
        .bind(&dto.title)
        .bind(&dto.subtitle)
        .bind(&dto.image_url)
        .bind(&dto.link_url)
        .bind(&dto.button_text)
        .bind(dto.display_order)
        .bind(dto.is_active)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)?
        .ok_or_else(|| AppError::NotFound(format!("Slider with id {} not found", id)))
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM sliders WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Slider with id {} not found", id)));
        }

        tracing::info!("Slider deleted: id={}", id);
        Ok(())
    }
}
