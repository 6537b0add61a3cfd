use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{map_db_error, AppError, Result};
use crate::features::users::dtos::{CreateAdminUserDto, UpdateAdminUserDto};
use crate::features::users::models::AdminUser;
use crate::shared::types::ListQuery;

const USER_COLUMNS: &str =
    "id, auth_sub, name, email, role, is_active, created_at, updated_at";

const USER_CONFLICT: &str = "A user with this email or auth subject already exists";

pub struct AdminUserService {
    pool: PgPool,
}

impl AdminUserService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, query: &ListQuery) -> Result<(Vec<AdminUser>, i64)> {
        let pattern = query.search_pattern();

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM admin_users
            WHERE ($1::text IS NULL OR name ILIKE $1 OR email ILIKE $1)
              AND ($2::bool IS NULL OR is_active = $2)
            "#,
        )
        .bind(&pattern)
        .bind(query.is_active)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)?;

        let users = sqlx::query_as::<_, AdminUser>(&format!(
            r#"
            SELECT {USER_COLUMNS} FROM admin_users
            WHERE ($1::text IS NULL OR name ILIKE $1 OR email ILIKE $1)
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
        .map_err(|e| {
            tracing::error!("Failed to list admin users: {:?}", e);
            AppError::Database(e)
        })?;

        Ok((users, total))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<AdminUser> {
        sqlx::query_as::<_, AdminUser>(&format!(
            "SELECT {USER_COLUMNS} FROM admin_users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)?
        .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", id)))
    }

    pub async fn create(&self, dto: CreateAdminUserDto) -> Result<AdminUser> {
        let user = sqlx::query_as::<_, AdminUser>(&format!(
            r#"
            INSERT INTO admin_users (auth_sub, name, email, role, is_active)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(dto.auth_sub.trim())
        .bind(dto.name.trim())
        .bind(dto.email.trim().to_lowercase())
        .bind(dto.role.as_str())
        .bind(dto.is_active)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_db_error(e, USER_CONFLICT))?;

        tracing::info!("Admin user created: id={}, role={}", user.id, user.role);
        Ok(user)
    }

    pub async fn update(&self, id: Uuid, dto: UpdateAdminUserDto) -> Result<AdminUser> {
        sqlx::query_as::<_, AdminUser>(&format!(
            r#"
            UPDATE admin_users
            SET name = COALESCE($1, name),
                email = COALESCE($2, email),
                role = COALESCE($3, role),
                is_active = COALESCE($4, is_active),
                updated_at = NOW()
            WHERE id = $5
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(dto.name.as_deref().map(str::trim))
        .bind(dto.email.as_deref().map(|e| e.trim().to_lowercase()))
        .bind(dto.role.map(|r| r.as_str()))
        .bind(dto.is_active)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_db_error(e, USER_CONFLICT))?
        .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", id)))
    }

    /// Delete an account. `caller_sub` may not delete their own account.
    pub async fn delete(&self, id: Uuid, caller_sub: &str) -> Result<()> {
        let user = self.get_by_id(id).await?;
        if user.auth_sub == caller_sub {
            return Err(AppError::BadRequest(
                "You cannot delete your own account".to_string(),
            ));
        }

        sqlx::query("DELETE FROM admin_users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        tracing::info!("Admin user deleted: id={}", id);
        Ok(())
    }
}
