use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{map_db_error, AppError, Result};
use crate::features::customers::dtos::{CreateCustomerDto, CustomerQuery, UpdateCustomerDto};
use crate::features::customers::models::CustomerWithDistrict;

const CUSTOMER_SELECT: &str = r#"
    SELECT c.id, c.name, c.email, c.phone, c.address, c.district_id, c.is_active,
           c.created_at, c.updated_at, d.name AS district_name
    FROM customers c
    LEFT JOIN districts d ON d.id = c.district_id
"#;

const EMAIL_CONFLICT: &str = "A customer with this email already exists";

fn normalize_email(email: Option<&str>) -> Option<String> {
    email.map(|e| e.trim().to_lowercase())
}

pub struct CustomerService {
    pool: PgPool,
}

impl CustomerService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, query: &CustomerQuery) -> Result<(Vec<CustomerWithDistrict>, i64)> {
        let pattern = query.search_pattern();

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM customers c
            WHERE ($1::text IS NULL OR c.name ILIKE $1 OR c.email ILIKE $1 OR c.phone ILIKE $1)
              AND ($2::bool IS NULL OR c.is_active = $2)
              AND ($3::uuid IS NULL OR c.district_id = $3)
            "#,
        )
        .bind(&pattern)
        .bind(query.is_active)
        .bind(query.district_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count customers: {:?}", e);
            AppError::Database(e)
        })?;

        let customers = sqlx::query_as::<_, CustomerWithDistrict>(&format!(
            r#"
            {CUSTOMER_SELECT}
            WHERE ($1::text IS NULL OR c.name ILIKE $1 OR c.email ILIKE $1 OR c.phone ILIKE $1)
              AND ($2::bool IS NULL OR c.is_active = $2)
              AND ($3::uuid IS NULL OR c.district_id = $3)
            ORDER BY c.created_at DESC
            LIMIT $4 OFFSET $5
            "#
        ))
        .bind(&pattern)
        .bind(query.is_active)
        .bind(query.district_id)
        .bind(query.limit())
        .bind(query.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list customers: {:?}", e);
            AppError::Database(e)
        })?;

        Ok((customers, total))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<CustomerWithDistrict> {
        sqlx::query_as::<_, CustomerWithDistrict>(&format!("{CUSTOMER_SELECT} WHERE c.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?
            .ok_or_else(|| AppError::NotFound(format!("Customer with id {} not found", id)))
    }

    async fn ensure_district(&self, district_id: Option<Uuid>) -> Result<()> {
        let Some(district_id) = district_id else {
            return Ok(());
        };

        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM districts WHERE id = $1)")
                .bind(district_id)
                .fetch_one(&self.pool)
                .await
                .map_err(AppError::Database)?;

        if !exists {
            return Err(AppError::BadRequest(format!(
                "District with id {} does not exist",
                district_id
            )));
        }
        Ok(())
    }

    pub async fn create(&self, dto: CreateCustomerDto) -> Result<CustomerWithDistrict> {
        self.ensure_district(dto.district_id).await?;

        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO customers (name, email, phone, address, district_id, is_active)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(dto.name.trim())
        .bind(normalize_email(dto.email.as_deref()))
        .bind(&dto.phone)
        .bind(&dto.address)
        .bind(dto.district_id)
        .bind(dto.is_active)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_db_error(e, EMAIL_CONFLICT))?;

        tracing::info!("Customer created: id={}", id);
        self.get_by_id(id).await
    }

    pub async fn update(&self, id: Uuid, dto: UpdateCustomerDto) -> Result<CustomerWithDistrict> {
        self.ensure_district(dto.district_id).await?;

        let updated = sqlx::query(
            r#"
            UPDATE customers
            SET name = COALESCE($1, name),
                email = COALESCE($2, email),
                phone = COALESCE($3, phone),
                address = COALESCE($4, address),
                district_id = COALESCE($5, district_id),
                is_active = COALESCE($6, is_active),
                updated_at = NOW()
            WHERE id = $7
            "#,
        )
        .bind(dto.name.as_deref().map(str::trim))
        .bind(normalize_email(dto.email.as_deref()))
        .bind(&dto.phone)
        .bind(&dto.address)
        .bind(dto.district_id)
        .bind(dto.is_active)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| map_db_error(e, EMAIL_CONFLICT))?;

        if updated.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Customer with id {} not found", id)));
        }
        self.get_by_id(id).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Customer with id {} not found", id)));
        }

        tracing::info!("Customer deleted: id={}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_email() {
        assert_eq!(
            normalize_email(Some("  Sari@Shop.TEST ")).as_deref(),
            Some("sari@shop.test")
        );
        assert_eq!(normalize_email(None), None);
    }
}
