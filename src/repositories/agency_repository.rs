//! Repository de agencias

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::agency::Agency;
use crate::utils::errors::AppError;

pub struct AgencyRepository {
    pool: PgPool,
}

impl AgencyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        name: &str,
        code: &str,
        contact_name: Option<&str>,
        contact_phone: Option<&str>,
        contact_email: Option<&str>,
    ) -> Result<Agency, AppError> {
        let agency = sqlx::query_as::<_, Agency>(
            r#"
            INSERT INTO agencies (name, code, contact_name, contact_phone, contact_email)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(code)
        .bind(contact_name)
        .bind(contact_phone)
        .bind(contact_email)
        .fetch_one(&self.pool)
        .await?;

        Ok(agency)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Agency>, AppError> {
        let agency = sqlx::query_as::<_, Agency>("SELECT * FROM agencies WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(agency)
    }

    pub async fn list(&self) -> Result<Vec<Agency>, AppError> {
        let agencies = sqlx::query_as::<_, Agency>("SELECT * FROM agencies ORDER BY name")
            .fetch_all(&self.pool)
            .await?;

        Ok(agencies)
    }

    pub async fn code_exists(&self, code: &str) -> Result<bool, AppError> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM agencies WHERE code = $1)")
                .bind(code)
                .fetch_one(&self.pool)
                .await?;

        Ok(result.0)
    }

    pub async fn update(
        &self,
        id: Uuid,
        name: Option<&str>,
        contact_name: Option<&str>,
        contact_phone: Option<&str>,
        contact_email: Option<&str>,
    ) -> Result<Agency, AppError> {
        let agency = sqlx::query_as::<_, Agency>(
            r#"
            UPDATE agencies
            SET name = COALESCE($2, name),
                contact_name = COALESCE($3, contact_name),
                contact_phone = COALESCE($4, contact_phone),
                contact_email = COALESCE($5, contact_email)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(contact_name)
        .bind(contact_phone)
        .bind(contact_email)
        .fetch_one(&self.pool)
        .await?;

        Ok(agency)
    }

    pub async fn delete(&self, id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM agencies WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
