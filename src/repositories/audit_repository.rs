//! Repository del registro de auditoría
//!
//! Append-only: las filas nunca se actualizan ni se borran.

use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::models::audit::AuditLogEntry;
use crate::utils::errors::AppError;

pub struct AuditRepository {
    pool: PgPool,
}

impl AuditRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Registrar un evento de auditoría dentro de la transacción de la
    /// operación que lo genera: si la operación aborta, el evento también.
    pub async fn record(
        conn: &mut PgConnection,
        entity_type: &str,
        entity_id: Uuid,
        action: &str,
        actor_id: Option<Uuid>,
        old_values: Option<serde_json::Value>,
        new_values: Option<serde_json::Value>,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO audit_log (entity_type, entity_id, action, actor_id, old_values, new_values)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(entity_type)
        .bind(entity_id)
        .bind(action)
        .bind(actor_id)
        .bind(old_values)
        .bind(new_values)
        .execute(conn)
        .await?;

        Ok(())
    }

    pub async fn list_for_entity(
        &self,
        entity_type: &str,
        entity_id: Uuid,
    ) -> Result<Vec<AuditLogEntry>, AppError> {
        let entries = sqlx::query_as::<_, AuditLogEntry>(
            r#"
            SELECT * FROM audit_log
            WHERE entity_type = $1 AND entity_id = $2
            ORDER BY created_at
            "#,
        )
        .bind(entity_type)
        .bind(entity_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }
}
