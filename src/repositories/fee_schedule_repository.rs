//! Repository de tarifas configurables
//!
//! Lookup de montos por clase de vehículo y tipo de tarifa. La resolución
//! final (fila configurada o default del entorno) vive en el controller.

use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};

use crate::models::fee_schedule::FeeSchedule;
use crate::models::ledger::FeeType;
use crate::utils::errors::AppError;

pub struct FeeScheduleRepository {
    pool: PgPool,
}

impl FeeScheduleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<FeeSchedule>, AppError> {
        let rows = sqlx::query_as::<_, FeeSchedule>(
            "SELECT * FROM fee_schedules ORDER BY vehicle_class, fee_type",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Monto configurado para una clase y tipo, si existe. Se consulta
    /// dentro de la transacción de intake para que la tarifa aplicada sea
    /// consistente con los cargos insertados.
    pub async fn amount_for(
        conn: &mut PgConnection,
        vehicle_class: &str,
        fee_type: FeeType,
    ) -> Result<Option<Decimal>, AppError> {
        let row: Option<(Decimal,)> = sqlx::query_as(
            "SELECT amount FROM fee_schedules WHERE vehicle_class = $1 AND fee_type = $2",
        )
        .bind(vehicle_class)
        .bind(fee_type)
        .fetch_optional(conn)
        .await?;

        Ok(row.map(|(amount,)| amount))
    }

    /// Alta o actualización de una tarifa (pantallas de administración)
    pub async fn upsert(
        &self,
        vehicle_class: &str,
        fee_type: FeeType,
        amount: Decimal,
    ) -> Result<FeeSchedule, AppError> {
        let row = sqlx::query_as::<_, FeeSchedule>(
            r#"
            INSERT INTO fee_schedules (vehicle_class, fee_type, amount)
            VALUES ($1, $2, $3)
            ON CONFLICT (vehicle_class, fee_type)
            DO UPDATE SET amount = EXCLUDED.amount
            RETURNING *
            "#,
        )
        .bind(vehicle_class)
        .bind(fee_type)
        .bind(amount)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }
}
