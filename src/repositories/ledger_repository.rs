//! Repository del libro de tarifas
//!
//! Inserción, anulado y sumas del libro. El balance se deriva con SUM
//! sobre las entradas no anuladas en cada lectura; no existe una columna
//! de balance que pueda quedar desincronizada.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::models::ledger::{FeeLedgerEntry, FeeType, LedgerSummary};
use crate::utils::errors::AppError;

/// Datos para insertar una entrada del libro
#[derive(Debug)]
pub struct NewLedgerEntry {
    pub case_id: Uuid,
    pub fee_type: FeeType,
    /// Positivo = cargo, negativo = pago (ya con el signo aplicado)
    pub amount: Decimal,
    pub description: Option<String>,
    pub accrual_date: NaiveDate,
    pub payment_method: Option<String>,
    pub paid_at: Option<DateTime<Utc>>,
    pub created_by: Option<Uuid>,
}

pub struct LedgerRepository {
    pool: PgPool,
}

impl LedgerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert_entry(
        conn: &mut PgConnection,
        entry: &NewLedgerEntry,
    ) -> Result<FeeLedgerEntry, AppError> {
        let row = sqlx::query_as::<_, FeeLedgerEntry>(
            r#"
            INSERT INTO fee_ledger_entries (
                case_id, fee_type, amount, description, accrual_date,
                payment_method, paid_at, created_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(entry.case_id)
        .bind(entry.fee_type)
        .bind(entry.amount)
        .bind(&entry.description)
        .bind(entry.accrual_date)
        .bind(&entry.payment_method)
        .bind(entry.paid_at)
        .bind(entry.created_by)
        .fetch_one(conn)
        .await?;

        Ok(row)
    }

    /// Balance dentro de una transacción: SUM de entradas no anuladas.
    /// Se usa después de insertar un pago, con el caso lockeado, para
    /// decidir la auto-transición a RELEASE_ELIGIBLE.
    pub async fn balance_in_tx(
        conn: &mut PgConnection,
        case_id: Uuid,
    ) -> Result<Decimal, AppError> {
        let (balance,): (Decimal,) = sqlx::query_as(
            r#"
            SELECT COALESCE(SUM(amount), 0)
            FROM fee_ledger_entries
            WHERE case_id = $1 AND voided_at IS NULL
            "#,
        )
        .bind(case_id)
        .fetch_one(conn)
        .await?;

        Ok(balance)
    }

    /// Resumen financiero del caso, derivado en cada lectura
    pub async fn summary(&self, case_id: Uuid) -> Result<LedgerSummary, AppError> {
        let (total_charges, total_payments): (Decimal, Decimal) = sqlx::query_as(
            r#"
            SELECT
                COALESCE(SUM(amount) FILTER (WHERE amount > 0), 0),
                COALESCE(SUM(-amount) FILTER (WHERE amount < 0), 0)
            FROM fee_ledger_entries
            WHERE case_id = $1 AND voided_at IS NULL
            "#,
        )
        .bind(case_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(LedgerSummary {
            total_charges,
            total_payments,
            balance: total_charges - total_payments,
        })
    }

    /// Listado completo del libro, incluidas las entradas anuladas
    pub async fn list_by_case(&self, case_id: Uuid) -> Result<Vec<FeeLedgerEntry>, AppError> {
        let entries = sqlx::query_as::<_, FeeLedgerEntry>(
            "SELECT * FROM fee_ledger_entries WHERE case_id = $1 ORDER BY created_at",
        )
        .bind(case_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    /// Leer una entrada con lock de fila para anularla
    pub async fn lock_entry(
        conn: &mut PgConnection,
        entry_id: Uuid,
    ) -> Result<Option<FeeLedgerEntry>, AppError> {
        let entry = sqlx::query_as::<_, FeeLedgerEntry>(
            "SELECT * FROM fee_ledger_entries WHERE id = $1 FOR UPDATE",
        )
        .bind(entry_id)
        .fetch_optional(conn)
        .await?;

        Ok(entry)
    }

    /// Marcar la entrada como anulada. La fila se conserva para auditoría.
    pub async fn mark_voided(
        conn: &mut PgConnection,
        entry_id: Uuid,
        voided_at: DateTime<Utc>,
    ) -> Result<FeeLedgerEntry, AppError> {
        let entry = sqlx::query_as::<_, FeeLedgerEntry>(
            r#"
            UPDATE fee_ledger_entries
            SET voided_at = $2
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(entry_id)
        .bind(voided_at)
        .fetch_one(conn)
        .await?;

        Ok(entry)
    }
}
