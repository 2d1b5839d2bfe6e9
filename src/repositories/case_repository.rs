//! Repository de casos
//!
//! CRUD y búsqueda de vehicle_cases. Las mutaciones del ciclo de vida
//! reciben la conexión de la transacción: el caller toma el lock de fila
//! (`lock_by_id`), chequea el guard y aplica la mutación en la misma
//! unidad atómica.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgConnection, PgPool};
use uuid::Uuid;

use crate::models::case::{CaseStatus, VehicleCase};
use crate::utils::errors::AppError;

/// Datos para insertar un caso nuevo
#[derive(Debug)]
pub struct NewCase {
    pub case_number: String,
    pub vin: Option<String>,
    pub plate: Option<String>,
    pub vehicle_year: Option<i16>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub color: Option<String>,
    pub vehicle_type: Option<String>,
    pub vehicle_class: Option<String>,
    pub towed_at: DateTime<Utc>,
    pub tow_reason: Option<String>,
    pub tow_location: Option<String>,
    pub agency_id: Option<Uuid>,
    pub police_hold: bool,
    pub hold_expires_at: Option<DateTime<Utc>>,
    pub police_case_number: Option<String>,
    pub created_by: Option<Uuid>,
}

/// Fila de búsqueda: caso más balance calculado
#[derive(Debug, FromRow)]
pub struct CaseWithBalance {
    #[sqlx(flatten)]
    pub case: VehicleCase,
    pub balance: Decimal,
}

/// Filtros de búsqueda de casos
#[derive(Debug, Default)]
pub struct CaseSearchFilters {
    pub query: Option<String>,
    pub status: Option<CaseStatus>,
    pub limit: i64,
    pub offset: i64,
}

pub struct CaseRepository {
    pool: PgPool,
}

impl CaseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insertar un caso nuevo en PENDING_INTAKE, dentro de la transacción
    /// que también emitió el número de caso
    pub async fn create(conn: &mut PgConnection, new_case: &NewCase) -> Result<VehicleCase, AppError> {
        let case = sqlx::query_as::<_, VehicleCase>(
            r#"
            INSERT INTO vehicle_cases (
                case_number, status, vin, plate, vehicle_year, make, model, color,
                vehicle_type, vehicle_class, towed_at, tow_reason, tow_location,
                agency_id, police_hold, hold_expires_at, police_case_number,
                created_by, updated_by
            )
            VALUES ($1, 'PENDING_INTAKE', $2, $3, $4, $5, $6, $7, $8, $9, $10, $11,
                    $12, $13, $14, $15, $16, $17, $17)
            RETURNING *
            "#,
        )
        .bind(&new_case.case_number)
        .bind(&new_case.vin)
        .bind(&new_case.plate)
        .bind(new_case.vehicle_year)
        .bind(&new_case.make)
        .bind(&new_case.model)
        .bind(&new_case.color)
        .bind(&new_case.vehicle_type)
        .bind(&new_case.vehicle_class)
        .bind(new_case.towed_at)
        .bind(&new_case.tow_reason)
        .bind(&new_case.tow_location)
        .bind(new_case.agency_id)
        .bind(new_case.police_hold)
        .bind(new_case.hold_expires_at)
        .bind(&new_case.police_case_number)
        .bind(new_case.created_by)
        .fetch_one(conn)
        .await?;

        Ok(case)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<VehicleCase>, AppError> {
        let case = sqlx::query_as::<_, VehicleCase>("SELECT * FROM vehicle_cases WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(case)
    }

    /// Leer el caso con lock de fila. Toda transición de estado empieza acá
    /// para que dos requests concurrentes sobre el mismo caso se serialicen.
    pub async fn lock_by_id(
        conn: &mut PgConnection,
        id: Uuid,
    ) -> Result<Option<VehicleCase>, AppError> {
        let case =
            sqlx::query_as::<_, VehicleCase>("SELECT * FROM vehicle_cases WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(conn)
                .await?;

        Ok(case)
    }

    /// Búsqueda paginada con balance calculado por caso (derivado del libro,
    /// nunca cacheado)
    pub async fn search(
        &self,
        filters: &CaseSearchFilters,
    ) -> Result<(Vec<CaseWithBalance>, i64), AppError> {
        // El patrón ILIKE busca en número de caso, VIN y matrícula
        let pattern = filters.query.as_ref().map(|q| format!("%{}%", q.trim()));

        let rows = sqlx::query_as::<_, CaseWithBalance>(
            r#"
            SELECT c.*, COALESCE(l.balance, 0) AS balance
            FROM vehicle_cases c
            LEFT JOIN (
                SELECT case_id, SUM(amount) AS balance
                FROM fee_ledger_entries
                WHERE voided_at IS NULL
                GROUP BY case_id
            ) l ON l.case_id = c.id
            WHERE ($1::case_status IS NULL OR c.status = $1)
              AND ($2::text IS NULL OR c.case_number ILIKE $2
                   OR c.vin ILIKE $2 OR c.plate ILIKE $2)
            ORDER BY c.created_at DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(filters.status)
        .bind(&pattern)
        .bind(filters.limit)
        .bind(filters.offset)
        .fetch_all(&self.pool)
        .await?;

        let (total,): (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*)
            FROM vehicle_cases c
            WHERE ($1::case_status IS NULL OR c.status = $1)
              AND ($2::text IS NULL OR c.case_number ILIKE $2
                   OR c.vin ILIKE $2 OR c.plate ILIKE $2)
            "#,
        )
        .bind(filters.status)
        .bind(&pattern)
        .fetch_one(&self.pool)
        .await?;

        Ok((rows, total))
    }

    /// Aplicar el resultado del intake: estado, patio y fecha de ingreso
    pub async fn apply_intake(
        conn: &mut PgConnection,
        id: Uuid,
        status: CaseStatus,
        yard_location: &str,
        notes: Option<&str>,
        intake_date: DateTime<Utc>,
        actor_id: Option<Uuid>,
    ) -> Result<VehicleCase, AppError> {
        let case = sqlx::query_as::<_, VehicleCase>(
            r#"
            UPDATE vehicle_cases
            SET status = $2, yard_location = $3, intake_notes = $4,
                intake_date = $5, updated_by = $6, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .bind(yard_location)
        .bind(notes)
        .bind(intake_date)
        .bind(actor_id)
        .fetch_one(conn)
        .await?;

        Ok(case)
    }

    /// Cambiar solo el estado (auto-transición y override administrativo)
    pub async fn set_status(
        conn: &mut PgConnection,
        id: Uuid,
        status: CaseStatus,
        actor_id: Option<Uuid>,
    ) -> Result<VehicleCase, AppError> {
        let case = sqlx::query_as::<_, VehicleCase>(
            r#"
            UPDATE vehicle_cases
            SET status = $2, updated_by = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .bind(actor_id)
        .fetch_one(conn)
        .await?;

        Ok(case)
    }

    /// Aplicar la liberación del vehículo
    pub async fn apply_release(
        conn: &mut PgConnection,
        id: Uuid,
        released_to: &str,
        released_at: DateTime<Utc>,
        actor_id: Option<Uuid>,
    ) -> Result<VehicleCase, AppError> {
        let case = sqlx::query_as::<_, VehicleCase>(
            r#"
            UPDATE vehicle_cases
            SET status = 'RELEASED', released_to = $2, released_at = $3,
                updated_by = $4, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(released_to)
        .bind(released_at)
        .bind(actor_id)
        .fetch_one(conn)
        .await?;

        Ok(case)
    }
}
