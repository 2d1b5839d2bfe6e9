//! Controller del libro de tarifas
//!
//! Cargos manuales y anulado de entradas. Los cargos del intake y los
//! pagos viven en el CaseController porque disparan transiciones de
//! estado; acá queda la actividad del libro que no mueve el ciclo de vida.

use chrono::Utc;
use rust_decimal::Decimal;
use serde_json::json;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::dto::ledger_dto::AddChargeRequest;
use crate::models::ledger::{FeeLedgerEntry, FeeType};
use crate::repositories::audit_repository::AuditRepository;
use crate::repositories::case_repository::CaseRepository;
use crate::repositories::ledger_repository::{LedgerRepository, NewLedgerEntry};
use crate::utils::errors::{
    invalid_state_error, not_found_error, validation_error, AppError,
};

const ENTITY_LEDGER_ENTRY: &str = "fee_ledger_entry";

pub struct LedgerController {
    pool: PgPool,
}

impl LedgerController {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Agregar un cargo manual (almacenaje, gastos de lote, etc). Los
    /// cargos son montos positivos; un caso cerrado no acepta cargos.
    pub async fn add_charge(
        &self,
        actor_id: Option<Uuid>,
        case_id: Uuid,
        request: AddChargeRequest,
    ) -> Result<FeeLedgerEntry, AppError> {
        request.validate()?;

        if request.amount <= Decimal::ZERO {
            return Err(validation_error("amount", "charge amount must be positive"));
        }
        if request.fee_type == FeeType::Payment {
            return Err(validation_error(
                "fee_type",
                "payments are recorded through the payment endpoint",
            ));
        }

        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let case = CaseRepository::lock_by_id(&mut tx, case_id)
            .await?
            .ok_or_else(|| not_found_error("Case", &case_id.to_string()))?;

        if !case.status.accepts_financial_activity() {
            return Err(invalid_state_error("add charge", case.status.as_str()));
        }

        let entry = LedgerRepository::insert_entry(
            &mut tx,
            &NewLedgerEntry {
                case_id,
                fee_type: request.fee_type,
                amount: request.amount,
                description: request.description,
                accrual_date: request.accrual_date.unwrap_or_else(|| now.date_naive()),
                payment_method: None,
                paid_at: None,
                created_by: actor_id,
            },
        )
        .await?;

        AuditRepository::record(
            &mut tx,
            ENTITY_LEDGER_ENTRY,
            entry.id,
            "add_charge",
            actor_id,
            None,
            Some(json!({
                "case_id": case_id,
                "fee_type": entry.fee_type,
                "amount": entry.amount,
            })),
        )
        .await?;

        tx.commit().await?;

        info!(
            "🧾 Cargo {} de {} agregado a {}",
            entry.fee_type, entry.amount, case.case_number
        );

        Ok(entry)
    }

    /// Anular una entrada: queda fuera del balance pero se conserva en el
    /// listado para auditoría. Anular dos veces falla.
    pub async fn void_entry(
        &self,
        actor_id: Option<Uuid>,
        entry_id: Uuid,
    ) -> Result<FeeLedgerEntry, AppError> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let entry = LedgerRepository::lock_entry(&mut tx, entry_id)
            .await?
            .ok_or_else(|| not_found_error("Ledger entry", &entry_id.to_string()))?;

        if entry.is_voided() {
            return Err(AppError::InvalidState(
                "Ledger entry is already voided".to_string(),
            ));
        }

        let voided = LedgerRepository::mark_voided(&mut tx, entry_id, now).await?;

        AuditRepository::record(
            &mut tx,
            ENTITY_LEDGER_ENTRY,
            entry_id,
            "void",
            actor_id,
            Some(json!({ "voided_at": null })),
            Some(json!({ "voided_at": voided.voided_at, "case_id": voided.case_id })),
        )
        .await?;

        tx.commit().await?;

        info!("🚫 Entrada {} anulada", entry_id);

        Ok(voided)
    }
}
