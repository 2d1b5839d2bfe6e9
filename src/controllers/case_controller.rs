//! Controller del ciclo de vida de casos
//!
//! Implementa la máquina de estados: creación con número de caso atómico,
//! intake con cargos iniciales, pagos con auto-transición a
//! RELEASE_ELIGIBLE, liberación y override administrativo. Cada transición
//! corre guard + mutación + auditoría en una sola transacción con la fila
//! del caso lockeada, así dos requests concurrentes nunca deciden sobre un
//! estado o balance viejo.

use chrono::Utc;
use rust_decimal::Decimal;
use serde_json::json;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::config::environment::EnvironmentConfig;
use crate::dto::case_dto::{
    CaseDetailResponse, CaseListItem, CompleteIntakeRequest, CreateCaseRequest, PaymentResponse,
    RecordPaymentRequest, ReleaseRequest, SearchCasesQuery, SearchCasesResponse,
    UpdateStatusRequest,
};
use crate::models::audit::AuditLogEntry;
use crate::models::case::{CaseStatus, VehicleCase};
use crate::models::ledger::{FeeLedgerEntry, FeeType};
use crate::repositories::audit_repository::AuditRepository;
use crate::repositories::case_number_repository::CaseNumberRepository;
use crate::repositories::case_repository::{
    CaseRepository, CaseSearchFilters, NewCase,
};
use crate::repositories::fee_schedule_repository::FeeScheduleRepository;
use crate::repositories::ledger_repository::{LedgerRepository, NewLedgerEntry};
use crate::utils::errors::{invalid_state_error, not_found_error, AppError};

const ENTITY_CASE: &str = "vehicle_case";

const DEFAULT_PAGE_SIZE: i64 = 25;
const MAX_PAGE_SIZE: i64 = 100;

/// Normalizar límite y offset de paginación
fn page_params(limit: Option<i64>, offset: Option<i64>) -> (i64, i64) {
    (
        limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE),
        offset.unwrap_or(0).max(0),
    )
}

pub struct CaseController {
    pool: PgPool,
    config: EnvironmentConfig,
    cases: CaseRepository,
    ledger: LedgerRepository,
    audit: AuditRepository,
}

impl CaseController {
    pub fn new(pool: PgPool, config: EnvironmentConfig) -> Self {
        Self {
            cases: CaseRepository::new(pool.clone()),
            ledger: LedgerRepository::new(pool.clone()),
            audit: AuditRepository::new(pool.clone()),
            pool,
            config,
        }
    }

    /// Crear un caso en PENDING_INTAKE. El número de caso se emite en la
    /// misma transacción que el INSERT: nunca hay número sin caso.
    pub async fn create(
        &self,
        actor_id: Option<Uuid>,
        request: CreateCaseRequest,
    ) -> Result<CaseDetailResponse, AppError> {
        request.validate()?;

        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let case_number = CaseNumberRepository::next_case_number(&mut tx, now).await?;

        let new_case = NewCase {
            case_number,
            vin: request.vin,
            plate: request.plate,
            vehicle_year: request.vehicle_year,
            make: request.make,
            model: request.model,
            color: request.color,
            vehicle_type: request.vehicle_type,
            vehicle_class: request.vehicle_class,
            towed_at: request.towed_at.unwrap_or(now),
            tow_reason: request.tow_reason,
            tow_location: request.tow_location,
            agency_id: request.agency_id,
            police_hold: request.police_hold,
            hold_expires_at: request.hold_expires_at,
            police_case_number: request.police_case_number,
            created_by: actor_id,
        };

        let case = CaseRepository::create(&mut tx, &new_case).await?;

        AuditRepository::record(
            &mut tx,
            ENTITY_CASE,
            case.id,
            "create",
            actor_id,
            None,
            Some(json!({
                "case_number": case.case_number,
                "status": case.status,
                "police_hold": case.police_hold,
            })),
        )
        .await?;

        tx.commit().await?;

        info!("📋 Caso {} creado ({})", case.case_number, case.id);

        Ok(CaseDetailResponse {
            summary: self.ledger.summary(case.id).await?,
            case,
        })
    }

    /// Detalle del caso con resumen financiero derivado del libro
    pub async fn get(&self, id: Uuid) -> Result<CaseDetailResponse, AppError> {
        let case = self
            .cases
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Case", &id.to_string()))?;

        let summary = self.ledger.summary(id).await?;

        Ok(CaseDetailResponse { case, summary })
    }

    /// Búsqueda paginada con balance por caso
    pub async fn search(&self, query: SearchCasesQuery) -> Result<SearchCasesResponse, AppError> {
        let (limit, offset) = page_params(query.limit, query.offset);

        let filters = CaseSearchFilters {
            query: query.q.filter(|q| !q.trim().is_empty()),
            status: query.status,
            limit,
            offset,
        };

        let (rows, total) = self.cases.search(&filters).await?;

        Ok(SearchCasesResponse {
            items: rows
                .into_iter()
                .map(|row| CaseListItem {
                    case: row.case,
                    balance: row.balance,
                })
                .collect(),
            total,
            limit,
            offset,
        })
    }

    /// Completar el intake: asignar patio, fijar fecha de ingreso, crear los
    /// cargos TOW y ADMIN a la fecha del remolque y pasar a STORED o HOLD
    /// según la retención policial. Solo válido desde PENDING_INTAKE.
    pub async fn complete_intake(
        &self,
        actor_id: Option<Uuid>,
        case_id: Uuid,
        request: CompleteIntakeRequest,
    ) -> Result<CaseDetailResponse, AppError> {
        request.validate()?;

        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let case = CaseRepository::lock_by_id(&mut tx, case_id)
            .await?
            .ok_or_else(|| not_found_error("Case", &case_id.to_string()))?;

        if !case.status.can_complete_intake() {
            return Err(invalid_state_error("complete intake", case.status.as_str()));
        }

        let (tow_fee, admin_fee) = self.resolve_intake_fees(&mut tx, &case).await?;
        let accrual_date = case.towed_at.date_naive();

        LedgerRepository::insert_entry(
            &mut tx,
            &NewLedgerEntry {
                case_id,
                fee_type: FeeType::Tow,
                amount: tow_fee,
                description: Some("Cargo de remolque".to_string()),
                accrual_date,
                payment_method: None,
                paid_at: None,
                created_by: actor_id,
            },
        )
        .await?;

        LedgerRepository::insert_entry(
            &mut tx,
            &NewLedgerEntry {
                case_id,
                fee_type: FeeType::Admin,
                amount: admin_fee,
                description: Some("Cargo administrativo".to_string()),
                accrual_date,
                payment_method: None,
                paid_at: None,
                created_by: actor_id,
            },
        )
        .await?;

        let new_status = CaseStatus::post_intake(case.police_hold);
        let updated = CaseRepository::apply_intake(
            &mut tx,
            case_id,
            new_status,
            &request.yard_location,
            request.notes.as_deref(),
            now,
            actor_id,
        )
        .await?;

        AuditRepository::record(
            &mut tx,
            ENTITY_CASE,
            case_id,
            "complete_intake",
            actor_id,
            Some(json!({ "status": case.status })),
            Some(json!({
                "status": updated.status,
                "yard_location": updated.yard_location,
                "tow_fee": tow_fee,
                "admin_fee": admin_fee,
            })),
        )
        .await?;

        tx.commit().await?;

        info!(
            "🚙 Intake completado para {} -> {} (patio {})",
            updated.case_number, updated.status, request.yard_location
        );

        Ok(CaseDetailResponse {
            summary: self.ledger.summary(case_id).await?,
            case: updated,
        })
    }

    /// Registrar un pago. El balance se re-evalúa dentro de la transacción,
    /// con la fila del caso lockeada, sobre el conjunto actual de entradas
    /// no anuladas: si queda en cero o menos, y el caso está STORED sin
    /// retención policial, pasa automáticamente a RELEASE_ELIGIBLE.
    pub async fn record_payment(
        &self,
        actor_id: Option<Uuid>,
        case_id: Uuid,
        request: RecordPaymentRequest,
    ) -> Result<PaymentResponse, AppError> {
        request.validate()?;

        if request.amount <= Decimal::ZERO {
            return Err(crate::utils::errors::validation_error(
                "amount",
                "payment amount must be positive",
            ));
        }

        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let case = CaseRepository::lock_by_id(&mut tx, case_id)
            .await?
            .ok_or_else(|| not_found_error("Case", &case_id.to_string()))?;

        if !case.status.accepts_financial_activity() {
            return Err(invalid_state_error("record payment", case.status.as_str()));
        }

        let entry = LedgerRepository::insert_entry(
            &mut tx,
            &NewLedgerEntry {
                case_id,
                fee_type: FeeType::Payment,
                amount: -request.amount,
                description: request.description,
                accrual_date: now.date_naive(),
                payment_method: Some(request.payment_method),
                paid_at: Some(now),
                created_by: actor_id,
            },
        )
        .await?;

        let balance = LedgerRepository::balance_in_tx(&mut tx, case_id).await?;

        let mut status = case.status;
        if balance <= Decimal::ZERO && case.status.auto_release_eligible(case.police_hold) {
            let updated =
                CaseRepository::set_status(&mut tx, case_id, CaseStatus::ReleaseEligible, actor_id)
                    .await?;
            status = updated.status;

            AuditRepository::record(
                &mut tx,
                ENTITY_CASE,
                case_id,
                "auto_release_eligible",
                actor_id,
                Some(json!({ "status": case.status })),
                Some(json!({ "status": status, "balance": balance })),
            )
            .await?;
        }

        AuditRepository::record(
            &mut tx,
            ENTITY_CASE,
            case_id,
            "payment",
            actor_id,
            None,
            Some(json!({
                "amount": request.amount,
                "entry_id": entry.id,
                "balance_after": balance,
            })),
        )
        .await?;

        tx.commit().await?;

        info!(
            "💰 Pago de {} registrado en {} (balance {})",
            request.amount, case.case_number, balance
        );

        Ok(PaymentResponse {
            entry,
            balance,
            status,
        })
    }

    /// Liberar el vehículo. La retención policial es un guard duro; la
    /// deuda pendiente NO bloquea (se devuelve como balance_warning para
    /// que la UI avise).
    pub async fn release(
        &self,
        actor_id: Option<Uuid>,
        case_id: Uuid,
        request: ReleaseRequest,
    ) -> Result<crate::dto::case_dto::ReleaseResponse, AppError> {
        request.validate()?;

        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let case = CaseRepository::lock_by_id(&mut tx, case_id)
            .await?
            .ok_or_else(|| not_found_error("Case", &case_id.to_string()))?;

        if case.police_hold {
            return Err(AppError::InvalidState(
                "Cannot release: case is under police hold".to_string(),
            ));
        }

        if !case.status.can_release_from() {
            return Err(invalid_state_error("release", case.status.as_str()));
        }

        let balance = LedgerRepository::balance_in_tx(&mut tx, case_id).await?;

        let updated =
            CaseRepository::apply_release(&mut tx, case_id, &request.released_to, now, actor_id)
                .await?;

        AuditRepository::record(
            &mut tx,
            ENTITY_CASE,
            case_id,
            "release",
            actor_id,
            Some(json!({ "status": case.status })),
            Some(json!({
                "status": updated.status,
                "released_to": updated.released_to,
                "balance_at_release": balance,
            })),
        )
        .await?;

        tx.commit().await?;

        info!(
            "🔓 Caso {} liberado a {}",
            updated.case_number, request.released_to
        );

        Ok(crate::dto::case_dto::ReleaseResponse {
            case: updated,
            balance_warning: (balance > Decimal::ZERO).then_some(balance),
        })
    }

    /// Override administrativo de estado: cualquier→cualquier, a propósito
    /// sin grafo restrictivo para permitir correcciones. Queda auditado.
    pub async fn update_status(
        &self,
        actor_id: Option<Uuid>,
        case_id: Uuid,
        request: UpdateStatusRequest,
    ) -> Result<VehicleCase, AppError> {
        let mut tx = self.pool.begin().await?;

        let case = CaseRepository::lock_by_id(&mut tx, case_id)
            .await?
            .ok_or_else(|| not_found_error("Case", &case_id.to_string()))?;

        let updated = CaseRepository::set_status(&mut tx, case_id, request.status, actor_id).await?;

        AuditRepository::record(
            &mut tx,
            ENTITY_CASE,
            case_id,
            "status_override",
            actor_id,
            Some(json!({ "status": case.status })),
            Some(json!({ "status": updated.status })),
        )
        .await?;

        tx.commit().await?;

        info!(
            "⚙️ Override de estado en {}: {} -> {}",
            updated.case_number, case.status, updated.status
        );

        Ok(updated)
    }

    /// Libro completo del caso, incluidas entradas anuladas
    pub async fn list_ledger(&self, case_id: Uuid) -> Result<Vec<FeeLedgerEntry>, AppError> {
        self.ensure_exists(case_id).await?;
        self.ledger.list_by_case(case_id).await
    }

    /// Historial de auditoría del caso
    pub async fn audit_trail(&self, case_id: Uuid) -> Result<Vec<AuditLogEntry>, AppError> {
        self.ensure_exists(case_id).await?;
        self.audit.list_for_entity(ENTITY_CASE, case_id).await
    }

    async fn ensure_exists(&self, case_id: Uuid) -> Result<(), AppError> {
        self.cases
            .find_by_id(case_id)
            .await?
            .ok_or_else(|| not_found_error("Case", &case_id.to_string()))?;
        Ok(())
    }

    /// Tarifas de intake: fila configurada para la clase del vehículo, si
    /// existe, con fallback a los defaults del entorno (150.00 / 50.00)
    async fn resolve_intake_fees(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        case: &VehicleCase,
    ) -> Result<(Decimal, Decimal), AppError> {
        let (mut tow, mut admin) = (None, None);

        if let Some(class) = &case.vehicle_class {
            tow = FeeScheduleRepository::amount_for(&mut *tx, class, FeeType::Tow).await?;
            admin = FeeScheduleRepository::amount_for(&mut *tx, class, FeeType::Admin).await?;
        }

        Ok((
            tow.unwrap_or(self.config.tow_fee_default),
            admin.unwrap_or(self.config.admin_fee_default),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_params_defaults() {
        assert_eq!(page_params(None, None), (DEFAULT_PAGE_SIZE, 0));
    }

    #[test]
    fn test_page_params_limites() {
        assert_eq!(page_params(Some(0), Some(-5)), (1, 0));
        assert_eq!(page_params(Some(500), Some(10)), (MAX_PAGE_SIZE, 10));
        assert_eq!(page_params(Some(50), Some(100)), (50, 100));
    }
}
