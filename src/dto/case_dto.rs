//! DTOs de casos
//!
//! Requests de las operaciones del ciclo de vida y responses con el
//! resumen financiero calculado.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::case::{CaseStatus, VehicleCase};
use crate::models::ledger::{FeeLedgerEntry, LedgerSummary};
use crate::utils::validation::validate_vin;

/// Request para crear un caso nuevo (vehículo remolcado entrante)
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCaseRequest {
    #[validate(custom = "validate_vin")]
    pub vin: Option<String>,

    #[validate(length(min = 2, max = 20))]
    pub plate: Option<String>,

    #[validate(range(min = 1900, max = 2100))]
    pub vehicle_year: Option<i16>,

    #[validate(length(min = 1, max = 100))]
    pub make: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub model: Option<String>,

    #[validate(length(min = 2, max = 50))]
    pub color: Option<String>,

    pub vehicle_type: Option<String>,
    pub vehicle_class: Option<String>,

    /// Fecha del remolque; si no viene se usa el momento de creación
    pub towed_at: Option<DateTime<Utc>>,
    pub tow_reason: Option<String>,
    pub tow_location: Option<String>,
    pub agency_id: Option<Uuid>,

    #[serde(default)]
    pub police_hold: bool,
    pub hold_expires_at: Option<DateTime<Utc>>,
    pub police_case_number: Option<String>,
}

/// Request para completar el intake y asignar patio
#[derive(Debug, Deserialize, Validate)]
pub struct CompleteIntakeRequest {
    #[validate(length(min = 1, max = 50))]
    pub yard_location: String,

    pub notes: Option<String>,
}

/// Request para registrar un pago
#[derive(Debug, Deserialize, Validate)]
pub struct RecordPaymentRequest {
    /// Monto pagado, siempre positivo; el libro lo almacena negado
    pub amount: Decimal,

    #[validate(length(min = 2, max = 30))]
    pub payment_method: String,

    pub description: Option<String>,
}

/// Request para liberar el vehículo
#[derive(Debug, Deserialize, Validate)]
pub struct ReleaseRequest {
    #[validate(length(min = 1, max = 200))]
    pub released_to: String,
}

/// Request del override administrativo de estado (cualquier→cualquier)
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: CaseStatus,
}

/// Filtros de búsqueda de casos
#[derive(Debug, Deserialize)]
pub struct SearchCasesQuery {
    pub q: Option<String>,
    pub status: Option<CaseStatus>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Response de detalle: caso más resumen financiero derivado
#[derive(Debug, Serialize)]
pub struct CaseDetailResponse {
    #[serde(flatten)]
    pub case: VehicleCase,
    pub summary: LedgerSummary,
}

/// Fila de listado con balance calculado
#[derive(Debug, Serialize)]
pub struct CaseListItem {
    #[serde(flatten)]
    pub case: VehicleCase,
    pub balance: Decimal,
}

/// Response paginada de búsqueda
#[derive(Debug, Serialize)]
pub struct SearchCasesResponse {
    pub items: Vec<CaseListItem>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

/// Response de un pago registrado
#[derive(Debug, Serialize)]
pub struct PaymentResponse {
    pub entry: FeeLedgerEntry,
    /// Balance del caso después del pago
    pub balance: Decimal,
    /// Estado resultante (puede haber pasado a RELEASE_ELIGIBLE)
    pub status: CaseStatus,
}

/// Response de la liberación
#[derive(Debug, Serialize)]
pub struct ReleaseResponse {
    #[serde(flatten)]
    pub case: VehicleCase,
    /// Balance pendiente al momento de liberar. La liberación no se
    /// bloquea por deuda; el monto se expone para que la UI lo avise.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance_warning: Option<Decimal>,
}
