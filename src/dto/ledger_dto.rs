//! DTOs del libro de tarifas

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use crate::models::ledger::FeeType;

/// Request para agregar un cargo manual a un caso
#[derive(Debug, Deserialize, Validate)]
pub struct AddChargeRequest {
    pub fee_type: FeeType,

    /// Monto del cargo, siempre positivo
    pub amount: Decimal,

    #[validate(length(max = 500))]
    pub description: Option<String>,

    /// Fecha de devengo; default hoy
    pub accrual_date: Option<NaiveDate>,
}
