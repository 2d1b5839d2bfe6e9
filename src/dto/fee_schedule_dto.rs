//! DTOs de tarifas configurables

use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use crate::models::ledger::FeeType;

/// Request para configurar la tarifa de una clase de vehículo
#[derive(Debug, Deserialize, Validate)]
pub struct UpsertFeeScheduleRequest {
    #[validate(length(min = 1, max = 50))]
    pub vehicle_class: String,

    pub fee_type: FeeType,

    /// Monto del cargo, siempre positivo
    pub amount: Decimal,
}
