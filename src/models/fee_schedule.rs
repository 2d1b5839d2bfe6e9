//! Modelo de FeeSchedule
//!
//! Tarifas configurables por clase de vehículo. Cuando no existe una fila
//! para la clase del caso se usan los montos default de la configuración.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::ledger::FeeType;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct FeeSchedule {
    pub id: Uuid,
    pub vehicle_class: String,
    pub fee_type: FeeType,
    pub amount: Decimal,
    pub created_at: DateTime<Utc>,
}
