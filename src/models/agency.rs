//! Modelo de Agency
//!
//! Agencias solicitantes de remolque (policía, municipalidad, etc).

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Agency {
    pub id: Uuid,
    pub name: String,
    pub code: String,
    pub contact_name: Option<String>,
    pub contact_phone: Option<String>,
    pub contact_email: Option<String>,
    pub created_at: DateTime<Utc>,
}
