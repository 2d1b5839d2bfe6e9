//! Modelo de VehicleCase
//!
//! Este módulo contiene el struct VehicleCase y la máquina de estados del
//! ciclo de vida de un caso. Mapea exactamente al schema PostgreSQL con
//! primary key 'id' y el ENUM case_status.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Estado del caso - mapea al ENUM case_status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "case_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CaseStatus {
    PendingIntake,
    IntakeComplete,
    Stored,
    Hold,
    ReleaseEligible,
    Released,
    AuctionEligible,
    AuctionListed,
    Sold,
    Disposed,
}

impl CaseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CaseStatus::PendingIntake => "PENDING_INTAKE",
            CaseStatus::IntakeComplete => "INTAKE_COMPLETE",
            CaseStatus::Stored => "STORED",
            CaseStatus::Hold => "HOLD",
            CaseStatus::ReleaseEligible => "RELEASE_ELIGIBLE",
            CaseStatus::Released => "RELEASED",
            CaseStatus::AuctionEligible => "AUCTION_ELIGIBLE",
            CaseStatus::AuctionListed => "AUCTION_LISTED",
            CaseStatus::Sold => "SOLD",
            CaseStatus::Disposed => "DISPOSED",
        }
    }

    /// Estado resultante al completar el intake según la retención policial
    pub fn post_intake(police_hold: bool) -> CaseStatus {
        if police_hold {
            CaseStatus::Hold
        } else {
            CaseStatus::Stored
        }
    }

    /// Solo se puede completar el intake desde PENDING_INTAKE
    pub fn can_complete_intake(&self) -> bool {
        matches!(self, CaseStatus::PendingIntake)
    }

    /// Estados terminales: el caso queda cerrado para actividad financiera
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            CaseStatus::Released | CaseStatus::Sold | CaseStatus::Disposed
        )
    }

    /// Un caso cerrado no acepta pagos ni cargos nuevos
    pub fn accepts_financial_activity(&self) -> bool {
        !self.is_terminal()
    }

    /// La liberación parte de STORED o RELEASE_ELIGIBLE. La retención
    /// policial se verifica aparte porque es un guard duro independiente
    /// del estado.
    pub fn can_release_from(&self) -> bool {
        matches!(self, CaseStatus::Stored | CaseStatus::ReleaseEligible)
    }

    /// Un pago que deja el balance en cero solo promueve casos STORED
    /// sin retención policial a RELEASE_ELIGIBLE.
    pub fn auto_release_eligible(&self, police_hold: bool) -> bool {
        *self == CaseStatus::Stored && !police_hold
    }
}

impl std::fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// VehicleCase principal - mapea exactamente a la tabla vehicle_cases
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct VehicleCase {
    pub id: Uuid,
    pub case_number: String,
    pub status: CaseStatus,
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
    pub yard_location: Option<String>,
    pub intake_date: Option<DateTime<Utc>>,
    pub intake_notes: Option<String>,
    pub released_at: Option<DateTime<Utc>>,
    pub released_to: Option<String>,
    pub created_by: Option<Uuid>,
    pub updated_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_intake_respeta_retencion() {
        assert_eq!(CaseStatus::post_intake(true), CaseStatus::Hold);
        assert_eq!(CaseStatus::post_intake(false), CaseStatus::Stored);
    }

    #[test]
    fn test_intake_solo_desde_pending() {
        assert!(CaseStatus::PendingIntake.can_complete_intake());
        for status in [
            CaseStatus::Stored,
            CaseStatus::Hold,
            CaseStatus::ReleaseEligible,
            CaseStatus::Released,
            CaseStatus::AuctionListed,
        ] {
            assert!(!status.can_complete_intake(), "{} no debe permitir intake", status);
        }
    }

    #[test]
    fn test_estados_terminales_cierran_actividad_financiera() {
        assert!(!CaseStatus::Released.accepts_financial_activity());
        assert!(!CaseStatus::Sold.accepts_financial_activity());
        assert!(!CaseStatus::Disposed.accepts_financial_activity());
        assert!(CaseStatus::Stored.accepts_financial_activity());
        assert!(CaseStatus::Hold.accepts_financial_activity());
    }

    #[test]
    fn test_liberacion_desde_stored_o_release_eligible() {
        assert!(CaseStatus::Stored.can_release_from());
        assert!(CaseStatus::ReleaseEligible.can_release_from());
        assert!(!CaseStatus::Hold.can_release_from());
        assert!(!CaseStatus::PendingIntake.can_release_from());
        assert!(!CaseStatus::Released.can_release_from());
    }

    #[test]
    fn test_auto_transicion_solo_stored_sin_retencion() {
        assert!(CaseStatus::Stored.auto_release_eligible(false));
        assert!(!CaseStatus::Stored.auto_release_eligible(true));
        // Un caso HOLD nunca se promueve automáticamente aunque pague todo
        assert!(!CaseStatus::Hold.auto_release_eligible(false));
        assert!(!CaseStatus::ReleaseEligible.auto_release_eligible(false));
    }

    #[test]
    fn test_serializacion_screaming_snake_case() {
        let json = serde_json::to_string(&CaseStatus::ReleaseEligible).unwrap();
        assert_eq!(json, "\"RELEASE_ELIGIBLE\"");
        let parsed: CaseStatus = serde_json::from_str("\"PENDING_INTAKE\"").unwrap();
        assert_eq!(parsed, CaseStatus::PendingIntake);
    }
}
