//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! y conversión de tipos.

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;
use validator::ValidationError;

/// Validar y convertir string a UUID
pub fn validate_uuid(value: &str) -> Result<Uuid, ValidationError> {
    Uuid::parse_str(value).map_err(|_| {
        let mut error = ValidationError::new("uuid");
        error.add_param("value".into(), &value.to_string());
        error
    })
}

/// Validar y convertir string a fecha
pub fn validate_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        let mut error = ValidationError::new("date");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"YYYY-MM-DD".to_string());
        error
    })
}

/// Validar y convertir string a datetime
pub fn validate_datetime(value: &str) -> Result<DateTime<Utc>, ValidationError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| {
            let mut error = ValidationError::new("datetime");
            error.add_param("value".into(), &value.to_string());
            error.add_param("format".into(), &"RFC3339".to_string());
            error
        })
}

/// Validar que un string no esté vacío
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_empty");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar formato de VIN: 17 caracteres alfanuméricos sin I, O ni Q.
/// El VIN es informativo, pero si viene debe tener forma válida.
pub fn validate_vin(value: &str) -> Result<(), ValidationError> {
    let valid = value.len() == 17
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() && !matches!(c, 'I' | 'O' | 'Q' | 'i' | 'o' | 'q'));

    if !valid {
        let mut error = ValidationError::new("vin");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_uuid() {
        assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(validate_uuid("no-es-uuid").is_err());
    }

    #[test]
    fn test_validate_date() {
        assert!(validate_date("2026-08-28").is_ok());
        assert!(validate_date("28/08/2026").is_err());
    }

    #[test]
    fn test_validate_vin() {
        assert!(validate_vin("1HGBH41JXMN109186").is_ok());
        // Demasiado corto
        assert!(validate_vin("1HGBH41JX").is_err());
        // Contiene O, prohibida en VINs
        assert!(validate_vin("1HGBH41JXMN10918O").is_err());
    }

    #[test]
    fn test_validate_not_empty() {
        assert!(validate_not_empty("A-1").is_ok());
        assert!(validate_not_empty("   ").is_err());
    }
}
