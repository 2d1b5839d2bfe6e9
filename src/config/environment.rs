//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de
//! configuración. Solo JWT_SECRET es obligatoria; el resto tiene defaults
//! razonables para desarrollo.

use rust_decimal::Decimal;
use std::env;
use std::str::FromStr;

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub jwt_secret: String,
    pub jwt_expiration: u64,
    pub cors_origins: Vec<String>,
    /// Cargo de remolque default cuando la clase del vehículo no tiene
    /// tarifa configurada
    pub tow_fee_default: Decimal,
    /// Cargo administrativo default
    pub admin_fee_default: Decimal,
}

impl EnvironmentConfig {
    pub fn from_env() -> Self {
        Self {
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .expect("PORT must be a valid number"),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            jwt_secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),
            jwt_expiration: env::var("JWT_EXPIRATION")
                .unwrap_or_else(|_| "86400".to_string())
                .parse()
                .expect("JWT_EXPIRATION must be a valid number"),
            cors_origins: env::var("CORS_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .collect()
                })
                .unwrap_or_default(),
            tow_fee_default: parse_fee("TOW_FEE_DEFAULT", "150.00"),
            admin_fee_default: parse_fee("ADMIN_FEE_DEFAULT", "50.00"),
        }
    }
}

fn parse_fee(var: &str, default: &str) -> Decimal {
    let raw = env::var(var).unwrap_or_else(|_| default.to_string());
    Decimal::from_str(&raw).unwrap_or_else(|_| panic!("{} must be a valid decimal amount", var))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_de_tarifas() {
        // Sin variables seteadas usa los montos default del flujo de intake
        std::env::remove_var("TOW_FEE_DEFAULT");
        std::env::remove_var("ADMIN_FEE_DEFAULT");
        assert_eq!(parse_fee("TOW_FEE_DEFAULT", "150.00"), Decimal::new(15000, 2));
        assert_eq!(parse_fee("ADMIN_FEE_DEFAULT", "50.00"), Decimal::new(5000, 2));
    }
}
