//! Modelo del libro de tarifas
//!
//! Cada caso acumula entradas de cargo (monto positivo) y pago (monto
//! negativo). Las entradas nunca se borran físicamente: anular una entrada
//! marca voided_at y la excluye del balance.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Categoría de la entrada - mapea al ENUM fee_type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "fee_type", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeeType {
    Tow,
    Admin,
    StorageDaily,
    Lien,
    Misc,
    Payment,
}

impl FeeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeeType::Tow => "TOW",
            FeeType::Admin => "ADMIN",
            FeeType::StorageDaily => "STORAGE_DAILY",
            FeeType::Lien => "LIEN",
            FeeType::Misc => "MISC",
            FeeType::Payment => "PAYMENT",
        }
    }
}

impl std::fmt::Display for FeeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Entrada del libro - mapea exactamente a la tabla fee_ledger_entries
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct FeeLedgerEntry {
    pub id: Uuid,
    pub case_id: Uuid,
    pub fee_type: FeeType,
    pub amount: Decimal,
    pub description: Option<String>,
    pub accrual_date: NaiveDate,
    pub payment_method: Option<String>,
    pub paid_at: Option<DateTime<Utc>>,
    pub voided_at: Option<DateTime<Utc>>,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl FeeLedgerEntry {
    pub fn is_voided(&self) -> bool {
        self.voided_at.is_some()
    }
}

/// Resumen financiero de un caso: total_charges - total_payments = balance
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct LedgerSummary {
    pub total_charges: Decimal,
    pub total_payments: Decimal,
    pub balance: Decimal,
}

impl LedgerSummary {
    /// Calcula el resumen sobre un conjunto de entradas, excluyendo las
    /// anuladas. Los cargos son montos positivos y los pagos negativos.
    pub fn from_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = &'a FeeLedgerEntry>,
    {
        let mut total_charges = Decimal::ZERO;
        let mut total_payments = Decimal::ZERO;

        for entry in entries {
            if entry.is_voided() {
                continue;
            }
            if entry.amount > Decimal::ZERO {
                total_charges += entry.amount;
            } else {
                total_payments += -entry.amount;
            }
        }

        Self {
            total_charges,
            total_payments,
            balance: total_charges - total_payments,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(amount: Decimal, voided: bool) -> FeeLedgerEntry {
        FeeLedgerEntry {
            id: Uuid::new_v4(),
            case_id: Uuid::new_v4(),
            fee_type: if amount < Decimal::ZERO {
                FeeType::Payment
            } else {
                FeeType::Tow
            },
            amount,
            description: None,
            accrual_date: chrono::NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            payment_method: None,
            paid_at: None,
            voided_at: voided.then(Utc::now),
            created_by: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_balance_es_cargos_menos_pagos() {
        let entries = vec![
            entry(Decimal::new(15000, 2), false), // cargo 150.00
            entry(Decimal::new(5000, 2), false),  // cargo 50.00
            entry(Decimal::new(-7500, 2), false), // pago 75.00
        ];
        let summary = LedgerSummary::from_entries(&entries);
        assert_eq!(summary.total_charges, Decimal::new(20000, 2));
        assert_eq!(summary.total_payments, Decimal::new(7500, 2));
        assert_eq!(summary.balance, Decimal::new(12500, 2));
    }

    #[test]
    fn test_entradas_anuladas_excluidas() {
        let entries = vec![
            entry(Decimal::new(15000, 2), false),
            entry(Decimal::new(5000, 2), true), // anulada, no cuenta
            entry(Decimal::new(-15000, 2), false),
        ];
        let summary = LedgerSummary::from_entries(&entries);
        assert_eq!(summary.total_charges, Decimal::new(15000, 2));
        assert_eq!(summary.total_payments, Decimal::new(15000, 2));
        assert_eq!(summary.balance, Decimal::ZERO);
    }

    #[test]
    fn test_sobrepago_da_balance_negativo() {
        let entries = vec![
            entry(Decimal::new(10000, 2), false),
            entry(Decimal::new(-12000, 2), false),
        ];
        let summary = LedgerSummary::from_entries(&entries);
        assert_eq!(summary.balance, Decimal::new(-2000, 2));
    }

    #[test]
    fn test_caso_sin_entradas() {
        let summary = LedgerSummary::from_entries(std::iter::empty());
        assert_eq!(summary.balance, Decimal::ZERO);
        assert_eq!(summary.total_charges, Decimal::ZERO);
        assert_eq!(summary.total_payments, Decimal::ZERO);
    }
}
