//! Lógica de negocio
//!
//! Los controllers implementan las reglas del dominio sobre los
//! repositories: guards de transición, resolución de tarifas y escritura
//! de auditoría, siempre dentro de una unidad atómica.

pub mod agency_controller;
pub mod auth_controller;
pub mod case_controller;
pub mod fee_schedule_controller;
pub mod ledger_controller;
