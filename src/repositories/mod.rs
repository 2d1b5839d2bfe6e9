//! Acceso a datos
//!
//! Los repositories encapsulan el SQL. Las operaciones que participan en
//! transacciones son funciones asociadas que reciben la conexión de la
//! transacción; las lecturas sueltas usan el pool.

pub mod agency_repository;
pub mod audit_repository;
pub mod case_number_repository;
pub mod case_repository;
pub mod fee_schedule_repository;
pub mod ledger_repository;
pub mod user_repository;
