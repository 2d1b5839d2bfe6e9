//! Modelos de datos
//!
//! Structs que mapean a las tablas PostgreSQL del sistema de depósito.

pub mod agency;
pub mod audit;
pub mod case;
pub mod fee_schedule;
pub mod ledger;
pub mod user;
