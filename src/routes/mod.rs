//! Routers de la API

pub mod agency_routes;
pub mod auth_routes;
pub mod case_routes;
pub mod fee_schedule_routes;
pub mod ledger_routes;
