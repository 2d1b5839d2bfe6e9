//! Tipos de request/response de la API

pub mod agency_dto;
pub mod auth_dto;
pub mod case_dto;
pub mod fee_schedule_dto;
pub mod ledger_dto;
pub mod response;

pub use response::ApiResponse;
