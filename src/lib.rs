//! Sistema de operaciones de depósito vehicular
//!
//! Backend HTTP para la gestión de vehículos remolcados: intake, libro de
//! tarifas, ciclo de vida del caso (almacenado, retención, liberación,
//! subasta) y configuración administrativa.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod state;
pub mod utils;

use axum::{response::Json, routing::get, Router};
use serde_json::json;

use crate::middleware::cors::{cors_middleware, cors_middleware_with_origins};
use crate::state::AppState;

/// Armar el router completo de la aplicación
pub fn build_app(state: AppState) -> Router {
    let cors = if state.config.cors_origins.is_empty() {
        cors_middleware()
    } else {
        cors_middleware_with_origins(&state.config.cors_origins)
    };

    Router::new()
        .route("/health", get(health))
        .nest("/api/auth", routes::auth_routes::create_auth_router())
        .nest("/api/case", routes::case_routes::create_case_router())
        .nest("/api/ledger", routes::ledger_routes::create_ledger_router())
        .nest("/api/agency", routes::agency_routes::create_agency_router())
        .nest(
            "/api/fee-schedule",
            routes::fee_schedule_routes::create_fee_schedule_router(),
        )
        .layer(cors)
        .with_state(state)
}

/// Health check
async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "service": "impound-lot",
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
