//! Rutas del libro de tarifas
//!
//! Operaciones sobre entradas individuales (anulado).

use axum::{
    extract::{Path, State},
    routing::post,
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::ledger_controller::LedgerController;
use crate::dto::ApiResponse;
use crate::middleware::auth::AuthUser;
use crate::models::ledger::FeeLedgerEntry;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_ledger_router() -> Router<AppState> {
    Router::new().route("/:entry_id/void", post(void_entry))
}

async fn void_entry(
    State(state): State<AppState>,
    user: AuthUser,
    Path(entry_id): Path<Uuid>,
) -> Result<Json<ApiResponse<FeeLedgerEntry>>, AppError> {
    let controller = LedgerController::new(state.pool.clone());
    let entry = controller.void_entry(Some(user.id), entry_id).await?;
    Ok(Json(ApiResponse::success_with_message(
        entry,
        "Entrada anulada exitosamente".to_string(),
    )))
}
