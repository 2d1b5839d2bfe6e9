//! Rutas de tarifas configurables

use axum::{
    extract::State,
    routing::{get, put},
    Json, Router,
};

use crate::controllers::fee_schedule_controller::FeeScheduleController;
use crate::dto::fee_schedule_dto::UpsertFeeScheduleRequest;
use crate::dto::ApiResponse;
use crate::middleware::auth::AuthUser;
use crate::models::fee_schedule::FeeSchedule;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_fee_schedule_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_fee_schedules))
        .route("/", put(upsert_fee_schedule))
}

async fn list_fee_schedules(
    State(state): State<AppState>,
) -> Result<Json<Vec<FeeSchedule>>, AppError> {
    let controller = FeeScheduleController::new(state.pool.clone());
    let schedules = controller.list().await?;
    Ok(Json(schedules))
}

async fn upsert_fee_schedule(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<UpsertFeeScheduleRequest>,
) -> Result<Json<ApiResponse<FeeSchedule>>, AppError> {
    user.require_admin()?;
    let controller = FeeScheduleController::new(state.pool.clone());
    let schedule = controller.upsert(request).await?;
    Ok(Json(ApiResponse::success_with_message(
        schedule,
        "Tarifa configurada exitosamente".to_string(),
    )))
}
