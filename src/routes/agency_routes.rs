//! Rutas de agencias

use axum::{
    extract::{Path, State},
    routing::{delete, get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::agency_controller::AgencyController;
use crate::dto::agency_dto::{CreateAgencyRequest, UpdateAgencyRequest};
use crate::dto::ApiResponse;
use crate::middleware::auth::AuthUser;
use crate::models::agency::Agency;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_agency_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_agency))
        .route("/", get(list_agencies))
        .route("/:id", get(get_agency))
        .route("/:id", put(update_agency))
        .route("/:id", delete(delete_agency))
}

async fn create_agency(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<CreateAgencyRequest>,
) -> Result<Json<ApiResponse<Agency>>, AppError> {
    user.require_admin()?;
    let controller = AgencyController::new(state.pool.clone());
    let agency = controller.create(request).await?;
    Ok(Json(ApiResponse::success_with_message(
        agency,
        "Agencia creada exitosamente".to_string(),
    )))
}

async fn get_agency(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Agency>, AppError> {
    let controller = AgencyController::new(state.pool.clone());
    let agency = controller.get(id).await?;
    Ok(Json(agency))
}

async fn list_agencies(
    State(state): State<AppState>,
) -> Result<Json<Vec<Agency>>, AppError> {
    let controller = AgencyController::new(state.pool.clone());
    let agencies = controller.list().await?;
    Ok(Json(agencies))
}

async fn update_agency(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateAgencyRequest>,
) -> Result<Json<ApiResponse<Agency>>, AppError> {
    user.require_admin()?;
    let controller = AgencyController::new(state.pool.clone());
    let agency = controller.update(id, request).await?;
    Ok(Json(ApiResponse::success_with_message(
        agency,
        "Agencia actualizada exitosamente".to_string(),
    )))
}

async fn delete_agency(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    user.require_admin()?;
    let controller = AgencyController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Agencia eliminada exitosamente"
    })))
}
