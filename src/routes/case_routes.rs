//! Rutas de casos
//!
//! Endpoints del ciclo de vida: creación, detalle con resumen, búsqueda,
//! intake, pagos, cargos, liberación, override de estado y auditoría.

use axum::{
    extract::{Path, Query, State},
    routing::{get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::case_controller::CaseController;
use crate::controllers::ledger_controller::LedgerController;
use crate::dto::case_dto::{
    CaseDetailResponse, CompleteIntakeRequest, CreateCaseRequest, PaymentResponse,
    RecordPaymentRequest, ReleaseRequest, ReleaseResponse, SearchCasesQuery, SearchCasesResponse,
    UpdateStatusRequest,
};
use crate::dto::ledger_dto::AddChargeRequest;
use crate::dto::ApiResponse;
use crate::middleware::auth::AuthUser;
use crate::models::audit::AuditLogEntry;
use crate::models::case::VehicleCase;
use crate::models::ledger::FeeLedgerEntry;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_case_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_case).get(search_cases))
        .route("/:id", get(get_case))
        .route("/:id/intake", post(complete_intake))
        .route("/:id/payment", post(record_payment))
        .route("/:id/charge", post(add_charge))
        .route("/:id/release", post(release_case))
        .route("/:id/status", put(update_status))
        .route("/:id/ledger", get(list_ledger))
        .route("/:id/audit", get(audit_trail))
}

async fn create_case(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<CreateCaseRequest>,
) -> Result<Json<ApiResponse<CaseDetailResponse>>, AppError> {
    let controller = CaseController::new(state.pool.clone(), state.config.clone());
    let response = controller.create(Some(user.id), request).await?;
    Ok(Json(ApiResponse::success_with_message(
        response,
        "Caso creado exitosamente".to_string(),
    )))
}

async fn get_case(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CaseDetailResponse>, AppError> {
    let controller = CaseController::new(state.pool.clone(), state.config.clone());
    let response = controller.get(id).await?;
    Ok(Json(response))
}

async fn search_cases(
    State(state): State<AppState>,
    Query(query): Query<SearchCasesQuery>,
) -> Result<Json<SearchCasesResponse>, AppError> {
    let controller = CaseController::new(state.pool.clone(), state.config.clone());
    let response = controller.search(query).await?;
    Ok(Json(response))
}

async fn complete_intake(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(request): Json<CompleteIntakeRequest>,
) -> Result<Json<ApiResponse<CaseDetailResponse>>, AppError> {
    let controller = CaseController::new(state.pool.clone(), state.config.clone());
    let response = controller.complete_intake(Some(user.id), id, request).await?;
    Ok(Json(ApiResponse::success_with_message(
        response,
        "Intake completado exitosamente".to_string(),
    )))
}

async fn record_payment(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(request): Json<RecordPaymentRequest>,
) -> Result<Json<ApiResponse<PaymentResponse>>, AppError> {
    let controller = CaseController::new(state.pool.clone(), state.config.clone());
    let response = controller.record_payment(Some(user.id), id, request).await?;
    Ok(Json(ApiResponse::success_with_message(
        response,
        "Pago registrado exitosamente".to_string(),
    )))
}

async fn add_charge(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(request): Json<AddChargeRequest>,
) -> Result<Json<ApiResponse<FeeLedgerEntry>>, AppError> {
    let controller = LedgerController::new(state.pool.clone());
    let entry = controller.add_charge(Some(user.id), id, request).await?;
    Ok(Json(ApiResponse::success_with_message(
        entry,
        "Cargo agregado exitosamente".to_string(),
    )))
}

async fn release_case(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(request): Json<ReleaseRequest>,
) -> Result<Json<ApiResponse<ReleaseResponse>>, AppError> {
    let controller = CaseController::new(state.pool.clone(), state.config.clone());
    let response = controller.release(Some(user.id), id, request).await?;
    Ok(Json(ApiResponse::success_with_message(
        response,
        "Vehículo liberado exitosamente".to_string(),
    )))
}

async fn update_status(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<ApiResponse<VehicleCase>>, AppError> {
    // Override administrativo: solo admins
    user.require_admin()?;
    let controller = CaseController::new(state.pool.clone(), state.config.clone());
    let case = controller.update_status(Some(user.id), id, request).await?;
    Ok(Json(ApiResponse::success_with_message(
        case,
        "Estado actualizado exitosamente".to_string(),
    )))
}

async fn list_ledger(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<FeeLedgerEntry>>, AppError> {
    let controller = CaseController::new(state.pool.clone(), state.config.clone());
    let entries = controller.list_ledger(id).await?;
    Ok(Json(entries))
}

async fn audit_trail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<AuditLogEntry>>, AppError> {
    let controller = CaseController::new(state.pool.clone(), state.config.clone());
    let entries = controller.audit_trail(id).await?;
    Ok(Json(entries))
}
