use axum::{
    extract::{Multipart, Path, State},
    routing::{get, post, put},
    Json, Router,
};

use crate::controllers::delivery_controller::DeliveryController;
use crate::controllers::route_controller::RouteController;
use crate::dto::UploadResponse;
use crate::middleware::AuthenticatedDriver;
use crate::models::{Delivery, EvidenceKind, Route, UpdateDeliveryData};
use crate::state::AppState;
use crate::utils::errors::{bad_request_error, AppError};

pub fn create_route_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_routes))
        .route("/:id", get(get_route))
        .route("/:id/start", put(start_route))
        .route("/:id/finish", put(finish_route))
}

pub fn create_delivery_router() -> Router<AppState> {
    Router::new()
        .route("/:id", get(get_delivery).put(update_delivery))
        .route("/:id/evidence", post(upload_evidence))
}

async fn list_routes(State(state): State<AppState>, _driver: AuthenticatedDriver) -> Json<Vec<Route>> {
    Json(RouteController::new(state).list().await)
}

async fn get_route(
    State(state): State<AppState>,
    _driver: AuthenticatedDriver,
    Path(id): Path<i64>,
) -> Result<Json<Route>, AppError> {
    Ok(Json(RouteController::new(state).get(id).await?))
}

async fn start_route(
    State(state): State<AppState>,
    _driver: AuthenticatedDriver,
    Path(id): Path<i64>,
) -> Result<Json<Route>, AppError> {
    Ok(Json(RouteController::new(state).start(id).await?))
}

async fn finish_route(
    State(state): State<AppState>,
    _driver: AuthenticatedDriver,
    Path(id): Path<i64>,
) -> Result<Json<Route>, AppError> {
    Ok(Json(RouteController::new(state).finish(id).await?))
}

async fn get_delivery(
    State(state): State<AppState>,
    _driver: AuthenticatedDriver,
    Path(id): Path<i64>,
) -> Result<Json<Delivery>, AppError> {
    Ok(Json(DeliveryController::new(state).get(id).await?))
}

async fn update_delivery(
    State(state): State<AppState>,
    _driver: AuthenticatedDriver,
    Path(id): Path<i64>,
    Json(data): Json<UpdateDeliveryData>,
) -> Result<Json<Delivery>, AppError> {
    Ok(Json(DeliveryController::new(state).update(id, data).await?))
}

/// Multipart con los campos `file`, `type` y `description`
async fn upload_evidence(
    State(state): State<AppState>,
    _driver: AuthenticatedDriver,
    Path(id): Path<i64>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let mut kind = EvidenceKind::Photo;
    let mut description = None;
    let mut file_name = None;
    let mut size = 0;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| bad_request_error(&e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                file_name = field.file_name().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| bad_request_error(&e.to_string()))?;
                size = bytes.len();
            }
            "type" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| bad_request_error(&e.to_string()))?;
                kind = EvidenceKind::parse(&value)
                    .ok_or_else(|| bad_request_error(&format!("Tipo de evidência desconhecido: {}", value)))?;
            }
            "description" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| bad_request_error(&e.to_string()))?;
                description = Some(value).filter(|v| !v.trim().is_empty());
            }
            _ => {}
        }
    }

    let response = DeliveryController::new(state)
        .upload_evidence(id, kind, description, file_name, size)
        .await?;
    Ok(Json(response))
}
