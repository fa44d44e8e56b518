use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};

use crate::controllers::auth_controller::AuthController;
use crate::dto::{LoginResponse, StatusResponse};
use crate::middleware::AuthenticatedDriver;
use crate::models::{LoginCredentials, User};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/profile", get(profile))
}

async fn login(
    State(state): State<AppState>,
    Json(credentials): Json<LoginCredentials>,
) -> Result<Json<LoginResponse>, AppError> {
    let controller = AuthController::new(state);
    let response = controller.login(credentials).await?;
    Ok(Json(response))
}

async fn logout(
    State(state): State<AppState>,
    driver: AuthenticatedDriver,
) -> Json<StatusResponse> {
    let controller = AuthController::new(state);
    Json(controller.logout(&driver).await)
}

async fn profile(State(state): State<AppState>, driver: AuthenticatedDriver) -> Json<User> {
    Json(AuthController::new(state).profile(&driver))
}
