use axum::{
    extract::{Query, State},
    routing::{get, post, put},
    Json, Router,
};

use crate::controllers::account_controller::AccountController;
use crate::dto::{HistoryQuery, PushTokenRequest, StatusResponse};
use crate::middleware::AuthenticatedDriver;
use crate::models::{EarningsData, NotificationSettings, Route};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_account_router() -> Router<AppState> {
    Router::new()
        .route("/history", get(history))
        .route("/earnings", get(earnings))
        .route("/notifications/register", post(register_push_token))
        .route("/notifications/settings", put(update_notification_settings))
}

async fn history(
    State(state): State<AppState>,
    _driver: AuthenticatedDriver,
    Query(query): Query<HistoryQuery>,
) -> Json<Vec<Route>> {
    let period = query.period.unwrap_or_default();
    Json(AccountController::new(state).history(period).await)
}

async fn earnings(State(state): State<AppState>, driver: AuthenticatedDriver) -> Json<EarningsData> {
    Json(AccountController::new(state).earnings(&driver.user).await)
}

async fn register_push_token(
    State(state): State<AppState>,
    driver: AuthenticatedDriver,
    Json(request): Json<PushTokenRequest>,
) -> Result<Json<StatusResponse>, AppError> {
    let response = AccountController::new(state)
        .register_push_token(&driver.user, &request.push_token)
        .await?;
    Ok(Json(response))
}

async fn update_notification_settings(
    State(state): State<AppState>,
    driver: AuthenticatedDriver,
    Json(settings): Json<NotificationSettings>,
) -> Json<NotificationSettings> {
    Json(
        AccountController::new(state)
            .update_notification_settings(&driver.user, settings)
            .await,
    )
}
