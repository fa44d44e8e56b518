use chrono::Utc;
use tracing::info;

use crate::dto::StatusResponse;
use crate::models::{EarningsData, HistoryPeriod, NotificationSettings, Route, User};
use crate::services::history::earnings_for;
use crate::state::AppState;
use crate::utils::errors::{bad_request_error, AppError};

/// Historial, ganancias y notificaciones del motorista
pub struct AccountController {
    state: AppState,
}

impl AccountController {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub async fn history(&self, period: HistoryPeriod) -> Vec<Route> {
        let today = Utc::now().date_naive();
        let book = self.state.routes.read().await;
        book.history(period, today).into_iter().cloned().collect()
    }

    pub async fn earnings(&self, user: &User) -> EarningsData {
        let today = Utc::now().date_naive();
        let book = self.state.routes.read().await;
        earnings_for(user, book.routes(), today)
    }

    pub async fn register_push_token(
        &self,
        user: &User,
        push_token: &str,
    ) -> Result<StatusResponse, AppError> {
        if push_token.trim().is_empty() {
            return Err(bad_request_error("pushToken obrigatório"));
        }
        self.state
            .push_tokens
            .write()
            .await
            .insert(user.id, push_token.trim().to_string());
        info!("🔔 Push token registrado para {}", user.email);
        Ok(StatusResponse::ok("Token registrado"))
    }

    pub async fn update_notification_settings(
        &self,
        user: &User,
        settings: NotificationSettings,
    ) -> NotificationSettings {
        self.state
            .notification_settings
            .write()
            .await
            .insert(user.id, settings);
        info!("🔔 Preferências de notificação atualizadas para {}", user.email);
        settings
    }
}
