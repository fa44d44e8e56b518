//! Shared application state
//!
//! Este módulo define el estado compartido del backend simulado que se pasa
//! a través del router de Axum.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::config::environment::EnvironmentConfig;
use crate::models::{NotificationSettings, User};
use crate::services::jwt_service::JwtService;
use crate::services::route_book::RouteBook;
use crate::services::session::MockAuthenticator;

/// Sesión emitida en `POST /auth/login`
#[derive(Clone, Debug)]
pub struct ActiveSession {
    pub user: User,
    pub expires_at: DateTime<Utc>,
}

impl ActiveSession {
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub jwt: Arc<JwtService>,
    pub authenticator: Arc<MockAuthenticator>,
    pub routes: Arc<RwLock<RouteBook>>,
    pub sessions: Arc<RwLock<HashMap<String, ActiveSession>>>,
    pub notification_settings: Arc<RwLock<HashMap<i64, NotificationSettings>>>,
    pub push_tokens: Arc<RwLock<HashMap<i64, String>>>,
}

impl AppState {
    pub fn new(config: EnvironmentConfig, authenticator: MockAuthenticator, routes: RouteBook) -> Self {
        Self {
            jwt: Arc::new(JwtService::from_config(&config)),
            config,
            authenticator: Arc::new(authenticator),
            routes: Arc::new(RwLock::new(routes)),
            sessions: Arc::new(RwLock::new(HashMap::new())),
            notification_settings: Arc::new(RwLock::new(HashMap::new())),
            push_tokens: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Estado con las empresas y roteiros de ejemplo
    pub fn seeded(config: EnvironmentConfig) -> Self {
        Self::new(config, MockAuthenticator::seeded(), RouteBook::seeded())
    }

    pub async fn store_session(&self, token: String, session: ActiveSession) {
        info!("💾 Sesión almacenada para {}", session.user.email);
        self.sessions.write().await.insert(token, session);
    }

    /// Sesión vigente para un token; las expiradas se descartan
    pub async fn get_session(&self, token: &str) -> Option<ActiveSession> {
        let session = self.sessions.read().await.get(token).cloned()?;
        if session.is_expired() {
            debug!("⏰ Sesión expirada para {}", session.user.email);
            self.revoke_session(token).await;
            return None;
        }
        Some(session)
    }

    pub async fn revoke_session(&self, token: &str) -> bool {
        self.sessions.write().await.remove(token).is_some()
    }

    /// Limpiar sesiones expiradas
    pub async fn cleanup_expired_sessions(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired());
        let removed = before - sessions.len();
        if removed > 0 {
            info!("🧹 {} sesiones expiradas eliminadas", removed);
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::MOCK_USER;

    #[tokio::test]
    async fn test_expired_sessions_are_not_returned() {
        let state = AppState::seeded(EnvironmentConfig::default());
        state
            .store_session(
                "vigente".to_string(),
                ActiveSession {
                    user: MOCK_USER.clone(),
                    expires_at: Utc::now() + chrono::Duration::hours(1),
                },
            )
            .await;
        state
            .store_session(
                "vencida".to_string(),
                ActiveSession {
                    user: MOCK_USER.clone(),
                    expires_at: Utc::now() - chrono::Duration::hours(1),
                },
            )
            .await;

        assert!(state.get_session("vigente").await.is_some());
        assert!(state.get_session("vencida").await.is_none());
        assert_eq!(state.cleanup_expired_sessions().await, 0);
        assert!(state.revoke_session("vigente").await);
        assert!(state.get_session("vigente").await.is_none());
    }
}
