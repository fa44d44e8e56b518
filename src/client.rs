//! Cliente HTTP del backend de entregas
//!
//! Este módulo contiene el cliente REST usado por la aplicación del
//! motorista: autenticación con bearer token, roteiros, entregas, evidencias,
//! historial, notificaciones y el cache offline de respuestas.

use async_trait::async_trait;
use reqwest::{multipart, Client, Method, RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::cache::{CacheConfig, KeyValueStore, OfflineCache, StorageError, AUTH_TOKEN_KEY};
use crate::config::EnvironmentConfig;
use crate::dto::{EvidenceFile, HealthResponse, LoginResponse, PushTokenRequest, UploadResponse};
use crate::models::{
    Delivery, EarningsData, EvidenceKind, HistoryPeriod, LoginCredentials, NotificationSettings,
    Route, UpdateDeliveryData, User,
};
use crate::services::delivery_draft::{DeliverySink, FinalizedDelivery, SubmitError};
use crate::services::session::{AuthError, Authenticator};

/// Timeout de la verificación de conectividad
pub const CONNECTION_CHECK_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid response body: {0}")]
    Decode(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Cannot read evidence file: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Http { status: 401, .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Http { status: 404, .. })
    }
}

/// Cuerpo de error devuelto por el backend
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

/// Cliente REST con token persistido en el almacenamiento local
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    store: Arc<dyn KeyValueStore>,
    offline: OfflineCache,
}

impl ApiClient {
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        store: Arc<dyn KeyValueStore>,
        offline: OfflineCache,
    ) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("driver-app/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            store,
            offline,
        })
    }

    pub fn from_config(
        config: &EnvironmentConfig,
        store: Arc<dyn KeyValueStore>,
    ) -> Result<Self, ClientError> {
        let offline = OfflineCache::from_config(store.clone(), &CacheConfig::from_environment(config));
        Self::new(config.api_base_url(), config.api_timeout(), store, offline)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn auth_token(&self) -> Result<Option<String>, ClientError> {
        Ok(self.store.get_item(AUTH_TOKEN_KEY).await?)
    }

    async fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ClientError> {
        let mut builder = self
            .client
            .request(method, self.url(path))
            .header("Content-Type", "application/json");
        if let Some(token) = self.auth_token().await? {
            builder = builder.bearer_auth(token);
        }
        Ok(builder)
    }

    /// Ejecuta la petición y decodifica la respuesta JSON
    async fn execute<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ClientError> {
        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.message.or(b.error))
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("error").to_string());
            warn!("⚠️ Backend respondió {}: {}", status, message);
            return Err(ClientError::Http {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            error!("❌ Respuesta inválida del backend: {}", e);
            ClientError::Decode(e.to_string())
        })
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let builder = self.request(Method::GET, path).await?;
        self.execute(builder).await
    }

    async fn send_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let builder = self.request(method, path).await?.json(body);
        self.execute(builder).await
    }

    // ----- Autenticación -----

    pub async fn login(&self, credentials: &LoginCredentials) -> Result<LoginResponse, ClientError> {
        info!("🔐 Login remoto para {}", credentials.email);
        let response: LoginResponse = self
            .send_json(Method::POST, "/auth/login", credentials)
            .await?;
        self.store
            .set_item(AUTH_TOKEN_KEY, response.access_token.clone())
            .await?;
        info!("✅ Token almacenado para {}", response.user.email);
        Ok(response)
    }

    /// Cierra la sesión remota; el token local se elimina siempre
    pub async fn logout(&self) -> Result<(), ClientError> {
        let remote = match self.request(Method::POST, "/auth/logout").await {
            Ok(builder) => self.execute::<serde_json::Value>(builder).await.map(|_| ()),
            Err(e) => Err(e),
        };
        if let Err(e) = &remote {
            warn!("⚠️ Logout remoto falló: {}", e);
        }
        self.store.remove_item(AUTH_TOKEN_KEY).await?;
        info!("👋 Token local eliminado");
        remote
    }

    pub async fn get_profile(&self) -> Result<User, ClientError> {
        self.get("/auth/profile").await
    }

    // ----- Roteiros -----

    pub async fn get_routes(&self) -> Result<Vec<Route>, ClientError> {
        self.get("/routes").await
    }

    pub async fn get_route_details(&self, route_id: i64) -> Result<Route, ClientError> {
        self.get(&format!("/routes/{}", route_id)).await
    }

    pub async fn start_route(&self, route_id: i64) -> Result<Route, ClientError> {
        self.send_json(Method::PUT, &format!("/routes/{}/start", route_id), &serde_json::json!({}))
            .await
    }

    pub async fn finish_route(&self, route_id: i64) -> Result<Route, ClientError> {
        self.send_json(Method::PUT, &format!("/routes/{}/finish", route_id), &serde_json::json!({}))
            .await
    }

    // ----- Entregas -----

    pub async fn get_delivery_details(&self, delivery_id: i64) -> Result<Delivery, ClientError> {
        self.get(&format!("/deliveries/{}", delivery_id)).await
    }

    pub async fn update_delivery(
        &self,
        delivery_id: i64,
        data: &UpdateDeliveryData,
    ) -> Result<Delivery, ClientError> {
        self.send_json(Method::PUT, &format!("/deliveries/{}", delivery_id), data)
            .await
    }

    /// Sube un archivo de evidencia como multipart (`file`, `type`, `description`)
    pub async fn upload_evidence(
        &self,
        delivery_id: i64,
        file: &EvidenceFile,
        kind: EvidenceKind,
        description: Option<&str>,
    ) -> Result<UploadResponse, ClientError> {
        let bytes = tokio::fs::read(&file.path).await?;
        debug!("📎 Subiendo {} ({} bytes)", file.name, bytes.len());

        let part = multipart::Part::bytes(bytes)
            .file_name(file.name.clone())
            .mime_str(&file.mime_type)?;
        let mut form = multipart::Form::new()
            .part("file", part)
            .text("type", kind.as_str().to_string());
        if let Some(description) = description {
            form = form.text("description", description.to_string());
        }

        let mut builder = self
            .client
            .post(self.url(&format!("/deliveries/{}/evidence", delivery_id)))
            .multipart(form);
        if let Some(token) = self.auth_token().await? {
            builder = builder.bearer_auth(token);
        }
        self.execute(builder).await
    }

    // ----- Historial y ganancias -----

    pub async fn get_history(&self, period: Option<HistoryPeriod>) -> Result<Vec<Route>, ClientError> {
        match period {
            Some(period) => self.get(&format!("/history?period={}", period.as_str())).await,
            None => self.get("/history").await,
        }
    }

    pub async fn get_earnings(&self) -> Result<EarningsData, ClientError> {
        self.get("/earnings").await
    }

    // ----- Notificaciones -----

    pub async fn register_push_token(&self, push_token: &str) -> Result<(), ClientError> {
        let body = PushTokenRequest {
            push_token: push_token.to_string(),
        };
        self.send_json::<_, serde_json::Value>(Method::POST, "/notifications/register", &body)
            .await?;
        Ok(())
    }

    pub async fn update_notification_settings(
        &self,
        settings: &NotificationSettings,
    ) -> Result<NotificationSettings, ClientError> {
        self.send_json(Method::PUT, "/notifications/settings", settings)
            .await
    }

    // ----- Conectividad y cache offline -----

    /// `true` si `/health` responde con éxito en menos de 5 segundos
    pub async fn check_connection(&self) -> bool {
        let result = self
            .client
            .get(self.url("/health"))
            .timeout(CONNECTION_CHECK_TIMEOUT)
            .send()
            .await;
        match result {
            Ok(response) if response.status() == StatusCode::OK => {
                match response.json::<HealthResponse>().await {
                    Ok(health) => {
                        debug!("🩺 Backend disponible: {}", health.status);
                        true
                    }
                    Err(_) => true,
                }
            }
            Ok(response) => {
                warn!("⚠️ Health check devolvió {}", response.status());
                false
            }
            Err(e) => {
                warn!("📴 Sin conexión con {}: {}", self.base_url, e);
                false
            }
        }
    }

    pub async fn save_offline_data<T: Serialize>(&self, key: &str, data: &T) {
        self.offline.save(key, data).await
    }

    pub async fn get_offline_data<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.offline.get(key).await
    }

    /// Descarga los roteiros y los deja en el cache offline
    pub async fn sync_routes(&self) -> Result<Vec<Route>, ClientError> {
        let routes = self.get_routes().await?;
        self.save_offline_data("routes", &routes).await;
        info!("💾 {} roteiros guardados para uso offline", routes.len());
        Ok(routes)
    }

    /// Roteiros del backend o, sin conexión, del cache offline
    pub async fn routes_or_offline(&self) -> Result<Vec<Route>, ClientError> {
        match self.sync_routes().await {
            Ok(routes) => Ok(routes),
            Err(ClientError::Transport(e)) => {
                warn!("📴 Usando roteiros offline: {}", e);
                self.get_offline_data("routes")
                    .await
                    .ok_or(ClientError::Transport(e))
            }
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl Authenticator for ApiClient {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, AuthError> {
        match self.login(credentials).await {
            Ok(response) => Ok(response.user),
            Err(ClientError::Http { status: 401, .. }) => Err(AuthError::InvalidCredentials),
            Err(ClientError::Http { status: 422, .. }) => Err(AuthError::InvalidCnpj),
            Err(ClientError::Storage(e)) => Err(AuthError::Storage(e.to_string())),
            Err(e) => Err(AuthError::Remote(e.to_string())),
        }
    }
}

#[async_trait]
impl DeliverySink for ApiClient {
    async fn submit(&self, finalized: &FinalizedDelivery) -> Result<(), SubmitError> {
        self.update_delivery(finalized.delivery_id, &finalized.update)
            .await?;
        for photo in &finalized.photos {
            let path = photo.uri.strip_prefix("file://").unwrap_or(&photo.uri);
            let file = EvidenceFile::from_path(path);
            let uploaded = self
                .upload_evidence(finalized.delivery_id, &file, EvidenceKind::Photo, None)
                .await?;
            debug!("📷 Foto {} disponible en {}", photo.id, uploaded.url);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryStore;

    fn client(base_url: &str) -> (ApiClient, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let offline = OfflineCache::new(store.clone(), chrono::Duration::hours(24));
        let client = ApiClient::new(base_url, Duration::from_secs(1), store.clone(), offline).unwrap();
        (client, store)
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let (client, _) = client("http://localhost:3000/");
        assert_eq!(client.base_url(), "http://localhost:3000");
        assert_eq!(client.url("/routes"), "http://localhost:3000/routes");
    }

    #[tokio::test]
    async fn test_logout_removes_token_even_when_offline() {
        let (client, store) = client("http://127.0.0.1:9");
        store
            .set_item(AUTH_TOKEN_KEY, "stale-token".to_string())
            .await
            .unwrap();

        assert!(client.logout().await.is_err());
        assert_eq!(client.auth_token().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_check_connection_false_when_unreachable() {
        let (client, _) = client("http://127.0.0.1:9");
        assert!(!client.check_connection().await);
    }

    #[test]
    fn test_error_classification() {
        let unauthorized = ClientError::Http {
            status: 401,
            message: "Token inválido".to_string(),
        };
        assert!(unauthorized.is_unauthorized());
        assert!(!unauthorized.is_not_found());
    }
}
