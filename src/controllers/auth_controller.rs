use tracing::{info, warn};
use validator::Validate;

use crate::dto::{LoginResponse, StatusResponse};
use crate::middleware::AuthenticatedDriver;
use crate::models::{LoginCredentials, User};
use crate::services::session::{AuthError, Authenticator};
use crate::state::{ActiveSession, AppState};
use crate::utils::cnpj::is_valid_cnpj;
use crate::utils::errors::AppError;

pub struct AuthController {
    state: AppState,
}

impl AuthController {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Valida las credenciales contra las empresas registradas y emite un token
    pub async fn login(&self, credentials: LoginCredentials) -> Result<LoginResponse, AppError> {
        if credentials.has_blank_fields() {
            return Err(AppError::BadRequest(AuthError::MissingFields.user_message().to_string()));
        }
        if !is_valid_cnpj(&credentials.cnpj) {
            return Err(AppError::Unprocessable(AuthError::InvalidCnpj.user_message().to_string()));
        }
        credentials.validate()?;

        let user = self
            .state
            .authenticator
            .authenticate(&credentials)
            .await
            .map_err(|e| {
                warn!("🔒 Login rechazado para {}: {}", credentials.email, e);
                AppError::Unauthorized(e.user_message().to_string())
            })?;

        let (access_token, expires_at) = self
            .state
            .jwt
            .generate_access_token(&user)
            .map_err(AppError::Internal)?;

        self.state
            .store_session(
                access_token.clone(),
                ActiveSession {
                    user: user.clone(),
                    expires_at,
                },
            )
            .await;

        info!("✅ Token emitido para {} (expira {})", user.email, expires_at);
        Ok(LoginResponse { user, access_token })
    }

    pub async fn logout(&self, driver: &AuthenticatedDriver) -> StatusResponse {
        self.state.revoke_session(&driver.token).await;
        info!("👋 Sesión cerrada para {}", driver.user.email);
        StatusResponse::ok("Logout realizado")
    }

    pub fn profile(&self, driver: &AuthenticatedDriver) -> User {
        driver.user.clone()
    }
}
