//! Middleware de autenticación JWT
//! 
//! Este módulo extrae el bearer token, lo valida y resuelve la sesión
//! activa del motorista.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use tracing::debug;

use crate::models::User;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Motorista autenticado que se inyecta en los handlers
#[derive(Debug, Clone)]
pub struct AuthenticatedDriver {
    pub user: User,
    pub token: String,
}

/// Extraer el token del header `Authorization: Bearer <token>`
pub fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

#[axum::async_trait]
impl FromRequestParts<AppState> for AuthenticatedDriver {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)
            .ok_or_else(|| AppError::Unauthorized("Token de autorização requerido".to_string()))?
            .to_string();

        let claims = state.jwt.validate_token(&token).map_err(AppError::Jwt)?;

        let session = state
            .get_session(&token)
            .await
            .ok_or_else(|| AppError::Unauthorized("Sessão expirada ou encerrada".to_string()))?;

        if session.user.id.to_string() != claims.sub {
            return Err(AppError::Unauthorized("Token inválido".to_string()));
        }

        debug!("🔑 Motorista autenticado: {}", session.user.email);
        Ok(Self {
            user: session.user,
            token,
        })
    }
}
