//! Rutas del backend simulado
//! 
//! Este módulo arma el router de Axum con el contrato REST consumido por
//! la aplicación del motorista.

pub mod account_routes;
pub mod auth_routes;
pub mod delivery_routes;

use axum::{routing::get, Json, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::dto::HealthResponse;
use crate::middleware::cors::cors_middleware;
use crate::state::AppState;

/// Router completo con estado, trazas y CORS
pub fn create_api_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/auth", auth_routes::create_auth_router())
        .nest("/routes", delivery_routes::create_route_router())
        .nest("/deliveries", delivery_routes::create_delivery_router())
        .merge(account_routes::create_account_router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_middleware()),
        )
        .with_state(state)
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}
