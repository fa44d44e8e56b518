//! Driver App
//!
//! Núcleo de la aplicación del motorista: sesión por empresa (CNPJ),
//! roteiros y entregas, finalización con evidencias, historial y perfil.
//! Incluye el cliente REST y un backend simulado que sirve el mismo contrato.

pub mod cache;
pub mod client;
pub mod config;
pub mod controllers;
pub mod data;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
pub mod views;

pub use client::{ApiClient, ClientError};
pub use config::EnvironmentConfig;
pub use routes::create_api_router;
pub use state::AppState;
