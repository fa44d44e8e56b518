//! Middleware del sistema
//! 
//! Este módulo contiene la autenticación por bearer token y la
//! configuración de CORS del backend simulado.

pub mod auth;
pub mod cors;

pub use auth::*;
pub use cors::*;
