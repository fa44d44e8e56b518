//! Cache
//! 
//! Este módulo contiene el almacenamiento local clave-valor (sesión, token,
//! preferencias) y el cache offline con expiración.

pub mod cache_config;
pub mod local_store;
pub mod offline_cache;

pub use cache_config::*;
pub use local_store::*;
pub use offline_cache::*;
