//! Configuración de cache
//! 
//! Este módulo contiene la configuración y las claves del almacenamiento local.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::config::EnvironmentConfig;

/// Clave del usuario de la sesión
pub const USER_KEY: &str = "user";
/// Clave del token de acceso del backend
pub const AUTH_TOKEN_KEY: &str = "auth_token";
/// Clave de las preferencias de notificación
pub const NOTIFICATION_SETTINGS_KEY: &str = "notification_settings";
/// Prefijo de las entradas del cache offline
pub const OFFLINE_PREFIX: &str = "offline_";

/// Configuración del cache
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    pub data_dir: PathBuf,
    pub store_file: String,
    pub offline_ttl_hours: i64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".driver-app"),
            store_file: "storage.json".to_string(),
            offline_ttl_hours: 24, // 24 horas
        }
    }
}

impl CacheConfig {
    pub fn from_environment(config: &EnvironmentConfig) -> Self {
        Self {
            data_dir: config.data_dir.clone(),
            offline_ttl_hours: config.offline_ttl_hours,
            ..Self::default()
        }
    }

    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join(&self.store_file)
    }
}
