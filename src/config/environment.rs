//! Configuración de variables de entorno
//! 
//! Este módulo maneja la configuración del entorno: URL del backend según
//! el modo (desarrollo / producción), timeouts, directorio de datos locales
//! y parámetros del backend simulado.

use std::env;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_DEV_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_PROD_BASE_URL: &str = "https://api.deliveryapp.com";
pub const DEFAULT_DEV_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_PROD_TIMEOUT_MS: u64 = 15_000;
/// Límite superior para las duraciones en horas (10 años)
pub const MAX_HOURS: i64 = 87_600;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be a valid number, got '{value}'")]
    InvalidNumber { name: &'static str, value: String },

    #[error("{name} must be between {min} and {max}, got {value}")]
    OutOfRange {
        name: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    #[error("ENVIRONMENT must be 'development' or 'production', got '{0}'")]
    InvalidEnvironment(String),
}

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_expiration_hours: i64,
    pub dev_base_url_primary: String,
    pub dev_base_url_secondary: Option<String>,
    pub prod_base_url: String,
    pub api_timeout_ms: u64,
    pub prod_api_timeout_ms: u64,
    pub data_dir: PathBuf,
    pub offline_ttl_hours: i64,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            host: "0.0.0.0".to_string(),
            port: 3000,
            jwt_secret: "driver-app-dev-secret-change-in-production".to_string(),
            jwt_expiration_hours: 24,
            dev_base_url_primary: DEFAULT_DEV_BASE_URL.to_string(),
            dev_base_url_secondary: None,
            prod_base_url: DEFAULT_PROD_BASE_URL.to_string(),
            api_timeout_ms: DEFAULT_DEV_TIMEOUT_MS,
            prod_api_timeout_ms: DEFAULT_PROD_TIMEOUT_MS,
            data_dir: PathBuf::from(".driver-app"),
            offline_ttl_hours: 24,
        }
    }
}

impl EnvironmentConfig {
    /// Cargar desde el entorno del proceso (llamar después de `dotenv()`)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Cargar usando una función de búsqueda; las variables ausentes
    /// conservan el valor por defecto
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(environment) = lookup("ENVIRONMENT") {
            let environment = environment.trim().to_lowercase();
            if environment != "development" && environment != "production" {
                return Err(ConfigError::InvalidEnvironment(environment));
            }
            config.environment = environment;
        }
        if let Some(host) = lookup("HOST") {
            config.host = host;
        }
        if let Some(port) = lookup("PORT") {
            config.port = parse_number("PORT", &port)?;
        }
        if let Some(secret) = lookup("JWT_SECRET") {
            config.jwt_secret = secret;
        }
        if let Some(hours) = lookup("JWT_EXPIRATION_HOURS") {
            config.jwt_expiration_hours = parse_hours("JWT_EXPIRATION_HOURS", &hours)?;
        }
        if let Some(url) = lookup("DEV_BASE_URL_PRIMARY") {
            config.dev_base_url_primary = url;
        }
        config.dev_base_url_secondary = lookup("DEV_BASE_URL_SECONDARY");
        if let Some(url) = lookup("PROD_BASE_URL") {
            config.prod_base_url = url;
        }
        if let Some(timeout) = lookup("API_TIMEOUT") {
            config.api_timeout_ms = parse_timeout("API_TIMEOUT", &timeout, DEFAULT_DEV_TIMEOUT_MS)?;
        }
        if let Some(timeout) = lookup("PROD_API_TIMEOUT") {
            config.prod_api_timeout_ms =
                parse_timeout("PROD_API_TIMEOUT", &timeout, DEFAULT_PROD_TIMEOUT_MS)?;
        }
        if let Some(dir) = lookup("DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(hours) = lookup("OFFLINE_TTL_HOURS") {
            config.offline_ttl_hours = parse_hours("OFFLINE_TTL_HOURS", &hours)?;
        }

        Ok(config)
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// URL base del backend para el modo actual
    pub fn api_base_url(&self) -> &str {
        if self.is_production() {
            &self.prod_base_url
        } else {
            &self.dev_base_url_primary
        }
    }

    /// URL alternativa del backend; solo existe en desarrollo
    pub fn fallback_base_url(&self) -> Option<&str> {
        if self.is_production() {
            return None;
        }
        self.dev_base_url_secondary
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Timeout de las peticiones para el modo actual
    pub fn api_timeout(&self) -> Duration {
        if self.is_production() {
            Duration::from_millis(self.prod_api_timeout_ms)
        } else {
            Duration::from_millis(self.api_timeout_ms)
        }
    }

    /// Obtener la dirección del backend simulado
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_number<T: std::str::FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidNumber {
        name,
        value: value.to_string(),
    })
}

/// Horas entre 1 y `MAX_HOURS`
fn parse_hours(name: &'static str, value: &str) -> Result<i64, ConfigError> {
    let hours: i64 = parse_number(name, value)?;
    if !(1..=MAX_HOURS).contains(&hours) {
        return Err(ConfigError::OutOfRange {
            name,
            value: hours,
            min: 1,
            max: MAX_HOURS,
        });
    }
    Ok(hours)
}

/// Un timeout de 0 ms vuelve al valor por defecto
fn parse_timeout(name: &'static str, value: &str, default: u64) -> Result<u64, ConfigError> {
    let millis: u64 = parse_number(name, value)?;
    Ok(if millis == 0 { default } else { millis })
}
