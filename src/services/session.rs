//! Sesión del motorista
//! 
//! Resolución multi-empresa del login (CNPJ -> empresa -> motorista) y el
//! estado explícito de la sesión: se crea al arrancar el proceso, se llena
//! con `restore()` o `login()` y se vacía con `logout()`.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::cache::{read_json, write_json, KeyValueStore, USER_KEY};
use crate::data::{CompanyAccount, MOCK_COMPANIES, MOCK_PASSWORD};
use crate::models::{LoginCredentials, User};
use crate::utils::cnpj::{format_cnpj, is_valid_cnpj, same_cnpj};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum AuthError {
    #[error("missing login fields")]
    MissingFields,

    #[error("CNPJ must have 14 digits")]
    InvalidCnpj,

    #[error("no company registered for CNPJ {0}")]
    UnknownCompany(String),

    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("authentication service error: {0}")]
    Remote(String),

    #[error("session storage error: {0}")]
    Storage(String),
}

impl AuthError {
    /// Mensaje mostrado al motorista en la pantalla de login
    pub fn user_message(&self) -> &'static str {
        match self {
            AuthError::MissingFields => "Preencha todos os campos",
            AuthError::InvalidCnpj => "CNPJ inválido. Use o formato XX.XXX.XXX/XXXX-XX",
            AuthError::UnknownCompany(_) | AuthError::InvalidCredentials => {
                "CNPJ, email ou senha incorretos"
            }
            AuthError::Remote(_) | AuthError::Storage(_) => {
                "Falha no login. Verifique os dados e tente novamente."
            }
        }
    }
}

/// Servicio que valida credenciales y devuelve el motorista
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, AuthError>;
}

/// Autenticación contra las empresas simuladas y la contraseña fija
pub struct MockAuthenticator {
    accounts: Vec<CompanyAccount>,
    password: String,
}

impl MockAuthenticator {
    pub fn new(accounts: Vec<CompanyAccount>, password: impl Into<String>) -> Self {
        Self {
            accounts,
            password: password.into(),
        }
    }

    /// Empresas y contraseña del dataset simulado
    pub fn seeded() -> Self {
        Self::new(MOCK_COMPANIES.clone(), MOCK_PASSWORD)
    }

    /// Buscar empresa por CNPJ ignorando la máscara
    pub fn find_company(&self, cnpj: &str) -> Option<&CompanyAccount> {
        self.accounts
            .iter()
            .find(|account| same_cnpj(&account.company.cnpj, cnpj))
    }
}

impl Default for MockAuthenticator {
    fn default() -> Self {
        Self::seeded()
    }
}

#[async_trait]
impl Authenticator for MockAuthenticator {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, AuthError> {
        let account = self.find_company(&credentials.cnpj).ok_or_else(|| {
            info!("🏢 Empresa no encontrada para CNPJ: {}", credentials.cnpj);
            AuthError::UnknownCompany(format_cnpj(&credentials.cnpj))
        })?;

        let driver = account
            .drivers
            .iter()
            .find(|u| u.email == credentials.email && credentials.password == self.password)
            .ok_or_else(|| {
                info!("🔒 Usuario no encontrado o contraseña incorrecta");
                AuthError::InvalidCredentials
            })?;

        Ok(driver.clone().with_company(&account.company))
    }
}

/// A dónde debe ir la app al arrancar
#[derive(Debug, Clone, PartialEq)]
pub enum LaunchTarget {
    Home(User),
    Login,
}

/// Estado de la sesión del motorista
pub struct SessionService {
    store: Arc<dyn KeyValueStore>,
    authenticator: Arc<dyn Authenticator>,
    user: Option<User>,
}

impl SessionService {
    pub fn new(store: Arc<dyn KeyValueStore>, authenticator: Arc<dyn Authenticator>) -> Self {
        Self {
            store,
            authenticator,
            user: None,
        }
    }

    pub fn current_user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Recupera el usuario guardado. Cualquier fallo de lectura lleva al login.
    pub async fn restore(&mut self) -> LaunchTarget {
        match read_json::<User>(self.store.as_ref(), USER_KEY).await {
            Ok(Some(user)) => {
                info!("✅ Sesión restaurada para {}", user.email);
                self.user = Some(user.clone());
                LaunchTarget::Home(user)
            }
            Ok(None) => {
                self.user = None;
                LaunchTarget::Login
            }
            Err(e) => {
                error!("❌ Error al verificar usuario guardado: {}", e);
                self.user = None;
                LaunchTarget::Login
            }
        }
    }

    /// Resuelve empresa y motorista, persiste el usuario y lo deja en sesión
    pub async fn login(&mut self, credentials: &LoginCredentials) -> Result<User, AuthError> {
        if credentials.has_blank_fields() {
            return Err(AuthError::MissingFields);
        }
        if !is_valid_cnpj(&credentials.cnpj) {
            return Err(AuthError::InvalidCnpj);
        }

        let user = self.authenticator.authenticate(credentials).await?;

        write_json(self.store.as_ref(), USER_KEY, &user)
            .await
            .map_err(|e| {
                error!("❌ Error guardando la sesión: {}", e);
                AuthError::Storage(e.to_string())
            })?;

        info!(
            "✅ Login de {} en {}",
            user.email,
            user.company_name.as_deref().unwrap_or("-")
        );
        self.user = Some(user.clone());
        Ok(user)
    }

    /// Borra la clave de sesión; el estado en memoria se limpia siempre
    pub async fn logout(&mut self) -> Result<(), AuthError> {
        let previous = self.user.take();
        if let Err(e) = self.store.remove_item(USER_KEY).await {
            error!("❌ Error en logout: {}", e);
            return Err(AuthError::Storage(e.to_string()));
        }
        match previous {
            Some(user) => info!("👋 Logout de {}", user.email),
            None => warn!("⚠️ Logout sin sesión activa"),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryStore;

    fn session() -> (Arc<MemoryStore>, SessionService) {
        let store = Arc::new(MemoryStore::new());
        let service = SessionService::new(store.clone(), Arc::new(MockAuthenticator::seeded()));
        (store, service)
    }

    fn credentials(cnpj: &str, email: &str, password: &str) -> LoginCredentials {
        LoginCredentials::new(cnpj, email, password)
    }

    #[tokio::test]
    async fn test_login_succeeds_for_seeded_driver() {
        let (store, mut session) = session();
        let user = session
            .login(&credentials("12.345.678/0001-90", "joao@exemplo.com", "123456"))
            .await
            .unwrap();

        assert_eq!(user.name, "João Silva");
        assert_eq!(user.company_name.as_deref(), Some("Express Delivery Ltda"));
        assert_eq!(user.company_cnpj.as_deref(), Some("12.345.678/0001-90"));
        assert_eq!(session.current_user(), Some(&user));

        let stored: User = read_json(store.as_ref(), USER_KEY).await.unwrap().unwrap();
        assert_eq!(stored, user);
    }

    #[tokio::test]
    async fn test_login_accepts_unformatted_cnpj() {
        let (_, mut session) = session();
        let user = session
            .login(&credentials("12345678000190", "joao@exemplo.com", "123456"))
            .await
            .unwrap();
        assert_eq!(user.company_cnpj.as_deref(), Some("12.345.678/0001-90"));
    }

    #[tokio::test]
    async fn test_login_failures() {
        let (store, mut session) = session();

        let wrong_email = session
            .login(&credentials("12.345.678/0001-90", "maria@exemplo.com", "123456"))
            .await;
        assert_eq!(wrong_email, Err(AuthError::InvalidCredentials));

        let wrong_password = session
            .login(&credentials("12.345.678/0001-90", "joao@exemplo.com", "654321"))
            .await;
        assert_eq!(wrong_password, Err(AuthError::InvalidCredentials));

        let unknown_company = session
            .login(&credentials("11.111.111/0001-11", "joao@exemplo.com", "123456"))
            .await;
        assert!(matches!(unknown_company, Err(AuthError::UnknownCompany(_))));

        let short_cnpj = session
            .login(&credentials("12.345.678", "joao@exemplo.com", "123456"))
            .await;
        assert_eq!(short_cnpj, Err(AuthError::InvalidCnpj));

        let blank = session.login(&credentials("", "joao@exemplo.com", "123456")).await;
        assert_eq!(blank, Err(AuthError::MissingFields));

        assert!(!session.is_authenticated());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_second_company_driver_logs_in_with_own_cnpj() {
        let (_, mut session) = session();
        let user = session
            .login(&credentials("98.765.432/0001-10", "maria@exemplo.com", "123456"))
            .await
            .unwrap();
        assert_eq!(user.company_name.as_deref(), Some("Rápido Transportes S.A."));
    }

    #[tokio::test]
    async fn test_logout_clears_session_and_next_launch_goes_to_login() {
        let (store, mut session) = session();
        session
            .login(&credentials("12.345.678/0001-90", "joao@exemplo.com", "123456"))
            .await
            .unwrap();

        let mut relaunched = SessionService::new(store.clone(), Arc::new(MockAuthenticator::seeded()));
        assert!(matches!(relaunched.restore().await, LaunchTarget::Home(_)));

        session.logout().await.unwrap();
        assert!(store.get_item(USER_KEY).await.unwrap().is_none());
        assert!(session.current_user().is_none());

        let mut relaunched = SessionService::new(store, Arc::new(MockAuthenticator::seeded()));
        assert_eq!(relaunched.restore().await, LaunchTarget::Login);
    }

    #[tokio::test]
    async fn test_corrupted_session_goes_to_login() {
        let (store, mut session) = session();
        store.set_item(USER_KEY, "{broken".to_string()).await.unwrap();
        assert_eq!(session.restore().await, LaunchTarget::Login);
    }

    #[test]
    fn test_failure_messages_do_not_leak_which_field_failed() {
        assert_eq!(
            AuthError::UnknownCompany("x".to_string()).user_message(),
            AuthError::InvalidCredentials.user_message()
        );
    }
}
