//! Formulario de login

use std::fmt;

use crate::models::{LoginCredentials, User};
use crate::services::session::SessionService;
use crate::utils::cnpj::format_cnpj;

/// Formulario de login con los valores de demostración precargados
#[derive(Debug, Clone, PartialEq)]
pub struct LoginForm {
    cnpj: String,
    pub email: String,
    pub password: String,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self {
            cnpj: "12.345.678/0001-90".to_string(),
            email: "joao@exemplo.com".to_string(),
            password: "123456".to_string(),
        }
    }
}

impl LoginForm {
    pub fn empty() -> Self {
        Self {
            cnpj: String::new(),
            email: String::new(),
            password: String::new(),
        }
    }

    pub fn cnpj(&self) -> &str {
        &self.cnpj
    }

    /// Aplica la máscara a medida que se escribe
    pub fn set_cnpj(&mut self, input: &str) {
        self.cnpj = format_cnpj(input);
    }

    pub fn credentials(&self) -> LoginCredentials {
        LoginCredentials::new(self.cnpj.clone(), self.email.trim(), self.password.clone())
    }

    /// Envía el formulario; el error es el mensaje de la alerta
    pub async fn submit(&self, session: &mut SessionService) -> Result<User, String> {
        session
            .login(&self.credentials())
            .await
            .map_err(|e| e.user_message().to_string())
    }
}

impl fmt::Display for LoginForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "🚚 DeliveryApp")?;
        writeln!(f, "Sistema para Motoristas")?;
        writeln!(f)?;
        writeln!(f, "CNPJ da empresa: {}", self.cnpj)?;
        writeln!(f, "Email:           {}", self.email)?;
        write!(f, "Senha:           {}", "•".repeat(self.password.chars().count()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryStore;
    use crate::services::session::MockAuthenticator;
    use std::sync::Arc;

    fn session() -> SessionService {
        SessionService::new(Arc::new(MemoryStore::new()), Arc::new(MockAuthenticator::seeded()))
    }

    #[test]
    fn test_cnpj_is_masked_while_typing() {
        let mut form = LoginForm::empty();
        form.set_cnpj("123");
        assert_eq!(form.cnpj(), "12.3");
        form.set_cnpj("12345678000190");
        assert_eq!(form.cnpj(), "12.345.678/0001-90");
    }

    #[tokio::test]
    async fn test_prefilled_form_logs_in() {
        let mut session = session();
        let user = LoginForm::default().submit(&mut session).await.unwrap();
        assert_eq!(user.company_name.as_deref(), Some("Express Delivery Ltda"));
    }

    #[tokio::test]
    async fn test_submit_error_messages() {
        let mut session = session();

        let mut form = LoginForm::default();
        form.email.clear();
        assert_eq!(form.submit(&mut session).await.unwrap_err(), "Preencha todos os campos");

        let mut form = LoginForm::default();
        form.set_cnpj("1234");
        assert_eq!(
            form.submit(&mut session).await.unwrap_err(),
            "CNPJ inválido. Use o formato XX.XXX.XXX/XXXX-XX"
        );

        let mut form = LoginForm::default();
        form.password = "000000".to_string();
        assert_eq!(
            form.submit(&mut session).await.unwrap_err(),
            "CNPJ, email ou senha incorretos"
        );
    }
}
