//! Modelo de User
//! 
//! Este módulo contiene el struct User (motorista) y las credenciales de login.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::company::Company;

/// Motorista - se persiste como un único valor JSON bajo la clave `user`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub vehicle: String,
    pub plate: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_cnpj: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<i64>,
}

impl User {
    /// Copia los datos de exhibición de la empresa al usuario
    pub fn with_company(mut self, company: &Company) -> Self {
        self.company_name = Some(company.name.clone());
        self.company_cnpj = Some(company.cnpj.clone());
        self.tenant_id = Some(company.id);
        self
    }

    /// Iniciales para el avatar del perfil ("João Silva" -> "JS")
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }

    pub fn is_affiliated(&self) -> bool {
        self.company_name.is_some()
    }
}

/// Credenciales de login - el CNPJ es obligatorio
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginCredentials {
    #[validate(email)]
    pub email: String,

    #[validate(length(max = 100), custom = "crate::utils::validation::validate_not_empty")]
    pub password: String,

    #[validate(custom = "crate::utils::validation::validate_cnpj")]
    pub cnpj: String,
}

impl LoginCredentials {
    pub fn new(cnpj: impl Into<String>, email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            cnpj: cnpj.into(),
        }
    }

    /// Algún campo vacío (tras recortar espacios)
    pub fn has_blank_fields(&self) -> bool {
        self.cnpj.trim().is_empty() || self.email.trim().is_empty() || self.password.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: 1,
            name: "João Silva".to_string(),
            email: "joao@exemplo.com".to_string(),
            phone: "(11) 99999-9999".to_string(),
            vehicle: "Honda CG 160".to_string(),
            plate: "ABC-1234".to_string(),
            company_name: None,
            company_cnpj: None,
            tenant_id: None,
        }
    }

    #[test]
    fn test_initials() {
        assert_eq!(sample_user().initials(), "JS");

        let mut user = sample_user();
        user.name = "maria  dos santos".to_string();
        assert_eq!(user.initials(), "MDS");
    }

    #[test]
    fn test_serialization_uses_camel_case_and_skips_empty_company() {
        let json = serde_json::to_value(sample_user()).unwrap();
        assert_eq!(json["name"], "João Silva");
        assert!(json.get("companyName").is_none());

        let mut user = sample_user();
        user.company_cnpj = Some("12.345.678/0001-90".to_string());
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["companyCnpj"], "12.345.678/0001-90");
    }

    #[test]
    fn test_credentials_validation() {
        let valid = LoginCredentials::new("12.345.678/0001-90", "joao@exemplo.com", "123456");
        assert!(valid.validate().is_ok());
        assert!(!valid.has_blank_fields());

        let bad_cnpj = LoginCredentials::new("12.345", "joao@exemplo.com", "123456");
        assert!(bad_cnpj.validate().is_err());

        let blank = LoginCredentials::new("12.345.678/0001-90", "  ", "123456");
        assert!(blank.has_blank_fields());
    }
}
