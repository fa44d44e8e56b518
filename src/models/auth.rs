use serde::{Deserialize, Serialize};

/// Claims del JWT emitido por el backend simulado
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverClaims {
    pub sub: String, // user_id
    pub email: String,
    pub company_cnpj: Option<String>,
    pub exp: i64, // expiration timestamp
    pub iat: i64, // issued at timestamp
}
