use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::config::EnvironmentConfig;
use crate::models::{DriverClaims, User};

/// Servicio JWT del backend simulado
pub struct JwtService {
    algorithm: Algorithm,
    access_token_duration: Duration,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtService {
    pub fn new(secret: &str, access_token_duration: Duration) -> Self {
        Self {
            algorithm: Algorithm::HS256,
            access_token_duration,
            encoding_key: EncodingKey::from_secret(secret.as_ref()),
            decoding_key: DecodingKey::from_secret(secret.as_ref()),
        }
    }

    pub fn from_config(config: &EnvironmentConfig) -> Self {
        Self::new(&config.jwt_secret, Duration::hours(config.jwt_expiration_hours))
    }

    /// Genera un token de acceso y su expiración
    pub fn generate_access_token(&self, user: &User) -> Result<(String, DateTime<Utc>), String> {
        let now = Utc::now();
        let expires_at = now + self.access_token_duration;

        let claims = DriverClaims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            company_cnpj: user.company_cnpj.clone(),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map(|token| (token, expires_at))
            .map_err(|e| format!("Error generating access token: {}", e))
    }

    /// Valida y decodifica un token
    pub fn validate_token(&self, token: &str) -> Result<DriverClaims, String> {
        let validation = Validation::new(self.algorithm);

        decode::<DriverClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| format!("Invalid token: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::MOCK_USER;

    #[test]
    fn test_generate_and_validate() {
        let service = JwtService::new("test-secret", Duration::hours(24));
        let (token, expires_at) = service.generate_access_token(&MOCK_USER).unwrap();
        assert!(expires_at > Utc::now());

        let claims = service.validate_token(&token).unwrap();
        assert_eq!(claims.sub, "1");
        assert_eq!(claims.email, "joao@exemplo.com");
    }

    #[test]
    fn test_token_from_other_secret_is_rejected() {
        let issuer = JwtService::new("secret-a", Duration::hours(1));
        let verifier = JwtService::new("secret-b", Duration::hours(1));
        let (token, _) = issuer.generate_access_token(&MOCK_USER).unwrap();
        assert!(verifier.validate_token(&token).is_err());
        assert!(verifier.validate_token("not-a-jwt").is_err());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let service = JwtService::new("test-secret", Duration::hours(-2));
        let (token, _) = service.generate_access_token(&MOCK_USER).unwrap();
        assert!(service.validate_token(&token).is_err());
    }
}
