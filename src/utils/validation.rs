//! Utilidades de validación
//! 
//! Validadores personalizados para `validator`.

use validator::ValidationError;

use super::cnpj::is_valid_cnpj;

/// Validar que el CNPJ tenga 14 dígitos
pub fn validate_cnpj(value: &str) -> Result<(), ValidationError> {
    if !is_valid_cnpj(value) {
        let mut error = ValidationError::new("cnpj");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"XX.XXX.XXX/XXXX-XX".to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar que un string no esté vacío
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_empty");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_cnpj() {
        assert!(validate_cnpj("12.345.678/0001-90").is_ok());
        let error = validate_cnpj("123").unwrap_err();
        assert_eq!(error.code, "cnpj");
    }

    #[test]
    fn test_validate_not_empty() {
        assert!(validate_not_empty("PIX").is_ok());
        assert!(validate_not_empty("   ").is_err());
    }
}
