//! Máscara y validación básica de CNPJ
//! 
//! El CNPJ tiene 14 dígitos y se muestra como `XX.XXX.XXX/XXXX-XX`. La
//! máscara se aplica de forma progresiva para poder usarla mientras el
//! motorista escribe.

use lazy_static::lazy_static;
use regex::Regex;

pub const CNPJ_DIGITS: usize = 14;

lazy_static! {
    static ref NON_DIGIT: Regex = Regex::new(r"[^0-9]").unwrap();
    static ref MASK_ROOT: Regex = Regex::new(r"^([0-9]{2})([0-9])").unwrap();
    static ref MASK_SECOND_BLOCK: Regex = Regex::new(r"^([0-9]{2})\.([0-9]{3})([0-9])").unwrap();
    static ref MASK_BRANCH: Regex = Regex::new(r"\.([0-9]{3})([0-9])").unwrap();
    static ref MASK_CHECK_DIGITS: Regex = Regex::new(r"([0-9]{4})([0-9])").unwrap();
}

/// Elimina todo lo que no sea dígito ASCII
pub fn clean_cnpj(value: &str) -> String {
    NON_DIGIT.replace_all(value, "").into_owned()
}

/// Aplica la máscara `XX.XXX.XXX/XXXX-XX`.
///
/// Con menos de 14 dígitos la máscara queda parcial; con más de 14 el
/// valor se devuelve sin cambios.
pub fn format_cnpj(value: &str) -> String {
    let numbers = clean_cnpj(value);
    if numbers.len() > CNPJ_DIGITS {
        return value.to_string();
    }

    let masked = MASK_ROOT.replace(&numbers, "${1}.${2}");
    let masked = MASK_SECOND_BLOCK.replace(&masked, "${1}.${2}.${3}");
    let masked = MASK_BRANCH.replace(&masked, ".${1}/${2}");
    let masked = MASK_CHECK_DIGITS.replace(&masked, "${1}-${2}");
    masked.into_owned()
}

/// Validación básica: exactamente 14 dígitos
pub fn is_valid_cnpj(value: &str) -> bool {
    clean_cnpj(value).len() == CNPJ_DIGITS
}

/// Compara dos CNPJ ignorando la máscara
pub fn same_cnpj(a: &str, b: &str) -> bool {
    clean_cnpj(a) == clean_cnpj(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_full_cnpj() {
        assert_eq!(format_cnpj("12345678000190"), "12.345.678/0001-90");
        assert_eq!(format_cnpj("98765432000110"), "98.765.432/0001-10");
    }

    #[test]
    fn test_format_is_idempotent() {
        let formatted = format_cnpj("12345678000190");
        assert_eq!(format_cnpj(&formatted), formatted);
        assert_eq!(format_cnpj("12.345.678/0001-90"), "12.345.678/0001-90");
    }

    #[test]
    fn test_partial_input_is_partially_masked() {
        assert_eq!(format_cnpj(""), "");
        assert_eq!(format_cnpj("1"), "1");
        assert_eq!(format_cnpj("123"), "12.3");
        assert_eq!(format_cnpj("123456"), "12.345.6");
        assert_eq!(format_cnpj("123456789"), "12.345.678/9");
        assert_eq!(format_cnpj("1234567800019"), "12.345.678/0001-9");
    }

    #[test]
    fn test_too_long_input_is_returned_unchanged() {
        assert_eq!(format_cnpj("123456780001901"), "123456780001901");
    }

    #[test]
    fn test_validation() {
        assert!(is_valid_cnpj("12.345.678/0001-90"));
        assert!(is_valid_cnpj("12345678000190"));
        assert!(!is_valid_cnpj("12.345.678/0001"));
        assert!(!is_valid_cnpj(""));
        assert!(same_cnpj("12.345.678/0001-90", "12345678000190"));
    }

    #[test]
    fn test_non_ascii_digits_are_not_cnpj_digits() {
        assert_eq!(clean_cnpj("١٢٣٤٥٦٧"), "");
        assert!(!is_valid_cnpj("١٢٣٤٥٦٧"));
        assert!(!is_valid_cnpj("１２３４５６７８０００１９０"));
        assert_eq!(format_cnpj("12٣45"), "12.45");
    }
}
