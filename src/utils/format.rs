//! Formato de valores para las pantallas
//! 
//! Moneda, fechas en pt-BR, porcentajes y los enlaces que la app le pide
//! abrir a la plataforma (mapas, teléfono, soporte).

use chrono::{Datelike, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};

pub const SUPPORT_WHATSAPP_URL: &str = "https://wa.me/5511999999999";
pub const SUPPORT_EMAIL_URL: &str = "mailto:suporte@deliveryapp.com";

const WEEKDAYS: [&str; 7] = ["Dom", "Seg", "Ter", "Qua", "Qui", "Sex", "Sáb"];

/// `R$ 120.50`
pub fn format_currency(value: Decimal) -> String {
    format!("R$ {:.2}", round_half_up(value, 2))
}

/// Valor en reales enteros, como el promedio por entrega del historial
pub fn format_currency_whole(value: Decimal) -> String {
    format!("R$ {}", round_half_up(value, 0))
}

/// Redondeo "hacia arriba" en el punto medio (como `Math.round`)
pub fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// `26/05/2024`
pub fn format_date_br(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Abreviatura del día de la semana en portugués
pub fn weekday_abbrev(date: NaiveDate) -> &'static str {
    WEEKDAYS[date.weekday().num_days_from_sunday() as usize]
}

/// `round(part / total * 100)` con aritmética entera; 0 cuando `total` es 0
pub fn rounded_percentage(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((part * 200 + total) / (2 * total)) as u32
}

/// Promedio entero redondeado; 0 cuando `count` es 0
pub fn rounded_average(sum: usize, count: usize) -> u32 {
    if count == 0 {
        return 0;
    }
    ((sum * 2 + count) / (2 * count)) as u32
}

/// Solo los dígitos del teléfono
pub fn phone_digits(phone: &str) -> String {
    phone.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// URI para el marcador telefónico
pub fn tel_uri(phone: &str) -> String {
    format!("tel:{}", phone_digits(phone))
}

/// URL de navegación de Google Maps hacia una dirección
pub fn maps_url(address: &str) -> String {
    format!("https://maps.google.com/maps?daddr={}", urlencoding::encode(address))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency() {
        assert_eq!(format_currency(Decimal::new(12050, 2)), "R$ 120.50");
        assert_eq!(format_currency(Decimal::new(43, 0)), "R$ 43.00");
        assert_eq!(format_currency_whole(Decimal::new(8975, 2)), "R$ 90");
    }

    #[test]
    fn test_dates() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 26).unwrap();
        assert_eq!(format_date_br(date), "26/05/2024");
        assert_eq!(weekday_abbrev(date), "Dom");

        let saturday = NaiveDate::from_ymd_opt(2024, 5, 25).unwrap();
        assert_eq!(weekday_abbrev(saturday), "Sáb");
    }

    #[test]
    fn test_rounded_percentage() {
        assert_eq!(rounded_percentage(0, 3), 0);
        assert_eq!(rounded_percentage(2, 4), 50);
        assert_eq!(rounded_percentage(1, 3), 33);
        assert_eq!(rounded_percentage(2, 3), 67);
        assert_eq!(rounded_percentage(1, 8), 13);
        assert_eq!(rounded_percentage(5, 0), 0);
    }

    #[test]
    fn test_rounded_average() {
        assert_eq!(rounded_average(3, 2), 2);
        assert_eq!(rounded_average(4, 3), 1);
        assert_eq!(rounded_average(0, 0), 0);
    }

    #[test]
    fn test_links() {
        assert_eq!(tel_uri("(11) 1111-1111"), "tel:1111111111");
        assert_eq!(
            maps_url("Rua das Flores, 123 - Centro"),
            "https://maps.google.com/maps?daddr=Rua%20das%20Flores%2C%20123%20-%20Centro"
        );
    }
}
