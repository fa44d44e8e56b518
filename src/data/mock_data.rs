//! Dataset simulado: motoristas, empresas y roteiros.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use lazy_static::lazy_static;
use rust_decimal::Decimal;

use crate::models::{
    Company, CompanyNotifications, CompanySettings, Delivery, DeliveryStatus, PaymentMethod, Route,
    RouteStatus, User, WorkingHours,
};

/// Contraseña fija de los motoristas simulados
pub const MOCK_PASSWORD: &str = "123456";

/// Empresa con sus motoristas
#[derive(Debug, Clone, PartialEq)]
pub struct CompanyAccount {
    pub company: Company,
    pub drivers: Vec<User>,
}

lazy_static! {
    pub static ref MOCK_USER: User = User {
        id: 1,
        name: "João Silva".to_string(),
        email: "joao@exemplo.com".to_string(),
        phone: "(11) 99999-9999".to_string(),
        vehicle: "Honda CG 160".to_string(),
        plate: "ABC-1234".to_string(),
        company_name: None,
        company_cnpj: None,
        tenant_id: None,
    };

    pub static ref MOCK_COMPANIES: Vec<CompanyAccount> = seed_companies();

    pub static ref MOCK_ROUTES: Vec<Route> = seed_routes();
}

fn seed_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn seed_timestamp(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

fn brl(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

#[allow(clippy::too_many_arguments)]
fn delivery(
    id: i64,
    customer_name: &str,
    address: &str,
    phone: &str,
    value: Decimal,
    status: DeliveryStatus,
    items: &[&str],
    notes: &str,
    payment_method: PaymentMethod,
) -> Delivery {
    Delivery {
        id,
        customer_name: customer_name.to_string(),
        address: address.to_string(),
        phone: phone.to_string(),
        value,
        status,
        items: items.iter().map(|item| item.to_string()).collect(),
        notes: Some(notes.to_string()),
        payment_method,
        driver_notes: None,
        customer_id: None,
        delivered_at: None,
        estimated_time: None,
    }
}

fn default_settings() -> CompanySettings {
    CompanySettings {
        allowed_vehicle_types: vec!["moto".to_string(), "carro".to_string()],
        max_deliveries_per_route: 20,
        working_hours: WorkingHours {
            start: "08:00".to_string(),
            end: "18:00".to_string(),
        },
        payment_methods: vec![
            PaymentMethod::Dinheiro,
            PaymentMethod::Pix,
            PaymentMethod::Cartao,
            PaymentMethod::Debito,
        ],
        notifications: CompanyNotifications {
            new_route: true,
            delivery_updates: true,
            payments: true,
        },
    }
}

fn seed_companies() -> Vec<CompanyAccount> {
    let express = Company {
        id: 1,
        name: "Express Delivery Ltda".to_string(),
        cnpj: "12.345.678/0001-90".to_string(),
        logo: None,
        is_active: true,
        settings: Some(default_settings()),
        created_at: seed_timestamp(2024, 1, 15),
    };
    let rapido = Company {
        id: 2,
        name: "Rápido Transportes S.A.".to_string(),
        cnpj: "98.765.432/0001-10".to_string(),
        logo: None,
        is_active: true,
        settings: Some(default_settings()),
        created_at: seed_timestamp(2024, 2, 1),
    };

    let maria = User {
        id: 2,
        name: "Maria Santos".to_string(),
        email: "maria@exemplo.com".to_string(),
        phone: "(11) 88888-8888".to_string(),
        vehicle: "Yamaha Fazer 250".to_string(),
        plate: "XYZ-5678".to_string(),
        company_name: None,
        company_cnpj: None,
        tenant_id: None,
    };

    vec![
        CompanyAccount {
            drivers: vec![MOCK_USER.clone().with_company(&express)],
            company: express,
        },
        CompanyAccount {
            drivers: vec![maria.with_company(&rapido)],
            company: rapido,
        },
    ]
}

fn seed_routes() -> Vec<Route> {
    vec![
        Route {
            id: 1,
            date: seed_date(2024, 5, 26),
            status: RouteStatus::Ativo,
            total_value: brl(12050),
            deliveries: vec![
                delivery(
                    1,
                    "Restaurant do Zé",
                    "Rua das Flores, 123 - Centro",
                    "(11) 1111-1111",
                    brl(4530),
                    DeliveryStatus::Pendente,
                    &["Pizza Margherita", "Refrigerante 2L"],
                    "Entregar no balcão",
                    PaymentMethod::Dinheiro,
                ),
                delivery(
                    2,
                    "Padaria Central",
                    "Av. Principal, 456 - Vila Nova",
                    "(11) 2222-2222",
                    brl(3220),
                    DeliveryStatus::Pendente,
                    &["Pães diversos", "Doces"],
                    "Tocar campainha",
                    PaymentMethod::Pix,
                ),
                delivery(
                    3,
                    "Mercado Bom Preço",
                    "Rua do Comércio, 789 - Jardim",
                    "(11) 3333-3333",
                    brl(4300),
                    DeliveryStatus::Pendente,
                    &["Produtos diversos"],
                    "Entrada pelos fundos",
                    PaymentMethod::Cartao,
                ),
            ],
            driver_id: Some(1),
            company_id: Some(1),
            created_at: None,
            estimated_duration: None,
        },
        Route {
            id: 2,
            date: seed_date(2024, 5, 25),
            status: RouteStatus::Finalizado,
            total_value: brl(8975),
            deliveries: vec![delivery(
                4,
                "Farmácia Popular",
                "Rua da Saúde, 321 - Centro",
                "(11) 4444-4444",
                brl(8975),
                DeliveryStatus::Entregue,
                &["Medicamentos"],
                "Verificar receita",
                PaymentMethod::Dinheiro,
            )],
            driver_id: Some(1),
            company_id: Some(1),
            created_at: None,
            estimated_duration: None,
        },
    ]
}

/// Buscar roteiro por ID
pub fn get_route_by_id(routes: &[Route], id: i64) -> Option<&Route> {
    routes.iter().find(|route| route.id == id)
}

/// Buscar entrega por ID junto con su roteiro
pub fn get_delivery_by_id(routes: &[Route], delivery_id: i64) -> Option<(&Delivery, &Route)> {
    routes
        .iter()
        .find_map(|route| route.delivery(delivery_id).map(|delivery| (delivery, route)))
}

/// Obtener el roteiro activo
pub fn get_active_route(routes: &[Route]) -> Option<&Route> {
    routes.iter().find(|route| route.status == RouteStatus::Ativo)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_route_is_route_one() {
        let active = get_active_route(&MOCK_ROUTES).unwrap();
        assert_eq!(active.id, 1);
        assert_eq!(active.deliveries.len(), 3);
    }

    #[test]
    fn test_no_active_route() {
        let routes: Vec<Route> = MOCK_ROUTES
            .iter()
            .filter(|route| !route.is_active())
            .cloned()
            .collect();
        assert!(get_active_route(&routes).is_none());
        assert!(get_active_route(&[]).is_none());
    }

    #[test]
    fn test_delivery_lookup_returns_parent_route() {
        let (delivery, route) = get_delivery_by_id(&MOCK_ROUTES, 4).unwrap();
        assert_eq!(delivery.customer_name, "Farmácia Popular");
        assert_eq!(route.id, 2);
        assert!(get_delivery_by_id(&MOCK_ROUTES, 99).is_none());
    }

    #[test]
    fn test_route_lookup() {
        assert_eq!(get_route_by_id(&MOCK_ROUTES, 2).unwrap().total_value, brl(8975));
        assert!(get_route_by_id(&MOCK_ROUTES, 3).is_none());
    }

    #[test]
    fn test_companies_carry_their_drivers() {
        assert_eq!(MOCK_COMPANIES.len(), 2);
        let express = &MOCK_COMPANIES[0];
        assert_eq!(express.drivers[0].company_cnpj.as_deref(), Some("12.345.678/0001-90"));
        assert_eq!(MOCK_COMPANIES[1].drivers[0].email, "maria@exemplo.com");
    }
}
