//! Modelo de Company
//! 
//! Empresa (tenant) a la que pertenece el motorista. Solo se usa para
//! resolver el login; nunca se modifica.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::delivery::PaymentMethod;

/// Company principal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: i64,
    pub name: String,
    pub cnpj: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<CompanySettings>,
    pub created_at: DateTime<Utc>,
}

/// Configuración operativa de la empresa
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanySettings {
    pub allowed_vehicle_types: Vec<String>,
    pub max_deliveries_per_route: u32,
    pub working_hours: WorkingHours,
    pub payment_methods: Vec<PaymentMethod>,
    pub notifications: CompanyNotifications,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkingHours {
    pub start: String,
    pub end: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyNotifications {
    pub new_route: bool,
    pub delivery_updates: bool,
    pub payments: bool,
}
