//! Modelo de Route (roteiro)
//! 
//! Un roteiro es el conjunto ordenado de entregas de un motorista en un día.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::delivery::{Delivery, DeliveryStatus};

/// Estado del roteiro
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteStatus {
    Pendente,
    Ativo,
    Finalizado,
    Cancelado,
}

impl RouteStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteStatus::Pendente => "pendente",
            RouteStatus::Ativo => "ativo",
            RouteStatus::Finalizado => "finalizado",
            RouteStatus::Cancelado => "cancelado",
        }
    }

    /// Etiqueta en mayúsculas para las tarjetas de roteiro
    pub fn label(&self) -> &'static str {
        match self {
            RouteStatus::Pendente => "PENDENTE",
            RouteStatus::Ativo => "ATIVO",
            RouteStatus::Finalizado => "FINALIZADO",
            RouteStatus::Cancelado => "CANCELADO",
        }
    }

    /// pendente -> ativo -> finalizado, y cancelado desde cualquier estado abierto
    pub fn can_transition_to(&self, next: RouteStatus) -> bool {
        matches!(
            (self, next),
            (RouteStatus::Pendente, RouteStatus::Ativo)
                | (RouteStatus::Ativo, RouteStatus::Finalizado)
                | (RouteStatus::Pendente, RouteStatus::Cancelado)
                | (RouteStatus::Ativo, RouteStatus::Cancelado)
        )
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, RouteStatus::Finalizado | RouteStatus::Cancelado)
    }
}

impl fmt::Display for RouteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RouteStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pendente" => Ok(RouteStatus::Pendente),
            "ativo" => Ok(RouteStatus::Ativo),
            "finalizado" => Ok(RouteStatus::Finalizado),
            "cancelado" => Ok(RouteStatus::Cancelado),
            other => Err(format!("estado de roteiro desconocido: {}", other)),
        }
    }
}

/// Route principal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub id: i64,
    pub date: NaiveDate,
    pub status: RouteStatus,
    pub total_value: Decimal,
    pub deliveries: Vec<Delivery>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Duración estimada en minutos
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_duration: Option<u32>,
}

impl Route {
    pub fn is_active(&self) -> bool {
        self.status == RouteStatus::Ativo
    }

    pub fn is_completed(&self) -> bool {
        self.status == RouteStatus::Finalizado
    }

    pub fn delivery(&self, delivery_id: i64) -> Option<&Delivery> {
        self.deliveries.iter().find(|d| d.id == delivery_id)
    }

    /// Entregas con estado `entregue`
    pub fn completed_count(&self) -> usize {
        self.count_with_status(DeliveryStatus::Entregue)
    }

    pub fn count_with_status(&self, status: DeliveryStatus) -> usize {
        self.deliveries.iter().filter(|d| d.status == status).count()
    }

    /// Entregas sin resultado todavía
    pub fn outstanding_count(&self) -> usize {
        self.deliveries.iter().filter(|d| d.is_outstanding()).count()
    }

    /// Porcentaje de progreso redondeado (0 cuando no hay entregas)
    pub fn progress_percentage(&self) -> u32 {
        crate::utils::format::rounded_percentage(self.completed_count(), self.deliveries.len())
    }

    /// Destino para la navegación: primera entrega pendiente o, si no hay,
    /// la primera del roteiro
    pub fn navigation_target(&self) -> Option<&Delivery> {
        self.deliveries
            .iter()
            .find(|d| d.is_pending())
            .or_else(|| self.deliveries.first())
    }
}
