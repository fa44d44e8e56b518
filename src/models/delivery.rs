//! Modelo de Delivery
//! 
//! Una entrega individual dentro de un roteiro, con datos de contacto,
//! pago y el estado de la entrega.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::evidence::EvidenceKind;

/// Estado de la entrega
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    Pendente,
    EmAndamento,
    Entregue,
    Problema,
}

impl DeliveryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryStatus::Pendente => "pendente",
            DeliveryStatus::EmAndamento => "em_andamento",
            DeliveryStatus::Entregue => "entregue",
            DeliveryStatus::Problema => "problema",
        }
    }

    /// Etiqueta mostrada en la confirmación de finalización
    pub fn label(&self) -> &'static str {
        match self {
            DeliveryStatus::Pendente => "Pendente",
            DeliveryStatus::EmAndamento => "Em andamento",
            DeliveryStatus::Entregue => "Entregue",
            DeliveryStatus::Problema => "Problema",
        }
    }

    /// Solo `entregue` y `problema` cierran una entrega
    pub fn is_terminal(&self) -> bool {
        matches!(self, DeliveryStatus::Entregue | DeliveryStatus::Problema)
    }
}

impl fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeliveryStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pendente" => Ok(DeliveryStatus::Pendente),
            "em_andamento" => Ok(DeliveryStatus::EmAndamento),
            "entregue" => Ok(DeliveryStatus::Entregue),
            "problema" => Ok(DeliveryStatus::Problema),
            other => Err(format!("estado de entrega desconocido: {}", other)),
        }
    }
}

/// Forma de pago acordada con el cliente
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    Dinheiro,
    #[serde(rename = "PIX")]
    Pix,
    #[serde(rename = "Cartão")]
    Cartao,
    #[serde(rename = "Débito")]
    Debito,
}

impl PaymentMethod {
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Dinheiro => "Dinheiro",
            PaymentMethod::Pix => "PIX",
            PaymentMethod::Cartao => "Cartão",
            PaymentMethod::Debito => "Débito",
        }
    }
}

/// Delivery principal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Delivery {
    pub id: i64,
    pub customer_name: String,
    pub address: String,
    pub phone: String,
    pub value: Decimal,
    pub status: DeliveryStatus,
    pub items: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub payment_method: PaymentMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivered_at: Option<DateTime<Utc>>,
    /// Tiempo estimado en minutos
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_time: Option<u32>,
}

impl Delivery {
    pub fn is_delivered(&self) -> bool {
        self.status == DeliveryStatus::Entregue
    }

    pub fn is_pending(&self) -> bool {
        self.status == DeliveryStatus::Pendente
    }

    /// Todavía sin resultado (pendiente o en curso)
    pub fn is_outstanding(&self) -> bool {
        !self.status.is_terminal()
    }
}

/// Cambios aplicables a una entrega (`PUT /deliveries/:id`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDeliveryData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<DeliveryStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivered_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub evidence: Vec<EvidencePayload>,
}

/// Evidencia enviada en línea (base64) junto con la actualización
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidencePayload {
    #[serde(rename = "type")]
    pub kind: EvidenceKind,
    pub base64: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl EvidencePayload {
    pub fn from_bytes(kind: EvidenceKind, bytes: &[u8], description: Option<String>) -> Self {
        Self {
            kind,
            base64: STANDARD.encode(bytes),
            description,
        }
    }

    pub fn decode(&self) -> Result<Vec<u8>, base64::DecodeError> {
        STANDARD.decode(self.base64.as_bytes())
    }
}
