//! Evidencias de entrega
//! 
//! `PhotoEvidence` vive solo en el borrador de la pantalla de entrega;
//! `Evidence` es el registro que guarda el backend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Origen de la foto
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhotoSource {
    Camera,
    Gallery,
}

/// Foto capturada durante la finalización de una entrega
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoEvidence {
    pub id: String,
    pub uri: String,
    #[serde(rename = "type")]
    pub source: PhotoSource,
    pub timestamp: DateTime<Utc>,
}

/// Tipo de evidencia
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvidenceKind {
    Photo,
    Signature,
    Document,
}

impl EvidenceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EvidenceKind::Photo => "photo",
            EvidenceKind::Signature => "signature",
            EvidenceKind::Document => "document",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "photo" => Some(EvidenceKind::Photo),
            "signature" => Some(EvidenceKind::Signature),
            "document" => Some(EvidenceKind::Document),
            _ => None,
        }
    }
}

/// Evidencia registrada para una entrega
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evidence {
    pub id: i64,
    pub delivery_id: i64,
    #[serde(rename = "type")]
    pub kind: EvidenceKind,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}
