use serde::{Deserialize, Serialize};

use crate::models::HistoryPeriod;

/// Query de `GET /history`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryQuery {
    pub period: Option<HistoryPeriod>,
}

/// Cuerpo de `POST /notifications/register`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushTokenRequest {
    pub push_token: String,
}

/// Respuesta de `GET /health`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}
