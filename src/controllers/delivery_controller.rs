use tracing::info;
use uuid::Uuid;

use crate::dto::UploadResponse;
use crate::models::{Delivery, EvidenceKind, UpdateDeliveryData};
use crate::state::AppState;
use crate::utils::errors::{bad_request_error, not_found_error, AppError};

pub struct DeliveryController {
    state: AppState,
}

impl DeliveryController {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub async fn get(&self, delivery_id: i64) -> Result<Delivery, AppError> {
        let book = self.state.routes.read().await;
        book.delivery_by_id(delivery_id)
            .map(|(delivery, _)| delivery.clone())
            .ok_or_else(|| not_found_error("Delivery", &delivery_id.to_string()))
    }

    /// Aplica la actualización y registra las evidencias en línea
    pub async fn update(
        &self,
        delivery_id: i64,
        data: UpdateDeliveryData,
    ) -> Result<Delivery, AppError> {
        // Decodificar antes de tocar el roteiro
        let mut decoded = Vec::with_capacity(data.evidence.len());
        for payload in &data.evidence {
            let bytes = payload
                .decode()
                .map_err(|e| bad_request_error(&format!("Evidência inválida: {}", e)))?;
            decoded.push((payload.kind, payload.description.clone(), bytes.len()));
        }

        let mut book = self.state.routes.write().await;
        let updated = book.update_delivery(delivery_id, &data)?.clone();

        for (kind, description, size) in decoded {
            let url = format!("evidence://{}/{}", delivery_id, Uuid::new_v4());
            let evidence = book.attach_evidence(delivery_id, kind, url, description)?;
            info!("📎 Evidência {} ({} bytes) registrada em {}", evidence.kind.as_str(), size, evidence.url);
        }

        Ok(updated)
    }

    pub async fn upload_evidence(
        &self,
        delivery_id: i64,
        kind: EvidenceKind,
        description: Option<String>,
        file_name: Option<String>,
        size: usize,
    ) -> Result<UploadResponse, AppError> {
        if size == 0 {
            return Err(bad_request_error("Arquivo de evidência vazio"));
        }

        let url = format!("/evidence/{}", Uuid::new_v4());
        let mut book = self.state.routes.write().await;
        book.attach_evidence(delivery_id, kind, url.clone(), description)?;

        info!(
            "📷 Upload de {} para entrega {} ({} bytes)",
            file_name.as_deref().unwrap_or("arquivo"),
            delivery_id,
            size
        );
        Ok(UploadResponse { url })
    }
}
