//! Finalización de entregas
//! 
//! Borrador local de la pantalla de entrega: el motorista elige el
//! resultado (`entregue` o `problema`), añade notas y fotos, confirma, y el
//! resultado se envía a un `DeliverySink` (libro local o backend).

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::client::ClientError;
use crate::models::{
    Delivery, DeliveryStatus, EvidenceKind, PhotoEvidence, PhotoSource, Route, UpdateDeliveryData,
};
use crate::services::route_book::{RouteBook, RouteError};

/// Demora simulada del envío
pub const DEFAULT_SUBMIT_DELAY: Duration = Duration::from_millis(1500);

#[derive(Debug, Error, Clone, PartialEq)]
pub enum DraftError {
    #[error("select the delivery result before finishing")]
    StatusNotSelected,

    #[error("status {0} cannot be selected when finishing a delivery")]
    StatusNotSelectable(DeliveryStatus),

    #[error("photo {0} not found")]
    PhotoNotFound(String),
}

impl DraftError {
    pub fn user_message(&self) -> &'static str {
        match self {
            DraftError::StatusNotSelected | DraftError::StatusNotSelectable(_) => {
                "Selecione o status da entrega antes de finalizar."
            }
            DraftError::PhotoNotFound(_) => "Foto não encontrada.",
        }
    }
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Draft(#[from] DraftError),

    #[error(transparent)]
    Route(#[from] RouteError),

    #[error(transparent)]
    Client(#[from] ClientError),
}

/// Estado local de la pantalla de entrega
#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryDraft {
    pub delivery_id: i64,
    pub route_id: i64,
    status: DeliveryStatus,
    driver_notes: String,
    photos: Vec<PhotoEvidence>,
}

/// Resultado confirmado listo para enviar
#[derive(Debug, Clone, PartialEq)]
pub struct FinalizedDelivery {
    pub delivery_id: i64,
    pub update: UpdateDeliveryData,
    pub photos: Vec<PhotoEvidence>,
}

impl DeliveryDraft {
    pub fn open(delivery: &Delivery, route: &Route) -> Self {
        Self {
            delivery_id: delivery.id,
            route_id: route.id,
            status: delivery.status,
            driver_notes: delivery.driver_notes.clone().unwrap_or_default(),
            photos: Vec::new(),
        }
    }

    pub fn status(&self) -> DeliveryStatus {
        self.status
    }

    pub fn driver_notes(&self) -> &str {
        &self.driver_notes
    }

    pub fn photos(&self) -> &[PhotoEvidence] {
        &self.photos
    }

    /// Solo los resultados terminales son seleccionables
    pub fn select_status(&mut self, status: DeliveryStatus) -> Result<(), DraftError> {
        if !status.is_terminal() {
            return Err(DraftError::StatusNotSelectable(status));
        }
        self.status = status;
        Ok(())
    }

    pub fn set_driver_notes(&mut self, notes: impl Into<String>) {
        self.driver_notes = notes.into();
    }

    pub fn add_photo(&mut self, source: PhotoSource, uri: impl Into<String>) -> &PhotoEvidence {
        self.photos.push(PhotoEvidence {
            id: Uuid::new_v4().to_string(),
            uri: uri.into(),
            source,
            timestamp: Utc::now(),
        });
        &self.photos[self.photos.len() - 1]
    }

    pub fn remove_photo(&mut self, photo_id: &str) -> Result<PhotoEvidence, DraftError> {
        let index = self
            .photos
            .iter()
            .position(|photo| photo.id == photo_id)
            .ok_or_else(|| DraftError::PhotoNotFound(photo_id.to_string()))?;
        Ok(self.photos.remove(index))
    }

    /// Texto del diálogo de confirmación
    pub fn confirmation_prompt(&self) -> Result<String, DraftError> {
        if !self.status.is_terminal() {
            return Err(DraftError::StatusNotSelected);
        }
        Ok(format!("Confirmar entrega como \"{}\"?", self.status.label()))
    }

    pub fn finish(&self) -> Result<FinalizedDelivery, DraftError> {
        if !self.status.is_terminal() {
            return Err(DraftError::StatusNotSelected);
        }

        let notes = self.driver_notes.trim();
        let update = UpdateDeliveryData {
            status: Some(self.status),
            driver_notes: (!notes.is_empty()).then(|| notes.to_string()),
            delivered_at: (self.status == DeliveryStatus::Entregue).then(Utc::now),
            evidence: Vec::new(),
        };

        Ok(FinalizedDelivery {
            delivery_id: self.delivery_id,
            update,
            photos: self.photos.clone(),
        })
    }
}

/// Destino del resultado de una entrega
#[async_trait]
pub trait DeliverySink: Send + Sync {
    async fn submit(&self, finalized: &FinalizedDelivery) -> Result<(), SubmitError>;
}

/// Aplica el resultado sobre el libro de roteiros en memoria
#[derive(Clone)]
pub struct LocalSink {
    book: Arc<RwLock<RouteBook>>,
}

impl LocalSink {
    pub fn new(book: Arc<RwLock<RouteBook>>) -> Self {
        Self { book }
    }
}

#[async_trait]
impl DeliverySink for LocalSink {
    async fn submit(&self, finalized: &FinalizedDelivery) -> Result<(), SubmitError> {
        let mut book = self.book.write().await;
        book.update_delivery(finalized.delivery_id, &finalized.update)?;
        for photo in &finalized.photos {
            book.attach_evidence(
                finalized.delivery_id,
                EvidenceKind::Photo,
                photo.uri.clone(),
                None,
            )?;
        }
        Ok(())
    }
}

/// Confirma el borrador, espera la demora simulada y lo envía
pub async fn finalize_delivery(
    draft: &DeliveryDraft,
    sink: &dyn DeliverySink,
    delay: Duration,
) -> Result<FinalizedDelivery, SubmitError> {
    let finalized = draft.finish()?;
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
    sink.submit(&finalized).await?;
    info!(
        "✅ Entrega {} finalizada como {} ({} fotos)",
        finalized.delivery_id,
        draft.status(),
        finalized.photos.len()
    );
    Ok(finalized)
}
