//! Pantalla de detalle de la entrega

use std::fmt;

use crate::models::{Delivery, DeliveryStatus, PhotoSource, Route};
use crate::services::delivery_draft::DeliveryDraft;
use crate::utils::format::{format_currency, maps_url, tel_uri};

/// Detalle de la entrega junto con el borrador de finalización
#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryView {
    pub delivery: Delivery,
    pub route_date: String,
    pub draft: DeliveryDraft,
}

impl DeliveryView {
    pub fn open(delivery: &Delivery, route: &Route) -> Self {
        Self {
            delivery: delivery.clone(),
            route_date: route.date.format("%Y-%m-%d").to_string(),
            draft: DeliveryDraft::open(delivery, route),
        }
    }

    pub fn call_uri(&self) -> String {
        tel_uri(&self.delivery.phone)
    }

    pub fn navigation_url(&self) -> String {
        maps_url(&self.delivery.address)
    }

    /// Los resultados solo se eligen mientras la entrega no está cerrada
    pub fn is_editable(&self) -> bool {
        !self.delivery.status.is_terminal()
    }
}

fn marker(selected: bool) -> &'static str {
    if selected {
        "(x)"
    } else {
        "( )"
    }
}

impl fmt::Display for DeliveryView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let delivery = &self.delivery;
        writeln!(f, "📦 {} [{}]", delivery.customer_name, delivery.status.label())?;
        writeln!(f, "Roteiro {}", self.route_date)?;
        writeln!(f, "📍 {}", delivery.address)?;
        writeln!(f, "📞 {} ({})", delivery.phone, self.call_uri())?;
        writeln!(f, "🗺️ {}", self.navigation_url())?;
        writeln!(
            f,
            "💰 {}  💳 {}",
            format_currency(delivery.value),
            delivery.payment_method.label()
        )?;
        if let Some(notes) = &delivery.notes {
            writeln!(f, "📝 {}", notes)?;
        }
        writeln!(f, "Itens:")?;
        for item in &delivery.items {
            writeln!(f, "  • {}", item)?;
        }

        if !self.is_editable() {
            if let Some(at) = delivery.delivered_at {
                writeln!(f, "✅ Entregue em {}", at.format("%d/%m/%Y %H:%M"))?;
            }
            if let Some(notes) = &delivery.driver_notes {
                write!(f, "🗒️ {}", notes)?;
            }
            return Ok(());
        }

        let status = self.draft.status();
        writeln!(f)?;
        writeln!(f, "Status da entrega:")?;
        writeln!(f, "  {} Entregue", marker(status == DeliveryStatus::Entregue))?;
        writeln!(f, "  {} Problema", marker(status == DeliveryStatus::Problema))?;
        writeln!(f, "📷 Fotos ({})", self.draft.photos().len())?;
        for photo in self.draft.photos() {
            let source = match photo.source {
                PhotoSource::Camera => "câmera",
                PhotoSource::Gallery => "galeria",
            };
            writeln!(f, "  {} [{}] {}", photo.id, source, photo.uri)?;
        }
        if !self.draft.driver_notes().is_empty() {
            writeln!(f, "🗒️ {}", self.draft.driver_notes())?;
        }
        Ok(())
    }
}
