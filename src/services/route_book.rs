//! Libro de roteiros
//! 
//! Dueño de la lista de roteiros. Las entregas viven dentro de su roteiro,
//! así que cualquier cambio de estado es visible desde el roteiro padre.

use chrono::{Datelike, Duration, NaiveDate, Utc};
use thiserror::Error;
use tracing::{info, warn};

use crate::data::{get_active_route, get_delivery_by_id, get_route_by_id, MOCK_ROUTES};
use crate::models::{
    Delivery, DeliveryStatus, Evidence, EvidenceKind, HistoryPeriod, Route, RouteStatus,
    UpdateDeliveryData,
};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RouteError {
    #[error("route {0} not found")]
    RouteNotFound(i64),

    #[error("delivery {0} not found")]
    DeliveryNotFound(i64),

    #[error("route {route_id} cannot go from {from} to {to}")]
    InvalidTransition {
        route_id: i64,
        from: RouteStatus,
        to: RouteStatus,
    },

    #[error("route {route_id} still has {remaining} deliveries without result")]
    DeliveriesOutstanding { route_id: i64, remaining: usize },

    #[error("route {0} is closed")]
    RouteClosed(i64),
}

#[derive(Debug, Clone, Default)]
pub struct RouteBook {
    routes: Vec<Route>,
    evidence: Vec<Evidence>,
}

impl RouteBook {
    pub fn new(routes: Vec<Route>) -> Self {
        Self {
            routes,
            evidence: Vec::new(),
        }
    }

    /// Roteiros del dataset simulado
    pub fn seeded() -> Self {
        Self::new(MOCK_ROUTES.clone())
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn route_by_id(&self, id: i64) -> Option<&Route> {
        get_route_by_id(&self.routes, id)
    }

    pub fn delivery_by_id(&self, id: i64) -> Option<(&Delivery, &Route)> {
        get_delivery_by_id(&self.routes, id)
    }

    pub fn active_route(&self) -> Option<&Route> {
        get_active_route(&self.routes)
    }

    /// Roteiros finalizados
    pub fn completed_routes(&self) -> Vec<&Route> {
        self.routes.iter().filter(|route| route.is_completed()).collect()
    }

    /// Roteiros finalizados dentro del período que termina en `as_of`
    pub fn history(&self, period: HistoryPeriod, as_of: NaiveDate) -> Vec<&Route> {
        self.routes
            .iter()
            .filter(|route| route.is_completed())
            .filter(|route| match period {
                HistoryPeriod::Week => {
                    route.date <= as_of && route.date > as_of - Duration::days(7)
                }
                HistoryPeriod::Month => {
                    route.date.year() == as_of.year() && route.date.month() == as_of.month()
                }
                HistoryPeriod::All => true,
            })
            .collect()
    }

    fn route_mut(&mut self, id: i64) -> Result<&mut Route, RouteError> {
        self.routes
            .iter_mut()
            .find(|route| route.id == id)
            .ok_or(RouteError::RouteNotFound(id))
    }

    fn transition(&mut self, id: i64, next: RouteStatus) -> Result<&Route, RouteError> {
        let route = self.route_mut(id)?;
        if !route.status.can_transition_to(next) {
            return Err(RouteError::InvalidTransition {
                route_id: id,
                from: route.status,
                to: next,
            });
        }
        info!("🚚 Roteiro {}: {} -> {}", id, route.status, next);
        route.status = next;
        Ok(&*route)
    }

    /// pendente -> ativo
    pub fn start_route(&mut self, id: i64) -> Result<&Route, RouteError> {
        self.transition(id, RouteStatus::Ativo)
    }

    /// ativo -> finalizado, solo cuando todas las entregas tienen resultado
    pub fn finish_route(&mut self, id: i64) -> Result<&Route, RouteError> {
        let route = self.route_by_id(id).ok_or(RouteError::RouteNotFound(id))?;
        let remaining = route.outstanding_count();
        if route.status == RouteStatus::Ativo && remaining > 0 {
            return Err(RouteError::DeliveriesOutstanding {
                route_id: id,
                remaining,
            });
        }
        self.transition(id, RouteStatus::Finalizado)
    }

    pub fn cancel_route(&mut self, id: i64) -> Result<&Route, RouteError> {
        self.transition(id, RouteStatus::Cancelado)
    }

    /// Aplica una actualización a la entrega dentro de su roteiro.
    ///
    /// Las evidencias en línea no se tocan aquí; ver `attach_evidence`.
    pub fn update_delivery(
        &mut self,
        delivery_id: i64,
        update: &UpdateDeliveryData,
    ) -> Result<&Delivery, RouteError> {
        let route = self
            .routes
            .iter_mut()
            .find(|route| route.delivery(delivery_id).is_some())
            .ok_or(RouteError::DeliveryNotFound(delivery_id))?;

        if route.status.is_closed() {
            warn!("⚠️ Entrega {} pertenece al roteiro cerrado {}", delivery_id, route.id);
            return Err(RouteError::RouteClosed(route.id));
        }

        let delivery = route
            .deliveries
            .iter_mut()
            .find(|d| d.id == delivery_id)
            .ok_or(RouteError::DeliveryNotFound(delivery_id))?;

        if let Some(status) = update.status {
            delivery.status = status;
            if status == DeliveryStatus::Entregue {
                delivery.delivered_at = Some(update.delivered_at.unwrap_or_else(Utc::now));
            }
        }
        if let Some(notes) = &update.driver_notes {
            delivery.driver_notes = if notes.trim().is_empty() {
                None
            } else {
                Some(notes.clone())
            };
        }

        info!("📦 Entrega {} actualizada: {}", delivery_id, delivery.status);
        Ok(&*delivery)
    }

    /// Registra una evidencia para una entrega existente
    pub fn attach_evidence(
        &mut self,
        delivery_id: i64,
        kind: EvidenceKind,
        url: String,
        description: Option<String>,
    ) -> Result<Evidence, RouteError> {
        if self.delivery_by_id(delivery_id).is_none() {
            return Err(RouteError::DeliveryNotFound(delivery_id));
        }
        let id = self.evidence.iter().map(|e| e.id).max().unwrap_or(0) + 1;
        let evidence = Evidence {
            id,
            delivery_id,
            kind,
            url,
            description,
            created_at: Utc::now(),
        };
        self.evidence.push(evidence.clone());
        Ok(evidence)
    }

    pub fn evidence_for(&self, delivery_id: i64) -> Vec<&Evidence> {
        self.evidence
            .iter()
            .filter(|e| e.delivery_id == delivery_id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_seeded_lookups() {
        let book = RouteBook::seeded();
        assert_eq!(book.active_route().unwrap().id, 1);
        assert_eq!(book.completed_routes().len(), 1);
        let (delivery, route) = book.delivery_by_id(2).unwrap();
        assert_eq!(delivery.customer_name, "Padaria Central");
        assert_eq!(route.id, 1);
    }

    #[test]
    fn test_delivery_update_is_visible_from_parent_route() {
        let mut book = RouteBook::seeded();
        let update = UpdateDeliveryData {
            status: Some(DeliveryStatus::Entregue),
            driver_notes: Some("Recebido pelo gerente".to_string()),
            ..Default::default()
        };
        let delivery = book.update_delivery(1, &update).unwrap();
        assert!(delivery.delivered_at.is_some());

        let route = book.route_by_id(1).unwrap();
        assert_eq!(route.completed_count(), 1);
        assert_eq!(route.progress_percentage(), 33);
        assert_eq!(
            route.delivery(1).unwrap().driver_notes.as_deref(),
            Some("Recebido pelo gerente")
        );
    }

    #[test]
    fn test_closed_route_rejects_updates() {
        let mut book = RouteBook::seeded();
        let update = UpdateDeliveryData {
            status: Some(DeliveryStatus::Problema),
            ..Default::default()
        };
        assert_eq!(book.update_delivery(4, &update), Err(RouteError::RouteClosed(2)));
        assert_eq!(book.update_delivery(40, &update), Err(RouteError::DeliveryNotFound(40)));
    }

    #[test]
    fn test_finish_requires_all_deliveries_resolved() {
        let mut book = RouteBook::seeded();
        assert_eq!(
            book.finish_route(1).unwrap_err(),
            RouteError::DeliveriesOutstanding {
                route_id: 1,
                remaining: 3
            }
        );

        for (id, status) in [
            (1, DeliveryStatus::Entregue),
            (2, DeliveryStatus::Problema),
            (3, DeliveryStatus::Entregue),
        ] {
            let update = UpdateDeliveryData {
                status: Some(status),
                ..Default::default()
            };
            book.update_delivery(id, &update).unwrap();
        }

        let route = book.finish_route(1).unwrap();
        assert_eq!(route.status, RouteStatus::Finalizado);
        assert!(book.active_route().is_none());
        assert_eq!(book.completed_routes().len(), 2);
    }

    #[test]
    fn test_route_transitions() {
        let mut book = RouteBook::seeded();
        assert!(matches!(
            book.start_route(2),
            Err(RouteError::InvalidTransition {
                from: RouteStatus::Finalizado,
                to: RouteStatus::Ativo,
                ..
            })
        ));
        assert_eq!(book.cancel_route(1).unwrap().status, RouteStatus::Cancelado);
        assert_eq!(book.start_route(9), Err(RouteError::RouteNotFound(9)));
    }

    #[test]
    fn test_history_periods() {
        let book = RouteBook::seeded();
        assert_eq!(book.history(HistoryPeriod::All, date(2030, 1, 1)).len(), 1);
        assert_eq!(book.history(HistoryPeriod::Month, date(2024, 5, 31)).len(), 1);
        assert_eq!(book.history(HistoryPeriod::Month, date(2024, 6, 1)).len(), 0);
        assert_eq!(book.history(HistoryPeriod::Week, date(2024, 5, 31)).len(), 1);
        assert_eq!(book.history(HistoryPeriod::Week, date(2024, 6, 1)).len(), 0);
    }

    #[test]
    fn test_attach_evidence() {
        let mut book = RouteBook::seeded();
        let first = book
            .attach_evidence(1, EvidenceKind::Photo, "file:///tmp/a.jpg".to_string(), None)
            .unwrap();
        let second = book
            .attach_evidence(1, EvidenceKind::Signature, "file:///tmp/b.png".to_string(), None)
            .unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(book.evidence_for(1).len(), 2);
        assert!(book.attach_evidence(77, EvidenceKind::Photo, String::new(), None).is_err());
    }
}
