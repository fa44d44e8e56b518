use std::fmt;

use crate::models::{DeliveryStatus, Route};
use crate::utils::format::{format_currency, maps_url};

/// Detalle del roteiro con progreso y entregas
#[derive(Debug, Clone, PartialEq)]
pub struct RouteView {
    pub route: Route,
}

impl RouteView {
    pub fn new(route: Route) -> Self {
        Self { route }
    }

    pub fn progress_label(&self) -> String {
        format!(
            "{} de {} entregas concluídas",
            self.route.completed_count(),
            self.route.deliveries.len()
        )
    }

    /// Enlace de mapas hacia la primera entrega pendiente
    pub fn navigation_url(&self) -> Option<String> {
        self.route
            .navigation_target()
            .map(|delivery| maps_url(&delivery.address))
    }

    pub fn can_finish(&self) -> bool {
        self.route.is_active()
    }
}

fn action_hint(status: DeliveryStatus) -> &'static str {
    if status == DeliveryStatus::Pendente {
        "👆 Toque para iniciar entrega"
    } else {
        "👆 Toque para ver detalhes da entrega"
    }
}

impl fmt::Display for RouteView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let route = &self.route;
        writeln!(f, "📅 Roteiro {} [{}]", route.date, route.status.label())?;
        writeln!(f, "💰 Total: {}", format_currency(route.total_value))?;
        writeln!(f, "{} ({}%)", self.progress_label(), route.progress_percentage())?;
        if let Some(url) = self.navigation_url() {
            writeln!(f, "🗺️ Abrir no Maps: {}", url)?;
        }

        writeln!(f)?;
        writeln!(f, "📋 Entregas ({})", route.deliveries.len())?;
        for (index, delivery) in route.deliveries.iter().enumerate() {
            writeln!(
                f,
                "{}. {} [{}] (#{})",
                index + 1,
                delivery.customer_name,
                delivery.status.label(),
                delivery.id
            )?;
            writeln!(f, "   📍 {}", delivery.address)?;
            writeln!(f, "   📞 {}", delivery.phone)?;
            writeln!(
                f,
                "   💰 {}  💳 {}",
                format_currency(delivery.value),
                delivery.payment_method.label()
            )?;
            if let Some(notes) = &delivery.notes {
                writeln!(f, "   📝 {}", notes)?;
            }
            for item in delivery.items.iter().take(2) {
                writeln!(f, "   • {}", item)?;
            }
            if delivery.items.len() > 2 {
                writeln!(f, "   +{} item(s)", delivery.items.len() - 2)?;
            }
            writeln!(f, "   {}", action_hint(delivery.status))?;
        }

        if self.can_finish() {
            write!(f, "\n✅ Finalizar Roteiro")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::route_book::RouteBook;

    #[test]
    fn test_route_view_progress_and_navigation() {
        let book = RouteBook::seeded();
        let view = RouteView::new(book.route_by_id(1).unwrap().clone());
        assert_eq!(view.progress_label(), "0 de 3 entregas concluídas");
        assert!(view.can_finish());

        let first = &view.route.deliveries[0];
        assert_eq!(view.navigation_url(), Some(maps_url(&first.address)));
        assert!(view.to_string().contains("👆 Toque para iniciar entrega"));
    }

    #[test]
    fn test_finished_route_cannot_be_finished_again() {
        let book = RouteBook::seeded();
        let view = RouteView::new(book.route_by_id(2).unwrap().clone());
        assert!(!view.can_finish());
        assert_eq!(view.route.progress_percentage(), 100);
        assert!(view.to_string().contains("ver detalhes da entrega"));
    }
}
