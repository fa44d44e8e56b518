use std::fmt;

use crate::models::{Route, RouteStatus};
use crate::utils::format::format_currency;

/// Tarjeta de un roteiro en la lista
#[derive(Debug, Clone, PartialEq)]
pub struct RouteCard {
    pub id: i64,
    pub date: String,
    pub total: String,
    pub status: RouteStatus,
    pub deliveries: usize,
}

impl RouteCard {
    fn from_route(route: &Route) -> Self {
        Self {
            id: route.id,
            date: route.date.format("%Y-%m-%d").to_string(),
            total: format_currency(route.total_value),
            status: route.status,
            deliveries: route.deliveries.len(),
        }
    }
}

/// Pantalla inicial: roteiro activo y lista completa
#[derive(Debug, Clone, PartialEq)]
pub struct HomeView {
    pub greeting: String,
    pub active: Option<RouteCard>,
    pub routes: Vec<RouteCard>,
}

impl HomeView {
    pub fn build(driver_name: &str, routes: &[Route]) -> Self {
        let first_name = driver_name.split_whitespace().next().unwrap_or(driver_name);
        Self {
            greeting: format!("Olá, {}! 👋", first_name),
            active: routes.iter().find(|r| r.is_active()).map(RouteCard::from_route),
            routes: routes.iter().map(RouteCard::from_route).collect(),
        }
    }
}

impl fmt::Display for HomeView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.greeting)?;

        if let Some(active) = &self.active {
            writeln!(f)?;
            writeln!(f, "🚛 Roteiro Ativo")?;
            writeln!(f, "  Roteiro {} [{}]", active.date, active.status.label())?;
            writeln!(f, "  💰 {}  📦 {} entregas", active.total, active.deliveries)?;
            writeln!(f, "  👆 Toque para continuar o roteiro (#{})", active.id)?;
        }

        writeln!(f)?;
        writeln!(f, "📋 Todos os Roteiros")?;
        if self.routes.is_empty() {
            writeln!(f, "  📭 Nenhum roteiro encontrado")?;
            return write!(f, "  Novos roteiros aparecerão aqui quando disponíveis");
        }
        for card in &self.routes {
            write!(
                f,
                "  #{} 📅 {}  💰 {}  [{}]  📦 {} entregas",
                card.id,
                card.date,
                card.total,
                card.status.label(),
                card.deliveries
            )?;
            if card.status == RouteStatus::Ativo {
                write!(f, "  🔥 Roteiro em andamento")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::MOCK_ROUTES;

    #[test]
    fn test_home_shows_active_route() {
        let view = HomeView::build("João Silva", &MOCK_ROUTES);
        assert_eq!(view.greeting, "Olá, João! 👋");
        assert_eq!(view.active.as_ref().map(|c| c.id), Some(1));
        assert_eq!(view.routes.len(), 2);
        assert_eq!(view.routes[0].total, "R$ 120.50");

        let text = view.to_string();
        assert!(text.contains("🚛 Roteiro Ativo"));
        assert!(text.contains("[FINALIZADO]"));
    }

    #[test]
    fn test_home_without_routes() {
        let view = HomeView::build("Maria", &[]);
        assert!(view.active.is_none());
        assert!(view.to_string().contains("Nenhum roteiro encontrado"));
    }
}
