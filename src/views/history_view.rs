//! Pantalla de historial de roteiros finalizados

use chrono::NaiveDate;
use std::fmt;

use crate::models::{HistoryPeriod, Route};
use crate::services::history::HistoryStats;
use crate::services::route_book::RouteBook;
use crate::utils::format::{format_currency, format_currency_whole, format_date_br, weekday_abbrev};

/// Resumen de un roteiro finalizado
#[derive(Debug, Clone, PartialEq)]
pub struct CompletedRouteSummary {
    pub id: i64,
    pub date: String,
    pub weekday: &'static str,
    pub total: String,
    pub deliveries: usize,
    pub successes: usize,
    /// Hasta tres clientes
    pub customers: Vec<String>,
    pub more_customers: usize,
}

impl CompletedRouteSummary {
    fn from_route(route: &Route) -> Self {
        Self {
            id: route.id,
            date: format_date_br(route.date),
            weekday: weekday_abbrev(route.date),
            total: format_currency(route.total_value),
            deliveries: route.deliveries.len(),
            successes: route.completed_count(),
            customers: route
                .deliveries
                .iter()
                .take(3)
                .map(|d| d.customer_name.clone())
                .collect(),
            more_customers: route.deliveries.len().saturating_sub(3),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryView {
    pub period: HistoryPeriod,
    pub stats: HistoryStats,
    pub routes: Vec<CompletedRouteSummary>,
}

impl HistoryView {
    pub fn build(book: &RouteBook, period: HistoryPeriod, as_of: NaiveDate) -> Self {
        let routes = book.history(period, as_of);
        Self {
            period,
            stats: HistoryStats::from_routes(&routes, as_of),
            routes: routes.iter().map(|r| CompletedRouteSummary::from_route(r)).collect(),
        }
    }
}

impl fmt::Display for HistoryView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stats = &self.stats;
        writeln!(f, "💰 Ganhos do mês: {}", format_currency(stats.monthly_earnings))?;
        writeln!(f, "   Total: {}", format_currency(stats.total_earnings))?;
        writeln!(f, "📦 {} entregas realizadas", stats.total_deliveries)?;
        writeln!(f)?;
        writeln!(
            f,
            "Roteiros: {}  Entregas: {}  Sucesso: {}%  Média/Entrega: {}",
            stats.completed_routes,
            stats.total_deliveries,
            stats.success_rate,
            format_currency_whole(stats.average_per_delivery)
        )?;

        writeln!(f)?;
        writeln!(f, "📋 Roteiros Finalizados ({})", self.routes.len())?;
        if self.routes.is_empty() {
            writeln!(f, "  Nenhum roteiro finalizado")?;
            writeln!(f, "  Roteiros concluídos aparecerão aqui")?;
        }
        for summary in &self.routes {
            writeln!(
                f,
                "  #{} 📅 {} ({})  {}",
                summary.id, summary.date, summary.weekday, summary.total
            )?;
            writeln!(
                f,
                "     📦 {} entregas  ✅ {} sucessos",
                summary.deliveries, summary.successes
            )?;
            for customer in &summary.customers {
                writeln!(f, "     • {}", customer)?;
            }
            if summary.more_customers > 0 {
                writeln!(f, "     +{} mais...", summary.more_customers)?;
            }
        }

        writeln!(f)?;
        writeln!(f, "Taxa de Sucesso: {}%", stats.success_rate)?;
        writeln!(f, "Entregas por Roteiro: {}", stats.average_deliveries_per_route)?;
        write!(f, "Total de Roteiros: {}", stats.completed_routes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_from_seed() {
        let book = RouteBook::seeded();
        let as_of = NaiveDate::from_ymd_opt(2024, 5, 31).unwrap();
        let view = HistoryView::build(&book, HistoryPeriod::All, as_of);

        assert_eq!(view.routes.len(), 1);
        let summary = &view.routes[0];
        assert_eq!(summary.date, "25/05/2024");
        assert_eq!(summary.weekday, "Sáb");
        assert_eq!(summary.successes, 1);
        assert_eq!(summary.customers, vec!["Farmácia Popular".to_string()]);

        let text = view.to_string();
        assert!(text.contains("Sucesso: 100%"));
        assert!(text.contains("Média/Entrega: R$ 90"));
    }

    #[test]
    fn test_empty_history() {
        let book = RouteBook::new(Vec::new());
        let as_of = NaiveDate::from_ymd_opt(2024, 5, 31).unwrap();
        let view = HistoryView::build(&book, HistoryPeriod::Week, as_of);
        assert_eq!(view.stats.success_rate, 0);
        assert!(view.to_string().contains("Nenhum roteiro finalizado"));
    }
}
