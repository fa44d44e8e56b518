//! Historial y ganancias
//! 
//! Estadísticas calculadas sobre los roteiros finalizados.

use chrono::{Datelike, Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{EarningsData, Period, Route, User};
use crate::utils::format::{round_half_up, rounded_average, rounded_percentage};

/// Totales de la pantalla de historial
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryStats {
    pub completed_routes: usize,
    pub total_deliveries: usize,
    pub successful_deliveries: usize,
    /// Porcentaje redondeado de entregas `entregue`
    pub success_rate: u32,
    pub total_earnings: Decimal,
    pub monthly_earnings: Decimal,
    /// Ganancia media por entrega en reales enteros
    pub average_per_delivery: Decimal,
    pub average_deliveries_per_route: u32,
}

impl HistoryStats {
    pub fn from_routes(routes: &[&Route], as_of: NaiveDate) -> Self {
        let total_deliveries = total_deliveries(routes);
        let successful_deliveries = successful_deliveries(routes);
        let total_earnings: Decimal = routes.iter().map(|route| route.total_value).sum();
        let month = month_period(as_of);
        let monthly_earnings: Decimal = routes
            .iter()
            .filter(|route| month.contains(route.date))
            .map(|route| route.total_value)
            .sum();

        let average_per_delivery = if total_deliveries > 0 {
            round_half_up(total_earnings / Decimal::from(total_deliveries), 0)
        } else {
            Decimal::ZERO
        };

        Self {
            completed_routes: routes.len(),
            total_deliveries,
            successful_deliveries,
            success_rate: rounded_percentage(successful_deliveries, total_deliveries),
            total_earnings,
            monthly_earnings,
            average_per_delivery,
            average_deliveries_per_route: rounded_average(total_deliveries, routes.len()),
        }
    }
}

pub fn total_deliveries(routes: &[&Route]) -> usize {
    routes.iter().map(|route| route.deliveries.len()).sum()
}

pub fn successful_deliveries(routes: &[&Route]) -> usize {
    routes.iter().map(|route| route.completed_count()).sum()
}

/// Tasa de éxito redondeada; 0 cuando no hay entregas
pub fn success_rate(routes: &[&Route]) -> u32 {
    rounded_percentage(successful_deliveries(routes), total_deliveries(routes))
}

/// Primer y último día del mes de `date`
pub fn month_period(date: NaiveDate) -> Period {
    let start = date.with_day(1).unwrap_or(date);
    let next_month = if date.month() == 12 {
        NaiveDate::from_ymd_opt(date.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(date.year(), date.month() + 1, 1)
    };
    let end = next_month
        .map(|first| first - Duration::days(1))
        .unwrap_or(date);
    Period { start, end }
}

/// Ganancias del mes de `as_of` para el motorista.
///
/// `total_month` suma los roteiros finalizados del mes, `total_paid` las
/// entregas `entregue` de esos roteiros y `total_pending` el valor de las
/// entregas todavía sin resultado en roteiros abiertos.
pub fn earnings_for(user: &User, routes: &[Route], as_of: NaiveDate) -> EarningsData {
    let period = month_period(as_of);
    let month_routes: Vec<&Route> = routes
        .iter()
        .filter(|route| route.is_completed() && period.contains(route.date))
        .collect();

    let total_month: Decimal = month_routes.iter().map(|route| route.total_value).sum();
    let total_paid: Decimal = month_routes
        .iter()
        .flat_map(|route| route.deliveries.iter())
        .filter(|d| d.is_delivered())
        .map(|d| d.value)
        .sum();
    let total_pending: Decimal = routes
        .iter()
        .filter(|route| !route.status.is_closed())
        .flat_map(|route| route.deliveries.iter())
        .filter(|d| d.is_outstanding())
        .map(|d| d.value)
        .sum();
    let deliveries_count = total_deliveries(&month_routes);
    let average_per_delivery = if deliveries_count > 0 {
        round_half_up(total_month / Decimal::from(deliveries_count), 2)
    } else {
        Decimal::ZERO
    };

    EarningsData {
        total_month,
        total_paid,
        total_pending,
        deliveries_count,
        average_per_delivery,
        company_name: user.company_name.clone().unwrap_or_default(),
        period,
    }
}
