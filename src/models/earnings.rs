//! Ganancias e historial
//! 
//! Tipos que exponen `GET /earnings` y `GET /history`.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Resumen de ganancias del período
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EarningsData {
    pub total_month: Decimal,
    pub total_paid: Decimal,
    pub total_pending: Decimal,
    pub deliveries_count: usize,
    pub average_per_delivery: Decimal,
    pub company_name: String,
    pub period: Period,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Period {
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// Ventana del historial (`?period=week|month|all`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryPeriod {
    Week,
    Month,
    #[default]
    All,
}

impl HistoryPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HistoryPeriod::Week => "week",
            HistoryPeriod::Month => "month",
            HistoryPeriod::All => "all",
        }
    }
}

impl fmt::Display for HistoryPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HistoryPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "week" => Ok(HistoryPeriod::Week),
            "month" => Ok(HistoryPeriod::Month),
            "all" => Ok(HistoryPeriod::All),
            other => Err(format!("período desconocido: {}", other)),
        }
    }
}
