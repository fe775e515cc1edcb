//! Dashboard figures: revenue per month or quarter, units per status.

use std::collections::BTreeMap;

use chrono::Datelike;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::core::{CotizaError, IVA_RATE, checked_product, checked_sum};

use super::assessment::{InventoryStatus, Sale};

const MONTHS: [&str; 12] = [
    "Enero",
    "Febrero",
    "Marzo",
    "Abril",
    "Mayo",
    "Junio",
    "Julio",
    "Agosto",
    "Septiembre",
    "Octubre",
    "Noviembre",
    "Diciembre",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    Monthly,
    Quarterly,
}

/// Sales in one period of a year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodSummary {
    /// Month (1-12) or quarter (1-4).
    pub period: u32,
    /// "Enero".."Diciembre" or "Q1".."Q4".
    pub label: String,
    pub sale_count: usize,
    /// Sum of sale prices.
    pub net_revenue: Decimal,
    /// Net revenue plus IVA.
    pub gross_revenue: Decimal,
}

/// Revenue per period for `year`. Only periods with sales are listed,
/// in calendar order.
pub fn summarize_sales(
    sales: &[Sale],
    year: i32,
    granularity: Granularity,
) -> Result<Vec<PeriodSummary>, CotizaError> {
    let mut periods: BTreeMap<u32, (usize, Decimal)> = BTreeMap::new();

    for sale in sales.iter().filter(|s| s.sale_date.year() == year) {
        let month = sale.sale_date.month();
        let period = match granularity {
            Granularity::Monthly => month,
            Granularity::Quarterly => (month - 1) / 3 + 1,
        };
        let entry = periods.entry(period).or_insert((0, Decimal::ZERO));
        entry.0 += 1;
        entry.1 = checked_sum(entry.1, sale.sale_price, "period revenue")?;
    }

    let multiplier = Decimal::ONE + IVA_RATE / dec!(100);
    periods
        .into_iter()
        .map(|(period, (sale_count, net_revenue))| -> Result<_, CotizaError> {
            Ok(PeriodSummary {
                period,
                label: period_label(period, granularity),
                sale_count,
                net_revenue,
                gross_revenue: checked_product(net_revenue, multiplier, "period revenue with IVA")?,
            })
        })
        .collect()
}

/// Number of units in each status.
pub fn count_by_status<I>(statuses: I) -> BTreeMap<InventoryStatus, usize>
where
    I: IntoIterator<Item = InventoryStatus>,
{
    let mut counts = BTreeMap::new();
    for status in statuses {
        *counts.entry(status).or_insert(0) += 1;
    }
    counts
}

fn period_label(period: u32, granularity: Granularity) -> String {
    match granularity {
        Granularity::Monthly => MONTHS
            .get(period as usize - 1)
            .map(|m| m.to_string())
            .unwrap_or_default(),
        Granularity::Quarterly => format!("Q{period}"),
    }
}
