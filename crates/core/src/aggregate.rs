//! Per-item weekday/weekend aggregation.

use crate::scanner::PairedSeries;
use serde::{Deserialize, Serialize};

/// Round to one decimal place, half away from zero.
fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Sums for one bucket (weekday or weekend) of one item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BucketStats {
    pub production: i64,
    pub sales: i64,
    pub waste: i64,
    /// Percent, one decimal; zero when nothing was produced
    pub waste_rate: f64,
}

impl BucketStats {
    /// Sum the pairs selected by `mask`.
    ///
    /// Sales are production minus waste and may go negative when waste
    /// exceeds production. Sums are truncated toward zero.
    #[must_use]
    pub fn from_pairs(production: &[f64], waste: &[f64], mask: &[bool]) -> Self {
        let (prod, wst) = production
            .iter()
            .zip(waste)
            .zip(mask)
            .filter(|(_, selected)| **selected)
            .fold((0.0_f64, 0.0_f64), |(p, w), ((pv, wv), _)| (p + *pv, w + *wv));

        let waste_rate = if prod > 0.0 {
            round1(wst / prod * 100.0)
        } else {
            0.0
        };

        Self {
            production: prod as i64,
            sales: (prod - wst) as i64,
            waste: wst as i64,
            waste_rate,
        }
    }
}

/// Aggregated statistics for one item row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub name: String,
    /// Zero-based grid row the item came from
    pub row: usize,
    pub weekday: BucketStats,
    pub weekend: BucketStats,
    pub is_total: bool,
    /// Data cells that were not numeric and counted as zero
    pub defaulted_cells: usize,
}

impl ItemRecord {
    /// Build a record from a row's paired series.
    #[must_use]
    pub fn from_series(name: &str, row: usize, series: &PairedSeries, is_total: bool) -> Self {
        Self {
            name: name.to_string(),
            row,
            weekday: BucketStats::from_pairs(&series.production, &series.waste, &series.is_weekday),
            weekend: BucketStats::from_pairs(&series.production, &series.waste, &series.is_weekend),
            is_total,
            defaulted_cells: series.defaulted,
        }
    }

    #[must_use]
    pub fn weekday_production(&self) -> i64 {
        self.weekday.production
    }

    #[must_use]
    pub fn weekday_sales(&self) -> i64 {
        self.weekday.sales
    }

    #[must_use]
    pub fn weekday_waste(&self) -> i64 {
        self.weekday.waste
    }

    #[must_use]
    pub fn weekday_waste_rate(&self) -> f64 {
        self.weekday.waste_rate
    }

    #[must_use]
    pub fn weekend_production(&self) -> i64 {
        self.weekend.production
    }

    #[must_use]
    pub fn weekend_sales(&self) -> i64 {
        self.weekend.sales
    }

    #[must_use]
    pub fn weekend_waste(&self) -> i64 {
        self.weekend.waste
    }

    #[must_use]
    pub fn weekend_waste_rate(&self) -> f64 {
        self.weekend.waste_rate
    }

    /// Whether any cell in the row had to be defaulted
    #[must_use]
    pub fn has_defaulted_cells(&self) -> bool {
        self.defaulted_cells > 0
    }
}
