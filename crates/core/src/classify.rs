//! Weekday/weekend column masks.

use crate::header::ColumnDayMap;

/// Per-column bucket membership derived from a [`ColumnDayMap`].
///
/// Columns whose label is `Unknown` are false in both masks, so they are
/// left out of both aggregates rather than counted as zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMasks {
    weekday: Vec<bool>,
    weekend: Vec<bool>,
}

impl ColumnMasks {
    #[must_use]
    pub fn from_day_map(map: &ColumnDayMap) -> Self {
        let (weekday, weekend) = map
            .labels()
            .iter()
            .map(|day| (day.is_weekday(), day.is_weekend()))
            .unzip();
        Self { weekday, weekend }
    }

    #[must_use]
    pub fn weekday(&self) -> &[bool] {
        &self.weekday
    }

    #[must_use]
    pub fn weekend(&self) -> &[bool] {
        &self.weekend
    }

    /// Number of data columns covered
    #[must_use]
    pub fn len(&self) -> usize {
        self.weekday.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.weekday.is_empty()
    }

    /// Masks for the first `columns` data columns, one entry per
    /// production/waste pair (the production column's label decides).
    #[must_use]
    pub fn pair_masks(&self, columns: usize) -> (Vec<bool>, Vec<bool>) {
        let columns = columns.min(self.len());
        let weekday = self.weekday[..columns].iter().step_by(2).copied().collect();
        let weekend = self.weekend[..columns].iter().step_by(2).copied().collect();
        (weekday, weekend)
    }
}
