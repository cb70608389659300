use crate::error::Result;
use crate::models::{CorrelationTable, LocationSummary, Measurement, TimeSeriesPoint};
use crate::processors::{comparison, correlation, filters, time_series, Frequency};
use crate::processors::ParameterSelection;
use crate::utils::DateBound;
use chrono::NaiveDateTime;
use std::collections::BTreeSet;

/// In-memory measurement table, rows kept in load order.
///
/// Every filter and aggregation borrows the table and returns a new value,
/// so one loaded table can feed any number of views.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeasurementTable {
    rows: Vec<Measurement>,
}

impl MeasurementTable {
    pub fn new(rows: Vec<Measurement>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Measurement] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Measurement> {
        self.rows.iter()
    }

    /// Distinct locations, sorted
    pub fn locations(&self) -> BTreeSet<&str> {
        self.rows.iter().map(|r| r.location.as_str()).collect()
    }

    /// Distinct parameters, sorted
    pub fn parameters(&self) -> BTreeSet<&str> {
        self.rows.iter().map(|r| r.parameter.as_str()).collect()
    }

    /// Earliest and latest timestamp, `None` when empty
    pub fn date_range(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let first = self.rows.first()?.date;
        Some(self.rows.iter().fold((first, first), |(lo, hi), r| {
            (lo.min(r.date), hi.max(r.date))
        }))
    }

    pub fn filter_by_date_range(
        &self,
        start: impl Into<DateBound>,
        end: impl Into<DateBound>,
    ) -> Result<Self> {
        filters::filter_by_date_range(self, start, end)
    }

    pub fn filter_by_location<S: AsRef<str>>(&self, locations: &[S]) -> Self {
        filters::filter_by_location(self, locations)
    }

    pub fn filter_by_parameter(&self, parameters: impl Into<ParameterSelection>) -> Self {
        filters::filter_by_parameter(self, parameters)
    }

    pub fn aggregate_time_series(&self, parameter: &str, freq: Frequency) -> Vec<TimeSeriesPoint> {
        time_series::aggregate_time_series(self, parameter, freq)
    }

    pub fn aggregate_comparison(&self, parameter: &str) -> Vec<LocationSummary> {
        comparison::aggregate_comparison(self, parameter)
    }

    pub fn prepare_correlation(&self, param1: &str, param2: &str) -> CorrelationTable {
        correlation::prepare_correlation(self, param1, param2)
    }
}

impl From<Vec<Measurement>> for MeasurementTable {
    fn from(rows: Vec<Measurement>) -> Self {
        Self::new(rows)
    }
}

impl FromIterator<Measurement> for MeasurementTable {
    fn from_iter<I: IntoIterator<Item = Measurement>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a MeasurementTable {
    type Item = &'a Measurement;
    type IntoIter = std::slice::Iter<'a, Measurement>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
