use crate::error::{ProcessingError, Result};
use crate::models::MeasurementTable;
use crate::utils::DateBound;
use chrono::Duration;
use std::collections::HashSet;
use tracing::debug;

/// One parameter identifier or several
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParameterSelection {
    One(String),
    Many(Vec<String>),
}

impl ParameterSelection {
    /// The selection as a set; a single identifier becomes a one-element set
    pub fn to_set(&self) -> HashSet<&str> {
        match self {
            ParameterSelection::One(p) => HashSet::from([p.as_str()]),
            ParameterSelection::Many(ps) => ps.iter().map(String::as_str).collect(),
        }
    }
}

impl From<&str> for ParameterSelection {
    fn from(value: &str) -> Self {
        ParameterSelection::One(value.to_string())
    }
}

impl From<String> for ParameterSelection {
    fn from(value: String) -> Self {
        ParameterSelection::One(value)
    }
}

impl From<Vec<String>> for ParameterSelection {
    fn from(value: Vec<String>) -> Self {
        ParameterSelection::Many(value)
    }
}

impl From<Vec<&str>> for ParameterSelection {
    fn from(value: Vec<&str>) -> Self {
        ParameterSelection::Many(value.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for ParameterSelection {
    fn from(value: &[&str]) -> Self {
        ParameterSelection::Many(value.iter().map(|s| s.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for ParameterSelection {
    fn from(value: [&str; N]) -> Self {
        ParameterSelection::Many(value.iter().map(|s| s.to_string()).collect())
    }
}

/// Keep rows with `start <= date < end + 1 day`, so every reading taken on
/// the calendar day of `end` is included. `start > end` selects nothing.
pub fn filter_by_date_range(
    table: &MeasurementTable,
    start: impl Into<DateBound>,
    end: impl Into<DateBound>,
) -> Result<MeasurementTable> {
    let start = start.into().resolve()?;
    let end = end.into().resolve()?;
    let end_exclusive = end.checked_add_signed(Duration::days(1)).ok_or_else(|| {
        ProcessingError::InvalidFormat(format!("End date {} is out of range", end))
    })?;

    let filtered: MeasurementTable = table
        .iter()
        .filter(|r| r.date >= start && r.date < end_exclusive)
        .cloned()
        .collect();

    debug!(
        start = %start,
        end_exclusive = %end_exclusive,
        kept = filtered.len(),
        of = table.len(),
        "Filtered by date range"
    );

    Ok(filtered)
}

/// Keep rows whose location is selected. An empty selection keeps every row.
pub fn filter_by_location<S: AsRef<str>>(
    table: &MeasurementTable,
    locations: &[S],
) -> MeasurementTable {
    if locations.is_empty() {
        return table.clone();
    }

    let selected: HashSet<&str> = locations.iter().map(|s| s.as_ref()).collect();
    table
        .iter()
        .filter(|r| selected.contains(r.location.as_str()))
        .cloned()
        .collect()
}

/// Keep rows whose parameter is selected.
///
/// Unlike [`filter_by_location`], an empty selection is not a wildcard:
/// it matches no rows.
pub fn filter_by_parameter(
    table: &MeasurementTable,
    parameters: impl Into<ParameterSelection>,
) -> MeasurementTable {
    let selection = parameters.into();
    let selected = selection.to_set();

    table
        .iter()
        .filter(|r| selected.contains(r.parameter.as_str()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Measurement;
    use chrono::{NaiveDate, NaiveDateTime};
    use pretty_assertions::assert_eq;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn row(day: u32, hour: u32, location: &str, parameter: &str, value: f64) -> Measurement {
        Measurement::new(at(day, hour), location, parameter, value, 51.5, -0.1)
    }

    fn sample() -> MeasurementTable {
        MeasurementTable::new(vec![
            row(1, 0, "A", "PM2.5", 10.0),
            row(2, 9, "B", "NO2", 20.0),
            row(3, 0, "A", "NO2", 30.0),
            row(3, 23, "C", "PM2.5", 40.0),
            row(4, 0, "B", "PM2.5", 50.0),
        ])
    }

    fn values(table: &MeasurementTable) -> Vec<f64> {
        table.iter().map(|r| r.value).collect()
    }

    #[test]
    fn test_date_range_includes_whole_end_day() -> Result<()> {
        let filtered = filter_by_date_range(&sample(), "2024-01-02", "2024-01-03")?;
        assert_eq!(values(&filtered), vec![20.0, 30.0, 40.0]);
        Ok(())
    }

    #[test]
    fn test_date_range_excludes_day_after_end() -> Result<()> {
        let filtered = filter_by_date_range(&sample(), "2024-01-01", "2024-01-03")?;
        assert!(filtered.iter().all(|r| r.date < at(4, 0)));
        assert_eq!(filtered.len(), 4);
        Ok(())
    }

    #[test]
    fn test_date_range_start_is_inclusive() -> Result<()> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let filtered = filter_by_date_range(&sample(), start, at(1, 0))?;
        assert_eq!(values(&filtered), vec![10.0]);
        Ok(())
    }

    #[test]
    fn test_date_range_with_start_after_end_is_empty() -> Result<()> {
        let filtered = filter_by_date_range(&sample(), "2024-01-04", "2024-01-01")?;
        assert!(filtered.is_empty());
        Ok(())
    }

    #[test]
    fn test_date_range_rejects_unparseable_bounds() {
        let err = filter_by_date_range(&sample(), "soon", "2024-01-01").unwrap_err();
        assert!(matches!(err, ProcessingError::DateParse { .. }));
        assert!(filter_by_date_range(&sample(), "2024-01-01", "later").is_err());
    }

    #[test]
    fn test_date_range_end_on_last_representable_day_is_an_error() {
        let err = filter_by_date_range(&sample(), "2024-01-01", "+262142-12-31").unwrap_err();
        assert!(matches!(err, ProcessingError::InvalidFormat(_)));
    }

    #[test]
    fn test_location_filter_empty_selection_is_identity() {
        let table = sample();
        let filtered = filter_by_location::<&str>(&table, &[]);
        assert_eq!(filtered, table);
    }

    #[test]
    fn test_location_filter_selects_members() {
        let filtered = filter_by_location(&sample(), &["A", "C", "Unknown"]);
        assert_eq!(values(&filtered), vec![10.0, 30.0, 40.0]);

        let none = filter_by_location(&sample(), &["Unknown"]);
        assert!(none.is_empty());
    }

    #[test]
    fn test_parameter_filter_scalar_matches_collection() {
        let table = sample();
        let scalar = filter_by_parameter(&table, "PM2.5");
        let collection = filter_by_parameter(&table, vec!["PM2.5"]);

        assert_eq!(scalar, collection);
        assert_eq!(values(&scalar), vec![10.0, 40.0, 50.0]);
    }

    #[test]
    fn test_parameter_filter_multiple() {
        let filtered = filter_by_parameter(&sample(), ["NO2", "PM2.5"]);
        assert_eq!(filtered.len(), 5);
    }

    #[test]
    fn test_parameter_filter_empty_selection_matches_nothing() {
        let filtered = filter_by_parameter(&sample(), Vec::<String>::new());
        assert!(filtered.is_empty());
    }

    #[test]
    fn test_filters_are_idempotent() -> Result<()> {
        let table = sample();

        let once = filter_by_date_range(&table, "2024-01-02", "2024-01-03")?;
        let twice = filter_by_date_range(&once, "2024-01-02", "2024-01-03")?;
        assert_eq!(once, twice);

        let once = filter_by_location(&table, &["B"]);
        assert_eq!(filter_by_location(&once, &["B"]), once);

        let once = filter_by_parameter(&table, "NO2");
        assert_eq!(filter_by_parameter(&once, "NO2"), once);

        Ok(())
    }
}
