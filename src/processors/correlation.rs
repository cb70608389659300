use crate::models::{CorrelationPoint, CorrelationTable, MeasurementTable};
use chrono::NaiveDateTime;
use std::collections::HashMap;

/// Pair the values of two parameters measured at the same timestamp and
/// location.
///
/// This is an inner join on `(date, location)`: keys seen for only one
/// parameter are dropped, and a key repeated on both sides yields every
/// combination of its values. Rows follow the order of `param1`'s readings.
pub fn prepare_correlation(
    table: &MeasurementTable,
    param1: &str,
    param2: &str,
) -> CorrelationTable {
    let mut second_values: HashMap<(NaiveDateTime, &str), Vec<f64>> = HashMap::new();
    for record in table.iter().filter(|r| r.parameter == param2) {
        second_values
            .entry((record.date, record.location.as_str()))
            .or_default()
            .push(record.value);
    }

    let mut rows = Vec::new();
    for record in table.iter().filter(|r| r.parameter == param1) {
        let key = (record.date, record.location.as_str());
        if let Some(matches) = second_values.get(&key) {
            rows.extend(matches.iter().map(|&second| CorrelationPoint {
                date: record.date,
                location: record.location.clone(),
                first: record.value,
                second,
            }));
        }
    }

    CorrelationTable {
        first_parameter: param1.to_string(),
        second_parameter: param2.to_string(),
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Measurement;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn at(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn row(day: u32, location: &str, parameter: &str, value: f64) -> Measurement {
        Measurement::new(at(day), location, parameter, value, 51.5, -0.1)
    }

    fn pair(day: u32, location: &str, first: f64, second: f64) -> CorrelationPoint {
        CorrelationPoint {
            date: at(day),
            location: location.to_string(),
            first,
            second,
        }
    }

    #[test]
    fn test_join_is_inner() {
        let table = MeasurementTable::new(vec![
            row(1, "L", "PM2.5", 12.0),
            row(1, "L", "NO2", 30.0),
            row(2, "L", "PM2.5", 14.0), // no NO2 on day 2
            row(3, "L", "NO2", 25.0),   // no PM2.5 on day 3
            row(1, "M", "NO2", 8.0),    // no PM2.5 at M
        ]);

        let joined = prepare_correlation(&table, "PM2.5", "NO2");

        assert_eq!(joined.first_parameter, "PM2.5");
        assert_eq!(joined.second_parameter, "NO2");
        assert_eq!(joined.rows, vec![pair(1, "L", 12.0, 30.0)]);
    }

    #[test]
    fn test_duplicate_keys_produce_every_combination() {
        let table = MeasurementTable::new(vec![
            row(1, "L", "PM2.5", 1.0),
            row(1, "L", "PM2.5", 2.0),
            row(1, "L", "NO2", 10.0),
            row(1, "L", "NO2", 20.0),
        ]);

        let joined = prepare_correlation(&table, "PM2.5", "NO2");
        assert_eq!(
            joined.rows,
            vec![
                pair(1, "L", 1.0, 10.0),
                pair(1, "L", 1.0, 20.0),
                pair(1, "L", 2.0, 10.0),
                pair(1, "L", 2.0, 20.0),
            ]
        );
    }

    #[test]
    fn test_missing_parameter_gives_empty_table() {
        let table = MeasurementTable::new(vec![row(1, "L", "PM2.5", 1.0)]);
        let joined = prepare_correlation(&table, "PM2.5", "SO2");
        assert!(joined.is_empty());
        assert_eq!(joined.column_names(), ["date", "location", "PM2.5", "SO2"]);
    }
}
