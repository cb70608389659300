use crate::error::{ProcessingError, Result};
use crate::models::MeasurementTable;
use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Serialize)]
pub struct DatasetStatistics {
    pub total_records: usize,
    pub unique_locations: usize,
    pub date_range: (NaiveDateTime, NaiveDateTime),
    pub parameters: Vec<ParameterStats>,
    pub geographic_bounds: GeographicBounds,
    pub invalid_coordinates: usize,
}

#[derive(Debug, Serialize)]
pub struct ParameterStats {
    pub parameter: String,
    pub records: usize,
    pub locations: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

#[derive(Debug, Serialize)]
pub struct GeographicBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

struct ParameterAccumulator<'a> {
    sum: f64,
    count: usize,
    min: f64,
    max: f64,
    locations: BTreeSet<&'a str>,
}

impl Default for ParameterAccumulator<'_> {
    fn default() -> Self {
        Self {
            sum: 0.0,
            count: 0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
            locations: BTreeSet::new(),
        }
    }
}

pub struct DatasetAnalyzer;

impl DatasetAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, table: &MeasurementTable) -> Result<DatasetStatistics> {
        let date_range = table
            .date_range()
            .ok_or_else(|| ProcessingError::MissingData("No records to analyze".to_string()))?;

        let first = &table.rows()[0];
        let mut bounds = GeographicBounds {
            min_lat: first.lat,
            max_lat: first.lat,
            min_lon: first.lon,
            max_lon: first.lon,
        };
        let mut invalid_coordinates = 0;

        let mut per_parameter: BTreeMap<&str, ParameterAccumulator> = BTreeMap::new();

        for record in table {
            if !record.has_valid_coordinates() {
                invalid_coordinates += 1;
            }

            bounds.min_lat = bounds.min_lat.min(record.lat);
            bounds.max_lat = bounds.max_lat.max(record.lat);
            bounds.min_lon = bounds.min_lon.min(record.lon);
            bounds.max_lon = bounds.max_lon.max(record.lon);

            let acc = per_parameter
                .entry(record.parameter.as_str())
                .or_default();
            acc.sum += record.value;
            acc.count += 1;
            acc.min = acc.min.min(record.value);
            acc.max = acc.max.max(record.value);
            acc.locations.insert(record.location.as_str());
        }

        let parameters = per_parameter
            .into_iter()
            .map(|(parameter, acc)| ParameterStats {
                parameter: parameter.to_string(),
                records: acc.count,
                locations: acc.locations.len(),
                min: acc.min,
                max: acc.max,
                mean: acc.sum / acc.count as f64,
            })
            .collect();

        Ok(DatasetStatistics {
            total_records: table.len(),
            unique_locations: table.locations().len(),
            date_range,
            parameters,
            geographic_bounds: bounds,
            invalid_coordinates,
        })
    }
}

impl DatasetStatistics {
    pub fn summary(&self) -> String {
        format!(
            "Parameters: {}\n\
            Locations: {} locations\n\
            Date Range: {} to {} ({} days)\n\
            Records: {} total\n\
            Coverage: {:.3}..{:.3} lat, {:.3}..{:.3} lon\n\
            Invalid coordinates: {}",
            self.parameters
                .iter()
                .map(|p| p.parameter.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            self.unique_locations,
            self.date_range.0,
            self.date_range.1,
            self.date_range
                .1
                .signed_duration_since(self.date_range.0)
                .num_days()
                + 1,
            self.total_records,
            self.geographic_bounds.min_lat,
            self.geographic_bounds.max_lat,
            self.geographic_bounds.min_lon,
            self.geographic_bounds.max_lon,
            self.invalid_coordinates
        )
    }

    pub fn detailed_summary(&self) -> String {
        let mut out = format!("{}\n\nPer-parameter statistics:", self.summary());
        for p in &self.parameters {
            out.push_str(&format!(
                "\n- {}: {} records at {} locations, min={:.2}, mean={:.2}, max={:.2}",
                p.parameter, p.records, p.locations, p.min, p.mean, p.max
            ));
        }
        out
    }
}

impl Default for DatasetAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Measurement;
    use chrono::NaiveDate;

    fn row(day: u32, location: &str, parameter: &str, value: f64, lat: f64) -> Measurement {
        let date = NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        Measurement::new(date, location, parameter, value, lat, -0.1)
    }

    #[test]
    fn test_analyze_table() -> Result<()> {
        let table = MeasurementTable::new(vec![
            row(3, "A", "PM2.5", 10.0, 51.0),
            row(1, "B", "PM2.5", 30.0, 52.0),
            row(2, "A", "NO2", 5.0, 95.0),
        ]);

        let stats = DatasetAnalyzer::new().analyze(&table)?;

        assert_eq!(stats.total_records, 3);
        assert_eq!(stats.unique_locations, 2);
        assert_eq!(stats.invalid_coordinates, 1);
        assert_eq!(stats.date_range.0.date(), NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(stats.geographic_bounds.max_lat, 95.0);

        let pm = &stats.parameters[1];
        assert_eq!(pm.parameter, "PM2.5");
        assert_eq!(pm.records, 2);
        assert_eq!(pm.locations, 2);
        assert_eq!(pm.mean, 20.0);

        let summary = stats.detailed_summary();
        assert!(summary.contains("Parameters: NO2, PM2.5"));
        assert!(summary.contains("(3 days)"));
        Ok(())
    }

    #[test]
    fn test_empty_table_is_an_error() {
        let err = DatasetAnalyzer::new()
            .analyze(&MeasurementTable::default())
            .unwrap_err();
        assert!(matches!(err, ProcessingError::MissingData(_)));
    }
}
