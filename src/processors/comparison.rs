use crate::models::{LocationSummary, MeasurementTable};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy)]
struct RunningStats {
    sum: f64,
    count: usize,
    min: f64,
    max: f64,
}

impl RunningStats {
    fn new(value: f64) -> Self {
        Self {
            sum: value,
            count: 1,
            min: value,
            max: value,
        }
    }

    fn push(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }
}

/// Mean, min and max of `parameter` per location, ordered by location
pub fn aggregate_comparison(table: &MeasurementTable, parameter: &str) -> Vec<LocationSummary> {
    let mut groups: BTreeMap<&str, RunningStats> = BTreeMap::new();

    for record in table.iter().filter(|r| r.parameter == parameter) {
        groups
            .entry(record.location.as_str())
            .and_modify(|stats| stats.push(record.value))
            .or_insert_with(|| RunningStats::new(record.value));
    }

    groups
        .into_iter()
        .map(|(location, stats)| LocationSummary {
            location: location.to_string(),
            mean: stats.sum / stats.count as f64,
            min: stats.min,
            max: stats.max,
        })
        .collect()
}
