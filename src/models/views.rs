use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Mean value of one parameter at one location within one date bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    pub date: NaiveDateTime,
    pub location: String,
    pub value: f64,
}

/// Summary statistics of one parameter at one location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationSummary {
    pub location: String,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

/// A (date, location) pair where both parameters were measured
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationPoint {
    pub date: NaiveDateTime,
    pub location: String,
    pub first: f64,
    pub second: f64,
}

/// Inner join of two parameters' measurements on (date, location).
///
/// The value columns are named after the parameters they hold.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CorrelationTable {
    pub first_parameter: String,
    pub second_parameter: String,
    pub rows: Vec<CorrelationPoint>,
}

impl CorrelationTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column names: `date, location, <first>, <second>`.
    ///
    /// Correlating a parameter with itself suffixes the value columns with
    /// `_x` and `_y` so the names stay unique.
    pub fn column_names(&self) -> [String; 4] {
        let (first, second) = if self.first_parameter == self.second_parameter {
            (
                format!("{}_x", self.first_parameter),
                format!("{}_y", self.second_parameter),
            )
        } else {
            (self.first_parameter.clone(), self.second_parameter.clone())
        };

        ["date".to_string(), "location".to_string(), first, second]
    }
}
