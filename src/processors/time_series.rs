use crate::models::{MeasurementTable, TimeSeriesPoint};
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Width of a time-series bucket
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl Frequency {
    /// Start of the bucket containing `ts`: midnight of the day, of the
    /// week's Monday, or of the month's first day.
    pub fn bucket_start(&self, ts: NaiveDateTime) -> NaiveDateTime {
        let date = ts.date();
        let start = match self {
            Frequency::Daily => date,
            Frequency::Weekly => {
                date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
            }
            Frequency::Monthly => {
                NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date)
            }
        };
        start.and_time(NaiveTime::MIN)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" | "d" => Ok(Frequency::Daily),
            "weekly" | "w" => Ok(Frequency::Weekly),
            "monthly" | "m" => Ok(Frequency::Monthly),
            other => Err(format!(
                "Unsupported frequency '{}', expected daily, weekly or monthly",
                other
            )),
        }
    }
}

/// Mean of `parameter` per (date bucket, location), ordered by date then
/// location. No matching rows gives an empty series.
pub fn aggregate_time_series(
    table: &MeasurementTable,
    parameter: &str,
    freq: Frequency,
) -> Vec<TimeSeriesPoint> {
    let mut groups: BTreeMap<(NaiveDateTime, &str), (f64, usize)> = BTreeMap::new();

    for record in table.iter().filter(|r| r.parameter == parameter) {
        let key = (freq.bucket_start(record.date), record.location.as_str());
        let entry = groups.entry(key).or_insert((0.0, 0));
        entry.0 += record.value;
        entry.1 += 1;
    }

    groups
        .into_iter()
        .map(|((date, location), (sum, count))| TimeSeriesPoint {
            date,
            location: location.to_string(),
            value: sum / count as f64,
        })
        .collect()
}
