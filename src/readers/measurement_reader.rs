use crate::error::{ProcessingError, Result};
use crate::models::{Measurement, MeasurementTable};
use crate::utils::constants::{
    COLUMN_DATE, COLUMN_LAT, COLUMN_LOCATION, COLUMN_LON, COLUMN_PARAMETER, COLUMN_VALUE,
    DEFAULT_DELIMITER, MISSING_VALUE_TOKENS, REQUIRED_COLUMNS,
};
use crate::utils::dates::parse_timestamp;
use csv::StringRecord;
use encoding_rs::{UTF_8, WINDOWS_1252};
use std::borrow::Cow;
use std::path::Path;
use tracing::{debug, warn};

/// Row accounting for a single load
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub rows_read: usize,
    pub rows_dropped: usize,
}

impl LoadReport {
    pub fn rows_kept(&self) -> usize {
        self.rows_read - self.rows_dropped
    }
}

/// Positions of the required columns within the header row
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    date: usize,
    location: usize,
    parameter: usize,
    value: usize,
    lat: usize,
    lon: usize,
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|&&name| find(name).is_none())
            .map(|name| name.to_string())
            .collect();

        match (
            find(COLUMN_DATE),
            find(COLUMN_LOCATION),
            find(COLUMN_PARAMETER),
            find(COLUMN_VALUE),
            find(COLUMN_LAT),
            find(COLUMN_LON),
        ) {
            (Some(date), Some(location), Some(parameter), Some(value), Some(lat), Some(lon)) => {
                Ok(Self {
                    date,
                    location,
                    parameter,
                    value,
                    lat,
                    lon,
                })
            }
            _ => Err(ProcessingError::MissingColumns { columns: missing }),
        }
    }
}

pub struct MeasurementReader {
    delimiter: u8,
}

impl MeasurementReader {
    pub fn new() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER as u8,
        }
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Result<Self> {
        if !delimiter.is_ascii() {
            return Err(ProcessingError::Config(format!(
                "Delimiter must be a single ASCII character, got '{}'",
                delimiter
            )));
        }
        self.delimiter = delimiter as u8;
        Ok(self)
    }

    /// Load a measurement table from a delimited file.
    ///
    /// Rows whose `value`, `lat` or `lon` is missing or not a finite number
    /// are dropped. A `date` that cannot be parsed fails the whole load.
    pub fn read_measurements(&self, path: &Path) -> Result<MeasurementTable> {
        self.read_measurements_with_report(path)
            .map(|(table, _)| table)
    }

    pub fn read_measurements_with_report(
        &self,
        path: &Path,
    ) -> Result<(MeasurementTable, LoadReport)> {
        let bytes = std::fs::read(path)?;
        let text = decode_text(&bytes);
        let (table, report) = self.parse_measurements(&text)?;

        debug!(
            path = %path.display(),
            rows_read = report.rows_read,
            rows_dropped = report.rows_dropped,
            "Loaded measurement file"
        );

        Ok((table, report))
    }

    /// Parse delimited text with a header row into a measurement table
    pub fn parse_measurements(&self, text: &str) -> Result<(MeasurementTable, LoadReport)> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::Headers)
            .from_reader(text.as_bytes());

        let columns = ColumnIndex::from_headers(reader.headers()?)?;

        let mut rows = Vec::new();
        let mut report = LoadReport::default();

        for (index, record_result) in reader.records().enumerate() {
            let record = record_result?;
            report.rows_read += 1;

            match self.parse_record(&record, &columns, index + 1)? {
                Some(measurement) => rows.push(measurement),
                None => report.rows_dropped += 1,
            }
        }

        Ok((MeasurementTable::new(rows), report))
    }

    /// Parse a single data row; `Ok(None)` marks an incomplete row
    fn parse_record(
        &self,
        record: &StringRecord,
        columns: &ColumnIndex,
        row: usize,
    ) -> Result<Option<Measurement>> {
        let cell = |idx: usize| record.get(idx).unwrap_or("");

        let date_str = cell(columns.date);
        let date = parse_timestamp(date_str).map_err(|_| ProcessingError::DateParse {
            value: date_str.to_string(),
            row: Some(row),
        })?;

        let (value, lat, lon) = match (
            parse_numeric(cell(columns.value)),
            parse_numeric(cell(columns.lat)),
            parse_numeric(cell(columns.lon)),
        ) {
            (Some(value), Some(lat), Some(lon)) => (value, lat, lon),
            _ => return Ok(None),
        };

        Ok(Some(Measurement::new(
            date,
            cell(columns.location),
            cell(columns.parameter),
            value,
            lat,
            lon,
        )))
    }
}

impl Default for MeasurementReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Load a measurement table from a comma-separated file
pub fn load(path: impl AsRef<Path>) -> Result<MeasurementTable> {
    MeasurementReader::new().read_measurements(path.as_ref())
}

/// Parse a numeric cell, treating NA markers, garbage and non-finite values as missing
fn parse_numeric(cell: &str) -> Option<f64> {
    let trimmed = cell.trim();
    if MISSING_VALUE_TOKENS.contains(&trimmed) {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Decode file contents as UTF-8 (BOM stripped), falling back to Windows-1252
fn decode_text(bytes: &[u8]) -> Cow<'_, str> {
    let (text, had_errors) = UTF_8.decode_with_bom_removal(bytes);
    if !had_errors {
        return text;
    }

    warn!("Input is not valid UTF-8, decoding as Windows-1252");
    let (text, _, _) = WINDOWS_1252.decode(bytes);
    text
}
