use crate::error::Result;
use crate::models::{CorrelationTable, LocationSummary, TimeSeriesPoint};
use crate::utils::constants::{DEFAULT_DELIMITER, OUTPUT_DATETIME_FORMAT};
use std::io::Write;
use std::path::Path;

/// Writes aggregated views as delimited text with a header row
pub struct CsvWriter {
    delimiter: u8,
}

impl CsvWriter {
    pub fn new() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER as u8,
        }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    fn writer<W: Write>(&self, sink: W) -> csv::Writer<W> {
        csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .from_writer(sink)
    }

    pub fn write_time_series<W: Write>(&self, points: &[TimeSeriesPoint], sink: W) -> Result<()> {
        let mut writer = self.writer(sink);
        writer.write_record(["date", "location", "value"])?;
        for p in points {
            writer.write_record([
                p.date.format(OUTPUT_DATETIME_FORMAT).to_string(),
                p.location.clone(),
                p.value.to_string(),
            ])?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn write_comparison<W: Write>(&self, summaries: &[LocationSummary], sink: W) -> Result<()> {
        let mut writer = self.writer(sink);
        writer.write_record(["location", "mean", "min", "max"])?;
        for s in summaries {
            writer.write_record([
                s.location.clone(),
                s.mean.to_string(),
                s.min.to_string(),
                s.max.to_string(),
            ])?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn write_correlation<W: Write>(&self, table: &CorrelationTable, sink: W) -> Result<()> {
        let mut writer = self.writer(sink);
        writer.write_record(table.column_names())?;
        for row in &table.rows {
            writer.write_record([
                row.date.format(OUTPUT_DATETIME_FORMAT).to_string(),
                row.location.clone(),
                row.first.to_string(),
                row.second.to_string(),
            ])?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn write_time_series_file(&self, points: &[TimeSeriesPoint], path: &Path) -> Result<()> {
        self.write_time_series(points, std::fs::File::create(path)?)
    }

    pub fn write_comparison_file(&self, summaries: &[LocationSummary], path: &Path) -> Result<()> {
        self.write_comparison(summaries, std::fs::File::create(path)?)
    }

    pub fn write_correlation_file(&self, table: &CorrelationTable, path: &Path) -> Result<()> {
        self.write_correlation(table, std::fs::File::create(path)?)
    }
}

impl Default for CsvWriter {
    fn default() -> Self {
        Self::new()
    }
}
