use crate::error::{ProcessingError, Result};
use crate::models::{CorrelationTable, LocationSummary, TimeSeriesPoint};
use crate::utils::constants::DEFAULT_ROW_GROUP_SIZE;
use arrow::array::{ArrayRef, Float64Array, StringArray, TimestampMillisecondArray};
use arrow::datatypes::{DataType, Field, Schema, TimeUnit};
use arrow::record_batch::RecordBatch;
use chrono::NaiveDateTime;
use parquet::arrow::ArrowWriter;
use parquet::basic::{Compression, GzipLevel, ZstdLevel};
use parquet::file::properties::WriterProperties;
use std::fs::File;
use std::path::Path;
use std::sync::Arc;

pub struct ParquetWriter {
    compression: Compression,
    row_group_size: usize,
}

impl ParquetWriter {
    pub fn new() -> Self {
        Self {
            compression: Compression::SNAPPY,
            row_group_size: DEFAULT_ROW_GROUP_SIZE,
        }
    }

    pub fn with_compression(mut self, compression: &str) -> Result<Self> {
        self.compression = match compression.to_lowercase().as_str() {
            "snappy" => Compression::SNAPPY,
            "gzip" => Compression::GZIP(GzipLevel::default()),
            "lz4" => Compression::LZ4,
            "zstd" => Compression::ZSTD(ZstdLevel::default()),
            "none" => Compression::UNCOMPRESSED,
            _ => {
                return Err(ProcessingError::Config(format!(
                    "Unsupported compression: {}",
                    compression
                )))
            }
        };
        Ok(self)
    }

    pub fn with_row_group_size(mut self, size: usize) -> Self {
        self.row_group_size = size;
        self
    }

    /// Write a time series as `date, location, value`
    pub fn write_time_series(&self, points: &[TimeSeriesPoint], path: &Path) -> Result<()> {
        let schema = Arc::new(Schema::new(vec![
            timestamp_field("date"),
            Field::new("location", DataType::Utf8, false),
            Field::new("value", DataType::Float64, false),
        ]));

        let columns: Vec<ArrayRef> = vec![
            Arc::new(timestamp_array(points.iter().map(|p| p.date))),
            Arc::new(StringArray::from_iter_values(
                points.iter().map(|p| p.location.as_str()),
            )),
            Arc::new(Float64Array::from_iter_values(points.iter().map(|p| p.value))),
        ];

        self.write_batch(RecordBatch::try_new(schema, columns)?, path)
    }

    /// Write location statistics as `location, mean, min, max`
    pub fn write_comparison(&self, summaries: &[LocationSummary], path: &Path) -> Result<()> {
        let schema = Arc::new(Schema::new(vec![
            Field::new("location", DataType::Utf8, false),
            Field::new("mean", DataType::Float64, false),
            Field::new("min", DataType::Float64, false),
            Field::new("max", DataType::Float64, false),
        ]));

        let columns: Vec<ArrayRef> = vec![
            Arc::new(StringArray::from_iter_values(
                summaries.iter().map(|s| s.location.as_str()),
            )),
            Arc::new(Float64Array::from_iter_values(summaries.iter().map(|s| s.mean))),
            Arc::new(Float64Array::from_iter_values(summaries.iter().map(|s| s.min))),
            Arc::new(Float64Array::from_iter_values(summaries.iter().map(|s| s.max))),
        ];

        self.write_batch(RecordBatch::try_new(schema, columns)?, path)
    }

    /// Write a correlation join with value columns named after the parameters
    pub fn write_correlation(&self, table: &CorrelationTable, path: &Path) -> Result<()> {
        let [date, location, first, second] = table.column_names();
        let schema = Arc::new(Schema::new(vec![
            timestamp_field(&date),
            Field::new(location, DataType::Utf8, false),
            Field::new(first, DataType::Float64, false),
            Field::new(second, DataType::Float64, false),
        ]));

        let rows = &table.rows;
        let columns: Vec<ArrayRef> = vec![
            Arc::new(timestamp_array(rows.iter().map(|r| r.date))),
            Arc::new(StringArray::from_iter_values(
                rows.iter().map(|r| r.location.as_str()),
            )),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.first))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.second))),
        ];

        self.write_batch(RecordBatch::try_new(schema, columns)?, path)
    }

    fn write_batch(&self, batch: RecordBatch, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        let props = WriterProperties::builder()
            .set_compression(self.compression)
            .set_max_row_group_size(self.row_group_size)
            .build();

        let mut writer = ArrowWriter::try_new(file, batch.schema(), Some(props))?;
        writer.write(&batch)?;
        writer.close()?;

        Ok(())
    }

    /// Get file statistics
    pub fn get_file_info(&self, path: &Path) -> Result<ParquetFileInfo> {
        use parquet::file::reader::{FileReader, SerializedFileReader};

        let file = File::open(path)?;
        let reader = SerializedFileReader::new(file)?;
        let metadata = reader.metadata();

        let total_rows = metadata.file_metadata().num_rows();
        let row_groups = metadata.num_row_groups();
        let columns = metadata
            .file_metadata()
            .schema_descr()
            .columns()
            .iter()
            .map(|c| c.name().to_string())
            .collect();
        let file_size = std::fs::metadata(path)?.len();

        Ok(ParquetFileInfo {
            total_rows,
            row_groups: row_groups as i32,
            columns,
            file_size,
            compression: self.compression,
        })
    }
}

impl Default for ParquetWriter {
    fn default() -> Self {
        Self::new()
    }
}

fn timestamp_field(name: &str) -> Field {
    Field::new(name, DataType::Timestamp(TimeUnit::Millisecond, None), false)
}

fn timestamp_array(dates: impl Iterator<Item = NaiveDateTime>) -> TimestampMillisecondArray {
    TimestampMillisecondArray::from_iter_values(dates.map(|d| d.and_utc().timestamp_millis()))
}

#[derive(Debug)]
pub struct ParquetFileInfo {
    pub total_rows: i64,
    pub row_groups: i32,
    pub columns: Vec<String>,
    pub file_size: u64,
    pub compression: Compression,
}

impl ParquetFileInfo {
    pub fn summary(&self) -> String {
        format!(
            "Parquet File Summary:\n\
            - Total rows: {}\n\
            - Columns: {}\n\
            - Row groups: {}\n\
            - File size: {:.2} KB\n\
            - Compression: {:?}",
            self.total_rows,
            self.columns.join(", "),
            self.row_groups,
            self.file_size as f64 / 1024.0,
            self.compression
        )
    }
}
