pub mod analyzers;
pub mod cli;
pub mod error;
pub mod models;
pub mod processors;
pub mod readers;
pub mod settings;
pub mod utils;
pub mod writers;

pub use error::{ProcessingError, Result};
pub use models::{
    CorrelationPoint, CorrelationTable, LocationSummary, Measurement, MeasurementTable,
    TimeSeriesPoint,
};
pub use processors::{
    aggregate_comparison, aggregate_time_series, filter_by_date_range, filter_by_location,
    filter_by_parameter, prepare_correlation, Frequency, ParameterSelection,
};
pub use readers::{load, MeasurementReader};
pub use utils::DateBound;
