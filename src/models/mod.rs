pub mod measurement;
pub mod table;
pub mod views;

pub use measurement::Measurement;
pub use table::MeasurementTable;
pub use views::{CorrelationPoint, CorrelationTable, LocationSummary, TimeSeriesPoint};
