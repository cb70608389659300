pub mod comparison;
pub mod correlation;
pub mod filters;
pub mod time_series;

pub use comparison::aggregate_comparison;
pub use correlation::prepare_correlation;
pub use filters::{
    filter_by_date_range, filter_by_location, filter_by_parameter, ParameterSelection,
};
pub use time_series::{aggregate_time_series, Frequency};
