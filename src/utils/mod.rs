pub mod constants;
pub mod dates;
pub mod filename;
pub mod progress;

pub use constants::*;
pub use dates::{parse_timestamp, DateBound};
pub use filename::generate_default_output_filename;
pub use progress::ProgressReporter;
