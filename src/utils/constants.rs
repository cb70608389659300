/// Required input column names
pub const COLUMN_DATE: &str = "date";
pub const COLUMN_LOCATION: &str = "location";
pub const COLUMN_PARAMETER: &str = "parameter";
pub const COLUMN_VALUE: &str = "value";
pub const COLUMN_LAT: &str = "lat";
pub const COLUMN_LON: &str = "lon";

pub const REQUIRED_COLUMNS: [&str; 6] = [
    COLUMN_DATE,
    COLUMN_LOCATION,
    COLUMN_PARAMETER,
    COLUMN_VALUE,
    COLUMN_LAT,
    COLUMN_LON,
];

/// Cell contents treated as a missing numeric value
pub const MISSING_VALUE_TOKENS: [&str; 12] = [
    "", "NA", "N/A", "n/a", "NaN", "nan", "-nan", "null", "NULL", "None", "#N/A", "<NA>",
];

/// Output timestamp format for text writers
pub const OUTPUT_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Processing defaults
pub const DEFAULT_DELIMITER: char = ',';
pub const DEFAULT_ROW_GROUP_SIZE: usize = 10000;
pub const DEFAULT_OUTPUT_DIR: &str = "output";
pub const ENV_PREFIX: &str = "AIRQ";

/// Parquet compression options
pub const COMPRESSION_SNAPPY: &str = "snappy";
pub const COMPRESSION_GZIP: &str = "gzip";
pub const COMPRESSION_LZ4: &str = "lz4";
pub const COMPRESSION_ZSTD: &str = "zstd";
pub const COMPRESSION_NONE: &str = "none";
