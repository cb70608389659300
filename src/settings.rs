use crate::error::Result;
use crate::processors::Frequency;
use crate::utils::constants::{
    COMPRESSION_GZIP, COMPRESSION_LZ4, COMPRESSION_NONE, COMPRESSION_SNAPPY, COMPRESSION_ZSTD,
    DEFAULT_OUTPUT_DIR, DEFAULT_ROW_GROUP_SIZE, ENV_PREFIX,
};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use validator::{Validate, ValidationError};

/// Runtime settings: built-in defaults, then an optional TOML/YAML/JSON
/// file, then `AIRQ_*` environment variables.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct Settings {
    #[validate(length(equal = 1), custom(function = "validate_delimiter"))]
    pub delimiter: String,

    pub default_frequency: Frequency,

    #[validate(custom(function = "validate_compression"))]
    pub compression: String,

    #[validate(range(min = 1))]
    pub row_group_size: usize,

    pub output_dir: PathBuf,
}

impl Settings {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, Environment::with_prefix(ENV_PREFIX))
    }

    fn load_with_env(path: Option<&Path>, env: Environment) -> Result<Self> {
        let defaults = Settings::default();
        let mut builder = Config::builder()
            .set_default("delimiter", defaults.delimiter)?
            .set_default("default_frequency", defaults.default_frequency.as_str())?
            .set_default("compression", defaults.compression)?
            .set_default("row_group_size", defaults.row_group_size as i64)?
            .set_default(
                "output_dir",
                defaults.output_dir.to_string_lossy().into_owned(),
            )?;

        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }

        let settings: Settings = builder.add_source(env).build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn delimiter_char(&self) -> char {
        self.delimiter.chars().next().unwrap_or(',')
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            delimiter: ",".to_string(),
            default_frequency: Frequency::default(),
            compression: COMPRESSION_SNAPPY.to_string(),
            row_group_size: DEFAULT_ROW_GROUP_SIZE,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

fn validate_delimiter(value: &str) -> std::result::Result<(), ValidationError> {
    if value.is_ascii() && value != "\n" && value != "\"" {
        Ok(())
    } else {
        Err(ValidationError::new("delimiter"))
    }
}

fn validate_compression(value: &str) -> std::result::Result<(), ValidationError> {
    match value.to_lowercase().as_str() {
        COMPRESSION_SNAPPY | COMPRESSION_GZIP | COMPRESSION_LZ4 | COMPRESSION_ZSTD
        | COMPRESSION_NONE => Ok(()),
        _ => Err(ValidationError::new("compression")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProcessingError;
    use std::io::Write;

    // A prefix no test environment sets, so the process environment cannot leak in
    fn isolated_env() -> Environment {
        Environment::with_prefix("AIRQ_TEST_UNSET")
    }

    fn toml_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        write!(file, "{}", contents).unwrap();
        file
    }

    #[test]
    fn test_defaults() -> Result<()> {
        let settings = Settings::load_with_env(None, isolated_env())?;
        assert_eq!(settings.delimiter_char(), ',');
        assert_eq!(settings.default_frequency, Frequency::Daily);
        assert_eq!(settings.compression, "snappy");
        assert_eq!(settings.row_group_size, 10000);
        assert_eq!(settings.output_dir, PathBuf::from("output"));
        Ok(())
    }

    #[test]
    fn test_file_overrides_defaults() -> Result<()> {
        let file = toml_file(
            "delimiter = \";\"\n\
             default_frequency = \"monthly\"\n\
             compression = \"zstd\"\n\
             row_group_size = 500\n",
        );
        let settings = Settings::load_with_env(Some(file.path()), isolated_env())?;

        assert_eq!(settings.delimiter_char(), ';');
        assert_eq!(settings.default_frequency, Frequency::Monthly);
        assert_eq!(settings.compression, "zstd");
        assert_eq!(settings.row_group_size, 500);
        Ok(())
    }

    #[test]
    fn test_invalid_values_rejected() {
        let file = toml_file("delimiter = \"::\"\n");
        let err = Settings::load_with_env(Some(file.path()), isolated_env()).unwrap_err();
        assert!(matches!(err, ProcessingError::Validation(_)));

        let file = toml_file("row_group_size = 0\n");
        let err = Settings::load_with_env(Some(file.path()), isolated_env()).unwrap_err();
        assert!(matches!(err, ProcessingError::Validation(_)));

        let file = toml_file("compression = \"brotli\"\n");
        assert!(Settings::load_with_env(Some(file.path()), isolated_env()).is_err());

        let file = toml_file("default_frequency = \"hourly\"\n");
        let err = Settings::load_with_env(Some(file.path()), isolated_env()).unwrap_err();
        assert!(matches!(err, ProcessingError::Config(_)));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = Settings::load_with_env(Some(Path::new("nope/airq.toml")), isolated_env())
            .unwrap_err();
        assert!(matches!(err, ProcessingError::Config(_)));
    }
}
