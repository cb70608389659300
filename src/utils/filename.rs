use chrono::{Datelike, Local};
use std::path::{Path, PathBuf};

/// Generate default output filename with format: airq-{view}-{YYMMDD}.{extension}
pub fn generate_default_output_filename(output_dir: &Path, view: &str, extension: &str) -> PathBuf {
    let now = Local::now();
    let year = now.year() % 100; // Get last 2 digits of year
    let month = now.month();
    let day = now.day();

    let filename = format!(
        "airq-{}-{:02}{:02}{:02}.{}",
        view, year, month, day, extension
    );
    output_dir.join(filename)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_default_output_filename() {
        let filename = generate_default_output_filename(Path::new("output"), "time-series", "csv");
        let filename_str = filename.to_string_lossy();

        assert!(filename_str.starts_with("output/"));
        assert!(filename_str.ends_with(".csv"));

        let parts: Vec<&str> = filename_str.split('/').collect();
        assert_eq!(parts.len(), 2);

        let file_part = parts[1];
        assert!(file_part.starts_with("airq-time-series-"));
        // "airq-time-series-" + YYMMDD + ".csv"
        assert_eq!(file_part.len(), "airq-time-series-".len() + 6 + 4);
    }

    #[test]
    fn test_generate_parquet_filename() {
        let filename =
            generate_default_output_filename(Path::new("exports"), "correlation", "parquet");
        let filename_str = filename.to_string_lossy();

        assert!(filename_str.contains("airq-correlation-"));
        assert!(filename_str.ends_with(".parquet"));
    }
}
