use crate::analyzers::DatasetAnalyzer;
use crate::cli::args::{Cli, Commands, FilterArgs, OutputArgs};
use crate::error::{ProcessingError, Result};
use crate::models::{CorrelationTable, LocationSummary, MeasurementTable, TimeSeriesPoint};
use crate::readers::MeasurementReader;
use crate::settings::Settings;
use crate::utils::filename::generate_default_output_filename;
use crate::utils::progress::ProgressReporter;
use crate::writers::{CsvWriter, OutputFormat, ParquetWriter};
use std::path::PathBuf;
use tracing::{info, warn};

/// An aggregated view ready to be written
#[derive(Clone, Copy)]
enum View<'a> {
    TimeSeries(&'a [TimeSeriesPoint]),
    Comparison(&'a [LocationSummary]),
    Correlation(&'a CorrelationTable),
}

impl View<'_> {
    fn name(&self) -> &'static str {
        match self {
            View::TimeSeries(_) => "time-series",
            View::Comparison(_) => "comparison",
            View::Correlation(_) => "correlation",
        }
    }

    fn len(&self) -> usize {
        match self {
            View::TimeSeries(points) => points.len(),
            View::Comparison(summaries) => summaries.len(),
            View::Correlation(table) => table.len(),
        }
    }
}

pub fn run(cli: Cli) -> Result<()> {
    let settings = Settings::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Info { filters, json } => {
            let table = load_filtered(&filters, &settings, cli.quiet)?;
            let stats = DatasetAnalyzer::new().analyze(&table)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("{}", stats.detailed_summary());
            }
        }

        Commands::TimeSeries {
            filters,
            target,
            frequency,
            output,
        } => {
            let table = load_filtered(&filters, &settings, cli.quiet)?;
            let frequency = frequency.unwrap_or(settings.default_frequency);
            info!(parameter = %target, %frequency, "Aggregating time series");

            let points = table.aggregate_time_series(&target, frequency);
            emit_view(View::TimeSeries(&points), &output, &settings)?;
        }

        Commands::Compare {
            filters,
            target,
            output,
        } => {
            let table = load_filtered(&filters, &settings, cli.quiet)?;
            info!(parameter = %target, "Comparing locations");

            let summaries = table.aggregate_comparison(&target);
            emit_view(View::Comparison(&summaries), &output, &settings)?;
        }

        Commands::Correlate {
            filters,
            first,
            second,
            output,
        } => {
            let table = load_filtered(&filters, &settings, cli.quiet)?;
            info!(first = %first, second = %second, "Preparing correlation pairs");

            let pairs = table.prepare_correlation(&first, &second);
            emit_view(View::Correlation(&pairs), &output, &settings)?;
        }
    }

    Ok(())
}

/// Load the input file and apply the requested filters.
///
/// The parameter filter only runs when parameters were given; with none it
/// would select nothing.
fn load_filtered(
    filters: &FilterArgs,
    settings: &Settings,
    quiet: bool,
) -> Result<MeasurementTable> {
    let progress = ProgressReporter::new_spinner(
        &format!("Loading {}...", filters.input.display()),
        quiet,
    );

    let reader = MeasurementReader::new().with_delimiter(settings.delimiter_char())?;
    let (mut table, report) = reader.read_measurements_with_report(&filters.input)?;

    info!(
        rows = report.rows_kept(),
        dropped = report.rows_dropped,
        "Loaded {}",
        filters.input.display()
    );
    if report.rows_dropped > 0 {
        warn!(
            "Dropped {} rows with missing value or coordinates",
            report.rows_dropped
        );
    }

    progress.set_message("Filtering...");

    if let (Some(start), Some(end)) = (&filters.start, &filters.end) {
        table = table.filter_by_date_range(start.as_str(), end.as_str())?;
    }

    table = table.filter_by_location(&filters.locations);

    if !filters.parameters.is_empty() {
        table = table.filter_by_parameter(filters.parameters.clone());
    }

    progress.finish_with_message(&format!("{} records selected", table.len()));
    Ok(table)
}

fn output_path(
    view: &View<'_>,
    output: &OutputArgs,
    settings: &Settings,
) -> Result<Option<PathBuf>> {
    if let Some(path) = &output.output {
        return Ok(Some(path.clone()));
    }
    if !output.save {
        return Ok(None);
    }

    let format = match output.format.to_lowercase().as_str() {
        "csv" => OutputFormat::Csv,
        "parquet" => OutputFormat::Parquet,
        other => {
            return Err(ProcessingError::Config(format!(
                "Unsupported output format: {}",
                other
            )))
        }
    };

    Ok(Some(generate_default_output_filename(
        &settings.output_dir,
        view.name(),
        format.extension(),
    )))
}

fn emit_view(view: View<'_>, output: &OutputArgs, settings: &Settings) -> Result<()> {
    if view.len() == 0 {
        warn!("No matching records for the {} view", view.name());
    }

    let csv = CsvWriter::new();

    let Some(path) = output_path(&view, output, settings)? else {
        let stdout = std::io::stdout();
        return match view {
            View::TimeSeries(points) => csv.write_time_series(points, stdout.lock()),
            View::Comparison(summaries) => csv.write_comparison(summaries, stdout.lock()),
            View::Correlation(table) => csv.write_correlation(table, stdout.lock()),
        };
    };

    let format = OutputFormat::from_path(&path)?;

    // Create output directory if it doesn't exist
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    match format {
        OutputFormat::Csv => match view {
            View::TimeSeries(points) => csv.write_time_series_file(points, &path)?,
            View::Comparison(summaries) => csv.write_comparison_file(summaries, &path)?,
            View::Correlation(table) => csv.write_correlation_file(table, &path)?,
        },
        OutputFormat::Parquet => {
            let writer = ParquetWriter::new()
                .with_compression(&settings.compression)?
                .with_row_group_size(settings.row_group_size);
            match view {
                View::TimeSeries(points) => writer.write_time_series(points, &path)?,
                View::Comparison(summaries) => writer.write_comparison(summaries, &path)?,
                View::Correlation(table) => writer.write_correlation(table, &path)?,
            }
            println!("\n{}", writer.get_file_info(&path)?.summary());
        }
    }

    info!("Wrote {} rows to {}", view.len(), path.display());
    Ok(())
}
