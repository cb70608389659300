use crate::processors::Frequency;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "air-quality-processor")]
#[command(about = "Filter and aggregate air quality measurements for visualization")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(short, long, global = true, help = "Hide the progress spinner")]
    pub quiet: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Settings file (TOML, YAML or JSON)")]
    pub config: Option<PathBuf>,
}

/// Input file and the filters applied before any view is built
#[derive(Args, Debug, Clone)]
pub struct FilterArgs {
    #[arg(short, long, help = "Input measurement file")]
    pub input: PathBuf,

    #[arg(long, requires = "end", help = "First day to include (e.g. 2024-01-01)")]
    pub start: Option<String>,

    #[arg(long, requires = "start", help = "Last day to include, whole day inclusive")]
    pub end: Option<String>,

    #[arg(short, long = "location", help = "Location to keep (repeatable)")]
    pub locations: Vec<String>,

    #[arg(short, long = "parameter", help = "Parameter to keep (repeatable)")]
    pub parameters: Vec<String>,
}

/// Where an aggregated view goes; stdout as CSV when neither flag is given
#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    #[arg(
        short,
        long,
        help = "Output file, format chosen by extension (.csv or .parquet)"
    )]
    pub output: Option<PathBuf>,

    #[arg(
        long,
        conflicts_with = "output",
        help = "Write to {output_dir}/airq-{view}-{YYMMDD}.{format}"
    )]
    pub save: bool,

    #[arg(long, default_value = "csv", help = "Format used with --save (csv or parquet)")]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Summarize the measurements left after filtering
    Info {
        #[command(flatten)]
        filters: FilterArgs,

        #[arg(long, help = "Print statistics as JSON")]
        json: bool,
    },

    /// Mean of one parameter per date bucket and location
    TimeSeries {
        #[command(flatten)]
        filters: FilterArgs,

        #[arg(short, long, help = "Parameter to aggregate")]
        target: String,

        #[arg(long, help = "Bucket width: daily, weekly or monthly [default: from settings]")]
        frequency: Option<Frequency>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Mean, min and max of one parameter per location
    Compare {
        #[command(flatten)]
        filters: FilterArgs,

        #[arg(short, long, help = "Parameter to compare across locations")]
        target: String,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Pair two parameters measured at the same time and location
    Correlate {
        #[command(flatten)]
        filters: FilterArgs,

        #[arg(long, help = "First parameter")]
        first: String,

        #[arg(long, help = "Second parameter")]
        second: String,

        #[command(flatten)]
        output: OutputArgs,
    },
}
