use air_quality_processor::cli::{run, Cli};
use anyhow::Context;
use clap::Parser;
use std::fs::File;
use std::sync::Mutex;
use tracing::Level;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = tracing_subscriber::fmt().with_max_level(level);

    match &cli.log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating log file {}", path.display()))?;
            subscriber
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => subscriber.with_writer(std::io::stderr).init(),
    }

    run(cli).context("air quality processing failed")
}
