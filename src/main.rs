use crate::index::AirportIndex;
use crate::record::{DelayCause, IngestError, SourceConfig};
use crate::report::ReportFormat;
use clap::Parser;
use colored::Colorize;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

mod accumulator;
mod airport;
mod index;
mod minutes;
mod record;
mod report;

#[derive(Parser)]
#[command(about = "Aggregate airline delay minutes per airport from a CSV export")]
struct Args {
    /// Path to the delay CSV file
    #[arg(short, long, value_name = "FILE", default_value = "airlines.csv")]
    input: PathBuf,

    /// Delay column to aggregate
    #[arg(short, long, value_enum, default_value_t = DelayCause::Carrier)]
    cause: DelayCause,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Table)]
    format: ReportFormat,

    /// Header of the airport code column
    #[arg(long, default_value = "airport")]
    airport_column: String,

    /// Header of the airline name column
    #[arg(long, default_value = "carrier_name")]
    airline_column: String,

    /// Field delimiter
    #[arg(long, default_value_t = ',')]
    delimiter: char,

    /// Abort on the first malformed row instead of skipping it
    #[arg(long)]
    strict: bool,
}

impl Args {
    fn source_config(&self) -> Result<SourceConfig, IngestError> {
        if !self.delimiter.is_ascii() {
            return Err(IngestError::Delimiter(self.delimiter));
        }
        Ok(SourceConfig {
            cause: self.cause,
            airport_column: self.airport_column.clone(),
            airline_column: self.airline_column.clone(),
            delimiter: self.delimiter as u8,
            strict: self.strict,
        })
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();
    let config = args.source_config()?;

    let file = File::open(&args.input).map_err(|source| IngestError::Open {
        path: args.input.clone(),
        source,
    })?;

    let mut index = AirportIndex::new();
    let stats = record::ingest(file, &config, &mut index)?;

    let skipped = format!("{} skipped", stats.skipped);
    eprintln!(
        "{} {} rows from {} into {} airports ({}), aggregating {}",
        "Loaded".green().bold(),
        stats.accepted,
        args.input.display(),
        index.len(),
        if stats.skipped > 0 { skipped.yellow() } else { skipped.normal() },
        config.cause.column(),
    );

    let mut out = std::io::stdout().lock();
    report::write_report(&mut out, &index, args.format)?;
    out.flush()?;
    Ok(())
}
