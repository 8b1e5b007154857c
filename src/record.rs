use crate::accumulator::AirlineName;
use crate::airport::AirportCode;
use crate::index::AirportIndex;
use clap::ValueEnum;
use csv::{ReaderBuilder, StringRecord, StringRecordsIntoIter, Trim};
use log::{debug, info, trace, warn};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// Which delay column of the input is aggregated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum DelayCause {
    /// Total arrival delay, all causes
    Arrival,
    /// Delay attributed to the carrier
    #[default]
    Carrier,
    Weather,
    /// National aviation system
    Nas,
    Security,
    /// Late-arriving previous aircraft
    LateAircraft,
}

impl DelayCause {
    pub fn column(&self) -> &'static str {
        match self {
            DelayCause::Arrival => "arr_delay",
            DelayCause::Carrier => "carrier_delay",
            DelayCause::Weather => "weather_delay",
            DelayCause::Nas => "nas_delay",
            DelayCause::Security => "security_delay",
            DelayCause::LateAircraft => "late_aircraft_delay",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DelayRecord {
    pub airport: AirportCode,
    pub airline: AirlineName,
    pub minutes: i64,
}

pub struct SourceConfig {
    pub cause: DelayCause,
    pub airport_column: String,
    pub airline_column: String,
    pub delimiter: u8,
    pub strict: bool,
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig {
            cause: DelayCause::default(),
            airport_column: "airport".to_string(),
            airline_column: "carrier_name".to_string(),
            delimiter: b',',
            strict: false,
        }
    }
}

#[derive(Debug, Error)]
pub enum RowError {
    #[error("unreadable row: {0}")]
    Csv(#[from] csv::Error),
    #[error("line {line}: missing field `{column}`")]
    MissingField { line: u64, column: String },
    #[error("line {line}: empty field `{column}`")]
    EmptyField { line: u64, column: String },
    #[error("line {line}: invalid delay `{value}` in `{column}`")]
    InvalidDelay {
        line: u64,
        column: String,
        value: String,
    },
}

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("cannot open {}: {source}", path.display())]
    Open { path: PathBuf, source: io::Error },
    #[error("column `{0}` not found in header")]
    MissingColumn(String),
    #[error("delimiter `{0}` is not a single-byte ASCII character")]
    Delimiter(char),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error("malformed row: {0}")]
    Malformed(RowError),
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IngestStats {
    pub accepted: usize,
    pub skipped: usize,
}

/// Turns CSV rows into [`DelayRecord`]s, one per row.
pub struct RecordReader<R: io::Read> {
    rows: StringRecordsIntoIter<R>,
    airport: (usize, String),
    airline: (usize, String),
    delay: (usize, String),
}

impl<R: io::Read> RecordReader<R> {
    pub fn new(reader: R, config: &SourceConfig) -> Result<Self, IngestError> {
        let mut csv = ReaderBuilder::new()
            .delimiter(config.delimiter)
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers = csv.headers()?.clone();
        let locate = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .map(|i| (i, name.to_string()))
                .ok_or_else(|| IngestError::MissingColumn(name.to_string()))
        };
        let airport = locate(&config.airport_column)?;
        let airline = locate(&config.airline_column)?;
        let delay = locate(config.cause.column())?;
        debug!(
            "columns: airport={} airline={} delay={}",
            airport.0, airline.0, delay.0
        );

        Ok(RecordReader {
            rows: csv.into_records(),
            airport,
            airline,
            delay,
        })
    }

    fn field<'r>(
        row: &'r StringRecord,
        line: u64,
        (idx, column): &(usize, String),
    ) -> Result<&'r str, RowError> {
        match row.get(*idx) {
            None => Err(RowError::MissingField {
                line,
                column: column.clone(),
            }),
            Some("") => Err(RowError::EmptyField {
                line,
                column: column.clone(),
            }),
            Some(value) => Ok(value),
        }
    }

    fn parse(&self, row: &StringRecord) -> Result<DelayRecord, RowError> {
        let line = row.position().map_or(0, |p| p.line());
        let airport = Self::field(row, line, &self.airport)?;
        let airline = Self::field(row, line, &self.airline)?;
        let raw = Self::field(row, line, &self.delay)?;
        let minutes = parse_minutes(raw).ok_or_else(|| RowError::InvalidDelay {
            line,
            column: self.delay.1.clone(),
            value: raw.to_string(),
        })?;

        Ok(DelayRecord {
            airport: Arc::from(airport),
            airline: Arc::from(airline),
            minutes,
        })
    }
}

impl<R: io::Read> Iterator for RecordReader<R> {
    type Item = Result<DelayRecord, RowError>;

    fn next(&mut self) -> Option<Self::Item> {
        let row = self.rows.next()?;
        Some(row.map_err(RowError::from).and_then(|row| self.parse(&row)))
    }
}

/// Integer minutes; decimal exports such as `12.0` are rounded.
fn parse_minutes(raw: &str) -> Option<i64> {
    raw.parse::<i64>().ok().or_else(|| {
        raw.parse::<f64>()
            .ok()
            .filter(|m| m.is_finite())
            .map(|m| m.round() as i64)
    })
}

/// Feeds every well-formed row of `reader` into `index`.
///
/// Malformed rows are logged and skipped, unless `config.strict` is set, in
/// which case the first one aborts ingestion. I/O failures always abort.
pub fn ingest<R: io::Read>(
    reader: R,
    config: &SourceConfig,
    index: &mut AirportIndex,
) -> Result<IngestStats, IngestError> {
    let mut stats = IngestStats::default();

    for row in RecordReader::new(reader, config)? {
        match row {
            Ok(record) => {
                trace!(
                    "{} {} +{}",
                    record.airport, record.airline, record.minutes
                );
                index.record(&record);
                stats.accepted += 1;
            }
            Err(RowError::Csv(e)) if e.is_io_error() => return Err(IngestError::Csv(e)),
            Err(e) if config.strict => return Err(IngestError::Malformed(e)),
            Err(e) => {
                warn!("skipping row: {}", e);
                stats.skipped += 1;
            }
        }
    }

    info!(
        "ingested {} rows ({} skipped) into {} airports",
        stats.accepted,
        stats.skipped,
        index.len()
    );
    Ok(stats)
}
