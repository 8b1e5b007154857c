use crate::accumulator::AirlineName;
use crate::airport::{AirportCode, AirportEntry};
use crate::index::AirportIndex;
use crate::minutes::Minutes;
use clap::ValueEnum;
use serde::Serialize;
use std::io;
use std::io::Write;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Plain `Airport:` / `Airlines:` listing
    Text,
    /// Rounded table, one row per airline
    #[default]
    Table,
    /// Pretty-printed JSON array
    Json,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AirlineTotal {
    pub airline: AirlineName,
    pub minutes: Minutes,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AirportSummary {
    pub code: AirportCode,
    pub airlines: Vec<AirlineTotal>,
    pub total: Minutes,
}

impl From<&AirportEntry> for AirportSummary {
    fn from(entry: &AirportEntry) -> Self {
        AirportSummary {
            code: entry.code().clone(),
            airlines: entry
                .airlines()
                .map(|a| AirlineTotal {
                    airline: a.name().clone(),
                    minutes: a.total(),
                })
                .collect(),
            total: entry.total_minutes(),
        }
    }
}

#[derive(Tabled)]
struct Row {
    #[tabled(rename = "Airport")]
    airport: String,
    #[tabled(rename = "Airline")]
    airline: String,
    #[tabled(rename = "Delay (min)")]
    minutes: Minutes,
    #[tabled(rename = "Delay")]
    clock: String,
}

/// One in-order pass over the index.
pub fn summarize(index: &AirportIndex) -> Vec<AirportSummary> {
    index.iter().map(AirportSummary::from).collect()
}

pub fn write_report<W: Write>(
    out: &mut W,
    index: &AirportIndex,
    format: ReportFormat,
) -> io::Result<()> {
    let summaries = summarize(index);
    if summaries.is_empty() && format != ReportFormat::Json {
        return writeln!(out, "No delay records found.");
    }

    match format {
        ReportFormat::Text => write_text(out, &summaries),
        ReportFormat::Table => write_table(out, &summaries),
        ReportFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &summaries)?;
            writeln!(out)
        }
    }
}

fn write_text<W: Write>(out: &mut W, summaries: &[AirportSummary]) -> io::Result<()> {
    for summary in summaries {
        writeln!(out, "Airport: {}", summary.code)?;
        let airlines = summary
            .airlines
            .iter()
            .map(|a| format!("{} ({})", a.airline, a.minutes))
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(out, " Airlines: {}", airlines)?;
        writeln!(out, " Total delay: {} min", summary.total)?;
    }
    Ok(())
}

fn write_table<W: Write>(out: &mut W, summaries: &[AirportSummary]) -> io::Result<()> {
    let rows = summaries.iter().flat_map(|s| {
        s.airlines
            .iter()
            .map(move |a| Row {
                airport: s.code.to_string(),
                airline: a.airline.to_string(),
                minutes: a.minutes,
                clock: a.minutes.as_clock(),
            })
            .chain(std::iter::once(Row {
                airport: s.code.to_string(),
                airline: "(total)".to_string(),
                minutes: s.total,
                clock: s.total.as_clock(),
            }))
    });

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.with(Alignment::left());
    writeln!(out, "{}", table)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AirportIndex {
        let mut index = AirportIndex::new();
        for code in ["JFK", "ATL"] {
            index.insert(code);
        }
        index.accumulate("ATL", "United", 3);
        index.accumulate("ATL", "Delta", 10);
        index.accumulate("ATL", "Delta", 5);
        index.accumulate("JFK", "JetBlue", 65);
        index
    }

    fn render(index: &AirportIndex, format: ReportFormat) -> String {
        let mut out = Vec::new();
        write_report(&mut out, index, format).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_summaries() {
        let summaries = summarize(&sample());

        assert_eq!(summaries.len(), 2);
        assert_eq!(&*summaries[0].code, "ATL");
        assert_eq!(summaries[0].total, Minutes(18));
        let airlines: Vec<(&str, i64)> = summaries[0]
            .airlines
            .iter()
            .map(|a| (&*a.airline, a.minutes.0))
            .collect();
        assert_eq!(airlines, vec![("Delta", 15), ("United", 3)]);
    }

    #[test]
    fn test_text_report() {
        assert_eq!(
            render(&sample(), ReportFormat::Text),
            "Airport: ATL\n Airlines: Delta (15), United (3)\n Total delay: 18 min\n\
             Airport: JFK\n Airlines: JetBlue (65)\n Total delay: 65 min\n"
        );
    }

    #[test]
    fn test_airport_without_airlines() {
        let mut index = AirportIndex::new();
        index.insert("ORD");

        assert_eq!(
            render(&index, ReportFormat::Text),
            "Airport: ORD\n Airlines: \n Total delay: 0 min\n"
        );
        assert!(render(&index, ReportFormat::Table).contains("(total)"));
    }

    #[test]
    fn test_table_report() {
        let table = render(&sample(), ReportFormat::Table);

        assert!(table.contains("Delay (min)"));
        assert!(table.contains("JetBlue"));
        assert!(table.contains("1h05m"));
        let atl = table.find("ATL").unwrap();
        let jfk = table.find("JFK").unwrap();
        assert!(atl < jfk);
    }

    #[test]
    fn test_json_report() {
        let json: serde_json::Value =
            serde_json::from_str(&render(&sample(), ReportFormat::Json)).unwrap();

        assert_eq!(json[0]["code"], "ATL");
        assert_eq!(json[0]["total"], 18);
        assert_eq!(json[0]["airlines"][0]["airline"], "Delta");
        assert_eq!(json[0]["airlines"][0]["minutes"], 15);
        assert_eq!(json[1]["code"], "JFK");
    }

    #[test]
    fn test_empty_report() {
        let index = AirportIndex::new();

        assert_eq!(render(&index, ReportFormat::Text), "No delay records found.\n");
        assert_eq!(render(&index, ReportFormat::Table), "No delay records found.\n");
        assert_eq!(render(&index, ReportFormat::Json), "[]\n");
    }
}
