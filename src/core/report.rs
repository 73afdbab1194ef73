//! Tabular and JSON renderings of queue snapshots and dispatch results.

use crate::domain::model::{AssignmentRecord, QueueKind, QueueSnapshot};
use crate::utils::error::{Result, SchedulerError};
use serde::Serialize;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Csv,
    Tsv,
    Json,
}

impl FromStr for ReportFormat {
    type Err = SchedulerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "tsv" => Ok(Self::Tsv),
            "json" => Ok(Self::Json),
            other => Err(SchedulerError::invalid_argument(
                "report_format",
                other,
                "Supported formats: csv, tsv, json",
            )),
        }
    }
}

#[derive(Serialize)]
struct QueueRow<'a> {
    queue: QueueKind,
    position: usize,
    id: i64,
    name: &'a str,
    age: u32,
    contact: &'a str,
    severity: Option<u8>,
}

#[derive(Serialize)]
struct AssignmentRow<'a> {
    assigned_at: String,
    source: QueueKind,
    id: i64,
    name: &'a str,
    severity: Option<u8>,
}

fn write_rows<S: Serialize>(rows: impl IntoIterator<Item = S>, delimiter: u8) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());

    for row in rows {
        writer.serialize(row)?;
    }

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    String::from_utf8(bytes).map_err(|e| SchedulerError::ProcessingError {
        message: format!("report is not valid UTF-8: {}", e),
    })
}

fn delimiter_for(format: ReportFormat) -> u8 {
    match format {
        ReportFormat::Tsv => b'\t',
        _ => b',',
    }
}

/// Renders both queues, emergency rows first, each in service order.
///
/// An empty snapshot renders as an empty string for CSV and TSV since the
/// header is derived from the first row.
pub fn render_snapshot(snapshot: &QueueSnapshot, format: ReportFormat) -> Result<String> {
    if format == ReportFormat::Json {
        return Ok(serde_json::to_string_pretty(snapshot)?);
    }

    let emergency = snapshot
        .emergency
        .iter()
        .enumerate()
        .map(|(i, p)| (QueueKind::Emergency, i, p));
    let regular = snapshot
        .regular
        .iter()
        .enumerate()
        .map(|(i, p)| (QueueKind::Regular, i, p));

    let rows = emergency
        .chain(regular)
        .map(|(queue, index, patient)| QueueRow {
            queue,
            position: index + 1,
            id: patient.id,
            name: &patient.name,
            age: patient.age,
            contact: &patient.contact,
            severity: patient.severity,
        });

    write_rows(rows, delimiter_for(format))
}

pub fn render_assignments(records: &[AssignmentRecord], format: ReportFormat) -> Result<String> {
    if format == ReportFormat::Json {
        return Ok(serde_json::to_string_pretty(records)?);
    }

    let rows = records.iter().map(|record| AssignmentRow {
        assigned_at: record.assigned_at.to_rfc3339(),
        source: record.source,
        id: record.patient.id,
        name: &record.patient.name,
        severity: record.patient.severity,
    });

    write_rows(rows, delimiter_for(format))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Patient;

    fn sample_snapshot() -> QueueSnapshot {
        QueueSnapshot {
            emergency: vec![Patient::new(2, "Maya", 61, "555-2000").with_severity(9)],
            regular: vec![
                Patient::new(5, "Theo", 24, "555-5000"),
                Patient::new(6, "Iris", 33, "555-6000"),
            ],
        }
    }

    #[test]
    fn test_snapshot_csv() {
        let csv = render_snapshot(&sample_snapshot(), ReportFormat::Csv).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "queue,position,id,name,age,contact,severity");
        assert_eq!(lines[1], "emergency,1,2,Maya,61,555-2000,9");
        assert_eq!(lines[2], "regular,1,5,Theo,24,555-5000,");
        assert_eq!(lines[3], "regular,2,6,Iris,33,555-6000,");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_snapshot_tsv() {
        let tsv = render_snapshot(&sample_snapshot(), ReportFormat::Tsv).unwrap();
        assert!(tsv.starts_with("queue\tposition\tid\tname"));
        assert!(tsv.contains("emergency\t1\t2\tMaya\t61\t555-2000\t9"));
    }

    #[test]
    fn test_snapshot_json() {
        let json = render_snapshot(&sample_snapshot(), ReportFormat::Json).unwrap();
        let parsed: QueueSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, sample_snapshot());
    }

    #[test]
    fn test_assignments_csv() {
        let records = vec![
            AssignmentRecord::new(
                Patient::new(2, "Maya", 61, "555-2000").with_severity(9),
                QueueKind::Emergency,
            ),
            AssignmentRecord::new(Patient::new(5, "Theo", 24, "555-5000"), QueueKind::Regular),
        ];

        let csv = render_assignments(&records, ReportFormat::Csv).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "assigned_at,source,id,name,severity");
        assert!(lines[1].ends_with(",emergency,2,Maya,9"));
        assert!(lines[2].ends_with(",regular,5,Theo,"));
    }

    #[test]
    fn test_empty_snapshot_renders_nothing() {
        let csv = render_snapshot(&QueueSnapshot::default(), ReportFormat::Csv).unwrap();
        assert!(csv.is_empty());
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("CSV".parse::<ReportFormat>().unwrap(), ReportFormat::Csv);
        assert_eq!(" tsv ".parse::<ReportFormat>().unwrap(), ReportFormat::Tsv);
        assert_eq!("json".parse::<ReportFormat>().unwrap(), ReportFormat::Json);
        assert!("xml".parse::<ReportFormat>().is_err());
    }
}
