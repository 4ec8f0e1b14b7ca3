// Report generation from fetched domain records

use chrono::Utc;
use rankfetch_client::{DomainRecord, Metric};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::File;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ReportFormat {
    Text,
    Json,
    Csv,
}

impl ReportFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" => Some(ReportFormat::Text),
            "json" => Some(ReportFormat::Json),
            "csv" => Some(ReportFormat::Csv),
            _ => None,
        }
    }
}

/// Render a metric value the way the table and CSV show it: strings raw,
/// everything else in JSON notation.
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn column_names(metrics: &[Metric]) -> Vec<String> {
    let mut columns = vec!["domain".to_string()];
    columns.extend(metrics.iter().map(|m| m.as_str().to_string()));
    columns.push("error".to_string());
    columns
}

fn record_cells(record: &DomainRecord, metrics: &[Metric]) -> Vec<String> {
    let mut cells = vec![record.domain.clone()];
    for metric in metrics {
        let cell = record
            .metric(*metric)
            .map(value_to_string)
            .unwrap_or_default();
        cells.push(cell);
    }
    cells.push(record.error.clone().unwrap_or_default());
    cells
}

pub fn generate_text_report(records: &[DomainRecord], metrics: &[Metric]) -> String {
    let columns = column_names(metrics);
    let rows: Vec<Vec<String>> = records.iter().map(|r| record_cells(r, metrics)).collect();

    // Column widths: max of header and every cell
    let mut widths: Vec<usize> = columns.iter().map(|c| c.len()).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.len());
        }
    }

    let failed = records.iter().filter(|r| r.is_error()).count();

    let mut report = String::new();
    report.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");
    report.push_str("                DOMAIN RANKING METRICS\n");
    report.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");

    report.push_str(&format!("Domains queried: {}\n", records.len()));
    report.push_str(&format!("Successful:      {}\n", records.len() - failed));
    report.push_str(&format!("Errors:          {}\n\n", failed));

    let header = columns
        .iter()
        .zip(&widths)
        .map(|(column, &width)| format!("{:<width$}", column))
        .collect::<Vec<_>>()
        .join("  ");
    report.push_str(&header);
    report.push('\n');
    report.push_str(&"─".repeat(header.chars().count()));
    report.push('\n');

    for row in &rows {
        let line = row
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| format!("{:<width$}", cell))
            .collect::<Vec<_>>()
            .join("  ");
        report.push_str(line.trim_end());
        report.push('\n');
    }

    report.push('\n');
    report
}

pub fn generate_json_report(
    records: &[DomainRecord],
    metrics: &[Metric],
) -> Result<String, serde_json::Error> {
    let failed = records.iter().filter(|r| r.is_error()).count();

    let rows: Vec<Value> = records
        .iter()
        .map(|record| {
            let mut row = serde_json::Map::new();
            row.insert("domain".to_string(), Value::String(record.domain.clone()));
            if let Some(ref error) = record.error {
                row.insert("error".to_string(), Value::String(error.clone()));
            } else {
                for (metric, value) in &record.metrics {
                    row.insert(metric.as_str().to_string(), value.clone());
                }
            }
            Value::Object(row)
        })
        .collect();

    let json_report = serde_json::json!({
        "report": {
            "metadata": {
                "generator": "rankfetch",
                "version": env!("CARGO_PKG_VERSION"),
                "generated_at": Utc::now().to_rfc3339(),
                "format": "json"
            },
            "summary": {
                "total_domains": records.len(),
                "successful": records.len() - failed,
                "errors": failed,
                "metrics": metrics.iter().map(|m| m.as_str()).collect::<Vec<_>>()
            },
            "results": rows
        }
    });

    serde_json::to_string_pretty(&json_report)
}

pub fn generate_csv_report(records: &[DomainRecord], metrics: &[Metric]) -> Result<String, String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record(column_names(metrics))
        .map_err(|e| format!("Failed to write CSV header: {}", e))?;

    for record in records {
        writer
            .write_record(record_cells(record, metrics))
            .map_err(|e| format!("Failed to write CSV row for {}: {}", record.domain, e))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| format!("Failed to flush CSV writer: {}", e))?;
    String::from_utf8(bytes).map_err(|e| format!("CSV output is not valid UTF-8: {}", e))
}

pub fn save_report(content: &str, path: &Path) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}
