//! Persisting the aggregated results.
//!
//! Two tables are written per run: the metric summary
//! (`Metric,Value,Percentage`) and the keyword frequency table
//! (`Keyword,Frequency`). Output filenames carry a timestamp so repeated
//! runs never clobber each other.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::prelude::*;
use clap::ValueEnum;
use serde::Serialize;

use crate::aggregate::KeywordFrequencyTable;
use crate::{AnalysisError, AnalysisReport};

/// Output format for the exported tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ExportFormat {
    #[default]
    Csv,
    Tsv,
    Json,
}

impl ExportFormat {
    fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Tsv => "tsv",
            ExportFormat::Json => "json",
        }
    }
}

/// One row of the metric summary table.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SummaryRow {
    #[serde(rename = "Metric")]
    pub metric: String,
    #[serde(rename = "Value")]
    pub value: u64,
    #[serde(rename = "Percentage")]
    pub percentage: String,
}

/// One row of the keyword frequency table.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct KeywordRow {
    #[serde(rename = "Keyword")]
    pub keyword: String,
    #[serde(rename = "Frequency")]
    pub frequency: u64,
}

/// Render a percentage the way the report always has: one decimal, `%` sign.
pub fn format_percentage(pct: f64) -> String {
    format!("{:.1}%", pct)
}

/// Flatten a report into summary rows: one per year present, one per
/// methodology category, one per theme category, in that order.
pub fn summary_rows(report: &AnalysisReport) -> Vec<SummaryRow> {
    let mut rows = Vec::new();
    for yc in &report.temporal.years {
        rows.push(SummaryRow {
            metric: format!("Studies in {}", yc.year),
            value: yc.count as u64,
            percentage: format_percentage(yc.percentage),
        });
    }
    for cat in &report.methodologies.categories {
        rows.push(SummaryRow {
            metric: cat.name.clone(),
            value: cat.count as u64,
            percentage: format_percentage(cat.percentage),
        });
    }
    for cat in &report.themes.categories {
        rows.push(SummaryRow {
            metric: format!("Theme: {}", cat.name),
            value: cat.count as u64,
            percentage: format_percentage(cat.percentage),
        });
    }
    rows
}

/// Keyword table rows, already in descending-frequency order.
pub fn keyword_rows(table: &KeywordFrequencyTable) -> Vec<KeywordRow> {
    table
        .entries()
        .iter()
        .map(|e| KeywordRow {
            keyword: e.keyword.clone(),
            frequency: e.frequency,
        })
        .collect()
}

/// Write the metric summary table. Returns the path written.
pub fn export_summary(
    report: &AnalysisReport,
    dir: &Path,
    stem: &str,
    format: ExportFormat,
) -> Result<PathBuf, AnalysisError> {
    write_table(&summary_rows(report), dir, stem, "summary", format)
}

/// Write the keyword frequency table. Returns the path written.
pub fn export_keyword_frequencies(
    report: &AnalysisReport,
    dir: &Path,
    stem: &str,
    format: ExportFormat,
) -> Result<PathBuf, AnalysisError> {
    write_table(
        &keyword_rows(&report.keyword_frequencies),
        dir,
        stem,
        "keywords",
        format,
    )
}

fn write_table<T: Serialize>(
    rows: &[T],
    dir: &Path,
    stem: &str,
    table: &str,
    format: ExportFormat,
) -> Result<PathBuf, AnalysisError> {
    let stamp = Local::now().format("%Y%m%d_%H%M%S");
    let path = dir.join(format!("{stem}_{stamp}_{table}.{}", format.extension()));

    match format {
        ExportFormat::Csv | ExportFormat::Tsv => {
            let delimiter = if format == ExportFormat::Tsv { b'\t' } else { b',' };
            let mut wtr = csv::WriterBuilder::new()
                .delimiter(delimiter)
                .from_path(&path)?;
            for row in rows {
                wtr.serialize(row)?;
            }
            wtr.flush().map_err(|source| AnalysisError::Io {
                path: path.clone(),
                source,
            })?;
        }
        ExportFormat::Json => {
            let json = serde_json::to_string_pretty(rows)?;
            fs::write(&path, json).map_err(|source| AnalysisError::Io {
                path: path.clone(),
                source,
            })?;
        }
    }
    Ok(path)
}
