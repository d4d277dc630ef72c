#![forbid(unsafe_code)]
//! # review_analysis
//!
//! Keyword-driven classification and descriptive statistics for a
//! systematic-review corpus of bibliographic records (titles and abstracts).
//!
//! The library loads a tabular dataset, classifies every study along five
//! fixed keyword taxonomies (methodology, theme, application domain,
//! platform, challenge), summarizes the temporal distribution, computes
//! author-collaboration statistics, counts literal keyword occurrences, and
//! exports the aggregates as flat tables.
//!
//! Every aggregation pass is a pure function over the loaded record table;
//! nothing is mutated after loading, and the passes run independently.
//!
//! ## Example
//! ```no_run
//! use review_analysis::{AnalysisOptions, Dataset, run_analysis};
//!
//! let dataset = Dataset::from_csv_path("included_studies.csv")?;
//! let report = run_analysis(&dataset, &AnalysisOptions::default());
//! for cat in &report.themes.categories {
//!     println!("{}: {} studies ({:.1}%)", cat.name, cat.count, cat.percentage);
//! }
//! # Ok::<(), review_analysis::AnalysisError>(())
//! ```

use std::path::PathBuf;

use log::warn;
use rayon::prelude::*;
use serde::Serialize;
use thiserror::Error;

pub mod aggregate;
pub mod export;
pub mod matcher;
pub mod model;
pub mod taxonomy;

pub use aggregate::{
    AuthorStats, CategoryResult, Coverage, KeywordFrequencyTable, TemporalSummary, WindowCount,
    author_collaboration_stats, classify, count_keywords, journal_coverage, summarize_by_year,
};
pub use export::{ExportFormat, export_keyword_frequencies, export_summary};
pub use matcher::MatchMode;
pub use model::{Dataset, Study};

/// Errors surfaced by loading and exporting. Aggregation itself has no error
/// conditions besides invalid whole-word patterns; empty inputs are defined
/// results, not failures.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("input is missing required column '{0}'")]
    MissingColumn(String),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid keyword pattern '{keyword}': {source}")]
    Pattern {
        keyword: String,
        #[source]
        source: regex::Error,
    },
}

/// Knobs for one analysis run.
#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    /// Matching strictness for category classification.
    pub match_mode: MatchMode,
    /// Year set for the windowed "recent studies" count.
    pub recent_years: Vec<i32>,
    /// Literal keywords for the exact occurrence count.
    pub keywords: Vec<String>,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            match_mode: MatchMode::default(),
            recent_years: vec![2024, 2025, 2026],
            keywords: taxonomy::EXACT_COUNT_KEYWORDS
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
        }
    }
}

/// Everything one run computes. Immutable once produced.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub total_records: usize,
    /// Earliest and latest publication year, if any record carries one.
    pub publication_period: Option<(i32, i32)>,
    pub temporal: TemporalSummary,
    /// Windowed count over [`AnalysisOptions::recent_years`].
    pub recent: WindowCount,
    pub methodologies: CategoryResult,
    pub themes: CategoryResult,
    pub domains: CategoryResult,
    pub platforms: CategoryResult,
    pub challenges: CategoryResult,
    pub journal: Coverage,
    pub authors: Option<AuthorStats>,
    pub keyword_frequencies: KeywordFrequencyTable,
    /// Per-aggregator problems that did not abort the run.
    pub warnings: Vec<String>,
}

/// Run every aggregation pass over the dataset.
///
/// The five taxonomy classifications are independent and run in parallel.
/// A failing pass is reported as a warning and leaves a zeroed result so the
/// remaining aggregators still produce output.
pub fn run_analysis(dataset: &Dataset, options: &AnalysisOptions) -> AnalysisReport {
    let studies = dataset.studies();
    let mut warnings = Vec::new();

    let temporal = summarize_by_year(studies);
    let recent = temporal.window_count(&options.recent_years);

    let mut classified: Vec<CategoryResult> = taxonomy::ALL
        .par_iter()
        .map(|tax| classify(tax, studies, options.match_mode))
        .collect::<Vec<_>>()
        .into_iter()
        .zip(taxonomy::ALL)
        .map(|(result, tax)| match result {
            Ok(r) => r,
            Err(e) => {
                let msg = format!("{} classification skipped: {e}", tax.name);
                warn!("{msg}");
                warnings.push(msg);
                CategoryResult::empty(tax)
            }
        })
        .collect();

    // classified is in taxonomy::ALL order; pop back-to-front.
    let challenges = take_result(&mut classified, &taxonomy::CHALLENGE);
    let platforms = take_result(&mut classified, &taxonomy::PLATFORM);
    let domains = take_result(&mut classified, &taxonomy::APPLICATION_DOMAIN);
    let themes = take_result(&mut classified, &taxonomy::THEME);
    let methodologies = take_result(&mut classified, &taxonomy::METHODOLOGY);

    let keyword_refs: Vec<&str> = options.keywords.iter().map(String::as_str).collect();
    let keyword_frequencies = match count_keywords(studies, &keyword_refs) {
        Ok(table) => table,
        Err(e) => {
            let msg = format!("keyword frequency count skipped: {e}");
            warn!("{msg}");
            warnings.push(msg);
            KeywordFrequencyTable::default()
        }
    };

    AnalysisReport {
        total_records: dataset.len(),
        publication_period: dataset.publication_period(),
        temporal,
        recent,
        methodologies,
        themes,
        domains,
        platforms,
        challenges,
        journal: journal_coverage(studies),
        authors: author_collaboration_stats(studies),
        keyword_frequencies,
        warnings,
    }
}

fn take_result(
    classified: &mut Vec<CategoryResult>,
    fallback: &taxonomy::Taxonomy,
) -> CategoryResult {
    classified
        .pop()
        .unwrap_or_else(|| CategoryResult::empty(fallback))
}
