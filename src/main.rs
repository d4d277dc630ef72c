#![forbid(unsafe_code)]
//! # Review Analysis CLI
//!
//! Command-line interface for the `review_analysis` crate. Loads a CSV of
//! included studies, runs every aggregation pass, prints a sectioned console
//! report, and exports the result tables.
//!
//! ## Example
//! ```bash
//! cargo run --release -- included_studies.csv --export-format csv --out-dir results
//! ```
//!
//! See `--help` for all available options.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use log::error;
use review_analysis::{
    AnalysisOptions, AnalysisReport, Dataset, ExportFormat, MatchMode, export::format_percentage,
    export_keyword_frequencies, export_summary, run_analysis,
};

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// CSV file of included studies (columns: year, title, abstract, authors[, journal])
    input: PathBuf,

    /// Directory for the exported result tables
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Output format for export (csv, tsv, json)
    #[arg(long, default_value = "csv")]
    export_format: ExportFormat,

    /// Keyword matching strictness for category classification
    #[arg(long, default_value = "containment")]
    match_mode: MatchMode,

    /// Year set for the "recent studies" window, comma-separated
    #[arg(long, value_delimiter = ',', default_values_t = [2024, 2025, 2026])]
    recent_years: Vec<i32>,

    /// Suppress the console report; only write the export files
    #[arg(long, default_value_t = false)]
    quiet: bool,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let dataset = match Dataset::from_csv_path(&cli.input) {
        Ok(d) => d,
        Err(e) => {
            error!("Error loading {}: {}", cli.input.display(), e);
            process::exit(1);
        }
    };

    let options = AnalysisOptions {
        match_mode: cli.match_mode,
        recent_years: cli.recent_years.clone(),
        ..AnalysisOptions::default()
    };
    let report = run_analysis(&dataset, &options);

    if !cli.quiet {
        print_report(&report, &cli);
    }

    let stem = cli
        .input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "analysis".to_string());

    let summary = export_summary(&report, &cli.out_dir, &stem, cli.export_format);
    let keywords = export_keyword_frequencies(&report, &cli.out_dir, &stem, cli.export_format);
    match (summary, keywords) {
        (Ok(summary_path), Ok(keywords_path)) => {
            if !cli.quiet {
                println!("\nOutput files generated:");
                println!(
                    "  1. {} - all metrics and percentages",
                    summary_path.display()
                );
                println!("  2. {} - keyword frequency counts", keywords_path.display());
            }
        }
        (summary, keywords) => {
            for result in [summary, keywords] {
                if let Err(e) = result {
                    error!("Export failed: {}", e);
                }
            }
            process::exit(1);
        }
    }
}

fn section(title: &str) {
    println!("\n{}", "=".repeat(80));
    println!("{title}");
    println!("{}", "=".repeat(80));
}

fn print_report(report: &AnalysisReport, cli: &Cli) {
    section("SYSTEMATIC REVIEW COMPREHENSIVE ANALYSIS");
    println!(
        "\nLoaded {} studies from {}",
        report.total_records,
        cli.input.display()
    );

    section("TEMPORAL DISTRIBUTION");
    println!("\nStudies by year:");
    for yc in &report.temporal.years {
        println!(
            "  {}: {} studies ({})",
            yc.year,
            yc.count,
            format_percentage(yc.percentage)
        );
    }
    println!("\nYear-over-year growth rates:");
    for g in &report.temporal.growth_rates {
        match g.rate {
            Some(rate) => println!("  {} -> {}: {:.1}% growth", g.from, g.to, rate),
            None => println!(
                "  {} -> {}: undefined (no studies in {})",
                g.from, g.to, g.from
            ),
        }
    }
    let window = cli
        .recent_years
        .iter()
        .map(i32::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    println!(
        "\nStudies in [{}]: {} ({})",
        window,
        report.recent.count,
        format_percentage(report.recent.percentage)
    );

    for result in [
        &report.methodologies,
        &report.themes,
        &report.domains,
        &report.platforms,
        &report.challenges,
    ] {
        section(&result.taxonomy.to_uppercase());
        println!(
            "\n{} (studies can match multiple categories):",
            result.taxonomy
        );
        for cat in &result.categories {
            println!(
                "  {}: {} studies ({})",
                cat.name,
                cat.count,
                format_percentage(cat.percentage)
            );
        }
    }

    section("PUBLICATION OUTLETS");
    println!(
        "\nStudies with journal information: {} ({})",
        report.journal.count,
        format_percentage(report.journal.percentage)
    );

    section("AUTHOR COLLABORATION PATTERNS");
    match &report.authors {
        Some(stats) => {
            println!("\nAuthor collaboration statistics:");
            println!("  Average authors per study: {:.2}", stats.mean);
            println!("  Range: {} to {} authors", stats.min, stats.max);
            println!(
                "  Most common: {} authors ({} papers)",
                stats.mode, stats.mode_frequency
            );
        }
        None => println!("\nNo author information in dataset"),
    }

    section("KEYWORD FREQUENCIES");
    println!("\nWhole-word keyword occurrences:");
    for entry in report.keyword_frequencies.entries() {
        println!("  {}: {}", entry.keyword, entry.frequency);
    }
    let combined = report.keyword_frequencies.combined("electric vehicle", "ev");
    println!("  electric vehicle + ev (combined): {combined}");

    section("ANALYSIS COMPLETE");
    println!("\nTotal studies analyzed: {}", report.total_records);
    if let Some((first, last)) = report.publication_period {
        println!("Publication period: {first} - {last}");
    }
    for warning in &report.warnings {
        println!("Warning: {warning}");
    }
}
