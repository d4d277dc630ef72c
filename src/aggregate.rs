//! The aggregation passes: category classification, temporal distribution,
//! author collaboration statistics, journal coverage, and exact keyword
//! frequency counting.
//!
//! Every pass is a pure function of the study slice. Empty inputs and empty
//! denominators are defined results, never arithmetic failures.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::matcher::{self, MatchMode};
use crate::model::Study;
use crate::taxonomy::Taxonomy;
use crate::AnalysisError;

/// `part / total * 100`, with an empty denominator reported as zero.
pub fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

// --------------------- category classification ---------------------

#[derive(Debug, Clone, Serialize)]
pub struct CategoryCount {
    pub name: String,
    pub count: usize,
    pub percentage: f64,
}

/// Classification result for one taxonomy. Every category of the taxonomy is
/// present, zero-match categories included, in taxonomy order. A study may
/// count towards several categories, so percentages need not sum to 100.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryResult {
    pub taxonomy: String,
    pub categories: Vec<CategoryCount>,
}

/// Count, per category, the studies whose normalized text matches any of the
/// category's keywords under the given mode.
pub fn classify(
    taxonomy: &Taxonomy,
    studies: &[Study],
    mode: MatchMode,
) -> Result<CategoryResult, AnalysisError> {
    let total = studies.len();
    let mut categories = Vec::with_capacity(taxonomy.categories.len());
    for cat in taxonomy.categories {
        let compiled = match mode {
            MatchMode::WholeWord => matcher::compile_all(cat.keywords)?,
            MatchMode::Containment => Vec::new(),
        };
        let count = studies
            .iter()
            .filter(|s| matcher::matches_any(&s.normalized_text, cat.keywords, &compiled, mode))
            .count();
        categories.push(CategoryCount {
            name: cat.name.to_string(),
            count,
            percentage: percentage(count, total),
        });
    }
    Ok(CategoryResult {
        taxonomy: taxonomy.name.to_string(),
        categories,
    })
}

impl CategoryResult {
    /// A result with every category at zero, used when a pass is skipped.
    pub fn empty(taxonomy: &Taxonomy) -> Self {
        Self {
            taxonomy: taxonomy.name.to_string(),
            categories: taxonomy
                .categories
                .iter()
                .map(|c| CategoryCount {
                    name: c.name.to_string(),
                    count: 0,
                    percentage: 0.0,
                })
                .collect(),
        }
    }
}

// --------------------- temporal distribution ---------------------

#[derive(Debug, Clone, Serialize)]
pub struct YearCount {
    pub year: i32,
    pub count: usize,
    pub percentage: f64,
}

/// Year-over-year growth. `rate` is `None` when the earlier year has zero
/// records, where the division is undefined.
#[derive(Debug, Clone, Serialize)]
pub struct GrowthRate {
    pub from: i32,
    pub to: i32,
    pub rate: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WindowCount {
    pub count: usize,
    pub percentage: f64,
}

/// Per-year counts (ascending), growth rates for consecutive present years,
/// and the dataset total used as the percentage denominator.
#[derive(Debug, Clone, Serialize)]
pub struct TemporalSummary {
    pub total_records: usize,
    pub years: Vec<YearCount>,
    pub growth_rates: Vec<GrowthRate>,
}

impl TemporalSummary {
    /// Build from an explicit year -> count map. `total_records` is the full
    /// dataset size, which may exceed the mapped counts when records lack a
    /// year.
    pub fn from_counts(counts: &BTreeMap<i32, usize>, total_records: usize) -> Self {
        let years: Vec<YearCount> = counts
            .iter()
            .map(|(&year, &count)| YearCount {
                year,
                count,
                percentage: percentage(count, total_records),
            })
            .collect();

        let growth_rates = years
            .windows(2)
            .map(|pair| GrowthRate {
                from: pair[0].year,
                to: pair[1].year,
                rate: growth_between(pair[0].count, pair[1].count),
            })
            .collect();

        Self {
            total_records,
            years,
            growth_rates,
        }
    }

    /// Records falling in an arbitrary (not necessarily contiguous) set of
    /// years, as a count and a percentage of the full dataset.
    pub fn window_count(&self, years: &[i32]) -> WindowCount {
        let count = self
            .years
            .iter()
            .filter(|yc| years.contains(&yc.year))
            .map(|yc| yc.count)
            .sum();
        WindowCount {
            count,
            percentage: percentage(count, self.total_records),
        }
    }
}

/// `(curr - prev) / prev * 100`, undefined for a zero-count earlier year.
pub fn growth_between(prev: usize, curr: usize) -> Option<f64> {
    if prev == 0 {
        None
    } else {
        Some((curr as f64 - prev as f64) / prev as f64 * 100.0)
    }
}

/// Group studies by publication year. Records with a missing year are left
/// out of the grouping but stay in the percentage denominator.
pub fn summarize_by_year(studies: &[Study]) -> TemporalSummary {
    let mut counts: BTreeMap<i32, usize> = BTreeMap::new();
    for study in studies {
        if let Some(year) = study.year {
            *counts.entry(year).or_insert(0) += 1;
        }
    }
    TemporalSummary::from_counts(&counts, studies.len())
}

// --------------------- author collaboration ---------------------

#[derive(Debug, Clone, Serialize)]
pub struct AuthorStats {
    pub mean: f64,
    pub min: u32,
    pub max: u32,
    pub mode: u32,
    pub mode_frequency: usize,
}

/// Descriptive statistics over the per-study author count. `None` when no
/// study carries author information.
///
/// The mode tie-break is the smallest tied value, so the result is
/// deterministic regardless of record order.
pub fn author_collaboration_stats(studies: &[Study]) -> Option<AuthorStats> {
    let counts: Vec<u32> = studies.iter().filter_map(|s| s.author_count).collect();
    if counts.is_empty() {
        return None;
    }

    let sum: u64 = counts.iter().map(|&c| u64::from(c)).sum();
    let mean = sum as f64 / counts.len() as f64;
    let min = *counts.iter().min()?;
    let max = *counts.iter().max()?;

    let mut frequency: HashMap<u32, usize> = HashMap::new();
    for &c in &counts {
        *frequency.entry(c).or_insert(0) += 1;
    }
    let mut best: Option<(u32, usize)> = None;
    for (&value, &freq) in &frequency {
        let replace = match best {
            None => true,
            // tie-break on the smaller value for a deterministic mode
            Some((best_value, best_freq)) => {
                freq > best_freq || (freq == best_freq && value < best_value)
            }
        };
        if replace {
            best = Some((value, freq));
        }
    }
    let (mode, mode_frequency) = best?;

    Some(AuthorStats {
        mean,
        min,
        max,
        mode,
        mode_frequency,
    })
}

// --------------------- journal coverage ---------------------

#[derive(Debug, Clone, Serialize)]
pub struct Coverage {
    pub count: usize,
    pub percentage: f64,
}

/// Studies carrying a journal value, as count and percentage of the dataset.
pub fn journal_coverage(studies: &[Study]) -> Coverage {
    let count = studies.iter().filter(|s| s.journal.is_some()).count();
    Coverage {
        count,
        percentage: percentage(count, studies.len()),
    }
}

// --------------------- exact keyword frequencies ---------------------

#[derive(Debug, Clone, Serialize)]
pub struct KeywordFrequency {
    pub keyword: String,
    pub frequency: u64,
}

/// Total whole-word occurrence counts per keyword, ordered descending by
/// frequency with ties in original list order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct KeywordFrequencyTable {
    entries: Vec<KeywordFrequency>,
}

impl KeywordFrequencyTable {
    pub fn entries(&self) -> &[KeywordFrequency] {
        &self.entries
    }

    pub fn frequency(&self, keyword: &str) -> u64 {
        self.entries
            .iter()
            .find(|e| e.keyword == keyword)
            .map_or(0, |e| e.frequency)
    }

    /// Merged figure for two spellings of the same concept, e.g.
    /// "electric vehicle" + "ev".
    pub fn combined(&self, k1: &str, k2: &str) -> u64 {
        self.frequency(k1) + self.frequency(k2)
    }
}

/// Count literal whole-word occurrences of each keyword across all studies.
/// Every occurrence counts, not just presence per study.
pub fn count_keywords(
    studies: &[Study],
    keywords: &[&str],
) -> Result<KeywordFrequencyTable, AnalysisError> {
    let matchers = matcher::compile_all(keywords)?;
    let mut entries: Vec<KeywordFrequency> = keywords
        .iter()
        .zip(&matchers)
        .map(|(kw, m)| {
            let frequency: u64 = studies
                .iter()
                .map(|s| m.count_in(&s.normalized_text) as u64)
                .sum();
            KeywordFrequency {
                keyword: (*kw).to_string(),
                frequency,
            }
        })
        .collect();
    // Stable sort keeps keyword-list order for equal frequencies.
    entries.sort_by(|a, b| b.frequency.cmp(&a.frequency));
    Ok(KeywordFrequencyTable { entries })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Dataset;
    use crate::taxonomy;

    fn studies(csv: &str) -> Vec<Study> {
        Dataset::from_reader(csv.as_bytes())
            .unwrap()
            .studies()
            .to_vec()
    }

    fn corpus() -> Vec<Study> {
        studies(
            "year,title,abstract,authors,journal\n\
             2022,Blockchain payment for EV charging,A smart contract billing framework,A; B; C,J1\n\
             2023,Simulation of energy trading,Evaluates scalability and latency,A; B,\n\
             2023,Survey of security and privacy,A systematic review of authentication,A,J2\n\
             2024,Hyperledger prototype,Deployed charging station implementation,A; B,J3\n",
        )
    }

    #[test]
    fn classify_counts_and_percentages() {
        let s = corpus();
        let r = classify(&taxonomy::METHODOLOGY, &s, MatchMode::Containment).unwrap();
        assert_eq!(r.categories.len(), 5);
        let by_name = |n: &str| r.categories.iter().find(|c| c.name == n).unwrap();
        // "framework" in record 1
        assert_eq!(by_name("Theoretical/Conceptual").count, 1);
        // "simulation" in record 2
        assert_eq!(by_name("Simulation").count, 1);
        assert!((by_name("Simulation").percentage - 25.0).abs() < 1e-9);
        // "survey" + "systematic review" both in record 3, counted once
        assert_eq!(by_name("Survey/Review").count, 1);
        // "prototype"/"deployed"/"implementation" in record 4, counted once
        assert_eq!(by_name("Prototype/Implementation").count, 1);
    }

    #[test]
    fn classify_bounds_hold_for_all_taxonomies() {
        let s = corpus();
        for tax in taxonomy::ALL {
            let r = classify(tax, &s, MatchMode::Containment).unwrap();
            for c in &r.categories {
                assert!(c.count <= s.len());
                assert!((c.percentage - percentage(c.count, s.len())).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn classify_empty_dataset_is_all_zeros() {
        let r = classify(&taxonomy::THEME, &[], MatchMode::Containment).unwrap();
        assert_eq!(r.categories.len(), 8);
        for c in &r.categories {
            assert_eq!(c.count, 0);
            assert_eq!(c.percentage, 0.0);
        }
    }

    #[test]
    fn containment_is_broader_than_whole_word() {
        // "dag" is contained in "dagger"; whole-word must not count it.
        let s = studies(
            "year,title,abstract,authors\n\
             2024,The cloak and dagger approach,consensus analysis,A\n",
        );
        let broad = classify(&taxonomy::PLATFORM, &s, MatchMode::Containment).unwrap();
        let strict = classify(&taxonomy::PLATFORM, &s, MatchMode::WholeWord).unwrap();
        let pick = |r: &CategoryResult| {
            r.categories
                .iter()
                .find(|c| c.name == "DAG-based")
                .unwrap()
                .count
        };
        assert_eq!(pick(&broad), 1);
        assert_eq!(pick(&strict), 0);
    }

    #[test]
    fn temporal_summary_counts_and_growth() {
        let s = corpus();
        let t = summarize_by_year(&s);
        assert_eq!(t.total_records, 4);
        let years: Vec<_> = t.years.iter().map(|y| (y.year, y.count)).collect();
        assert_eq!(years, vec![(2022, 1), (2023, 2), (2024, 1)]);
        assert_eq!(t.growth_rates.len(), 2);
        assert_eq!(t.growth_rates[0].rate, Some(100.0));
        assert_eq!(t.growth_rates[1].rate, Some(-50.0));
    }

    #[test]
    fn growth_from_zero_count_year_is_undefined() {
        let mut counts = BTreeMap::new();
        counts.insert(2023, 0);
        counts.insert(2024, 5);
        let t = TemporalSummary::from_counts(&counts, 5);
        assert_eq!(t.growth_rates.len(), 1);
        assert_eq!(t.growth_rates[0].rate, None);
    }

    #[test]
    fn windowed_count_over_year_set() {
        let mut counts = BTreeMap::new();
        counts.insert(2022, 20);
        counts.insert(2023, 31);
        counts.insert(2024, 12);
        counts.insert(2025, 10);
        counts.insert(2026, 8);
        let t = TemporalSummary::from_counts(&counts, 81);
        let w = t.window_count(&[2024, 2025, 2026]);
        assert_eq!(w.count, 30);
        assert_eq!(format!("{:.1}%", w.percentage), "37.0%");
    }

    #[test]
    fn missing_year_excluded_from_grouping_but_not_total() {
        let s = studies("year,title,abstract,authors\n2024,T,A,X\n,T,A,X\n");
        let t = summarize_by_year(&s);
        assert_eq!(t.total_records, 2);
        assert_eq!(t.years.len(), 1);
        assert!((t.years[0].percentage - 50.0).abs() < 1e-9);
    }

    #[test]
    fn author_stats_basics() {
        let s = studies(
            "year,title,abstract,authors\n\
             2024,T,A,A; B; C\n\
             2024,T,A,A\n\
             2024,T,A,A; B\n",
        );
        let stats = author_collaboration_stats(&s).unwrap();
        assert!((stats.mean - 2.0).abs() < 1e-9);
        assert_eq!(stats.min, 1);
        assert_eq!(stats.max, 3);
        assert_eq!(stats.mode_frequency, 1);
    }

    #[test]
    fn author_mode_tie_breaks_to_smallest() {
        // counts [1,1,2,2,3]: 1 and 2 tie at frequency 2; mode must be 1.
        let s = studies(
            "year,title,abstract,authors\n\
             2024,T,A,A\n\
             2024,T,A,A\n\
             2024,T,A,A; B\n\
             2024,T,A,A; B\n\
             2024,T,A,A; B; C\n",
        );
        let stats = author_collaboration_stats(&s).unwrap();
        assert_eq!(stats.mode, 1);
        assert_eq!(stats.mode_frequency, 2);
    }

    #[test]
    fn author_stats_absent_without_author_data() {
        let s = studies("year,title,abstract,authors\n2024,T,A,\n");
        assert!(author_collaboration_stats(&s).is_none());
        assert!(author_collaboration_stats(&[]).is_none());
    }

    #[test]
    fn journal_coverage_counts_non_null_cells() {
        let s = corpus();
        let c = journal_coverage(&s);
        assert_eq!(c.count, 3);
        assert!((c.percentage - 75.0).abs() < 1e-9);
    }

    #[test]
    fn keyword_counts_are_per_occurrence_and_sorted() {
        let s = studies(
            "year,title,abstract,authors\n\
             2024,EV adoption,the ev market and ev fleets,A\n\
             2024,Blockchain basics,blockchain for every ev,A\n",
        );
        let t = count_keywords(&s, &["blockchain", "ev"]).unwrap();
        assert_eq!(t.frequency("ev"), 4);
        assert_eq!(t.frequency("blockchain"), 2);
        assert_eq!(t.entries()[0].keyword, "ev");
    }

    #[test]
    fn keyword_ties_keep_list_order() {
        let s = studies("year,title,abstract,authors\n2024,alpha beta,alpha beta,A\n");
        let t = count_keywords(&s, &["beta", "alpha"]).unwrap();
        assert_eq!(t.entries()[0].keyword, "beta");
        assert_eq!(t.entries()[1].keyword, "alpha");
    }

    #[test]
    fn combined_keyword_frequency() {
        let s = studies(
            "year,title,abstract,authors\n\
             2024,Electric vehicle charging,an electric vehicle and its ev charger,A\n",
        );
        let t = count_keywords(&s, &["electric vehicle", "ev"]).unwrap();
        assert_eq!(t.combined("electric vehicle", "ev"), 3);
    }
}
