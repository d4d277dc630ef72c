use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::warn;
use serde::Deserialize;

use crate::AnalysisError;

/// Delimiter separating author names in the `authors` column.
pub const AUTHOR_DELIMITER: char = ';';

const REQUIRED_COLUMNS: [&str; 4] = ["year", "title", "abstract", "authors"];

/// One study from the review corpus, with its derived columns.
///
/// `normalized_text` is the lowercased concatenation of title and abstract and
/// is always present (empty string when both fields are missing). It is
/// materialized once at load time so the keyword matchers never re-derive it.
#[derive(Debug, Clone)]
pub struct Study {
    pub year: Option<i32>,
    pub title: Option<String>,
    pub abstract_text: Option<String>,
    pub authors: Option<String>,
    pub journal: Option<String>,
    pub normalized_text: String,
    pub author_count: Option<u32>,
}

/// Raw CSV row before derivation. All cells are optional; emptiness is data,
/// not an error.
#[derive(Debug, Deserialize)]
struct RawRow {
    year: Option<String>,
    title: Option<String>,
    #[serde(rename = "abstract")]
    abstract_text: Option<String>,
    authors: Option<String>,
    #[serde(default)]
    journal: Option<String>,
}

/// The in-memory record table. Loaded once, read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    studies: Vec<Study>,
}

impl Dataset {
    /// Load a UTF-8 CSV file with columns `year`, `title`, `abstract`,
    /// `authors` and optional `journal`. Fails fast on a missing file or a
    /// missing required column; missing cell values are permitted everywhere.
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self, AnalysisError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| AnalysisError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file)
    }

    /// Load from any reader producing CSV with the expected header row.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, AnalysisError> {
        let mut rdr = csv::ReaderBuilder::new().from_reader(reader);

        let headers = rdr.headers()?.clone();
        for required in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h == required) {
                return Err(AnalysisError::MissingColumn(required.to_string()));
            }
        }

        let mut studies = Vec::new();
        for (idx, row) in rdr.deserialize::<RawRow>().enumerate() {
            let row = row?;
            studies.push(Study::from_raw(row, idx));
        }
        Ok(Self { studies })
    }

    pub fn studies(&self) -> &[Study] {
        &self.studies
    }

    pub fn len(&self) -> usize {
        self.studies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.studies.is_empty()
    }

    /// Earliest and latest publication year present, if any record has one.
    pub fn publication_period(&self) -> Option<(i32, i32)> {
        let mut years = self.studies.iter().filter_map(|s| s.year);
        let first = years.next()?;
        Some(years.fold((first, first), |(min, max), y| {
            (min.min(y), max.max(y))
        }))
    }
}

impl Study {
    fn from_raw(row: RawRow, idx: usize) -> Self {
        let title = non_empty(row.title);
        let abstract_text = non_empty(row.abstract_text);
        let authors = non_empty(row.authors);
        let journal = non_empty(row.journal);

        // Malformed years are demoted to missing so one bad cell cannot
        // abort the run; the temporal aggregator skips them.
        let year = match non_empty(row.year) {
            Some(raw) => match raw.trim().parse::<i32>() {
                Ok(y) => Some(y),
                Err(_) => {
                    warn!("row {}: unparseable year {:?}, treating as missing", idx + 1, raw);
                    None
                }
            },
            None => None,
        };

        let normalized_text = normalize_text(title.as_deref(), abstract_text.as_deref());
        let author_count = authors
            .as_deref()
            .map(|a| a.matches(AUTHOR_DELIMITER).count() as u32 + 1);

        Self {
            year,
            title,
            abstract_text,
            authors,
            journal,
            normalized_text,
            author_count,
        }
    }
}

/// Lowercased `title + " " + abstract`, with missing fields as empty strings.
pub fn normalize_text(title: Option<&str>, abstract_text: Option<&str>) -> String {
    format!(
        "{} {}",
        title.unwrap_or_default(),
        abstract_text.unwrap_or_default()
    )
    .to_lowercase()
}

fn non_empty(cell: Option<String>) -> Option<String> {
    cell.filter(|s| !s.trim().is_empty())
}
