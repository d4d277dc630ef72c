//! Keyword matching over normalized study text.
//!
//! Two rules are supported. Containment is a plain substring test with no
//! boundary requirement, so "ev" matches inside "every" -- the rule the
//! original keyword lists were tuned against. Whole-word requires that the
//! match is not adjacent to an alphanumeric character on either side and is
//! also used for occurrence counting.

use clap::ValueEnum;
use regex::Regex;

use crate::AnalysisError;

/// Project-wide matching strictness for category classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum MatchMode {
    /// Unanchored substring containment (broad recall, original behavior).
    #[default]
    Containment,
    /// Word-boundary matching (strict).
    WholeWord,
}

/// True if `keyword` occurs anywhere in `text` as a substring.
/// Both sides are expected pre-lowercased.
pub fn contains_keyword(text: &str, keyword: &str) -> bool {
    text.contains(keyword)
}

/// A compiled whole-word matcher for one literal keyword.
///
/// The keyword is regex-escaped, so characters like `%` or `+` inside it are
/// matched literally. Occurrences come from a non-overlapping left-to-right
/// scan; each candidate is then accepted only when neither neighbor is
/// alphanumeric, which keeps adjacent occurrences ("ev ev") countable as two.
#[derive(Debug, Clone)]
pub struct WholeWordMatcher {
    re: Regex,
}

impl WholeWordMatcher {
    pub fn new(keyword: &str) -> Result<Self, AnalysisError> {
        let pattern = format!("(?i){}", regex::escape(keyword));
        let re = Regex::new(&pattern).map_err(|source| AnalysisError::Pattern {
            keyword: keyword.to_string(),
            source,
        })?;
        Ok(Self { re })
    }

    /// Number of whole-word occurrences in `text`.
    pub fn count_in(&self, text: &str) -> usize {
        self.re
            .find_iter(text)
            .filter(|m| on_word_boundary(text, m.start(), m.end()))
            .count()
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.re
            .find_iter(text)
            .any(|m| on_word_boundary(text, m.start(), m.end()))
    }
}

fn on_word_boundary(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.is_some_and(|c| c.is_alphanumeric()) && !after.is_some_and(|c| c.is_alphanumeric())
}

/// Whether `text` matches ANY keyword in the list under the given mode.
/// `whole_word` must hold the pre-compiled matchers for the same list when
/// mode is [`MatchMode::WholeWord`].
pub fn matches_any(
    text: &str,
    keywords: &[&str],
    whole_word: &[WholeWordMatcher],
    mode: MatchMode,
) -> bool {
    match mode {
        MatchMode::Containment => keywords.iter().any(|kw| contains_keyword(text, kw)),
        MatchMode::WholeWord => whole_word.iter().any(|m| m.is_match(text)),
    }
}

/// Compile a whole-word matcher per keyword, preserving list order.
pub fn compile_all(keywords: &[&str]) -> Result<Vec<WholeWordMatcher>, AnalysisError> {
    keywords.iter().map(|kw| WholeWordMatcher::new(kw)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn containment_matches_inside_words() {
        assert!(contains_keyword("everyone charges", "ev"));
        assert!(contains_keyword("smart contract audits", "smart contract"));
        assert!(!contains_keyword("hydrogen fuel cells", "ev"));
    }

    #[test]
    fn whole_word_rejects_embedded_matches() {
        let m = WholeWordMatcher::new("ev").unwrap();
        assert!(!m.is_match("everyone charges"));
        assert!(m.is_match("the ev fleet"));
        assert!(m.is_match("ev"));
        assert!(m.is_match("(ev)"));
    }

    #[test]
    fn whole_word_count_is_per_occurrence() {
        let m = WholeWordMatcher::new("ev").unwrap();
        assert_eq!(m.count_in("ev ev"), 2);
        assert_eq!(m.count_in("ev every ev"), 2);
        assert_eq!(m.count_in("revolution"), 0);
    }

    #[test]
    fn whole_word_is_case_insensitive() {
        let m = WholeWordMatcher::new("blockchain").unwrap();
        assert_eq!(m.count_in("Blockchain and BLOCKCHAIN and blockchain"), 3);
    }

    #[test]
    fn regex_special_characters_are_literal() {
        let m = WholeWordMatcher::new("51% attack").unwrap();
        assert_eq!(m.count_in("resists a 51% attack scenario"), 1);
        assert_eq!(m.count_in("a 510% attacker"), 0);
    }

    #[test]
    fn multiword_keywords_respect_boundaries() {
        let m = WholeWordMatcher::new("electric vehicle").unwrap();
        assert_eq!(m.count_in("an electric vehicle fleet"), 1);
        assert_eq!(m.count_in("electric vehicles"), 0);
    }

    #[test]
    fn matches_any_mode_dispatch() {
        let keywords = ["ev"];
        let compiled = compile_all(&keywords).unwrap();
        assert!(matches_any(
            "in every case",
            &keywords,
            &compiled,
            MatchMode::Containment
        ));
        assert!(!matches_any(
            "in every case",
            &keywords,
            &compiled,
            MatchMode::WholeWord
        ));
    }
}
