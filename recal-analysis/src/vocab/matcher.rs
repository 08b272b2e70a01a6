//! Boundary-safe keyword matching.
//!
//! Keywords match case-insensitively at word boundaries, with internal
//! whitespace treated as flexible. A degraded retry strips a leading
//! numeric/operation prefix to tolerate concatenated OCR text like
//! `"2O/H bumper"`.

use std::sync::OnceLock;

use aho_corasick::{AhoCorasick, AhoCorasickBuilder};
use regex::Regex;

use recal_core::types::collections::FxHashMap;
use recal_core::types::{AdasPart, RepairKind};

use super::keywords::{
    adas_part_keywords, repair_category_keywords, ALL_ADAS_PARTS, ALL_REPAIR_KINDS,
};

fn degraded_prefix_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^\s*\d{1,4}\s*(?:(?:o[-/]h|r\s*&\s*i|r\s*&\s*r|rpr|repl|subl|blnd|refn)\b\.?\s*)?")
            .unwrap()
    })
}

/// A compiled, boundary-safe keyword pattern.
#[derive(Debug, Clone)]
pub struct KeywordPattern {
    keyword: String,
    regex: Regex,
}

impl KeywordPattern {
    /// Compile a keyword. Returns `None` for keywords with no word
    /// characters (nothing to anchor a boundary on).
    pub fn compile(keyword: &str) -> Option<Self> {
        let tokens: Vec<&str> = keyword.split_whitespace().collect();
        if tokens.is_empty() || !keyword.chars().any(|c| c.is_alphanumeric()) {
            return None;
        }
        let escaped: Vec<String> = tokens.iter().map(|t| regex::escape(t)).collect();
        let pattern = format!(r"(?i)\b{}\b", escaped.join(r"\s+"));
        let regex = Regex::new(&pattern).ok()?;
        Some(Self {
            keyword: keyword.to_string(),
            regex,
        })
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// Boundary-safe test with the concatenation-tolerant retry.
    pub fn matches(&self, line: &str) -> bool {
        if self.regex.is_match(line) {
            return true;
        }
        // Degraded retry: "2O/H bumper" → "bumper ..." so a leading digit
        // glued to the text cannot hide the word boundary.
        match degraded_prefix_re().find(line) {
            Some(m) if m.end() > 0 => self.regex.is_match(&line[m.end()..]),
            _ => false,
        }
    }
}

/// One-off convenience test; compiles the keyword on every call.
/// Hot paths compile once via `KeywordPattern` or `KeywordSetMatcher`.
pub fn keyword_matched(line: &str, keyword: &str) -> bool {
    KeywordPattern::compile(keyword).is_some_and(|p| p.matches(line))
}

/// A set of keywords with an aho-corasick prefilter in front of the
/// boundary-safe confirmers.
pub struct KeywordSetMatcher {
    patterns: Vec<KeywordPattern>,
    prefilter: AhoCorasick,
}

impl KeywordSetMatcher {
    pub fn new<'a>(keywords: impl IntoIterator<Item = &'a str>) -> Self {
        let patterns: Vec<KeywordPattern> = keywords
            .into_iter()
            .filter_map(KeywordPattern::compile)
            .collect();
        // Prefilter on the first token of each keyword: cheap containment
        // check before the regex confirm.
        let seeds: Vec<String> = patterns
            .iter()
            .map(|p| {
                p.keyword()
                    .split_whitespace()
                    .next()
                    .unwrap_or(p.keyword())
                    .to_lowercase()
            })
            .collect();
        let prefilter = AhoCorasickBuilder::new()
            .ascii_case_insensitive(true)
            .build(&seeds)
            .expect("prefilter builds from plain keyword tokens");
        Self {
            patterns,
            prefilter,
        }
    }

    /// First keyword in set order that matches the line.
    pub fn first_match(&self, line: &str) -> Option<&str> {
        if !self.prefilter.is_match(line) && !self.prefilter.is_match(&degraded(line)) {
            return None;
        }
        self.patterns
            .iter()
            .find(|p| p.matches(line))
            .map(|p| p.keyword())
    }

    /// All keywords that match the line, in set order.
    pub fn all_matches(&self, line: &str) -> Vec<&str> {
        if !self.prefilter.is_match(line) && !self.prefilter.is_match(&degraded(line)) {
            return Vec::new();
        }
        self.patterns
            .iter()
            .filter(|p| p.matches(line))
            .map(|p| p.keyword())
            .collect()
    }
}

fn degraded(line: &str) -> String {
    match degraded_prefix_re().find(line) {
        Some(m) if m.end() > 0 => line[m.end()..].to_string(),
        _ => String::new(),
    }
}

/// Compiled vocabularies for every repair category and ADAS part.
/// Built once per pipeline; construction compiles every keyword.
pub struct VocabularyMatcher {
    categories: FxHashMap<RepairKind, KeywordSetMatcher>,
    parts: FxHashMap<AdasPart, KeywordSetMatcher>,
}

impl VocabularyMatcher {
    pub fn new() -> Self {
        let categories = ALL_REPAIR_KINDS
            .iter()
            .map(|k| (*k, KeywordSetMatcher::new(repair_category_keywords(*k).iter().copied())))
            .collect();
        let parts = ALL_ADAS_PARTS
            .iter()
            .map(|p| (*p, KeywordSetMatcher::new(adas_part_keywords(*p).iter().copied())))
            .collect();
        Self { categories, parts }
    }

    /// Repair categories hit by a line, with the first matching keyword of
    /// each, in fixed category order.
    pub fn repair_categories(&self, line: &str) -> Vec<(RepairKind, &str)> {
        ALL_REPAIR_KINDS
            .iter()
            .filter_map(|k| {
                self.categories
                    .get(k)
                    .and_then(|m| m.first_match(line))
                    .map(|kw| (*k, kw))
            })
            .collect()
    }

    /// ADAS parts mentioned on a line, in fixed part order.
    pub fn adas_parts(&self, line: &str) -> Vec<(AdasPart, &str)> {
        ALL_ADAS_PARTS
            .iter()
            .filter_map(|p| {
                self.parts
                    .get(p)
                    .and_then(|m| m.first_match(line))
                    .map(|kw| (*p, kw))
            })
            .collect()
    }
}

impl Default for VocabularyMatcher {
    fn default() -> Self {
        Self::new()
    }
}
