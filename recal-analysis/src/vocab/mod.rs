//! Curated keyword vocabularies and boundary-safe matching.

pub mod keywords;
pub mod matcher;

pub use keywords::{adas_part_keywords, repair_category_keywords};
pub use matcher::{keyword_matched, KeywordPattern, KeywordSetMatcher, VocabularyMatcher};
