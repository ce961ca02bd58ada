//! Text normalization applied before feature extraction
//!
//! The pipeline is fixed and must match the one the artifacts were fitted
//! with: lowercase, strip ASCII punctuation, strip digit runs, split on
//! whitespace, drop English stopwords, lemmatize, rejoin with single spaces.

use crate::lemma::lemmatize;
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

/// English stopword list (179 entries).
///
/// Contraction entries can never match after punctuation stripping; they are
/// kept so the set matches the list the artifacts were fitted against.
pub const ENGLISH_STOPWORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan",
    "shan't", "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't",
    "wouldn", "wouldn't",
];

fn stopwords() -> &'static HashSet<&'static str> {
    static STOPWORDS: OnceLock<HashSet<&'static str>> = OnceLock::new();
    STOPWORDS.get_or_init(|| ENGLISH_STOPWORDS.iter().copied().collect())
}

fn digit_runs() -> &'static Regex {
    static DIGITS: OnceLock<Regex> = OnceLock::new();
    // \d is Unicode-aware (decimal digits in every script).
    DIGITS.get_or_init(|| Regex::new(r"\d+").expect("digit pattern is valid"))
}

/// Check whether a lowercased token is an English stopword
pub fn is_stopword(token: &str) -> bool {
    stopwords().contains(token)
}

/// Normalize raw text for feature extraction.
///
/// Never fails; empty or all-noise input yields an empty string.
pub fn preprocess(text: &str) -> String {
    let lowered = text.to_lowercase();

    let without_punctuation: String = lowered
        .chars()
        .filter(|c| !c.is_ascii_punctuation())
        .collect();

    let without_digits = digit_runs().replace_all(&without_punctuation, "");

    without_digits
        .split_whitespace()
        .filter(|token| !is_stopword(token))
        .map(lemmatize)
        .collect::<Vec<_>>()
        .join(" ")
}
