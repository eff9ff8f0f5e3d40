// Stylometric features over raw document text.
//
// Sentences end at `.`, `!` or `?` followed by whitespace. Segments with no
// words (stray punctuation, trailing whitespace) are not sentences. The same
// segmentation feeds sentence-length statistics and punctuation rates, so a
// text's sentence count is consistent across features.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::error::{QuillError, Result};

static SENTENCE_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]\s+").expect("static sentence pattern"));

/// Marks stripped before counting vocabulary.
pub const STRIPPED_MARKS: &str = ":;?!.,()";

/// Marks whose per-sentence rate is measured, in feature order.
pub const PUNCTUATION_MARKS: [char; 7] = [',', ';', ':', '(', ')', '!', '?'];

/// Population mean and standard deviation of words per sentence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SentenceStats {
    pub mean: f64,
    pub stddev: f64,
}

/// Word counts of each sentence, in order.
pub fn sentence_lengths(document: &str) -> Vec<usize> {
    SENTENCE_BOUNDARY
        .split(document)
        .map(|sentence| sentence.split_whitespace().count())
        .filter(|&words| words > 0)
        .collect()
}

/// Number of sentences, never less than 1.
pub fn sentence_count(document: &str) -> usize {
    sentence_lengths(document).len().max(1)
}

/// Text without any sentence boundary is one sentence; text without any
/// words is one sentence of length 0.
pub fn sentence_length_stats(document: &str) -> SentenceStats {
    let mut lengths = sentence_lengths(document);
    if lengths.is_empty() {
        lengths.push(0);
    }

    let n = lengths.len() as f64;
    let mean = lengths.iter().sum::<usize>() as f64 / n;
    let variance = lengths
        .iter()
        .map(|&len| {
            let d = len as f64 - mean;
            d * d
        })
        .sum::<f64>()
        / n;

    SentenceStats {
        mean,
        stddev: variance.sqrt(),
    }
}

/// Distinct words divided by total words, after stripping `:;?!.,()`.
/// Case-sensitive.
pub fn vocabulary_diversity(document: &str) -> Result<f64> {
    let stripped: String = document
        .chars()
        .filter(|c| !STRIPPED_MARKS.contains(*c))
        .collect();
    let words: Vec<&str> = stripped.split_whitespace().collect();
    if words.is_empty() {
        return Err(QuillError::EmptyDocument {
            feature: "vocabulary diversity",
        });
    }

    let distinct: HashSet<&str> = words.iter().copied().collect();
    Ok(distinct.len() as f64 / words.len() as f64)
}

/// Occurrences of each of `, ; : ( ) ! ?` per sentence, in that order.
pub fn punctuation_rates(document: &str) -> [f64; 7] {
    let sentences = sentence_count(document) as f64;
    let mut counts = [0usize; 7];
    for c in document.chars() {
        if let Some(i) = PUNCTUATION_MARKS.iter().position(|&mark| mark == c) {
            counts[i] += 1;
        }
    }
    counts.map(|count| count as f64 / sentences)
}
