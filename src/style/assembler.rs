// Feature vector assembly.
//
// Layout of the stylometric block (offsets are part of the output contract):
//
//   0  mean sentence length        5  ':' rate
//   1  sentence length stddev      6  '(' rate
//   2  vocabulary diversity        7  ')' rate
//   3  ',' rate                    8  '!' rate
//   4  ';' rate                    9  '?' rate
//
// Problem vectors append, per representation space in the order given,
// [mean similarity] then [outlier count], and finally [total outlier count]
// summed across spaces. Every sub-feature is its own sub-vector so wider
// features can be added later without reshaping the rest.

use serde::Serialize;

use super::features::{punctuation_rates, sentence_length_stats, vocabulary_diversity};
use crate::error::Result;
use crate::space::representation::RepresentationSpace;

/// Named offsets of the stylometric block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleFeature {
    MeanSentenceLength,
    SentenceLengthStddev,
    VocabularyDiversity,
    CommaRate,
    SemicolonRate,
    ColonRate,
    OpenParenRate,
    CloseParenRate,
    ExclamationRate,
    QuestionRate,
}

impl StyleFeature {
    pub const ALL: [StyleFeature; 10] = [
        Self::MeanSentenceLength,
        Self::SentenceLengthStddev,
        Self::VocabularyDiversity,
        Self::CommaRate,
        Self::SemicolonRate,
        Self::ColonRate,
        Self::OpenParenRate,
        Self::CloseParenRate,
        Self::ExclamationRate,
        Self::QuestionRate,
    ];

    pub fn offset(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::MeanSentenceLength => "sentence_mean",
            Self::SentenceLengthStddev => "sentence_stddev",
            Self::VocabularyDiversity => "vocabulary_diversity",
            Self::CommaRate => "comma_rate",
            Self::SemicolonRate => "semicolon_rate",
            Self::ColonRate => "colon_rate",
            Self::OpenParenRate => "open_paren_rate",
            Self::CloseParenRate => "close_paren_rate",
            Self::ExclamationRate => "exclamation_rate",
            Self::QuestionRate => "question_rate",
        }
    }
}

/// Ordered sub-feature vectors for one document or problem.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FeatureVector {
    features: Vec<Vec<f64>>,
}

impl FeatureVector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_scalar(&mut self, value: f64) {
        self.features.push(vec![value]);
    }

    pub fn push(&mut self, sub_feature: Vec<f64>) {
        self.features.push(sub_feature);
    }

    /// Number of sub-features.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn sub_feature(&self, index: usize) -> Option<&[f64]> {
        self.features.get(index).map(Vec::as_slice)
    }

    /// Scalar value of a stylometric feature.
    pub fn get(&self, feature: StyleFeature) -> Option<f64> {
        self.sub_feature(feature.offset())
            .and_then(|sub| sub.first().copied())
    }

    pub fn sub_features(&self) -> &[Vec<f64>] {
        &self.features
    }

    /// All values as one flat column.
    pub fn flatten(&self) -> Vec<f64> {
        self.features.iter().flatten().copied().collect()
    }
}

/// Stylometric block for one document.
pub fn assemble(document: &str) -> Result<FeatureVector> {
    let stats = sentence_length_stats(document);
    let diversity = vocabulary_diversity(document)?;

    let mut vector = FeatureVector::new();
    vector.push_scalar(stats.mean);
    vector.push_scalar(stats.stddev);
    vector.push_scalar(diversity);
    for rate in punctuation_rates(document) {
        vector.push_scalar(rate);
    }
    Ok(vector)
}

/// Stylometric block of the unknown text followed by the statistics of each
/// representation space. The first failing space fails the whole problem.
pub fn assemble_problem(unknown: &str, spaces: &[RepresentationSpace]) -> Result<FeatureVector> {
    let mut vector = assemble(unknown)?;
    let mut total_outliers = 0;
    for space in spaces {
        let stats = space.statistics()?;
        vector.push_scalar(stats.mean_similarity);
        vector.push_scalar(stats.outlier_count as f64);
        total_outliers += stats.outlier_count;
    }
    if !spaces.is_empty() {
        vector.push_scalar(total_outliers as f64);
    }
    Ok(vector)
}

/// Column names matching `assemble_problem` for the given space labels.
pub fn feature_names<S: AsRef<str>>(space_labels: &[S]) -> Vec<String> {
    let mut names: Vec<String> = StyleFeature::ALL
        .iter()
        .map(|f| f.name().to_string())
        .collect();
    for label in space_labels {
        names.push(format!("{} mean", label.as_ref()));
        names.push(format!("{} count", label.as_ref()));
    }
    if !space_labels.is_empty() {
        names.push("total count".to_string());
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assemble_has_ten_scalars() {
        let vector = assemble("Hello, world! How are you? Fine.").unwrap();
        assert_eq!(vector.len(), 10);
        assert!(vector.sub_features().iter().all(|sub| sub.len() == 1));
        assert_eq!(vector.flatten().len(), 10);
    }

    #[test]
    fn test_offsets_are_stable() {
        for (i, feature) in StyleFeature::ALL.iter().enumerate() {
            assert_eq!(feature.offset(), i);
        }
    }

    #[test]
    fn test_feature_names_style_only() {
        let names = feature_names::<&str>(&[]);
        assert_eq!(names.len(), 10);
        assert_eq!(names[0], "sentence_mean");
        assert_eq!(names[9], "question_rate");
    }

    #[test]
    fn test_feature_names_with_spaces() {
        let names = feature_names(&["char-3", "word-2"]);
        assert_eq!(names.len(), 15);
        assert_eq!(names[10], "char-3 mean");
        assert_eq!(names[13], "word-2 count");
        assert_eq!(names[14], "total count");
    }

    #[test]
    fn test_assemble_empty_document_fails() {
        assert!(assemble("").is_err());
    }
}
