// Error taxonomy for feature extraction.
//
// Every variant is fatal for the single problem instance it concerns. The
// pipeline driver isolates failures per problem so the rest of a batch keeps
// going, but nothing here is ever turned into a default or zero value.

use thiserror::Error;

/// Errors raised by the vector space and stylometry code.
#[derive(Error, Debug)]
pub enum QuillError {
    /// A statistic or fit needed at least one corpus document.
    #[error("corpus is empty: at least one known document is required")]
    EmptyCorpus,

    /// A document produced no words for a feature that needs some.
    #[error("document has no words to compute {feature}")]
    EmptyDocument { feature: &'static str },

    /// Every term was pruned by the document-frequency or stopword filters.
    #[error("no terms remain after pruning ({documents} documents, max_df {max_df})")]
    EmptyVocabulary { documents: usize, max_df: f64 },

    /// A transformed document shares no n-grams with the fitted vocabulary.
    #[error("document shares no n-grams with the fitted vocabulary ({vocabulary} terms)")]
    EmptyVocabularyMatch { vocabulary: usize },

    /// The lazy fit behind a representation space failed.
    #[error("no vector space model could be fit: {source}")]
    ModelNotFitted {
        #[source]
        source: Box<QuillError>,
    },

    /// A ground-truth answer was neither affirmative nor negative.
    #[error("invalid truth answer '{answer}' for problem {problem} (expected Y or N)")]
    InvalidLabel { problem: String, answer: String },

    /// A vector space configuration is out of range.
    #[error("invalid vector space config: {reason}")]
    InvalidConfig { reason: String },
}

pub type Result<T> = std::result::Result<T, QuillError>;
