// Vector space configuration — the value object every cache key is built from.
//
// Two configs with the same fields are interchangeable, so equality and hashing
// cover every field. The document-frequency ceiling is a float; it is compared
// by bit pattern so it can take part in `Hash`.

use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use stop_words::{get, LANGUAGE};

use crate::error::{QuillError, Result};

/// What an n-gram is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenUnit {
    /// Character windows over the whole (whitespace-collapsed) text.
    Character,
    /// Character windows inside each word, padded with a space on both sides.
    CharacterWordBounded,
    /// Word windows over `\w\w+` tokens.
    Word,
}

impl TokenUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Character => "char",
            Self::CharacterWordBounded => "char_wb",
            Self::Word => "word",
        }
    }
}

/// Inclusive range of n-gram sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NgramRange {
    pub min: usize,
    pub max: usize,
}

impl NgramRange {
    pub fn exactly(n: usize) -> Self {
        Self { min: n, max: n }
    }

    pub fn sizes(&self) -> std::ops::RangeInclusive<usize> {
        self.min..=self.max
    }
}

/// Languages with a built-in stopword list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StopwordLanguage {
    English,
    Dutch,
    Greek,
    Spanish,
}

impl StopwordLanguage {
    /// Parse a language tag as it appears in dataset metadata ("English", "en", ...).
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_lowercase().as_str() {
            "english" | "en" => Some(Self::English),
            "dutch" | "nl" => Some(Self::Dutch),
            "greek" | "gr" | "el" => Some(Self::Greek),
            "spanish" | "sp" | "es" => Some(Self::Spanish),
            _ => None,
        }
    }

    fn words(&self) -> Vec<String> {
        let language = match self {
            Self::English => LANGUAGE::English,
            Self::Dutch => LANGUAGE::Dutch,
            Self::Greek => LANGUAGE::Greek,
            Self::Spanish => LANGUAGE::Spanish,
        };
        get(language)
    }
}

/// Stopwords removed from word tokens before n-grams are formed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Stopwords {
    #[default]
    None,
    Language(StopwordLanguage),
    Custom(BTreeSet<String>),
}

impl Stopwords {
    /// Resolve to a concrete, lowercased word set.
    pub fn resolve(&self) -> BTreeSet<String> {
        match self {
            Self::None => BTreeSet::new(),
            Self::Language(language) => {
                language.words().into_iter().map(|w| w.to_lowercase()).collect()
            }
            Self::Custom(words) => words.iter().map(|w| w.to_lowercase()).collect(),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// Full configuration of one vector space model.
#[derive(Debug, Clone)]
pub struct VectorSpaceConfig {
    pub unit: TokenUnit,
    pub ngram_range: NgramRange,
    /// Terms present in more than this fraction of corpus documents are dropped.
    pub max_document_frequency: f64,
    /// Only applied to `TokenUnit::Word`.
    pub stopwords: Stopwords,
    pub lowercase: bool,
}

impl Default for VectorSpaceConfig {
    fn default() -> Self {
        Self {
            unit: TokenUnit::Word,
            ngram_range: NgramRange::exactly(1),
            max_document_frequency: 1.0,
            stopwords: Stopwords::None,
            lowercase: true,
        }
    }
}

impl VectorSpaceConfig {
    pub fn new(unit: TokenUnit, n: usize) -> Self {
        Self {
            unit,
            ngram_range: NgramRange::exactly(n),
            ..Self::default()
        }
    }

    pub fn with_ngram_range(mut self, min: usize, max: usize) -> Self {
        self.ngram_range = NgramRange { min, max };
        self
    }

    pub fn with_max_document_frequency(mut self, max_df: f64) -> Self {
        self.max_document_frequency = max_df;
        self
    }

    pub fn with_stopwords(mut self, stopwords: Stopwords) -> Self {
        self.stopwords = stopwords;
        self
    }

    pub fn with_lowercase(mut self, lowercase: bool) -> Self {
        self.lowercase = lowercase;
        self
    }

    /// Reject configurations no model can be fit under.
    pub fn validate(&self) -> Result<()> {
        if self.ngram_range.min == 0 {
            return Err(QuillError::InvalidConfig {
                reason: "n-gram size must be at least 1".to_string(),
            });
        }
        if self.ngram_range.min > self.ngram_range.max {
            return Err(QuillError::InvalidConfig {
                reason: format!(
                    "n-gram range ({}, {}) has min above max",
                    self.ngram_range.min, self.ngram_range.max
                ),
            });
        }
        let max_df = self.max_document_frequency;
        if !(max_df > 0.0 && max_df <= 1.0) {
            return Err(QuillError::InvalidConfig {
                reason: format!("max_document_frequency {max_df} is outside (0, 1]"),
            });
        }
        Ok(())
    }

    /// The representation spaces used by the reference experiment.
    pub fn default_spaces() -> Vec<VectorSpaceConfig> {
        let mut spaces = Vec::new();
        for unit in [TokenUnit::Character, TokenUnit::CharacterWordBounded] {
            for n in [3, 8] {
                spaces.push(Self::new(unit, n));
            }
        }
        spaces.push(Self::new(TokenUnit::Word, 2));
        spaces.push(
            Self::new(TokenUnit::Word, 1)
                .with_stopwords(Stopwords::Language(StopwordLanguage::English)),
        );
        spaces.push(Self::new(TokenUnit::Word, 1).with_max_document_frequency(0.7));
        spaces
    }
}

impl PartialEq for VectorSpaceConfig {
    fn eq(&self, other: &Self) -> bool {
        self.unit == other.unit
            && self.ngram_range == other.ngram_range
            && self.max_document_frequency.to_bits() == other.max_document_frequency.to_bits()
            && self.stopwords == other.stopwords
            && self.lowercase == other.lowercase
    }
}

impl Eq for VectorSpaceConfig {}

impl Hash for VectorSpaceConfig {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.unit.hash(state);
        self.ngram_range.hash(state);
        self.max_document_frequency.to_bits().hash(state);
        self.stopwords.hash(state);
        self.lowercase.hash(state);
    }
}

impl fmt::Display for VectorSpaceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.unit.as_str())?;
        if self.ngram_range.min == self.ngram_range.max {
            write!(f, "-{}", self.ngram_range.min)?;
        } else {
            write!(f, "-{}..{}", self.ngram_range.min, self.ngram_range.max)?;
        }
        if self.max_document_frequency < 1.0 {
            write!(f, " max_df={}", self.max_document_frequency)?;
        }
        match &self.stopwords {
            Stopwords::None => {}
            Stopwords::Language(language) => write!(f, " stop={language:?}")?,
            Stopwords::Custom(words) => write!(f, " stop=custom({})", words.len())?,
        }
        Ok(())
    }
}
