// TF-IDF vector space model.
//
// Fitting learns a sorted vocabulary and one inverse document frequency per
// term from the corpus:
//
//   idf(t) = ln((1 + n) / (1 + df(t))) + 1
//
// Terms found in more than `max_df * n` documents are pruned. Transforming a
// document counts its in-vocabulary n-grams, scales by idf and L2-normalizes.
// A model never changes after `fit` returns.

use std::collections::{BTreeMap, HashMap, HashSet};

use tracing::debug;

use super::config::VectorSpaceConfig;
use super::corpus::Corpus;
use super::tokenize::Tokenizer;
use crate::error::{QuillError, Result};

/// Sparse vector in a fitted space: `(column, weight)` pairs sorted by column.
#[derive(Debug, Clone, PartialEq)]
pub struct SparseVector {
    pub dimension: usize,
    pub entries: Vec<(usize, f64)>,
}

impl SparseVector {
    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < self.entries.len() && j < other.entries.len() {
            let (ci, wi) = self.entries[i];
            let (cj, wj) = other.entries[j];
            match ci.cmp(&cj) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += wi * wj;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }

    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt()
    }

    pub fn sum(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w).sum()
    }

    pub fn nnz(&self) -> usize {
        self.entries.len()
    }
}

/// A vocabulary and idf weights fit on one corpus under one config.
pub struct VectorSpaceModel {
    config: VectorSpaceConfig,
    tokenizer: Tokenizer,
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    documents: usize,
}

impl VectorSpaceModel {
    /// Fit a model on the corpus.
    pub fn fit(corpus: &Corpus, config: &VectorSpaceConfig) -> Result<Self> {
        config.validate()?;
        if corpus.is_empty() {
            return Err(QuillError::EmptyCorpus);
        }

        let tokenizer = Tokenizer::new(config);
        let n_docs = corpus.len();

        // Document frequency: number of documents each term appears in
        let mut doc_freq: BTreeMap<String, usize> = BTreeMap::new();
        for document in corpus.documents() {
            let unique: HashSet<String> = tokenizer.ngrams(document).into_iter().collect();
            for term in unique {
                *doc_freq.entry(term).or_insert(0) += 1;
            }
        }

        let candidates = doc_freq.len();
        let max_doc_count = config.max_document_frequency * n_docs as f64;
        doc_freq.retain(|_, df| (*df as f64) <= max_doc_count);

        if doc_freq.is_empty() {
            return Err(QuillError::EmptyVocabulary {
                documents: n_docs,
                max_df: config.max_document_frequency,
            });
        }

        // BTreeMap iteration is sorted, so columns follow lexicographic term order
        let mut vocabulary = HashMap::with_capacity(doc_freq.len());
        let mut idf = Vec::with_capacity(doc_freq.len());
        for (column, (term, df)) in doc_freq.into_iter().enumerate() {
            idf.push(((1.0 + n_docs as f64) / (1.0 + df as f64)).ln() + 1.0);
            vocabulary.insert(term, column);
        }

        debug!(
            config = %config,
            documents = n_docs,
            candidates,
            vocabulary = vocabulary.len(),
            "Fit vector space model"
        );

        Ok(Self {
            config: config.clone(),
            tokenizer,
            vocabulary,
            idf,
            documents: n_docs,
        })
    }

    /// Map a document into the fitted space.
    ///
    /// Fails with `EmptyVocabularyMatch` when none of the document's n-grams
    /// are in the vocabulary; a zero vector is never returned.
    pub fn transform(&self, document: &str) -> Result<SparseVector> {
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for ngram in self.tokenizer.ngrams(document) {
            if let Some(&column) = self.vocabulary.get(&ngram) {
                *counts.entry(column).or_insert(0.0) += 1.0;
            }
        }

        let mut entries: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(column, tf)| (column, tf * self.idf[column]))
            .collect();

        let norm = entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if entries.is_empty() || norm == 0.0 {
            return Err(QuillError::EmptyVocabularyMatch {
                vocabulary: self.vocabulary.len(),
            });
        }
        for (_, weight) in &mut entries {
            *weight /= norm;
        }

        Ok(SparseVector {
            dimension: self.vocabulary.len(),
            entries,
        })
    }

    pub fn config(&self) -> &VectorSpaceConfig {
        &self.config
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Number of documents the model was fit on.
    pub fn documents(&self) -> usize {
        self.documents
    }

    pub fn contains(&self, term: &str) -> bool {
        self.vocabulary.contains_key(term)
    }

    pub fn idf(&self, term: &str) -> Option<f64> {
        self.vocabulary.get(term).map(|&column| self.idf[column])
    }
}

impl std::fmt::Debug for VectorSpaceModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VectorSpaceModel")
            .field("config", &self.config)
            .field("vocabulary", &self.vocabulary.len())
            .field("documents", &self.documents)
            .finish()
    }
}
