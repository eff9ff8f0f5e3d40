// Representation space — one vector space config bound to one problem.
//
// The model is fit lazily (through the shared cache) on the first request
// that needs it. Mean similarity and the outlier count are pure functions of
// the bound corpus, unknown text and config, so each is computed once and
// memoized on the instance.

use std::sync::{Arc, OnceLock};

use serde::Serialize;

use super::cache::VectorSpaceCache;
use super::config::VectorSpaceConfig;
use super::corpus::Corpus;
use super::model::{SparseVector, VectorSpaceModel};
use super::similarity::SimilarityMeasure;
use crate::error::{QuillError, Result};
use crate::problem::ProblemId;

/// Similarity statistics of the unknown document against the corpus.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpaceStatistics {
    pub mean_similarity: f64,
    pub outlier_count: usize,
}

pub struct RepresentationSpace {
    config: Arc<VectorSpaceConfig>,
    cache: Arc<VectorSpaceCache>,
    problem: ProblemId,
    corpus: Arc<Corpus>,
    unknown: Arc<str>,
    label: Option<bool>,
    /// Function used by `similarity`.
    measure: SimilarityMeasure,
    model: OnceLock<Arc<VectorSpaceModel>>,
    mean: OnceLock<f64>,
    outliers: OnceLock<usize>,
}

impl RepresentationSpace {
    pub fn new(
        config: Arc<VectorSpaceConfig>,
        cache: Arc<VectorSpaceCache>,
        problem: ProblemId,
        corpus: Arc<Corpus>,
        unknown: Arc<str>,
    ) -> Self {
        Self {
            config,
            cache,
            problem,
            corpus,
            unknown,
            label: None,
            measure: SimilarityMeasure::default(),
            model: OnceLock::new(),
            mean: OnceLock::new(),
            outliers: OnceLock::new(),
        }
    }

    pub fn with_measure(mut self, measure: SimilarityMeasure) -> Self {
        self.measure = measure;
        self
    }

    pub fn config(&self) -> &VectorSpaceConfig {
        &self.config
    }

    pub fn problem(&self) -> &ProblemId {
        &self.problem
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn unknown(&self) -> &str {
        &self.unknown
    }

    pub fn measure(&self) -> SimilarityMeasure {
        self.measure
    }

    pub fn label(&self) -> Option<bool> {
        self.label
    }

    pub fn set_label(&mut self, label: bool) {
        self.label = Some(label);
    }

    pub fn is_fitted(&self) -> bool {
        self.model.get().is_some()
    }

    /// The fitted model, fitting it through the cache on first use.
    pub fn model(&self) -> Result<Arc<VectorSpaceModel>> {
        if let Some(model) = self.model.get() {
            return Ok(Arc::clone(model));
        }
        let model = self
            .cache
            .get_or_create(&self.corpus, &self.config)
            .map_err(|source| QuillError::ModelNotFitted {
                source: Box::new(source),
            })?;
        Ok(Arc::clone(self.model.get_or_init(|| model)))
    }

    /// Similarity of two documents under this space, on [0, 1].
    pub fn similarity(&self, a: &str, b: &str) -> Result<f64> {
        let model = self.model()?;
        let va = model.transform(a)?;
        let vb = model.transform(b)?;
        Ok(self.measure.score(&va, &vb))
    }

    /// Average similarity of each corpus document to the unknown document.
    pub fn mean_similarity(&self) -> Result<f64> {
        if let Some(mean) = self.mean.get() {
            return Ok(*mean);
        }
        if self.corpus.is_empty() {
            return Err(QuillError::EmptyCorpus);
        }

        let model = self.model()?;
        let unknown = model.transform(&self.unknown)?;
        let vectors = self.corpus_vectors(&model)?;
        let total: f64 = vectors
            .iter()
            .map(|v| self.measure.score(v, &unknown))
            .sum();
        let mean = total / vectors.len() as f64;

        Ok(*self.mean.get_or_init(|| mean))
    }

    /// Number of corpus documents less similar to the unknown document than
    /// to every other corpus document.
    ///
    /// Documents are "other" by position, so duplicate texts still compare
    /// against each other. A document with no other document to compare to
    /// has an undefined (infinite) in-corpus minimum and never counts.
    pub fn outlier_count(&self) -> Result<usize> {
        if let Some(count) = self.outliers.get() {
            return Ok(*count);
        }
        if self.corpus.is_empty() {
            return Err(QuillError::EmptyCorpus);
        }

        let model = self.model()?;
        let unknown = model.transform(&self.unknown)?;
        let vectors = self.corpus_vectors(&model)?;

        let mut count = 0;
        for (i, vector) in vectors.iter().enumerate() {
            let min_in_corpus = vectors
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != i)
                .map(|(_, other)| self.measure.score(vector, other))
                .fold(f64::INFINITY, f64::min);

            if min_in_corpus.is_finite() && self.measure.score(vector, &unknown) < min_in_corpus {
                count += 1;
            }
        }

        Ok(*self.outliers.get_or_init(|| count))
    }

    pub fn statistics(&self) -> Result<SpaceStatistics> {
        Ok(SpaceStatistics {
            mean_similarity: self.mean_similarity()?,
            outlier_count: self.outlier_count()?,
        })
    }

    fn corpus_vectors(&self, model: &VectorSpaceModel) -> Result<Vec<SparseVector>> {
        self.corpus
            .documents()
            .iter()
            .map(|document| model.transform(document))
            .collect()
    }
}

impl std::fmt::Debug for RepresentationSpace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RepresentationSpace")
            .field("config", &self.config.to_string())
            .field("problem", &self.problem)
            .field("documents", &self.corpus.len())
            .field("label", &self.label)
            .field("measure", &self.measure)
            .field("fitted", &self.is_fitted())
            .finish()
    }
}
