// Memo of fitted vector space models.
//
// Keyed by the corpus content digest plus the complete config, so models fit
// with different max_df or stopwords never alias. Entries live as long as the
// cache; there is no eviction. The lock is held across a fit, which keeps the
// guarantee of at most one fit per key even if the cache is shared.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, info};

use super::config::VectorSpaceConfig;
use super::corpus::{Corpus, CorpusDigest};
use super::model::VectorSpaceModel;
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    corpus: CorpusDigest,
    config: VectorSpaceConfig,
}

#[derive(Default)]
struct CacheState {
    models: HashMap<CacheKey, Arc<VectorSpaceModel>>,
    fits: usize,
    hits: usize,
}

/// Shared store of fitted models.
#[derive(Default)]
pub struct VectorSpaceCache {
    state: Mutex<CacheState>,
}

impl VectorSpaceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the model for `(corpus, config)`, fitting it on first request.
    pub fn get_or_create(
        &self,
        corpus: &Corpus,
        config: &VectorSpaceConfig,
    ) -> Result<Arc<VectorSpaceModel>> {
        let key = CacheKey {
            corpus: corpus.digest().clone(),
            config: config.clone(),
        };

        let mut state = self.lock();
        if let Some(model) = state.models.get(&key) {
            let model = Arc::clone(model);
            state.hits += 1;
            debug!(config = %config, corpus = &key.corpus.as_str()[..12], "Vector space cache hit");
            return Ok(model);
        }

        let model = Arc::new(VectorSpaceModel::fit(corpus, config)?);
        state.fits += 1;
        info!(
            config = %config,
            documents = corpus.len(),
            vocabulary = model.vocabulary_size(),
            "Fitted vector space"
        );
        state.models.insert(key, Arc::clone(&model));
        Ok(model)
    }

    /// Number of fits performed since creation.
    pub fn fit_count(&self) -> usize {
        self.lock().fits
    }

    pub fn hit_count(&self) -> usize {
        self.lock().hits
    }

    /// Number of distinct models stored.
    pub fn len(&self) -> usize {
        self.lock().models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, CacheState> {
        // A panic mid-fit leaves no partial entry behind, so a poisoned
        // lock still guards a consistent map.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::space::config::{StopwordLanguage, Stopwords, TokenUnit};

    fn corpus() -> Corpus {
        ["the cat sat.", "the dog ran."].into_iter().collect()
    }

    #[test]
    fn test_second_request_returns_same_model() {
        let cache = VectorSpaceCache::new();
        let config = VectorSpaceConfig::new(TokenUnit::Word, 2);
        let first = cache.get_or_create(&corpus(), &config).unwrap();
        let second = cache.get_or_create(&corpus(), &config).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.fit_count(), 1);
        assert_eq!(cache.hit_count(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_every_config_field_is_part_of_the_key() {
        let cache = VectorSpaceCache::new();
        let base = VectorSpaceConfig::new(TokenUnit::Word, 1);
        let variants = [
            base.clone(),
            base.clone().with_max_document_frequency(0.7),
            base.clone()
                .with_stopwords(Stopwords::Language(StopwordLanguage::English)),
            base.clone().with_lowercase(false),
            VectorSpaceConfig::new(TokenUnit::Character, 1),
        ];
        for config in &variants {
            cache.get_or_create(&corpus(), config).unwrap();
        }
        assert_eq!(cache.fit_count(), variants.len());
        assert_eq!(cache.len(), variants.len());
    }

    #[test]
    fn test_failed_fit_is_not_cached() {
        let cache = VectorSpaceCache::new();
        let empty = Corpus::new(Vec::new());
        let config = VectorSpaceConfig::default();
        assert!(cache.get_or_create(&empty, &config).is_err());
        assert!(cache.get_or_create(&empty, &config).is_err());
        assert!(cache.is_empty());
        assert_eq!(cache.fit_count(), 0);
    }
}
