// Unit tests for the vector space subsystem.
//
// Tests the public surface: cache identity and fit counting, model
// contracts (empty corpus, vocabulary mismatch), and the representation
// space statistics including the single-document outlier edge case.

use std::sync::Arc;

use quill::error::QuillError;
use quill::problem::ProblemId;
use quill::space::cache::VectorSpaceCache;
use quill::space::config::{StopwordLanguage, Stopwords, TokenUnit, VectorSpaceConfig};
use quill::space::corpus::Corpus;
use quill::space::model::VectorSpaceModel;
use quill::space::representation::RepresentationSpace;
use quill::space::similarity::SimilarityMeasure;

fn corpus(docs: &[&str]) -> Corpus {
    docs.iter().copied().collect()
}

fn space_with_cache(
    cache: &Arc<VectorSpaceCache>,
    config: VectorSpaceConfig,
    docs: &[&str],
    unknown: &str,
) -> RepresentationSpace {
    RepresentationSpace::new(
        Arc::new(config),
        Arc::clone(cache),
        ProblemId::new("EN001", "essays", "English"),
        Arc::new(corpus(docs)),
        Arc::from(unknown),
    )
}

// ============================================================
// VectorSpaceCache
// ============================================================

#[test]
fn cache_returns_identical_model_and_fits_once() {
    let cache = VectorSpaceCache::new();
    let config = VectorSpaceConfig::new(TokenUnit::Character, 3);
    let c = corpus(&["an essay about rivers", "another essay about lakes"]);

    let models: Vec<_> = (0..5)
        .map(|_| cache.get_or_create(&c, &config).unwrap())
        .collect();

    assert!(models.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
    assert_eq!(cache.fit_count(), 1);
}

#[test]
fn cache_keys_on_content_not_instance() {
    let cache = VectorSpaceCache::new();
    let config = VectorSpaceConfig::new(TokenUnit::Word, 1);
    let a = cache
        .get_or_create(&corpus(&["one two", "three four"]), &config)
        .unwrap();
    let b = cache
        .get_or_create(&corpus(&["one two", "three four"]), &config)
        .unwrap();
    assert!(Arc::ptr_eq(&a, &b));

    let reordered = cache
        .get_or_create(&corpus(&["three four", "one two"]), &config)
        .unwrap();
    assert!(!Arc::ptr_eq(&a, &reordered));
    assert_eq!(cache.fit_count(), 2);
}

#[test]
fn cache_separates_max_df_and_stopwords() {
    let cache = VectorSpaceCache::new();
    let c = corpus(&["the cat sat", "the dog ran", "a bird flew"]);
    let plain = VectorSpaceConfig::new(TokenUnit::Word, 1);
    let pruned = plain.clone().with_max_document_frequency(0.5);
    let filtered = plain
        .clone()
        .with_stopwords(Stopwords::Language(StopwordLanguage::English));

    let m_plain = cache.get_or_create(&c, &plain).unwrap();
    let m_pruned = cache.get_or_create(&c, &pruned).unwrap();
    let m_filtered = cache.get_or_create(&c, &filtered).unwrap();

    assert!(m_plain.contains("the"));
    assert!(!m_pruned.contains("the"));
    assert!(!m_filtered.contains("the"));
    assert_eq!(cache.fit_count(), 3);
}

#[test]
fn cache_is_shared_across_representation_spaces() {
    let cache = Arc::new(VectorSpaceCache::new());
    let config = VectorSpaceConfig::new(TokenUnit::Word, 2);
    let docs = ["the cat sat.", "the dog ran."];

    let first = space_with_cache(&cache, config.clone(), &docs, "the cat ran.");
    let second = space_with_cache(&cache, config, &docs, "the dog sat.");
    first.mean_similarity().unwrap();
    second.mean_similarity().unwrap();

    assert!(Arc::ptr_eq(&first.model().unwrap(), &second.model().unwrap()));
    assert_eq!(cache.fit_count(), 1);
}

// ============================================================
// VectorSpaceModel
// ============================================================

#[test]
fn model_rejects_empty_corpus() {
    let result = VectorSpaceModel::fit(&corpus(&[]), &VectorSpaceConfig::new(TokenUnit::Word, 2));
    assert!(matches!(result, Err(QuillError::EmptyCorpus)));
}

#[test]
fn model_transform_mismatch_is_an_error_not_zero() {
    let model = VectorSpaceModel::fit(
        &corpus(&["the cat sat.", "the dog ran."]),
        &VectorSpaceConfig::new(TokenUnit::Word, 2),
    )
    .unwrap();
    let result = model.transform("a completely different sentence");
    assert!(matches!(result, Err(QuillError::EmptyVocabularyMatch { .. })));
}

#[test]
fn model_character_space_sees_inside_words() {
    let model = VectorSpaceModel::fit(
        &corpus(&["running quickly"]),
        &VectorSpaceConfig::new(TokenUnit::Character, 3),
    )
    .unwrap();
    // Shares "run" and "nin" even though no whole word matches
    assert!(model.transform("gunning").is_ok());
}

// ============================================================
// RepresentationSpace
// ============================================================

#[test]
fn cat_dog_scenario_similarities_are_bounded_and_fit_once() {
    let cache = Arc::new(VectorSpaceCache::new());
    let unknown = "the cat ran.";
    let space = space_with_cache(
        &cache,
        VectorSpaceConfig::new(TokenUnit::Word, 2),
        &["the cat sat.", "the dog ran."],
        unknown,
    );

    let a = space.similarity("the cat sat.", unknown).unwrap();
    let b = space.similarity("the dog ran.", unknown).unwrap();
    for _ in 0..10 {
        space.similarity("the cat sat.", unknown).unwrap();
    }
    space.mean_similarity().unwrap();
    space.outlier_count().unwrap();

    assert!(a.is_finite() && (0.0..=1.0).contains(&a));
    assert!(b.is_finite() && (0.0..=1.0).contains(&b));
    assert_eq!(cache.fit_count(), 1);
}

#[test]
fn mean_similarity_empty_corpus_is_an_error() {
    let cache = Arc::new(VectorSpaceCache::new());
    let space = space_with_cache(&cache, VectorSpaceConfig::new(TokenUnit::Word, 1), &[], "text");
    match space.mean_similarity() {
        Err(QuillError::EmptyCorpus) => {}
        other => panic!("expected EmptyCorpus, got {other:?}"),
    }
}

#[test]
fn mean_similarity_is_average_over_corpus() {
    let cache = Arc::new(VectorSpaceCache::new());
    let docs = ["red green", "red blue", "yellow blue"];
    let unknown = "red green";
    let space = space_with_cache(&cache, VectorSpaceConfig::new(TokenUnit::Word, 1), &docs, unknown);

    let expected: f64 = docs
        .iter()
        .map(|d| space.similarity(d, unknown).unwrap())
        .sum::<f64>()
        / docs.len() as f64;
    assert!((space.mean_similarity().unwrap() - expected).abs() < 1e-12);
}

#[test]
fn outlier_count_single_document_is_zero() {
    let cache = Arc::new(VectorSpaceCache::new());
    for unknown in ["alpha", "alpha beta gamma", "gamma zeta eta theta"] {
        let space = space_with_cache(
            &cache,
            VectorSpaceConfig::new(TokenUnit::Word, 1),
            &["alpha beta gamma"],
            unknown,
        );
        assert_eq!(space.outlier_count().unwrap(), 0, "unknown = {unknown:?}");
    }
}

#[test]
fn outlier_count_ties_do_not_count() {
    let cache = Arc::new(VectorSpaceCache::new());
    // Every pair and the unknown are identical: all similarities are equal
    let space = space_with_cache(
        &cache,
        VectorSpaceConfig::new(TokenUnit::Word, 1),
        &["same words here", "same words here", "same words here"],
        "same words here",
    );
    assert_eq!(space.outlier_count().unwrap(), 0);
}

#[test]
fn statistics_are_memoized() {
    let cache = Arc::new(VectorSpaceCache::new());
    let space = space_with_cache(
        &cache,
        VectorSpaceConfig::new(TokenUnit::Character, 3),
        &["the first text", "the second text"],
        "the third text",
    );
    let first = space.statistics().unwrap();
    let hits_after_first = cache.hit_count();
    let second = space.statistics().unwrap();
    assert_eq!(first, second);
    // The bound model is reused without going back to the cache
    assert_eq!(cache.hit_count(), hits_after_first);
}

#[test]
fn pearson_measure_stays_in_unit_interval() {
    let cache = Arc::new(VectorSpaceCache::new());
    let space = space_with_cache(
        &cache,
        VectorSpaceConfig::new(TokenUnit::Character, 3),
        &["the first text", "the second text"],
        "the third text",
    )
    .with_measure(SimilarityMeasure::Pearson);
    let mean = space.mean_similarity().unwrap();
    assert!((0.0..=1.0).contains(&mean));
    assert_eq!(space.measure(), SimilarityMeasure::Pearson);
}

#[test]
fn pearson_on_single_document_corpus_is_never_nan() {
    const WORDS: [&str; 24] = [
        "alpha", "beta", "gamma", "delta", "epsilon", "zeta", "eta", "theta", "iota", "kappa",
        "lambda", "mu", "nu", "xi", "omicron", "pi", "rho", "sigma", "tau", "upsilon", "phi",
        "chi", "psi", "omega",
    ];
    let cache = Arc::new(VectorSpaceCache::new());
    for k in 2..=WORDS.len() {
        let known = WORDS[..k].join(" ");
        let space = space_with_cache(
            &cache,
            VectorSpaceConfig::new(TokenUnit::Word, 1),
            &[known.as_str()],
            "alpha beta",
        )
        .with_measure(SimilarityMeasure::Pearson);

        let sim = space.similarity(&known, "alpha beta").unwrap();
        let mean = space.mean_similarity().unwrap();
        assert!(sim.is_finite() && (0.0..=1.0).contains(&sim), "k = {k}: {sim}");
        assert!(mean.is_finite() && (0.0..=1.0).contains(&mean), "k = {k}: {mean}");
    }
}
