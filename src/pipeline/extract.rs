// Per-problem feature extraction with failure isolation.

use std::sync::Arc;

use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::{info, warn};

use crate::error::{QuillError, Result};
use crate::problem::truth::TruthTable;
use crate::problem::{Problem, ProblemId};
use crate::space::cache::VectorSpaceCache;
use crate::space::config::VectorSpaceConfig;
use crate::space::corpus::Corpus;
use crate::space::representation::RepresentationSpace;
use crate::space::similarity::SimilarityMeasure;
use crate::style::assembler::{assemble_problem, FeatureVector};

/// Features extracted for one problem.
#[derive(Debug, Clone, Serialize)]
pub struct ProblemFeatures {
    pub problem: ProblemId,
    pub label: Option<bool>,
    pub features: FeatureVector,
}

/// Result of one problem in a batch.
#[derive(Debug)]
pub enum ProblemOutcome {
    Extracted(ProblemFeatures),
    Failed { problem: ProblemId, error: QuillError },
}

impl ProblemOutcome {
    pub fn problem(&self) -> &ProblemId {
        match self {
            Self::Extracted(features) => &features.problem,
            Self::Failed { problem, .. } => problem,
        }
    }

    pub fn features(&self) -> Option<&ProblemFeatures> {
        match self {
            Self::Extracted(features) => Some(features),
            Self::Failed { .. } => None,
        }
    }
}

/// Which representation spaces to compute, and how to compare vectors.
pub struct Extractor {
    configs: Vec<Arc<VectorSpaceConfig>>,
    measure: SimilarityMeasure,
    cache: Arc<VectorSpaceCache>,
    show_progress: bool,
}

impl Extractor {
    pub fn new(configs: Vec<VectorSpaceConfig>, measure: SimilarityMeasure) -> Self {
        Self {
            configs: configs.into_iter().map(Arc::new).collect(),
            measure,
            cache: Arc::new(VectorSpaceCache::new()),
            show_progress: false,
        }
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn cache(&self) -> &VectorSpaceCache {
        &self.cache
    }

    /// Display labels of the configured spaces, in feature order.
    pub fn space_labels(&self) -> Vec<String> {
        self.configs.iter().map(|c| c.to_string()).collect()
    }

    /// One representation space per configured vector space for this problem.
    pub fn build_spaces(&self, problem: &Problem) -> Vec<RepresentationSpace> {
        let corpus = Arc::new(Corpus::new(problem.known.clone()));
        let unknown: Arc<str> = Arc::from(problem.unknown.as_str());
        self.configs
            .iter()
            .map(|config| {
                RepresentationSpace::new(
                    Arc::clone(config),
                    Arc::clone(&self.cache),
                    problem.id.clone(),
                    Arc::clone(&corpus),
                    Arc::clone(&unknown),
                )
                .with_measure(self.measure)
            })
            .collect()
    }

    /// Extract one problem's feature vector. A bad truth answer or any
    /// feature error fails this problem only.
    pub fn extract_one(&self, problem: &Problem, truth: &TruthTable) -> ProblemOutcome {
        match self.features_for(problem, truth) {
            Ok(features) => ProblemOutcome::Extracted(features),
            Err(error) => ProblemOutcome::Failed {
                problem: problem.id.clone(),
                error,
            },
        }
    }

    fn features_for(&self, problem: &Problem, truth: &TruthTable) -> Result<ProblemFeatures> {
        let label = truth.label(&problem.id)?;
        let spaces = self.build_spaces(problem);
        let features = assemble_problem(&problem.unknown, &spaces)?;
        Ok(ProblemFeatures {
            problem: problem.id.clone(),
            label,
            features,
        })
    }

    /// Extract every problem, isolating failures per problem.
    pub fn run(&self, problems: &[Problem], truth: &TruthTable) -> Vec<ProblemOutcome> {
        let pb = if self.show_progress {
            let pb = ProgressBar::new(problems.len() as u64);
            if let Ok(style) = ProgressStyle::default_bar().template("  Problems [{bar:30}] {pos}/{len} ({eta})") {
                pb.set_style(style);
            }
            pb
        } else {
            ProgressBar::hidden()
        };

        let mut outcomes = Vec::with_capacity(problems.len());
        for problem in problems {
            let outcome = self.extract_one(problem, truth);
            if let ProblemOutcome::Failed { problem, error } = &outcome {
                warn!(problem = %problem, error = %error, "Skipping problem");
            }
            outcomes.push(outcome);
            pb.inc(1);
        }
        pb.finish_and_clear();

        let failed = outcomes
            .iter()
            .filter(|o| matches!(o, ProblemOutcome::Failed { .. }))
            .count();
        info!(
            problems = problems.len(),
            failed,
            fits = self.cache.fit_count(),
            "Feature extraction complete"
        );
        outcomes
    }
}
