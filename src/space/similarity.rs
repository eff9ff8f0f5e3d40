// Pluggable similarity between two vectors of the same fitted space.
//
// Both measures report on the [0, 1] scale. Cosine over non-negative TF-IDF
// weights already lives there; Pearson correlation is mapped from [-1, 1]
// with (r + 1) / 2.

use serde::{Deserialize, Serialize};

use super::model::SparseVector;

/// Which function compares two document vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimilarityMeasure {
    #[default]
    Cosine,
    Pearson,
}

impl SimilarityMeasure {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "cosine" => Some(Self::Cosine),
            "pearson" | "correlation" => Some(Self::Pearson),
            _ => None,
        }
    }

    pub fn score(&self, a: &SparseVector, b: &SparseVector) -> f64 {
        let raw = match self {
            Self::Cosine => cosine(a, b),
            Self::Pearson => (pearson(a, b) + 1.0) / 2.0,
        };
        raw.clamp(0.0, 1.0)
    }
}

/// Cosine of the angle between two vectors. 0.0 if either is zero.
pub fn cosine(a: &SparseVector, b: &SparseVector) -> f64 {
    let denom = a.norm() * b.norm();
    if denom == 0.0 {
        return 0.0;
    }
    a.dot(b) / denom
}

/// Pearson correlation over all `dimension` coordinates, zeros included.
/// 0.0 when either vector is constant.
pub fn pearson(a: &SparseVector, b: &SparseVector) -> f64 {
    let n = a.dimension.max(b.dimension) as f64;
    if n == 0.0 {
        return 0.0;
    }
    let (sum_a, sum_b) = (a.sum(), b.sum());
    let cov = a.dot(b) - sum_a * sum_b / n;
    // Rounding can push the variance of a constant vector slightly below zero
    let var_a = (a.dot(a) - sum_a * sum_a / n).max(0.0);
    let var_b = (b.dot(b) - sum_b * sum_b / n).max(0.0);
    let denom = (var_a * var_b).sqrt();
    if denom.is_nan() || denom <= f64::EPSILON {
        return 0.0;
    }
    (cov / denom).clamp(-1.0, 1.0)
}
