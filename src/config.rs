use std::env;
use std::path::PathBuf;

use anyhow::Result;

use crate::space::config::VectorSpaceConfig;
use crate::space::similarity::SimilarityMeasure;

/// Which representation spaces feed the problem feature vectors.
#[derive(Debug, Clone, PartialEq)]
pub enum SpaceSet {
    /// The seven char / char_wb / word spaces of the reference experiment (default)
    Paper,
    /// Stylometric features only, no vector space models are fit
    StyleOnly,
}

impl SpaceSet {
    pub fn configs(&self) -> Vec<VectorSpaceConfig> {
        match self {
            Self::Paper => VectorSpaceConfig::default_spaces(),
            Self::StyleOnly => Vec::new(),
        }
    }
}

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded at startup via dotenvy. CLI flags override
/// anything set here.
pub struct Config {
    /// Root of an extracted PAN-style dataset (QUILL_DATA_DIR)
    pub data_dir: PathBuf,
    /// Similarity measure between document vectors (QUILL_SIMILARITY)
    pub similarity: SimilarityMeasure,
    /// Representation spaces to compute (QUILL_SPACES)
    pub spaces: SpaceSet,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Unset variables fall back to defaults; set-but-unrecognized values
    /// are errors rather than silently ignored.
    pub fn load() -> Result<Self> {
        let similarity = match env::var("QUILL_SIMILARITY") {
            Ok(name) => SimilarityMeasure::from_name(&name).ok_or_else(|| {
                anyhow::anyhow!("QUILL_SIMILARITY must be `cosine` or `pearson`, got `{name}`")
            })?,
            Err(_) => SimilarityMeasure::Cosine,
        };

        let spaces = match env::var("QUILL_SPACES").as_deref() {
            Ok("style-only") => SpaceSet::StyleOnly,
            Ok("paper") | Err(_) => SpaceSet::Paper,
            Ok(other) => {
                anyhow::bail!("QUILL_SPACES must be `paper` or `style-only`, got `{other}`")
            }
        };

        Ok(Self {
            data_dir: env::var("QUILL_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./data/pan14")),
            similarity,
            spaces,
        })
    }

    /// Check that the dataset directory exists before a batch run.
    pub fn require_data_dir(&self) -> Result<()> {
        if !self.data_dir.is_dir() {
            anyhow::bail!(
                "Dataset directory not found: {}\n\
                 Set QUILL_DATA_DIR or pass --data-dir pointing at an extracted corpus.",
                self.data_dir.display()
            );
        }
        Ok(())
    }
}
