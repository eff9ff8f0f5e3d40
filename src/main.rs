use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use quill::config::{Config, SpaceSet};
use quill::dataset;
use quill::output::{self, terminal};
use quill::pipeline::extract::Extractor;
use quill::problem::truth::TruthTable;
use quill::problem::ProblemId;
use quill::space::cache::VectorSpaceCache;
use quill::space::corpus::Corpus;
use quill::space::representation::RepresentationSpace;
use quill::style::assembler;

/// Quill: features for authorship verification.
///
/// Compares a disputed document against known documents by the same author
/// using n-gram vector spaces and stylometric measurements.
#[derive(Parser)]
#[command(name = "quill", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract feature vectors for every problem in a dataset
    Extract {
        /// Dataset root (defaults to QUILL_DATA_DIR)
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Print JSON lines instead of a table
        #[arg(long)]
        json: bool,

        /// Skip the vector space statistics
        #[arg(long)]
        style_only: bool,
    },

    /// Show the stylometric features of one document
    Style {
        /// Text file to analyze
        file: PathBuf,
    },

    /// Compare an unknown document against known documents
    Compare {
        /// The disputed document
        #[arg(long)]
        unknown: PathBuf,

        /// Known documents by the candidate author
        #[arg(required = true)]
        known: Vec<PathBuf>,
    },
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("quill=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Extract {
            data_dir,
            json,
            style_only,
        } => {
            let data_dir = data_dir.unwrap_or_else(|| config.data_dir.clone());
            let spaces = if style_only {
                SpaceSet::StyleOnly
            } else {
                config.spaces.clone()
            };

            info!(dir = %data_dir.display(), "Loading dataset");
            let loaded = dataset::load(&data_dir)?;
            let truth = TruthTable::from_records(&loaded.truth);

            let configs = spaces.configs();
            let has_spaces = !configs.is_empty();
            let extractor = Extractor::new(configs, config.similarity).with_progress(!json);
            let outcomes = extractor.run(&loaded.problems, &truth);

            if json {
                output::write_json_lines(&outcomes, std::io::stdout().lock())?;
            } else {
                terminal::display_problem_table(&outcomes, has_spaces);
                let columns = assembler::feature_names(&extractor.space_labels());
                println!("  Feature columns: {}", columns.len());
                println!(
                    "  Vector space fits: {} ({} cache hits)",
                    extractor.cache().fit_count(),
                    extractor.cache().hit_count()
                );
            }
        }

        Commands::Style { file } => {
            let text = read_text(&file)?;
            let features = assembler::assemble(&text)
                .with_context(|| format!("Cannot extract features from {}", file.display()))?;
            terminal::display_style(&features);
        }

        Commands::Compare { unknown, known } => {
            let unknown_text = read_text(&unknown)?;
            let corpus: Corpus = known
                .iter()
                .map(|path| read_text(path))
                .collect::<Result<Vec<_>>>()?
                .into_iter()
                .collect();

            let corpus = Arc::new(corpus);
            let unknown_text: Arc<str> = Arc::from(unknown_text);
            let cache = Arc::new(VectorSpaceCache::new());
            let problem = ProblemId::new(
                unknown.display().to_string(),
                "adhoc",
                "unknown",
            );

            let mut rows = Vec::new();
            for space_config in config.spaces.configs() {
                let label = space_config.to_string();
                let space = RepresentationSpace::new(
                    Arc::new(space_config),
                    Arc::clone(&cache),
                    problem.clone(),
                    Arc::clone(&corpus),
                    Arc::clone(&unknown_text),
                )
                .with_measure(config.similarity);
                let stats = space
                    .statistics()
                    .with_context(|| format!("Representation space {label} failed"))?;
                rows.push((label, stats));
            }

            let preview = output::truncate_chars(unknown_text.trim(), 60);
            terminal::display_comparison(&preview, &rows);
        }
    }

    Ok(())
}

fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}
