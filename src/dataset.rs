// Loader for PAN-style authorship verification collections on local disk.
//
// Layout:
//   <root>/<collection>/contents.json   {"language", "genre", "problems": [..]}
//   <root>/<collection>/truth.json      {"problems": [{"name","genre","language","answer"}]}
//   <root>/<collection>/<problem>/unknown.txt
//   <root>/<collection>/<problem>/*.txt   known documents
//
// Downloading and unpacking archives is out of scope; point this at an
// already-extracted directory.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, info};

use crate::problem::truth::TruthRecord;
use crate::problem::{Problem, ProblemId};

const UNKNOWN_FILE: &str = "unknown.txt";

#[derive(Debug, Deserialize)]
struct Contents {
    language: String,
    genre: String,
    problems: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct Truth {
    problems: Vec<TruthRecord>,
}

/// Problems and truth records read from disk.
#[derive(Debug, Default)]
pub struct Dataset {
    pub problems: Vec<Problem>,
    pub truth: Vec<TruthRecord>,
}

impl Dataset {
    fn extend(&mut self, other: Dataset) {
        self.problems.extend(other.problems);
        self.truth.extend(other.truth);
    }
}

/// Load every collection under `root` (any subdirectory with a contents.json).
/// `root` may itself be a collection.
pub fn load(root: &Path) -> Result<Dataset> {
    if root.join("contents.json").is_file() {
        return load_collection(root);
    }

    let mut dataset = Dataset::default();
    for dir in sorted_entries(root)? {
        if dir.is_dir() && dir.join("contents.json").is_file() {
            dataset.extend(load_collection(&dir)?);
        }
    }
    if dataset.problems.is_empty() {
        anyhow::bail!(
            "No collections found in {}: expected subdirectories with contents.json",
            root.display()
        );
    }
    info!(
        problems = dataset.problems.len(),
        truth = dataset.truth.len(),
        "Loaded dataset"
    );
    Ok(dataset)
}

/// Load one collection directory.
pub fn load_collection(dir: &Path) -> Result<Dataset> {
    let contents_path = dir.join("contents.json");
    let contents: Contents = read_json(&contents_path)?;

    let mut problems = Vec::with_capacity(contents.problems.len());
    for name in &contents.problems {
        let id = ProblemId::new(name, &contents.genre, &contents.language);
        problems.push(load_problem(&dir.join(name), id)?);
    }

    let truth_path = dir.join("truth.json");
    let truth = if truth_path.is_file() {
        read_json::<Truth>(&truth_path)?.problems
    } else {
        debug!(dir = %dir.display(), "No truth.json, problems stay unlabelled");
        Vec::new()
    };

    debug!(
        dir = %dir.display(),
        language = %contents.language,
        genre = %contents.genre,
        problems = problems.len(),
        "Loaded collection"
    );
    Ok(Dataset { problems, truth })
}

/// Read one problem directory: unknown.txt plus every other .txt file.
pub fn load_problem(dir: &Path, id: ProblemId) -> Result<Problem> {
    let unknown_path = dir.join(UNKNOWN_FILE);
    let unknown = fs::read_to_string(&unknown_path)
        .with_context(|| format!("Failed to read {}", unknown_path.display()))?;

    let mut known = Vec::new();
    for path in sorted_entries(dir)? {
        let is_known = path.is_file()
            && path.extension().is_some_and(|ext| ext == "txt")
            && path.file_name().is_some_and(|name| name != UNKNOWN_FILE);
        if is_known {
            known.push(
                fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read {}", path.display()))?,
            );
        }
    }

    Ok(Problem { id, known, unknown })
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Directory entries sorted by name, hidden entries skipped.
fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut entries = Vec::new();
    for entry in
        fs::read_dir(dir).with_context(|| format!("Failed to list {}", dir.display()))?
    {
        let entry = entry?;
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }
        entries.push(entry.path());
    }
    entries.sort();
    Ok(entries)
}
