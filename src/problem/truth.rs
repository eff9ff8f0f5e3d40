// Ground-truth answers and label lookup.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::ProblemId;
use crate::error::{QuillError, Result};

/// One row of a truth file: `{"name", "genre", "language", "answer"}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TruthRecord {
    pub name: String,
    pub genre: String,
    pub language: String,
    pub answer: String,
}

impl TruthRecord {
    pub fn problem(&self) -> ProblemId {
        ProblemId::new(&self.name, &self.genre, &self.language)
    }

    pub fn label(&self) -> Result<bool> {
        parse_answer(&self.name, &self.answer)
    }
}

/// "Y" means same author, "N" means different author. Anything else is an error.
pub fn parse_answer(problem: &str, answer: &str) -> Result<bool> {
    match answer.trim() {
        "Y" => Ok(true),
        "N" => Ok(false),
        other => Err(QuillError::InvalidLabel {
            problem: problem.to_string(),
            answer: other.to_string(),
        }),
    }
}

/// Truth answers keyed by problem identity.
///
/// Answers are parsed on lookup, so a malformed answer only fails the problem
/// it belongs to. A later record for the same problem replaces an earlier one.
#[derive(Debug, Default, Clone)]
pub struct TruthTable {
    answers: HashMap<ProblemId, String>,
}

impl TruthTable {
    pub fn from_records(records: &[TruthRecord]) -> Self {
        let answers: HashMap<ProblemId, String> = records
            .iter()
            .map(|record| (record.problem(), record.answer.clone()))
            .collect();
        debug!(records = records.len(), problems = answers.len(), "Loaded truth table");
        Self { answers }
    }

    /// Label of a problem: `Ok(None)` when there is no record for it,
    /// `InvalidLabel` when its answer is neither Y nor N.
    pub fn label(&self, problem: &ProblemId) -> Result<Option<bool>> {
        self.answers
            .get(problem)
            .map(|answer| parse_answer(&problem.name, answer))
            .transpose()
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
}
