// Verification problems and their ground truth.
//
// A problem is identified by the (name, genre, language) triple. Truth
// records come from the dataset layer; this module only parses answers and
// looks them up per problem.

pub mod truth;

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of one verification problem.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProblemId {
    pub name: String,
    pub genre: String,
    pub language: String,
}

impl ProblemId {
    pub fn new(name: impl Into<String>, genre: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            genre: genre.into(),
            language: language.into(),
        }
    }
}

impl fmt::Display for ProblemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} / {})", self.name, self.language, self.genre)
    }
}

/// One verification problem: known documents plus the disputed one.
#[derive(Debug, Clone)]
pub struct Problem {
    pub id: ProblemId,
    pub known: Vec<String>,
    pub unknown: String,
}
