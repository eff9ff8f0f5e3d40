// Output formatting — terminal tables and JSON lines.

pub mod terminal;

use std::io::Write;

use anyhow::Result;
use serde::Serialize;

use crate::pipeline::extract::ProblemOutcome;

/// Truncate a string to at most `max_chars` characters, appending "..." if truncated.
///
/// Respects UTF-8 character boundaries, so Greek or accented text never panics.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    let char_count = text.chars().count();
    if char_count <= max_chars {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_chars).collect();
        format!("{truncated}...")
    }
}

#[derive(Serialize)]
struct JsonLine<'a> {
    name: &'a str,
    genre: &'a str,
    language: &'a str,
    label: Option<bool>,
    features: Option<Vec<f64>>,
    error: Option<String>,
}

/// Write one JSON object per problem. Failed problems carry `error` and no
/// features, so downstream consumers can tell skipped rows from real ones.
pub fn write_json_lines<W: Write>(outcomes: &[ProblemOutcome], mut out: W) -> Result<()> {
    for outcome in outcomes {
        let problem = outcome.problem();
        let line = match outcome {
            ProblemOutcome::Extracted(extracted) => JsonLine {
                name: &problem.name,
                genre: &problem.genre,
                language: &problem.language,
                label: extracted.label,
                features: Some(extracted.features.flatten()),
                error: None,
            },
            ProblemOutcome::Failed { error, .. } => JsonLine {
                name: &problem.name,
                genre: &problem.genre,
                language: &problem.language,
                label: None,
                features: None,
                error: Some(error.to_string()),
            },
        };
        serde_json::to_writer(&mut out, &line)?;
        writeln!(out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QuillError;
    use crate::pipeline::extract::ProblemFeatures;
    use crate::problem::ProblemId;
    use crate::style::assembler::FeatureVector;

    #[test]
    fn test_truncate_multibyte() {
        assert_eq!(truncate_chars("καλημέρα", 3), "καλ...");
        assert_eq!(truncate_chars("short", 10), "short");
    }

    #[test]
    fn test_json_lines() {
        let mut features = FeatureVector::new();
        features.push_scalar(1.5);
        let outcomes = vec![
            ProblemOutcome::Extracted(ProblemFeatures {
                problem: ProblemId::new("EN001", "essays", "English"),
                label: Some(true),
                features,
            }),
            ProblemOutcome::Failed {
                problem: ProblemId::new("EN002", "essays", "English"),
                error: QuillError::EmptyCorpus,
            },
        ];
        let mut buf = Vec::new();
        write_json_lines(&outcomes, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<serde_json::Value> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["features"][0], 1.5);
        assert_eq!(lines[0]["label"], true);
        assert!(lines[1]["features"].is_null());
        assert!(lines[1]["error"].as_str().unwrap().contains("corpus is empty"));
    }
}
