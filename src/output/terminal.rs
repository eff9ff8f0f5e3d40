// Colored terminal output for feature tables and comparisons.

use colored::Colorize;

use crate::pipeline::extract::ProblemOutcome;
use crate::space::representation::SpaceStatistics;
use crate::style::assembler::{FeatureVector, StyleFeature};

/// Display one row per problem with the stylometric block and, when spaces
/// were computed, the total outlier count.
pub fn display_problem_table(outcomes: &[ProblemOutcome], has_spaces: bool) {
    if outcomes.is_empty() {
        println!("No problems found.");
        return;
    }

    println!(
        "\n{}",
        format!("=== Features ({} problems) ===", outcomes.len()).bold()
    );
    println!();

    println!(
        "  {:<10} {:<8} {:<6} {:>7} {:>7} {:>6} {:>6} {:>8}",
        "Problem".dimmed(),
        "Lang".dimmed(),
        "Label".dimmed(),
        "SentAvg".dimmed(),
        "SentSD".dimmed(),
        "Div".dimmed(),
        "Comma".dimmed(),
        "Outliers".dimmed(),
    );
    println!("  {}", "-".repeat(66).dimmed());

    let mut failed = 0;
    for outcome in outcomes {
        let problem = outcome.problem();
        match outcome {
            ProblemOutcome::Extracted(extracted) => {
                let f = &extracted.features;
                let label = match extracted.label {
                    Some(true) => "Y".green(),
                    Some(false) => "N".red(),
                    None => "?".dimmed(),
                };
                let outliers = if has_spaces {
                    f.flatten()
                        .last()
                        .map(|v| format!("{v:.0}"))
                        .unwrap_or_default()
                } else {
                    "-".to_string()
                };
                println!(
                    "  {:<10} {:<8} {:<6} {:>7.2} {:>7.2} {:>6.3} {:>6.2} {:>8}",
                    problem.name,
                    problem.language,
                    label,
                    value(f, StyleFeature::MeanSentenceLength),
                    value(f, StyleFeature::SentenceLengthStddev),
                    value(f, StyleFeature::VocabularyDiversity),
                    value(f, StyleFeature::CommaRate),
                    outliers,
                );
            }
            ProblemOutcome::Failed { error, .. } => {
                failed += 1;
                println!(
                    "  {:<10} {:<8} {}",
                    problem.name,
                    problem.language,
                    super::truncate_chars(&error.to_string(), 60).red()
                );
            }
        }
    }
    println!();

    if failed > 0 {
        println!("  {} {} problems skipped", "!".bright_red(), failed);
    }
}

/// Display the stylometric block of a single document.
pub fn display_style(features: &FeatureVector) {
    println!("\n{}", "=== Stylometric Features ===".bold());
    println!();
    for feature in StyleFeature::ALL {
        println!(
            "  {:>2}. {:<22} {:.4}",
            feature.offset(),
            feature.name(),
            value(features, feature)
        );
    }
    println!();
}

/// Display per-space similarity statistics for an unknown text.
pub fn display_comparison(unknown_preview: &str, rows: &[(String, SpaceStatistics)]) {
    println!("\n{}", "=== Representation Spaces ===".bold());
    println!("  Unknown: {}", unknown_preview.dimmed());
    println!();
    println!(
        "  {:<24} {:>8} {:>8}",
        "Space".dimmed(),
        "Mean".dimmed(),
        "Outliers".dimmed()
    );

    let mut total = 0;
    for (label, stats) in rows {
        total += stats.outlier_count;
        let mean = format!("{:.4}", stats.mean_similarity);
        let colored_mean = if stats.mean_similarity >= 0.5 {
            mean.bright_green()
        } else if stats.mean_similarity >= 0.2 {
            mean.bright_yellow()
        } else {
            mean.bright_blue()
        };
        println!("  {:<24} {:>8} {:>8}", label, colored_mean, stats.outlier_count);
    }
    println!();
    println!("  Total outlier count: {}", total.to_string().bold());
}

fn value(features: &FeatureVector, feature: StyleFeature) -> f64 {
    features.get(feature).unwrap_or(f64::NAN)
}
