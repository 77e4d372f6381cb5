//! The `align` and `rules` commands.

use std::path::Path;

use anyhow::{Context, Result, ensure};
use serde_json::{Value, json};
use yoga_align::{AlignmentEngine, DEFAULT_RULES, RuleOutcome};
use yoga_assess::ReplayEstimator;
use yoga_types::AssessmentResponse;

/// Prints each rule's outcome for a landmark dump.
pub fn run(landmarks: &Path, min_visibility: f32) -> Result<()> {
    ensure!(
        (0.0..=1.0).contains(&min_visibility),
        "--min-visibility must be within [0, 1], got {min_visibility}"
    );

    let replay = ReplayEstimator::load(landmarks)
        .with_context(|| format!("reading landmarks from {}", landmarks.display()))?;
    let Some(skeleton) = replay.skeleton() else {
        let response = AssessmentResponse::no_person_detected();
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    };

    let engine = AlignmentEngine::new().with_min_visibility(min_visibility);
    let evaluation = engine.evaluate_detailed(skeleton);

    let rules: Vec<Value> = evaluation.outcomes().iter().map(describe).collect();
    let report = json!({
        "rules": rules,
        "feedback": evaluation.tips(),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Prints the rule table.
pub fn rules(as_json: bool) -> Result<()> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(&DEFAULT_RULES[..])?);
    } else {
        for rule in &DEFAULT_RULES {
            println!("{rule}");
        }
    }
    Ok(())
}

fn describe(outcome: &RuleOutcome) -> Value {
    let rule = outcome.rule();
    match outcome {
        RuleOutcome::Triggered { measurement, .. } => json!({
            "rule": rule.name,
            "status": "triggered",
            "degrees": measurement.degrees,
            "tip": rule.tip,
        }),
        RuleOutcome::Satisfied { measurement, .. } => json!({
            "rule": rule.name,
            "status": "satisfied",
            "degrees": measurement.degrees,
        }),
        RuleOutcome::Skipped { reason, .. } => json!({
            "rule": rule.name,
            "status": "skipped",
            "reason": reason.to_string(),
        }),
    }
}
