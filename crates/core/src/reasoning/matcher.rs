//! Overlap scoring of extracted symptoms against the fact catalog.
//!
//! The match ratio is the fraction of the *fact's* symptom cluster that the
//! patient reported, not the fraction of reported symptoms explained. The
//! asymmetry is intentional: a condition with a long symptom list is harder
//! to fully match, and partial hits on it score lower.

use crate::config::TriageCfg;
use crate::types::{ConditionMatch, MedicalFact};

/// Score every fact against the extracted symptom set. Facts with no
/// overlap contribute nothing. Output is unordered; the façade sorts it.
pub fn score(symptoms: &[String], facts: &[MedicalFact], cfg: &TriageCfg) -> Vec<ConditionMatch> {
    let mut matches = Vec::new();

    for fact in facts {
        let matching: Vec<String> = fact
            .symptoms
            .iter()
            .filter(|s| symptoms.contains(s))
            .cloned()
            .collect();
        if matching.is_empty() {
            continue;
        }

        let match_ratio = matching.len() as f32 / fact.symptoms.len() as f32;
        let mut confidence = fact.base_confidence * match_ratio;

        // Strong cluster coverage earns a capped boost.
        if match_ratio > cfg.boost_threshold {
            confidence = (confidence * cfg.boost_factor).min(cfg.confidence_cap);
        }

        matches.push(ConditionMatch {
            condition: fact.condition.clone(),
            confidence,
            urgency: fact.urgency,
            specialist: fact.specialist.clone(),
            reasoning: format!(
                "Matched {}/{} symptoms",
                matching.len(),
                fact.symptoms.len()
            ),
            matching_symptoms: matching,
        });
    }

    matches
}
