//! Urgency-escalation pass over scored matches.
//!
//! Rules fire independently, in table order. A rule fires when every symptom
//! of its trigger was reported; it then overwrites the urgency of every match
//! whose matching symptoms intersect the trigger. Later rules overwrite
//! earlier ones; reasoning annotations accumulate. The pass never adds or
//! removes matches and never touches the fact store.

use crate::types::{ConditionMatch, EscalationRule};

const ESCALATION_NOTE: &str = " | Urgency escalated by rule";

/// Apply escalation rules to scored matches. Returns the adjusted matches.
pub fn apply(
    mut matches: Vec<ConditionMatch>,
    symptoms: &[String],
    rules: &[EscalationRule],
) -> Vec<ConditionMatch> {
    for rule in rules {
        if !rule.trigger.iter().all(|s| symptoms.contains(s)) {
            continue;
        }
        for m in &mut matches {
            if rule.trigger.iter().any(|s| m.matching_symptoms.contains(s)) {
                m.urgency = rule.forced;
                m.reasoning.push_str(ESCALATION_NOTE);
                tracing::debug!(
                    condition = %m.condition,
                    forced = rule.forced.as_str(),
                    "urgency escalated by rule"
                );
            }
        }
    }
    matches
}
