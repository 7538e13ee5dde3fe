//! Conversational formatting of triage results.
//!
//! Pure text building over opaque `QueryResult`/`TraversalResult` values; the
//! runtime sends whatever this module returns. Urgent top conditions get a
//! second, deep-analysis message driven by the traversal helper.

use crate::engine::TriageEngine;
use crate::types::{AdvisorReply, ConditionMatch, QueryResult};

const DIVIDER: &str = "========================================";

/// Session greeting.
pub fn welcome() -> String {
    "Hello! I'm the medical triage advisor.\n\n\
     Describe your symptoms in detail and I'll help you understand possible \
     conditions and recommend an appropriate specialist.\n\n\
     Note: I provide guidance only. For emergencies, call emergency services \
     immediately."
        .to_string()
}

/// Analyze patient text and produce one or two replies: the analysis itself,
/// plus a deep-analysis follow-up when the top condition is urgent.
pub fn analyze(engine: &TriageEngine, text: &str) -> Vec<AdvisorReply> {
    let result = engine.query(text);
    format_result(engine, &result)
}

/// Format an already-computed query result. The engine is still consulted
/// for the urgent-case traversal follow-up.
pub fn format_result(engine: &TriageEngine, result: &QueryResult) -> Vec<AdvisorReply> {
    match result {
        QueryResult::ClarificationNeeded { message, suggestions } => {
            vec![AdvisorReply::text(format_clarification(message, suggestions))]
        }
        QueryResult::Success { identified_symptoms, possible_conditions, query_trace } => {
            if possible_conditions.is_empty() {
                return vec![AdvisorReply::text(
                    "I've analyzed your symptoms, but couldn't identify specific \
                     conditions. I recommend scheduling an appointment with a general \
                     practitioner for a comprehensive evaluation.",
                )];
            }

            let mut replies = vec![AdvisorReply::text(format_analysis(
                identified_symptoms,
                possible_conditions,
                query_trace,
            ))];

            let top = &possible_conditions[0];
            if top.urgency.is_urgent() {
                let probe: Vec<&str> = identified_symptoms
                    .iter()
                    .take(2)
                    .map(String::as_str)
                    .collect();
                let traversal = engine.traverse(
                    &format!("show me urgent conditions with {}", probe.join(" ")),
                    2,
                );
                replies.push(AdvisorReply::text(format!(
                    "Deep analysis: performed {} reasoning hops over the knowledge \
                     base.\n\nGiven the urgency, I recommend immediate medical attention.",
                    traversal.hops_executed
                )));
            }

            replies
        }
    }
}

fn format_clarification(message: &str, suggestions: &[String]) -> String {
    format!(
        "{message}\n\n\
         To provide accurate analysis, please mention specific symptoms like:\n\
         {}\n\n\
         Example: 'I have fever, cough, and fatigue'",
        suggestions.join(", ")
    )
}

/// The main analysis report: top condition, urgency advice, alternatives,
/// reasoning, and next steps.
pub fn format_analysis(
    symptoms: &[String],
    conditions: &[ConditionMatch],
    query_trace: &str,
) -> String {
    let top = &conditions[0];

    let mut msg = String::new();
    msg.push_str("Medical Analysis Results\n");
    msg.push_str(DIVIDER);
    msg.push_str("\n\n");

    msg.push_str(&format!("Identified symptoms: {}\n", symptoms.join(", ")));
    msg.push_str(&format!("Query: {query_trace}\n\n"));

    msg.push_str("Most likely condition:\n");
    msg.push_str(&format!("- {}\n", display_name(&top.condition)));
    msg.push_str(&format!("- Confidence: {:.0}%\n", top.confidence * 100.0));
    msg.push_str(&format!("- Urgency: {}\n", top.urgency.as_str().to_uppercase()));
    msg.push_str(&format!(
        "- Recommended specialist: {}\n",
        display_name(&top.specialist)
    ));
    msg.push_str(&format!(
        "- Matched symptoms: {}\n\n",
        top.matching_symptoms.join(", ")
    ));

    msg.push_str(urgency_advice(top));
    msg.push('\n');

    if conditions.len() > 1 {
        msg.push_str("Alternative possibilities:\n");
        for (i, cond) in conditions[1..].iter().take(3).enumerate() {
            msg.push_str(&format!(
                "{}. {} ({:.0}% confidence)\n",
                i + 2,
                display_name(&cond.condition),
                cond.confidence * 100.0
            ));
        }
        msg.push('\n');
    }

    msg.push_str(&format!("Reasoning: {}\n\n", top.reasoning));

    msg.push_str("Recommended next steps:\n");
    msg.push_str(&format!(
        "1. Schedule an appointment with: {}\n",
        display_name(&top.specialist)
    ));
    msg.push_str("2. Monitor your symptoms\n");
    msg.push_str("3. Note any changes or new symptoms\n");
    if !top.urgency.is_urgent() {
        msg.push_str("4. Rest and stay hydrated\n");
    }

    msg
}

fn urgency_advice(top: &ConditionMatch) -> &'static str {
    use crate::types::Urgency::*;
    match top.urgency {
        Emergency => {
            "EMERGENCY ALERT\n\
             This appears to be a medical emergency.\n\
             Please call emergency services or go to the nearest ER immediately.\n"
        }
        High => {
            "HIGH PRIORITY\n\
             Please seek medical attention within the next few hours.\n"
        }
        Moderate => {
            "MODERATE PRIORITY\n\
             Schedule an appointment with the recommended specialist soon.\n"
        }
        Low => {
            "ROUTINE CARE\n\
             Schedule an appointment at your convenience.\n"
        }
    }
}

/// `heart_attack` → `Heart Attack`.
fn display_name(id: &str) -> String {
    id.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
