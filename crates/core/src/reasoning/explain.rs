//! Human-readable explanation of how a condition relates to reported
//! symptoms: what matched, what is typical but unreported, and the routing
//! facts (confidence, specialist, urgency).

use crate::knowledge::KnowledgeBase;

/// Fixed-format multi-line explanation for a named condition. Unknown
/// condition ids yield a sentinel string rather than an error.
pub fn explain(kb: &KnowledgeBase, symptoms: &[String], condition: &str) -> String {
    let normalized: Vec<String> = symptoms
        .iter()
        .map(|s| s.to_lowercase().replace(' ', "_"))
        .collect();

    let Some(fact) = kb.fact(condition) else {
        return format!("No reasoning path found for condition: {condition}");
    };

    let matched: Vec<&str> = fact
        .symptoms
        .iter()
        .filter(|s| normalized.contains(s))
        .map(String::as_str)
        .collect();
    let missing: Vec<&str> = fact
        .symptoms
        .iter()
        .filter(|s| !normalized.contains(s))
        .map(String::as_str)
        .collect();

    let mut out = format!("Reasoning for {condition}:\n");
    out.push_str(&format!("- Matched symptoms: {}\n", matched.join(", ")));
    if !missing.is_empty() {
        out.push_str(&format!(
            "- Typical symptoms not reported: {}\n",
            missing.join(", ")
        ));
    }
    out.push_str(&format!("- Confidence: {}\n", fact.base_confidence));
    out.push_str(&format!("- Recommended specialist: {}\n", fact.specialist));
    out.push_str(&format!("- Urgency level: {}", fact.urgency.as_str()));
    out
}
