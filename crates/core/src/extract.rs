//! Symptom extraction — fixed phrase table, lowercase substring scan.
//!
//! This is a deliberate stand-in for real language understanding: no
//! tokenization, no stemming, and no negation handling ("no fever" still
//! extracts `fever`). The false positives are a documented limitation, kept
//! because downstream behavior depends on the exact matching.

/// Natural-language phrase → canonical symptom token. Checked in order;
/// extraction order follows this table.
const PHRASE_TABLE: &[(&str, &str)] = &[
    ("fever", "fever"),
    ("cough", "cough"),
    ("headache", "headache"),
    ("nausea", "nausea"),
    ("pain", "pain"),
    ("fatigue", "fatigue"),
    ("dizzy", "dizziness"),
    ("chest pain", "chest_pain"),
    ("shortness of breath", "shortness_of_breath"),
    ("vomit", "vomiting"),
    ("sore throat", "sore_throat"),
    ("runny nose", "runny_nose"),
    ("body aches", "body_aches"),
    ("sweating", "sweating"),
];

/// Extract canonical symptom tokens from free text.
///
/// Returns a deduplicated sequence in table order, so it behaves as a set
/// for matching while preserving a stable extraction order for reporting.
/// Empty or unrecognized text yields an empty result — the façade treats
/// that as a clarification request, not as zero candidates.
pub fn extract(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    let mut symptoms = Vec::new();
    for (phrase, token) in PHRASE_TABLE {
        if lower.contains(phrase) && !symptoms.iter().any(|s| s == token) {
            symptoms.push(token.to_string());
        }
    }
    symptoms
}

/// Fixed suggestion list offered when nothing was recognized.
pub fn suggestions() -> Vec<String> {
    ["fever", "cough", "headache", "nausea", "pain"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}
