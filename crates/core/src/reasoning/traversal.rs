//! Bounded two-hop narrowing over the fact store.
//!
//! Not graph search: a fixed two-stage filter gated by keyword presence.
//! Hop 1 keeps conditions whose symptom cluster contains `fever`; hop 2
//! (only at depth >= 2 and when the query asks for urgency) keeps the
//! high/emergency subset.

use crate::knowledge::KnowledgeBase;
use crate::types::{HopRecord, MedicalFact, TraversalEntry, TraversalResult};

const HOP1_LABEL: &str = "conditions with fever";
const HOP2_LABEL: &str = "urgent cases only";

/// Run the narrowing query. `hops_executed` is 0, 1, or 2.
pub fn traverse(kb: &KnowledgeBase, query: &str, depth: usize) -> TraversalResult {
    let lower = query.to_lowercase();
    tracing::debug!(query = %query, depth, "traversal requested");

    if !lower.contains("fever") {
        return TraversalResult {
            hops: Vec::new(),
            final_results: Vec::new(),
            hops_executed: 0,
        };
    }

    let mut hops = Vec::new();

    let hop1: Vec<&MedicalFact> = kb
        .facts()
        .iter()
        .filter(|f| f.symptoms.iter().any(|s| s == "fever"))
        .collect();
    hops.push(record(1, HOP1_LABEL, &hop1));

    let finalists: Vec<&MedicalFact> =
        if depth >= 2 && (lower.contains("urgent") || lower.contains("emergency")) {
            let hop2: Vec<&MedicalFact> = hop1
                .into_iter()
                .filter(|f| f.urgency.is_urgent())
                .collect();
            hops.push(record(2, HOP2_LABEL, &hop2));
            hop2
        } else {
            hop1
        };

    TraversalResult {
        hops_executed: hops.len(),
        hops,
        final_results: finalists
            .into_iter()
            .map(|f| TraversalEntry {
                condition: f.condition.clone(),
                urgency: f.urgency,
                specialist: f.specialist.clone(),
            })
            .collect(),
    }
}

fn record(hop: usize, label: &str, facts: &[&MedicalFact]) -> HopRecord {
    HopRecord {
        hop,
        label: label.to_string(),
        conditions: facts.iter().map(|f| f.condition.clone()).collect(),
    }
}
