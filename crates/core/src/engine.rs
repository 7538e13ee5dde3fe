//! Query façade — the single entry point collaborators call.
//!
//! Orchestrates extraction → scoring → escalation, then ranks and truncates.
//! The engine is an explicitly constructed, injected value; `shared()` gives
//! collaborators the lazily built process-wide instance.

use std::cmp::Ordering;
use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::config::TriageCfg;
use crate::extract;
use crate::knowledge::KnowledgeBase;
use crate::reasoning::{escalation, explain, matcher, traversal};
use crate::types::{QueryResult, TraversalResult};

const CLARIFICATION_MESSAGE: &str =
    "Could not identify clear symptoms. Please describe your symptoms more specifically.";

static SHARED: Lazy<Arc<TriageEngine>> = Lazy::new(|| {
    Arc::new(TriageEngine::new(
        Arc::new(KnowledgeBase::standard()),
        TriageCfg::from_env(),
    ))
});

/// Process-wide engine over the standard catalog, built on first access.
/// Read-only after construction, safe to share across concurrent requests.
pub fn shared() -> Arc<TriageEngine> {
    Arc::clone(&SHARED)
}

#[derive(Debug)]
pub struct TriageEngine {
    knowledge: Arc<KnowledgeBase>,
    cfg: TriageCfg,
}

impl TriageEngine {
    pub fn new(knowledge: Arc<KnowledgeBase>, cfg: TriageCfg) -> Self {
        tracing::info!(facts = knowledge.facts().len(), "triage engine initialized");
        Self { knowledge, cfg }
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    /// Analyze free-text symptom input. Total over all inputs: unrecognized
    /// text yields a clarification request, never an error.
    pub fn query(&self, text: &str) -> QueryResult {
        let symptoms = extract::extract(text);
        if symptoms.is_empty() {
            tracing::debug!("no symptoms recognized, requesting clarification");
            return QueryResult::ClarificationNeeded {
                message: CLARIFICATION_MESSAGE.to_string(),
                suggestions: extract::suggestions(),
            };
        }

        let query_trace = format!("(query-symptoms ({}))", symptoms.join(" "));
        tracing::info!(trace = %query_trace, "analyzing symptoms");

        let scored = matcher::score(&symptoms, self.knowledge.facts(), &self.cfg);
        let mut conditions =
            escalation::apply(scored, &symptoms, &self.knowledge.rules().escalation);

        // Stable sort keeps catalog order for equal confidences.
        conditions.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(Ordering::Equal)
        });
        conditions.truncate(self.cfg.max_conditions);

        tracing::info!(candidates = conditions.len(), "query complete");

        QueryResult::Success {
            identified_symptoms: symptoms,
            possible_conditions: conditions,
            query_trace,
        }
    }

    /// Bounded two-hop narrowing over the fact store.
    pub fn traverse(&self, query: &str, depth: usize) -> TraversalResult {
        traversal::traverse(&self.knowledge, query, depth)
    }

    /// Fixed-format reasoning explanation for a named condition.
    pub fn explain(&self, symptoms: &[String], condition: &str) -> String {
        explain::explain(&self.knowledge, symptoms, condition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Urgency;

    fn engine() -> TriageEngine {
        TriageEngine::new(Arc::new(KnowledgeBase::standard()), TriageCfg::default())
    }

    #[test]
    fn flu_symptoms_rank_flu_first() {
        let result = engine().query("fever headache body aches");
        let QueryResult::Success { identified_symptoms, possible_conditions, .. } = &result
        else {
            panic!("expected success");
        };
        assert!(identified_symptoms.contains(&"fever".to_string()));
        assert!(identified_symptoms.contains(&"headache".to_string()));
        assert!(identified_symptoms.contains(&"body_aches".to_string()));
        let top = &possible_conditions[0];
        assert_eq!(top.condition, "flu");
        assert!(top.confidence > 0.4);
    }

    #[test]
    fn vague_input_requests_clarification() {
        let result = engine().query("I don't feel well");
        let QueryResult::ClarificationNeeded { message, suggestions } = result else {
            panic!("expected clarification");
        };
        assert!(!message.is_empty());
        assert_eq!(suggestions, vec!["fever", "cough", "headache", "nausea", "pain"]);
    }

    #[test]
    fn cardiac_combination_escalates_top_condition() {
        let result = engine().query("chest pain shortness of breath sweating");
        let top = result.top_condition().expect("expected a top condition");
        assert!(top.urgency.is_urgent());
        assert!(top.reasoning.contains("Urgency escalated by rule"));
    }

    #[test]
    fn results_are_ranked_and_truncated() {
        let result = engine().query("fever cough headache nausea fatigue pain");
        let QueryResult::Success { possible_conditions, .. } = &result else {
            panic!("expected success");
        };
        assert!(possible_conditions.len() <= 5);
        for pair in possible_conditions.windows(2) {
            assert!(pair[0].confidence >= pair[1].confidence);
        }
    }

    #[test]
    fn query_is_idempotent() {
        let engine = engine();
        let a = engine.query("fever headache body aches");
        let b = engine.query("fever headache body aches");
        assert_eq!(
            serde_json::to_value(&a).unwrap(),
            serde_json::to_value(&b).unwrap()
        );
    }

    #[test]
    fn query_trace_renders_symptom_list() {
        let result = engine().query("fever and a headache");
        let QueryResult::Success { query_trace, .. } = &result else {
            panic!("expected success");
        };
        assert_eq!(query_trace, "(query-symptoms (fever headache))");
    }

    #[test]
    fn traverse_delegates_to_helper() {
        let engine = engine();
        assert_eq!(engine.traverse("show me urgent conditions with fever", 2).hops_executed, 2);
        assert_eq!(engine.traverse("joint pain", 2).hops_executed, 0);
    }

    #[test]
    fn explain_delegates_to_helper() {
        let symptoms: Vec<String> =
            ["fever", "headache", "fatigue"].iter().map(|s| s.to_string()).collect();
        let text = engine().explain(&symptoms, "flu");
        assert!(text.contains("Matched symptoms"));
        let missing = engine().explain(&symptoms, "nonexistent_condition");
        assert!(missing.contains("No reasoning path found"));
    }

    #[test]
    fn shared_engine_is_one_instance() {
        let a = shared();
        let b = shared();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn escalation_only_fires_with_full_combination() {
        // sweating alone matches heart_attack and anxiety, but the cardiac
        // rule needs both chest_pain and shortness_of_breath
        let result = engine().query("sweating a lot");
        let QueryResult::Success { possible_conditions, .. } = &result else {
            panic!("expected success");
        };
        assert!(possible_conditions
            .iter()
            .all(|c| !c.reasoning.contains("escalated")));
    }
}
