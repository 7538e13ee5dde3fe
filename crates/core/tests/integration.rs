//! End-to-end tests for the triage pipeline.
//!
//! These exercise the full path: free text → extraction → scoring →
//! escalation → ranking, plus the traversal and explanation helpers, the
//! way external collaborators consume them.

use std::sync::Arc;

use triage_core::config::TriageCfg;
use triage_core::engine::TriageEngine;
use triage_core::io::input;
use triage_core::knowledge::KnowledgeBase;
use triage_core::runtime::Runtime;
use triage_core::types::{QueryResult, Urgency};

fn engine() -> TriageEngine {
    TriageEngine::new(Arc::new(KnowledgeBase::standard()), TriageCfg::default())
}

/// Classic flu presentation: symptoms recognized, flu ranked first with
/// meaningful confidence.
#[test]
fn flu_scenario() {
    let result = engine().query("I have fever, headache, and body aches");

    let QueryResult::Success { identified_symptoms, possible_conditions, query_trace } = &result
    else {
        panic!("expected success, got {result:?}");
    };
    assert!(identified_symptoms.len() >= 2);
    assert!(identified_symptoms.contains(&"fever".to_string()));
    assert!(identified_symptoms.contains(&"headache".to_string()));
    assert!(identified_symptoms.contains(&"body_aches".to_string()));
    assert!(!possible_conditions.is_empty());

    let top = &possible_conditions[0];
    assert_eq!(top.condition, "flu");
    assert!(top.confidence > 0.4);
    assert!(!top.specialist.is_empty());
    assert!(query_trace.starts_with("(query-symptoms"));
}

/// Vague input never errors; it asks for clarification.
#[test]
fn ambiguous_input_requests_clarification() {
    let engine = engine();

    let result = engine.query("I don't feel well");
    assert!(matches!(result, QueryResult::ClarificationNeeded { .. }));

    // Clarified input then succeeds.
    let result = engine.query("I have a fever and a cough");
    assert!(result.is_success());
}

/// Confidence stays inside the documented bounds for partial matches.
#[test]
fn partial_match_confidence_bounds() {
    let result = engine().query("I have a cough");
    let QueryResult::Success { possible_conditions, .. } = &result else {
        panic!("expected success");
    };
    assert!(!possible_conditions.is_empty());
    for cond in possible_conditions {
        assert!(cond.confidence > 0.0);
        assert!(cond.confidence <= 0.95);
        assert!(cond.confidence < 0.9, "single symptom should not be near-certain");
    }
}

/// The cardiac symptom combination forces an urgent top condition.
#[test]
fn emergency_combination_escalates() {
    let result = engine().query("chest pain shortness of breath sweating");
    let top = result.top_condition().expect("expected conditions");
    assert!(
        matches!(top.urgency, Urgency::High | Urgency::Emergency),
        "escalation rule must fire, got {:?}",
        top.urgency
    );
}

/// Ranked output is non-increasing in confidence and capped at five.
#[test]
fn ranking_is_sorted_and_truncated() {
    let result = engine().query("fever cough headache nausea fatigue pain vomit");
    let QueryResult::Success { possible_conditions, .. } = &result else {
        panic!("expected success");
    };
    assert!(possible_conditions.len() <= 5);
    for pair in possible_conditions.windows(2) {
        assert!(pair[0].confidence >= pair[1].confidence);
    }
}

/// Identical queries produce identical results — no hidden state.
#[test]
fn query_is_idempotent() {
    let engine = engine();
    let a = engine.query("fever headache fatigue");
    let b = engine.query("fever headache fatigue");
    assert_eq!(
        serde_json::to_value(&a).unwrap(),
        serde_json::to_value(&b).unwrap()
    );
}

/// Traversal gating: "fever" keyword required, urgency keywords gate hop 2.
#[test]
fn traversal_hop_counts() {
    let engine = engine();
    assert_eq!(
        engine.traverse("show me urgent conditions with fever", 2).hops_executed,
        2
    );
    assert_eq!(engine.traverse("joint pain", 2).hops_executed, 0);

    let plain = engine.traverse("conditions with fever", 2);
    assert_eq!(plain.hops_executed, 1);
    assert!(!plain.final_results.is_empty());
}

/// Explanation covers the documented sections and the unknown-condition
/// sentinel.
#[test]
fn explanation_sections() {
    let engine = engine();
    let symptoms: Vec<String> = ["fever", "headache", "fatigue"]
        .iter()
        .map(|s| s.to_string())
        .collect();

    let text = engine.explain(&symptoms, "flu");
    assert!(text.contains("Matched symptoms"));
    assert!(text.contains("Confidence"));
    assert!(text.contains("Recommended specialist"));
    assert!(text.contains("Urgency level"));

    let missing = engine.explain(&symptoms, "nonexistent_condition");
    assert!(missing.contains("No reasoning path found"));
}

/// Full collaborator round-trip through the async runtime: greeting,
/// analysis, appointment confirmation, session summary.
#[tokio::test]
async fn runtime_round_trip() {
    let engine = Arc::new(engine());
    let cfg = TriageCfg::default();
    let (runtime, tx, mut rx) = Runtime::new(engine, &cfg);
    tokio::spawn(runtime.run());

    let welcome = rx.recv().await.unwrap();
    assert!(welcome.content.contains("advisor"));

    input::submit_text(&tx, "I have fever, headache, and body aches")
        .await
        .unwrap();
    let analysis = rx.recv().await.unwrap();
    assert!(analysis.content.contains("Flu"));
    assert!(analysis.content.contains("General Practitioner"));

    input::submit_text(&tx, "please book an appointment for tomorrow")
        .await
        .unwrap();
    let confirmation = rx.recv().await.unwrap();
    assert!(confirmation.content.contains("Appointment confirmed"));
    assert!(confirmation.appointment_id.is_some());

    drop(tx);
    let summary = rx.recv().await.unwrap();
    assert!(summary.content.contains("Consultation summary"));
    assert!(summary.content.contains("Assessment: flu"));
}

/// An urgent analysis is followed by the deep-analysis message.
#[tokio::test]
async fn runtime_urgent_follow_up() {
    let engine = Arc::new(engine());
    let cfg = TriageCfg::default();
    let (runtime, tx, mut rx) = Runtime::new(engine, &cfg);
    let token = runtime.token();
    tokio::spawn(runtime.run());

    let _welcome = rx.recv().await.unwrap();

    input::submit_text(&tx, "chest pain shortness of breath sweating")
        .await
        .unwrap();
    let analysis = rx.recv().await.unwrap();
    assert!(analysis.content.contains("EMERGENCY ALERT"));
    let follow_up = rx.recv().await.unwrap();
    assert!(follow_up.content.contains("Deep analysis"));

    token.cancel();
}
