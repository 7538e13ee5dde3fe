use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Ordinal severity classification: `Low < Moderate < High < Emergency`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    Moderate,
    High,
    Emergency,
}

impl Urgency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
            Self::Emergency => "emergency",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "low" => Some(Self::Low),
            "moderate" => Some(Self::Moderate),
            "high" => Some(Self::High),
            "emergency" => Some(Self::Emergency),
            _ => None,
        }
    }

    /// True for the two tiers that warrant same-day attention.
    pub fn is_urgent(&self) -> bool {
        matches!(self, Self::High | Self::Emergency)
    }
}

/// A static medical fact: condition, its typical symptom cluster, urgency
/// tier, recommended specialist, and base confidence in `(0, 1]`.
/// Immutable after the knowledge base is built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MedicalFact {
    pub condition: String,
    pub symptoms: Vec<String>,
    pub urgency: Urgency,
    pub specialist: String,
    pub base_confidence: f32,
}

impl MedicalFact {
    pub fn new(
        condition: &str,
        symptoms: &[&str],
        urgency: Urgency,
        specialist: &str,
        base_confidence: f32,
    ) -> Self {
        Self {
            condition: condition.to_string(),
            symptoms: symptoms.iter().map(|s| s.to_string()).collect(),
            urgency,
            specialist: specialist.to_string(),
            base_confidence,
        }
    }
}

/// A scored candidate condition, derived per query and never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConditionMatch {
    pub condition: String,
    pub confidence: f32,
    pub urgency: Urgency,
    pub specialist: String,
    pub matching_symptoms: Vec<String>,
    pub reasoning: String,
}

/// Outcome of a triage query. A tagged type: either a ranked analysis or a
/// request to re-prompt the patient — never an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum QueryResult {
    Success {
        /// Symptom tokens in extraction order.
        identified_symptoms: Vec<String>,
        /// Ranked by confidence descending, at most five entries.
        possible_conditions: Vec<ConditionMatch>,
        /// Human-readable rendering of the normalized query, for logs only.
        query_trace: String,
    },
    ClarificationNeeded {
        message: String,
        suggestions: Vec<String>,
    },
}

impl QueryResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Highest-ranked condition, if any.
    pub fn top_condition(&self) -> Option<&ConditionMatch> {
        match self {
            Self::Success { possible_conditions, .. } => possible_conditions.first(),
            Self::ClarificationNeeded { .. } => None,
        }
    }
}

/// One filtering stage of the bounded traversal helper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HopRecord {
    pub hop: usize,
    pub label: String,
    pub conditions: Vec<String>,
}

/// A condition surviving traversal, stripped to routing fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraversalEntry {
    pub condition: String,
    pub urgency: Urgency,
    pub specialist: String,
}

/// Result of the bounded two-hop narrowing query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraversalResult {
    pub hops: Vec<HopRecord>,
    pub final_results: Vec<TraversalEntry>,
    pub hops_executed: usize,
}

/// Urgency-escalation rule: when every trigger symptom is reported,
/// matches touching the trigger get their urgency overwritten.
#[derive(Debug, Clone)]
pub struct EscalationRule {
    pub trigger: Vec<String>,
    pub forced: Urgency,
}

impl EscalationRule {
    pub fn new(trigger: &[&str], forced: Urgency) -> Self {
        Self {
            trigger: trigger.iter().map(|s| s.to_string()).collect(),
            forced,
        }
    }
}

/// Multi-hop seed rule: a symptom combination suggesting candidate
/// conditions worth a closer look.
#[derive(Debug, Clone)]
pub struct HopSeedRule {
    pub trigger: Vec<String>,
    pub candidates: Vec<String>,
}

impl HopSeedRule {
    pub fn new(trigger: &[&str], candidates: &[&str]) -> Self {
        Self {
            trigger: trigger.iter().map(|s| s.to_string()).collect(),
            candidates: candidates.iter().map(|s| s.to_string()).collect(),
        }
    }
}

// ── Message types for the collaborator layer ───────────────────

/// Raw patient input entering the advisor runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientMessage {
    pub id: Uuid,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl PatientMessage {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Formatted reply leaving the advisor runtime.
#[derive(Debug, Clone)]
pub struct AdvisorReply {
    pub content: String,
    /// Set when the reply confirms a scheduled appointment.
    pub appointment_id: Option<String>,
}

impl AdvisorReply {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            appointment_id: None,
        }
    }
}
