//! Static medical knowledge: the fact catalog and the reasoning rule tables.
//!
//! Everything here is built once at startup and read-only afterwards, so a
//! shared reference can serve concurrent queries without locking.

use crate::types::{EscalationRule, HopSeedRule, MedicalFact, Urgency};

#[derive(Debug, thiserror::Error)]
pub enum KnowledgeError {
    #[error("duplicate condition in fact catalog: {0}")]
    DuplicateCondition(String),
    #[error("fact {0} has an empty symptom set")]
    EmptySymptoms(String),
    #[error("fact {0} has base confidence {1} outside (0, 1]")]
    ConfidenceOutOfRange(String, f32),
}

/// Reasoning rule tables, parsed into structured records at startup and
/// consulted (never mutated) during scoring.
#[derive(Debug, Clone)]
pub struct ReasoningRules {
    /// Applied in insertion order; a later rule overwrites an earlier one.
    pub escalation: Vec<EscalationRule>,
    pub hop_seeds: Vec<HopSeedRule>,
}

impl ReasoningRules {
    pub fn standard() -> Self {
        Self {
            escalation: vec![
                EscalationRule::new(&["chest_pain", "shortness_of_breath"], Urgency::Emergency),
                EscalationRule::new(&["severe_headache", "sudden_numbness"], Urgency::Emergency),
                EscalationRule::new(&["high_fever", "chest_pain"], Urgency::High),
            ],
            hop_seeds: vec![
                HopSeedRule::new(
                    &["fever", "cough", "fatigue"],
                    &["flu", "covid19", "pneumonia"],
                ),
                HopSeedRule::new(
                    &["chest_pain", "shortness_of_breath"],
                    &["heart_attack", "pneumonia"],
                ),
            ],
        }
    }
}

/// The immutable fact store plus rule tables.
#[derive(Debug)]
pub struct KnowledgeBase {
    facts: Vec<MedicalFact>,
    rules: ReasoningRules,
}

impl KnowledgeBase {
    /// Build and validate a knowledge base. Rejects duplicate condition ids,
    /// empty symptom sets, and out-of-range base confidences.
    pub fn new(facts: Vec<MedicalFact>, rules: ReasoningRules) -> Result<Self, KnowledgeError> {
        for (i, fact) in facts.iter().enumerate() {
            if fact.symptoms.is_empty() {
                return Err(KnowledgeError::EmptySymptoms(fact.condition.clone()));
            }
            if fact.base_confidence <= 0.0 || fact.base_confidence > 1.0 {
                return Err(KnowledgeError::ConfidenceOutOfRange(
                    fact.condition.clone(),
                    fact.base_confidence,
                ));
            }
            if facts[..i].iter().any(|f| f.condition == fact.condition) {
                return Err(KnowledgeError::DuplicateCondition(fact.condition.clone()));
            }
        }
        Ok(Self { facts, rules })
    }

    /// The standard catalog with the standard rule tables.
    pub fn standard() -> Self {
        // standard_catalog is known-valid, so this cannot fail
        Self::new(standard_catalog(), ReasoningRules::standard())
            .unwrap_or_else(|e| panic!("standard catalog invalid: {e}"))
    }

    /// Ordered fact sequence. Ranking ties keep this order.
    pub fn facts(&self) -> &[MedicalFact] {
        &self.facts
    }

    pub fn rules(&self) -> &ReasoningRules {
        &self.rules
    }

    /// Look up a fact by condition id.
    pub fn fact(&self, condition: &str) -> Option<&MedicalFact> {
        self.facts.iter().find(|f| f.condition == condition)
    }

    /// Recommended specialist for a condition, if known.
    pub fn specialist_for(&self, condition: &str) -> Option<&str> {
        self.fact(condition).map(|f| f.specialist.as_str())
    }
}

/// The built-in catalog: 19 conditions across 8 specialties.
pub fn standard_catalog() -> Vec<MedicalFact> {
    use Urgency::*;
    vec![
        // Respiratory
        MedicalFact::new(
            "common_cold",
            &["runny_nose", "sore_throat", "cough", "sneezing"],
            Low,
            "general_practitioner",
            0.85,
        ),
        MedicalFact::new(
            "flu",
            &["fever", "headache", "fatigue", "body_aches", "cough"],
            Moderate,
            "general_practitioner",
            0.80,
        ),
        MedicalFact::new(
            "pneumonia",
            &["high_fever", "chest_pain", "shortness_of_breath", "cough"],
            High,
            "pulmonologist",
            0.75,
        ),
        MedicalFact::new(
            "covid19",
            &["fever", "dry_cough", "fatigue", "loss_of_taste", "shortness_of_breath"],
            High,
            "infectious_disease",
            0.78,
        ),
        // Cardiovascular
        MedicalFact::new(
            "heart_attack",
            &["chest_pain", "shortness_of_breath", "nausea", "sweating"],
            Emergency,
            "cardiologist",
            0.90,
        ),
        MedicalFact::new(
            "hypertension",
            &["headache", "dizziness", "blurred_vision"],
            Moderate,
            "cardiologist",
            0.70,
        ),
        // Neurological
        MedicalFact::new(
            "migraine",
            &["severe_headache", "nausea", "light_sensitivity", "visual_disturbance"],
            Moderate,
            "neurologist",
            0.82,
        ),
        MedicalFact::new(
            "stroke",
            &["sudden_numbness", "confusion", "severe_headache", "vision_problems"],
            Emergency,
            "neurologist",
            0.95,
        ),
        // Gastrointestinal
        MedicalFact::new(
            "gastritis",
            &["stomach_pain", "nausea", "bloating", "indigestion"],
            Moderate,
            "gastroenterologist",
            0.75,
        ),
        MedicalFact::new(
            "food_poisoning",
            &["nausea", "vomiting", "diarrhea", "stomach_cramps"],
            Moderate,
            "general_practitioner",
            0.80,
        ),
        MedicalFact::new(
            "appendicitis",
            &["severe_abdominal_pain", "nausea", "fever", "vomiting"],
            Emergency,
            "surgeon",
            0.85,
        ),
        // Musculoskeletal
        MedicalFact::new(
            "arthritis",
            &["joint_pain", "stiffness", "swelling"],
            Moderate,
            "rheumatologist",
            0.78,
        ),
        MedicalFact::new(
            "muscle_strain",
            &["muscle_pain", "swelling", "limited_mobility"],
            Low,
            "physical_therapist",
            0.82,
        ),
        // Dermatological
        MedicalFact::new(
            "allergic_reaction",
            &["rash", "itching", "swelling", "hives"],
            Moderate,
            "allergist",
            0.80,
        ),
        MedicalFact::new(
            "eczema",
            &["itching", "red_patches", "dry_skin"],
            Low,
            "dermatologist",
            0.75,
        ),
        // Endocrine
        MedicalFact::new(
            "diabetes",
            &["excessive_thirst", "frequent_urination", "fatigue", "blurred_vision"],
            High,
            "endocrinologist",
            0.85,
        ),
        MedicalFact::new(
            "thyroid_disorder",
            &["fatigue", "weight_changes", "mood_swings"],
            Moderate,
            "endocrinologist",
            0.72,
        ),
        // Mental health
        MedicalFact::new(
            "anxiety",
            &["restlessness", "rapid_heartbeat", "sweating", "difficulty_concentrating"],
            Moderate,
            "psychiatrist",
            0.75,
        ),
        MedicalFact::new(
            "depression",
            &["persistent_sadness", "fatigue", "loss_of_interest", "sleep_changes"],
            Moderate,
            "psychiatrist",
            0.78,
        ),
    ]
}
