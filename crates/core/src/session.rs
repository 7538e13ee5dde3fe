//! Per-conversation consultation log. Process memory only; nothing here
//! survives the session.

use chrono::{DateTime, Utc};

use crate::types::QueryResult;

/// One consultation: what the patient said and what the analysis concluded.
#[derive(Debug, Clone)]
pub struct ConsultationRecord {
    pub timestamp: DateTime<Utc>,
    pub symptoms_text: String,
    pub top_condition: Option<String>,
    pub specialist: Option<String>,
}

/// Rolling log of consultations within one conversation.
#[derive(Debug, Default)]
pub struct SessionLog {
    records: Vec<ConsultationRecord>,
}

impl SessionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, symptoms_text: &str, result: &QueryResult) {
        let top = result.top_condition();
        self.records.push(ConsultationRecord {
            timestamp: Utc::now(),
            symptoms_text: symptoms_text.to_string(),
            top_condition: top.map(|c| c.condition.clone()),
            specialist: top.map(|c| c.specialist.clone()),
        });
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// End-of-session summary of every consultation.
    pub fn summary(&self) -> String {
        if self.records.is_empty() {
            return "No consultation history available.".to_string();
        }

        let mut msg = String::from("Consultation summary\n");
        msg.push_str("========================================\n\n");
        msg.push_str(&format!("Total consultations: {}\n\n", self.records.len()));

        for (i, record) in self.records.iter().enumerate() {
            msg.push_str(&format!("Consultation {}:\n", i + 1));
            msg.push_str(&format!("Time: {}\n", record.timestamp.format("%Y-%m-%d %H:%M:%S UTC")));
            msg.push_str(&format!("Symptoms: {}\n", truncate(&record.symptoms_text, 100)));
            if let Some(condition) = &record.top_condition {
                msg.push_str(&format!("Assessment: {condition}\n"));
            }
            if let Some(specialist) = &record.specialist {
                msg.push_str(&format!("Specialist: {specialist}\n"));
            }
            msg.push('\n');
        }

        msg.push_str("Thank you for using the triage advisor. Take care!");
        msg
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max).collect();
        format!("{cut}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TriageCfg;
    use crate::engine::TriageEngine;
    use crate::knowledge::KnowledgeBase;
    use std::sync::Arc;

    fn engine() -> TriageEngine {
        TriageEngine::new(Arc::new(KnowledgeBase::standard()), TriageCfg::default())
    }

    #[test]
    fn empty_log_has_sentinel_summary() {
        let log = SessionLog::new();
        assert!(log.is_empty());
        assert_eq!(log.summary(), "No consultation history available.");
    }

    #[test]
    fn summary_lists_recorded_consultations() {
        let engine = engine();
        let mut log = SessionLog::new();

        let text = "fever headache body aches";
        let result = engine.query(text);
        log.record(text, &result);

        let vague = "feeling strange";
        let result = engine.query(vague);
        log.record(vague, &result);

        assert_eq!(log.len(), 2);
        let summary = log.summary();
        assert!(summary.contains("Total consultations: 2"));
        assert!(summary.contains("fever headache body aches"));
        assert!(summary.contains("Assessment: flu"));
        // unresolved consultations have no assessment line of their own
        assert_eq!(summary.matches("Assessment:").count(), 1);
    }

    #[test]
    fn long_symptom_text_is_truncated() {
        let mut log = SessionLog::new();
        let long = "fever ".repeat(40);
        let result = engine().query(&long);
        log.record(&long, &result);
        assert!(log.summary().contains("..."));
    }
}
