//! Appointment coordination on top of the triage engine.
//!
//! Detects appointment-style requests, derives specialist and urgency from
//! the engine's analysis, slots a time by urgency tier, and formats the
//! confirmation. Appointments live in process memory only.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::engine::TriageEngine;
use crate::types::{QueryResult, Urgency};

const REQUEST_KEYWORDS: &[&str] = &["appointment", "schedule", "book", "see a doctor"];

/// Banner used instead of a timestamp for emergency cases.
pub const EMERGENCY_SLOT: &str = "IMMEDIATE - Please visit Emergency Room";

/// True when the text reads like an appointment request rather than a plain
/// symptom description.
pub fn is_appointment_request(text: &str) -> bool {
    let lower = text.to_lowercase();
    REQUEST_KEYWORDS.iter().any(|k| lower.contains(k))
}

/// Preferred scheduling window parsed from the request text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferredTime {
    Today,
    Tomorrow,
    NextWeek,
    None,
}

pub fn preferred_time(text: &str) -> PreferredTime {
    let lower = text.to_lowercase();
    if lower.contains("today") {
        PreferredTime::Today
    } else if lower.contains("tomorrow") {
        PreferredTime::Tomorrow
    } else if lower.contains("next week") {
        PreferredTime::NextWeek
    } else {
        PreferredTime::None
    }
}

/// A confirmed appointment payload, serializable for web collaborators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: String,
    pub patient: String,
    pub symptoms: Vec<String>,
    pub recommended_specialist: String,
    pub urgency: Urgency,
    pub conditions: Vec<String>,
    pub scheduled_time: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Build an appointment from patient text by consulting the engine.
/// When the analysis cannot name a condition, falls back to a general
/// practitioner at moderate urgency.
pub fn schedule(engine: &TriageEngine, patient: &str, text: &str) -> Appointment {
    let preferred = preferred_time(text);
    let result = engine.query(text);

    let (symptoms, specialist, urgency, conditions) = match &result {
        QueryResult::Success { identified_symptoms, possible_conditions, .. }
            if !possible_conditions.is_empty() =>
        {
            let top = &possible_conditions[0];
            (
                identified_symptoms.clone(),
                top.specialist.clone(),
                top.urgency,
                possible_conditions
                    .iter()
                    .take(3)
                    .map(|c| c.condition.clone())
                    .collect(),
            )
        }
        _ => (
            Vec::new(),
            "general_practitioner".to_string(),
            Urgency::Moderate,
            vec!["general_consultation".to_string()],
        ),
    };

    let now = Utc::now();
    let appointment = Appointment {
        id: Uuid::new_v4().to_string()[..8].to_string(),
        patient: patient.to_string(),
        symptoms,
        recommended_specialist: specialist,
        urgency,
        conditions,
        scheduled_time: slot_time(preferred, urgency, now),
        status: "confirmed".to_string(),
        created_at: now,
    };
    tracing::info!(
        id = %appointment.id,
        specialist = %appointment.recommended_specialist,
        urgency = appointment.urgency.as_str(),
        "appointment created"
    );
    appointment
}

/// Slot an appointment time by urgency tier, adjusted by preference where
/// the tier allows it.
pub fn slot_time(preferred: PreferredTime, urgency: Urgency, now: DateTime<Utc>) -> String {
    match urgency {
        Urgency::Emergency => EMERGENCY_SLOT.to_string(),
        Urgency::High => (now + Duration::hours(4)).format("%Y-%m-%d %H:%M UTC").to_string(),
        Urgency::Moderate => match preferred {
            PreferredTime::Today => {
                (now + Duration::hours(8)).format("%Y-%m-%d %H:%M UTC").to_string()
            }
            PreferredTime::Tomorrow => {
                (now + Duration::days(1)).format("%Y-%m-%d 09:00 UTC").to_string()
            }
            _ => (now + Duration::days(2)).format("%Y-%m-%d 10:00 UTC").to_string(),
        },
        Urgency::Low => match preferred {
            PreferredTime::NextWeek => {
                (now + Duration::days(7)).format("%Y-%m-%d 10:00 UTC").to_string()
            }
            _ => (now + Duration::days(3)).format("%Y-%m-%d 14:00 UTC").to_string(),
        },
    }
}

/// Confirmation text sent back to the patient.
pub fn format_confirmation(appointment: &Appointment) -> String {
    let mut msg = String::from("Appointment confirmed!\n\n");
    msg.push_str(&format!("Appointment ID: {}\n", appointment.id));
    msg.push_str(&format!("Scheduled: {}\n", appointment.scheduled_time));
    msg.push_str(&format!(
        "Specialist: {}\n",
        appointment.recommended_specialist
    ));
    msg.push_str(&format!(
        "Urgency: {}\n\n",
        appointment.urgency.as_str().to_uppercase()
    ));

    if !appointment.conditions.is_empty() {
        msg.push_str(&format!(
            "Possible conditions: {}\n\n",
            appointment.conditions.join(", ")
        ));
    }

    if appointment.urgency == Urgency::Emergency {
        msg.push_str("URGENT: Please seek immediate medical attention!\n\n");
    }

    msg.push_str("You will receive a confirmation call or email shortly.\n");
    msg.push_str("Reply 'status' anytime to check your appointment.");
    msg
}

/// In-memory appointment log for status inquiries.
#[derive(Debug, Default)]
pub struct AppointmentBook {
    appointments: HashMap<String, Appointment>,
}

impl AppointmentBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, appointment: Appointment) {
        self.appointments.insert(appointment.id.clone(), appointment);
    }

    pub fn get(&self, id: &str) -> Option<&Appointment> {
        self.appointments.get(id)
    }

    pub fn for_patient(&self, patient: &str) -> Vec<&Appointment> {
        let mut found: Vec<&Appointment> = self
            .appointments
            .values()
            .filter(|a| a.patient == patient)
            .collect();
        found.sort_by_key(|a| a.created_at);
        found
    }

    pub fn is_empty(&self) -> bool {
        self.appointments.is_empty()
    }
}
