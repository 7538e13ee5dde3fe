//! triage-core — symptom triage over a static medical knowledge base.
//!
//! The reasoning pipeline is pure and synchronous: free text goes through
//! keyword extraction, overlap scoring against the fact catalog, and an
//! urgency-escalation rule pass, producing a ranked [`types::QueryResult`].
//! Around it sits a thin async collaborator layer (advisor formatting,
//! appointment scheduling, channel runtime) that treats the results as
//! opaque data.

pub mod advisor;
pub mod config;
pub mod engine;
pub mod extract;
pub mod io;
pub mod knowledge;
pub mod reasoning;
pub mod runtime;
pub mod scheduling;
pub mod session;
pub mod types;
