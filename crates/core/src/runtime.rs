//! Advisor runtime — single-consumer select loop between patient input and
//! cancellation. Dispatches each message to the scheduling path or the
//! analysis path and streams formatted replies back out.
//!
//! The engine itself stays synchronous; concurrency lives entirely in this
//! channel layer.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::advisor;
use crate::config::TriageCfg;
use crate::engine::TriageEngine;
use crate::io::input::{self, InputReceiver, InputSender};
use crate::io::output::{self, OutputReceiver, OutputSender};
use crate::scheduling::{self, AppointmentBook};
use crate::session::SessionLog;
use crate::types::{AdvisorReply, PatientMessage};

/// Patient id for a single-conversation runtime.
const LOCAL_PATIENT: &str = "local";

pub struct Runtime {
    engine: Arc<TriageEngine>,
    input_rx: InputReceiver,
    output_tx: OutputSender,
    token: CancellationToken,
    session: SessionLog,
    book: AppointmentBook,
}

impl Runtime {
    /// Build a runtime plus the channel endpoints collaborators use.
    pub fn new(engine: Arc<TriageEngine>, cfg: &TriageCfg) -> (Self, InputSender, OutputReceiver) {
        let (input_tx, input_rx) = input::channel(cfg.input_buffer);
        let (output_tx, output_rx) = output::channel(cfg.output_buffer);
        let runtime = Self {
            engine,
            input_rx,
            output_tx,
            token: CancellationToken::new(),
            session: SessionLog::new(),
            book: AppointmentBook::new(),
        };
        (runtime, input_tx, output_rx)
    }

    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Run until cancelled or the input channel closes. Ends the session
    /// with a consultation summary when anything was discussed.
    pub async fn run(mut self) {
        let _ = self.output_tx.send(AdvisorReply::text(advisor::welcome())).await;

        loop {
            tokio::select! {
                _ = self.token.cancelled() => {
                    tracing::info!("runtime cancelled");
                    break;
                }
                msg = self.input_rx.recv() => {
                    let Some(msg) = msg else {
                        tracing::info!("input channel closed");
                        break;
                    };
                    if self.handle(msg).await.is_err() {
                        // output side went away, nothing left to do
                        break;
                    }
                }
            }
        }

        if !self.session.is_empty() {
            let _ = self.output_tx.send(AdvisorReply::text(self.session.summary())).await;
        }
    }

    async fn handle(&mut self, msg: PatientMessage) -> Result<(), ()> {
        tracing::info!(id = %msg.id, "patient message received");
        let text = msg.text.trim();

        if text.eq_ignore_ascii_case("status") {
            return self.send(AdvisorReply::text(self.status_report())).await;
        }

        if scheduling::is_appointment_request(text) {
            let appointment = scheduling::schedule(&self.engine, LOCAL_PATIENT, text);
            let reply = AdvisorReply {
                content: scheduling::format_confirmation(&appointment),
                appointment_id: Some(appointment.id.clone()),
            };
            self.book.insert(appointment);
            return self.send(reply).await;
        }

        let result = self.engine.query(text);
        self.session.record(text, &result);
        for reply in advisor::format_result(&self.engine, &result) {
            self.send(reply).await?;
        }
        Ok(())
    }

    async fn send(&self, reply: AdvisorReply) -> Result<(), ()> {
        self.output_tx.send(reply).await.map_err(|_| ())
    }

    fn status_report(&self) -> String {
        let appointments = self.book.for_patient(LOCAL_PATIENT);
        if appointments.is_empty() {
            return "You have no scheduled appointments.".to_string();
        }
        let mut msg = String::from("Your appointments:\n");
        for apt in appointments {
            msg.push_str(&format!(
                "- {} with {} at {} ({})\n",
                apt.id,
                apt.recommended_specialist,
                apt.scheduled_time,
                apt.urgency.as_str()
            ));
        }
        msg
    }
}
