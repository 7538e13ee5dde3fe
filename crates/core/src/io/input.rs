use tokio::sync::mpsc;

use crate::types::PatientMessage;

/// Input channel sender — collaborators push patient text here.
pub type InputSender = mpsc::Sender<PatientMessage>;
/// Input channel receiver — the runtime consumes from here.
pub type InputReceiver = mpsc::Receiver<PatientMessage>;

/// Create an input channel with the given buffer size.
pub fn channel(buffer: usize) -> (InputSender, InputReceiver) {
    mpsc::channel(buffer)
}

/// Submit patient text as a message into the runtime.
pub async fn submit_text(
    tx: &InputSender,
    text: impl Into<String>,
) -> Result<(), mpsc::error::SendError<PatientMessage>> {
    tx.send(PatientMessage::new(text)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn submit_text_wraps_message() {
        let (tx, mut rx) = channel(4);
        submit_text(&tx, "I have a fever").await.unwrap();
        let msg = rx.recv().await.unwrap();
        assert_eq!(msg.text, "I have a fever");
    }
}
