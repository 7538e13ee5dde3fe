use tokio::sync::mpsc;

use crate::types::AdvisorReply;

/// Output channel sender — the runtime pushes replies here.
pub type OutputSender = mpsc::Sender<AdvisorReply>;
/// Output channel receiver — collaborators render from here.
pub type OutputReceiver = mpsc::Receiver<AdvisorReply>;

/// Create an output channel with the given buffer size.
pub fn channel(buffer: usize) -> (OutputSender, OutputReceiver) {
    mpsc::channel(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn replies_pass_through() {
        let (tx, mut rx) = channel(4);
        tx.send(AdvisorReply::text("hello")).await.unwrap();
        let reply = rx.recv().await.unwrap();
        assert_eq!(reply.content, "hello");
        assert!(reply.appointment_id.is_none());
    }
}
