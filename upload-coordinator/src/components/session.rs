use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;

use crate::coordinator::{UploadCoordinator, UploadOutcome};
use crate::error::SessionError;
use crate::notify::{NotificationSink, Severity};

/// A message posted by the embedded editor. Only messages carrying a
/// modified PDF trigger a save.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EditorMessage {
    #[serde(default)]
    pub modified_pdf: Option<String>,
}

impl EditorMessage {
    pub fn modified_pdf(text: impl Into<String>) -> Self {
        Self {
            modified_pdf: Some(text.into()),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SaveStatus {
    #[default]
    Idle,
    InProgress,
    Success,
    Failure,
}

struct Envelope {
    message: EditorMessage,
    reply: Option<oneshot::Sender<Option<UploadOutcome>>>,
}

/// Sender half handed to whatever relays editor messages.
#[derive(Clone)]
pub struct EditorNotifier {
    sender: mpsc::Sender<Envelope>,
}

impl EditorNotifier {
    /// Queues a message without waiting for its upload.
    pub async fn post(&self, message: EditorMessage) -> Result<(), SessionError> {
        self.sender
            .send(Envelope { message, reply: None })
            .await
            .map_err(|_| SessionError::Closed)
    }
}

/// Per-editor listener turning modified-PDF messages into uploads.
///
/// Messages are uploaded one at a time in arrival order. The listener lives
/// until [`SaveSession::dispose`] is called or the session is dropped.
pub struct SaveSession {
    sender: mpsc::Sender<Envelope>,
    status: watch::Receiver<SaveStatus>,
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl SaveSession {
    pub fn spawn(
        coordinator: Arc<UploadCoordinator>,
        sink: Arc<dyn NotificationSink>,
        capacity: usize,
    ) -> Self {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        let (status_tx, status) = watch::channel(SaveStatus::Idle);
        let (shutdown, shutdown_rx) = oneshot::channel();

        let task = tokio::spawn(listen(coordinator, sink, receiver, status_tx, shutdown_rx));

        Self {
            sender,
            status,
            shutdown: Some(shutdown),
            task: Some(task),
        }
    }

    /// Sends a message and waits for its upload. Returns `None` when the
    /// message carried no PDF.
    pub async fn submit(&self, message: EditorMessage) -> Result<Option<UploadOutcome>, SessionError> {
        let (reply, outcome) = oneshot::channel();
        self.sender
            .send(Envelope {
                message,
                reply: Some(reply),
            })
            .await
            .map_err(|_| SessionError::Closed)?;
        outcome.await.map_err(|_| SessionError::Closed)
    }

    pub fn notifier(&self) -> EditorNotifier {
        EditorNotifier {
            sender: self.sender.clone(),
        }
    }

    pub fn status(&self) -> SaveStatus {
        *self.status.borrow()
    }

    /// Stops listening. An upload already running completes first; queued
    /// messages are dropped.
    pub async fn dispose(mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Some(task) = self.task.take() {
            if let Err(err) = task.await {
                tracing::warn!("save session task ended abnormally: {}", err);
            }
        }
    }
}

impl Drop for SaveSession {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

async fn listen(
    coordinator: Arc<UploadCoordinator>,
    sink: Arc<dyn NotificationSink>,
    mut receiver: mpsc::Receiver<Envelope>,
    status: watch::Sender<SaveStatus>,
    mut shutdown: oneshot::Receiver<()>,
) {
    loop {
        let envelope = tokio::select! {
            biased;
            _ = &mut shutdown => break,
            envelope = receiver.recv() => match envelope {
                Some(envelope) => envelope,
                None => break,
            },
        };

        let outcome = match envelope.message.modified_pdf {
            Some(text) => {
                sink.log(Severity::Info, "Modified PDF received !");
                status.send_replace(SaveStatus::InProgress);
                let outcome = coordinator.upload_text(text).await;
                status.send_replace(if outcome.is_success() {
                    SaveStatus::Success
                } else {
                    SaveStatus::Failure
                });
                Some(outcome)
            }
            None => None,
        };

        if let Some(reply) = envelope.reply {
            let _ = reply.send(outcome);
        }
    }
    tracing::debug!("save session listener stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UploadLimits;
    use crate::error::UploadError;
    use crate::testing::{MockPersistence, PersistenceCall, RecordingSink};
    use std::time::Duration;

    fn session(persistence: &Arc<MockPersistence>) -> SaveSession {
        let sink = Arc::new(RecordingSink::new());
        let limits = UploadLimits::new(8, 100).unwrap();
        let coordinator = Arc::new(UploadCoordinator::new(persistence.clone(), sink.clone(), limits));
        SaveSession::spawn(coordinator, sink, 4)
    }

    #[tokio::test]
    async fn test_submit_uploads_and_updates_status() {
        let persistence = Arc::new(MockPersistence::new());
        let session = session(&persistence);
        assert_eq!(session.status(), SaveStatus::Idle);

        let outcome = session.submit(EditorMessage::modified_pdf("JVBERi0x")).await.unwrap();

        assert!(outcome.unwrap().is_success());
        assert_eq!(session.status(), SaveStatus::Success);
        assert_eq!(
            persistence.calls(),
            vec![PersistenceCall::Whole { payload: "JVBERi0x".to_string() }]
        );
        session.dispose().await;
    }

    #[tokio::test]
    async fn test_message_without_pdf_is_ignored() {
        let persistence = Arc::new(MockPersistence::new());
        let session = session(&persistence);

        let outcome = session.submit(EditorMessage::default()).await.unwrap();

        assert!(outcome.is_none());
        assert_eq!(session.status(), SaveStatus::Idle);
        assert!(persistence.calls().is_empty());
    }

    #[tokio::test]
    async fn test_failed_upload_sets_failure() {
        let persistence = Arc::new(MockPersistence::new());
        let session = session(&persistence);

        let outcome = session.submit(EditorMessage::modified_pdf("")).await.unwrap();

        assert_eq!(outcome, Some(UploadOutcome::Failure(UploadError::EmptyDocument)));
        assert_eq!(session.status(), SaveStatus::Failure);
    }

    #[tokio::test]
    async fn test_posted_messages_run_in_order() {
        let persistence = Arc::new(MockPersistence::new());
        let session = session(&persistence);
        let notifier = session.notifier();

        notifier.post(EditorMessage::modified_pdf("AAAA")).await.unwrap();
        notifier.post(EditorMessage::modified_pdf("BBBBBBBBCC")).await.unwrap();
        // Queued behind the two posts, so both have been processed once it answers.
        session.submit(EditorMessage::default()).await.unwrap();

        let payloads: Vec<_> = persistence
            .calls()
            .into_iter()
            .map(|call| match call {
                PersistenceCall::Whole { payload } => payload,
                PersistenceCall::Chunk { payload, .. } => payload,
            })
            .collect();
        assert_eq!(payloads, vec!["AAAA", "BBBBBBBB", "CC"]);
    }

    #[tokio::test]
    async fn test_dispose_closes_channel() {
        let persistence = Arc::new(MockPersistence::new());
        let session = session(&persistence);
        let notifier = session.notifier();

        session.dispose().await;

        // The listener dropped its receiver, so sends fail once it is gone.
        let result = tokio::time::timeout(
            Duration::from_secs(1),
            notifier.post(EditorMessage::modified_pdf("AAAA")),
        )
        .await
        .unwrap();
        assert!(matches!(result, Err(SessionError::Closed)));
        assert!(persistence.calls().is_empty());
    }
}
