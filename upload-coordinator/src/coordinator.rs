use std::num::NonZeroUsize;
use std::sync::Arc;

use encoded_document::{Chunk, EncodedDocument};

use crate::config::UploadLimits;
use crate::error::UploadError;
use crate::notify::{NotificationSink, Severity, ToastVariant};
use crate::service::{DocumentHandle, PersistenceService};

const SAVED_MESSAGE: &str = "Document successfully saved.";

/// Result of one upload, as reported to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    Success(UploadReceipt),
    Failure(UploadError),
}

impl UploadOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, UploadOutcome::Success(_))
    }

    pub fn error(&self) -> Option<&UploadError> {
        match self {
            UploadOutcome::Success(_) => None,
            UploadOutcome::Failure(err) => Some(err),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReceipt {
    /// Handle captured during the upload: the single-shot response, or the
    /// one assigned to the first chunk.
    pub handle: Option<DocumentHandle>,
    /// Number of requests the persistence service accepted.
    pub requests: usize,
}

/// Arguments of one `save_chunk` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkRequest<'a> {
    pub sequence_index: usize,
    pub payload: &'a str,
    pub is_last: bool,
    pub handle: Option<DocumentHandle>,
}

/// State carried through the chunked loop of a single upload.
///
/// It starts without a handle; the first non-empty handle returned by the
/// persistence service is kept and attached to every later chunk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChunkedUpload {
    handle: Option<DocumentHandle>,
    requests: usize,
}

impl ChunkedUpload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request<'a>(&self, chunk: Chunk<'a>) -> ChunkRequest<'a> {
        ChunkRequest {
            sequence_index: chunk.sequence_index,
            payload: chunk.payload,
            is_last: chunk.is_last,
            handle: self.handle.clone(),
        }
    }

    /// Records a successful chunk response. Returns true when this response
    /// supplied the handle for the rest of the upload.
    pub fn record_response(&mut self, returned: DocumentHandle) -> bool {
        self.requests += 1;
        if self.handle.is_none() && !returned.is_empty() {
            self.handle = Some(returned);
            return true;
        }
        false
    }

    pub fn handle(&self) -> Option<&DocumentHandle> {
        self.handle.as_ref()
    }

    pub fn requests(&self) -> usize {
        self.requests
    }

    pub fn into_receipt(self) -> UploadReceipt {
        UploadReceipt {
            handle: self.handle,
            requests: self.requests,
        }
    }
}

/// Delivers encoded documents to a [`PersistenceService`], either in one
/// request or as an ordered sequence of chunks.
///
/// Exactly one request is in flight per upload and nothing is retried. Separate
/// uploads through the same coordinator are not ordered against each other.
pub struct UploadCoordinator {
    persistence: Arc<dyn PersistenceService>,
    sink: Arc<dyn NotificationSink>,
    limits: UploadLimits,
}

impl UploadCoordinator {
    pub fn new(
        persistence: Arc<dyn PersistenceService>,
        sink: Arc<dyn NotificationSink>,
        limits: UploadLimits,
    ) -> Self {
        Self {
            persistence,
            sink,
            limits,
        }
    }

    pub fn limits(&self) -> UploadLimits {
        self.limits
    }

    /// Uploads with the configured limits.
    pub async fn upload(&self, document: &EncodedDocument) -> UploadOutcome {
        self.upload_with_limits(document, self.limits).await
    }

    /// Validates editor output as an encoded document, then uploads it.
    pub async fn upload_text(&self, text: String) -> UploadOutcome {
        let outcome = match EncodedDocument::from_encoded(text) {
            Ok(document) => return self.upload(&document).await,
            Err(err) => UploadOutcome::Failure(UploadError::InvalidEncoding(err.to_string())),
        };
        self.report(&outcome);
        outcome
    }

    pub async fn upload_with_limits(&self, document: &EncodedDocument, limits: UploadLimits) -> UploadOutcome {
        let outcome = match self.route(document, limits).await {
            Ok(receipt) => UploadOutcome::Success(receipt),
            Err(err) => UploadOutcome::Failure(err),
        };
        self.report(&outcome);
        outcome
    }

    async fn route(&self, document: &EncodedDocument, limits: UploadLimits) -> Result<UploadReceipt, UploadError> {
        self.sink.log(Severity::Info, "Checking PDF size before sending...");
        if document.is_empty() {
            return Err(UploadError::EmptyDocument);
        }

        let length = document.len();
        self.sink.log(Severity::Info, &format!("Base64 file size: {} bytes", length));

        if length <= limits.chunk_size_threshold.get() {
            self.sink.log(Severity::Info, "Sending the file in a single request...");
            self.upload_whole(document, limits.max_single_request_size).await
        } else {
            self.sink.log(Severity::Info, "File too large for one request, sending in chunks...");
            self.upload_chunked(document, limits.chunk_size_threshold).await
        }
    }

    async fn upload_whole(&self, document: &EncodedDocument, ceiling: NonZeroUsize) -> Result<UploadReceipt, UploadError> {
        if document.len() > ceiling.get() {
            return Err(UploadError::DocumentTooLarge {
                length: document.len(),
                limit: ceiling.get(),
            });
        }

        self.sink.log(Severity::Info, "Sending PDF to backend...");
        let handle = self
            .persistence
            .save_whole(document)
            .await
            .map_err(|err| UploadError::Transport {
                detail: err.to_string(),
                sequence_index: None,
            })?;
        self.sink.log(Severity::Info, &format!("Document saved to backend: {}", handle));

        Ok(UploadReceipt {
            handle: Some(handle),
            requests: 1,
        })
    }

    async fn upload_chunked(&self, document: &EncodedDocument, threshold: NonZeroUsize) -> Result<UploadReceipt, UploadError> {
        let plan = document.chunks(threshold);
        self.sink.log(
            Severity::Info,
            &format!("Splitting {} bytes into {} chunks...", document.len(), plan.chunk_count()),
        );

        let mut state = ChunkedUpload::new();
        for chunk in plan {
            let request = state.request(chunk);
            self.sink.log(
                Severity::Info,
                &format!("Sending chunk {} ({} bytes)", request.sequence_index, request.payload.len()),
            );

            let returned = self
                .persistence
                .save_chunk(request.payload, request.is_last, request.handle.as_ref())
                .await
                .map_err(|err| UploadError::Transport {
                    detail: err.to_string(),
                    sequence_index: Some(request.sequence_index),
                })?;

            if state.record_response(returned) {
                if let Some(handle) = state.handle() {
                    self.sink.log(Severity::Info, &format!("First chunk saved, document handle: {}", handle));
                }
            }
            self.sink.log(Severity::Info, &format!("Chunk {} sent successfully!", request.sequence_index));
        }

        Ok(state.into_receipt())
    }

    fn report(&self, outcome: &UploadOutcome) {
        match outcome {
            UploadOutcome::Success(_) => {
                self.sink.log(Severity::Info, SAVED_MESSAGE);
                self.sink.notify(ToastVariant::Success, "Success", SAVED_MESSAGE);
            }
            UploadOutcome::Failure(err) => {
                let (title, message) = match err {
                    UploadError::EmptyDocument => ("Error".to_string(), "Empty PDF data.".to_string()),
                    UploadError::DocumentTooLarge { .. } => ("Error".to_string(), "File too large.".to_string()),
                    UploadError::InvalidEncoding(detail) => ("Error".to_string(), detail.clone()),
                    UploadError::Transport {
                        detail,
                        sequence_index: Some(index),
                    } => (format!("Error sending chunk {}", index), detail.clone()),
                    UploadError::Transport {
                        detail,
                        sequence_index: None,
                    } => ("Error sending PDF".to_string(), detail.clone()),
                };
                self.sink.log(Severity::Error, &format!("Upload failed: {}", err));
                self.sink.notify(ToastVariant::Error, &title, &message);
            }
        }
    }
}
