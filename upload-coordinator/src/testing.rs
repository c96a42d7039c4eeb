//! In-memory collaborators for exercising the coordinator and components
//! without a backend.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use encoded_document::EncodedDocument;
use uuid::Uuid;

use crate::error::ServiceError;
use crate::notify::{NotificationSink, Severity, ToastVariant};
use crate::service::{
    DocumentHandle, DocumentId, DocumentSource, DocumentSummary, PersistenceService, ServiceResult,
};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// A call received by [`MockPersistence`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceCall {
    Whole {
        payload: String,
    },
    Chunk {
        payload: String,
        is_last: bool,
        handle: Option<DocumentHandle>,
    },
}

/// Records every call and hands out a fresh handle for each of them, so a
/// caller that reuses the wrong handle is caught.
#[derive(Debug, Default)]
pub struct MockPersistence {
    calls: Mutex<Vec<PersistenceCall>>,
    returned: Mutex<Vec<DocumentHandle>>,
    fail_whole: bool,
    fail_on_chunk: Option<usize>,
}

impl MockPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every `save_whole` call fails.
    pub fn failing_whole() -> Self {
        Self {
            fail_whole: true,
            ..Self::default()
        }
    }

    /// The chunk call with the given 1-based sequence index fails.
    pub fn failing_on_chunk(sequence_index: usize) -> Self {
        Self {
            fail_on_chunk: Some(sequence_index),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<PersistenceCall> {
        lock(&self.calls).clone()
    }

    /// Handles returned so far, in call order.
    pub fn returned_handles(&self) -> Vec<DocumentHandle> {
        lock(&self.returned).clone()
    }

    fn next_handle(&self) -> DocumentHandle {
        let handle = DocumentHandle::new(Uuid::new_v4().to_string());
        lock(&self.returned).push(handle.clone());
        handle
    }
}

#[async_trait]
impl PersistenceService for MockPersistence {
    async fn save_whole(&self, document: &EncodedDocument) -> ServiceResult<DocumentHandle> {
        lock(&self.calls).push(PersistenceCall::Whole {
            payload: document.as_str().to_string(),
        });
        if self.fail_whole {
            return Err(ServiceError::Rejected("storage quota exceeded".to_string()));
        }
        Ok(self.next_handle())
    }

    async fn save_chunk(
        &self,
        chunk: &str,
        is_last: bool,
        handle: Option<&DocumentHandle>,
    ) -> ServiceResult<DocumentHandle> {
        let sequence_index = {
            let mut calls = lock(&self.calls);
            calls.push(PersistenceCall::Chunk {
                payload: chunk.to_string(),
                is_last,
                handle: handle.cloned(),
            });
            calls.len()
        };
        if self.fail_on_chunk == Some(sequence_index) {
            return Err(ServiceError::Status {
                status: 503,
                body: "Service Unavailable".to_string(),
            });
        }
        Ok(self.next_handle())
    }
}

/// Sink that keeps everything it receives.
#[derive(Debug, Default)]
pub struct RecordingSink {
    logs: Mutex<Vec<(Severity, String)>>,
    toasts: Mutex<Vec<(ToastVariant, String, String)>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn logs(&self) -> Vec<(Severity, String)> {
        lock(&self.logs).clone()
    }

    pub fn toasts(&self) -> Vec<(ToastVariant, String, String)> {
        lock(&self.toasts).clone()
    }
}

impl NotificationSink for RecordingSink {
    fn log(&self, severity: Severity, message: &str) {
        lock(&self.logs).push((severity, message.to_string()));
    }

    fn notify(&self, variant: ToastVariant, title: &str, message: &str) {
        lock(&self.toasts).push((variant, title.to_string(), message.to_string()));
    }
}

/// Fixed set of documents, optionally failing every request.
#[derive(Debug, Default)]
pub struct StaticSource {
    documents: BTreeMap<String, (String, EncodedDocument)>,
    failing: bool,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn with_document(mut self, id: &str, title: &str, content: EncodedDocument) -> Self {
        self.documents.insert(id.to_string(), (title.to_string(), content));
        self
    }

    fn check(&self) -> ServiceResult<()> {
        if self.failing {
            return Err(ServiceError::Status {
                status: 500,
                body: "Internal Server Error".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentSource for StaticSource {
    async fn list_documents(&self) -> ServiceResult<Vec<DocumentSummary>> {
        self.check()?;
        Ok(self
            .documents
            .iter()
            .map(|(id, (title, _))| DocumentSummary {
                id: DocumentId::new(id.clone()),
                title: title.clone(),
            })
            .collect())
    }

    async fn fetch_content(&self, id: &DocumentId) -> ServiceResult<Option<EncodedDocument>> {
        self.check()?;
        Ok(self.documents.get(id.as_str()).map(|(_, content)| content.clone()))
    }
}
