use std::fmt::{self, Display, Formatter};

use async_trait::async_trait;
use encoded_document::EncodedDocument;
use serde::{Deserialize, Serialize};

use crate::error::ServiceError;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Identifier the persistence layer assigns to a stored, possibly
/// partially-uploaded, document.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct DocumentHandle(String);

impl DocumentHandle {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Display for DocumentHandle {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a document offered for selection.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for DocumentId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A stored document as listed by the backend.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DocumentSummary {
    pub id: DocumentId,
    pub title: String,
}

/// Backend that accepts encoded documents, whole or chunk by chunk.
#[async_trait]
pub trait PersistenceService: Send + Sync {
    /// Stores a whole document in one request.
    async fn save_whole(&self, document: &EncodedDocument) -> ServiceResult<DocumentHandle>;

    /// Stores one chunk. `handle` is `None` for the first chunk of an upload
    /// and the handle returned for that first chunk afterwards.
    async fn save_chunk(
        &self,
        chunk: &str,
        is_last: bool,
        handle: Option<&DocumentHandle>,
    ) -> ServiceResult<DocumentHandle>;
}

/// Read side of the backend.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    async fn list_documents(&self) -> ServiceResult<Vec<DocumentSummary>>;

    /// Fetches the encoded content of one document, `None` if it does not exist.
    async fn fetch_content(&self, id: &DocumentId) -> ServiceResult<Option<EncodedDocument>>;
}
