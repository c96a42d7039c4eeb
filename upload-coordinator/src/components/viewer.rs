use std::sync::Arc;

use async_trait::async_trait;
use encoded_document::EncodedDocument;
use tokio::sync::RwLock;

use crate::error::{LoadError, ViewerError};
use crate::notify::{NotificationSink, Severity};
use crate::service::{DocumentId, DocumentSource};

/// The third-party editor the viewer renders into.
#[async_trait]
pub trait EditorSurface: Send + Sync {
    async fn load_pdf(&self, document: EncodedDocument);
}

/// Fetches the selected document and hands it to the editor.
pub struct DocumentViewer {
    source: Arc<dyn DocumentSource>,
    sink: Arc<dyn NotificationSink>,
    editor: Arc<dyn EditorSurface>,
    document_id: RwLock<Option<DocumentId>>,
}

impl DocumentViewer {
    pub fn new(
        source: Arc<dyn DocumentSource>,
        sink: Arc<dyn NotificationSink>,
        editor: Arc<dyn EditorSurface>,
    ) -> Self {
        Self {
            source,
            sink,
            editor,
            document_id: RwLock::new(None),
        }
    }

    /// Id of the document currently shown in the editor.
    pub async fn document_id(&self) -> Option<DocumentId> {
        self.document_id.read().await.clone()
    }

    /// Loads the selected document and records it once the editor has it. A
    /// failed load leaves the previous selection in place; clearing the
    /// selection loads nothing.
    pub async fn set_document_selection(&self, id: Option<DocumentId>) -> Result<(), ViewerError> {
        if let Some(id) = &id {
            self.load_document(id).await?;
        }
        *self.document_id.write().await = id;
        Ok(())
    }

    pub async fn load_document(&self, id: &DocumentId) -> Result<(), ViewerError> {
        self.sink.log(Severity::Info, &format!("Fetching PDF content for ID: {}", id));

        match self.fetch(id).await {
            Ok(document) => {
                self.editor.load_pdf(document).await;
                self.sink.log(Severity::Info, "PDF content loaded successfully.");
                Ok(())
            }
            Err(source) => {
                self.sink.log(Severity::Error, &format!("Error loading PDF: {}", source));
                Err(ViewerError {
                    message: "Error loading PDF.".to_string(),
                    source,
                })
            }
        }
    }

    async fn fetch(&self, id: &DocumentId) -> Result<EncodedDocument, LoadError> {
        match self.source.fetch_content(id).await? {
            Some(document) if !document.is_empty() => Ok(document),
            _ => Err(LoadError::EmptyOrMissing),
        }
    }
}
