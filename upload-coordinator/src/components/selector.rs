use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::error::ServiceError;
use crate::notify::{NotificationSink, Severity, ToastVariant};
use crate::service::{DocumentId, DocumentSource, DocumentSummary};

/// An entry of the document picker.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub label: String,
    pub value: DocumentId,
}

impl From<DocumentSummary> for SelectOption {
    fn from(summary: DocumentSummary) -> Self {
        Self {
            label: summary.title,
            value: summary.id,
        }
    }
}

/// Holds the list of stored documents and the one the user picked.
///
/// State is only locked to read or swap it, never while the data-fetch
/// service is being called.
pub struct DocumentSelector {
    source: Arc<dyn DocumentSource>,
    sink: Arc<dyn NotificationSink>,
    options: RwLock<Vec<SelectOption>>,
    selected: RwLock<Option<DocumentId>>,
}

impl DocumentSelector {
    pub fn new(source: Arc<dyn DocumentSource>, sink: Arc<dyn NotificationSink>) -> Self {
        Self {
            source,
            sink,
            options: RwLock::new(Vec::new()),
            selected: RwLock::new(None),
        }
    }

    /// Refreshes the options from the data-fetch service. On failure the
    /// previous options are kept.
    pub async fn fetch_document_list(&self) -> Result<Vec<SelectOption>, ServiceError> {
        match self.source.list_documents().await {
            Ok(documents) => {
                let options: Vec<SelectOption> = documents.into_iter().map(SelectOption::from).collect();
                *self.options.write().await = options.clone();
                Ok(options)
            }
            Err(err) => {
                self.sink.notify(ToastVariant::Error, "Error", "Error retrieving PDFs");
                self.sink.log(Severity::Error, &format!("Error retrieving PDFs: {}", err));
                Err(err)
            }
        }
    }

    pub async fn set_document_selection(&self, id: Option<DocumentId>) {
        *self.selected.write().await = id;
    }

    pub async fn selected_document(&self) -> Option<DocumentId> {
        self.selected.read().await.clone()
    }

    pub async fn options(&self) -> Vec<SelectOption> {
        self.options.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;
    use encoded_document::EncodedDocument;
    use tokio::sync::Notify;

    use super::*;
    use crate::service::ServiceResult;
    use crate::testing::{RecordingSink, StaticSource};

    /// Source whose listing waits until the test opens the gate.
    #[derive(Default)]
    struct GatedSource {
        gate: Notify,
    }

    #[async_trait]
    impl DocumentSource for GatedSource {
        async fn list_documents(&self) -> ServiceResult<Vec<DocumentSummary>> {
            self.gate.notified().await;
            Ok(Vec::new())
        }

        async fn fetch_content(&self, _id: &DocumentId) -> ServiceResult<Option<EncodedDocument>> {
            Ok(None)
        }
    }

    #[tokio::test]
    async fn test_fetch_maps_summaries_to_options() {
        let source = StaticSource::new()
            .with_document("069A", "Lease.pdf", EncodedDocument::encode(b"%PDF-1.4"))
            .with_document("069B", "Invoice.pdf", EncodedDocument::encode(b"%PDF-1.7"));
        let sink = Arc::new(RecordingSink::new());
        let selector = DocumentSelector::new(Arc::new(source), sink.clone());

        let options = selector.fetch_document_list().await.unwrap();

        assert_eq!(
            options,
            vec![
                SelectOption { label: "Lease.pdf".to_string(), value: DocumentId::new("069A") },
                SelectOption { label: "Invoice.pdf".to_string(), value: DocumentId::new("069B") },
            ]
        );
        assert_eq!(selector.options().await, options);
        assert!(sink.toasts().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_failure_keeps_options_and_toasts() {
        let sink = Arc::new(RecordingSink::new());
        let selector = DocumentSelector::new(Arc::new(StaticSource::failing()), sink.clone());
        *selector.options.write().await = vec![SelectOption {
            label: "Old.pdf".to_string(),
            value: DocumentId::new("old"),
        }];

        assert!(selector.fetch_document_list().await.is_err());

        assert_eq!(selector.options().await.len(), 1);
        assert_eq!(
            sink.toasts(),
            vec![(ToastVariant::Error, "Error".to_string(), "Error retrieving PDFs".to_string())]
        );
        assert_eq!(sink.logs()[0].0, Severity::Error);
    }

    #[tokio::test]
    async fn test_selection() {
        let selector = DocumentSelector::new(
            Arc::new(StaticSource::new()),
            Arc::new(RecordingSink::new()),
        );
        assert!(selector.selected_document().await.is_none());

        selector.set_document_selection(Some(DocumentId::new("069A"))).await;
        assert_eq!(selector.selected_document().await, Some(DocumentId::new("069A")));

        selector.set_document_selection(None).await;
        assert!(selector.selected_document().await.is_none());
    }

    #[tokio::test]
    async fn test_selection_readable_while_list_is_fetched() {
        let source = Arc::new(GatedSource::default());
        let selector = Arc::new(DocumentSelector::new(source.clone(), Arc::new(RecordingSink::new())));

        let fetching = tokio::spawn({
            let selector = selector.clone();
            async move { selector.fetch_document_list().await.map(|options| options.len()) }
        });
        tokio::task::yield_now().await;

        selector.set_document_selection(Some(DocumentId::new("069A"))).await;
        let selected = tokio::time::timeout(Duration::from_secs(1), selector.selected_document())
            .await
            .unwrap();
        assert_eq!(selected, Some(DocumentId::new("069A")));

        source.gate.notify_one();
        assert_eq!(fetching.await.unwrap().unwrap(), 0);
    }
}
