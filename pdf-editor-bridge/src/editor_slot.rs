use async_trait::async_trait;
use tokio::sync::RwLock;
use upload_coordinator::{EditorSurface, EncodedDocument};

/// Stand-in for the embedded editor: keeps the last document the viewer
/// loaded so the editor page can pull it.
#[derive(Default)]
pub struct LoadedDocument {
    current: RwLock<Option<EncodedDocument>>,
}

impl LoadedDocument {
    pub async fn current(&self) -> Option<EncodedDocument> {
        self.current.read().await.clone()
    }
}

#[async_trait]
impl EditorSurface for LoadedDocument {
    async fn load_pdf(&self, document: EncodedDocument) {
        tracing::debug!("handing {} encoded bytes to the editor", document.len());
        *self.current.write().await = Some(document);
    }
}
