use std::sync::Arc;

use tokio::sync::Mutex;
use upload_coordinator::{
    DocumentSelector, DocumentSource, DocumentViewer, NotificationSink, PersistenceService, SaveSession,
    UploadCoordinator, UploadLimits,
};

use crate::editor_slot::LoadedDocument;

pub const APP_TYPE_JSON: &str = "application/json";

pub struct AppState {
    pub(crate) selector: DocumentSelector,
    pub(crate) viewer: DocumentViewer,
    /// Held for a whole selection change so the selector and the editor
    /// always agree on the current document.
    pub(crate) selection: Mutex<()>,
    pub(crate) editor: Arc<LoadedDocument>,
    pub(crate) session: SaveSession,
}

impl AppState {
    /// Wires the components together. Must run inside a tokio runtime, since
    /// the save session spawns its listener.
    pub fn new(
        source: Arc<dyn DocumentSource>,
        persistence: Arc<dyn PersistenceService>,
        sink: Arc<dyn NotificationSink>,
        limits: UploadLimits,
        save_queue: usize,
    ) -> Self {
        let editor = Arc::new(LoadedDocument::default());
        let coordinator = Arc::new(UploadCoordinator::new(persistence, sink.clone(), limits));
        Self {
            selector: DocumentSelector::new(source.clone(), sink.clone()),
            viewer: DocumentViewer::new(source, sink.clone(), editor.clone()),
            selection: Mutex::new(()),
            editor,
            session: SaveSession::spawn(coordinator, sink, save_queue),
        }
    }

    /// Tears down the save session once the server stopped.
    pub async fn shutdown(self) {
        self.session.dispose().await;
    }
}
