#![allow(clippy::uninlined_format_args)]
#![deny(unused_qualifications)]

pub mod components;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod network;
pub mod notify;
pub mod service;
#[cfg(any(test, feature = "test-util"))]
pub mod testing;

pub use encoded_document::{Chunk, EncodedDocument};

pub use crate::components::selector::{DocumentSelector, SelectOption};
pub use crate::components::session::{EditorMessage, EditorNotifier, SaveSession, SaveStatus};
pub use crate::components::viewer::{DocumentViewer, EditorSurface};
pub use crate::config::UploadLimits;
pub use crate::coordinator::{ChunkRequest, ChunkedUpload, UploadCoordinator, UploadOutcome, UploadReceipt};
pub use crate::error::{LoadError, ServiceError, SessionError, UploadError, ViewerError};
pub use crate::network::http_backend::HttpDocumentBackend;
pub use crate::notify::{DebugLevel, NotificationSink, Severity, ToastVariant, TracingSink};
pub use crate::service::{DocumentHandle, DocumentId, DocumentSource, DocumentSummary, PersistenceService};
