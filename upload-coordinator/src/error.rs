use encoded_document::DocumentError;
use thiserror::Error;

/// Failure reported by a collaborator (persistence or data-fetch service).
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Request to backend failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Backend answered with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to parse backend response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Backend returned an invalid document: {0}")]
    Document(#[from] DocumentError),

    #[error("Invalid backend URL: {0}")]
    InvalidBaseUrl(String),

    #[error("{0}")]
    Rejected(String),
}

/// Why an upload failed. Every variant is terminal for that upload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    #[error("empty document")]
    EmptyDocument,

    #[error("document too large")]
    DocumentTooLarge { length: usize, limit: usize },

    #[error("invalid document encoding: {0}")]
    InvalidEncoding(String),

    #[error("{}", describe_transport(.detail, .sequence_index))]
    Transport {
        detail: String,
        sequence_index: Option<usize>,
    },
}

impl UploadError {
    pub fn sequence_index(&self) -> Option<usize> {
        match self {
            UploadError::Transport { sequence_index, .. } => *sequence_index,
            _ => None,
        }
    }
}

fn describe_transport(detail: &str, sequence_index: &Option<usize>) -> String {
    match sequence_index {
        Some(index) => format!("chunk {}: {}", index, detail),
        None => detail.to_string(),
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("The PDF file is empty or was not found.")]
    EmptyOrMissing,

    #[error(transparent)]
    Service(#[from] ServiceError),
}

/// Raised by the viewer when a document cannot be shown.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ViewerError {
    pub message: String,
    #[source]
    pub source: LoadError,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Save session is closed")]
    Closed,
}
