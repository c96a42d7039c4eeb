use actix_web::{HttpResponse, ResponseError};
use serde_json::error::Error as SerdeError;
use thiserror::Error;
use upload_coordinator::{LoadError, ServiceError, SessionError, ViewerError};


#[derive(Debug, Error)]
pub enum BridgeErr {
    #[error("Failed to parse JSON")]
    Json(#[from] SerdeError),

    #[error("Document backend request failed: {0}")]
    Backend(#[from] ServiceError),

    #[error("Error loading PDF: {}", .0.source)]
    Viewer(#[from] ViewerError),

    #[error("No document is loaded")]
    NothingLoaded,

    #[error("Message carried no modified PDF")]
    NoModifiedPdf,

    #[error("Save session is not accepting messages")]
    Session(#[from] SessionError),
}

impl ResponseError for BridgeErr {
    fn error_response(&self) -> HttpResponse {
        match self {
            BridgeErr::Json(_) => HttpResponse::BadRequest().body(self.to_string()),
            BridgeErr::NoModifiedPdf => HttpResponse::BadRequest().body(self.to_string()),
            BridgeErr::Backend(_) => HttpResponse::BadGateway().body(self.to_string()),
            BridgeErr::Viewer(err) => match err.source {
                LoadError::EmptyOrMissing => HttpResponse::NotFound().body(self.to_string()),
                LoadError::Service(_) => HttpResponse::BadGateway().body(self.to_string()),
            },
            BridgeErr::NothingLoaded => HttpResponse::NotFound().body(self.to_string()),
            BridgeErr::Session(_) => HttpResponse::ServiceUnavailable().body(self.to_string()),
        }
    }
}
