use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Encoded text contains a non-ASCII byte at offset {position}")]
    NotAscii { position: usize },

    #[error("Failed to decode base64 content")]
    Base64(#[from] base64::DecodeError),
}
