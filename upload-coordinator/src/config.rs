use std::num::NonZeroUsize;

/// Chunk size for uploads, 3 MiB of encoded text.
pub const DEFAULT_CHUNK_SIZE: usize = 3 * 1024 * 1024;

/// Hard ceiling for a single-shot request, in encoded units.
pub const DEFAULT_MAX_SINGLE_REQUEST_SIZE: usize = 10_000_000;

/// Size limits that route an upload.
///
/// `max_single_request_size` only gates the single-shot path; chunked uploads
/// have no total-size ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadLimits {
    pub chunk_size_threshold: NonZeroUsize,
    pub max_single_request_size: NonZeroUsize,
}

impl UploadLimits {
    /// Returns `None` if either limit is zero.
    pub fn new(chunk_size_threshold: usize, max_single_request_size: usize) -> Option<Self> {
        Some(Self {
            chunk_size_threshold: NonZeroUsize::new(chunk_size_threshold)?,
            max_single_request_size: NonZeroUsize::new(max_single_request_size)?,
        })
    }
}

impl Default for UploadLimits {
    fn default() -> Self {
        Self {
            chunk_size_threshold: NonZeroUsize::new(DEFAULT_CHUNK_SIZE).unwrap_or(NonZeroUsize::MIN),
            max_single_request_size: NonZeroUsize::new(DEFAULT_MAX_SINGLE_REQUEST_SIZE)
                .unwrap_or(NonZeroUsize::MIN),
        }
    }
}
