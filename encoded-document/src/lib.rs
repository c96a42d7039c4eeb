pub mod chunk;
pub mod document;
pub mod error;

pub use chunk::{Chunk, ChunkPlan};
pub use document::EncodedDocument;
pub use error::DocumentError;
