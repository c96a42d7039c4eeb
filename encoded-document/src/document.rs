use std::fmt::{self, Debug, Formatter};
use std::num::NonZeroUsize;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use crate::chunk::ChunkPlan;
use crate::error::DocumentError;

/// A file's bytes carried as printable text.
///
/// Lengths and offsets are counted in encoded units, i.e. bytes of the text.
/// Only ASCII text is accepted, so any offset is a valid slice boundary.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct EncodedDocument {
    text: String,
}

impl EncodedDocument {
    /// Encodes raw file bytes as standard base64.
    pub fn encode(raw: &[u8]) -> Self {
        Self { text: BASE64.encode(raw) }
    }

    /// Wraps text that is already encoded, e.g. the payload an editor hands back.
    pub fn from_encoded(text: impl Into<String>) -> Result<Self, DocumentError> {
        let text = text.into();
        if let Some(position) = text.bytes().position(|byte| !byte.is_ascii()) {
            return Err(DocumentError::NotAscii { position });
        }
        Ok(Self { text })
    }

    /// Total length in encoded units.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }

    /// Decodes the text back into the raw file bytes.
    pub fn decode(&self) -> Result<Vec<u8>, DocumentError> {
        Ok(BASE64.decode(&self.text)?)
    }

    /// Lazily partitions the text into chunks of exactly `threshold` units,
    /// the final one possibly shorter.
    pub fn chunks(&self, threshold: NonZeroUsize) -> ChunkPlan<'_> {
        ChunkPlan::new(&self.text, threshold)
    }
}

impl TryFrom<String> for EncodedDocument {
    type Error = DocumentError;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        Self::from_encoded(text)
    }
}

// Documents run to megabytes, so only a prefix is printed.
impl Debug for EncodedDocument {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let preview = &self.text[..self.text.len().min(16)];
        f.debug_struct("EncodedDocument")
            .field("len", &self.text.len())
            .field("preview", &preview)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_decode() {
        let raw = b"%PDF-1.7\n%\xe2\xe3\xcf\xd3\n";
        let document = EncodedDocument::encode(raw);

        assert!(document.as_str().is_ascii());
        assert_eq!(document.decode().unwrap(), raw);
    }

    #[test]
    fn test_from_encoded_rejects_non_ascii() {
        let err = EncodedDocument::from_encoded("JVBERi0x\u{e9}").unwrap_err();
        assert!(matches!(err, DocumentError::NotAscii { position: 8 }));
    }

    #[test]
    fn test_empty_document() {
        let document = EncodedDocument::from_encoded("").unwrap();
        assert!(document.is_empty());
        assert_eq!(document.len(), 0);
        assert_eq!(document, EncodedDocument::default());
    }

    #[test]
    fn test_debug_only_prints_prefix() {
        let document = EncodedDocument::from_encoded("A".repeat(1024)).unwrap();
        let printed = format!("{document:?}");

        assert!(printed.contains("len: 1024"));
        assert!(printed.len() < 100);
    }

    #[test]
    fn test_decode_invalid_base64() {
        let document = EncodedDocument::from_encoded("not base64!").unwrap();
        assert!(matches!(document.decode(), Err(DocumentError::Base64(_))));
    }
}
