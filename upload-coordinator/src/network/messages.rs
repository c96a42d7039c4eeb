//! JSON bodies exchanged with the document backend.

use serde::{Deserialize, Serialize};

use crate::service::DocumentHandle;

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SaveDocumentRequest<'a> {
    pub base64_data: &'a str,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SaveChunkRequest<'a> {
    pub base64_chunk: &'a str,
    pub is_last_chunk: bool,
    /// Absent on the first chunk of an upload.
    pub content_document_id: Option<&'a DocumentHandle>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SavedDocumentResponse {
    pub document_id: DocumentHandle,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DocumentContent {
    pub base64_data: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_first_chunk_has_null_document_id() {
        let body = SaveChunkRequest {
            base64_chunk: "JVBE",
            is_last_chunk: false,
            content_document_id: None,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"base64Chunk": "JVBE", "isLastChunk": false, "contentDocumentId": null})
        );
    }

    #[test]
    fn test_later_chunk_carries_handle() {
        let handle = DocumentHandle::new("069xx0000001");
        let body = SaveChunkRequest {
            base64_chunk: "Ri0x",
            is_last_chunk: true,
            content_document_id: Some(&handle),
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"base64Chunk": "Ri0x", "isLastChunk": true, "contentDocumentId": "069xx0000001"})
        );
    }

    #[test]
    fn test_saved_response() {
        let resp: SavedDocumentResponse = serde_json::from_str(r#"{"documentId":"069xx0000001"}"#).unwrap();
        assert_eq!(resp.document_id, DocumentHandle::new("069xx0000001"));
    }
}
