use std::time::Duration;

use async_trait::async_trait;
use encoded_document::EncodedDocument;
use reqwest::{Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::time::sleep;

use crate::error::ServiceError;
use crate::network::messages::{DocumentContent, SaveChunkRequest, SaveDocumentRequest, SavedDocumentResponse};
use crate::service::{
    DocumentHandle, DocumentId, DocumentSource, DocumentSummary, PersistenceService, ServiceResult,
};

pub const DEFAULT_READ_RETRIES: usize = 3;

/// REST client for the document backend.
///
/// Serves as both the persistence service and the data-fetch service. Reads
/// are retried with exponential backoff; saves are sent exactly once.
#[derive(Clone)]
pub struct HttpDocumentBackend {
    base_url: Url,
    client: reqwest::Client,
    read_retries: usize,
}

impl HttpDocumentBackend {
    pub fn new(base_url: &str) -> ServiceResult<Self> {
        let base_url = Url::parse(base_url).map_err(|e| ServiceError::InvalidBaseUrl(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(ServiceError::InvalidBaseUrl(base_url.to_string()));
        }
        Ok(Self {
            base_url,
            client: reqwest::Client::default(),
            read_retries: DEFAULT_READ_RETRIES,
        })
    }

    pub fn with_read_retries(mut self, read_retries: usize) -> Self {
        self.read_retries = read_retries;
        self
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Sends a GET, retrying connection failures and 5xx answers with
    /// exponential backoff. Any other answer is returned as is.
    async fn get_with_retries(&self, segments: &[&str]) -> ServiceResult<Response> {
        let url = self.endpoint(segments);
        let mut retries = 0;
        let mut delay = Duration::from_millis(5);
        loop {
            let failure = match self.client.get(url.clone()).send().await {
                Ok(response) if !response.status().is_server_error() => return Ok(response),
                Ok(response) if retries >= self.read_retries => return Ok(response),
                Ok(response) => format!("status {}", response.status()),
                Err(err) if retries >= self.read_retries => return Err(err.into()),
                Err(err) => err.to_string(),
            };
            retries += 1;
            tracing::warn!("GET {} failed (attempt {}/{}): {}. Retrying in {:?}",
                           url, retries, self.read_retries, failure, delay);
            sleep(delay).await;
            delay *= 2;
        }
    }

    async fn post<T, R>(&self, segments: &[&str], body: &T) -> ServiceResult<R>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response = self.client.post(self.endpoint(segments)).json(body).send().await?;
        Self::parse(response).await
    }

    async fn parse<R>(response: Response) -> ServiceResult<R>
    where
        R: DeserializeOwned,
    {
        let status = response.status();
        let response_text = response.text().await?;
        if !status.is_success() {
            return Err(ServiceError::Status {
                status: status.as_u16(),
                body: response_text,
            });
        }
        Ok(serde_json::from_str(&response_text)?)
    }
}

#[async_trait]
impl PersistenceService for HttpDocumentBackend {
    async fn save_whole(&self, document: &EncodedDocument) -> ServiceResult<DocumentHandle> {
        let body = SaveDocumentRequest {
            base64_data: document.as_str(),
        };
        let resp: SavedDocumentResponse = self.post(&["documents"], &body).await?;
        Ok(resp.document_id)
    }

    async fn save_chunk(
        &self,
        chunk: &str,
        is_last: bool,
        handle: Option<&DocumentHandle>,
    ) -> ServiceResult<DocumentHandle> {
        let body = SaveChunkRequest {
            base64_chunk: chunk,
            is_last_chunk: is_last,
            content_document_id: handle,
        };
        let resp: SavedDocumentResponse = self.post(&["documents", "chunks"], &body).await?;
        Ok(resp.document_id)
    }
}

#[async_trait]
impl DocumentSource for HttpDocumentBackend {
    async fn list_documents(&self) -> ServiceResult<Vec<DocumentSummary>> {
        let response = self.get_with_retries(&["documents"]).await?;
        Self::parse(response).await
    }

    /// A 404 from the content endpoint means the document does not exist.
    async fn fetch_content(&self, id: &DocumentId) -> ServiceResult<Option<EncodedDocument>> {
        let response = self.get_with_retries(&["documents", id.as_str(), "content"]).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let content: DocumentContent = Self::parse(response).await?;
        Ok(Some(EncodedDocument::from_encoded(content.base64_data)?))
    }
}
