use actix_web::{get, post, web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use upload_coordinator::{DocumentHandle, EditorMessage, SaveStatus, UploadOutcome};

use crate::errors::BridgeErr;
use crate::state::{AppState, APP_TYPE_JSON};

#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SaveResponse {
    pub(crate) status: SaveStatus,
    pub(crate) document_id: Option<DocumentHandle>,
    pub(crate) requests: usize,
    pub(crate) error: Option<String>,
    /// Chunk that failed, for chunked uploads.
    pub(crate) sequence_index: Option<usize>,
}

impl From<UploadOutcome> for SaveResponse {
    fn from(outcome: UploadOutcome) -> Self {
        match outcome {
            UploadOutcome::Success(receipt) => SaveResponse {
                status: SaveStatus::Success,
                document_id: receipt.handle,
                requests: receipt.requests,
                error: None,
                sequence_index: None,
            },
            UploadOutcome::Failure(err) => SaveResponse {
                status: SaveStatus::Failure,
                document_id: None,
                requests: 0,
                sequence_index: err.sequence_index(),
                error: Some(err.to_string()),
            },
        }
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub(crate) struct StatusResponse {
    pub(crate) status: SaveStatus,
}

/// Receives the editor's modified PDF and waits for it to be persisted.
#[post("/save")]
pub(crate) async fn save(
    request_json_bytes: web::Bytes,
    shared_state: web::Data<AppState>,
) -> Result<HttpResponse, BridgeErr> {
    let message: EditorMessage = serde_json::from_slice(&request_json_bytes)?;

    let outcome = shared_state
        .session
        .submit(message)
        .await?
        .ok_or(BridgeErr::NoModifiedPdf)?;

    let resp = SaveResponse::from(outcome);
    let mut builder = if resp.status == SaveStatus::Success {
        HttpResponse::Ok()
    } else {
        HttpResponse::UnprocessableEntity()
    };
    Ok(builder.content_type(APP_TYPE_JSON).json(resp))
}

#[get("/save/status")]
pub(crate) async fn save_status(shared_state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok()
        .content_type(APP_TYPE_JSON)
        .json(StatusResponse { status: shared_state.session.status() })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use serde_json::json;
    use upload_coordinator::testing::{MockPersistence, PersistenceCall, StaticSource};

    use super::*;
    use crate::services::{configure, test_support};

    #[actix_web::test]
    async fn test_save_chunked_document() {
        let persistence = Arc::new(MockPersistence::new());
        let state = test_support::state(StaticSource::new(), &persistence);
        let app = test::init_service(App::new().app_data(state).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/save")
            .set_json(json!({"modifiedPdf": "JVBERi0xLjcKJeLjz9MK"}))
            .to_request();
        let resp: SaveResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(resp.status, SaveStatus::Success);
        assert_eq!(resp.requests, 3);
        assert_eq!(resp.document_id, Some(persistence.returned_handles()[0].clone()));
        assert_eq!(persistence.calls().len(), 3);

        let req = test::TestRequest::get().uri("/save/status").to_request();
        let status: StatusResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(status.status, SaveStatus::Success);
    }

    #[actix_web::test]
    async fn test_save_failure_reports_chunk() {
        let persistence = Arc::new(MockPersistence::failing_on_chunk(2));
        let state = test_support::state(StaticSource::new(), &persistence);
        let app = test::init_service(App::new().app_data(state).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/save")
            .set_json(json!({"modifiedPdf": "JVBERi0xLjcKJeLjz9MK"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body: SaveResponse = test::read_body_json(resp).await;
        assert_eq!(body.status, SaveStatus::Failure);
        assert_eq!(body.sequence_index, Some(2));
        assert_eq!(
            persistence.calls().iter().filter(|c| matches!(c, PersistenceCall::Chunk { .. })).count(),
            2
        );
    }

    #[actix_web::test]
    async fn test_save_small_document_in_one_request() {
        let persistence = Arc::new(MockPersistence::new());
        let state = test_support::state(StaticSource::new(), &persistence);
        let app = test::init_service(App::new().app_data(state).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/save")
            .set_json(json!({"modifiedPdf": "JVBERi0x"}))
            .to_request();
        let resp: SaveResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(resp.requests, 1);
        assert_eq!(
            persistence.calls(),
            vec![PersistenceCall::Whole { payload: "JVBERi0x".to_string() }]
        );
    }

    #[actix_web::test]
    async fn test_save_without_pdf_is_bad_request() {
        let persistence = Arc::new(MockPersistence::new());
        let state = test_support::state(StaticSource::new(), &persistence);
        let app = test::init_service(App::new().app_data(state).configure(configure)).await;

        let req = test::TestRequest::post().uri("/save").set_json(json!({"page": 3})).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::post().uri("/save").set_payload("{not json").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

        assert!(persistence.calls().is_empty());
    }
}
