use actix_web::{get, put, web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use upload_coordinator::network::messages::DocumentContent;
use upload_coordinator::DocumentId;

use crate::errors::BridgeErr;
use crate::state::{AppState, APP_TYPE_JSON};

#[derive(Serialize, Deserialize)]
struct Hello {}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SelectionResponse {
    pub(crate) document_id: Option<DocumentId>,
}

#[get("/hello")]
pub(crate) async fn hello() -> impl Responder {
    HttpResponse::Ok()
        .content_type(APP_TYPE_JSON)
        .json(Hello {})
}

#[get("/documents")]
pub(crate) async fn list_documents(shared_state: web::Data<AppState>) -> Result<HttpResponse, BridgeErr> {
    let options = shared_state.selector.fetch_document_list().await?;
    Ok(HttpResponse::Ok().content_type(APP_TYPE_JSON).json(options))
}

/// Loads a document into the editor, then makes it the selection. A document
/// that fails to load leaves the previous selection untouched.
#[put("/selection/{id}")]
pub(crate) async fn select_document(
    from_path: web::Path<String>,
    shared_state: web::Data<AppState>,
) -> Result<HttpResponse, BridgeErr> {
    let id = DocumentId::new(from_path.into_inner());
    tracing::info!("Selecting document {}", id);

    let _selecting = shared_state.selection.lock().await;
    shared_state.viewer.set_document_selection(Some(id.clone())).await?;
    shared_state.selector.set_document_selection(Some(id.clone())).await;

    Ok(HttpResponse::Ok()
        .content_type(APP_TYPE_JSON)
        .json(SelectionResponse { document_id: Some(id) }))
}

#[get("/selection")]
pub(crate) async fn current_selection(shared_state: web::Data<AppState>) -> impl Responder {
    let document_id = shared_state.selector.selected_document().await;
    HttpResponse::Ok()
        .content_type(APP_TYPE_JSON)
        .json(SelectionResponse { document_id })
}

#[get("/selection/content")]
pub(crate) async fn selection_content(shared_state: web::Data<AppState>) -> Result<HttpResponse, BridgeErr> {
    let document = shared_state.editor.current().await.ok_or(BridgeErr::NothingLoaded)?;
    Ok(HttpResponse::Ok()
        .content_type(APP_TYPE_JSON)
        .json(DocumentContent { base64_data: document.into_string() }))
}
