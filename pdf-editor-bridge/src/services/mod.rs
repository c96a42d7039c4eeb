use actix_web::web;

pub mod document_service;
pub mod save_service;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(document_service::hello)
        .service(document_service::list_documents)
        .service(document_service::selection_content)
        .service(document_service::current_selection)
        .service(document_service::select_document)
        .service(save_service::save)
        .service(save_service::save_status);
}
