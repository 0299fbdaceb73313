use actix_web::{get, post, web, HttpResponse};

use crate::{app_state::AppState, errors::AppError, models::dto::response::DocumentStatusDto};

/// Reports what is cached; never triggers a download.
#[get("/api/document")]
pub async fn document_status(state: web::Data<AppState>) -> HttpResponse {
    let path = &state.config.document_path;
    let document = state.document_service.cached(path).await;
    HttpResponse::Ok().json(DocumentStatusDto::from_document(path, document.as_deref()))
}

/// Drops the memoized text and loads it again from local storage.
#[post("/api/document/refresh")]
pub async fn refresh_document(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let path = &state.config.document_path;
    state.document_service.invalidate(path).await;

    let document = state
        .document_service
        .get_document(path)
        .await
        .ok_or_else(|| AppError::Unavailable("document could not be reloaded".to_string()))?;

    Ok(HttpResponse::Ok().json(DocumentStatusDto::from_document(path, Some(document.as_ref()))))
}
