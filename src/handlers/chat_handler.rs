use actix_web::{get, post, web, HttpRequest, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::AppError,
    middleware::get_request_id,
    models::{
        domain::{Persona, Turn},
        dto::{
            request::ChatRequestDto,
            response::{PersonaDto, ReplyResponse},
        },
    },
};

#[get("/api/personas")]
pub async fn list_personas() -> HttpResponse {
    let personas: Vec<PersonaDto> = Persona::ALL.into_iter().map(PersonaDto::from).collect();
    HttpResponse::Ok().json(personas)
}

/// Replies to the last turn of the supplied transcript. Provider failures
/// come back as a normal assistant turn carrying the error text.
#[post("/api/chat")]
pub async fn chat(
    req: HttpRequest,
    state: web::Data<AppState>,
    request: web::Json<ChatRequestDto>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let document = state
        .document_service
        .get_document(&state.config.document_path)
        .await
        .ok_or_else(|| AppError::Unavailable("document text is not available".to_string()))?;

    let persona = request.persona.clone();
    let turns = request.into_turns();
    log::info!(
        "[{}] chat turn for persona '{}' with {} messages",
        get_request_id(&req).unwrap_or_else(|| "-".to_string()),
        persona,
        turns.len()
    );
    let content = state
        .conversation_service
        .reply(&turns, &persona, &document.text)
        .await;

    let reply: ReplyResponse = Turn::assistant(content);
    Ok(HttpResponse::Ok().json(reply))
}
