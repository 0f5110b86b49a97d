use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use asthi_core::models::chat::ChatTurn;
use asthi_core::models::language::Language;
use asthi_proxy::chat::chat_completion;

use crate::error::AiError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<ChatTurn>,
    #[serde(default)]
    pub language: Language,
}

#[derive(Serialize)]
pub struct ChatResponse {
    pub response: String,
}

/// Forward the full transcript to the AI gateway.
pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AiError> {
    let Json(req) = payload?;
    let response =
        chat_completion(state.transport.as_ref(), &state.proxy, &req.messages, req.language)
            .await?;
    Ok(Json(ChatResponse { response }))
}
