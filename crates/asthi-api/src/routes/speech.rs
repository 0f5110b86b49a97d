use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use asthi_core::models::language::Language;
use asthi_proxy::speech;

use crate::error::AiError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct SpeechToTextRequest {
    #[serde(default)]
    pub audio: String,
    #[serde(default)]
    pub language: Language,
}

#[derive(Serialize)]
pub struct SpeechToTextResponse {
    pub text: String,
}

#[derive(Deserialize)]
pub struct TextToSpeechRequest {
    #[serde(default)]
    pub text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextToSpeechResponse {
    pub audio_content: String,
}

pub async fn speech_to_text(
    State(state): State<AppState>,
    payload: Result<Json<SpeechToTextRequest>, JsonRejection>,
) -> Result<Json<SpeechToTextResponse>, AiError> {
    let Json(req) = payload?;
    let text =
        speech::speech_to_text(state.transport.as_ref(), &state.proxy, &req.audio, req.language)
            .await?;
    Ok(Json(SpeechToTextResponse { text }))
}

pub async fn text_to_speech(
    State(state): State<AppState>,
    payload: Result<Json<TextToSpeechRequest>, JsonRejection>,
) -> Result<Json<TextToSpeechResponse>, AiError> {
    let Json(req) = payload?;
    let audio_content =
        speech::text_to_speech(state.transport.as_ref(), &state.proxy, &req.text).await?;
    Ok(Json(TextToSpeechResponse { audio_content }))
}
