//! Speech-to-text and text-to-speech through ElevenLabs.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

use asthi_core::models::language::Language;

use crate::config::{require, ProxyConfig, ELEVENLABS_API_KEY};
use crate::error::ProxyError;
use crate::transport::{Auth, FormPart, RequestBody, Transport, VendorRequest};

pub const SERVICE: &str = "elevenlabs";
pub const SPEECH_TO_TEXT_URL: &str = "https://api.elevenlabs.io/v1/speech-to-text";
pub const TEXT_TO_SPEECH_URL: &str = "https://api.elevenlabs.io/v1/text-to-speech";
pub const STT_MODEL: &str = "scribe_v1";
pub const TTS_MODEL: &str = "eleven_multilingual_v2";
pub const VOICE_ID: &str = "mActWQg9kibLro6Z2ouY";

const API_KEY_HEADER: &str = "xi-api-key";

#[derive(Deserialize)]
struct TranscriptionResponse {
    #[serde(default)]
    text: Option<String>,
}

/// Transcribe a base64-encoded WebM recording.
///
/// Fails before any network call when the key is missing or the audio is
/// empty. Silence transcribes to an empty string.
pub async fn speech_to_text(
    transport: &dyn Transport,
    config: &ProxyConfig,
    audio_base64: &str,
    language: Language,
) -> Result<String, ProxyError> {
    let key = require(&config.elevenlabs_key, ELEVENLABS_API_KEY)?;

    if audio_base64.trim().is_empty() {
        return Err(ProxyError::InvalidInput("Missing required data: audio".to_string()));
    }

    let audio = STANDARD
        .decode(audio_base64.trim())
        .map_err(|e| ProxyError::InvalidInput(format!("audio is not valid base64: {e}")))?;

    if audio.is_empty() {
        return Err(ProxyError::InvalidInput("Missing required data: audio".to_string()));
    }

    let audio_bytes = audio.len();
    let response = transport
        .send(VendorRequest {
            service: SERVICE,
            url: SPEECH_TO_TEXT_URL.to_string(),
            auth: Auth::Header {
                name: API_KEY_HEADER,
                value: key.clone(),
            },
            body: RequestBody::Multipart(vec![
                FormPart::File {
                    name: "file",
                    filename: "audio.webm",
                    mime: "audio/webm",
                    bytes: audio,
                },
                FormPart::Text {
                    name: "model_id",
                    value: STT_MODEL.to_string(),
                },
                FormPart::Text {
                    name: "language_code",
                    value: language.iso639_3().to_string(),
                },
            ]),
        })
        .await?;

    if !response.is_success() {
        warn!(status = response.status, "speech-to-text rejected");
        return Err(response.into_error(SERVICE));
    }

    let parsed: TranscriptionResponse = response.json(SERVICE)?;
    let text = parsed.text.unwrap_or_default();

    info!(audio_bytes, language = %language, "speech transcribed");

    Ok(text)
}

/// Synthesize speech and return the audio as base64.
///
/// Fails before any network call when the key is missing or the text is
/// blank.
pub async fn text_to_speech(
    transport: &dyn Transport,
    config: &ProxyConfig,
    text: &str,
) -> Result<String, ProxyError> {
    let key = require(&config.elevenlabs_key, ELEVENLABS_API_KEY)?;

    if text.trim().is_empty() {
        return Err(ProxyError::InvalidInput("Missing required data: text".to_string()));
    }

    let body = json!({
        "text": text,
        "model_id": TTS_MODEL,
        "voice_settings": {
            "stability": 0.5,
            "similarity_boost": 0.75,
        },
    });

    let response = transport
        .send(VendorRequest {
            service: SERVICE,
            url: format!("{TEXT_TO_SPEECH_URL}/{VOICE_ID}"),
            auth: Auth::Header {
                name: API_KEY_HEADER,
                value: key.clone(),
            },
            body: RequestBody::Json(body),
        })
        .await?;

    if !response.is_success() {
        warn!(status = response.status, "text-to-speech rejected");
        return Err(response.into_error(SERVICE));
    }

    info!(
        text_chars = text.chars().count(),
        audio_bytes = response.body.len(),
        "speech synthesized"
    );

    Ok(STANDARD.encode(&response.body))
}
