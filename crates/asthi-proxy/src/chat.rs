//! Chat completion through the AI gateway.
//!
//! The gateway speaks the OpenAI chat-completions dialect. It is stateless:
//! each call carries the whole transcript, prefixed with a system prompt in
//! the caller's language.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use asthi_core::models::chat::ChatTurn;
use asthi_core::models::language::Language;

use crate::config::{require, ProxyConfig, LOVABLE_API_KEY};
use crate::error::ProxyError;
use crate::transport::{Auth, RequestBody, Transport, VendorRequest};

pub const SERVICE: &str = "ai-gateway";
pub const CHAT_COMPLETIONS_URL: &str = "https://ai.gateway.lovable.dev/v1/chat/completions";
pub const CHAT_MODEL: &str = "google/gemini-2.5-flash";

pub fn system_prompt(language: Language) -> &'static str {
    match language {
        Language::En => {
            "You are Asthi Bot, a helpful bone health assistant. Keep responses concise. \
             Do not use special characters."
        }
        Language::Hi => {
            "आप अस्थि बॉट हैं, एक सहायक हड्डी स्वास्थ्य सहायक। संक्षिप्त और स्पष्ट उत्तर दें। \
             कोई विशेष वर्ण न उपयोग करें।"
        }
    }
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
}

#[derive(Serialize)]
struct WireMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Send the transcript and return the assistant's reply.
///
/// An answer without any choice comes back as an empty string. HTTP 429
/// from the gateway maps to [`ProxyError::RateLimited`].
pub async fn chat_completion(
    transport: &dyn Transport,
    config: &ProxyConfig,
    messages: &[ChatTurn],
    language: Language,
) -> Result<String, ProxyError> {
    let key = require(&config.ai_gateway_key, LOVABLE_API_KEY)?;

    let mut wire = Vec::with_capacity(messages.len() + 1);
    wire.push(WireMessage {
        role: "system",
        content: system_prompt(language),
    });
    wire.extend(messages.iter().map(|m| WireMessage {
        role: m.role.as_str(),
        content: &m.content,
    }));

    let body = serde_json::to_value(CompletionRequest {
        model: CHAT_MODEL,
        messages: wire,
    })
    .map_err(|e| ProxyError::InvalidInput(e.to_string()))?;

    let response = transport
        .send(VendorRequest {
            service: SERVICE,
            url: CHAT_COMPLETIONS_URL.to_string(),
            auth: Auth::Bearer(key.clone()),
            body: RequestBody::Json(body),
        })
        .await?;

    if !response.is_success() {
        warn!(status = response.status, "chat completion rejected");
        return Err(response.into_error(SERVICE));
    }

    let parsed: CompletionResponse = response.json(SERVICE)?;
    let reply = parsed
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message)
        .and_then(|m| m.content)
        .unwrap_or_default();

    info!(
        turns = messages.len(),
        language = %language,
        reply_chars = reply.chars().count(),
        "chat completion"
    );

    Ok(reply)
}
