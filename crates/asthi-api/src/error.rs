use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use asthi_assessment::error::AssessmentError;
use asthi_proxy::error::ProxyError;

/// Error type for plain API routes (health, assessment).
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

impl From<AssessmentError> for ApiError {
    fn from(e: AssessmentError) -> Self {
        ApiError::NotFound(e.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self {
        ApiError::BadRequest(e.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(e: QueryRejection) -> Self {
        ApiError::BadRequest(e.body_text())
    }
}

/// Error for the AI routes (chat, speech). Body is `{"error": ...}`;
/// status is 429 for vendor throttling, 400 for an unreadable request
/// body, and 500 for everything else.
#[derive(Debug)]
pub enum AiError {
    Proxy(ProxyError),
    Body(String),
}

impl IntoResponse for AiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AiError::Body(msg) => (StatusCode::BAD_REQUEST, msg),
            AiError::Proxy(e @ ProxyError::RateLimited { .. }) => {
                tracing::warn!(error = %e, "vendor rate limit");
                (StatusCode::TOO_MANY_REQUESTS, e.to_string())
            }
            AiError::Proxy(e) => {
                tracing::error!(error = %e, "ai proxy call failed");
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

impl From<ProxyError> for AiError {
    fn from(e: ProxyError) -> Self {
        AiError::Proxy(e)
    }
}

impl From<JsonRejection> for AiError {
    fn from(e: JsonRejection) -> Self {
        AiError::Body(e.body_text())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Sms,
    Email,
}

impl Channel {
    fn label(self) -> &'static str {
        match self {
            Channel::Sms => "SMS",
            Channel::Email => "Email",
        }
    }

    fn noun(self) -> &'static str {
        match self {
            Channel::Sms => "SMS",
            Channel::Email => "email",
        }
    }
}

/// Error for the notification routes. Body is `{"detail": ...}`.
#[derive(Debug)]
pub struct NotifyError {
    pub channel: Channel,
    pub kind: NotifyErrorKind,
}

#[derive(Debug)]
pub enum NotifyErrorKind {
    Proxy(ProxyError),
    Body(String),
}

#[derive(Serialize)]
struct DetailBody {
    detail: String,
}

impl NotifyError {
    pub fn sms(e: ProxyError) -> Self {
        Self {
            channel: Channel::Sms,
            kind: NotifyErrorKind::Proxy(e),
        }
    }

    pub fn email(e: ProxyError) -> Self {
        Self {
            channel: Channel::Email,
            kind: NotifyErrorKind::Proxy(e),
        }
    }

    pub fn body(channel: Channel, e: JsonRejection) -> Self {
        Self {
            channel,
            kind: NotifyErrorKind::Body(e.body_text()),
        }
    }
}

impl IntoResponse for NotifyError {
    fn into_response(self) -> Response {
        let channel = self.channel;
        let (status, detail) = match self.kind {
            NotifyErrorKind::Body(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            NotifyErrorKind::Proxy(ProxyError::InvalidInput(msg)) => (StatusCode::BAD_REQUEST, msg),
            NotifyErrorKind::Proxy(e @ ProxyError::Vendor { .. }) => {
                let detail = e.vendor_detail().map(str::to_string).unwrap_or_else(|| {
                    match channel {
                        Channel::Sms => "Failed to send SMS. Please check phone number.".to_string(),
                        Channel::Email => "Failed to send email. Please try again.".to_string(),
                    }
                });
                (StatusCode::BAD_REQUEST, detail)
            }
            NotifyErrorKind::Proxy(e @ ProxyError::RateLimited { .. }) => {
                (StatusCode::TOO_MANY_REQUESTS, e.to_string())
            }
            NotifyErrorKind::Proxy(ProxyError::Configuration(name)) => {
                tracing::error!(missing = name, channel = channel.label(), "notification service not configured");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("{} service configuration error", channel.label()),
                )
            }
            NotifyErrorKind::Proxy(e) => {
                tracing::error!(error = %e, channel = channel.label(), "notification dispatch failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Failed to send {}. Please try again.", channel.noun()),
                )
            }
        };

        (status, Json(DetailBody { detail })).into_response()
    }
}
