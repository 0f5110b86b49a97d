use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::config::Secret;
use crate::error::ProxyError;

/// Outbound HTTP seam. Every vendor call goes through exactly one `send`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: VendorRequest) -> Result<VendorResponse, ProxyError>;
}

/// A single POST to a vendor endpoint.
#[derive(Debug, Clone)]
pub struct VendorRequest {
    /// Short vendor label used in errors and logs, e.g. `"ai-gateway"`.
    pub service: &'static str,
    pub url: String,
    pub auth: Auth,
    pub body: RequestBody,
}

#[derive(Debug, Clone)]
pub enum Auth {
    Bearer(Secret),
    Basic { username: String, password: Secret },
    Header { name: &'static str, value: Secret },
}

#[derive(Debug, Clone)]
pub enum RequestBody {
    Json(serde_json::Value),
    Form(Vec<(&'static str, String)>),
    Multipart(Vec<FormPart>),
}

#[derive(Debug, Clone)]
pub enum FormPart {
    Text {
        name: &'static str,
        value: String,
    },
    File {
        name: &'static str,
        filename: &'static str,
        mime: &'static str,
        bytes: Vec<u8>,
    },
}

#[derive(Debug, Clone)]
pub struct VendorResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl VendorResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self, service: &'static str) -> Result<T, ProxyError> {
        serde_json::from_slice(&self.body).map_err(|e| ProxyError::ResponseParse {
            service,
            message: e.to_string(),
        })
    }

    /// Pull a human-readable message out of a vendor error body.
    ///
    /// Understands the common shapes: `{"message"}`, `{"detail"}`,
    /// `{"error": "..."}`, `{"error": {"message"}}` and
    /// `{"errors": [{"message"}]}`.
    pub fn error_detail(&self) -> Option<String> {
        let value: serde_json::Value = serde_json::from_slice(&self.body).ok()?;
        let as_text = |v: &serde_json::Value| v.as_str().map(str::to_string);

        value
            .get("message")
            .and_then(as_text)
            .or_else(|| value.get("detail").and_then(as_text))
            .or_else(|| value.get("error").and_then(as_text))
            .or_else(|| value.pointer("/error/message").and_then(as_text))
            .or_else(|| value.pointer("/errors/0/message").and_then(as_text))
            .filter(|s| !s.is_empty())
    }

    /// Turn a non-2xx response into the matching error.
    pub fn into_error(self, service: &'static str) -> ProxyError {
        if self.status == 429 {
            return ProxyError::RateLimited { service };
        }
        ProxyError::Vendor {
            service,
            status: self.status,
            detail: self.error_detail(),
        }
    }
}

/// `reqwest`-backed transport used in production.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self, ProxyError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProxyError::Network {
                service: "http-client",
                message: e.to_string(),
            })?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: VendorRequest) -> Result<VendorResponse, ProxyError> {
        let service = request.service;
        // Vendor URLs can embed account identifiers; keep them out of errors.
        let network = |e: reqwest::Error| ProxyError::Network {
            service,
            message: if e.is_timeout() {
                "request timed out".to_string()
            } else {
                e.without_url().to_string()
            },
        };

        let mut builder = self.client.post(&request.url);

        builder = match &request.auth {
            Auth::Bearer(token) => builder.bearer_auth(token.expose()),
            Auth::Basic { username, password } => {
                builder.basic_auth(username, Some(password.expose()))
            }
            Auth::Header { name, value } => builder.header(*name, value.expose()),
        };

        builder = match request.body {
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Form(fields) => builder.form(&fields),
            RequestBody::Multipart(parts) => {
                let mut form = reqwest::multipart::Form::new();
                for part in parts {
                    form = match part {
                        FormPart::Text { name, value } => form.text(name, value),
                        FormPart::File {
                            name,
                            filename,
                            mime,
                            bytes,
                        } => {
                            let file = reqwest::multipart::Part::bytes(bytes)
                                .file_name(filename)
                                .mime_str(mime)
                                .map_err(network)?;
                            form.part(name, file)
                        }
                    };
                }
                builder.multipart(form)
            }
        };

        let response = builder.send().await.map_err(network)?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(network)?.to_vec();

        Ok(VendorResponse { status, body })
    }
}
