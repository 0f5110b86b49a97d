use thiserror::Error;

use asthi_core::error::CoreError;

/// Failure of a single proxied vendor call.
///
/// No variant ever carries a credential value; `Configuration` names the
/// missing environment variable only.
#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("{0} is not configured")]
    Configuration(&'static str),

    #[error("{0}")]
    InvalidInput(String),

    #[error("Rate limit exceeded")]
    RateLimited { service: &'static str },

    #[error("{service} returned HTTP {status}")]
    Vendor {
        service: &'static str,
        status: u16,
        detail: Option<String>,
    },

    #[error("{service} request failed: {message}")]
    Network {
        service: &'static str,
        message: String,
    },

    #[error("template rendering failed: {0}")]
    Template(String),

    #[error("unexpected {service} response: {message}")]
    ResponseParse {
        service: &'static str,
        message: String,
    },
}

impl ProxyError {
    /// The vendor's own explanation of a rejected request, if it sent one.
    pub fn vendor_detail(&self) -> Option<&str> {
        match self {
            ProxyError::Vendor { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }
}

impl From<CoreError> for ProxyError {
    fn from(e: CoreError) -> Self {
        ProxyError::InvalidInput(e.to_string())
    }
}

impl From<tera::Error> for ProxyError {
    fn from(e: tera::Error) -> Self {
        ProxyError::Template(e.to_string())
    }
}
