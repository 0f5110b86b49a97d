use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("{0}")]
    InvalidPhone(String),

    #[error("Invalid email format")]
    InvalidEmail,
}
