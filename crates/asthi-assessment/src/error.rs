use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssessmentError {
    #[error("unknown risk phase: {0} (expected 1, 2 or 3)")]
    UnknownTier(String),
}
