use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("form validation failed: {0}")]
    Form(#[from] validator::ValidationErrors),
    #[error("invariant violated: {0}")]
    Invariant(String),
    #[error("not found")]
    NotFound,
}
