use thiserror::Error;

/// Errors emitted while rendering synthesized data.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
