use thiserror::Error;

/// Application-specific errors for the CLI
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Classification disagrees with the traced path: stack gave {stack}, trace gave {trace}")]
    TraceMismatch { stack: u8, trace: u8 },

    #[error("JSON output error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Classifier error: {0}")]
    Classifier(#[from] waterclass::Error),
}
