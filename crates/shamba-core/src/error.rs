use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ShambaError {
    #[error("failed to load dataset from {}: {reason}", path.display())]
    DatasetLoad { path: PathBuf, reason: String },

    #[error("unknown crop '{0}'. Run `shamba crops list` to see the crops with dedicated rules.")]
    UnknownCrop(String),

    #[error("unknown category '{0}' (expected one of: Highly Recommended, Recommended, Acceptable, Not Recommended)")]
    UnknownCategory(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
