use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RescoreError {
    #[error("input not found: {0}")]
    InputNotFound(String),

    #[error("input format error in {input}: {detail}")]
    InputFormat { input: String, detail: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RescoreError {
    pub fn input_format(path: &Path, detail: impl Into<String>) -> Self {
        Self::InputFormat {
            input: path.display().to_string(),
            detail: detail.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RescoreError>;
