use crate::content::FieldIssue;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error("Request error: {0}")]
    Request(String),

    #[error("Validation failed: {}", summarize(.0))]
    Validation(Vec<FieldIssue>),

    #[error("Invalid field: {0}")]
    InvalidField(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unsupported operation: {0}")]
    Unsupported(String),

    #[error("Save already in progress")]
    Busy,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

fn summarize(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(|issue| format!("{} ({})", issue.message, issue.field))
        .collect::<Vec<_>>()
        .join("; ")
}

pub type Result<T> = std::result::Result<T, ConsoleError>;

impl From<reqwest::Error> for ConsoleError {
    fn from(err: reqwest::Error) -> Self {
        ConsoleError::Request(format!("Network error: {}", err))
    }
}

// Lets front ends surface the message directly
impl serde::Serialize for ConsoleError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
