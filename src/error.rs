use thiserror::Error;

/// Failures at the pipeline boundary (annotator, knowledge base).
///
/// Extraction anomalies (no action, ambiguity, incompatibility) are NOT errors:
/// they travel back as result tokens. Only a sentence that could not be analyzed
/// at all ends up here.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Annotator unavailable: {0}")]
    Annotator(String),

    #[error("Knowledge base unavailable: {0}")]
    KnowledgeBase(String),

    #[error("Malformed pipeline data: {0}")]
    Malformed(String),

    #[error("Unknown action code: {0}")]
    UnknownAction(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type PipelineResult<T> = Result<T, PipelineError>;
