use thiserror::Error;

/// Multipart codec Error
#[derive(Debug, Error)]
pub enum Error {
    /// Part content has no content disposition line
    #[error("part has no content disposition line")]
    MissingDisposition,

    /// Content disposition carries no `name` parameter
    #[error("content disposition carries no `name` parameter")]
    MissingName,

    /// No boundary parameter in a content type value
    #[error("no multipart boundary in content type `{0}`")]
    MissingBoundary(String),

    /// JSON encoding failed
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Request assembly failed
    #[error(transparent)]
    Http(#[from] http::Error),
}
