/// Domain error taxonomy, mapped to HTTP statuses at the API boundary.
///
/// `ServerConfig` and `Internal` are logged server-side and reduced to a
/// generic message before they reach a client.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Server configuration error: {0}")]
    ServerConfig(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
