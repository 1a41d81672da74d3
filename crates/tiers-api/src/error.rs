use thiserror::Error;

/// Failures from the ranking-service client.
///
/// Transport failures are fatal to the whole operation that triggered them;
/// nothing here is retried.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network failure, timeout, or non-success HTTP status.
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
    /// A response body that should have decoded but did not.
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}
