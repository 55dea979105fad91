/// Errors that can occur while talking to the VLC HTTP interface
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum TransportError {
    /// The player rejected the configured password (HTTP 401)
    #[error("Unauthorized")]
    Unauthorized,

    /// The player answered with a non-200 status
    #[error("{0}")]
    Remote(String),

    /// The request never got an HTTP answer: refused, DNS failure, timeout
    #[error("{0}")]
    Network(String),

    /// The body could not be understood as the expected snapshot
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl TransportError {
    /// Builds a `MalformedResponse` from any parse error.
    pub fn malformed(error: impl std::fmt::Display) -> Self {
        TransportError::MalformedResponse(error.to_string())
    }
}
