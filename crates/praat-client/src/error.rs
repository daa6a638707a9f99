//! Error types for Praat service operations.

use thiserror::Error;

/// Errors that can occur while talking to the Praat service.
#[derive(Debug, Error)]
pub enum PraatError {
    /// A resource fetch or dispatch returned a non-200 status.
    #[error("Transport error: HTTP status {status}")]
    Transport { status: u16 },

    /// Connection, DNS or I/O failure before a status was received.
    #[error("Network error: {0}")]
    Network(String),

    /// The response was transported fine but does not have the expected shape.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The service answered with text where audio or timestamps were expected.
    /// The payload is surfaced verbatim; the service has no error codes.
    #[error("Service reported an error: {0:?}")]
    ServiceReported(String),

    /// A required field was missing or empty and the request was not sent.
    #[error("Missing required field: {0}")]
    MissingField(String),

    /// Unknown transfer option name.
    #[error("Invalid transfer option: {0}")]
    InvalidOption(String),

    /// The word store does not know this user.
    #[error("Unknown user: {0}")]
    UnknownUser(String),

    /// The user has never recorded this word.
    #[error("No recording of word: {0}")]
    WordNotFound(String),

    /// The service has a record of the word but lost its audio file.
    #[error("Recording of word {0} exists but its audio is missing")]
    AudioMissing(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A blocking task or loader thread did not complete.
    #[error("Task failed: {0}")]
    TaskJoin(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PraatError>;

impl PraatError {
    /// The HTTP status carried by a transport error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            PraatError::Transport { status } => Some(*status),
            _ => None,
        }
    }

    /// Returns true if the failure was reported by the service itself rather
    /// than by the network or local validation.
    pub fn is_service_error(&self) -> bool {
        matches!(
            self,
            PraatError::ServiceReported(_)
                | PraatError::UnknownUser(_)
                | PraatError::WordNotFound(_)
                | PraatError::AudioMissing(_)
        )
    }
}

impl From<std::io::Error> for PraatError {
    fn from(err: std::io::Error) -> Self {
        PraatError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for PraatError {
    fn from(err: serde_json::Error) -> Self {
        PraatError::Config(err.to_string())
    }
}
