use thiserror::Error;

/// A link parameter could not be decoded. Callers treat the value as absent.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid base64 in link parameter: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("link parameter is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Writing a selection to the log failed. The confirmed view stays put.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistenceError {
    #[error("selection log unreachable: {0}")]
    Unreachable(String),

    #[error("Unable to save selection ({0})")]
    Status(u16),
}

/// Reading the selection log failed. The previous list stays on screen.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("selection log unreachable: {0}")]
    Unreachable(String),

    #[error("Unable to load dashboard ({0})")]
    Status(u16),

    #[error("Unreadable dashboard response: {0}")]
    InvalidBody(String),
}

/// Host form input rejected before any link is generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please type a name so we can personalize the invite.")]
    MissingName,

    #[error("Add a valid email so we can send you the response.")]
    InvalidEmail,
}

#[derive(Debug, Clone, Error)]
#[error("clipboard write failed: {0}")]
pub struct ClipboardError(pub String);
