/// Failures surfaced by the REST client and session.
///
/// `Validation` is raised locally before any request; `NotAuthenticated`
/// covers both a missing token and a 401/403 from the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    Validation(String),
    NotAuthenticated,
    Api { status: u16, message: String },
    Transport(String),
    Decode(String),
    /// Session file could not be written or removed.
    Storage(String),
}

impl ClientError {
    /// Backend unreachable or misbehaving, as opposed to a local or auth problem.
    pub fn is_remote_failure(&self) -> bool {
        matches!(
            self,
            ClientError::Api { .. } | ClientError::Transport(_) | ClientError::Decode(_)
        )
    }
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientError::Validation(msg) => write!(f, "validation error: {msg}"),
            ClientError::NotAuthenticated => write!(f, "not authenticated: log in first"),
            ClientError::Api { status, message } => write!(f, "api error ({status}): {message}"),
            ClientError::Transport(msg) => write!(f, "transport error: {msg}"),
            ClientError::Decode(msg) => write!(f, "decode error: {msg}"),
            ClientError::Storage(msg) => write!(f, "session storage error: {msg}"),
        }
    }
}

impl std::error::Error for ClientError {}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ClientError::Decode(e.to_string())
        } else {
            ClientError::Transport(e.to_string())
        }
    }
}
