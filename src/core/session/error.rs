//! Error types for the session subsystem

use thiserror::Error;

use super::navigation::ReturnPath;

/// Failures below the HTTP status line: the request never produced a usable response
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The service could not be reached (DNS, connection refused, CORS, offline)
    #[error("network error: {0}")]
    Network(String),
    /// The request payload could not be serialized
    #[error("could not encode request: {0}")]
    Encode(String),
    /// A response arrived but its body could not be read or decoded
    #[error("invalid response body: {0}")]
    Decode(String),
}

/// Errors surfaced by the session transport and session store
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// A required call was rejected with 401; the browser is being sent to sign-in
    #[error("authentication required")]
    AuthenticationRequired { return_to: ReturnPath },
    /// The identity service rejected the credentials
    #[error("{0}")]
    AuthenticationFailed(String),
    /// The identity service rejected the registration
    #[error("{0}")]
    RegistrationFailed(String),
    /// Credentials were accepted but the identity could not be confirmed
    #[error("signed in, but the account could not be loaded")]
    SessionInconsistent,
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl SessionError {
    /// Message shown in a form's `submit` slot
    pub fn user_message(&self) -> String {
        match self {
            SessionError::AuthenticationFailed(message)
            | SessionError::RegistrationFailed(message) => message.clone(),
            SessionError::SessionInconsistent => {
                "Signed in, but your account details could not be loaded. Please try again."
                    .to_string()
            }
            SessionError::AuthenticationRequired { .. } => {
                "Your session has expired. Please sign in again.".to_string()
            }
            SessionError::Transport(TransportError::Network(_)) => {
                "Could not reach the server. Please try again.".to_string()
            }
            SessionError::Transport(TransportError::Encode(_) | TransportError::Decode(_)) => {
                "The server sent an unexpected response. Please try again.".to_string()
            }
        }
    }

    /// True when the caller should stay silent because a redirect is under way
    pub fn is_redirect(&self) -> bool {
        matches!(self, SessionError::AuthenticationRequired { .. })
    }
}
