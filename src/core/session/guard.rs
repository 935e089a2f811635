//! Access guard decision logic
//!
//! The rendering side lives in `ui::auth::ProtectedRoute`; this module decides
//! what it shows for a given session state.

use super::navigation::ReturnPath;
use super::store::{SessionChange, SessionState};

/// What a guarded view renders right now
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    /// Session not resolved yet: show the placeholder
    Placeholder,
    /// Resolved without identity: render nothing, and navigate to `redirect_to` if set
    Empty { redirect_to: Option<String> },
    /// Resolved with identity: render the protected content
    Content,
}

/// Per-mount guard state.
///
/// The redirect fires at most once per unauthenticated resolution. Seeing an
/// authenticated state re-arms it, so a session that later expires redirects
/// again. An explicit sign-out never redirects: the store has already sent
/// the user home.
#[derive(Debug, Clone)]
pub struct AccessGuard {
    login_path: String,
    redirected: bool,
}

impl AccessGuard {
    pub fn new(login_path: impl Into<String>) -> Self {
        Self {
            login_path: login_path.into(),
            redirected: false,
        }
    }

    /// Evaluate against the current state, its cause and the full current location
    pub fn evaluate(
        &mut self,
        state: &SessionState,
        change: SessionChange,
        location: &str,
    ) -> GuardOutcome {
        match state {
            SessionState::Initializing => GuardOutcome::Placeholder,
            SessionState::Authenticated(_) => {
                self.redirected = false;
                GuardOutcome::Content
            }
            SessionState::Anonymous if self.redirected => GuardOutcome::Empty { redirect_to: None },
            SessionState::Anonymous if change == SessionChange::SignedOut => {
                self.redirected = true;
                GuardOutcome::Empty { redirect_to: None }
            }
            SessionState::Anonymous => {
                self.redirected = true;
                let target = ReturnPath::new(location);
                GuardOutcome::Empty {
                    redirect_to: Some(target.login_url(&self.login_path)),
                }
            }
        }
    }
}
