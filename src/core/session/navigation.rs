//! Navigation seam and the pending navigation target
//!
//! The session subsystem never touches `window.location` or the router directly.
//! It goes through [`Navigator`], which the browser implements with the real
//! location and router, and tests implement with a recorder.

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Query parameter carrying the return path on the sign-in entry point
pub const NEXT_PARAM: &str = "next";

/// Where the user is and how to move them somewhere else
pub trait Navigator {
    /// Current full path: pathname, query string and fragment
    fn current_location(&self) -> String;

    /// In-app navigation (router push)
    fn navigate(&self, path: &str);

    /// Hard redirect of the browsing context
    fn redirect(&self, url: &str);
}

impl<T: Navigator + ?Sized> Navigator for std::sync::Arc<T> {
    fn current_location(&self) -> String {
        self.as_ref().current_location()
    }

    fn navigate(&self, path: &str) {
        self.as_ref().navigate(path)
    }

    fn redirect(&self, url: &str) {
        self.as_ref().redirect(url)
    }
}

/// The destination a user was denied, restored after signing in
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub struct ReturnPath(String);

impl ReturnPath {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// Capture the navigator's current location
    pub fn capture<N: Navigator + ?Sized>(navigator: &N) -> Self {
        Self(navigator.current_location())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Sign-in URL with this path encoded under `next`
    pub fn login_url(&self, login_path: &str) -> String {
        format!("{}?{}={}", login_path, NEXT_PARAM, encode_component(&self.0))
    }

    /// Accept the decoded `next` value of the sign-in page.
    ///
    /// Anything that is not a same-origin absolute path is dropped so the
    /// parameter cannot be used as an open redirect.
    pub fn from_next(next: &str) -> Option<Self> {
        is_local_path(next).then(|| Self(next.to_string()))
    }
}

/// `/foo` is local, `//host/foo`, `/\host` and `https://host` are not
pub fn is_local_path(path: &str) -> bool {
    path.starts_with('/') && !path.starts_with("//") && !path.starts_with("/\\")
}

/// Percent-encode with `encodeURIComponent` semantics.
///
/// Only used to build the `next` value of the sign-in URL; reading it back is
/// the router's job.
pub fn encode_component(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => out.push(byte as char),
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}
