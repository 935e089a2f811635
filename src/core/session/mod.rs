//! Client-side session subsystem
//!
//! Layers, leaves first:
//! - [`transport`]: attaches the ambient credential, handles 401 uniformly
//! - [`store`]: current identity plus login/signup/logout/refresh
//! - [`guard`]: gate for protected views

mod error;
#[cfg(feature = "hydrate")]
mod fetch;
pub mod guard;
pub mod http;
#[cfg(feature = "ssr")]
mod native;
pub mod navigation;
pub mod store;
#[cfg(test)]
pub(crate) mod testing;
pub mod transport;

pub use error::{SessionError, TransportError};
#[cfg(feature = "hydrate")]
pub use fetch::FetchBackend;
pub use guard::{AccessGuard, GuardOutcome};
pub use http::{HttpBackend, HttpMethod, HttpRequest, HttpResponse, RequestBody};
#[cfg(feature = "ssr")]
pub use native::ReqwestBackend;
pub use navigation::{Navigator, ReturnPath};
pub use store::{
    Identity, LoginRequest, SessionChange, SessionRoutes, SessionState, SessionStatus,
    SessionStore, SharedSessionStore, SignupRequest,
};
pub use transport::{AuthRequirement, SessionTransport};
