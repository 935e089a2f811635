//! Session store: the single source of truth for who is signed in
//!
//! State only changes through `initialize`, `signup`, `login`, `logout` and
//! `refresh`. Each of them settles its network call first and then replaces
//! the whole state in one step, so observers never see a half-updated session.

use std::future::Future;
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

use super::error::SessionError;
use super::http::HttpBackend;
use super::navigation::{Navigator, ReturnPath};
use super::transport::{AuthRequirement, SessionTransport};

/// Authenticated user's profile record as returned by `/auth/me`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub full_name: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

fn default_active() -> bool {
    true
}

impl Identity {
    pub fn display_name(&self) -> &str {
        if self.full_name.trim().is_empty() {
            &self.username
        } else {
            &self.full_name
        }
    }

    /// Up to two initials for avatars
    pub fn initials(&self) -> String {
        let from_name: String = self
            .full_name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .take(2)
            .flat_map(char::to_uppercase)
            .collect();
        if !from_name.is_empty() {
            return from_name;
        }
        self.email
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_else(|| "U".to_string())
    }
}

/// Coarse status, `Initializing` only until the first credential check settles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Initializing,
    Resolved,
}

/// Session state; the identity is either complete or absent
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    /// First credential check still in flight
    #[default]
    Initializing,
    /// Resolved, nobody signed in
    Anonymous,
    /// Resolved, signed in
    Authenticated(Identity),
}

impl SessionState {
    pub fn status(&self) -> SessionStatus {
        match self {
            SessionState::Initializing => SessionStatus::Initializing,
            _ => SessionStatus::Resolved,
        }
    }

    pub fn identity(&self) -> Option<&Identity> {
        match self {
            SessionState::Authenticated(identity) => Some(identity),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }

    fn from_identity(identity: Option<Identity>) -> Self {
        match identity {
            Some(identity) => SessionState::Authenticated(identity),
            None => SessionState::Anonymous,
        }
    }
}

/// Why the state was last replaced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionChange {
    /// Credential check by `initialize` or `refresh`
    #[default]
    Resolved,
    /// `login` or `signup` succeeded
    SignedIn,
    /// Explicit `logout`
    SignedOut,
}

/// Registration payload for `POST /auth/signup`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub password: String,
}

/// Credentials for `POST /auth/login`; `username` may also hold an email
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
struct SignupResponse {
    user: Identity,
    /// Issued token; the cookie carries the session instead
    #[serde(default)]
    #[allow(dead_code)]
    token: Option<serde_json::Value>,
}

/// Client routes and remote endpoints the store works with
#[derive(Debug, Clone, PartialEq)]
pub struct SessionRoutes {
    /// Sign-in entry point
    pub login: String,
    pub signup: String,
    pub home: String,
    /// Default destination after signing in
    pub dashboard: String,
    pub me_endpoint: String,
    pub login_endpoint: String,
    pub signup_endpoint: String,
    /// Server-side revocation endpoint, called best-effort on logout
    pub revoke_endpoint: Option<String>,
}

impl Default for SessionRoutes {
    fn default() -> Self {
        Self {
            login: "/auth/login".to_string(),
            signup: "/auth/signup".to_string(),
            home: "/".to_string(),
            dashboard: "/dashboard".to_string(),
            me_endpoint: "/auth/me".to_string(),
            login_endpoint: "/auth/login".to_string(),
            signup_endpoint: "/auth/signup".to_string(),
            revoke_endpoint: None,
        }
    }
}

type Subscriber = Box<dyn Fn(&SessionState, SessionChange) + Send + Sync>;

pub struct SessionStore<B, N> {
    transport: SessionTransport<B, N>,
    routes: SessionRoutes,
    state: RwLock<(SessionState, SessionChange)>,
    subscribers: RwLock<Vec<Subscriber>>,
}

impl<B: HttpBackend, N: Navigator> SessionStore<B, N> {
    pub fn new(backend: B, navigator: N, routes: SessionRoutes) -> Self {
        Self {
            transport: SessionTransport::new(backend, navigator, routes.login.clone()),
            routes,
            state: RwLock::new((SessionState::Initializing, SessionChange::default())),
            subscribers: RwLock::new(Vec::new()),
        }
    }

    /// Transport sharing this store's backend and navigator, for other API clients
    pub fn transport(&self) -> &SessionTransport<B, N> {
        &self.transport
    }

    pub fn routes(&self) -> &SessionRoutes {
        &self.routes
    }

    /// Snapshot of the current state
    pub fn state(&self) -> SessionState {
        match self.state.read() {
            Ok(state) => state.0.clone(),
            Err(poisoned) => poisoned.into_inner().0.clone(),
        }
    }

    /// Cause of the most recent state replacement
    pub fn last_change(&self) -> SessionChange {
        match self.state.read() {
            Ok(state) => state.1,
            Err(poisoned) => poisoned.into_inner().1,
        }
    }

    pub fn identity(&self) -> Option<Identity> {
        self.state().identity().cloned()
    }

    /// Called with the new state and its cause after every replacement
    pub fn subscribe(
        &self,
        subscriber: impl Fn(&SessionState, SessionChange) + Send + Sync + 'static,
    ) {
        let mut subscribers = match self.subscribers.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        subscribers.push(Box::new(subscriber));
    }

    fn replace_state(&self, next: SessionState, change: SessionChange) {
        {
            let mut state = match self.state.write() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            *state = (next.clone(), change);
        }
        let subscribers = match self.subscribers.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        for subscriber in subscribers.iter() {
            subscriber(&next, change);
        }
    }

    /// Ask the identity service who we are. Any failure reads as "nobody".
    async fn probe(&self) -> Option<Identity> {
        match self
            .transport
            .get(&self.routes.me_endpoint, AuthRequirement::Optional)
            .await
        {
            Ok(response) if response.ok() => match response.parse::<Identity>() {
                Ok(identity) => Some(identity),
                Err(e) => {
                    leptos::logging::error!("Unreadable identity from {}: {}", self.routes.me_endpoint, e);
                    None
                }
            },
            Ok(_) => None,
            Err(e) => {
                leptos::logging::error!("Error checking authentication: {}", e);
                None
            }
        }
    }

    /// Resolve the initial session. Runs the probe only while still initializing.
    pub async fn initialize(&self) -> Option<Identity> {
        if self.state().status() == SessionStatus::Resolved {
            return self.identity();
        }
        let identity = self.probe().await;
        self.replace_state(
            SessionState::from_identity(identity.clone()),
            SessionChange::Resolved,
        );
        identity
    }

    /// Re-run the probe and publish whatever it finds
    pub async fn refresh(&self) -> Option<Identity> {
        let identity = self.probe().await;
        self.replace_state(
            SessionState::from_identity(identity.clone()),
            SessionChange::Resolved,
        );
        identity
    }

    /// Register, become signed in, then go home
    pub async fn signup(&self, request: &SignupRequest) -> Result<Identity, SessionError> {
        let result = self.try_signup(request).await;
        match &result {
            Ok(identity) => {
                self.replace_state(
                    SessionState::Authenticated(identity.clone()),
                    SessionChange::SignedIn,
                );
                self.transport.navigator().navigate(&self.routes.home);
            }
            Err(e) => leptos::logging::error!("Signup error: {}", e),
        }
        result
    }

    async fn try_signup(&self, request: &SignupRequest) -> Result<Identity, SessionError> {
        let response = self
            .transport
            .post(&self.routes.signup_endpoint, request, AuthRequirement::Optional)
            .await?;
        if !response.ok() {
            return Err(SessionError::RegistrationFailed(
                response.detail().unwrap_or_else(|| "Signup failed".to_string()),
            ));
        }
        let signup: SignupResponse = response.parse()?;
        Ok(signup.user)
    }

    /// Sign in, confirm the identity, then go to `return_to` (or the dashboard)
    pub async fn login(
        &self,
        username: &str,
        password: &str,
        return_to: Option<ReturnPath>,
    ) -> Result<Identity, SessionError> {
        let result = self.try_login(username, password).await;
        match &result {
            Ok(identity) => {
                self.replace_state(
                    SessionState::Authenticated(identity.clone()),
                    SessionChange::SignedIn,
                );
                let destination = return_to
                    .as_ref()
                    .map(ReturnPath::as_str)
                    .unwrap_or(self.routes.dashboard.as_str());
                self.transport.navigator().navigate(destination);
            }
            Err(e) => leptos::logging::error!("Login error: {}", e),
        }
        result
    }

    async fn try_login(&self, username: &str, password: &str) -> Result<Identity, SessionError> {
        let credentials = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let response = self
            .transport
            .post(&self.routes.login_endpoint, &credentials, AuthRequirement::Optional)
            .await?;
        if !response.ok() {
            return Err(SessionError::AuthenticationFailed(
                response.detail().unwrap_or_else(|| "Login failed".to_string()),
            ));
        }

        // The login endpoint does not return the identity; confirm it.
        let confirmed = self
            .transport
            .get(&self.routes.me_endpoint, AuthRequirement::Optional)
            .await
            .map_err(|e| {
                leptos::logging::warn!("Identity confirmation failed: {}", e);
                SessionError::SessionInconsistent
            })?;
        if !confirmed.ok() {
            leptos::logging::warn!(
                "Credentials accepted but {} answered {}",
                self.routes.me_endpoint,
                confirmed.status
            );
            return Err(SessionError::SessionInconsistent);
        }
        confirmed
            .parse::<Identity>()
            .map_err(|_| SessionError::SessionInconsistent)
    }

    /// Sign out.
    ///
    /// Local state is cleared and the home navigation issued before this
    /// returns; the returned future only performs the optional revocation call.
    pub fn logout(&self) -> impl Future<Output = ()> + '_ {
        let revoke = self.end_session();
        self.revoke(revoke)
    }

    fn end_session(&self) -> Option<String> {
        self.replace_state(SessionState::Anonymous, SessionChange::SignedOut);
        self.transport.navigator().navigate(&self.routes.home);
        self.routes.revoke_endpoint.clone()
    }

    async fn revoke(&self, endpoint: Option<String>) {
        let Some(endpoint) = endpoint else {
            return;
        };
        match self
            .transport
            .post(&endpoint, &serde_json::json!({}), AuthRequirement::Optional)
            .await
        {
            Ok(response) if response.ok() => {}
            Ok(response) => {
                leptos::logging::warn!("Logout revocation answered {}", response.status)
            }
            Err(e) => leptos::logging::error!("Logout error: {}", e),
        }
    }
}

impl<B: HttpBackend + 'static, N: Navigator + 'static> SessionStore<B, N> {
    /// [`SessionStore::logout`] for a shared handle; the future owns a clone of it
    pub fn logout_shared(self: &Arc<Self>) -> impl Future<Output = ()> + 'static {
        let revoke = self.end_session();
        let store = Arc::clone(self);
        async move { store.revoke(revoke).await }
    }
}

/// Shared handle used by the UI layer
pub type SharedSessionStore<B, N> = Arc<SessionStore<B, N>>;
