//! Auth context for the component tree
//!
//! Wraps one shared [`SessionStore`] and mirrors its state into a signal so
//! views re-render on sign-in and sign-out. The session cookie lives in the
//! browser; nothing here stores credentials.

use std::sync::Arc;

use leptos::prelude::*;
#[cfg(feature = "hydrate")]
use leptos::task::spawn_local;

use crate::core::ApiConfig;
use crate::core::session::{
    Identity, Navigator, SessionChange, SessionRoutes, SessionState, SessionStore,
    SessionTransport,
};

#[cfg(feature = "hydrate")]
pub type ClientBackend = crate::core::session::FetchBackend;
#[cfg(all(feature = "ssr", not(feature = "hydrate")))]
pub type ClientBackend = crate::core::session::ReqwestBackend;

pub type ClientStore = Arc<SessionStore<ClientBackend, BrowserNavigator>>;

#[cfg(feature = "hydrate")]
fn client_backend(api: &ApiConfig) -> ClientBackend {
    ClientBackend::new(api.base_url.as_str())
}

// Server renders never reach the network; the store only needs a backend value.
#[cfg(all(feature = "ssr", not(feature = "hydrate")))]
fn client_backend(api: &ApiConfig) -> ClientBackend {
    ClientBackend::with_client(reqwest::Client::new(), api.base_url.as_str())
}

/// [`Navigator`] over the browser location and the router.
///
/// In-app navigations are queued in `pending` and carried out by
/// [`NavigationBridge`], which lives inside the `<Router>` where `use_navigate`
/// is available.
#[derive(Clone, Copy)]
pub struct BrowserNavigator {
    pending: RwSignal<Option<String>>,
}

impl BrowserNavigator {
    fn new() -> Self {
        Self {
            pending: RwSignal::new(None),
        }
    }
}

impl Navigator for BrowserNavigator {
    #[cfg(feature = "hydrate")]
    fn current_location(&self) -> String {
        web_sys::window()
            .and_then(|window| {
                let location = window.location();
                Some(format!(
                    "{}{}{}",
                    location.pathname().ok()?,
                    location.search().ok()?,
                    location.hash().ok()?
                ))
            })
            .unwrap_or_else(|| "/".to_string())
    }

    #[cfg(not(feature = "hydrate"))]
    fn current_location(&self) -> String {
        "/".to_string()
    }

    fn navigate(&self, path: &str) {
        self.pending.set(Some(path.to_string()));
    }

    #[cfg(feature = "hydrate")]
    fn redirect(&self, url: &str) {
        let result = web_sys::window()
            .map(|window| window.location().set_href(url))
            .unwrap_or(Ok(()));
        if let Err(e) = result {
            leptos::logging::error!("Redirect to {} failed: {:?}", url, e);
            self.navigate(url);
        }
    }

    #[cfg(not(feature = "hydrate"))]
    fn redirect(&self, url: &str) {
        self.navigate(url);
    }
}

/// Auth context providing session state and actions
#[derive(Clone, Copy)]
pub struct AuthContext {
    /// Mirror of the store's state
    pub state: RwSignal<SessionState>,
    change: RwSignal<SessionChange>,
    navigator: BrowserNavigator,
    store: StoredValue<ClientStore>,
    api: StoredValue<ApiConfig>,
}

impl AuthContext {
    pub fn is_authenticated(&self) -> bool {
        self.state.with(SessionState::is_authenticated)
    }

    pub fn identity(&self) -> Option<Identity> {
        self.state.with(|state| state.identity().cloned())
    }

    /// Cause of the latest state change (tracked)
    pub fn last_change(&self) -> SessionChange {
        self.change.get()
    }

    pub fn store(&self) -> ClientStore {
        self.store.get_value()
    }

    pub fn transport(&self) -> ClientTransport {
        ClientTransport(self.store())
    }

    pub fn routes(&self) -> SessionRoutes {
        self.store.with_value(|store| store.routes().clone())
    }

    pub fn api(&self) -> ApiConfig {
        self.api.get_value()
    }

    pub fn navigator(&self) -> BrowserNavigator {
        self.navigator
    }

    /// Sign out. State flips to anonymous immediately; revocation runs in the background.
    pub fn logout(&self) {
        let pending = self.store().logout_shared();
        #[cfg(feature = "hydrate")]
        spawn_local(pending);
        #[cfg(not(feature = "hydrate"))]
        drop(pending);
    }
}

/// Borrowable view of the shared store's transport, for API clients
pub struct ClientTransport(ClientStore);

impl std::ops::Deref for ClientTransport {
    type Target = SessionTransport<ClientBackend, BrowserNavigator>;

    fn deref(&self) -> &Self::Target {
        self.0.transport()
    }
}

/// Provide auth context to the component tree.
///
/// Uses the `ApiConfig` context when the server supplied one, otherwise the
/// compile-time configuration.
pub fn provide_auth_context() -> AuthContext {
    let api = use_context::<ApiConfig>().unwrap_or_else(ApiConfig::from_build);
    let navigator = BrowserNavigator::new();
    let store = Arc::new(SessionStore::new(
        client_backend(&api),
        navigator,
        api.session_routes(),
    ));

    // Both server and client start out initializing, so hydration matches.
    let state = RwSignal::new(store.state());
    let change = RwSignal::new(store.last_change());
    store.subscribe(move |next, cause| {
        change.set(cause);
        state.set(next.clone());
    });

    let ctx = AuthContext {
        state,
        change,
        navigator,
        store: StoredValue::new(store),
        api: StoredValue::new(api),
    };

    // Resolve the session once the app is running in the browser.
    #[cfg(feature = "hydrate")]
    {
        let store = ctx.store();
        spawn_local(async move {
            store.initialize().await;
        });
    }

    provide_context(ctx);
    ctx
}

/// Get auth context from the component tree
pub fn use_auth_context() -> AuthContext {
    expect_context::<AuthContext>()
}

/// Carries queued in-app navigations over to the router. Mount once inside `<Router>`.
#[component]
pub fn NavigationBridge() -> impl IntoView {
    let auth = use_auth_context();
    let navigate = leptos_router::hooks::use_navigate();
    let pending = auth.navigator.pending;

    Effect::new(move |_| {
        let Some(path) = pending.get() else {
            return;
        };
        pending.update_untracked(|pending| *pending = None);
        navigate(&path, Default::default());
    });
}
