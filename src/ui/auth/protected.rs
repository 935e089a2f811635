//! Route guard component
//!
//! Wraps views that need a signed-in user. The decision itself is
//! [`AccessGuard`]; this component renders it and performs the redirect.

use leptos::prelude::*;

use super::context::use_auth_context;
use crate::core::session::{AccessGuard, GuardOutcome, Navigator};
use crate::ui::common::LoadingSpinner;

/// Renders `children` only for a resolved, authenticated session.
///
/// Never wrap the sign-in page itself with this.
#[component]
pub fn ProtectedRoute(
    /// Shown while the session is still being resolved
    #[prop(optional, into)]
    placeholder: Option<ViewFn>,
    children: ChildrenFn,
) -> impl IntoView {
    let auth = use_auth_context();
    let navigator = auth.navigator();
    let guard = StoredValue::new(AccessGuard::new(auth.routes().login));

    let outcome = Memo::new(move |_| {
        let state = auth.state.get();
        let change = auth.last_change();
        let location = navigator.current_location();
        guard
            .try_update_value(|guard| guard.evaluate(&state, change, &location))
            .unwrap_or(GuardOutcome::Placeholder)
    });

    Effect::new(move |_| {
        if let GuardOutcome::Empty {
            redirect_to: Some(url),
        } = outcome.get()
        {
            navigator.navigate(&url);
        }
    });

    move || match outcome.get() {
        GuardOutcome::Placeholder => match placeholder.as_ref() {
            Some(placeholder) => placeholder.run(),
            None => view! { <LoadingSpinner message="Loading...".to_string() /> }.into_any(),
        },
        GuardOutcome::Empty { .. } => ().into_any(),
        GuardOutcome::Content => children().into_any(),
    }
}
