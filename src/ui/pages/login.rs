//! Login page component
//!
//! Reads the `next` return path from the query string and hands it to the
//! form, following the query as the router changes it. A user who is already
//! signed in is sent straight on.

use leptos::prelude::*;
use leptos_meta::Title;
use leptos_router::hooks::use_query_map;

use super::layout::PageLayout;
use crate::core::session::navigation::NEXT_PARAM;
use crate::core::session::{Navigator, ReturnPath};
use crate::ui::auth::{LoginForm, use_auth_context};

/// Login page component
#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth_context();
    let query = use_query_map();
    let return_to = Memo::new(move |_| {
        query
            .get()
            .get(NEXT_PARAM)
            .and_then(|next| ReturnPath::from_next(&next))
    });

    // Redirect if already authenticated
    Effect::new(move |_| {
        if auth.is_authenticated() {
            let destination = return_to
                .get()
                .map(|path| path.as_str().to_string())
                .unwrap_or_else(|| auth.routes().dashboard);
            auth.navigator().navigate(&destination);
        }
    });

    view! {
        <Title text="Sign in - Codepad" />
        <PageLayout>
            <div class="flex items-center justify-center p-4 py-16">
                <div class="auth-card">
                    <LoginForm return_to=return_to />
                </div>
            </div>
        </PageLayout>
    }
}
