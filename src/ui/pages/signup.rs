//! Signup page component

use leptos::prelude::*;
use leptos_meta::Title;

use super::layout::PageLayout;
use crate::core::session::Navigator;
use crate::ui::auth::{SignupForm, use_auth_context};

#[component]
pub fn SignupPage() -> impl IntoView {
    let auth = use_auth_context();

    Effect::new(move |_| {
        if auth.is_authenticated() {
            auth.navigator().navigate(&auth.routes().home);
        }
    });

    view! {
        <Title text="Sign up - Codepad" />
        <PageLayout>
            <div class="flex items-center justify-center p-4 py-16">
                <div class="auth-card">
                    <SignupForm />
                </div>
            </div>
        </PageLayout>
    }
}
