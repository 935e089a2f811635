//! Home page
//!
//! Public landing view; the call to action depends on the session.

use leptos::prelude::*;
use leptos_meta::Title;
use leptos_router::components::A;

use super::layout::PageLayout;
use crate::core::session::SessionState;
use crate::ui::auth::use_auth_context;

#[component]
pub fn HomePage() -> impl IntoView {
    let auth = use_auth_context();
    let routes = auth.routes();

    view! {
        <Title text="Codepad - Run code in your browser" />
        <PageLayout>
            <section class="hero">
                <h1 class="hero-title">"Write it. Run it. Share the curl."</h1>
                <p class="hero-subtitle">
                    "A sandboxed playground for Python, JavaScript, Go, Rust and more."
                </p>
                <div class="flex flex-col sm:flex-row items-center justify-center gap-4">
                    {move || match auth.state.get() {
                        SessionState::Authenticated(identity) => view! {
                            <A href=routes.dashboard.clone() attr:class="btn-primary">
                                {format!("Continue as {}", identity.display_name())}
                            </A>
                        }
                        .into_any(),
                        _ => view! {
                            <A href=routes.signup.clone() attr:class="btn-primary">"Get started"</A>
                        }
                        .into_any(),
                    }}
                    <A href="/code-execution" attr:class="btn-secondary">"Open the playground"</A>
                </div>
            </section>
        </PageLayout>
    }
}
