//! Dashboard page
//!
//! The signed-in landing spot. Everything below the header sits behind
//! [`ProtectedRoute`].

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_meta::Title;
use leptos_router::components::A;

use super::layout::PageLayout;
use crate::core::session::Identity;
use crate::ui::auth::{ProtectedRoute, UserAvatar, use_auth_context};

#[component]
pub fn DashboardPage() -> impl IntoView {
    view! {
        <Title text="Dashboard - Codepad" />
        <PageLayout>
            <ProtectedRoute>
                <DashboardContent />
            </ProtectedRoute>
        </PageLayout>
    }
}

#[component]
fn DashboardContent() -> impl IntoView {
    let auth = use_auth_context();
    let checking = RwSignal::new(false);

    // Re-ask the identity service; a revoked session drops the user back out.
    let on_refresh = move |_| {
        checking.set(true);
        let store = auth.store();
        spawn_local(async move {
            store.refresh().await;
            checking.set(false);
        });
    };

    move || {
        auth.identity().map(|identity| {
            view! {
                <div class="max-w-3xl mx-auto px-4 py-12 space-y-8">
                    <div class="flex items-center gap-4">
                        <UserAvatar identity=identity.clone() size=56 />
                        <div>
                            <h1 class="text-3xl font-bold">
                                {format!("Welcome back, {}", identity.display_name())}
                            </h1>
                            <p class="text-sm">{format!("@{}", identity.username)}</p>
                        </div>
                    </div>

                    <AccountDetails identity=identity />

                    <div class="flex items-center gap-3">
                        <A href="/code-execution" attr:class="btn-primary">"Open the playground"</A>
                        <button class="btn-secondary" on:click=on_refresh disabled=move || checking.get()>
                            {move || if checking.get() { "Checking..." } else { "Check session" }}
                        </button>
                        <button class="btn-secondary" on:click=move |_| auth.logout()>
                            "Sign Out"
                        </button>
                    </div>
                </div>
            }
        })
    }
}

#[component]
fn AccountDetails(identity: Identity) -> impl IntoView {
    let rows = [
        ("Name", identity.full_name.clone()),
        ("Email", identity.email.clone()),
        ("Status", if identity.is_active { "Active" } else { "Inactive" }.to_string()),
        ("Member since", identity.created_at.clone()),
    ];

    view! {
        <dl class="account-details">
            {rows
                .into_iter()
                .map(|(label, value)| {
                    view! {
                        <dt>{label}</dt>
                        <dd>{value}</dd>
                    }
                })
                .collect_view()}
        </dl>
    }
}
