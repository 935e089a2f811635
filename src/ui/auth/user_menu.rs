//! User menu component
//!
//! Header widget: sign-in/sign-up links while anonymous, an avatar with a
//! dropdown once signed in, and a skeleton while the session is resolving.

use leptos::prelude::*;
use leptos_router::components::A;

use super::context::use_auth_context;
use crate::core::session::{Identity, SessionState};
use crate::ui::common::Skeleton;

/// User menu component for the header
#[component]
pub fn UserMenu() -> impl IntoView {
    let auth = use_auth_context();
    let menu_open = RwSignal::new(false);

    let handle_logout = move |_| {
        menu_open.set(false);
        auth.logout();
    };

    move || match auth.state.get() {
        SessionState::Initializing => view! { <Skeleton width="2rem" height="2rem" circle=true /> }.into_any(),
        SessionState::Anonymous => {
            let routes = auth.routes();
            view! {
                <div class="flex items-center gap-2">
                    <A href=routes.login attr:class="nav-link">"Sign In"</A>
                    <A href=routes.signup attr:class="btn-primary btn-sm">"Sign Up"</A>
                </div>
            }
            .into_any()
        }
        SessionState::Authenticated(identity) => {
            let dashboard = auth.routes().dashboard;
            let display_name = identity.display_name().to_string();
            let username = identity.username.clone();
            let email = identity.email.clone();
            view! {
                <div class="relative">
                    <button
                        class="user-menu-trigger"
                        on:click=move |_| menu_open.update(|v| *v = !*v)
                    >
                        <UserAvatar identity=identity size=32 />
                        <span class="hidden sm:block truncate">{display_name}</span>
                    </button>

                    <Show when=move || menu_open.get()>
                        <div class="user-menu-dropdown">
                            <div class="user-menu-header">
                                <p class="font-medium truncate">{username.clone()}</p>
                                <p class="text-xs truncate">{email.clone()}</p>
                            </div>
                            <A href=dashboard.clone() attr:class="user-menu-item">"Dashboard"</A>
                            <A href="/code-execution" attr:class="user-menu-item">"Playground"</A>
                            <button class="user-menu-item text-red-500" on:click=handle_logout>
                                "Sign Out"
                            </button>
                        </div>
                    </Show>
                </div>
            }
            .into_any()
        }
    }
}

/// Initials avatar with a color picked from the username
#[component]
pub fn UserAvatar(
    identity: Identity,
    /// Avatar size in pixels
    #[prop(default = 32)]
    size: u32,
) -> impl IntoView {
    let colors = [
        "bg-blue-500",
        "bg-green-500",
        "bg-yellow-500",
        "bg-red-500",
        "bg-purple-500",
        "bg-pink-500",
        "bg-indigo-500",
        "bg-teal-500",
    ];
    let hash = identity
        .username
        .bytes()
        .fold(0u32, |acc, b| acc.wrapping_add(b as u32));
    let color = colors[(hash as usize) % colors.len()];
    let font_size = if size >= 40 { "text-lg" } else { "text-sm" };

    view! {
        <div
            class=format!("{} avatar {}", color, font_size)
            style=format!("width: {size}px; height: {size}px; min-width: {size}px;")
            title=identity.display_name().to_string()
        >
            {identity.initials()}
        </div>
    }
}
