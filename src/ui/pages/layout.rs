use leptos::prelude::*;
use leptos_router::components::A;

use crate::ui::auth::UserMenu;

/// Header, main column and footer shared by every page
#[component]
pub fn PageLayout(children: Children) -> impl IntoView {
    view! {
        <div class="min-h-screen flex flex-col">
            <header class="site-header">
                <div class="site-header-inner">
                    <A href="/" attr:class="flex items-center gap-3 hover:opacity-80 transition-opacity">
                        <div class="logo-mark">
                            <svg class="w-5 h-5 text-white" fill="none" viewBox="0 0 24 24" stroke="currentColor">
                                <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2"
                                      d="M8 9l-3 3 3 3m8-6l3 3-3 3M13 6l-2 12" />
                            </svg>
                        </div>
                        <span class="text-xl font-bold">"Codepad"</span>
                    </A>
                    <nav class="flex items-center gap-4">
                        <A href="/code-execution" attr:class="nav-link">"Playground"</A>
                        <UserMenu />
                    </nav>
                </div>
            </header>

            <main class="flex-1">{children()}</main>

            <footer class="site-footer">
                <p>"© 2026 Codepad"</p>
            </footer>
        </div>
    }
}
