//! Not found page component

use leptos::prelude::*;
use leptos_router::components::A;

use super::layout::PageLayout;

/// Not found (404) page component
#[component]
pub fn NotFoundPage() -> impl IntoView {
    #[cfg(feature = "ssr")]
    {
        if let Some(response) = use_context::<leptos_axum::ResponseOptions>() {
            response.set_status(axum::http::StatusCode::NOT_FOUND);
        }
    }

    view! {
        <PageLayout>
            <div class="flex flex-col items-center justify-center py-24 text-center">
                <h1 class="text-6xl font-bold mb-4">"404"</h1>
                <h2 class="text-2xl font-semibold mb-2">"Page Not Found"</h2>
                <p class="mb-8 max-w-md">
                    "The page you're looking for doesn't exist or has been moved."
                </p>
                <A href="/" attr:class="btn-primary">"Go Home"</A>
            </div>
        </PageLayout>
    }
}
