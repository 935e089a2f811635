use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

use crate::ui::auth::{NavigationBridge, provide_auth_context};
use crate::ui::pages::{
    DashboardPage, HomePage, LoginPage, NotFoundPage, PlaygroundPage, SignupPage,
};

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone() />
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    // Provides context that manages stylesheets, titles, meta tags, etc.
    provide_meta_context();

    // Session store shared by every page; resolves the session after hydration
    let _auth = provide_auth_context();

    view! {
        // id=leptos means cargo-leptos will hot-reload this stylesheet
        <Stylesheet id="leptos" href="/pkg/codepad.css"/>

        <Title text="Codepad"/>

        <Router>
            <NavigationBridge />
            <Routes fallback=|| view! { <NotFoundPage /> }>
                <Route path=path!("/") view=HomePage />
                <Route path=path!("/auth/login") view=LoginPage />
                <Route path=path!("/auth/signup") view=SignupPage />
                <Route path=path!("/dashboard") view=DashboardPage />
                <Route path=path!("/code-execution") view=PlaygroundPage />
            </Routes>
        </Router>
    }
}
