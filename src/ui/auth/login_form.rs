//! Login form component
//!
//! Username-or-email plus password. Navigation after a successful sign-in is
//! done by the session store.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;

use super::context::use_auth_context;
use crate::core::forms::{self, FieldErrors, submit_login};
use crate::core::session::ReturnPath;
use crate::ui::common::{ErrorMessage, FieldError, InlineSpinner};

/// Login form component
#[component]
pub fn LoginForm(
    /// Where to go after signing in; the dashboard when absent
    #[prop(into)]
    return_to: Signal<Option<ReturnPath>>,
) -> impl IntoView {
    let auth = use_auth_context();

    let identifier = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let show_password = RwSignal::new(false);
    let errors = RwSignal::new(FieldErrors::new());
    let submitting = RwSignal::new(false);

    let error_for = move |field: &'static str| {
        Signal::derive(move || errors.with(|errors| errors.get(field).map(str::to_string)))
    };
    let submit_error =
        Signal::derive(move || errors.with(|errors| errors.submit().map(str::to_string)));

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }

        let form = forms::LoginForm {
            identifier: identifier.get_untracked(),
            password: password.get_untracked(),
        };
        let found = form.validate();
        if !found.is_empty() {
            errors.set(found);
            return;
        }

        errors.set(FieldErrors::new());
        submitting.set(true);
        let store = auth.store();
        let return_to = return_to.get_untracked();
        spawn_local(async move {
            if let Err(found) = submit_login(&*store, &form, return_to).await {
                errors.set(found);
            }
            submitting.set(false);
        });
    };

    view! {
        <form on:submit=on_submit class="auth-form">
            <div class="text-center">
                <h2 class="auth-title">"Welcome Back"</h2>
                <p class="auth-subtitle">"Sign in to your account to continue"</p>
            </div>

            <ErrorMessage error=submit_error />

            <div class="form-field">
                <label for="identifier">"Email or username"</label>
                <input
                    type="text"
                    id="identifier"
                    name="identifier"
                    autocomplete="username"
                    placeholder="you@example.com"
                    class:input-invalid=move || errors.with(|e| e.get("identifier").is_some())
                    prop:value=move || identifier.get()
                    on:input=move |ev| {
                        identifier.set(event_target_value(&ev));
                        errors.update(|errors| errors.clear("identifier"));
                    }
                />
                <FieldError error=error_for("identifier") />
            </div>

            <div class="form-field">
                <label for="password">"Password"</label>
                <div class="relative">
                    <input
                        type=move || if show_password.get() { "text" } else { "password" }
                        id="password"
                        name="password"
                        autocomplete="current-password"
                        placeholder="Enter your password"
                        class:input-invalid=move || errors.with(|e| e.get("password").is_some())
                        prop:value=move || password.get()
                        on:input=move |ev| {
                            password.set(event_target_value(&ev));
                            errors.update(|errors| errors.clear("password"));
                        }
                    />
                    <button
                        type="button"
                        class="password-toggle"
                        on:click=move |_| show_password.update(|v| *v = !*v)
                    >
                        {move || if show_password.get() { "Hide" } else { "Show" }}
                    </button>
                </div>
                <FieldError error=error_for("password") />
            </div>

            <button type="submit" class="btn-primary w-full" disabled=move || submitting.get()>
                {move || {
                    if submitting.get() {
                        view! {
                            <span class="flex items-center justify-center gap-2">
                                <InlineSpinner />
                                "Signing in..."
                            </span>
                        }
                            .into_any()
                    } else {
                        view! { <span>"Sign In"</span> }.into_any()
                    }
                }}
            </button>

            <p class="auth-switch">
                "Don't have an account? "
                <A href=move || auth.routes().signup>"Sign up"</A>
            </p>
        </form>
    }
}
