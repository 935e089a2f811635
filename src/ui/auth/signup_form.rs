//! Signup form component
//!
//! Username, display name, email and password. Every field is validated
//! locally before anything is sent.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;

use super::context::use_auth_context;
use crate::core::forms::{self, FieldErrors, PASSWORD_HINT, submit_signup};
use crate::ui::common::{ErrorMessage, FieldError, FieldHint, InlineSpinner};

struct Field {
    name: &'static str,
    label: &'static str,
    input_type: &'static str,
    autocomplete: &'static str,
    placeholder: &'static str,
    value: RwSignal<String>,
}

/// Signup form component
#[component]
pub fn SignupForm() -> impl IntoView {
    let auth = use_auth_context();

    let username = RwSignal::new(String::new());
    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let errors = RwSignal::new(FieldErrors::new());
    let submitting = RwSignal::new(false);

    let submit_error =
        Signal::derive(move || errors.with(|errors| errors.submit().map(str::to_string)));

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }

        let form = forms::SignupForm {
            username: username.get_untracked(),
            name: name.get_untracked(),
            email: email.get_untracked(),
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
        spawn_local(async move {
            if let Err(found) = submit_signup(&*store, &form).await {
                errors.set(found);
            }
            submitting.set(false);
        });
    };

    let fields = [
        Field {
            name: "username",
            label: "Username",
            input_type: "text",
            autocomplete: "username",
            placeholder: "ada_lovelace",
            value: username,
        },
        Field {
            name: "name",
            label: "Full name",
            input_type: "text",
            autocomplete: "name",
            placeholder: "Ada Lovelace",
            value: name,
        },
        Field {
            name: "email",
            label: "Email",
            input_type: "email",
            autocomplete: "email",
            placeholder: "you@example.com",
            value: email,
        },
        Field {
            name: "password",
            label: "Password",
            input_type: "password",
            autocomplete: "new-password",
            placeholder: "Create a password",
            value: password,
        },
    ];

    let inputs = fields
        .into_iter()
        .map(|field| {
            let Field {
                name,
                label,
                input_type,
                autocomplete,
                placeholder,
                value,
            } = field;
            let error =
                Signal::derive(move || errors.with(|errors| errors.get(name).map(str::to_string)));
            view! {
                <div class="form-field">
                    <label for=name>{label}</label>
                    <input
                        type=input_type
                        id=name
                        name=name
                        autocomplete=autocomplete
                        placeholder=placeholder
                        class:input-invalid=move || error.with(Option::is_some)
                        prop:value=move || value.get()
                        on:input=move |ev| {
                            value.set(event_target_value(&ev));
                            errors.update(|errors| errors.clear(name));
                        }
                    />
                    <FieldError error=error />
                    {(name == "password").then(|| view! { <FieldHint text=PASSWORD_HINT /> })}
                </div>
            }
        })
        .collect_view();

    view! {
        <form on:submit=on_submit class="auth-form">
            <div class="text-center">
                <h2 class="auth-title">"Create an account"</h2>
                <p class="auth-subtitle">"Start running code in seconds"</p>
            </div>

            <ErrorMessage error=submit_error />

            {inputs}

            <button type="submit" class="btn-primary w-full" disabled=move || submitting.get()>
                {move || {
                    if submitting.get() {
                        view! {
                            <span class="flex items-center justify-center gap-2">
                                <InlineSpinner />
                                "Creating account..."
                            </span>
                        }
                            .into_any()
                    } else {
                        view! { <span>"Sign Up"</span> }.into_any()
                    }
                }}
            </button>

            <p class="auth-switch">
                "Already have an account? "
                <A href=move || auth.routes().login>"Sign in"</A>
            </p>
        </form>
    }
}
