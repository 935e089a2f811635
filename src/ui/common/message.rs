//! Inline messages for forms and result panels

use leptos::prelude::*;

/// Form-wide error; hidden while `error` is `None`
#[component]
pub fn ErrorMessage(#[prop(into)] error: Signal<Option<String>>) -> impl IntoView {
    view! {
        <Show when=move || error.get().is_some()>
            <div class="error-message" role="alert">
                <span>{move || error.get().unwrap_or_default()}</span>
            </div>
        </Show>
    }
}

/// Message under a single input
#[component]
pub fn FieldError(#[prop(into)] error: Signal<Option<String>>) -> impl IntoView {
    move || {
        error
            .get()
            .map(|error| view! { <p class="field-error">{error}</p> })
    }
}

/// Static hint under an input
#[component]
pub fn FieldHint(text: &'static str) -> impl IntoView {
    view! { <p class="field-hint">{text}</p> }
}
