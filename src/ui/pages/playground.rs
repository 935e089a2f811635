//! Code playground page
//!
//! Editor, stdin, output panel and the equivalent curl command. Signing in is
//! not required.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_meta::Title;

use super::layout::PageLayout;
use crate::core::execution::{
    ExecutionRequest, ExecutionResult, curl_command, default_language, execute, language_label,
    starter_code, supported_languages,
};
use crate::ui::auth::use_auth_context;
use crate::ui::common::{InlineSpinner, LoadingSpinner};

#[component]
pub fn PlaygroundPage() -> impl IntoView {
    let auth = use_auth_context();

    let languages = RwSignal::new(Vec::<String>::new());
    let loading_languages = RwSignal::new(true);
    let language = RwSignal::new("python".to_string());
    let code = RwSignal::new(starter_code("python").to_string());
    let stdin = RwSignal::new(String::new());
    let result = RwSignal::new(None::<ExecutionResult>);
    let executing = RwSignal::new(false);
    let last_request = RwSignal::new(None::<ExecutionRequest>);

    // Effects only run in the browser, so this fetch never happens during SSR.
    Effect::new(move |_| {
        spawn_local(async move {
            match supported_languages(&*auth.transport()).await {
                Ok(found) => {
                    if !found.contains(&language.get_untracked()) {
                        if let Some(first) = default_language(&found) {
                            language.set(first.to_string());
                            code.set(starter_code(first).to_string());
                        }
                    }
                    languages.set(found);
                }
                Err(e) => leptos::logging::error!("Failed to fetch languages: {}", e),
            }
            loading_languages.set(false);
        });
    });

    let select_language = move |ev| {
        let picked = event_target_value(&ev);
        code.set(starter_code(&picked).to_string());
        language.set(picked);
    };

    let run = move |_| {
        let request = ExecutionRequest::new(
            code.get_untracked(),
            &language.get_untracked(),
            &stdin.get_untracked(),
        );
        executing.set(true);
        result.set(None);
        last_request.set(None);
        spawn_local(async move {
            let outcome = execute(&*auth.transport(), &request).await;
            result.set(Some(outcome));
            last_request.set(Some(request));
            executing.set(false);
        });
    };

    let reset = move |_| {
        code.set(starter_code(&language.get_untracked()).to_string());
        stdin.set(String::new());
        result.set(None);
        last_request.set(None);
    };

    let curl = move || {
        last_request
            .get()
            .map(|request| curl_command(&auth.api().base_url, &request))
    };

    view! {
        <Title text="Playground - Codepad" />
        <PageLayout>
            <div class="container mx-auto px-4 py-8">
                <div class="mb-8">
                    <h1 class="text-3xl font-extrabold">"Code Playground"</h1>
                    <p>"Write, run, and test code in multiple programming languages"</p>
                </div>

                <div class="grid grid-cols-1 lg:grid-cols-3 gap-6">
                    <div class="lg:col-span-2 space-y-4">
                        <div class="card">
                            <div class="card-header">
                                <span class="font-medium">"Code Editor"</span>
                                <select
                                    class="language-select"
                                    prop:value=move || language.get()
                                    on:change=select_language
                                    disabled=move || loading_languages.get() || executing.get()
                                >
                                    <For
                                        each=move || languages.get()
                                        key=|lang| lang.clone()
                                        let:lang
                                    >
                                        <option value=lang.clone()>{language_label(&lang)}</option>
                                    </For>
                                </select>
                            </div>
                            <textarea
                                class="code-editor"
                                spellcheck="false"
                                prop:value=move || code.get()
                                on:input=move |ev| code.set(event_target_value(&ev))
                                readonly=move || executing.get()
                            ></textarea>
                        </div>

                        <div class="card">
                            <label for="stdin" class="text-sm font-medium">"Standard Input (stdin)"</label>
                            <input
                                id="stdin"
                                class="font-mono text-sm w-full"
                                placeholder="Enter input for your program..."
                                prop:value=move || stdin.get()
                                on:input=move |ev| stdin.set(event_target_value(&ev))
                                disabled=move || executing.get()
                            />
                        </div>

                        <div class="flex items-center gap-3">
                            <button
                                class="btn-primary flex-1"
                                on:click=run
                                disabled=move || executing.get() || code.with(|code| code.trim().is_empty())
                            >
                                {move || {
                                    if executing.get() {
                                        view! {
                                            <span class="flex items-center justify-center gap-2">
                                                <InlineSpinner />
                                                "Executing..."
                                            </span>
                                        }
                                            .into_any()
                                    } else {
                                        view! { <span>"Run Code"</span> }.into_any()
                                    }
                                }}
                            </button>
                            <button class="btn-secondary" on:click=reset disabled=move || executing.get()>
                                "Reset"
                            </button>
                        </div>

                        {move || curl().map(|command| view! {
                            <div class="card">
                                <span class="text-sm font-medium">"cURL"</span>
                                <pre class="curl-command">{command}</pre>
                            </div>
                        })}
                    </div>

                    <div class="lg:col-span-1">
                        <OutputPanel result=result.read_only() executing=executing.read_only() />
                    </div>
                </div>
            </div>
        </PageLayout>
    }
}

#[component]
fn OutputPanel(
    result: ReadSignal<Option<ExecutionResult>>,
    executing: ReadSignal<bool>,
) -> impl IntoView {
    move || {
        if executing.get() {
            return view! { <LoadingSpinner message="Executing code...".to_string() /> }.into_any();
        }
        let Some(result) = result.get() else {
            return view! {
                <div class="output-empty">"Output will appear here"</div>
            }
            .into_any();
        };

        let succeeded = result.succeeded();
        let output = match result.output() {
            "" => "No output".to_string(),
            text => text.to_string(),
        };
        let (badge_class, badge_text, output_class) = if succeeded {
            ("badge badge-success", "Success", "output-text")
        } else {
            ("badge badge-error", "Error", "output-text text-destructive")
        };
        view! {
            <div class="card output-panel">
                <div class="card-header">
                    <span class="font-medium">"Output"</span>
                    <span class=badge_class>{badge_text}</span>
                    <span class="text-xs">{format!("{:.3}s", result.execution_time)}</span>
                </div>
                <pre class=output_class>
                    {output}
                </pre>
            </div>
        }
        .into_any()
    }
}
