//! Selected file: code view with line numbers and, for HTML, markdown and
//! images, a rendered preview. Text files can be edited and committed, and
//! any file deleted.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_icons::Icon;

use super::preview::PreviewFrame;
use crate::app::AppContext;
use crate::components::icons as ic;
use crate::core::ContentRoot;
use crate::models::{FileContent, FileType};
use crate::utils::markdown_to_html;

stylance::import_crate_style!(css, "src/components/explorer/file_view.module.css");

#[component]
pub fn FileView() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let (file, selected_path) = (ctx.file, ctx.selected_path);

    // The loaded file, but only once it matches the current selection
    let current = Memo::new(move |_| {
        let selected = selected_path.get()?;
        file.get().filter(|f| f.path == selected)
    });

    view! {
        <section class=css::view>
            {move || match (selected_path.get(), current.get()) {
                (None, _) => view! {
                    <p class=css::placeholder>"Select a file to view it"</p>
                }.into_any(),
                (Some(path), None) => view! {
                    <p class=css::placeholder>{format!("Loading {path}...")}</p>
                }.into_any(),
                (Some(_), Some(file)) => view! { <FileBody file=file /> }.into_any(),
            }}
        </section>
    }
}

#[component]
fn FileBody(file: Arc<FileContent>) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let file_type = file.file_type();
    let show_code = RwSignal::new(!file_type.has_preview());
    let editing = RwSignal::new(false);
    let confirm_delete = RwSignal::new(false);

    let tab_class = move |code_tab: bool| {
        move || {
            if show_code.get() == code_tab {
                format!("{} {}", css::tab, css::tabActive)
            } else {
                css::tab.to_string()
            }
        }
    };

    // First click arms, second click deletes
    let (delete_path, delete_sha) = (file.path.clone(), file.sha.clone());
    let on_delete = move |_: leptos::ev::MouseEvent| {
        if confirm_delete.get_untracked() {
            ctx.delete_file(delete_path.clone(), delete_sha.clone());
        } else {
            confirm_delete.set(true);
        }
    };

    let body_file = Arc::clone(&file);
    let body = move || {
        if editing.get() {
            view! { <FileEditor file=Arc::clone(&body_file) editing=editing /> }.into_any()
        } else if show_code.get() {
            view! { <CodeView file=Arc::clone(&body_file) /> }.into_any()
        } else {
            view! { <RenderedView file=Arc::clone(&body_file) /> }.into_any()
        }
    };

    view! {
        <div class=css::header>
            <span class=css::fileName>
                <Icon icon=ic::file_icon(&file.path) />
                {file.file_name().to_string()}
            </span>
            <span class=css::path>{file.path.clone()}</span>
            {file_type.has_preview().then(|| view! {
                <Show when=move || !editing.get()>
                    <div class=css::tabs role="tablist">
                        <button class=tab_class(false) on:click=move |_| show_code.set(false)>
                            "Preview"
                        </button>
                        <button class=tab_class(true) on:click=move |_| show_code.set(true)>
                            "Code"
                        </button>
                    </div>
                </Show>
            })}
            {(!file.is_binary).then(|| view! {
                <button class=css::action title="Edit" on:click=move |_| editing.set(true)>
                    <Icon icon=ic::EDIT />
                </button>
            })}
            <button
                class=move || if confirm_delete.get() { css::actionDanger } else { css::action }
                title="Delete file"
                on:click=on_delete
            >
                <Icon icon=ic::TRASH />
                {move || confirm_delete.get().then_some("Confirm")}
            </button>
        </div>
        <div class=css::body>{body}</div>
    }
}

/// Text editor committing the draft with a message.
#[component]
fn FileEditor(file: Arc<FileContent>, editing: RwSignal<bool>) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let draft = RwSignal::new(file.content.clone());
    let message = RwSignal::new(format!("Update {}", file.path));

    let (path, sha) = (file.path.clone(), file.sha.clone());
    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let commit_message = message.get_untracked();
        if commit_message.trim().is_empty() {
            return;
        }
        ctx.commit_file(path.clone(), draft.get_untracked(), commit_message, Some(sha.clone()));
        editing.set(false);
    };

    view! {
        <form class=css::editor on:submit=submit>
            <textarea
                class=css::draft
                spellcheck="false"
                prop:value=move || draft.get()
                on:input=move |ev| draft.set(event_target_value(&ev))
            />
            <div class=css::commitBar>
                <input
                    class=css::message
                    type="text"
                    placeholder="Commit message"
                    prop:value=move || message.get()
                    on:input=move |ev| message.set(event_target_value(&ev))
                />
                <button type="button" class=css::action on:click=move |_| editing.set(false)>
                    "Cancel"
                </button>
                <button type="submit" class=css::commit>"Commit"</button>
            </div>
        </form>
    }
}

#[component]
fn CodeView(file: Arc<FileContent>) -> impl IntoView {
    if file.is_binary {
        return view! { <p class=css::placeholder>"Binary file not shown"</p> }.into_any();
    }

    let rows = file
        .content
        .lines()
        .enumerate()
        .map(|(i, line)| {
            view! {
                <tr>
                    <td class=css::lineNo>{i + 1}</td>
                    <td class=css::lineCode>{line.to_string()}</td>
                </tr>
            }
        })
        .collect_view();

    view! {
        <table class=css::code>
            <tbody>{rows}</tbody>
        </table>
    }
    .into_any()
}

#[component]
fn RenderedView(file: Arc<FileContent>) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    match file.file_type() {
        FileType::Markdown => {
            let html = markdown_to_html(&file.content);
            view! { <article class=css::markdown inner_html=html /> }.into_any()
        }
        FileType::Image => {
            let src = ctx.tree.with_untracked(|t| {
                t.as_ref()
                    .map(|t| ContentRoot::new(t.repo.clone()).file_url(&file.path))
            });
            match src {
                Some(src) => view! {
                    <div class=css::image>
                        <img src=src alt=file.file_name().to_string() />
                    </div>
                }
                .into_any(),
                None => view! { <p class=css::placeholder>"No repository loaded"</p> }.into_any(),
            }
        }
        FileType::Html => view! { <PreviewFrame document=ctx.preview /> }.into_any(),
        FileType::Text => view! { <CodeView file=file /> }.into_any(),
    }
}
