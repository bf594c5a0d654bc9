//! Repository list sidebar, with repository creation and deletion.

use leptos::prelude::*;
use leptos_icons::Icon;

use crate::app::AppContext;
use crate::components::icons as ic;
use crate::models::Repository;

stylance::import_crate_style!(css, "src/components/repo_list.module.css");

#[component]
pub fn RepoList() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let repos = ctx.repos;
    let refresh_ctx = ctx.clone();

    view! {
        <nav class=css::sidebar aria-label="Repositories">
            <div class=css::header>
                <span>"Repositories"</span>
                <button
                    class=css::iconButton
                    title="Refresh"
                    on:click=move |_| refresh_ctx.refresh_repositories()
                >
                    <Icon icon=ic::REFRESH />
                </button>
            </div>
            <CreateRepository />
            <ul class=css::list>
                <For
                    each=move || repos.get()
                    key=|repo| repo.full_name.clone()
                    children=move |repo| view! { <RepoItem repo=repo /> }
                />
            </ul>
        </nav>
    }
}

#[component]
fn CreateRepository() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let name = RwSignal::new(String::new());
    let private = RwSignal::new(true);

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let value = name.get_untracked();
        if value.trim().is_empty() {
            return;
        }
        ctx.create_repository(value, private.get_untracked());
        name.set(String::new());
    };

    view! {
        <form class=css::create on:submit=submit>
            <input
                class=css::createName
                type="text"
                placeholder="new-repository"
                prop:value=move || name.get()
                on:input=move |ev| name.set(event_target_value(&ev))
            />
            <label class=css::createPrivate title="Private">
                <input
                    type="checkbox"
                    prop:checked=move || private.get()
                    on:change=move |ev| private.set(event_target_checked(&ev))
                />
                <Icon icon=ic::LOCK />
            </label>
            <button class=css::iconButton type="submit" title="Create repository">
                <Icon icon=ic::PLUS />
            </button>
        </form>
    }
}

#[component]
fn RepoItem(repo: Repository) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let tree = ctx.tree;

    let owner = repo.owner.login.clone();
    let name = repo.name.clone();
    let (match_owner, match_name) = (owner.clone(), name.clone());
    let is_selected = Signal::derive(move || {
        tree.with(|t| t.as_ref().is_some_and(|t| t.repo.is_repo(&match_owner, &match_name)))
    });

    let confirm_delete = RwSignal::new(false);
    let (delete_owner, delete_name) = (owner.clone(), name.clone());
    let delete_ctx = ctx.clone();
    let on_delete = move |ev: leptos::ev::MouseEvent| {
        ev.stop_propagation();
        if confirm_delete.get_untracked() {
            delete_ctx.delete_repository(delete_owner.clone(), delete_name.clone());
        } else {
            confirm_delete.set(true);
        }
    };

    let open = move |_: leptos::ev::MouseEvent| ctx.open_repo(owner.clone(), name.clone());

    view! {
        <li
            class=move || if is_selected.get() { css::itemSelected } else { css::item }
            on:click=open
        >
            <div class=css::itemTitle>
                <Icon icon=ic::REPO />
                <span class=css::name>{repo.name.clone()}</span>
                {repo.private.then(|| view! {
                    <span class=css::badge title="Private"><Icon icon=ic::LOCK /></span>
                })}
            </div>
            {repo.description.clone().map(|d| view! { <p class=css::description>{d}</p> })}
            <div class=css::meta>
                {repo.language.clone().map(|l| view! { <span>{l}</span> })}
                <span class=css::stars>
                    <Icon icon=ic::STAR />
                    {repo.stargazers_count}
                </span>
                <a
                    class=css::external
                    href=repo.html_url.clone()
                    target="_blank"
                    rel="noopener noreferrer"
                    title="Open on GitHub"
                    on:click=|ev| ev.stop_propagation()
                >
                    <Icon icon=ic::EXTERNAL_LINK />
                </a>
                <Show when=move || is_selected.get()>
                    <button
                        class=move || if confirm_delete.get() { css::deleteArmed } else { css::delete }
                        title="Delete repository"
                        on:click=on_delete.clone()
                    >
                        <Icon icon=ic::TRASH />
                        {move || confirm_delete.get().then_some("Confirm")}
                    </button>
                </Show>
            </div>
        </li>
    }
}
