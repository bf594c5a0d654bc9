//! Pull requests of the selected repository.

use leptos::prelude::*;
use leptos_icons::Icon;

use crate::app::AppContext;
use crate::components::icons as ic;
use crate::models::{PullRequest, PullRequestStatus};

stylance::import_crate_style!(css, "src/components/explorer/pull_requests.module.css");

#[component]
pub fn PullRequestList() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let (tree, pulls) = (ctx.tree, ctx.pulls);

    view! {
        <section class=css::list>
            {move || match (tree.with(Option::is_some), pulls.get()) {
                (false, _) => view! {
                    <p class=css::placeholder>"Select a repository"</p>
                }.into_any(),
                (true, None) => view! {
                    <p class=css::placeholder>"Loading pull requests..."</p>
                }.into_any(),
                (true, Some(list)) if list.is_empty() => view! {
                    <p class=css::placeholder>"No pull requests"</p>
                }.into_any(),
                (true, Some(list)) => list
                    .into_iter()
                    .map(|pr| view! { <PullRequestItem pr=pr /> })
                    .collect_view()
                    .into_any(),
            }}
        </section>
    }
}

#[component]
fn PullRequestItem(pr: PullRequest) -> impl IntoView {
    let status = pr.status();
    let badge = match status {
        PullRequestStatus::Open => css::open,
        PullRequestStatus::Merged => css::merged,
        PullRequestStatus::Draft | PullRequestStatus::Closed => css::closed,
    };
    let opened = pr
        .created_at
        .as_deref()
        .and_then(|date| date.get(..10))
        .map(|date| format!(" on {date}"))
        .unwrap_or_default();

    view! {
        <article class=css::item>
            <span class=css::icon><Icon icon=ic::PULL_REQUEST /></span>
            <div class=css::main>
                <a class=css::title href=pr.html_url target="_blank" rel="noopener noreferrer">
                    {pr.title}
                </a>
                <p class=css::meta>
                    {format!("#{} opened by {}{}", pr.number, pr.user.login, opened)}
                </p>
            </div>
            <span class=format!("{} {}", css::badge, badge)>{status.label()}</span>
        </article>
    }
}
