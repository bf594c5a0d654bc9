//! Main explorer component.
//!
//! ## Layout
//!
//! - **Desktop (> 768px)**: tree on the left, file view on the right
//! - **Mobile (< 768px)**: tree stacked above the file view
//!
//! A tab switches the right pane to the pull requests of the repository.

use leptos::prelude::*;
use leptos_icons::Icon;

use super::{FileView, PullRequestList, TreeView};
use crate::app::AppContext;
use crate::components::icons as ic;

stylance::import_crate_style!(css, "src/components/explorer/explorer.module.css");

#[component]
pub fn Explorer() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let (tree, pulls) = (ctx.tree, ctx.pulls);
    let show_pulls = RwSignal::new(false);

    // Fetch lazily, and again after switching repositories
    Effect::new(move |_| {
        if show_pulls.get() && tree.with(Option::is_some) && pulls.with(Option::is_none) {
            ctx.load_pull_requests();
        }
    });

    let tab_class = move |pulls_tab: bool| {
        move || {
            if show_pulls.get() == pulls_tab {
                format!("{} {}", css::tab, css::tabActive)
            } else {
                css::tab.to_string()
            }
        }
    };

    view! {
        <div class=css::explorer>
            <div class=css::treePane>
                <TreeView />
            </div>
            <div class=css::filePane>
                <div class=css::tabs role="tablist">
                    <button class=tab_class(false) on:click=move |_| show_pulls.set(false)>
                        <Icon icon=ic::FILE_CODE />
                        "Code"
                    </button>
                    <button class=tab_class(true) on:click=move |_| show_pulls.set(true)>
                        <Icon icon=ic::PULL_REQUEST />
                        "Pull requests"
                    </button>
                </div>
                <Show when=move || show_pulls.get() fallback=|| view! { <FileView /> }>
                    <PullRequestList />
                </Show>
            </div>
        </div>
    }
}
