//! Status bar component.
//!
//! Displays the app name, the signed-in user, the selected repository and
//! the inline status line where load errors are reported.

use leptos::prelude::*;
use leptos_icons::Icon;

use crate::app::AppContext;
use crate::components::icons as ic;
use crate::config::APP_NAME;

stylance::import_crate_style!(css, "src/components/status/status.module.css");

#[component]
pub fn StatusBar() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided at root");

    let (user, tree, status) = (ctx.user, ctx.tree, ctx.status);

    let user_name = Signal::derive(move || {
        user.with(|u| u.as_ref().map(|u| u.display_name().to_string()))
            .unwrap_or_else(|| "...".to_string())
    });
    let location = Signal::derive(move || {
        tree.with(|t| t.as_ref().map(|t| t.repo.to_string()))
            .unwrap_or_default()
    });

    let sign_out = move |_: leptos::ev::MouseEvent| ctx.sign_out();

    view! {
        <header class=css::bar>
            <div class=css::section>
                <span class=css::appName>{APP_NAME}</span>
                <span class=css::location>{location}</span>
            </div>

            <Show when=move || status.with(Option::is_some)>
                <span class=css::statusLine role="status">
                    {move || status.get().unwrap_or_default()}
                </span>
            </Show>

            <div class=css::section>
                <span class=css::user>{user_name}</span>
                <button class=css::iconButton on:click=sign_out title="Sign out">
                    <Icon icon=ic::SIGN_OUT />
                </button>
            </div>
        </header>
    }
}
