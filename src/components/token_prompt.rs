//! Access token entry, shown when no token is stored.

use leptos::prelude::*;

use crate::app::reload;
use crate::config::{APP_NAME, TOKEN_STORAGE_KEY};
use crate::utils::dom;

stylance::import_crate_style!(css, "src/components/token_prompt.module.css");

#[component]
pub fn TokenPrompt() -> impl IntoView {
    let token = RwSignal::new(String::new());

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let value = token.get_untracked();
        let value = value.trim();
        if value.is_empty() {
            return;
        }
        dom::local_set(TOKEN_STORAGE_KEY, value);
        reload();
    };

    view! {
        <div class=css::screen>
            <form class=css::card on:submit=submit>
                <h1 class=css::title>{APP_NAME}</h1>
                <p class=css::hint>
                    "Paste a GitHub personal access token with the "
                    <code>"repo"</code>
                    " scope. It is kept in this browser's localStorage."
                </p>
                <input
                    class=css::input
                    type="password"
                    placeholder="ghp_..."
                    autocomplete="off"
                    prop:value=move || token.get()
                    on:input=move |ev| token.set(event_target_value(&ev))
                />
                <button class=css::button type="submit">"Sign in"</button>
            </form>
        </div>
    }
}
