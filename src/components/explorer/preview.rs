//! Sandboxed HTML preview frame.
//!
//! Documents produced by the dashboard are written into an `<iframe srcdoc>`
//! with [`PREVIEW_SANDBOX`] flags: scripts run, but in an opaque origin with
//! no access to the dashboard or its stored token.

use leptos::prelude::*;

use crate::config::PREVIEW_SANDBOX;
use crate::core::RenderSurface;

stylance::import_crate_style!(css, "src/components/explorer/preview.module.css");

/// [`RenderSurface`] backed by the signal the preview frame reads.
#[derive(Clone, Copy)]
pub struct FrameSurface {
    document: RwSignal<Option<String>>,
}

impl FrameSurface {
    pub fn new(document: RwSignal<Option<String>>) -> Self {
        Self { document }
    }
}

impl RenderSurface for FrameSurface {
    fn render(&self, document: String) {
        self.document.set(Some(document));
    }
}

#[component]
pub fn PreviewFrame(document: RwSignal<Option<String>>) -> impl IntoView {
    view! {
        <Show
            when=move || document.with(Option::is_some)
            fallback=|| view! { <p class=css::pending>"Rendering preview..."</p> }
        >
            <iframe
                class=css::frame
                title="HTML preview"
                sandbox=PREVIEW_SANDBOX
                srcdoc=move || document.get().unwrap_or_default()
            />
        </Show>
    }
}
