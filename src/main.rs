use leptos::prelude::*;
use repodeck::app::App;
use repodeck::config::{LOG_LEVEL_STORAGE_KEY, log_level_from};
use repodeck::utils::{dom, logger};
use wasm_bindgen::JsCast;

fn main() {
    console_error_panic_hook::set_once();
    logger::init(log_level_from(dom::local_get(LOG_LEVEL_STORAGE_KEY).as_deref()));

    let root = document()
        .get_element_by_id("app")
        .expect("Failed to find #app element")
        .unchecked_into::<web_sys::HtmlElement>();

    mount_to(root, App).forget();
}
