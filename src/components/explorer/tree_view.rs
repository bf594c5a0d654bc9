//! Navigable tree of the selected repository.
//!
//! Only rows whose ancestors are expanded are rendered; expanding a
//! directory adds its id to the shared expanded set.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_icons::Icon;

use crate::app::AppContext;
use crate::components::icons as ic;
use crate::config::TREE_INDENT_PX;
use crate::core::{LoadedTree, TreeRow};
use crate::models::file_color;

stylance::import_crate_style!(css, "src/components/explorer/tree_view.module.css");

#[component]
pub fn TreeView() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let tree = ctx.tree;

    view! {
        <div class=css::tree role="tree" aria-label="Repository files">
            {move || match tree.get() {
                Some(loaded) => view! { <TreeRows loaded=loaded /> }.into_any(),
                None => view! {
                    <p class=css::empty>"Select a repository"</p>
                }.into_any(),
            }}
        </div>
    }
}

/// Rows of one loaded tree; rebuilt whenever another tree is loaded.
#[component]
fn TreeRows(loaded: Arc<LoadedTree>) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let expanded = ctx.expanded;

    let partial = loaded.partial;
    let is_empty = loaded.tree.is_empty();
    let rows_tree = Arc::clone(&loaded);
    let rows = Memo::new(move |_| expanded.with(|e| rows_tree.tree.visible_rows(e)));

    view! {
        <NewEntry />
        {partial.then(|| view! {
            <p class=css::notice>"Listing is incomplete; showing what GitHub returned."</p>
        })}
        {is_empty.then(|| view! { <p class=css::empty>"This repository is empty"</p> })}
        <For
            each=move || rows.get()
            key=|row| row.id
            children=move |row| view! { <TreeRowItem loaded=Arc::clone(&loaded) row=row /> }
        />
    }
}

/// Path input creating an empty file or a folder in one commit.
#[component]
fn NewEntry() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let path = RwSignal::new(String::new());

    let create = move |folder: bool| {
        let ctx = ctx.clone();
        move |_: leptos::ev::MouseEvent| {
            let value = path.get_untracked();
            if value.trim().is_empty() {
                return;
            }
            ctx.create_entry(value, folder);
            path.set(String::new());
        }
    };

    view! {
        <div class=css::newEntry>
            <input
                class=css::newPath
                type="text"
                placeholder="path/to/new"
                prop:value=move || path.get()
                on:input=move |ev| path.set(event_target_value(&ev))
            />
            <button class=css::newButton title="New file" on:click=create(false)>
                <Icon icon=ic::PLUS />
                "File"
            </button>
            <button class=css::newButton title="New folder" on:click=create(true)>
                <Icon icon=ic::PLUS />
                "Folder"
            </button>
        </div>
    }
}

#[component]
fn TreeRowItem(loaded: Arc<LoadedTree>, row: TreeRow) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let (expanded, selected_path) = (ctx.expanded, ctx.selected_path);

    let node = &loaded.tree[row.id];
    let id = row.id;
    let is_dir = node.is_dir();
    let name = node.name.clone();
    let path = loaded.tree.path_of(id);
    let indent = format!("padding-left: {}px", 8 + row.depth * TREE_INDENT_PX);

    let is_open = Signal::derive(move || expanded.with(|e| e.contains(&id)));
    let select_path = path.clone();
    let is_selected = Signal::derive(move || {
        selected_path.with(|p| p.as_deref() == Some(select_path.as_str()))
    });

    let file_icon = ic::file_icon(&path);
    let icon = move || {
        if !is_dir {
            file_icon
        } else if is_open.get() {
            ic::FOLDER_OPEN
        } else {
            ic::FOLDER
        }
    };
    let color = if is_dir { "#54aeff" } else { file_color(&node.name) };
    let handle_click = move |_: leptos::ev::MouseEvent| {
        if is_dir {
            ctx.toggle_dir(id);
        } else {
            ctx.open_file(path.clone());
        }
    };

    view! {
        <div
            class=move || {
                if is_selected.get() {
                    format!("{} {}", css::row, css::rowSelected)
                } else {
                    css::row.to_string()
                }
            }
            style=indent
            role="treeitem"
            aria-expanded=move || is_dir.then(|| is_open.get().to_string())
            on:click=handle_click
        >
            <span class=css::chevron>
                {move || is_dir.then(|| {
                    let chevron = if is_open.get() { ic::CHEVRON_DOWN } else { ic::CHEVRON_RIGHT };
                    view! { <Icon icon=chevron /> }
                })}
            </span>
            <span class=css::icon style=format!("color: {color}")>
                {move || view! { <Icon icon=icon() /> }}
            </span>
            <span class=css::name>{name}</span>
        </div>
    }
}
