//! UI components built with Leptos.
//!
//! - [`explorer`] - Repository tree, file view and HTML preview
//! - [`icons`] - Centralized icon definitions (change theme here)
//! - [`repo_list`] - Repository sidebar
//! - [`status`] - Status bar with the inline status line
//! - [`token_prompt`] - Access token entry

pub mod explorer;
pub mod icons;
pub mod repo_list;
pub mod status;
pub mod token_prompt;
