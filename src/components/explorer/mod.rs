//! Repository explorer UI components.
//!
//! Components:
//! - [`Explorer`] - Tree and file view side by side
//! - [`TreeView`] - Expandable file tree of the selected repository
//! - [`FileView`] - Code view and rendered preview of the selected file
//! - [`PreviewFrame`] - Sandboxed frame for HTML previews
//! - [`PullRequestList`] - Pull requests of the selected repository

#[allow(clippy::module_inception)]
mod explorer;
mod file_view;
mod preview;
mod pull_requests;
mod tree_view;

pub use explorer::Explorer;
pub use file_view::FileView;
pub use preview::{FrameSurface, PreviewFrame};
pub use pull_requests::PullRequestList;
pub use tree_view::TreeView;
