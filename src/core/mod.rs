//! Core logic of the dashboard, independent of the browser.
//!
//! This module provides:
//! - [`FileTree`] assembly from flat repository listings
//! - [`ContentRoot`] resolution of document references against the raw host
//! - [`rewrite_document`] and [`inline_resources`] for HTML previews
//! - [`GitHubClient`] over a pluggable [`Transport`]
//! - [`Dashboard`], which ties them together behind a [`Session`] guard

pub mod dashboard;
pub mod error;
pub mod github;
pub mod inline;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod resolve;
pub mod rewrite;
pub mod session;
pub mod tree;

pub use dashboard::{Dashboard, LoadedTree, RenderSurface};
pub use error::{ApiError, FetchError};
pub use github::{ApiRequest, ApiResponse, GitHubClient, Method, Transport, decode_content};
pub use inline::{ResourceFetcher, inline_resources};
pub use resolve::ContentRoot;
pub use rewrite::{ResolvedResource, ResourceKind, RewrittenDocument, rewrite_document};
pub use session::{Loaded, Session, SelectionToken};
pub use tree::{FileTree, NodeId, TreeNode, TreeRow};
