//! Data models and types for the application.
//!
//! Contains domain types for:
//! - [`TreeEntry`], [`EntryKind`] - Flat repository listing entries
//! - [`RepoRef`] - Owner/repository/ref triple addressing a snapshot
//! - [`FileContent`], [`FileType`] - Loaded files and their preview kind
//! - [`Repository`], [`User`], [`PullRequest`], ... - GitHub API payloads

mod entry;
mod github;

pub use entry::{EntryKind, FileContent, FileType, RepoRef, TreeEntry, file_color};
pub use github::{
    Blob, CommitInfo, CommitResponse, ContentItem, DeleteFileRequest, GitTree, GitTreeObject,
    GithubErrorBody, NewRepository, Owner, PullRequest, PullRequestStatus, PutFileRequest,
    Repository, User,
};
