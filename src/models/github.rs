//! GitHub REST API payloads.
//!
//! Only the fields the dashboard reads are modeled; serde ignores the rest.

use base64::Engine;
use base64::prelude::BASE64_STANDARD;
use serde::{Deserialize, Serialize};

use super::entry::{EntryKind, TreeEntry};

// =============================================================================
// Users & Repositories
// =============================================================================

/// Authenticated user (`GET /user`).
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct User {
    pub login: String,
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl User {
    /// Display name, preferring the login.
    pub fn display_name(&self) -> &str {
        if !self.login.is_empty() {
            &self.login
        } else {
            self.name.as_deref().unwrap_or("User")
        }
    }
}

/// Repository owner.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Owner {
    pub login: String,
}

/// Repository summary (`GET /user/repos`, `GET /repos/{owner}/{repo}`).
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Repository {
    pub name: String,
    pub full_name: String,
    pub owner: Owner,
    #[serde(default)]
    pub private: bool,
    pub html_url: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub default_branch: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Body of `POST /user/repos`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NewRepository {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub private: bool,
    pub auto_init: bool,
}

// =============================================================================
// Trees & Contents
// =============================================================================

/// Recursive listing from the git trees API.
#[derive(Clone, Debug, Deserialize)]
pub struct GitTree {
    pub sha: String,
    #[serde(default)]
    pub truncated: bool,
    pub tree: Vec<GitTreeObject>,
}

/// One object of a [`GitTree`].
#[derive(Clone, Debug, Deserialize)]
pub struct GitTreeObject {
    pub path: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub sha: String,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub url: Option<String>,
}

impl GitTreeObject {
    /// Convert to a [`TreeEntry`]; submodules (`commit`) have no entry.
    pub fn to_entry(&self) -> Option<TreeEntry> {
        let kind = match self.kind.as_str() {
            "blob" => EntryKind::File,
            "tree" => EntryKind::Directory,
            _ => return None,
        };
        Some(TreeEntry {
            path: self.path.clone(),
            kind,
            sha: self.sha.clone(),
            raw_url: self.url.clone(),
        })
    }
}

/// Item from the contents API, either in a directory listing or a single
/// file response (which also carries `content` and `encoding`).
#[derive(Clone, Debug, Deserialize)]
pub struct ContentItem {
    pub name: String,
    pub path: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub sha: String,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub download_url: Option<String>,
    #[serde(default)]
    pub git_url: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub encoding: Option<String>,
}

impl ContentItem {
    /// Convert to a [`TreeEntry`]; submodules have no entry.
    pub fn to_entry(&self) -> Option<TreeEntry> {
        let kind = match self.kind.as_str() {
            "file" | "symlink" => EntryKind::File,
            "dir" => EntryKind::Directory,
            _ => return None,
        };
        Some(TreeEntry {
            path: self.path.clone(),
            kind,
            sha: self.sha.clone(),
            raw_url: self.download_url.clone().or_else(|| self.git_url.clone()),
        })
    }
}

/// Blob from the git blobs API.
#[derive(Clone, Debug, Deserialize)]
pub struct Blob {
    pub sha: String,
    pub content: String,
    pub encoding: String,
}

// =============================================================================
// Commits
// =============================================================================

/// Body of `PUT /repos/{owner}/{repo}/contents/{path}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PutFileRequest {
    pub message: String,
    /// Base64 encoded file content
    pub content: String,
    /// Blob sha of the file being replaced; required for updates
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
}

impl PutFileRequest {
    /// Create or overwrite a file with `content`.
    pub fn new(message: impl Into<String>, content: &[u8]) -> Self {
        Self {
            message: message.into(),
            content: BASE64_STANDARD.encode(content),
            sha: None,
            branch: None,
        }
    }

    /// Update the file whose current blob is `sha`.
    pub fn with_sha(mut self, sha: impl Into<String>) -> Self {
        self.sha = Some(sha.into());
        self
    }

    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }
}

/// Body of `DELETE /repos/{owner}/{repo}/contents/{path}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DeleteFileRequest {
    pub message: String,
    pub sha: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
}

/// Response of a contents write.
#[derive(Clone, Debug, Deserialize)]
pub struct CommitResponse {
    /// The written file; `None` after a delete
    #[serde(default)]
    pub content: Option<ContentItem>,
    pub commit: CommitInfo,
}

#[derive(Clone, Debug, Deserialize)]
pub struct CommitInfo {
    pub sha: String,
    #[serde(default)]
    pub message: Option<String>,
}

// =============================================================================
// Pull Requests
// =============================================================================

/// Pull request summary (`GET /repos/{owner}/{repo}/pulls`).
#[derive(Clone, Debug, Deserialize)]
pub struct PullRequest {
    pub number: u64,
    pub title: String,
    pub state: String,
    pub html_url: String,
    pub user: Owner,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub merged_at: Option<String>,
    #[serde(default)]
    pub draft: bool,
}

/// Display status of a pull request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PullRequestStatus {
    Draft,
    Open,
    Merged,
    Closed,
}

impl PullRequest {
    pub fn status(&self) -> PullRequestStatus {
        if self.draft {
            PullRequestStatus::Draft
        } else if self.merged_at.is_some() {
            PullRequestStatus::Merged
        } else if self.state == "open" {
            PullRequestStatus::Open
        } else {
            PullRequestStatus::Closed
        }
    }
}

impl PullRequestStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Open => "Open",
            Self::Merged => "Merged",
            Self::Closed => "Closed",
        }
    }
}

// =============================================================================
// Errors
// =============================================================================

/// Error body returned by GitHub on non-2xx responses.
#[derive(Clone, Debug, Deserialize)]
pub struct GithubErrorBody {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_tree_conversion() {
        let tree: GitTree = serde_json::from_str(
            r#"{
                "sha": "root",
                "truncated": false,
                "tree": [
                    {"path": "src", "mode": "040000", "type": "tree", "sha": "t1"},
                    {"path": "src/lib.rs", "mode": "100644", "type": "blob", "sha": "b1", "size": 12,
                     "url": "https://api.github.com/repos/o/r/git/blobs/b1"},
                    {"path": "vendor/dep", "mode": "160000", "type": "commit", "sha": "c1"}
                ]
            }"#,
        )
        .unwrap();

        let entries: Vec<TreeEntry> = tree.tree.iter().filter_map(|o| o.to_entry()).collect();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].kind, EntryKind::Directory);
        assert_eq!(entries[1].path, "src/lib.rs");
        assert_eq!(
            entries[1].raw_url.as_deref(),
            Some("https://api.github.com/repos/o/r/git/blobs/b1")
        );
    }

    #[test]
    fn test_content_item_conversion() {
        let items: Vec<ContentItem> = serde_json::from_str(
            r#"[
                {"name": "docs", "path": "docs", "type": "dir", "sha": "d1"},
                {"name": "index.html", "path": "index.html", "type": "file", "sha": "f1",
                 "download_url": "https://raw.githubusercontent.com/o/r/main/index.html"},
                {"name": "lib", "path": "lib", "type": "submodule", "sha": "s1"}
            ]"#,
        )
        .unwrap();

        let entries: Vec<TreeEntry> = items.iter().filter_map(|i| i.to_entry()).collect();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0], TreeEntry::directory("docs", "d1"));
        assert_eq!(
            entries[1].raw_url.as_deref(),
            Some("https://raw.githubusercontent.com/o/r/main/index.html")
        );
    }

    #[test]
    fn test_pull_request_status() {
        let mut pr: PullRequest = serde_json::from_str(
            r#"{"number": 7, "title": "Fix", "state": "closed",
                "html_url": "https://github.com/o/r/pull/7", "user": {"login": "octo"},
                "merged_at": "2024-01-01T00:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(pr.status(), PullRequestStatus::Merged);

        pr.merged_at = None;
        assert_eq!(pr.status(), PullRequestStatus::Closed);

        pr.state = "open".to_string();
        assert_eq!(pr.status(), PullRequestStatus::Open);

        pr.draft = true;
        assert_eq!(pr.status().label(), "Draft");
    }

    #[test]
    fn test_put_request_skips_empty_fields() {
        let body = PutFileRequest::new("Add file", b"hi");
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"message":"Add file","content":"aGk="}"#
        );

        let update = PutFileRequest::new("Edit", b"hi").with_sha("abc").with_branch("dev");
        assert_eq!(
            serde_json::to_string(&update).unwrap(),
            r#"{"message":"Edit","content":"aGk=","sha":"abc","branch":"dev"}"#
        );
    }
}
