//! Repository domain types.
//!
//! Entries of the flat listing the tree is assembled from, the
//! owner/repository/ref snapshot they belong to, and loaded file content
//! with the preview kind derived from its extension.

use std::fmt;

use serde::{Deserialize, Serialize};

// =============================================================================
// Tree Entries
// =============================================================================

/// Kind of a repository entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryKind {
    Directory,
    File,
}

impl EntryKind {
    #[inline]
    pub fn is_dir(self) -> bool {
        matches!(self, Self::Directory)
    }
}

/// A single entry from the provider's flat repository listing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeEntry {
    /// Slash-delimited path relative to the repository root
    pub path: String,
    pub kind: EntryKind,
    /// Content hash (git object id)
    pub sha: String,
    /// Download URL or blob locator, when the listing provides one
    pub raw_url: Option<String>,
}

impl TreeEntry {
    pub fn file(path: impl Into<String>, sha: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::File,
            sha: sha.into(),
            raw_url: None,
        }
    }

    pub fn directory(path: impl Into<String>, sha: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::Directory,
            sha: sha.into(),
            raw_url: None,
        }
    }

    /// Final path segment.
    pub fn name(&self) -> &str {
        self.path
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or_default()
    }
}

// =============================================================================
// Repository Reference
// =============================================================================

/// The `{owner, repo, ref}` triple addressing a repository snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
    /// Branch, tag or commit the content is read from
    pub reference: String,
}

impl RepoRef {
    pub fn new(
        owner: impl Into<String>,
        name: impl Into<String>,
        reference: impl Into<String>,
    ) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
            reference: reference.into(),
        }
    }

    /// Whether this snapshot belongs to `owner/name`, regardless of ref.
    pub fn is_repo(&self, owner: &str, name: &str) -> bool {
        self.owner == owner && self.name == name
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}@{}", self.owner, self.name, self.reference)
    }
}

// =============================================================================
// File Content
// =============================================================================

/// Decoded content of a single file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileContent {
    pub path: String,
    pub sha: String,
    /// UTF-8 text, or the untouched base64 payload when `is_binary`
    pub content: String,
    pub is_binary: bool,
}

impl FileContent {
    /// Final path segment.
    pub fn file_name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or_default()
    }

    pub fn file_type(&self) -> FileType {
        FileType::from_path(&self.path)
    }
}

// =============================================================================
// File Types
// =============================================================================

/// File types with a dedicated preview.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileType {
    Html,
    Markdown,
    Image,
    Text,
}

impl FileType {
    /// Detect file type from path extension
    pub fn from_path(path: &str) -> Self {
        let name = path.rsplit('/').next().unwrap_or_default();
        let Some((_, ext)) = name.rsplit_once('.') else {
            return Self::Text;
        };
        match ext.to_lowercase().as_str() {
            "html" | "htm" => Self::Html,
            "md" | "markdown" => Self::Markdown,
            "jpg" | "jpeg" | "png" | "gif" | "svg" | "webp" | "avif" => Self::Image,
            _ => Self::Text,
        }
    }

    /// Whether the file has a rendered preview besides the code view.
    pub fn has_preview(self) -> bool {
        !matches!(self, Self::Text)
    }
}

/// Icon tint for a file, keyed by extension (GitHub linguist colors).
pub fn file_color(path: &str) -> &'static str {
    const DEFAULT: &str = "#8b949e";

    let name = path.rsplit('/').next().unwrap_or_default().to_lowercase();
    let Some((_, ext)) = name.rsplit_once('.') else {
        return DEFAULT;
    };
    match ext {
        "js" | "mjs" | "cjs" => "#f1e05a",
        "jsx" => "#61dafb",
        "ts" | "tsx" => "#2b7489",
        "html" | "htm" => "#e34c26",
        "css" => "#563d7c",
        "scss" | "sass" => "#c6538c",
        "less" => "#1d365d",
        "py" | "pyw" => "#3572A5",
        "java" | "class" | "jar" => "#b07219",
        "c" | "h" => "#555555",
        "cpp" | "cc" | "cxx" | "hpp" => "#f34b7d",
        "go" => "#00ADD8",
        "rs" => "#dea584",
        "rb" => "#701516",
        "php" => "#4F5D95",
        "md" | "markdown" => "#083fa1",
        "json" => "#292929",
        "yml" | "yaml" => "#cb171e",
        "toml" => "#9c4221",
        "sh" | "bash" => "#89e051",
        _ => DEFAULT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_type_detection() {
        assert_eq!(FileType::from_path("site/index.html"), FileType::Html);
        assert_eq!(FileType::from_path("INDEX.HTM"), FileType::Html);
        assert_eq!(FileType::from_path("docs/README.md"), FileType::Markdown);
        assert_eq!(FileType::from_path("img/logo.avif"), FileType::Image);
        assert_eq!(FileType::from_path("img/photo.JPG"), FileType::Image);
        assert_eq!(FileType::from_path("Makefile"), FileType::Text);
        assert_eq!(FileType::from_path("src/main.rs"), FileType::Text);
        // A dot in a directory name is not an extension
        assert_eq!(FileType::from_path("v1.html/LICENSE"), FileType::Text);
    }

    #[test]
    fn test_entry_name() {
        assert_eq!(TreeEntry::file("a/b/c.txt", "1").name(), "c.txt");
        assert_eq!(TreeEntry::directory("a/b/", "2").name(), "b");
        assert_eq!(TreeEntry::file("top", "3").name(), "top");
    }

    #[test]
    fn test_file_color() {
        assert_eq!(file_color("src/lib.rs"), "#dea584");
        assert_eq!(file_color("web/App.JSX"), "#61dafb");
        assert_eq!(file_color(".gitignore"), "#8b949e");
        assert_eq!(file_color("LICENSE"), "#8b949e");
    }

    #[test]
    fn test_repo_ref() {
        let repo = RepoRef::new("octo", "site", "main");
        assert!(repo.is_repo("octo", "site"));
        assert!(!repo.is_repo("octo", "other"));
        assert_eq!(repo.to_string(), "octo/site@main");
    }
}
