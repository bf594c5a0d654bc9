//! Dashboard facade: loading repository trees and files, rendering HTML
//! previews, and committing changes.
//!
//! Every load takes a [`SelectionToken`](super::session::SelectionToken)
//! when it starts. Results that arrive after a newer selection are dropped
//! and reported as [`Loaded::Superseded`]; they never touch state or the
//! render surface.
//! Writes reload the tree of the repository they changed.

use std::sync::{Arc, Mutex, MutexGuard};

use super::error::ApiError;
use super::github::{GitHubClient, Transport, decode_content};
use super::inline::inline_resources;
use super::resolve::ContentRoot;
use super::rewrite::rewrite_document;
use super::session::{Loaded, Session};
use super::tree::FileTree;
use crate::config::{DEFAULT_BRANCH, HEAD_REF};
use crate::models::{
    ContentItem, DeleteFileRequest, FileContent, FileType, GitTreeObject, NewRepository,
    PullRequest, PutFileRequest, RepoRef, TreeEntry,
};

/// Destination of rendered preview documents.
pub trait RenderSurface {
    /// Show `document`, replacing whatever was shown before.
    fn render(&self, document: String);
}

/// An assembled repository tree together with the snapshot it came from.
#[derive(Debug)]
pub struct LoadedTree {
    pub repo: RepoRef,
    pub tree: FileTree,
    /// Listing is incomplete (truncated by GitHub, or top-level only)
    pub partial: bool,
}

#[derive(Default)]
struct State {
    tree: Option<Arc<LoadedTree>>,
    file: Option<Arc<FileContent>>,
}

pub struct Dashboard<T, R> {
    client: GitHubClient<T>,
    surface: R,
    session: Session,
    state: Mutex<State>,
}

impl<T: Transport, R: RenderSurface> Dashboard<T, R> {
    pub fn new(client: GitHubClient<T>, surface: R) -> Self {
        Self {
            client,
            surface,
            session: Session::new(),
            state: Mutex::new(State::default()),
        }
    }

    pub fn client(&self) -> &GitHubClient<T> {
        &self.client
    }

    pub fn surface(&self) -> &R {
        &self.surface
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn current_tree(&self) -> Option<Arc<LoadedTree>> {
        self.state().tree.clone()
    }

    pub fn current_file(&self) -> Option<Arc<FileContent>> {
        self.state().file.clone()
    }

    // =========================================================================
    // Trees
    // =========================================================================

    /// Load and assemble the file tree of `owner/repo` at its default branch.
    ///
    /// The recursive git trees listing is tried first; when it is unavailable
    /// the top-level contents listing is used instead.
    pub async fn load_tree(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<Loaded<Arc<LoadedTree>>, ApiError> {
        let token = self.session.begin_tree();
        log::info!("Loading tree for {}/{}", owner, repo);

        let result = self.fetch_tree(owner, repo).await;
        if !self.session.is_current_tree(token) {
            log::debug!("Dropping superseded tree for {}/{}", owner, repo);
            return Ok(Loaded::Superseded);
        }

        let (repo_ref, entries, partial) = result?;
        let loaded = Arc::new(LoadedTree {
            tree: FileTree::build(&entries),
            repo: repo_ref,
            partial,
        });
        log::info!(
            "Loaded {}: {} files{}",
            loaded.repo,
            loaded.tree.file_count(),
            if partial { " (partial)" } else { "" }
        );

        // Files picked from the previous tree must not land on this one
        self.session.supersede_selections();
        let mut state = self.state();
        state.tree = Some(Arc::clone(&loaded));
        state.file = None;
        Ok(Loaded::Current(loaded))
    }

    async fn fetch_tree(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<(RepoRef, Vec<TreeEntry>, bool), ApiError> {
        let branch = self
            .client
            .repository(owner, repo)
            .await?
            .default_branch
            .filter(|branch| !branch.is_empty())
            .unwrap_or_else(|| DEFAULT_BRANCH.to_string());

        let (entries, partial) = match self.client.git_tree(owner, repo, &branch, true).await {
            Ok(tree) => {
                let entries = tree.tree.iter().filter_map(GitTreeObject::to_entry).collect();
                (entries, tree.truncated)
            }
            Err(err) => {
                log::warn!("Recursive tree unavailable ({}); listing top level only", err);
                let items = self
                    .client
                    .list_contents(owner, repo, "", Some(&branch))
                    .await?;
                let entries = items.iter().filter_map(ContentItem::to_entry).collect();
                (entries, true)
            }
        };
        Ok((RepoRef::new(owner, repo, branch), entries, partial))
    }

    // =========================================================================
    // Files
    // =========================================================================

    /// Load one file of `owner/repo`.
    ///
    /// Uses the contents API; when that fails (large files come back without
    /// content) and the path is known in the current tree, the blob is read
    /// by sha instead.
    pub async fn load_file(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
    ) -> Result<Loaded<Arc<FileContent>>, ApiError> {
        Ok(self.load_file_at(owner, repo, path).await?.map(|(file, _)| file))
    }

    /// [`load_file`](Self::load_file), then render the preview when the file
    /// is an HTML document.
    pub async fn open_file(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
    ) -> Result<Loaded<Arc<FileContent>>, ApiError> {
        let Loaded::Current((file, snapshot)) = self.load_file_at(owner, repo, path).await? else {
            return Ok(Loaded::Superseded);
        };
        if file.file_type() == FileType::Html
            && !file.is_binary
            && self
                .render_html_preview(&file.content, &snapshot, &file.path)
                .await
                .is_superseded()
        {
            return Ok(Loaded::Superseded);
        }
        Ok(Loaded::Current(file))
    }

    /// Load a file together with the snapshot it was read from.
    async fn load_file_at(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
    ) -> Result<Loaded<(Arc<FileContent>, RepoRef)>, ApiError> {
        let token = self.session.begin_selection();
        log::info!("Loading {}/{}:{}", owner, repo, path);

        let result = self.fetch_file(owner, repo, path).await;
        if !self.session.is_current(token) {
            log::debug!("Dropping superseded file {}", path);
            return Ok(Loaded::Superseded);
        }

        let (file, snapshot) = result?;
        let file = Arc::new(file);
        self.state().file = Some(Arc::clone(&file));
        Ok(Loaded::Current((file, snapshot)))
    }

    async fn fetch_file(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
    ) -> Result<(FileContent, RepoRef), ApiError> {
        let tree = self
            .current_tree()
            .filter(|tree| tree.repo.is_repo(owner, repo));
        let snapshot = match &tree {
            Some(tree) => tree.repo.clone(),
            None => RepoRef::new(owner, repo, HEAD_REF),
        };
        let reference = tree.as_ref().map(|tree| tree.repo.reference.as_str());

        let err = match self.client.file_contents(owner, repo, path, reference).await {
            Ok(file) => return Ok((file, snapshot)),
            Err(err) => err,
        };

        let sha = tree.as_ref().and_then(|tree| {
            let id = tree.tree.find(path)?;
            let entry = tree.tree[id].entry.as_ref()?;
            (!entry.kind.is_dir()).then(|| entry.sha.clone())
        });
        let Some(sha) = sha else {
            return Err(err);
        };

        log::warn!("Contents API failed for {} ({}); reading blob {}", path, err, sha);
        let blob = self.client.blob(owner, repo, &sha).await?;
        let file = decode_content(path, &blob.sha, &blob.encoding, &blob.content)?;
        Ok((file, snapshot))
    }

    // =========================================================================
    // Preview
    // =========================================================================

    /// Rewrite, inline and render an HTML document located at `file_path`
    /// in the `snapshot` it was read from.
    ///
    /// Renders once, and only if no newer selection started meanwhile and
    /// the loaded tree (if any) is still that snapshot.
    pub async fn render_html_preview(
        &self,
        html: &str,
        snapshot: &RepoRef,
        file_path: &str,
    ) -> Loaded<()> {
        let token = self.session.current_selection();
        if !self.is_current_snapshot(snapshot) {
            log::debug!("Not previewing {} from {}: another tree is loaded", file_path, snapshot);
            return Loaded::Superseded;
        }

        let root = ContentRoot::for_file(snapshot.clone(), file_path);
        let rewritten = rewrite_document(html, &root);
        let document = inline_resources(&rewritten, &self.client).await;

        if !self.session.is_current(token) || !self.is_current_snapshot(snapshot) {
            log::debug!("Dropping superseded preview of {}", file_path);
            return Loaded::Superseded;
        }
        self.surface.render(document);
        Loaded::Current(())
    }

    fn is_current_snapshot(&self, snapshot: &RepoRef) -> bool {
        self.current_tree().is_none_or(|tree| tree.repo == *snapshot)
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Create or update `path` in one commit, then reload the tree.
    ///
    /// `sha` is the blob being replaced; `None` creates a new file.
    pub async fn commit_file(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        content: &[u8],
        message: &str,
        sha: Option<&str>,
    ) -> Result<Loaded<Arc<LoadedTree>>, ApiError> {
        let mut request = PutFileRequest::new(message, content);
        if let Some(sha) = sha {
            request = request.with_sha(sha);
        }
        if let Some(branch) = self.branch_of(owner, repo) {
            request = request.with_branch(branch);
        }

        let response = self.client.put_file(owner, repo, path, &request).await?;
        log::info!("Committed {} to {}/{} ({})", path, owner, repo, response.commit.sha);
        self.load_tree(owner, repo).await
    }

    /// Git has no empty directories; a folder is created with a `.gitkeep`.
    pub async fn create_folder(
        &self,
        owner: &str,
        repo: &str,
        dir: &str,
        message: &str,
    ) -> Result<Loaded<Arc<LoadedTree>>, ApiError> {
        let path = format!("{}/.gitkeep", dir.trim_matches('/'));
        self.commit_file(owner, repo, &path, b"", message, None).await
    }

    /// Delete `path` (blob `sha`) in one commit, then reload the tree.
    pub async fn delete_file(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        sha: &str,
        message: &str,
    ) -> Result<Loaded<Arc<LoadedTree>>, ApiError> {
        let request = DeleteFileRequest {
            message: message.to_string(),
            sha: sha.to_string(),
            branch: self.branch_of(owner, repo),
        };
        let response = self.client.delete_file(owner, repo, path, &request).await?;
        log::info!("Deleted {} from {}/{} ({})", path, owner, repo, response.commit.sha);
        self.load_tree(owner, repo).await
    }

    /// Create a repository for the signed-in user and load its tree.
    pub async fn create_repository(
        &self,
        new: &NewRepository,
    ) -> Result<Loaded<Arc<LoadedTree>>, ApiError> {
        let created = self.client.create_repository(new).await?;
        log::info!("Created repository {}", created.full_name);
        self.load_tree(&created.owner.login, &created.name).await
    }

    /// Delete `owner/repo`. When it is the loaded repository, the tree and
    /// file are cleared and pending loads superseded.
    pub async fn delete_repository(&self, owner: &str, repo: &str) -> Result<(), ApiError> {
        self.client.delete_repository(owner, repo).await?;
        log::info!("Deleted repository {}/{}", owner, repo);

        if self.branch_of(owner, repo).is_some() {
            self.session.begin_tree();
            let mut state = self.state();
            state.tree = None;
            state.file = None;
        }
        Ok(())
    }

    /// Pull requests of `owner/repo` in any state.
    pub async fn pull_requests(&self, owner: &str, repo: &str) -> Result<Vec<PullRequest>, ApiError> {
        self.client.pull_requests(owner, repo).await
    }

    /// Ref of the loaded tree when it belongs to `owner/repo`.
    fn branch_of(&self, owner: &str, repo: &str) -> Option<String> {
        self.current_tree()
            .filter(|tree| tree.repo.is_repo(owner, repo))
            .map(|tree| tree.repo.reference.clone())
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::github::Method;
    use crate::core::mock::MockTransport;
    use futures_util::future::join;
    use serde_json::json;

    const API: &str = "https://api.github.com/repos/octo/site";
    const RAW: &str = "https://raw.githubusercontent.com/octo/site/main";

    #[derive(Default)]
    struct RecordingSurface {
        documents: Mutex<Vec<String>>,
    }

    impl RenderSurface for RecordingSurface {
        fn render(&self, document: String) {
            self.documents.lock().unwrap().push(document);
        }
    }

    impl RecordingSurface {
        fn documents(&self) -> Vec<String> {
            self.documents.lock().unwrap().clone()
        }
    }

    fn repo_routes() -> MockTransport {
        MockTransport::new()
            .json(API, json!({
                "name": "site", "full_name": "octo/site", "owner": {"login": "octo"},
                "html_url": "https://github.com/octo/site", "default_branch": "main"
            }))
            .json(
                &format!("{API}/git/trees/main?recursive=1"),
                json!({"sha": "root", "truncated": false, "tree": [
                    {"path": "index.html", "type": "blob", "sha": "h1"},
                    {"path": "css", "type": "tree", "sha": "t1"},
                    {"path": "css/site.css", "type": "blob", "sha": "c1"},
                    {"path": "big.txt", "type": "blob", "sha": "b1"}
                ]}),
            )
    }

    fn with_blog(transport: MockTransport) -> MockTransport {
        let blog = "https://api.github.com/repos/octo/blog";
        transport
            .json(blog, json!({
                "name": "blog", "full_name": "octo/blog", "owner": {"login": "octo"},
                "html_url": "https://github.com/octo/blog", "default_branch": "main"
            }))
            .json(
                &format!("{blog}/git/trees/main?recursive=1"),
                json!({"sha": "root", "tree": [{"path": "post.md", "type": "blob", "sha": "p1"}]}),
            )
    }

    fn file_json(path: &str, sha: &str, base64: &str) -> serde_json::Value {
        json!({
            "name": path, "path": path, "type": "file", "sha": sha,
            "encoding": "base64", "content": base64
        })
    }

    fn dashboard(transport: MockTransport) -> Dashboard<MockTransport, RecordingSurface> {
        Dashboard::new(
            GitHubClient::new(transport).with_token("t"),
            RecordingSurface::default(),
        )
    }

    #[tokio::test]
    async fn test_load_tree() {
        let dash = dashboard(repo_routes());
        let loaded = dash.load_tree("octo", "site").await.unwrap().current().unwrap();

        assert_eq!(loaded.repo, RepoRef::new("octo", "site", "main"));
        assert!(!loaded.partial);
        assert_eq!(loaded.tree.file_count(), 3);
        assert!(loaded.tree.find("css/site.css").is_some());
        assert!(dash.current_tree().is_some());
    }

    #[tokio::test]
    async fn test_load_tree_falls_back_to_contents() {
        let transport = MockTransport::new()
            .json(API, json!({
                "name": "site", "full_name": "octo/site", "owner": {"login": "octo"},
                "html_url": "https://github.com/octo/site"
            }))
            .route(
                Method::Get,
                &format!("{API}/git/trees/main?recursive=1"),
                409,
                r#"{"message": "Git Repository is empty."}"#,
            )
            .json(
                &format!("{API}/contents?ref=main"),
                json!([
                    {"name": "docs", "path": "docs", "type": "dir", "sha": "d1"},
                    {"name": "README.md", "path": "README.md", "type": "file", "sha": "r1"}
                ]),
            );
        let dash = dashboard(transport);

        let loaded = dash.load_tree("octo", "site").await.unwrap().current().unwrap();
        assert!(loaded.partial);
        assert_eq!(loaded.repo.reference, "main");
        assert_eq!(loaded.tree.len(), 3);
        assert!(loaded.tree[loaded.tree.find("docs").unwrap()].is_dir());
    }

    #[tokio::test]
    async fn test_load_tree_error_keeps_previous() {
        let dash = dashboard(repo_routes());
        dash.load_tree("octo", "site").await.unwrap();

        let err = dash.load_tree("octo", "missing").await.unwrap_err();
        assert!(matches!(err, ApiError::Github { status: 404, .. }));
        assert_eq!(dash.current_tree().unwrap().repo.name, "site");
    }

    #[tokio::test]
    async fn test_load_file_blob_fallback() {
        // Files over 1 MB come back from the contents API without content
        let transport = repo_routes()
            .json(
                &format!("{API}/contents/big.txt?ref=main"),
                json!({"name": "big.txt", "path": "big.txt", "type": "file", "sha": "b1",
                       "encoding": "none", "content": ""}),
            )
            .json(
                &format!("{API}/git/blobs/b1"),
                json!({"sha": "b1", "encoding": "base64", "content": "aGVs\nbG8=\n"}),
            );
        let dash = dashboard(transport);
        dash.load_tree("octo", "site").await.unwrap();

        let file = dash.load_file("octo", "site", "big.txt").await.unwrap().current().unwrap();
        assert_eq!(file.content, "hello");
        assert_eq!(dash.current_file().unwrap().path, "big.txt");
    }

    #[tokio::test]
    async fn test_load_file_unknown_path_reports_error() {
        let dash = dashboard(repo_routes());
        dash.load_tree("octo", "site").await.unwrap();

        let err = dash.load_file("octo", "site", "nope.txt").await.unwrap_err();
        assert!(matches!(err, ApiError::Github { status: 404, .. }));
        assert!(dash.current_file().is_none());
    }

    #[tokio::test]
    async fn test_stale_file_load_superseded() {
        let slow = format!("{API}/contents/a.txt?ref=main");
        let transport = repo_routes()
            .json(&slow, file_json("a.txt", "a1", "c2xvdw=="))
            .delay(&slow, 5)
            .json(&format!("{API}/contents/b.txt?ref=main"), file_json("b.txt", "b1", "ZmFzdA=="));
        let dash = dashboard(transport);
        dash.load_tree("octo", "site").await.unwrap();

        let (first, second) = join(
            dash.load_file("octo", "site", "a.txt"),
            dash.load_file("octo", "site", "b.txt"),
        )
        .await;

        assert!(first.unwrap().is_superseded());
        assert_eq!(second.unwrap().current().unwrap().content, "fast");
        assert_eq!(dash.current_file().unwrap().path, "b.txt");
    }

    #[tokio::test]
    async fn test_preview_inlines_and_renders_once() {
        let html = r#"<html><head><link rel="stylesheet" href="css/site.css"></head><body><img src="logo.png"></body></html>"#;
        let transport = repo_routes()
            .route(Method::Get, &format!("{RAW}/css/site.css"), 200, "h1 { color: red }");
        let dash = dashboard(transport);
        dash.load_tree("octo", "site").await.unwrap();

        let site = RepoRef::new("octo", "site", "main");
        let outcome = dash.render_html_preview(html, &site, "index.html").await;
        assert_eq!(outcome, Loaded::Current(()));

        let documents = dash.surface().documents();
        assert_eq!(documents.len(), 1);
        assert!(documents[0].contains("<style>h1 { color: red }</style>"));
        assert!(documents[0].contains(&format!(r#"src="{RAW}/logo.png""#)));
    }

    #[tokio::test]
    async fn test_preview_superseded_never_renders() {
        let css = format!("{RAW}/css/site.css");
        let transport = repo_routes().route(Method::Get, &css, 200, "p {}").delay(&css, 3);
        let dash = dashboard(transport);
        dash.load_tree("octo", "site").await.unwrap();

        let html = r#"<link rel="stylesheet" href="css/site.css">"#;
        let site = RepoRef::new("octo", "site", "main");
        let (outcome, ()) = join(dash.render_html_preview(html, &site, "index.html"), async {
            dash.session().begin_selection();
        })
        .await;

        assert!(outcome.is_superseded());
        assert!(dash.surface().documents().is_empty());
    }

    #[tokio::test]
    async fn test_open_file_renders_html() {
        let transport = repo_routes().json(
            &format!("{API}/contents/index.html?ref=main"),
            file_json("index.html", "h1", "PHA+aGk8L3A+"),
        );
        let dash = dashboard(transport);
        dash.load_tree("octo", "site").await.unwrap();

        let file = dash.open_file("octo", "site", "index.html").await.unwrap();
        assert_eq!(file.current().unwrap().content, "<p>hi</p>");
        assert_eq!(dash.surface().documents(), vec!["<p>hi</p>".to_string()]);
    }

    #[tokio::test]
    async fn test_new_tree_supersedes_pending_file() {
        let slow = format!("{API}/contents/a.txt?ref=main");
        let transport = repo_routes()
            .json(&slow, file_json("a.txt", "a1", "c2xvdw=="))
            .delay(&slow, 5);
        let dash = dashboard(transport);
        dash.load_tree("octo", "site").await.unwrap();

        let (file, tree) = join(
            dash.load_file("octo", "site", "a.txt"),
            dash.load_tree("octo", "site"),
        )
        .await;
        assert!(file.unwrap().is_superseded());
        assert!(tree.unwrap().current().is_some());
        assert!(dash.current_file().is_none());
    }

    #[tokio::test]
    async fn test_slower_tree_load_superseded() {
        let site_tree = format!("{API}/git/trees/main?recursive=1");
        let dash = dashboard(with_blog(repo_routes()).delay(&site_tree, 5));

        let (site, blog) = join(
            dash.load_tree("octo", "site"),
            dash.load_tree("octo", "blog"),
        )
        .await;

        assert!(site.unwrap().is_superseded());
        assert_eq!(blog.unwrap().current().unwrap().repo.name, "blog");
        assert_eq!(dash.current_tree().unwrap().repo.name, "blog");
    }

    #[tokio::test]
    async fn test_applied_tree_supersedes_earlier_file() {
        let blog_tree = "https://api.github.com/repos/octo/blog/git/trees/main?recursive=1";
        let slow = format!("{API}/contents/a.txt?ref=main");
        let transport = with_blog(repo_routes())
            .delay(blog_tree, 3)
            .json(&slow, file_json("a.txt", "a1", "c2xvdw=="))
            .delay(&slow, 8);
        let dash = dashboard(transport);
        dash.load_tree("octo", "site").await.unwrap();

        // The file is picked from the old tree while the new one is loading
        let (tree, file) = join(
            dash.load_tree("octo", "blog"),
            dash.load_file("octo", "site", "a.txt"),
        )
        .await;

        assert!(tree.unwrap().current().is_some());
        assert!(file.unwrap().is_superseded());
        assert_eq!(dash.current_tree().unwrap().repo.name, "blog");
        assert!(dash.current_file().is_none());
    }

    #[tokio::test]
    async fn test_preview_from_other_repository_not_rendered() {
        let transport = repo_routes().json(
            "https://api.github.com/repos/octo/other/contents/index.html",
            file_json("index.html", "o1", "PGltZyBzcmM9ImEucG5nIj4="),
        );
        let dash = dashboard(transport);
        dash.load_tree("octo", "site").await.unwrap();

        let file = dash.open_file("octo", "other", "index.html").await.unwrap();
        assert!(file.is_superseded());
        assert!(dash.surface().documents().is_empty());
    }

    #[tokio::test]
    async fn test_preview_without_tree_uses_file_repository() {
        let transport = MockTransport::new().json(
            "https://api.github.com/repos/octo/other/contents/index.html",
            file_json("index.html", "o1", "PGltZyBzcmM9ImEucG5nIj4="),
        );
        let dash = dashboard(transport);

        let file = dash.open_file("octo", "other", "index.html").await.unwrap();
        assert!(file.current().is_some());
        assert_eq!(
            dash.surface().documents(),
            vec![r#"<img src="https://raw.githubusercontent.com/octo/other/HEAD/a.png">"#.to_string()]
        );
    }

    #[tokio::test]
    async fn test_commit_file_reloads_tree() {
        let url = format!("{API}/contents/index.html");
        let transport = repo_routes().route(
            Method::Put,
            &url,
            200,
            r#"{"content": {"name": "index.html", "path": "index.html", "type": "file", "sha": "h2"},
                "commit": {"sha": "c9"}}"#,
        );
        let dash = dashboard(transport);
        dash.load_tree("octo", "site").await.unwrap();

        let tree = dash
            .commit_file("octo", "site", "index.html", b"hi", "Edit index", Some("h1"))
            .await
            .unwrap();
        assert!(tree.current().is_some());

        let transport = dash.client().transport();
        let put = transport.requests().into_iter().find(|r| r.url == url).unwrap();
        assert_eq!(
            put.body.as_deref(),
            Some(r#"{"message":"Edit index","content":"aGk=","sha":"h1","branch":"main"}"#)
        );
        assert_eq!(transport.request_count(&format!("{API}/git/trees/main?recursive=1")), 2);
    }

    #[tokio::test]
    async fn test_create_folder_commits_placeholder() {
        let url = format!("{API}/contents/docs/.gitkeep");
        let commit = r#"{"content": null, "commit": {"sha": "c1"}}"#;
        let transport = repo_routes().route(Method::Put, &url, 201, commit);
        let dash = dashboard(transport);
        dash.load_tree("octo", "site").await.unwrap();

        dash.create_folder("octo", "site", "docs/", "Add docs").await.unwrap();
        let put = dash.client().transport().requests().into_iter().find(|r| r.url == url).unwrap();
        assert_eq!(
            put.body.as_deref(),
            Some(r#"{"message":"Add docs","content":"","branch":"main"}"#)
        );
    }

    #[tokio::test]
    async fn test_delete_file_reloads_tree() {
        let url = format!("{API}/contents/big.txt");
        let commit = r#"{"content": null, "commit": {"sha": "c2"}}"#;
        let transport = repo_routes().route(Method::Delete, &url, 200, commit);
        let dash = dashboard(transport);
        dash.load_tree("octo", "site").await.unwrap();

        let tree = dash.delete_file("octo", "site", "big.txt", "b1", "Remove big").await.unwrap();
        assert!(tree.current().is_some());
        let delete = dash.client().transport().requests().into_iter().find(|r| r.url == url).unwrap();
        assert_eq!(
            delete.body.as_deref(),
            Some(r#"{"message":"Remove big","sha":"b1","branch":"main"}"#)
        );
    }

    #[tokio::test]
    async fn test_delete_file_error_keeps_tree() {
        let dash = dashboard(repo_routes());
        dash.load_tree("octo", "site").await.unwrap();

        let err = dash.delete_file("octo", "site", "gone.txt", "x", "Remove").await.unwrap_err();
        assert!(matches!(err, ApiError::Github { status: 404, .. }));
        assert_eq!(dash.current_tree().unwrap().repo.name, "site");
    }

    #[tokio::test]
    async fn test_create_repository_loads_tree() {
        let transport = repo_routes().route(
            Method::Post,
            "https://api.github.com/user/repos",
            201,
            r#"{"name": "site", "full_name": "octo/site", "owner": {"login": "octo"},
                "html_url": "https://github.com/octo/site", "default_branch": "main"}"#,
        );
        let dash = dashboard(transport);

        let new = NewRepository {
            name: "site".to_string(),
            description: None,
            private: false,
            auto_init: true,
        };
        let tree = dash.create_repository(&new).await.unwrap().current().unwrap();
        assert_eq!(tree.repo, RepoRef::new("octo", "site", "main"));
    }

    #[tokio::test]
    async fn test_delete_loaded_repository_clears_state() {
        let transport = with_blog(repo_routes())
            .route(Method::Delete, "https://api.github.com/repos/octo/blog", 204, "")
            .route(Method::Delete, API, 204, "");
        let dash = dashboard(transport);
        dash.load_tree("octo", "site").await.unwrap();

        dash.delete_repository("octo", "blog").await.unwrap();
        assert_eq!(dash.current_tree().unwrap().repo.name, "site");

        dash.delete_repository("octo", "site").await.unwrap();
        assert!(dash.current_tree().is_none());
        assert!(dash.current_file().is_none());
    }
}
