//! Root application module.
//!
//! Contains the main App component, the AppContext definition, and the
//! actions that drive the dashboard from UI events.

use std::collections::HashSet;
use std::sync::Arc;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::explorer::{Explorer, FrameSurface};
use crate::components::repo_list::RepoList;
use crate::components::status::StatusBar;
use crate::components::token_prompt::TokenPrompt;
use crate::config::{TOKEN_STORAGE_KEY, cache as cache_keys};
use crate::core::{ApiError, Dashboard, GitHubClient, LoadedTree, Loaded, NodeId};
use crate::models::{FileContent, NewRepository, PullRequest, RepoRef, Repository, User};
use crate::utils::{BrowserTransport, cache, dom};

stylance::import_crate_style!(css, "src/app.module.css");

/// Dashboard as wired up in the browser.
pub type BrowserDashboard = Dashboard<BrowserTransport, FrameSurface>;

// ============================================================================
// AppContext
// ============================================================================

/// Application-wide reactive context.
///
/// Provided at the root of the component tree and accessed from any child
/// component using `use_context::<AppContext>()`.
#[derive(Clone)]
pub struct AppContext {
    pub dashboard: Arc<BrowserDashboard>,

    /// Signed-in user, once fetched.
    pub user: RwSignal<Option<User>>,
    /// Repositories of the signed-in user.
    pub repos: RwSignal<Vec<Repository>>,

    /// Tree of the selected repository.
    pub tree: RwSignal<Option<Arc<LoadedTree>>>,
    /// Expanded directories of the tree view.
    pub expanded: RwSignal<HashSet<NodeId>>,
    /// Path of the file the user clicked last.
    pub selected_path: RwSignal<Option<String>>,
    /// Content of the selected file, once loaded.
    pub file: RwSignal<Option<Arc<FileContent>>>,
    /// Document shown in the HTML preview frame.
    pub preview: RwSignal<Option<String>>,
    /// Pull requests of the selected repository, once fetched.
    pub pulls: RwSignal<Option<Vec<PullRequest>>>,

    /// Inline status line; errors and progress.
    pub status: RwSignal<Option<String>>,
}

impl AppContext {
    pub fn new(token: &str) -> Self {
        let preview = RwSignal::new(None);
        let client = GitHubClient::new(BrowserTransport::new()).with_token(token);
        Self {
            dashboard: Arc::new(Dashboard::new(client, FrameSurface::new(preview))),
            user: RwSignal::new(None),
            repos: RwSignal::new(Vec::new()),
            tree: RwSignal::new(None),
            expanded: RwSignal::new(HashSet::new()),
            selected_path: RwSignal::new(None),
            file: RwSignal::new(None),
            preview,
            pulls: RwSignal::new(None),
            status: RwSignal::new(None),
        }
    }

    /// Load the profile (session cached) and the repository list.
    pub fn load_account(&self) {
        if let Some(user) = cache::get::<User>(cache_keys::USER_KEY) {
            self.user.set(Some(user));
        } else {
            let ctx = self.clone();
            spawn_local(async move {
                match ctx.dashboard.client().current_user().await {
                    Ok(user) => {
                        if let Err(err) = cache::set(cache_keys::USER_KEY, &user) {
                            log::debug!("Profile not cached: {}", err);
                        }
                        ctx.user.set(Some(user));
                    }
                    Err(err) => ctx.status.set(Some(format!("Could not load profile: {err}"))),
                }
            });
        }
        self.refresh_repositories();
    }

    pub fn refresh_repositories(&self) {
        let ctx = self.clone();
        spawn_local(async move {
            match ctx.dashboard.client().list_repositories().await {
                Ok(repos) => ctx.repos.set(repos),
                Err(err) => ctx.status.set(Some(format!("Could not list repositories: {err}"))),
            }
        });
    }

    /// Select a repository and load its tree.
    pub fn open_repo(&self, owner: String, name: String) {
        self.status.set(Some(format!("Loading {owner}/{name}...")));
        let ctx = self.clone();
        spawn_local(async move {
            match ctx.dashboard.load_tree(&owner, &name).await {
                Ok(Loaded::Current(tree)) => {
                    ctx.tree.set(None);
                    ctx.apply_tree(tree);
                    ctx.status.set(None);
                }
                Ok(Loaded::Superseded) => {}
                Err(err) => ctx.status.set(Some(format!("Error loading {owner}/{name}: {err}"))),
            }
        });
    }

    /// Show a freshly loaded tree; the selection is reset since the
    /// dashboard dropped it. Expanded directories survive a reload of the
    /// same repository.
    fn apply_tree(&self, tree: Arc<LoadedTree>) {
        let expanded: HashSet<NodeId> = self.tree.with_untracked(|current| match current {
            Some(current) if current.repo.is_repo(&tree.repo.owner, &tree.repo.name) => {
                self.expanded.with_untracked(|ids| {
                    ids.iter()
                        .filter_map(|id| tree.tree.find(&current.tree.path_of(*id)))
                        .collect()
                })
            }
            _ => {
                self.pulls.set(None);
                HashSet::new()
            }
        });
        self.expanded.set(expanded);
        self.tree.set(Some(tree));
        self.selected_path.set(None);
        self.file.set(None);
        self.preview.set(None);
    }

    fn current_repo(&self) -> Option<RepoRef> {
        self.tree.with_untracked(|tree| tree.as_ref().map(|tree| tree.repo.clone()))
    }

    /// Select a file of the current tree; HTML files also get a preview.
    pub fn open_file(&self, path: String) {
        let Some(tree) = self.tree.get_untracked() else {
            return;
        };
        self.selected_path.set(Some(path.clone()));
        self.preview.set(None);

        let ctx = self.clone();
        spawn_local(async move {
            let repo = &tree.repo;
            match ctx.dashboard.open_file(&repo.owner, &repo.name, &path).await {
                Ok(Loaded::Current(file)) => {
                    ctx.file.set(Some(file));
                    ctx.status.set(None);
                }
                Ok(Loaded::Superseded) => {}
                Err(err) => ctx.status.set(Some(format!("Error loading {path}: {err}"))),
            }
        });
    }

    pub fn toggle_dir(&self, id: NodeId) {
        self.expanded.update(|expanded| {
            if !expanded.remove(&id) {
                expanded.insert(id);
            }
        });
    }

    // --- Writes ---

    /// Commit `content` to `path` of the selected repository and reopen it.
    pub fn commit_file(&self, path: String, content: String, message: String, sha: Option<String>) {
        let Some(repo) = self.current_repo() else {
            return;
        };
        self.status.set(Some(format!("Committing {path}...")));
        let ctx = self.clone();
        spawn_local(async move {
            let result = ctx
                .dashboard
                .commit_file(
                    &repo.owner,
                    &repo.name,
                    &path,
                    content.as_bytes(),
                    &message,
                    sha.as_deref(),
                )
                .await;
            if ctx.apply_write(result, &format!("Committed {path}")) {
                ctx.open_file(path);
            }
        });
    }

    /// Create an empty file, or a folder when `folder` is set.
    pub fn create_entry(&self, path: String, folder: bool) {
        let path = path.trim().trim_matches('/').to_string();
        let Some(repo) = self.current_repo() else {
            return;
        };
        if path.is_empty() {
            return;
        }
        let ctx = self.clone();
        spawn_local(async move {
            let message = format!("Create {path}");
            let result = if folder {
                ctx.dashboard
                    .create_folder(&repo.owner, &repo.name, &path, &message)
                    .await
            } else {
                ctx.dashboard
                    .commit_file(&repo.owner, &repo.name, &path, b"", &message, None)
                    .await
            };
            if ctx.apply_write(result, &format!("Created {path}")) && !folder {
                ctx.open_file(path);
            }
        });
    }

    pub fn delete_file(&self, path: String, sha: String) {
        let Some(repo) = self.current_repo() else {
            return;
        };
        self.status.set(Some(format!("Deleting {path}...")));
        let ctx = self.clone();
        spawn_local(async move {
            let message = format!("Delete {path}");
            let result = ctx
                .dashboard
                .delete_file(&repo.owner, &repo.name, &path, &sha, &message)
                .await;
            ctx.apply_write(result, &format!("Deleted {path}"));
        });
    }

    /// Apply the tree reloaded after a write. Returns whether it was applied.
    fn apply_write(
        &self,
        result: Result<Loaded<Arc<LoadedTree>>, ApiError>,
        done: &str,
    ) -> bool {
        match result {
            Ok(Loaded::Current(tree)) => {
                self.apply_tree(tree);
                self.status.set(Some(done.to_string()));
                true
            }
            Ok(Loaded::Superseded) => false,
            Err(err) => {
                self.status.set(Some(format!("Error: {err}")));
                false
            }
        }
    }

    pub fn create_repository(&self, name: String, private: bool) {
        let name = name.trim().to_string();
        if name.is_empty() {
            return;
        }
        self.status.set(Some(format!("Creating {name}...")));
        let new = NewRepository {
            name,
            description: None,
            private,
            auto_init: true,
        };
        let ctx = self.clone();
        spawn_local(async move {
            let result = ctx.dashboard.create_repository(&new).await;
            if ctx.apply_write(result, &format!("Created {}", new.name)) {
                ctx.refresh_repositories();
            }
        });
    }

    pub fn delete_repository(&self, owner: String, name: String) {
        self.status.set(Some(format!("Deleting {owner}/{name}...")));
        let ctx = self.clone();
        spawn_local(async move {
            match ctx.dashboard.delete_repository(&owner, &name).await {
                Ok(()) => {
                    if ctx.dashboard.current_tree().is_none() {
                        ctx.tree.set(None);
                        ctx.selected_path.set(None);
                        ctx.file.set(None);
                        ctx.preview.set(None);
                        ctx.pulls.set(None);
                    }
                    ctx.status.set(Some(format!("Deleted {owner}/{name}")));
                    ctx.refresh_repositories();
                }
                Err(err) => ctx.status.set(Some(format!("Error deleting {owner}/{name}: {err}"))),
            }
        });
    }

    /// Fetch pull requests of the selected repository.
    pub fn load_pull_requests(&self) {
        let Some(repo) = self.current_repo() else {
            return;
        };
        let ctx = self.clone();
        spawn_local(async move {
            match ctx.dashboard.pull_requests(&repo.owner, &repo.name).await {
                Ok(pulls) => {
                    let still_selected = ctx.current_repo().is_some_and(|current| {
                        current.is_repo(&repo.owner, &repo.name)
                    });
                    if still_selected {
                        ctx.pulls.set(Some(pulls));
                    }
                }
                Err(err) => ctx.status.set(Some(format!("Could not list pull requests: {err}"))),
            }
        });
    }

    pub fn sign_out(&self) {
        dom::local_remove(TOKEN_STORAGE_KEY);
        cache::remove(cache_keys::USER_KEY);
        reload();
    }
}

/// Reload the page, e.g. after the token changed.
pub fn reload() {
    if let Some(window) = dom::window() {
        let _ = window.location().reload();
    }
}

// ============================================================================
// App
// ============================================================================

/// Root application component.
///
/// Without a stored access token only the token prompt is shown; otherwise
/// the context is created and the dashboard layout rendered.
#[component]
pub fn App() -> impl IntoView {
    let Some(token) = dom::local_get(TOKEN_STORAGE_KEY) else {
        log::info!("No access token stored");
        return view! { <TokenPrompt /> }.into_any();
    };

    let ctx = AppContext::new(&token);
    provide_context(ctx.clone());
    ctx.load_account();

    view! {
        <div class=css::app>
            <StatusBar />
            <main class=css::layout>
                <RepoList />
                <Explorer />
            </main>
        </div>
    }
    .into_any()
}
