//! Generation counters guarding against out-of-order async results.
//!
//! Every user selection takes a [`SelectionToken`]. A result is only
//! applied while its token is still current; a newer selection silently
//! supersedes older in-flight work.

use std::sync::atomic::{AtomicU64, Ordering};

/// Snapshot of the generations at the time work was started.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SelectionToken {
    tree: u64,
    selection: u64,
}

/// Outcome of async work started under a token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Loaded<T> {
    /// The result was applied
    Current(T),
    /// A newer selection started before the result arrived; it was discarded
    Superseded,
}

impl<T> Loaded<T> {
    pub fn is_superseded(&self) -> bool {
        matches!(self, Self::Superseded)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Loaded<U> {
        match self {
            Self::Current(value) => Loaded::Current(f(value)),
            Self::Superseded => Loaded::Superseded,
        }
    }

    pub fn current(self) -> Option<T> {
        match self {
            Self::Current(value) => Some(value),
            Self::Superseded => None,
        }
    }
}

/// Per-dashboard generation counters.
#[derive(Debug, Default)]
pub struct Session {
    tree: AtomicU64,
    selection: AtomicU64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a repository selection.
    ///
    /// Also bumps the file generation so file loads from the previous
    /// repository can no longer apply.
    pub fn begin_tree(&self) -> SelectionToken {
        let tree = self.tree.fetch_add(1, Ordering::SeqCst) + 1;
        let selection = self.selection.fetch_add(1, Ordering::SeqCst) + 1;
        SelectionToken { tree, selection }
    }

    /// Start a file selection within the current repository.
    pub fn begin_selection(&self) -> SelectionToken {
        let selection = self.selection.fetch_add(1, Ordering::SeqCst) + 1;
        SelectionToken {
            tree: self.tree.load(Ordering::SeqCst),
            selection,
        }
    }

    /// Invalidate every file selection started so far.
    ///
    /// Called when a repository tree is applied, so files picked from the
    /// previous tree can no longer land on the new one.
    pub fn supersede_selections(&self) {
        self.selection.fetch_add(1, Ordering::SeqCst);
    }

    /// Token for the latest selection, without starting a new one.
    pub fn current_selection(&self) -> SelectionToken {
        SelectionToken {
            tree: self.tree.load(Ordering::SeqCst),
            selection: self.selection.load(Ordering::SeqCst),
        }
    }

    /// Whether no selection started after `token`.
    pub fn is_current(&self, token: SelectionToken) -> bool {
        self.current_selection() == token
    }

    /// Whether no repository selection started after `token`.
    pub fn is_current_tree(&self, token: SelectionToken) -> bool {
        self.tree.load(Ordering::SeqCst) == token.tree
    }
}
