//! Centralized icon definitions.
//!
//! Icon theme is configured in `config.rs` via `ICON_THEME`.
//! This module maps semantic icon names to the selected theme's icons.

use icondata::Icon;

use crate::config::IconTheme;
use crate::models::FileType;

// =============================================================================
// Theme Imports
// =============================================================================

mod lucide {
    pub use icondata::{
        LuBookMarked as Repo, LuChevronDown as ChevronDown, LuChevronRight as ChevronRight,
        LuExternalLink as ExternalLink, LuFile as File, LuFileCode as FileCode,
        LuFileText as FileText, LuFolder as Folder, LuFolderOpen as FolderOpen,
        LuGitPullRequest as PullRequest, LuImage as FileImage, LuLock as Lock,
        LuLogOut as SignOut, LuPencil as Edit, LuPlus as Plus, LuRefreshCw as Refresh,
        LuStar as Star, LuTrash2 as Trash,
    };
}

mod bootstrap {
    pub use icondata::{
        BsArrowClockwise as Refresh, BsBoxArrowRight as SignOut,
        BsBoxArrowUpRight as ExternalLink, BsChevronDown as ChevronDown,
        BsChevronRight as ChevronRight, BsFileEarmark as File, BsFileEarmarkCode as FileCode,
        BsFileEarmarkImage as FileImage, BsFileEarmarkText as FileText,
        BsFolder2Open as FolderOpen, BsFolderFill as Folder, BsGit as PullRequest,
        BsJournalBookmark as Repo, BsLockFill as Lock, BsPencil as Edit, BsPlusLg as Plus,
        BsStar as Star, BsTrash as Trash,
    };
}

// =============================================================================
// Icon Constants (selected based on theme)
// =============================================================================

macro_rules! themed_icon {
    ($name:ident, $theme_name:ident) => {
        pub const $name: Icon = match crate::config::ICON_THEME {
            IconTheme::Lucide => lucide::$theme_name,
            IconTheme::Bootstrap => bootstrap::$theme_name,
        };
    };
}

themed_icon!(CHEVRON_RIGHT, ChevronRight);
themed_icon!(CHEVRON_DOWN, ChevronDown);
themed_icon!(FOLDER, Folder);
themed_icon!(FOLDER_OPEN, FolderOpen);
themed_icon!(FILE, File);
themed_icon!(FILE_TEXT, FileText);
themed_icon!(FILE_CODE, FileCode);
themed_icon!(FILE_IMAGE, FileImage);
themed_icon!(REPO, Repo);
themed_icon!(LOCK, Lock);
themed_icon!(STAR, Star);
themed_icon!(EXTERNAL_LINK, ExternalLink);
themed_icon!(SIGN_OUT, SignOut);
themed_icon!(REFRESH, Refresh);
themed_icon!(PLUS, Plus);
themed_icon!(EDIT, Edit);
themed_icon!(TRASH, Trash);
themed_icon!(PULL_REQUEST, PullRequest);

/// Icon for a file in the tree view.
pub fn file_icon(path: &str) -> Icon {
    match FileType::from_path(path) {
        FileType::Html => FILE_CODE,
        FileType::Markdown => FILE_TEXT,
        FileType::Image => FILE_IMAGE,
        FileType::Text => FILE,
    }
}
