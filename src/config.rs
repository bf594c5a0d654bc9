//! Application configuration.
//!
//! Centralizes all configuration constants used throughout the application.
//! Values that may be tuned at runtime (log level) read an override from
//! localStorage and fall back to the constants here.

use log::LevelFilter;

// =============================================================================
// Application Metadata
// =============================================================================

/// Application name displayed in the header.
pub const APP_NAME: &str = "repodeck";

// =============================================================================
// GitHub Endpoints
// =============================================================================

/// Base URL of the GitHub REST API.
pub const GITHUB_API_BASE: &str = "https://api.github.com";

/// Raw content delivery host, addressed as `{host}/{owner}/{repo}/{ref}/{path}`.
pub const RAW_CONTENT_HOST: &str = "https://raw.githubusercontent.com";

/// Media type sent in the `Accept` header of API requests.
pub const GITHUB_MEDIA_TYPE: &str = "application/vnd.github+json";

/// Branch assumed when repository metadata does not name a default branch.
pub const DEFAULT_BRANCH: &str = "main";

/// Ref used for content read before the default branch is known.
pub const HEAD_REF: &str = "HEAD";

/// Number of repositories requested per page.
pub const REPO_PAGE_SIZE: u32 = 100;

/// Number of pull requests requested per page.
pub const PULL_REQUEST_PAGE_SIZE: u32 = 50;

// =============================================================================
// Network Configuration
// =============================================================================

/// Fetch request timeout in milliseconds.
pub const FETCH_TIMEOUT_MS: i32 = 10000;

// =============================================================================
// Preview Configuration
// =============================================================================

/// Sandbox flags for the HTML preview frame.
///
/// Scripts may run, but the frame gets an opaque origin and can never
/// navigate the top-level window.
pub const PREVIEW_SANDBOX: &str = "allow-scripts allow-forms allow-popups";

// =============================================================================
// Storage Keys
// =============================================================================

/// localStorage key holding the GitHub access token.
pub const TOKEN_STORAGE_KEY: &str = "token";

/// localStorage key overriding [`LOG_LEVEL`] (e.g. `"debug"`).
pub const LOG_LEVEL_STORAGE_KEY: &str = "repodeck.log_level";

/// Session cache configuration.
pub mod cache {
    /// sessionStorage key for the signed-in user profile.
    pub const USER_KEY: &str = "user_cache";
}

// =============================================================================
// Logging
// =============================================================================

/// Default maximum log level.
pub const LOG_LEVEL: LevelFilter = LevelFilter::Info;

/// Resolve the effective log level from an optional override string.
///
/// Unknown values fall back to [`LOG_LEVEL`].
pub fn log_level_from(value: Option<&str>) -> LevelFilter {
    value
        .and_then(|v| v.trim().parse::<LevelFilter>().ok())
        .unwrap_or(LOG_LEVEL)
}

// =============================================================================
// UI Configuration
// =============================================================================

/// Icon theme selection.
///
/// Available themes:
/// - `Bootstrap` - Familiar, slightly bolder (default)
/// - `Lucide` - Minimal, thin strokes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(dead_code)]
pub enum IconTheme {
    #[default]
    Bootstrap,
    Lucide,
}

/// Current icon theme used throughout the application.
pub const ICON_THEME: IconTheme = IconTheme::Bootstrap;

/// Horizontal indentation per tree depth level, in pixels.
pub const TREE_INDENT_PX: usize = 16;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_override() {
        assert_eq!(log_level_from(Some("debug")), LevelFilter::Debug);
        assert_eq!(log_level_from(Some(" WARN ")), LevelFilter::Warn);
        assert_eq!(log_level_from(Some("chatty")), LOG_LEVEL);
        assert_eq!(log_level_from(None), LOG_LEVEL);
    }
}
