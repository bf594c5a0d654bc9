//! Browser-facing utilities.
//!
//! Provides:
//! - [`BrowserTransport`] - Fetch API transport with timeout
//! - [`markdown_to_html`] - Markdown rendering with XSS sanitization
//! - [`cache`] - sessionStorage cache
//! - [`dom`] - window and storage access
//! - [`logger`] - console sink for the `log` facade

pub mod cache;
pub mod dom;
mod fetch;
pub mod logger;
mod markdown;

pub use fetch::{BrowserTransport, RaceResult, race_with_timeout};
pub use markdown::markdown_to_html;
