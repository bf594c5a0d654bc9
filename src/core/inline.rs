//! Inlining of stylesheets and scripts into a rewritten preview document.
//!
//! Sandboxed previews cannot load cross-origin stylesheets or scripts
//! reliably, so every resource collected by the rewriter is fetched and its
//! body substituted for the external tag.

use std::collections::HashMap;
use std::sync::LazyLock;

use futures_util::future::join_all;
use lol_html::html_content::ContentType;
use lol_html::{RewriteStrSettings, element, rewrite_str};
use regex::Regex;

use super::error::FetchError;
use super::rewrite::{RewrittenDocument, is_stylesheet_link};

/// Closing tags that would end an inline `<style>`/`<script>` block early.
static CLOSING_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</(style|script)").expect("valid closing tag regex"));

/// Source of resource bodies for the inliner.
#[allow(async_fn_in_trait)]
pub trait ResourceFetcher {
    /// Fetch `url` as text.
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError>;
}

/// Replace collected resources with inline blocks.
///
/// Each distinct URL is fetched once and all fetches run concurrently.
/// A resource whose fetch fails keeps its original tag; the preview still
/// renders with whatever was inlined.
pub async fn inline_resources<F: ResourceFetcher>(doc: &RewrittenDocument, fetcher: &F) -> String {
    if doc.resources.is_empty() {
        return doc.html.clone();
    }

    let mut urls: Vec<&str> = doc
        .resources
        .iter()
        .map(|r| r.resolved_url.as_str())
        .collect();
    urls.sort_unstable();
    urls.dedup();

    let results = join_all(urls.into_iter().map(|url| async move {
        let result = fetcher.fetch_text(url).await;
        (url, result)
    }))
    .await;

    let mut bodies: HashMap<String, String> = HashMap::new();
    for (url, result) in results {
        match result {
            Ok(body) => {
                bodies.insert(url.to_string(), body);
            }
            Err(err) => log::warn!("Leaving {} external: {}", url, err),
        }
    }

    if bodies.is_empty() {
        return doc.html.clone();
    }
    substitute(&doc.html, &bodies)
}

/// Swap tags whose URL has a fetched body for inline blocks.
fn substitute(html: &str, bodies: &HashMap<String, String>) -> String {
    let result = rewrite_str(
        html,
        RewriteStrSettings {
            element_content_handlers: vec![
                element!("link[href]", |el| {
                    let Some(href) = el.get_attribute("href") else {
                        return Ok(());
                    };
                    let rel = el.get_attribute("rel");
                    if !is_stylesheet_link(rel.as_deref(), &href) {
                        return Ok(());
                    }
                    let Some(body) = bodies.get(&href) else {
                        return Ok(());
                    };
                    let style = match el.get_attribute("media") {
                        Some(media) => format!(
                            "<style media=\"{}\">{}</style>",
                            escape_attribute(&media),
                            escape_closing_tags(body)
                        ),
                        None => format!("<style>{}</style>", escape_closing_tags(body)),
                    };
                    el.replace(&style, ContentType::Html);
                    Ok(())
                }),
                element!("script[src]", |el| {
                    let Some(body) = el.get_attribute("src").and_then(|src| bodies.get(&src))
                    else {
                        return Ok(());
                    };
                    el.remove_attribute("src");
                    el.set_inner_content(&escape_closing_tags(body), ContentType::Html);
                    Ok(())
                }),
            ],
            ..RewriteStrSettings::new()
        },
    );

    result.unwrap_or_else(|err| {
        log::warn!("Inlining failed, keeping external resources: {}", err);
        html.to_string()
    })
}

fn escape_closing_tags(body: &str) -> String {
    CLOSING_TAG_RE.replace_all(body, "<\\/$1").into_owned()
}

fn escape_attribute(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::resolve::ContentRoot;
    use crate::core::rewrite::rewrite_document;
    use crate::models::RepoRef;
    use std::cell::RefCell;

    const ROOT: &str = "https://raw.githubusercontent.com/octo/site/main";

    /// Canned bodies keyed by URL; anything else is a 404.
    #[derive(Default)]
    struct StubFetcher {
        bodies: HashMap<String, String>,
        calls: RefCell<Vec<String>>,
    }

    impl StubFetcher {
        fn with(mut self, url: String, body: &str) -> Self {
            self.bodies.insert(url, body.to_string());
            self
        }
    }

    impl ResourceFetcher for StubFetcher {
        async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
            self.calls.borrow_mut().push(url.to_string());
            self.bodies
                .get(url)
                .cloned()
                .ok_or(FetchError::HttpError(404))
        }
    }

    fn rewrite(html: &str) -> RewrittenDocument {
        let root = ContentRoot::for_file(RepoRef::new("octo", "site", "main"), "index.html");
        rewrite_document(html, &root)
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_link() {
        let doc = rewrite(
            r#"<head><link rel="stylesheet" href="a.css"><link rel="stylesheet" href="missing.css"></head>"#,
        );
        let fetcher = StubFetcher::default().with(format!("{ROOT}/a.css"), "body { margin: 0; }");

        let html = inline_resources(&doc, &fetcher).await;

        assert_eq!(html.matches("<style>").count(), 1);
        assert!(html.contains("<style>body { margin: 0; }</style>"));
        assert_eq!(html.matches("<link").count(), 1);
        assert!(html.contains(&format!(r#"href="{ROOT}/missing.css""#)));
    }

    #[tokio::test]
    async fn test_script_inlined_keeps_attributes() {
        let doc = rewrite(r#"<script src="js/app.js" defer type="module"></script>"#);
        let fetcher = StubFetcher::default().with(format!("{ROOT}/js/app.js"), "console.log(1);");

        let html = inline_resources(&doc, &fetcher).await;

        assert!(!html.contains("src="));
        assert!(html.contains("defer"));
        assert!(html.contains(r#"type="module""#));
        assert!(html.contains(">console.log(1);</script>"));
    }

    #[tokio::test]
    async fn test_media_attribute_kept() {
        let doc = rewrite(r#"<link rel="stylesheet" href="print.css" media="print">"#);
        let fetcher = StubFetcher::default().with(format!("{ROOT}/print.css"), "p { color: black }");

        let html = inline_resources(&doc, &fetcher).await;
        assert_eq!(html, r#"<style media="print">p { color: black }</style>"#);
    }

    #[tokio::test]
    async fn test_closing_tags_escaped() {
        let doc = rewrite(r#"<script src="x.js"></script>"#);
        let fetcher =
            StubFetcher::default().with(format!("{ROOT}/x.js"), r#"document.write("</SCRIPT>");"#);

        let html = inline_resources(&doc, &fetcher).await;
        assert!(html.contains(r#"document.write("<\/SCRIPT>");"#));
        assert_eq!(html.matches("</script>").count(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_url_fetched_once() {
        let doc = rewrite(r#"<script src="x.js"></script><script src="./x.js"></script>"#);
        let fetcher = StubFetcher::default().with(format!("{ROOT}/x.js"), "run();");

        let html = inline_resources(&doc, &fetcher).await;
        assert_eq!(fetcher.calls.borrow().len(), 1);
        assert_eq!(html.matches("run();").count(), 2);
    }

    #[tokio::test]
    async fn test_no_resources_no_fetches() {
        let doc = rewrite(r#"<p>static</p><img src="a.png">"#);
        let fetcher = StubFetcher::default();

        let html = inline_resources(&doc, &fetcher).await;
        assert!(fetcher.calls.borrow().is_empty());
        assert_eq!(html, doc.html);
    }

    #[test]
    fn test_escape_closing_tags() {
        assert_eq!(escape_closing_tags("a</style>b</Script"), r"a<\/style>b<\/Script");
        assert_eq!(escape_closing_tags("1 < 2 </div>"), "1 < 2 </div>");
    }
}
