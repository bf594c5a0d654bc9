//! HTML reference rewriting for repository previews.
//!
//! The document is streamed through an HTML rewriter: attribute nodes of
//! `link`, `script`, `img`, `source` and `a` elements are resolved against a
//! [`ContentRoot`], and `@import` rules inside `<style>` blocks are rewritten
//! in place. Stylesheets and scripts that end up on the content host are
//! collected for the inliner.

use std::cell::RefCell;
use std::sync::LazyLock;

use lol_html::html_content::{ContentType, Element};
use lol_html::{RewriteStrSettings, element, rewrite_str, text};
use regex::{Captures, Regex};

use super::resolve::ContentRoot;

/// `@import "x.css"`, `@import 'x.css'`, `@import url(x.css)`, `@import url("x.css")`
static IMPORT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(@import\s+(?:url\(\s*)?["']?)([^"'()\s;]+)"#).expect("valid import regex")
});

/// Kind of an external resource eligible for inlining.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Stylesheet,
    Script,
}

/// A stylesheet or script reference after resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedResource {
    pub original_reference: String,
    pub resolved_url: String,
    pub kind: ResourceKind,
}

/// Output of [`rewrite_document`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RewrittenDocument {
    pub html: String,
    /// Content-host stylesheets and scripts, in document order
    pub resources: Vec<ResolvedResource>,
}

/// Rewrite relative references in `html` against `root`.
///
/// A document the rewriter cannot process is returned unchanged with no
/// resources.
pub fn rewrite_document(html: &str, root: &ContentRoot) -> RewrittenDocument {
    let resources = RefCell::new(Vec::new());
    let mut style_text = String::new();

    let result = rewrite_str(
        html,
        RewriteStrSettings {
            element_content_handlers: vec![
                element!("link[href]", |el| {
                    let Some((original, resolved)) = rewrite_attribute(el, "href", root)? else {
                        return Ok(());
                    };
                    let rel = el.get_attribute("rel");
                    if is_stylesheet_link(rel.as_deref(), &original) && root.is_content_url(&resolved)
                    {
                        resources.borrow_mut().push(ResolvedResource {
                            original_reference: original,
                            resolved_url: resolved,
                            kind: ResourceKind::Stylesheet,
                        });
                    }
                    Ok(())
                }),
                element!("script[src]", |el| {
                    let Some((original, resolved)) = rewrite_attribute(el, "src", root)? else {
                        return Ok(());
                    };
                    if root.is_content_url(&resolved) {
                        resources.borrow_mut().push(ResolvedResource {
                            original_reference: original,
                            resolved_url: resolved,
                            kind: ResourceKind::Script,
                        });
                    }
                    Ok(())
                }),
                element!("img[src], source[src]", |el| {
                    rewrite_attribute(el, "src", root)?;
                    Ok(())
                }),
                element!("a[href]", |el| {
                    let looks_like_file = el.get_attribute("href").is_some_and(|href| {
                        href.contains('.')
                            || href.starts_with("./")
                            || href.starts_with("../")
                            || href.starts_with('/')
                    });
                    if looks_like_file {
                        rewrite_attribute(el, "href", root)?;
                    }
                    Ok(())
                }),
                // Style text may arrive in several chunks; buffer and emit once
                text!("style", |chunk| {
                    style_text.push_str(chunk.as_str());
                    if chunk.last_in_text_node() {
                        let rewritten = rewrite_imports(&style_text, root);
                        chunk.replace(&rewritten, ContentType::Html);
                        style_text.clear();
                    } else {
                        chunk.remove();
                    }
                    Ok(())
                }),
            ],
            ..RewriteStrSettings::new()
        },
    );

    match result {
        Ok(rewritten) => {
            let resources = resources.into_inner();
            log::debug!(
                "Rewrote document against {}: {} inlinable resource(s)",
                root.repo(),
                resources.len()
            );
            RewrittenDocument {
                html: rewritten,
                resources,
            }
        }
        Err(err) => {
            log::warn!("HTML rewrite failed, previewing original document: {}", err);
            RewrittenDocument {
                html: html.to_string(),
                resources: Vec::new(),
            }
        }
    }
}

/// Resolve one attribute in place, returning `(original, resolved)`.
fn rewrite_attribute(
    el: &mut Element<'_, '_>,
    name: &str,
    root: &ContentRoot,
) -> Result<Option<(String, String)>, lol_html::errors::AttributeNameError> {
    let Some(original) = el.get_attribute(name) else {
        return Ok(None);
    };
    let resolved = root.resolve(&original);
    if resolved != original {
        el.set_attribute(name, &resolved)?;
    }
    Ok(Some((original, resolved)))
}

/// Rewrite `@import` targets inside a stylesheet body.
pub fn rewrite_imports(css: &str, root: &ContentRoot) -> String {
    IMPORT_RE
        .replace_all(css, |caps: &Captures| {
            format!("{}{}", &caps[1], root.resolve(&caps[2]))
        })
        .into_owned()
}

/// Whether a `<link>` loads a stylesheet.
///
/// An explicit `rel` decides; without one, a `.css` path does.
pub(crate) fn is_stylesheet_link(rel: Option<&str>, href: &str) -> bool {
    match rel {
        Some(rel) => rel
            .split_ascii_whitespace()
            .any(|token| token.eq_ignore_ascii_case("stylesheet")),
        None => {
            let path = href.split(['?', '#']).next().unwrap_or_default();
            path.to_ascii_lowercase().ends_with(".css")
        }
    }
}
