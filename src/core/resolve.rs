//! Resolution of references found in repository HTML against the raw
//! content host.
//!
//! A [`ContentRoot`] pins `{host, owner, repo, ref, base directory}`; every
//! relative reference is turned into `{host}/{owner}/{repo}/{ref}/{path}`.
//! Resolution is pure and never fails: anything that cannot be turned into a
//! URL comes back unchanged.

use url::Url;

use crate::config::RAW_CONTENT_HOST;
use crate::models::RepoRef;

/// Fixed root that relative references are resolved against.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContentRoot {
    host: String,
    repo: RepoRef,
    base_dir: Vec<String>,
}

impl ContentRoot {
    /// Root at the top of the repository on the default raw host.
    pub fn new(repo: RepoRef) -> Self {
        Self {
            host: RAW_CONTENT_HOST.to_string(),
            repo,
            base_dir: Vec::new(),
        }
    }

    /// Root whose base directory is the parent of `file_path`.
    pub fn for_file(repo: RepoRef, file_path: &str) -> Self {
        let dir = file_path.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("");
        Self::new(repo).with_base_dir(dir)
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_base_dir(mut self, dir: &str) -> Self {
        self.base_dir = dir
            .split('/')
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();
        self
    }

    pub fn repo(&self) -> &RepoRef {
        &self.repo
    }

    pub fn base_dir(&self) -> String {
        self.base_dir.join("/")
    }

    /// Whether `url` points into the content host.
    pub fn is_content_url(&self, url: &str) -> bool {
        url.strip_prefix(self.host.as_str())
            .is_some_and(|rest| rest.starts_with('/'))
    }

    /// URL of a path relative to the repository root.
    pub fn file_url(&self, repo_path: &str) -> String {
        self.resolve(&format!("/{}", repo_path.trim_start_matches('/')))
    }

    /// Resolve a reference from an `href`/`src`/`@import` into an absolute URL.
    ///
    /// 1. Absolute (scheme, `//host`), fragment-only, `data:` and empty
    ///    references are returned unchanged.
    /// 2. `/path` resolves against the repository root.
    /// 3. `../path` pops one base segment per `..`, stopping at the root.
    /// 4. `./path` is treated as `path`.
    /// 5. Anything else is appended to the base directory.
    ///
    /// Path segments are percent-encoded; separators stay literal. A query
    /// or fragment suffix is carried over.
    pub fn resolve(&self, reference: &str) -> String {
        let trimmed = reference.trim();
        if is_passthrough(trimmed) {
            return reference.to_string();
        }

        let (path, query, fragment) = split_suffix(trimmed);
        let segments = match path.strip_prefix('/') {
            Some(rest) => normalize(&[], rest),
            None => normalize(&self.base_dir, path.strip_prefix("./").unwrap_or(path)),
        };

        match self.build_url(&segments, query, fragment) {
            Some(url) => url,
            None => {
                log::debug!("Leaving unresolvable reference '{}' unchanged", reference);
                reference.to_string()
            }
        }
    }

    fn build_url(
        &self,
        segments: &[&str],
        query: Option<&str>,
        fragment: Option<&str>,
    ) -> Option<String> {
        let mut url = Url::parse(&self.host).ok()?;
        {
            let mut path = url.path_segments_mut().ok()?;
            path.pop_if_empty()
                .push(&self.repo.owner)
                .push(&self.repo.name)
                .extend(self.repo.reference.split('/').filter(|s| !s.is_empty()))
                .extend(segments);
        }
        if query.is_some() {
            url.set_query(query);
        }
        if fragment.is_some() {
            url.set_fragment(fragment);
        }
        Some(url.into())
    }
}

/// References that must not be rewritten.
fn is_passthrough(reference: &str) -> bool {
    reference.is_empty()
        || reference.starts_with('#')
        || reference.starts_with("//")
        || has_scheme(reference)
}

/// `scheme ":"` per RFC 3986, where scheme = ALPHA *( ALPHA / DIGIT / "+" / "-" / "." ).
fn has_scheme(reference: &str) -> bool {
    let Some((scheme, _)) = reference.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Split `path?query#fragment`.
fn split_suffix(reference: &str) -> (&str, Option<&str>, Option<&str>) {
    let (rest, fragment) = match reference.split_once('#') {
        Some((rest, fragment)) => (rest, Some(fragment)),
        None => (reference, None),
    };
    match rest.split_once('?') {
        Some((path, query)) => (path, Some(query), fragment),
        None => (rest, None, fragment),
    }
}

/// Apply `path` to `base`, resolving `.` and `..` and dropping empty segments.
///
/// `..` at the root is a no-op.
fn normalize<'a>(base: &'a [String], path: &'a str) -> Vec<&'a str> {
    let mut parts: Vec<&str> = base.iter().map(String::as_str).collect();
    for part in path.split('/').filter(|s| !s.is_empty()) {
        match part {
            ".." => {
                parts.pop();
            }
            "." => {}
            _ => parts.push(part),
        }
    }
    parts
}
