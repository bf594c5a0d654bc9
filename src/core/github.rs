//! GitHub REST client.
//!
//! Requests go through a [`Transport`] so the same client runs over the
//! browser's fetch API in the app and over an in-memory transport in tests.

use base64::Engine;
use base64::prelude::BASE64_STANDARD;
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use super::error::{ApiError, FetchError};
use super::inline::ResourceFetcher;
use crate::config::{
    GITHUB_API_BASE, GITHUB_MEDIA_TYPE, PULL_REQUEST_PAGE_SIZE, RAW_CONTENT_HOST, REPO_PAGE_SIZE,
};
use crate::models::{
    Blob, CommitResponse, ContentItem, DeleteFileRequest, FileContent, GitTree, GithubErrorBody,
    NewRepository, PullRequest, PutFileRequest, Repository, User,
};

// =============================================================================
// Transport
// =============================================================================

/// HTTP method of an [`ApiRequest`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Put,
    Post,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Put => "PUT",
            Self::Post => "POST",
            Self::Delete => "DELETE",
        }
    }
}

/// A fully built HTTP request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl ApiRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.push((name.to_string(), value.into()));
        self
    }

    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Status and body of a completed request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends [`ApiRequest`]s.
///
/// Any HTTP status is a successful send; only transport failures (network,
/// timeout) are errors.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, FetchError>;
}

// =============================================================================
// Client
// =============================================================================

/// Token-authenticated GitHub REST client.
pub struct GitHubClient<T> {
    transport: T,
    token: Option<String>,
    api_base: String,
    raw_host: String,
}

impl<T: Transport> GitHubClient<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            token: None,
            api_base: GITHUB_API_BASE.to_string(),
            raw_host: RAW_CONTENT_HOST.to_string(),
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        self.token = (!token.trim().is_empty()).then(|| token.trim().to_string());
        self
    }

    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    /// Host whose downloads carry the token (private repositories).
    pub fn with_raw_host(mut self, host: impl Into<String>) -> Self {
        self.raw_host = host.into().trim_end_matches('/').to_string();
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    // --- Users & repositories ---

    /// `GET /user`
    pub async fn current_user(&self) -> Result<User, ApiError> {
        let url = self.api_url(&["user"], &[])?;
        self.get_json(url).await
    }

    /// Repositories of the signed-in user, most recently updated first.
    pub async fn list_repositories(&self) -> Result<Vec<Repository>, ApiError> {
        let per_page = REPO_PAGE_SIZE.to_string();
        let url = self.api_url(
            &["user", "repos"],
            &[("sort", "updated"), ("per_page", &per_page)],
        )?;
        self.get_json(url).await
    }

    pub async fn repository(&self, owner: &str, repo: &str) -> Result<Repository, ApiError> {
        let url = self.api_url(&["repos", owner, repo], &[])?;
        self.get_json(url).await
    }

    pub async fn create_repository(&self, new: &NewRepository) -> Result<Repository, ApiError> {
        let url = self.api_url(&["user", "repos"], &[])?;
        self.send_json(Method::Post, url, new).await
    }

    pub async fn delete_repository(&self, owner: &str, repo: &str) -> Result<(), ApiError> {
        let url = self.api_url(&["repos", owner, repo], &[])?;
        self.send(self.request(Method::Delete, url)).await?;
        Ok(())
    }

    // --- Trees & contents ---

    /// `GET /repos/{owner}/{repo}/git/trees/{ref}`
    pub async fn git_tree(
        &self,
        owner: &str,
        repo: &str,
        reference: &str,
        recursive: bool,
    ) -> Result<GitTree, ApiError> {
        let mut segments = vec!["repos", owner, repo, "git", "trees"];
        segments.extend(reference.split('/').filter(|s| !s.is_empty()));
        let query: &[(&str, &str)] = if recursive { &[("recursive", "1")] } else { &[] };
        let url = self.api_url(&segments, query)?;
        self.get_json(url).await
    }

    /// Directory listing (`GET /repos/{owner}/{repo}/contents/{path}`).
    pub async fn list_contents(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        reference: Option<&str>,
    ) -> Result<Vec<ContentItem>, ApiError> {
        let url = self.contents_url(owner, repo, path, reference)?;
        self.get_json(url).await
    }

    /// Single file from the contents API, decoded.
    pub async fn file_contents(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        reference: Option<&str>,
    ) -> Result<FileContent, ApiError> {
        let url = self.contents_url(owner, repo, path, reference)?;
        let response = self.send(self.request(Method::Get, url)).await?;
        if response.body.trim_start().starts_with('[') {
            return Err(ApiError::NotAFile(path.to_string()));
        }
        let item: ContentItem = serde_json::from_str(&response.body)?;
        if item.kind != "file" {
            return Err(ApiError::NotAFile(path.to_string()));
        }
        let (Some(encoding), Some(content)) = (item.encoding.as_deref(), item.content.as_deref())
        else {
            return Err(ApiError::Decode(format!("{path}: missing content")));
        };
        decode_content(&item.path, &item.sha, encoding, content)
    }

    /// `GET /repos/{owner}/{repo}/git/blobs/{sha}`
    pub async fn blob(&self, owner: &str, repo: &str, sha: &str) -> Result<Blob, ApiError> {
        let url = self.api_url(&["repos", owner, repo, "git", "blobs", sha], &[])?;
        self.get_json(url).await
    }

    /// Create or update a file.
    pub async fn put_file(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        request: &PutFileRequest,
    ) -> Result<CommitResponse, ApiError> {
        let url = self.contents_url(owner, repo, path, None)?;
        self.send_json(Method::Put, url, request).await
    }

    pub async fn delete_file(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        request: &DeleteFileRequest,
    ) -> Result<CommitResponse, ApiError> {
        let url = self.contents_url(owner, repo, path, None)?;
        self.send_json(Method::Delete, url, request).await
    }

    // --- Pull requests ---

    /// Pull requests in any state.
    pub async fn pull_requests(&self, owner: &str, repo: &str) -> Result<Vec<PullRequest>, ApiError> {
        let per_page = PULL_REQUEST_PAGE_SIZE.to_string();
        let url = self.api_url(
            &["repos", owner, repo, "pulls"],
            &[("state", "all"), ("per_page", &per_page)],
        )?;
        self.get_json(url).await
    }

    // --- Plumbing ---

    fn api_url(&self, segments: &[&str], query: &[(&str, &str)]) -> Result<String, ApiError> {
        build_url(&self.api_base, segments, query)
    }

    fn contents_url(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        reference: Option<&str>,
    ) -> Result<String, ApiError> {
        let mut segments = vec!["repos", owner, repo, "contents"];
        segments.extend(path.split('/').filter(|s| !s.is_empty()));
        match reference {
            Some(reference) => self.api_url(&segments, &[("ref", reference)]),
            None => self.api_url(&segments, &[]),
        }
    }

    fn request(&self, method: Method, url: String) -> ApiRequest {
        let request = ApiRequest::new(method, url).header("Accept", GITHUB_MEDIA_TYPE);
        match &self.token {
            Some(token) => request.header("Authorization", format!("token {token}")),
            None => request,
        }
    }

    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let (method, url) = (request.method, request.url.clone());
        let response = self.transport.send(request).await?;
        if response.is_success() {
            return Ok(response);
        }

        let message = serde_json::from_str::<GithubErrorBody>(&response.body)
            .map(|body| body.message)
            .unwrap_or_else(|_| format!("HTTP {}", response.status));
        log::warn!("{} {} failed: {} {}", method.as_str(), url, response.status, message);
        Err(ApiError::Github {
            status: response.status,
            message,
        })
    }

    async fn get_json<R: DeserializeOwned>(&self, url: String) -> Result<R, ApiError> {
        let response = self.send(self.request(Method::Get, url)).await?;
        Ok(serde_json::from_str(&response.body)?)
    }

    async fn send_json<B: Serialize, R: DeserializeOwned>(
        &self,
        method: Method,
        url: String,
        body: &B,
    ) -> Result<R, ApiError> {
        let mut request = self
            .request(method, url)
            .header("Content-Type", "application/json");
        request.body = Some(serde_json::to_string(body)?);
        let response = self.send(request).await?;
        Ok(serde_json::from_str(&response.body)?)
    }
}

impl<T: Transport> GitHubClient<T> {
    fn is_raw_url(&self, url: &str) -> bool {
        url.strip_prefix(self.raw_host.as_str())
            .is_some_and(|rest| rest.starts_with('/'))
    }
}

impl<T: Transport> ResourceFetcher for GitHubClient<T> {
    /// Plain GET; the token is only sent to the raw content host.
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        let mut request = ApiRequest::new(Method::Get, url);
        if let Some(token) = &self.token
            && self.is_raw_url(url)
        {
            request = request.header("Authorization", format!("token {token}"));
        }
        let response = self.transport.send(request).await?;
        if !response.is_success() {
            return Err(FetchError::HttpError(response.status));
        }
        Ok(response.body)
    }
}

/// `{base}/{segments...}?{query}` with every segment percent-encoded.
fn build_url(base: &str, segments: &[&str], query: &[(&str, &str)]) -> Result<String, ApiError> {
    let mut url = Url::parse(base).map_err(|_| FetchError::RequestCreationFailed)?;
    url.path_segments_mut()
        .map_err(|_| FetchError::RequestCreationFailed)?
        .pop_if_empty()
        .extend(segments);
    if !query.is_empty() {
        url.query_pairs_mut().extend_pairs(query);
    }
    Ok(url.into())
}

/// Decode a base64 file payload as delivered by the contents and blob APIs.
///
/// Payloads are line-wrapped, so whitespace is stripped first. Content that
/// is not UTF-8 or contains NUL bytes is binary and keeps its base64 form.
pub fn decode_content(
    path: &str,
    sha: &str,
    encoding: &str,
    payload: &str,
) -> Result<FileContent, ApiError> {
    if encoding != "base64" {
        return Err(ApiError::UnknownEncoding(encoding.to_string()));
    }
    let compact: String = payload.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let bytes = BASE64_STANDARD.decode(compact.as_bytes())?;

    let (content, is_binary) = match String::from_utf8(bytes) {
        Ok(text) if !text.contains('\0') => (text, false),
        _ => (compact, true),
    };
    Ok(FileContent {
        path: path.to_string(),
        sha: sha.to_string(),
        content,
        is_binary,
    })
}
