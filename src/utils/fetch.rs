//! Browser [`Transport`] over the Fetch API, with timeout support.

use js_sys::{Array, Promise};
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, RequestMode, Response};

use crate::config::FETCH_TIMEOUT_MS;
use crate::core::error::FetchError;
use crate::core::github::{ApiRequest, ApiResponse, Transport};

// =============================================================================
// Promise Racing Utilities
// =============================================================================

/// Result of a promise race with timeout.
#[derive(Debug)]
pub enum RaceResult {
    /// The promise completed before timeout.
    Completed(JsValue),
    /// Timeout occurred before promise completed.
    TimedOut,
    /// Promise rejected with an error.
    Error(String),
}

/// Race a promise against a timeout using `Promise.race`.
pub async fn race_with_timeout(promise: Promise, timeout_ms: i32) -> RaceResult {
    let Some(window) = web_sys::window() else {
        return RaceResult::Error("Window not available".to_string());
    };

    // Resolves to undefined, which is how a timeout is told apart
    let timeout_promise = Promise::new(&mut |resolve, _| {
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, timeout_ms);
    });

    let race_array = Array::new();
    race_array.push(&promise);
    race_array.push(&timeout_promise);

    match JsFuture::from(Promise::race(&race_array)).await {
        Ok(result) if result.is_undefined() => RaceResult::TimedOut,
        Ok(result) => RaceResult::Completed(result),
        Err(e) => RaceResult::Error(e.as_string().unwrap_or_else(|| "Unknown error".to_string())),
    }
}

// =============================================================================
// Browser Transport
// =============================================================================

/// [`Transport`] backed by `window.fetch`.
///
/// Every request is raced against [`FETCH_TIMEOUT_MS`]. Non-2xx responses
/// are returned as-is; the client decides what they mean.
#[derive(Clone, Copy, Debug)]
pub struct BrowserTransport {
    timeout_ms: i32,
}

impl BrowserTransport {
    pub fn new() -> Self {
        Self {
            timeout_ms: FETCH_TIMEOUT_MS,
        }
    }
}

impl Default for BrowserTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for BrowserTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, FetchError> {
        let window = web_sys::window().ok_or(FetchError::NoWindow)?;

        let opts = RequestInit::new();
        opts.set_method(request.method.as_str());
        opts.set_mode(RequestMode::Cors);

        let headers = Headers::new().map_err(|_| FetchError::RequestCreationFailed)?;
        for (name, value) in &request.headers {
            headers
                .set(name, value)
                .map_err(|_| FetchError::RequestCreationFailed)?;
        }
        opts.set_headers(&headers);
        if let Some(body) = &request.body {
            opts.set_body(&JsValue::from_str(body));
        }

        let js_request = Request::new_with_str_and_init(&request.url, &opts)
            .map_err(|_| FetchError::RequestCreationFailed)?;

        match race_with_timeout(window.fetch_with_request(&js_request), self.timeout_ms).await {
            RaceResult::TimedOut => {
                log::warn!("{} {} timed out", request.method.as_str(), request.url);
                Err(FetchError::Timeout)
            }
            RaceResult::Error(msg) => Err(FetchError::NetworkError(msg)),
            RaceResult::Completed(result) => {
                let resp: Response = result.dyn_into().map_err(|_| FetchError::InvalidContent)?;

                let text = JsFuture::from(resp.text().map_err(|_| FetchError::ResponseReadFailed)?)
                    .await
                    .map_err(|_| FetchError::ResponseReadFailed)?;

                Ok(ApiResponse {
                    status: resp.status(),
                    body: text.as_string().ok_or(FetchError::InvalidContent)?,
                })
            }
        }
    }
}
