//! In-memory [`Transport`] with canned responses.
//!
//! Available to unit tests and, through the `mock` feature, to integration
//! tests. Unknown URLs answer `404 {"message": "Not Found"}`. A route can be
//! delayed by a number of executor polls, which makes the completion order of
//! concurrent requests deterministic.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Mutex, MutexGuard};
use std::task::{Context, Poll};

use super::error::FetchError;
use super::github::{ApiRequest, ApiResponse, Method, Transport};

#[derive(Clone, Debug)]
struct Route {
    status: u16,
    body: String,
    delay: usize,
    fail: Option<FetchError>,
}

/// Transport answering from a route table and recording every request.
#[derive(Debug, Default)]
pub struct MockTransport {
    routes: Mutex<HashMap<(Method, String), Route>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `method url` with `status` and `body`.
    pub fn route(self, method: Method, url: &str, status: u16, body: &str) -> Self {
        lock(&self.routes).insert(
            (method, url.to_string()),
            Route {
                status,
                body: body.to_string(),
                delay: 0,
                fail: None,
            },
        );
        self
    }

    /// Answer `GET url` with `200` and a JSON body.
    pub fn json(self, url: &str, value: serde_json::Value) -> Self {
        self.route(Method::Get, url, 200, &value.to_string())
    }

    /// Fail `GET url` at the transport level.
    pub fn fail(self, url: &str, error: FetchError) -> Self {
        lock(&self.routes).insert(
            (Method::Get, url.to_string()),
            Route {
                status: 0,
                body: String::new(),
                delay: 0,
                fail: Some(error),
            },
        );
        self
    }

    /// Hold the response to `GET url` back for `polls` executor polls.
    pub fn delay(self, url: &str, polls: usize) -> Self {
        if let Some(route) = lock(&self.routes).get_mut(&(Method::Get, url.to_string())) {
            route.delay = polls;
        }
        self
    }

    /// Every request sent so far, in order.
    pub fn requests(&self) -> Vec<ApiRequest> {
        lock(&self.requests).clone()
    }

    /// Number of requests sent to `url`, any method.
    pub fn request_count(&self, url: &str) -> usize {
        lock(&self.requests).iter().filter(|r| r.url == url).count()
    }
}

impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, FetchError> {
        let route = lock(&self.routes)
            .get(&(request.method, request.url.clone()))
            .cloned();
        lock(&self.requests).push(request);

        let Some(route) = route else {
            return Ok(ApiResponse {
                status: 404,
                body: r#"{"message":"Not Found"}"#.to_string(),
            });
        };

        YieldNow(route.delay).await;
        match route.fail {
            Some(error) => Err(error),
            None => Ok(ApiResponse {
                status: route.status,
                body: route.body,
            }),
        }
    }
}

/// Pending for the given number of polls, waking itself each time.
struct YieldNow(usize);

impl Future for YieldNow {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.0 == 0 {
            return Poll::Ready(());
        }
        self.0 -= 1;
        cx.waker().wake_by_ref();
        Poll::Pending
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
