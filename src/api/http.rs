//! Network fetching utilities with timeout support.
//!
//! Wraps the browser Fetch API with `Promise.race`-based timeouts. Mutating
//! requests are JSON-encoded except poster creation, which posts multipart
//! form data (the browser supplies the boundary header).

use js_sys::{Array, Promise};
use serde::{Serialize, de::DeserializeOwned};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{FormData, Headers, Request, RequestInit, RequestMode, Response};

use crate::config::FETCH_TIMEOUT_MS;
use crate::error::FetchError;

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

/// Race a promise against a timeout.
///
/// The timeout promise resolves to `undefined`, which the fetch promise
/// never does, so an `undefined` winner means the timeout fired first.
pub async fn race_with_timeout(promise: Promise, timeout_ms: i32) -> RaceResult {
    let Some(window) = web_sys::window() else {
        return RaceResult::Error("Window not available".to_string());
    };

    let timeout_promise = Promise::new(&mut |resolve, _| {
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, timeout_ms);
    });

    let race_array = Array::new();
    race_array.push(&promise);
    race_array.push(&timeout_promise);
    let race_promise = Promise::race(&race_array);

    match JsFuture::from(race_promise).await {
        Ok(result) => {
            if result.is_undefined() {
                RaceResult::TimedOut
            } else {
                RaceResult::Completed(result)
            }
        }
        Err(e) => RaceResult::Error(e.as_string().unwrap_or_else(|| "Unknown error".to_string())),
    }
}

// =============================================================================
// Fetch Functions
// =============================================================================

/// Fetch and parse JSON from a URL.
pub async fn fetch_json<T: DeserializeOwned>(url: &str) -> Result<T, FetchError> {
    let request = build_request("GET", url, None)?;
    let text = dispatch(request).await?;
    serde_json::from_str(&text).map_err(|e| FetchError::JsonParse(e.to_string()))
}

/// Send a JSON-encoded mutating request (POST/PUT/PATCH/DELETE).
///
/// The response body is discarded; callers re-read through the cache by
/// calling `mutate()` on the affected keys after this settles.
pub async fn send_json<B: Serialize>(
    method: &str,
    url: &str,
    body: Option<&B>,
) -> Result<(), FetchError> {
    let json = match body {
        Some(body) => Some(
            serde_json::to_string(body).map_err(|e| FetchError::JsonParse(e.to_string()))?,
        ),
        None => None,
    };
    let request = build_request(method, url, json.as_deref())?;
    dispatch(request).await.map(|_| ())
}

/// POST multipart form data (poster creation: name, description, image,
/// festival_id). No content type is set; the browser adds the boundary.
pub async fn send_form(url: &str, form: &FormData) -> Result<(), FetchError> {
    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    opts.set_body(form);

    let request = Request::new_with_str_and_init(url, &opts)
        .map_err(|_| FetchError::RequestCreationFailed)?;
    dispatch(request).await.map(|_| ())
}

/// Build a request, attaching a JSON content type when a body is present.
fn build_request(method: &str, url: &str, body: Option<&str>) -> Result<Request, FetchError> {
    let opts = RequestInit::new();
    opts.set_method(method);
    opts.set_mode(RequestMode::Cors);

    if let Some(body) = body {
        let headers = Headers::new().map_err(|_| FetchError::RequestCreationFailed)?;
        headers
            .set("Content-Type", "application/json")
            .map_err(|_| FetchError::RequestCreationFailed)?;
        opts.set_headers(headers.as_ref());
        opts.set_body(&JsValue::from_str(body));
    }

    Request::new_with_str_and_init(url, &opts).map_err(|_| FetchError::RequestCreationFailed)
}

/// Dispatch a request and return the response body text.
///
/// Uses [`race_with_timeout`] to bound the request; a non-2xx status maps to
/// [`FetchError::HttpError`].
async fn dispatch(request: Request) -> Result<String, FetchError> {
    let window = web_sys::window().ok_or(FetchError::NoWindow)?;
    let fetch_promise = window.fetch_with_request(&request);

    match race_with_timeout(fetch_promise, FETCH_TIMEOUT_MS).await {
        RaceResult::TimedOut => Err(FetchError::Timeout),
        RaceResult::Error(msg) => Err(FetchError::NetworkError(msg)),
        RaceResult::Completed(result) => {
            let resp: Response = result.dyn_into().map_err(|_| FetchError::InvalidContent)?;

            if !resp.ok() {
                return Err(FetchError::HttpError(resp.status()));
            }

            let text = JsFuture::from(resp.text().map_err(|_| FetchError::ResponseReadFailed)?)
                .await
                .map_err(|_| FetchError::ResponseReadFailed)?;

            text.as_string().ok_or(FetchError::InvalidContent)
        }
    }
}
