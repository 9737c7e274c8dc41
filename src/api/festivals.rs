//! Festival endpoints and read hooks.

use leptos::prelude::*;

use crate::cache::{ResourceState, json_fetcher, use_resource};
use crate::config::API_BASE_URL;
use crate::error::FetchError;
use crate::models::{Festival, FestivalListResponse, FestivalPayload};

use super::http;

pub fn festivals_url() -> String {
    format!("{}/festivals", API_BASE_URL)
}

pub fn festival_url(id: &str) -> String {
    format!("{}/festivals/{}", API_BASE_URL, id)
}

// =============================================================================
// Read hooks
// =============================================================================

/// All festivals. The cache holds the unwrapped list, not the envelope.
pub fn use_festival_list() -> ResourceState<Vec<Festival>> {
    let key = Signal::derive(|| Some(festivals_url()));
    use_resource(
        key,
        json_fetcher(|url| async move {
            let resp: FestivalListResponse = http::fetch_json(&url).await?;
            serde_json::to_value(resp.festivals).map_err(|e| FetchError::JsonParse(e.to_string()))
        }),
    )
}

/// One festival by id. A `None` id suppresses the fetch, which covers the
/// dependent case (poster detail waits for the poster's festival_id).
///
/// The body is decoded as a [`Festival`] here, so a shape mismatch settles
/// as [`FetchError::JsonParse`] on the entry instead of reading as absent.
pub fn use_festival(id: Signal<Option<String>>) -> ResourceState<Festival> {
    let key = Signal::derive(move || id.get().map(|id| festival_url(&id)));
    use_resource(
        key,
        json_fetcher(|url| async move {
            let festival: Festival = http::fetch_json(&url).await?;
            serde_json::to_value(festival).map_err(|e| FetchError::JsonParse(e.to_string()))
        }),
    )
}

// =============================================================================
// Writes
// =============================================================================

pub async fn create_festival(payload: &FestivalPayload) -> Result<(), FetchError> {
    http::send_json("POST", &festivals_url(), Some(payload)).await
}

pub async fn update_festival(id: &str, payload: &FestivalPayload) -> Result<(), FetchError> {
    http::send_json("PUT", &festival_url(id), Some(payload)).await
}

pub async fn delete_festival(id: &str) -> Result<(), FetchError> {
    http::send_json::<()>("DELETE", &festival_url(id), None).await
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use futures::FutureExt;
    use serde_json::json;

    use super::*;
    use crate::cache::{Fetcher, ResourceCache};

    /// Typed decode inside the fetcher, the way `use_festival` builds it,
    /// fed a body that is not a festival.
    fn mismatched_body_fetcher() -> Fetcher {
        Arc::new(|_url| {
            async {
                let festival: Festival = serde_json::from_value(json!({ "posters": [] }))
                    .map_err(|e| FetchError::JsonParse(e.to_string()))?;
                serde_json::to_value(festival).map_err(|e| FetchError::JsonParse(e.to_string()))
            }
            .boxed_local()
        })
    }

    #[tokio::test]
    async fn test_mismatched_body_settles_as_parse_error() {
        let owner = Owner::new();
        owner.set();

        let cache = ResourceCache::new(8);
        let key = festival_url("f1");
        let result = cache.revalidate(&key, &mismatched_body_fetcher()).await;
        assert!(matches!(result, Err(FetchError::JsonParse(_))));

        // The page sees an error, not a silently absent festival.
        let signals = cache.entry(&key);
        assert!(signals.data.get_untracked().is_none());
        assert!(matches!(
            signals.error.get_untracked(),
            Some(FetchError::JsonParse(_))
        ));
    }
}
