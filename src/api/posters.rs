//! Poster endpoints and read hooks.

use leptos::prelude::*;
use serde_json::json;
use web_sys::FormData;

use crate::cache::{ResourceState, json_fetcher, use_resource};
use crate::config::API_BASE_URL;
use crate::error::FetchError;
use crate::models::{Poster, PosterListResponse, PosterStatus};

use super::http;

pub fn posters_url() -> String {
    format!("{}/posters", API_BASE_URL)
}

pub fn poster_url(id: &str) -> String {
    format!("{}/posters/{}", API_BASE_URL, id)
}

pub fn poster_status_url(id: &str) -> String {
    format!("{}/posters/{}/status", API_BASE_URL, id)
}

/// Cache key for a festival's poster list; `None` while no festival is
/// selected, so the list query stays conditional on the selection.
pub fn poster_list_key(festival_id: &str) -> Option<String> {
    if festival_id.is_empty() {
        None
    } else {
        Some(format!("{}/festivals/{}/posters", API_BASE_URL, festival_id))
    }
}

// =============================================================================
// Read hooks
// =============================================================================

/// Posters scoped by the selected festival ("" = nothing selected, no fetch).
pub fn use_poster_list(festival_id: Signal<String>) -> ResourceState<Vec<Poster>> {
    let key = Signal::derive(move || poster_list_key(&festival_id.get()));
    use_resource(
        key,
        json_fetcher(|url| async move {
            let resp: PosterListResponse = http::fetch_json(&url).await?;
            serde_json::to_value(resp.posters).map_err(|e| FetchError::JsonParse(e.to_string()))
        }),
    )
}

/// One poster by id. Decoded as a [`Poster`] in the fetcher, so a shape
/// mismatch settles as [`FetchError::JsonParse`] on the entry.
pub fn use_poster(id: Signal<Option<String>>) -> ResourceState<Poster> {
    let key = Signal::derive(move || id.get().map(|id| poster_url(&id)));
    use_resource(
        key,
        json_fetcher(|url| async move {
            let poster: Poster = http::fetch_json(&url).await?;
            serde_json::to_value(poster).map_err(|e| FetchError::JsonParse(e.to_string()))
        }),
    )
}

// =============================================================================
// Writes
// =============================================================================

/// Register a poster: multipart form with the image plus scalar fields.
pub async fn create_poster(
    name: &str,
    description: &str,
    image: &web_sys::File,
    festival_id: &str,
) -> Result<(), FetchError> {
    let form = FormData::new().map_err(|_| FetchError::RequestCreationFailed)?;
    form.append_with_str("name", name)
        .map_err(|_| FetchError::RequestCreationFailed)?;
    form.append_with_str("description", description)
        .map_err(|_| FetchError::RequestCreationFailed)?;
    form.append_with_blob_and_filename("image", image, &image.name())
        .map_err(|_| FetchError::RequestCreationFailed)?;
    form.append_with_str("festival_id", festival_id)
        .map_err(|_| FetchError::RequestCreationFailed)?;

    http::send_form(&posters_url(), &form).await
}

pub async fn update_poster(id: &str, name: &str, description: &str) -> Result<(), FetchError> {
    let body = json!({ "name": name, "description": description });
    http::send_json("PUT", &poster_url(id), Some(&body)).await
}

pub async fn set_poster_status(id: &str, status: PosterStatus) -> Result<(), FetchError> {
    let body = json!({ "status": status });
    http::send_json("PATCH", &poster_status_url(id), Some(&body)).await
}

pub async fn delete_poster(id: &str) -> Result<(), FetchError> {
    http::send_json::<()>("DELETE", &poster_url(id), None).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poster_list_key_requires_selection() {
        assert_eq!(poster_list_key(""), None);
        assert_eq!(
            poster_list_key("f1").as_deref(),
            Some(format!("{}/festivals/f1/posters", API_BASE_URL).as_str())
        );
    }

    #[test]
    fn test_poster_urls() {
        assert!(poster_url("p1").ends_with("/posters/p1"));
        assert!(poster_status_url("p1").ends_with("/posters/p1/status"));
    }
}
