//! Component hook over the resource cache.
//!
//! [`use_resource`] is what pages call: it declares a dependency on a
//! resource key, keeps the entry subscribed for the component's lifetime,
//! revalidates on mount and on key change, and exposes the entry's signals
//! as a typed [`ResourceState`].

use std::sync::Arc;

use futures::FutureExt;
use futures::future::LocalBoxFuture;
use leptos::prelude::*;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::{EntryState, ResourceCache};
use crate::app::AppContext;
use crate::error::FetchError;

/// A sharable fetch function: key in, JSON value out.
///
/// The closure is `Send + Sync` so states can cross into view closures; the
/// returned future is local because browser fetch futures are not `Send`.
pub type Fetcher =
    Arc<dyn Fn(String) -> LocalBoxFuture<'static, Result<Value, FetchError>> + Send + Sync>;

/// Wrap an async fn into a [`Fetcher`].
pub fn json_fetcher<F, Fut>(fetch: F) -> Fetcher
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Value, FetchError>> + 'static,
{
    Arc::new(move |key| fetch(key).boxed_local())
}

/// Typed, reactive view of one cache entry, as seen by a component.
///
/// While `key` is `None` no request is made and `data`/`error` read as
/// `None` with both flags false.
pub struct ResourceState<T: Send + Sync + 'static> {
    /// The cached value, deserialized per read.
    pub data: Signal<Option<T>>,
    /// Error from the last failed fetch; stale `data` stays readable.
    pub error: Signal<Option<FetchError>>,
    /// True during the first fetch for the key (no prior value).
    pub is_loading: Signal<bool>,
    /// True while refreshing an already-cached value.
    pub is_validating: Signal<bool>,
    cache: ResourceCache,
    key: Signal<Option<String>>,
    fetcher: Fetcher,
}

impl<T: Send + Sync + 'static> Clone for ResourceState<T> {
    fn clone(&self) -> Self {
        Self {
            data: self.data,
            error: self.error,
            is_loading: self.is_loading,
            is_validating: self.is_validating,
            cache: self.cache.clone(),
            key: self.key,
            fetcher: self.fetcher.clone(),
        }
    }
}

impl<T: Send + Sync + 'static> ResourceState<T> {
    /// Force a re-fetch of the key's resource (after a write).
    ///
    /// Settles once every subscriber to the key observes the same resulting
    /// value or error; no-op when the key is currently `None`.
    pub async fn mutate(&self) -> Result<(), FetchError> {
        let Some(key) = self.key.get_untracked() else {
            return Ok(());
        };
        self.cache.revalidate(&key, &self.fetcher).await
    }
}

/// Subscribe to a remote resource through the shared cache.
///
/// `key` is typically a derived signal over a route param or a persisted
/// selection; a `None` key suppresses fetching entirely, which is how list
/// queries stay conditional on a prerequisite selection.
pub fn use_resource<T>(key: Signal<Option<String>>, fetcher: Fetcher) -> ResourceState<T>
where
    T: Clone + DeserializeOwned + Send + Sync + 'static,
{
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let cache = ctx.cache;

    // Revalidate on mount and whenever the key changes, moving the
    // subscription from the old key to the new one.
    let effect_cache = cache.clone();
    let effect_fetcher = fetcher.clone();
    Effect::new(move |prev: Option<Option<String>>| {
        let current = key.get();
        if let Some(prev_key) = prev.flatten() {
            if Some(&prev_key) == current.as_ref() {
                return current;
            }
            effect_cache.release(&prev_key);
        }
        if let Some(k) = current.clone() {
            effect_cache.retain(&k);
            let cache = effect_cache.clone();
            let fetcher = effect_fetcher.clone();
            leptos::task::spawn_local(async move {
                // Background refresh; the error also lands on the entry's
                // error signal for the page to render.
                if let Err(err) = cache.revalidate(&k, &fetcher).await {
                    web_sys::console::warn_1(&format!("revalidate {k}: {err}").into());
                }
            });
        }
        current
    });

    let cleanup_cache = cache.clone();
    on_cleanup(move || {
        if let Some(k) = key.try_get_untracked().flatten() {
            cleanup_cache.release(&k);
        }
    });

    let data_cache = cache.clone();
    let data = Signal::derive(move || {
        let k = key.get()?;
        let value = data_cache.entry(&k).data.get()?;
        serde_json::from_value::<T>(value).ok()
    });

    let error_cache = cache.clone();
    let error = Signal::derive(move || {
        let k = key.get()?;
        error_cache.entry(&k).error.get()
    });

    let loading_cache = cache.clone();
    let is_loading = Signal::derive(move || {
        key.get()
            .is_some_and(|k| loading_cache.entry(&k).state.get() == EntryState::Loading)
    });

    let validating_cache = cache.clone();
    let is_validating = Signal::derive(move || {
        key.get()
            .is_some_and(|k| validating_cache.entry(&k).state.get() == EntryState::Revalidating)
    });

    ResourceState {
        data,
        error,
        is_loading,
        is_validating,
        cache,
        key,
        fetcher,
    }
}
