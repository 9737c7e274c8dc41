//! Revalidating read cache for remote resources.
//!
//! Each entry is keyed by the request URL and holds the last fetched JSON
//! value, the last error, and a lifecycle state, all as signals so every
//! subscriber re-renders on transition. The cache guarantees at most one
//! in-flight fetch per key: concurrent revalidations join the running fetch
//! through oneshot waiters and settle with its result.
//!
//! The payload is opaque to the cache (`serde_json::Value`); typed views are
//! derived at the hook layer ([`hook::use_resource`]).
//!
//! Entries are retained after their last subscriber is gone, bounded by an
//! LRU list: once the entry count exceeds the configured capacity, the
//! oldest zero-subscriber entries are dropped. Entries with live subscribers
//! are never evicted.

mod hook;

pub use hook::{Fetcher, ResourceState, json_fetcher, use_resource};

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use futures::channel::oneshot;
use leptos::prelude::*;
use serde_json::Value;

use crate::error::FetchError;

/// Lifecycle state of a cache entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntryState {
    /// No fetch in progress; `data`/`error` reflect the last settled fetch.
    #[default]
    Idle,
    /// First fetch for this key, no prior value to show.
    Loading,
    /// Refresh while a previously fetched value is still displayed.
    Revalidating,
    /// Last fetch failed; any previously fetched value is retained.
    Error,
}

/// The reactive face of a cache entry, shared by all subscribers to a key.
///
/// `Copy` because all fields are signals.
#[derive(Clone, Copy)]
pub struct EntrySignals {
    pub data: RwSignal<Option<Value>>,
    pub error: RwSignal<Option<FetchError>>,
    pub state: RwSignal<EntryState>,
}

impl EntrySignals {
    fn new() -> Self {
        Self {
            data: RwSignal::new(None),
            error: RwSignal::new(None),
            state: RwSignal::new(EntryState::Idle),
        }
    }
}

struct CacheEntry {
    signals: EntrySignals,
    subscribers: usize,
    in_flight: bool,
    waiters: Vec<oneshot::Sender<Result<(), FetchError>>>,
    last_fetched_at: Option<f64>,
}

impl Default for CacheEntry {
    fn default() -> Self {
        Self {
            signals: EntrySignals::new(),
            subscribers: 0,
            in_flight: false,
            waiters: Vec::new(),
            last_fetched_at: None,
        }
    }
}

struct CacheInner {
    entries: HashMap<String, CacheEntry>,
    /// LRU order, most recently used last.
    order: Vec<String>,
    capacity: usize,
}

impl CacheInner {
    fn touch(&mut self, key: &str) {
        if let Some(pos) = self.order.iter().position(|k| k == key) {
            self.order.remove(pos);
        }
        self.order.push(key.to_string());
    }

    fn entry_mut(&mut self, key: &str) -> &mut CacheEntry {
        self.touch(key);
        self.entries.entry(key.to_string()).or_default()
    }

    /// Drop the oldest zero-subscriber entries until within capacity.
    fn evict_over_capacity(&mut self) {
        if self.entries.len() <= self.capacity {
            return;
        }
        let mut excess = self.entries.len() - self.capacity;
        let mut index = 0;
        while excess > 0 && index < self.order.len() {
            let key = &self.order[index];
            let evictable = self
                .entries
                .get(key)
                .is_some_and(|e| e.subscribers == 0 && !e.in_flight);
            if evictable {
                let key = self.order.remove(index);
                self.entries.remove(&key);
                excess -= 1;
            } else {
                index += 1;
            }
        }
    }
}

/// Shared, explicitly constructed resource cache.
///
/// Built once by the root `App` and handed to components through the
/// application context; there is no ambient global instance.
#[derive(Clone)]
pub struct ResourceCache {
    inner: Arc<Mutex<CacheInner>>,
}

impl ResourceCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(CacheInner {
                entries: HashMap::new(),
                order: Vec::new(),
                capacity,
            })),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, CacheInner> {
        self.inner.lock().expect("cache lock poisoned")
    }

    /// Get (or lazily create) the signals for a key.
    ///
    /// Repeated calls for the same key return the same signals, so derived
    /// views stay bound to one underlying entry.
    pub fn entry(&self, key: &str) -> EntrySignals {
        self.lock().entry_mut(key).signals
    }

    /// Register a subscriber for a key, pinning its entry against eviction.
    pub fn retain(&self, key: &str) {
        let mut inner = self.lock();
        inner.entry_mut(key).subscribers += 1;
        inner.evict_over_capacity();
    }

    /// Drop a subscriber for a key. The entry is kept for future subscribers
    /// until LRU eviction claims it.
    pub fn release(&self, key: &str) {
        let mut inner = self.lock();
        if let Some(entry) = inner.entries.get_mut(key) {
            entry.subscribers = entry.subscribers.saturating_sub(1);
        }
        inner.evict_over_capacity();
    }

    /// Fetch the key's resource and replace the cached value on success.
    ///
    /// If a fetch for the key is already in flight, this does not start a
    /// second request; it waits for the running one and returns its outcome.
    /// On failure the previous value is retained and the error recorded, so
    /// stale data stays visible alongside the error flag.
    pub async fn revalidate(&self, key: &str, fetcher: &Fetcher) -> Result<(), FetchError> {
        let joined = {
            let mut inner = self.lock();
            let entry = inner.entry_mut(key);
            if entry.in_flight {
                let (tx, rx) = oneshot::channel();
                entry.waiters.push(tx);
                Some(rx)
            } else {
                entry.in_flight = true;
                let state = if entry.signals.data.get_untracked().is_some() {
                    EntryState::Revalidating
                } else {
                    EntryState::Loading
                };
                entry.signals.state.set(state);
                entry.signals.error.set(None);
                None
            }
        };

        if let Some(rx) = joined {
            return rx
                .await
                .unwrap_or(Err(FetchError::NetworkError("fetch abandoned".to_string())));
        }

        let result = fetcher(key.to_string()).await;
        self.settle(key, result)
    }

    /// Record a fetch outcome on the entry and wake every joined caller.
    fn settle(&self, key: &str, result: Result<Value, FetchError>) -> Result<(), FetchError> {
        let (signals, waiters) = {
            let mut inner = self.lock();
            let entry = inner.entry_mut(key);
            entry.in_flight = false;
            entry.last_fetched_at = Some(now_ms());
            (entry.signals, std::mem::take(&mut entry.waiters))
        };

        let outcome = match result {
            Ok(value) => {
                signals.data.set(Some(value));
                signals.error.set(None);
                signals.state.set(EntryState::Idle);
                Ok(())
            }
            Err(err) => {
                signals.error.set(Some(err.clone()));
                signals.state.set(EntryState::Error);
                Err(err)
            }
        };

        for waiter in waiters {
            let _ = waiter.send(outcome.clone());
        }
        outcome
    }

    #[cfg(test)]
    fn contains(&self, key: &str) -> bool {
        self.lock().entries.contains_key(key)
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.lock().entries.len()
    }
}

impl Default for ResourceCache {
    fn default() -> Self {
        Self::new(crate::config::CACHE_CAPACITY)
    }
}

#[cfg(target_arch = "wasm32")]
fn now_ms() -> f64 {
    js_sys::Date::now()
}

#[cfg(not(target_arch = "wasm32"))]
fn now_ms() -> f64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as f64)
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use futures::FutureExt;
    use futures::join;
    use serde_json::json;

    fn test_owner() -> Owner {
        let owner = Owner::new();
        owner.set();
        owner
    }

    /// Fetcher that resolves immediately with the given value.
    fn ready_fetcher(value: Value) -> Fetcher {
        Arc::new(move |_key| {
            let value = value.clone();
            async move { Ok(value) }.boxed_local()
        })
    }

    /// Fetcher that fails immediately.
    fn failing_fetcher(err: FetchError) -> Fetcher {
        Arc::new(move |_key| {
            let err = err.clone();
            async move { Err(err) }.boxed_local()
        })
    }

    /// Fetcher that counts invocations and blocks until `release` fires.
    fn gated_fetcher(
        value: Value,
        calls: Arc<AtomicUsize>,
    ) -> (Fetcher, oneshot::Sender<()>) {
        let (tx, rx) = oneshot::channel::<()>();
        let gate = Arc::new(Mutex::new(Some(rx)));
        let fetcher: Fetcher = Arc::new(move |_key| {
            calls.fetch_add(1, Ordering::SeqCst);
            let gate = gate
                .lock()
                .expect("gate lock")
                .take()
                .expect("fetcher invoked more than once");
            let value = value.clone();
            async move {
                let _ = gate.await;
                Ok(value)
            }
            .boxed_local()
        });
        (fetcher, tx)
    }

    #[tokio::test]
    async fn test_concurrent_revalidate_issues_single_fetch() {
        let _owner = test_owner();
        let cache = ResourceCache::new(8);
        let calls = Arc::new(AtomicUsize::new(0));
        let (fetcher, release) = gated_fetcher(json!({"id": "f1"}), calls.clone());

        let first = cache.revalidate("/festivals/f1", &fetcher);
        let second = cache.revalidate("/festivals/f1", &fetcher);
        let releaser = async move {
            // Runs after both revalidations have been polled once.
            let _ = release.send(());
        };

        let (r1, r2, ()) = join!(first, second, releaser);
        assert!(r1.is_ok());
        assert!(r2.is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        let signals = cache.entry("/festivals/f1");
        assert_eq!(signals.data.get_untracked(), Some(json!({"id": "f1"})));
        assert_eq!(signals.state.get_untracked(), EntryState::Idle);
        assert!(signals.error.get_untracked().is_none());
    }

    #[tokio::test]
    async fn test_loading_then_revalidating_states() {
        let _owner = test_owner();
        let cache = ResourceCache::new(8);
        let calls = Arc::new(AtomicUsize::new(0));

        // First fetch: no prior value, so the entry reports Loading.
        let (fetcher, release) = gated_fetcher(json!(1), calls.clone());
        let revalidation = cache.revalidate("k", &fetcher);
        let checker = async {
            assert_eq!(
                cache.entry("k").state.get_untracked(),
                EntryState::Loading
            );
            let _ = release.send(());
        };
        let (result, ()) = join!(revalidation, checker);
        assert!(result.is_ok());

        // Refresh with a cached value: Revalidating, stale data still there.
        let (fetcher, release) = gated_fetcher(json!(2), calls.clone());
        let revalidation = cache.revalidate("k", &fetcher);
        let checker = async {
            let signals = cache.entry("k");
            assert_eq!(signals.state.get_untracked(), EntryState::Revalidating);
            assert_eq!(signals.data.get_untracked(), Some(json!(1)));
            let _ = release.send(());
        };
        let (result, ()) = join!(revalidation, checker);
        assert!(result.is_ok());
        assert_eq!(cache.entry("k").data.get_untracked(), Some(json!(2)));
    }

    #[tokio::test]
    async fn test_failed_mutate_keeps_previous_value() {
        let _owner = test_owner();
        let cache = ResourceCache::new(8);

        let seed = ready_fetcher(json!({"posters": ["p1"]}));
        cache.revalidate("k", &seed).await.expect("seed fetch");

        let failing = failing_fetcher(FetchError::HttpError(500));
        let result = cache.revalidate("k", &failing).await;
        assert_eq!(result, Err(FetchError::HttpError(500)));

        let signals = cache.entry("k");
        assert_eq!(
            signals.data.get_untracked(),
            Some(json!({"posters": ["p1"]}))
        );
        assert_eq!(signals.error.get_untracked(), Some(FetchError::HttpError(500)));
        assert_eq!(signals.state.get_untracked(), EntryState::Error);
    }

    #[tokio::test]
    async fn test_successful_mutate_replaces_value_and_clears_error() {
        let _owner = test_owner();
        let cache = ResourceCache::new(8);

        let failing = failing_fetcher(FetchError::Timeout);
        let _ = cache.revalidate("k", &failing).await;
        assert!(cache.entry("k").error.get_untracked().is_some());

        let fetcher = ready_fetcher(json!("fresh"));
        cache.revalidate("k", &fetcher).await.expect("refresh");

        let signals = cache.entry("k");
        assert_eq!(signals.data.get_untracked(), Some(json!("fresh")));
        assert!(signals.error.get_untracked().is_none());
        assert_eq!(signals.state.get_untracked(), EntryState::Idle);
    }

    #[test]
    fn test_lru_evicts_oldest_unsubscribed_entry() {
        let _owner = test_owner();
        let cache = ResourceCache::new(2);

        for key in ["a", "b", "c"] {
            cache.retain(key);
            cache.release(key);
        }

        assert_eq!(cache.len(), 2);
        assert!(!cache.contains("a"));
        assert!(cache.contains("b"));
        assert!(cache.contains("c"));
    }

    #[test]
    fn test_subscribed_entries_never_evicted() {
        let _owner = test_owner();
        let cache = ResourceCache::new(2);

        cache.retain("a");
        cache.retain("b");
        cache.retain("c");
        assert_eq!(cache.len(), 3);

        // Releasing one brings the count back under control.
        cache.release("a");
        assert_eq!(cache.len(), 2);
        assert!(!cache.contains("a"));
    }

    #[test]
    fn test_touch_refreshes_lru_position() {
        let _owner = test_owner();
        let cache = ResourceCache::new(2);

        cache.retain("a");
        cache.release("a");
        cache.retain("b");
        cache.release("b");

        // Reading "a" makes it the most recently used.
        let _ = cache.entry("a");

        cache.retain("c");
        cache.release("c");
        assert!(cache.contains("a"));
        assert!(!cache.contains("b"));
    }
}
