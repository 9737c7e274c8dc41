//! Session-persisted reactive values.
//!
//! The currently selected festival must survive navigation and reloads
//! within a tab, so it lives in sessionStorage behind a reactive handle:
//! reads fall back to the caller's default on missing or malformed payloads,
//! writes persist the JSON-serialized value and notify sibling components
//! through an in-tab window event. The browser `storage` event is observed
//! as well, so writes from other contexts refresh the in-memory mirror when
//! the browser delivers them.

use leptos::prelude::*;
use serde::{Serialize, de::DeserializeOwned};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::Closure;

use crate::config::SESSION_STORAGE_EVENT;
use crate::utils::dom;

/// Decode a raw persisted payload, falling back on absence or parse failure.
fn decode_or<T: DeserializeOwned>(raw: Option<&str>, fallback: T) -> T {
    raw.and_then(|s| serde_json::from_str(s).ok())
        .unwrap_or(fallback)
}

/// Serialize a value for persistence. `None` means "do not write".
fn encode<T: Serialize>(value: &T) -> Option<String> {
    serde_json::to_string(value).ok()
}

/// Read the persisted value for `key`, or `fallback` when storage is
/// unavailable, empty, or holds something unparseable.
fn read_value<T: Clone + DeserializeOwned>(key: &str, fallback: T) -> T {
    let raw = dom::session_storage().and_then(|s| s.get_item(key).ok().flatten());
    decode_or(raw.as_deref(), fallback)
}

/// Reactive handle on one session-persisted value.
#[derive(Clone)]
pub struct SessionValue<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Current value, refreshed on every write and change notification.
    pub value: Signal<T>,
    signal: RwSignal<T>,
    key: &'static str,
    initial: T,
}

impl<T> SessionValue<T>
where
    T: Clone + Serialize + DeserializeOwned + Send + Sync + 'static,
{
    /// Persist `value` under the key, then update the in-memory mirror.
    ///
    /// Serialization failure or absent storage makes the whole write a
    /// no-op: the mirror only moves when the persisted copy did, so the two
    /// never disagree.
    pub fn set(&self, value: T) {
        let Some(json) = encode(&value) else {
            return;
        };
        let Some(storage) = dom::session_storage() else {
            return;
        };
        let _ = storage.set_item(self.key, &json);
        dom::dispatch_window_event(SESSION_STORAGE_EVENT);
        self.signal.set(value);
    }

    /// Apply `f` to the currently *persisted* value and store the result.
    ///
    /// Re-reads storage before applying, so two sequential updates in one
    /// tick compose instead of the second clobbering the first.
    pub fn update(&self, f: impl FnOnce(T) -> T) {
        let current = read_value(self.key, self.initial.clone());
        self.set(f(current));
    }

    /// Current value without registering a reactive dependency.
    pub fn get_untracked(&self) -> T {
        self.signal.get_untracked()
    }
}

/// Hook: a reactive value mirrored to sessionStorage under `key`.
///
/// Initialized from storage on first use; `initial` covers the empty,
/// malformed, and storage-unavailable cases. Change notifications (the
/// in-tab write event and the browser `storage` event) refresh the mirror
/// from storage.
pub fn use_session_value<T>(key: &'static str, initial: T) -> SessionValue<T>
where
    T: Clone + Serialize + DeserializeOwned + Send + Sync + 'static,
{
    let signal = RwSignal::new(read_value(key, initial.clone()));

    #[cfg(target_arch = "wasm32")]
    {
        use send_wrapper::SendWrapper;
        use wasm_bindgen::JsCast;

        let fallback = initial.clone();
        let handler = Closure::wrap(Box::new(move |event: web_sys::Event| {
            // The storage event names the key it changed; the in-tab event
            // does not, so it refreshes unconditionally.
            if let Some(storage_event) = event.dyn_ref::<web_sys::StorageEvent>()
                && storage_event.key().is_some_and(|k| k != key)
            {
                return;
            }
            // try_set: the owning page may have been unmounted since.
            let _ = signal.try_set(read_value(key, fallback.clone()));
        }) as Box<dyn Fn(web_sys::Event)>);

        if let Some(window) = dom::window() {
            let _ = window
                .add_event_listener_with_callback("storage", handler.as_ref().unchecked_ref());
            let _ = window.add_event_listener_with_callback(
                SESSION_STORAGE_EVENT,
                handler.as_ref().unchecked_ref(),
            );
        }

        // Pages mount this hook on every visit, so the listeners come off
        // with the component instead of accumulating for the tab session.
        // SendWrapper carries the non-Send Closure into the cleanup, which
        // runs on the same (only) thread.
        let handler = SendWrapper::new(handler);
        on_cleanup(move || {
            let handler = handler.take();
            if let Some(window) = dom::window() {
                let _ = window.remove_event_listener_with_callback(
                    "storage",
                    handler.as_ref().unchecked_ref(),
                );
                let _ = window.remove_event_listener_with_callback(
                    SESSION_STORAGE_EVENT,
                    handler.as_ref().unchecked_ref(),
                );
            }
        });
    }

    SessionValue {
        value: signal.into(),
        signal,
        key,
        initial,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_missing_falls_back() {
        assert_eq!(decode_or::<String>(None, "f1".to_string()), "f1");
    }

    #[test]
    fn test_decode_malformed_falls_back() {
        // Raw (unquoted) text is not valid JSON for a string value.
        assert_eq!(
            decode_or::<String>(Some("not-json"), String::new()),
            ""
        );
        assert_eq!(decode_or::<u32>(Some("{\"broken\":"), 7), 7);
    }

    #[test]
    fn test_encode_decode_round_trip() {
        let encoded = encode(&"f1".to_string()).expect("string encodes");
        assert_eq!(encoded, "\"f1\"");
        assert_eq!(
            decode_or::<String>(Some(&encoded), String::new()),
            "f1"
        );
    }

    #[test]
    fn test_set_without_storage_leaves_value_unchanged() {
        let owner = Owner::new();
        owner.set();

        let signal = RwSignal::new("f1".to_string());
        let selection = SessionValue {
            value: signal.into(),
            signal,
            key: "currentFestivalId",
            initial: String::new(),
        };

        // No sessionStorage off the browser, so the write must not happen
        // and the mirror must not move.
        selection.set("f2".to_string());
        assert_eq!(selection.get_untracked(), "f1");
    }

    #[test]
    fn test_sequential_updates_compose_through_storage() {
        // Simulates update() semantics: each write re-reads the persisted
        // payload instead of trusting an in-memory snapshot.
        let mut stored = encode(&1u32);
        for _ in 0..2 {
            let current = decode_or::<u32>(stored.as_deref(), 0);
            stored = encode(&(current + 1));
        }
        assert_eq!(decode_or::<u32>(stored.as_deref(), 0), 3);
    }
}
