//! DOM and Web API utility functions.
//!
//! Provides safe, consistent access to browser APIs with proper error handling.

use web_sys::{Storage, Window};

/// Get the browser window object.
///
/// Off the browser (native unit tests) there is no window, so every caller
/// takes its storage-unavailable path.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn window() -> Option<Window> {
    web_sys::window()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn window() -> Option<Window> {
    None
}

/// Get sessionStorage.
///
/// Returns `None` when no window exists or the browser denies storage
/// access, so callers degrade to their defaults instead of panicking.
#[inline]
pub fn session_storage() -> Option<Storage> {
    window()?.session_storage().ok()?
}

/// Show a native confirm dialog. Returns `false` when no window exists.
pub fn confirm(message: &str) -> bool {
    window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

/// Dispatch a named event on the window.
///
/// Used by the selection store to notify sibling components of a write.
pub fn dispatch_window_event(name: &str) {
    if let Some(window) = window()
        && let Ok(event) = web_sys::Event::new(name)
    {
        let _ = window.dispatch_event(&event);
    }
}

/// Create an object URL for a file picked in a form, for image previews.
pub fn create_object_url(file: &web_sys::File) -> Option<String> {
    web_sys::Url::create_object_url_with_blob(file).ok()
}

/// Release an object URL created with [`create_object_url`].
pub fn revoke_object_url(url: &str) {
    let _ = web_sys::Url::revoke_object_url(url);
}
