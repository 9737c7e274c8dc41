//! Root application module.
//!
//! Defines the global [`AppContext`] and the `App` component that provides
//! it, wraps the tree in an error boundary, and mounts the router.

use leptos::prelude::*;

use crate::cache::ResourceCache;
use crate::components::AppRouter;
use crate::components::toast::Toasts;

// ============================================================================
// AppContext
// ============================================================================

/// Application-wide reactive context.
///
/// Provided at the root of the component tree and accessed from any child
/// component with `use_context::<AppContext>()`. The cache is shared state,
/// not an ambient singleton, so tests can build their own instance.
#[derive(Clone)]
pub struct AppContext {
    /// Shared remote-resource cache backing all read hooks.
    pub cache: ResourceCache,

    /// Transient toast notifications.
    pub toasts: Toasts,
}

impl AppContext {
    pub fn new() -> Self {
        Self {
            cache: ResourceCache::default(),
            toasts: Toasts::new(),
        }
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Root application component with error boundary.
#[component]
pub fn App() -> impl IntoView {
    let ctx = AppContext::new();
    provide_context(ctx);

    view! {
        <ErrorBoundary fallback=|errors| {
            view! {
                <div style="
                    display: flex;
                    flex-direction: column;
                    align-items: center;
                    justify-content: center;
                    height: 100vh;
                    padding: 2rem;
                    background: #161616;
                    color: #e0e0e0;
                ">
                    <div style="max-width: 600px; text-align: center;">
                        <h1 style="color: #e05555; margin-bottom: 1rem;">
                            "Something went wrong"
                        </h1>
                        <p style="color: #a0a0a0; margin-bottom: 2rem;">
                            "An unexpected error occurred. Please try reloading the page."
                        </p>
                        <details style="
                            text-align: left;
                            background: #1e1e1e;
                            padding: 1rem;
                            border-radius: 4px;
                            margin-bottom: 1rem;
                        ">
                            <summary style="cursor: pointer; color: #6c7a89;">
                                "Error details"
                            </summary>
                            <ul style="
                                margin: 1rem 0 0 0;
                                padding-left: 1.5rem;
                                color: #e05555;
                                font-size: 0.9rem;
                            ">
                                {move || {
                                    errors
                                        .get()
                                        .into_iter()
                                        .map(|(_, e)| view! { <li>{e.to_string()}</li> })
                                        .collect::<Vec<_>>()
                                }}
                            </ul>
                        </details>
                        <button
                            on:click=move |_| {
                                if let Some(window) = web_sys::window() {
                                    let _ = window.location().reload();
                                }
                            }
                            style="
                                background: #2d6cdf;
                                color: white;
                                border: none;
                                padding: 0.75rem 2rem;
                                border-radius: 4px;
                                cursor: pointer;
                                font-size: 1rem;
                            "
                        >
                            "Reload Page"
                        </button>
                    </div>
                </div>
            }
        }>
            <AppRouter />
        </ErrorBoundary>
    }
}
