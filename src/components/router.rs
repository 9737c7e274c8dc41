//! Application router component.
//!
//! Handles URL-based routing with hash history. Uses native hashchange
//! events, so browser back/forward buttons and plain `<a href="#/...">`
//! links work without a router dependency.

use leptos::prelude::*;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::Closure;

use crate::components::festivals::{FestivalDetailPage, FestivalListPage};
use crate::components::posters::{NewPosterPage, PosterDetailPage, PosterListPage};
use crate::components::sidebar::Sidebar;
use crate::components::toast::ToastStack;
use crate::models::AppRoute;

stylance::import_crate_style!(css, "src/components/router.module.css");

/// Main application router.
///
/// Route structure:
/// - `#/festivals` → festival list + create form
/// - `#/festivals/{id}` → festival detail/edit
/// - `#/posters` → poster list scoped by the selected festival
/// - `#/posters/new` → poster registration
/// - `#/posters/{id}` → poster detail/edit
#[component]
pub fn AppRouter() -> impl IntoView {
    // Route signal derived from the current URL hash.
    let route = RwSignal::new(AppRoute::current());

    // Set up hashchange event listener (runs once on mount).
    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::JsCast;
        let closure = Closure::wrap(Box::new(move || {
            route.set(AppRoute::current());
        }) as Box<dyn Fn()>);

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("hashchange", closure.as_ref().unchecked_ref());
        }

        // Keep the closure alive for the lifetime of the app.
        closure.forget();
    }

    view! {
        <div class=css::layout>
            <Sidebar route=route />
            <main class=css::content>
                {move || match route.get() {
                    AppRoute::Festivals => view! { <FestivalListPage /> }.into_any(),
                    AppRoute::FestivalDetail { id } => {
                        view! { <FestivalDetailPage id=id /> }.into_any()
                    }
                    AppRoute::Posters => view! { <PosterListPage /> }.into_any(),
                    AppRoute::PosterNew => view! { <NewPosterPage /> }.into_any(),
                    AppRoute::PosterDetail { id } => {
                        view! { <PosterDetailPage id=id /> }.into_any()
                    }
                }}
            </main>
            <ToastStack />
        </div>
    }
}
