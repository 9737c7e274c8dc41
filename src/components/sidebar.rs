//! Navigation sidebar.
//!
//! Fixed left rail with links to the two sections (events, posters).
//! The active section is derived from the current route.

use leptos::prelude::*;

use crate::config::APP_NAME;
use crate::models::AppRoute;

stylance::import_crate_style!(css, "src/components/sidebar.module.css");

#[component]
pub fn Sidebar(#[prop(into)] route: Signal<AppRoute>) -> impl IntoView {
    let link_class = move |section: AppRoute| {
        if route.get().same_section(&section) {
            format!("{} {}", css::link, css::active)
        } else {
            css::link.to_string()
        }
    };

    view! {
        <aside class=css::sidebar>
            <h2 class=css::title>{APP_NAME}</h2>
            <nav class=css::nav aria-label="Sections">
                <a
                    href=AppRoute::Festivals.to_hash()
                    class=move || link_class(AppRoute::Festivals)
                >
                    "Events"
                </a>
                <a href=AppRoute::Posters.to_hash() class=move || link_class(AppRoute::Posters)>
                    "Posters"
                </a>
            </nav>
        </aside>
    }
}
