//! Poster list page, scoped by the persisted festival selection.
//!
//! The selected festival lives in the session store so it survives
//! navigation and reloads within the tab; while nothing is selected the
//! poster query key is `None` and no request is made.

use leptos::prelude::*;

use crate::api::festivals::use_festival_list;
use crate::api::posters::{self, use_poster_list};
use crate::app::AppContext;
use crate::components::posters::StatusPicker;
use crate::config::CURRENT_FESTIVAL_KEY;
use crate::models::{AppRoute, Festival, Poster, PosterStatus};
use crate::storage::use_session_value;

stylance::import_crate_style!(css, "src/components/posters/list.module.css");

#[component]
pub fn PosterListPage() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let toasts = ctx.toasts;

    let selection = use_session_value(CURRENT_FESTIVAL_KEY, String::new());
    let selected_id = selection.value;

    let festivals = use_festival_list();
    let festival_options = festivals.data;

    let list = use_poster_list(selected_id);
    let data = list.data;
    let error = list.error;
    let is_loading = list.is_loading;

    let on_select = move |ev: leptos::ev::Event| {
        selection.set(event_target_value(&ev));
    };

    let table_class = move || {
        if selected_id.get().is_empty() {
            format!("{} {}", css::table, css::hidden)
        } else {
            css::table.to_string()
        }
    };

    view! {
        <div class=css::page>
            <h1 class=css::heading>"Posters"</h1>

            <div class=css::toolbar>
                <select class=css::select on:change=on_select>
                    <option value="" selected=move || selected_id.get().is_empty()>
                        "Select an event"
                    </option>
                    <For
                        each=move || festival_options.get().unwrap_or_default()
                        key=|festival| festival.id.clone()
                        children=move |festival: Festival| {
                            let id = festival.id.clone();
                            view! {
                                <option
                                    value=festival.id
                                    selected=move || selected_id.get() == id
                                >
                                    {festival.name}
                                </option>
                            }
                        }
                    />
                </select>
                <a class=css::newLink href=AppRoute::PosterNew.to_hash()>
                    "Register a poster"
                </a>
            </div>

            <Show when=move || selected_id.get().is_empty()>
                <p class=css::notice>"Select an event to list its posters."</p>
            </Show>
            <Show when=move || is_loading.get()>
                <p class=css::notice>"Loading..."</p>
            </Show>
            {move || {
                error
                    .get()
                    .map(|err| {
                        view! { <p class=css::error>{format!("Failed to load posters: {err}")}</p> }
                    })
            }}

            <table class=table_class>
                <thead>
                    <tr>
                        <th class=css::header>"Name"</th>
                        <th class=css::header>"Location"</th>
                        <th class=css::header>"Status"</th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || data.get().unwrap_or_default()
                        // Status is part of the key so a PATCH-then-mutate
                        // refresh rebuilds the affected row.
                        key=|poster| (poster.id.clone(), poster.status)
                        children=move |poster: Poster| {
                            let status_id = poster.id.clone();
                            let status_state = list.clone();
                            let on_status = Callback::new(move |next: PosterStatus| {
                                let id = status_id.clone();
                                let state = status_state.clone();
                                leptos::task::spawn_local(async move {
                                    match posters::set_poster_status(&id, next).await {
                                        Ok(()) => toasts.success("Poster status updated"),
                                        Err(err) => {
                                            toasts
                                                .error(format!("Failed to update status: {err}"))
                                        }
                                    }
                                    let _ = state.mutate().await;
                                });
                            });
                            view! {
                                <tr class=css::row>
                                    <td class=css::cell>
                                        <a
                                            class=css::posterLink
                                            href=AppRoute::PosterDetail {
                                                    id: poster.id,
                                                }
                                                .to_hash()
                                        >
                                            {poster.name}
                                        </a>
                                    </td>
                                    <td class=css::cell>{poster.description}</td>
                                    <td class=css::cell>
                                        <StatusPicker status=poster.status on_change=on_status />
                                    </td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>
        </div>
    }
}
