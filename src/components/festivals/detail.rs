//! Festival detail page with a collapsible edit form and delete action.

use leptos::prelude::*;
use leptos_icons::Icon;

use crate::api::festivals::{self, use_festival};
use crate::app::AppContext;
use crate::components::icons as ic;
use crate::models::{AppRoute, FestivalPayload};
use crate::utils::dom;

stylance::import_crate_style!(css, "src/components/festivals/detail.module.css");

#[component]
pub fn FestivalDetailPage(id: String) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let toasts = ctx.toasts;

    let festival_id = id.clone();
    let state = use_festival(Signal::derive(move || Some(festival_id.clone())));
    let data = state.data;
    let error = state.error;
    let is_loading = state.is_loading;

    let form_open = RwSignal::new(false);
    let chevron = Signal::derive(move || {
        if form_open.get() {
            ic::CHEVRON_UP
        } else {
            ic::CHEVRON_DOWN
        }
    });

    let name_ref = NodeRef::<leptos::html::Input>::new();
    let description_ref = NodeRef::<leptos::html::Textarea>::new();

    view! {
        <div class=css::page>
            <h1 class=css::heading>"Event"</h1>

            <Show when=move || is_loading.get()>
                <p class=css::notice>"Loading..."</p>
            </Show>
            {move || {
                error
                    .get()
                    .map(|err| {
                        view! { <p class=css::error>{format!("Failed to load event: {err}")}</p> }
                    })
            }}

            {move || {
                data.get()
                    .map(|festival| {
                        let save_id = festival.id.clone();
                        let save_state = state.clone();
                        let on_submit = move |ev: leptos::ev::SubmitEvent| {
                            ev.prevent_default();
                            let name = name_ref
                                .get_untracked()
                                .map(|el| el.value())
                                .unwrap_or_default();
                            let description = description_ref
                                .get_untracked()
                                .map(|el| el.value())
                                .unwrap_or_default();
                            let id = save_id.clone();
                            let state = save_state.clone();
                            leptos::task::spawn_local(async move {
                                let payload = FestivalPayload { name, description };
                                match festivals::update_festival(&id, &payload).await {
                                    Ok(()) => {
                                        let _ = state.mutate().await;
                                        toasts.success("Event updated");
                                    }
                                    Err(err) => {
                                        toasts.error(format!("Failed to update event: {err}"))
                                    }
                                }
                            });
                        };

                        let delete_id = festival.id.clone();
                        let on_delete = move |_| {
                            if !dom::confirm("Delete this event?") {
                                return;
                            }
                            let id = delete_id.clone();
                            leptos::task::spawn_local(async move {
                                match festivals::delete_festival(&id).await {
                                    Ok(()) => {
                                        toasts.success("Event deleted");
                                        AppRoute::Festivals.push();
                                    }
                                    Err(err) => {
                                        toasts.error(format!("Failed to delete event: {err}"))
                                    }
                                }
                            });
                        };

                        view! {
                            <div>
                                <h2 class=css::name>{festival.name.clone()}</h2>
                                <p class=css::description>{festival.description.clone()}</p>

                                <div class=css::divider></div>
                                <button
                                    class=css::accordion
                                    on:click=move |_| form_open.update(|open| *open = !*open)
                                >
                                    "Edit"
                                    <Icon icon=chevron />
                                </button>

                                <div class=move || {
                                    if form_open.get() {
                                        String::new()
                                    } else {
                                        css::hidden.to_string()
                                    }
                                }>
                                    <form class=css::form on:submit=on_submit>
                                        <label class=css::label for="name">
                                            "Name"
                                        </label>
                                        <input
                                            class=css::input
                                            type="text"
                                            name="name"
                                            placeholder="Event name"
                                            required
                                            value=festival.name
                                            node_ref=name_ref
                                        />
                                        <label class=css::label for="description">
                                            "Description"
                                        </label>
                                        <textarea
                                            class=css::textarea
                                            name="description"
                                            placeholder="Event description"
                                            node_ref=description_ref
                                        >
                                            {festival.description}
                                        </textarea>
                                        <button type="submit" class=css::submit>
                                            "Save"
                                        </button>
                                    </form>
                                    <button class=css::danger on:click=on_delete>
                                        "Delete"
                                    </button>
                                </div>
                            </div>
                        }
                    })
            }}
        </div>
    }
}
