//! Poster detail page: image, editable fields, status control, deletion.
//!
//! The owning festival is a dependent query keyed off the loaded poster,
//! so it only fires once the poster itself has arrived.

use leptos::html;
use leptos::prelude::*;

use crate::api::festivals::use_festival;
use crate::api::posters::{self, use_poster};
use crate::app::AppContext;
use crate::components::posters::StatusPicker;
use crate::models::{AppRoute, PosterStatus};
use crate::utils::dom;

stylance::import_crate_style!(css, "src/components/posters/detail.module.css");

#[component]
pub fn PosterDetailPage(id: String) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let toasts = ctx.toasts;

    let poster_id = Signal::derive({
        let id = id.clone();
        move || Some(id.clone())
    });
    let state = use_poster(poster_id);
    let data = state.data;
    let error = state.error;
    let is_loading = state.is_loading;

    let festival_id = Signal::derive(move || data.get().map(|poster| poster.festival_id));
    let festival = use_festival(festival_id);
    let festival_name = Signal::derive(move || festival.data.get().map(|f| f.name));

    let editing = RwSignal::new(false);
    let name_ref: NodeRef<html::Input> = NodeRef::new();
    let description_ref: NodeRef<html::Textarea> = NodeRef::new();

    view! {
        <div class=css::page>
            <Show when=move || is_loading.get() && data.get().is_none()>
                <p class=css::notice>"Loading..."</p>
            </Show>
            {move || {
                error
                    .get()
                    .map(|err| {
                        view! { <p class=css::error>{format!("Failed to load poster: {err}")}</p> }
                    })
            }}
            {move || {
                data.get()
                    .map(|poster| {
                        let save_id = poster.id.clone();
                        let saved_name = poster.name.clone();
                        let saved_description = poster.description.clone();
                        let save_state = state.clone();
                        let on_save = move |ev: leptos::ev::SubmitEvent| {
                            ev.prevent_default();
                            let name = name_ref.get().map(|n| n.value()).unwrap_or_default();
                            let description = description_ref
                                .get()
                                .map(|d| d.value())
                                .unwrap_or_default();
                            if name.trim().is_empty() {
                                toasts.error("Poster name is required");
                                return;
                            }
                            // Nothing changed, skip the round trip.
                            if name == saved_name && description == saved_description {
                                editing.set(false);
                                return;
                            }
                            let id = save_id.clone();
                            let state = save_state.clone();
                            leptos::task::spawn_local(async move {
                                match posters::update_poster(&id, &name, &description).await {
                                    Ok(()) => {
                                        toasts.success("Poster updated");
                                        editing.try_set(false);
                                    }
                                    Err(err) => {
                                        toasts.error(format!("Failed to update poster: {err}"))
                                    }
                                }
                                let _ = state.mutate().await;
                            });
                        };

                        let status_id = poster.id.clone();
                        let status_state = state.clone();
                        let on_status = Callback::new(move |next: PosterStatus| {
                            let id = status_id.clone();
                            let state = status_state.clone();
                            leptos::task::spawn_local(async move {
                                match posters::set_poster_status(&id, next).await {
                                    Ok(()) => toasts.success("Poster status updated"),
                                    Err(err) => {
                                        toasts.error(format!("Failed to update status: {err}"))
                                    }
                                }
                                let _ = state.mutate().await;
                            });
                        });

                        let delete_id = poster.id.clone();
                        let delete_name = poster.name.clone();
                        let on_delete = move |_| {
                            let prompt = format!("Delete poster \"{delete_name}\"?");
                            if !dom::confirm(&prompt) {
                                return;
                            }
                            let id = delete_id.clone();
                            leptos::task::spawn_local(async move {
                                match posters::delete_poster(&id).await {
                                    Ok(()) => {
                                        toasts.success("Poster deleted");
                                        AppRoute::Posters.push();
                                    }
                                    Err(err) => {
                                        toasts.error(format!("Failed to delete poster: {err}"))
                                    }
                                }
                            });
                        };

                        let has_image = !poster.image_url.is_empty();
                        let image_url = poster.image_url.clone();
                        let image_alt = poster.name.clone();
                        view! {
                            <div class=css::layout>
                                <Show when=move || has_image>
                                    <img
                                        class=css::image
                                        src=image_url.clone()
                                        alt=image_alt.clone()
                                    />
                                </Show>
                                <div class=css::body>
                                    <h1 class=css::heading>{poster.name.clone()}</h1>
                                    <p class=css::meta>
                                        "Event: "
                                        {move || {
                                            festival_name.get().unwrap_or_else(|| "...".into())
                                        }}
                                    </p>
                                    <p class=css::description>{poster.description.clone()}</p>

                                    <div class=css::statusRow>
                                        <span class=css::statusLabel>"Status"</span>
                                        <StatusPicker status=poster.status on_change=on_status />
                                    </div>

                                    <div class=css::actions>
                                        <button
                                            class=css::edit
                                            on:click=move |_| editing.update(|open| *open = !*open)
                                        >
                                            {move || if editing.get() { "Cancel" } else { "Edit" }}
                                        </button>
                                        <button class=css::danger on:click=on_delete>
                                            "Delete"
                                        </button>
                                    </div>

                                    <form
                                        class=move || {
                                            if editing.get() {
                                                css::form.to_string()
                                            } else {
                                                format!("{} {}", css::form, css::hidden)
                                            }
                                        }
                                        on:submit=on_save
                                    >
                                        <label class=css::label>
                                            "Name"
                                            <input
                                                class=css::input
                                                type="text"
                                                value=poster.name.clone()
                                                node_ref=name_ref
                                            />
                                        </label>
                                        <label class=css::label>
                                            "Location"
                                            <textarea
                                                class=css::textarea
                                                node_ref=description_ref
                                                prop:value=poster.description.clone()
                                            ></textarea>
                                        </label>
                                        <button class=css::submit type="submit">
                                            "Save"
                                        </button>
                                    </form>
                                </div>
                            </div>
                        }
                    })
            }}
        </div>
    }
}
