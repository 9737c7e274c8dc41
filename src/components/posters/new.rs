//! Poster registration form with a local image preview.

use leptos::html;
use leptos::prelude::*;

use crate::api::festivals::use_festival_list;
use crate::api::posters;
use crate::app::AppContext;
use crate::config::CURRENT_FESTIVAL_KEY;
use crate::models::{AppRoute, Festival};
use crate::storage::use_session_value;
use crate::utils::dom;

stylance::import_crate_style!(css, "src/components/posters/new.module.css");

#[component]
pub fn NewPosterPage() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let toasts = ctx.toasts;

    let selection = use_session_value(CURRENT_FESTIVAL_KEY, String::new());
    let selected_id = selection.value;

    let festivals = use_festival_list();
    let festival_options = festivals.data;

    let name_ref: NodeRef<html::Input> = NodeRef::new();
    let description_ref: NodeRef<html::Textarea> = NodeRef::new();
    let file_ref: NodeRef<html::Input> = NodeRef::new();

    let preview_url = RwSignal::new(None::<String>);
    let submitting = RwSignal::new(false);

    // Object URLs hold the picked file alive until revoked, so each new
    // pick releases the previous one and unmount releases the last.
    let on_file_change = move |_| {
        let picked = file_ref
            .get()
            .and_then(|input| input.files())
            .and_then(|files| files.get(0));
        let next = picked.as_ref().and_then(dom::create_object_url);
        if let Some(old) = preview_url.get_untracked() {
            dom::revoke_object_url(&old);
        }
        preview_url.set(next);
    };
    on_cleanup(move || {
        if let Some(url) = preview_url.try_get_untracked().flatten() {
            dom::revoke_object_url(&url);
        }
    });

    let on_select = move |ev: leptos::ev::Event| {
        selection.set(event_target_value(&ev));
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }
        let festival_id = selected_id.get_untracked();
        if festival_id.is_empty() {
            toasts.error("Select an event before registering a poster");
            return;
        }
        let name = name_ref.get().map(|n| n.value()).unwrap_or_default();
        if name.trim().is_empty() {
            toasts.error("Poster name is required");
            return;
        }
        let Some(file) = file_ref
            .get()
            .and_then(|input| input.files())
            .and_then(|files| files.get(0))
        else {
            toasts.error("Pick an image for the poster");
            return;
        };
        let description = description_ref.get().map(|d| d.value()).unwrap_or_default();

        submitting.set(true);
        leptos::task::spawn_local(async move {
            match posters::create_poster(&name, &description, &file, &festival_id).await {
                Ok(()) => {
                    toasts.success("Poster registered");
                    AppRoute::Posters.push();
                }
                Err(err) => toasts.error(format!("Failed to register poster: {err}")),
            }
            submitting.try_set(false);
        });
    };

    view! {
        <div class=css::page>
            <h1 class=css::heading>"Register a poster"</h1>

            <form class=css::form on:submit=on_submit>
                <label class=css::label>
                    "Event"
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
                </label>

                <label class=css::label>
                    "Name"
                    <input class=css::input type="text" node_ref=name_ref />
                </label>

                <label class=css::label>
                    "Location"
                    <textarea class=css::textarea node_ref=description_ref></textarea>
                </label>

                <label class=css::label>
                    "Image"
                    <input
                        class=css::fileInput
                        type="file"
                        accept="image/*"
                        node_ref=file_ref
                        on:change=on_file_change
                    />
                </label>

                {move || {
                    preview_url
                        .get()
                        .map(|url| {
                            view! { <img class=css::preview src=url alt="Poster preview" /> }
                        })
                }}

                <button class=css::submit type="submit" disabled=move || submitting.get()>
                    {move || if submitting.get() { "Registering..." } else { "Register" }}
                </button>
            </form>
        </div>
    }
}
