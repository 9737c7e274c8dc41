//! Festival list page with a collapsible create form.

use leptos::prelude::*;
use leptos_icons::Icon;

use crate::api::festivals::{self, use_festival_list};
use crate::app::AppContext;
use crate::components::icons as ic;
use crate::models::{AppRoute, Festival, FestivalPayload};

stylance::import_crate_style!(css, "src/components/festivals/list.module.css");

#[component]
pub fn FestivalListPage() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let toasts = ctx.toasts;

    let list = use_festival_list();
    let data = list.data;
    let error = list.error;
    let is_loading = list.is_loading;

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

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let Some(name_input) = name_ref.get_untracked() else {
            return;
        };
        let name = name_input.value();
        let description = description_ref
            .get_untracked()
            .map(|el| el.value())
            .unwrap_or_default();
        let state = list.clone();
        leptos::task::spawn_local(async move {
            let payload = FestivalPayload { name, description };
            match festivals::create_festival(&payload).await {
                Ok(()) => {
                    // Refresh before collapsing so the new row is visible.
                    let _ = state.mutate().await;
                    toasts.success("Event created");
                    form_open.set(false);
                    if let Some(el) = name_ref.get_untracked() {
                        el.set_value("");
                    }
                    if let Some(el) = description_ref.get_untracked() {
                        el.set_value("");
                    }
                }
                Err(err) => toasts.error(format!("Failed to create event: {err}")),
            }
        });
    };

    view! {
        <div class=css::page>
            <h1 class=css::heading>"Event Management"</h1>

            <Show when=move || is_loading.get()>
                <p class=css::notice>"Loading..."</p>
            </Show>
            {move || {
                error
                    .get()
                    .map(|err| {
                        view! { <p class=css::error>{format!("Failed to load events: {err}")}</p> }
                    })
            }}

            <table class=css::table>
                <thead>
                    <tr>
                        <th class=css::header>"Name"</th>
                        <th class=css::header>"Description"</th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || data.get().unwrap_or_default()
                        key=|festival| festival.id.clone()
                        children=move |festival: Festival| {
                            let id = festival.id.clone();
                            view! {
                                <tr
                                    class=css::row
                                    on:click=move |_| {
                                        AppRoute::FestivalDetail {
                                                id: id.clone(),
                                            }
                                            .push();
                                    }
                                >
                                    <td class=css::cell>{festival.name}</td>
                                    <td class=css::cell>{festival.description}</td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>

            <div class=css::divider></div>
            <button
                class=css::accordion
                on:click=move |_| form_open.update(|open| *open = !*open)
            >
                "Create a new event"
                <Icon icon=chevron />
            </button>

            <form
                class=move || {
                    if form_open.get() {
                        css::form.to_string()
                    } else {
                        format!("{} {}", css::form, css::hidden)
                    }
                }
                on:submit=on_submit
            >
                <label class=css::label for="name">
                    "Name"
                </label>
                <input
                    class=css::input
                    type="text"
                    name="name"
                    placeholder="Event name"
                    required
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
                ></textarea>
                <button type="submit" class=css::submit>
                    "Create"
                </button>
            </form>
        </div>
    }
}
