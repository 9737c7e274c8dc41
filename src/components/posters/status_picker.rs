//! Collection status picker.

use leptos::prelude::*;

use crate::models::PosterStatus;

stylance::import_crate_style!(css, "src/components/posters/status_picker.module.css");

/// `<select>` over the three collection states.
///
/// `on_change` fires with the parsed status; unparseable values (which the
/// browser should never produce) are ignored.
#[component]
pub fn StatusPicker(status: PosterStatus, on_change: Callback<PosterStatus>) -> impl IntoView {
    view! {
        <select
            class=css::picker
            on:change=move |ev| {
                if let Some(next) = PosterStatus::parse(&event_target_value(&ev)) {
                    on_change.run(next);
                }
            }
        >
            {PosterStatus::ALL
                .into_iter()
                .map(|option| {
                    view! {
                        <option value=option.as_str() selected=option == status>
                            {option.label()}
                        </option>
                    }
                })
                .collect_view()}
        </select>
    }
}
