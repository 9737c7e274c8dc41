//! Transient notifications for mutating actions.
//!
//! Pages report create/update/delete outcomes here; the stack renders them
//! in a corner overlay and dismisses each toast after a timeout or on click.

use leptos::prelude::*;
use leptos_icons::Icon;

use crate::components::icons as ic;
use crate::config::TOAST_DISMISS_MS;

stylance::import_crate_style!(css, "src/components/toast.module.css");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub level: ToastLevel,
    pub message: String,
}

/// Toast state managed with Leptos signals.
///
/// `Copy` because all fields are signals.
#[derive(Clone, Copy)]
pub struct Toasts {
    entries: RwSignal<Vec<Toast>>,
    next_id: RwSignal<u64>,
}

impl Toasts {
    pub fn new() -> Self {
        Self {
            entries: RwSignal::new(Vec::new()),
            next_id: RwSignal::new(0),
        }
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(ToastLevel::Success, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(ToastLevel::Error, message.into());
    }

    fn push(&self, level: ToastLevel, message: String) {
        let id = self.next_id.get_untracked();
        self.next_id.set(id + 1);
        self.entries.update(|toasts| {
            toasts.push(Toast { id, level, message });
        });
    }

    pub fn dismiss(&self, id: u64) {
        self.entries.update(|toasts| toasts.retain(|t| t.id != id));
    }

    pub fn entries(&self) -> Signal<Vec<Toast>> {
        self.entries.into()
    }
}

impl Default for Toasts {
    fn default() -> Self {
        Self::new()
    }
}

/// Corner overlay rendering the active toasts.
#[component]
pub fn ToastStack() -> impl IntoView {
    let ctx = use_context::<crate::app::AppContext>().expect("AppContext must be provided");
    let toasts = ctx.toasts;

    view! {
        <div class=css::stack>
            <For
                each=move || toasts.entries().get()
                key=|toast| toast.id
                children=move |toast: Toast| {
                    let id = toast.id;
                    // Auto-dismiss; clicking the toast dismisses it early.
                    leptos::task::spawn_local(async move {
                        gloo_timers::future::TimeoutFuture::new(TOAST_DISMISS_MS).await;
                        toasts.dismiss(id);
                    });
                    let class = match toast.level {
                        ToastLevel::Success => format!("{} {}", css::toast, css::success),
                        ToastLevel::Error => format!("{} {}", css::toast, css::error),
                    };
                    view! {
                        <div class=class on:click=move |_| toasts.dismiss(id)>
                            <span>{toast.message.clone()}</span>
                            <Icon icon=ic::CLOSE />
                        </div>
                    }
                }
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_assigns_increasing_ids() {
        let owner = Owner::new();
        owner.set();

        let toasts = Toasts::new();
        toasts.success("created");
        toasts.error("failed");

        let entries = toasts.entries().get_untracked();
        assert_eq!(entries.len(), 2);
        assert!(entries[0].id < entries[1].id);
        assert_eq!(entries[0].level, ToastLevel::Success);
        assert_eq!(entries[1].level, ToastLevel::Error);
    }

    #[test]
    fn test_dismiss_removes_only_target() {
        let owner = Owner::new();
        owner.set();

        let toasts = Toasts::new();
        toasts.success("one");
        toasts.success("two");

        let first_id = toasts.entries().get_untracked()[0].id;
        toasts.dismiss(first_id);

        let entries = toasts.entries().get_untracked();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].message, "two");
    }
}
