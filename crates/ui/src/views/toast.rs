use std::time::Duration;

use dioxus::prelude::*;

const TOAST_LIFETIME: Duration = Duration::from_secs(4);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    fn class(self) -> &'static str {
        match self {
            ToastKind::Success => "toast toast--success",
            ToastKind::Error => "toast toast--error",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}

/// Transient notifications shared through context. Create inside a component.
#[derive(Clone, Copy, PartialEq)]
pub struct Toasts {
    items: Signal<Vec<Toast>>,
    next_id: Signal<u64>,
}

impl Toasts {
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: Signal::new(Vec::new()),
            next_id: Signal::new(0),
        }
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(ToastKind::Success, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(ToastKind::Error, message.into());
    }

    #[must_use]
    pub fn current(&self) -> Vec<Toast> {
        self.items.read().clone()
    }

    pub fn dismiss(&self, id: u64) {
        let mut items = self.items;
        items.write().retain(|toast| toast.id != id);
    }

    fn push(&self, kind: ToastKind, message: String) {
        let mut items = self.items;
        let mut next_id = self.next_id;
        let id = next_id();
        next_id.set(id + 1);
        items.write().push(Toast { id, kind, message });

        // Root scope, so the dismissal outlives the page that raised it.
        let toasts = *self;
        let _ = spawn_forever(async move {
            tokio::time::sleep(TOAST_LIFETIME).await;
            toasts.dismiss(id);
        });
    }
}

impl Default for Toasts {
    fn default() -> Self {
        Self::new()
    }
}

#[component]
pub fn ToastHost() -> Element {
    let toasts = use_context::<Toasts>();

    rsx! {
        div { class: "toasts", role: "status",
            for toast in toasts.current() {
                div { key: "{toast.id}", class: toast.kind.class(),
                    span { "{toast.message}" }
                    button {
                        class: "toast-close",
                        r#type: "button",
                        onclick: move |_| toasts.dismiss(toast.id),
                        "×"
                    }
                }
            }
        }
    }
}
