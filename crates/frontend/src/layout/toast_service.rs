use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;
use uuid::Uuid;

const TOAST_TTL_MS: u32 = 4000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: Uuid,
    pub kind: ToastKind,
    pub text: String,
}

/// Short-lived notifications in the corner of the shell.
#[derive(Clone, Copy)]
pub struct ToastService {
    toasts: RwSignal<Vec<Toast>>,
}

impl ToastService {
    pub fn new() -> Self {
        Self {
            toasts: RwSignal::new(Vec::new()),
        }
    }

    pub fn success(&self, text: impl Into<String>) {
        self.push(ToastKind::Success, text.into());
    }

    pub fn error(&self, text: impl Into<String>) {
        self.push(ToastKind::Error, text.into());
    }

    pub fn info(&self, text: impl Into<String>) {
        self.push(ToastKind::Info, text.into());
    }

    fn push(&self, kind: ToastKind, text: String) {
        let id = Uuid::new_v4();
        self.toasts.update(|list| list.push(Toast { id, kind, text }));
        let this = *self;
        spawn_local(async move {
            TimeoutFuture::new(TOAST_TTL_MS).await;
            this.dismiss(id);
        });
    }

    pub fn dismiss(&self, id: Uuid) {
        // The shell may be gone by the time a timer fires.
        let _ = self.toasts.try_update(|list| list.retain(|t| t.id != id));
    }
}

impl Default for ToastService {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_toast() -> ToastService {
    use_context::<ToastService>().expect("ToastService not provided")
}

#[component]
pub fn ToastHost() -> impl IntoView {
    let service = use_toast();

    view! {
        <div class="toast-host">
            <For
                each=move || service.toasts.get()
                key=|t| t.id
                children=move |toast: Toast| {
                    let intent = match toast.kind {
                        ToastKind::Success => MessageBarIntent::Success,
                        ToastKind::Error => MessageBarIntent::Error,
                        ToastKind::Info => MessageBarIntent::Info,
                    };
                    let id = toast.id;
                    view! {
                        <div class="toast" on:click=move |_| service.dismiss(id)>
                            <MessageBar intent=intent>
                                <span>{toast.text}</span>
                            </MessageBar>
                        </div>
                    }
                }
            />
        </div>
    }
}
