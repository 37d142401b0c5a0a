//! Branch autocomplete: debounced search, newest request wins.

use contracts::domain::a002_branch::Branch;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::domain::a002_branch::api;
use crate::shared::config::config;
use crate::shared::debounce::Debouncer;
use crate::shared::icons::icon;
use crate::shared::request_seq::RequestSeq;

const MIN_TERM_LEN: usize = 2;
const MAX_SUGGESTIONS: usize = 8;

#[component]
pub fn BranchPicker(
    /// Chosen branch; `None` means "all branches".
    selected: RwSignal<Option<Branch>>,
    #[prop(optional, into)] placeholder: String,
) -> impl IntoView {
    let placeholder = if placeholder.is_empty() {
        "Cari cabang...".to_string()
    } else {
        placeholder
    };

    let term = RwSignal::new(String::new());
    let suggestions = RwSignal::new(Vec::<Branch>::new());
    let open = RwSignal::new(false);
    let searching = RwSignal::new(false);
    let failed = RwSignal::new(false);

    let debouncer = Debouncer::new(config().search_debounce_ms);
    let seq = RequestSeq::new();

    let run_search = move |value: String| {
        let ticket = seq.next();
        searching.set(true);
        spawn_local(async move {
            let result = api::search_branches(&value).await;
            if !seq.is_current(ticket) {
                return;
            }
            searching.set(false);
            match result {
                Ok(mut items) => {
                    items.truncate(MAX_SUGGESTIONS);
                    failed.set(false);
                    suggestions.set(items);
                }
                Err(e) if e.is_empty() => {
                    failed.set(false);
                    suggestions.set(Vec::new());
                }
                Err(e) => {
                    log::warn!("branch search failed: {}", e);
                    failed.set(true);
                    suggestions.set(Vec::new());
                }
            }
        });
    };

    let on_input = move |ev| {
        let value = event_target_value(&ev);
        term.set(value.clone());
        if value.trim().chars().count() < MIN_TERM_LEN {
            debouncer.cancel();
            seq.invalidate();
            searching.set(false);
            suggestions.set(Vec::new());
            return;
        }
        open.set(true);
        debouncer.call(move || run_search(value));
    };

    let choose = move |branch: Branch| {
        debouncer.cancel();
        seq.invalidate();
        term.set(branch.display_label());
        selected.set(Some(branch));
        suggestions.set(Vec::new());
        open.set(false);
    };

    let clear = move |_| {
        debouncer.cancel();
        seq.invalidate();
        term.set(String::new());
        selected.set(None);
        suggestions.set(Vec::new());
        open.set(false);
    };

    view! {
        <div class="branch-picker">
            <div class="search-input">
                <span class="search-input__icon">{icon("building")}</span>
                <input
                    type="text"
                    class="search-input__field"
                    class:search-input__field--active=move || selected.with(|s| s.is_some())
                    placeholder=placeholder
                    prop:value=move || term.get()
                    on:input=on_input
                    on:focus=move |_| open.set(true)
                    on:blur=move |_| open.set(false)
                />
                <Show when=move || !term.get().is_empty() || selected.with(|s| s.is_some())>
                    <button class="search-input__clear" on:click=clear title="Hapus">
                        {icon("x")}
                    </button>
                </Show>
            </div>
            <Show when=move || open.get() && (searching.get() || failed.get() || !suggestions.with(|s| s.is_empty()))>
                <ul class="branch-picker__list">
                    {move || {
                        if searching.get() {
                            return view! { <li class="branch-picker__hint">"Mencari..."</li> }.into_any();
                        }
                        if failed.get() {
                            return view! { <li class="branch-picker__hint">"Gagal memuat cabang"</li> }.into_any();
                        }
                        suggestions.get().into_iter().map(|branch| {
                            let label = branch.display_label();
                            let branch = StoredValue::new(branch);
                            view! {
                                // mousedown fires before the input's blur closes the list
                                <li
                                    class="branch-picker__item"
                                    on:mousedown=move |ev| {
                                        ev.prevent_default();
                                        choose(branch.get_value());
                                    }
                                >
                                    {label}
                                </li>
                            }
                        }).collect_view().into_any()
                    }}
                </ul>
            </Show>
        </div>
    }
}
