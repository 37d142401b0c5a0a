use crate::shared::icons::icon;
use leptos::prelude::*;

/// First/prev/next/last buttons plus "page / pages (count)".
#[component]
pub fn PaginationControls(
    /// 0-indexed.
    #[prop(into)]
    current_page: Signal<usize>,
    #[prop(into)] total_pages: Signal<usize>,
    #[prop(into)] total_count: Signal<usize>,
    on_page_change: Callback<usize>,
    /// Page size selector is shown only when both are given.
    #[prop(optional, into)]
    page_size: Option<Signal<usize>>,
    #[prop(optional)] on_page_size_change: Option<Callback<usize>>,
    #[prop(optional)] page_size_options: Option<Vec<usize>>,
) -> impl IntoView {
    let at_start = move || current_page.get() == 0;
    let at_end = move || current_page.get() + 1 >= total_pages.get();

    let size_selector = page_size.zip(on_page_size_change).map(|(size, on_change)| {
        let options = page_size_options.unwrap_or_else(|| vec![10, 25, 50]);
        view! {
            <select
                class="page-size-select"
                prop:value=move || size.get().to_string()
                on:change=move |ev| {
                    if let Ok(val) = event_target_value(&ev).parse::<usize>() {
                        on_change.run(val);
                    }
                }
            >
                {options.into_iter().map(|opt| view! {
                    <option value=opt.to_string() selected=move || size.get() == opt>
                        {opt.to_string()}
                    </option>
                }).collect_view()}
            </select>
        }
    });

    view! {
        <div class="pagination-controls">
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(0)
                disabled=at_start
                title="Halaman pertama"
            >
                {icon("chevrons-left")}
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| {
                    let page = current_page.get();
                    if page > 0 {
                        on_page_change.run(page - 1);
                    }
                }
                disabled=at_start
                title="Sebelumnya"
            >
                {icon("chevron-left")}
            </button>
            <span class="pagination-info">
                {move || format!(
                    "{} / {} ({})",
                    current_page.get() + 1,
                    total_pages.get().max(1),
                    total_count.get()
                )}
            </span>
            <button
                class="pagination-btn"
                on:click=move |_| {
                    let page = current_page.get();
                    if page + 1 < total_pages.get() {
                        on_page_change.run(page + 1);
                    }
                }
                disabled=at_end
                title="Berikutnya"
            >
                {icon("chevron-right")}
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| {
                    let total = total_pages.get();
                    if total > 0 {
                        on_page_change.run(total - 1);
                    }
                }
                disabled=at_end
                title="Halaman terakhir"
            >
                {icon("chevrons-right")}
            </button>
            {size_selector}
        </div>
    }
}
