//! List helpers: client-side sorting and the debounced search box.

use leptos::prelude::*;
use std::cmp::Ordering;

use super::config::config;
use super::debounce::Debouncer;
use super::icons::icon;

pub trait Sortable {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering;
}

pub fn sort_list<T: Sortable>(items: &mut [T], field: &str, ascending: bool) {
    items.sort_by(|a, b| {
        let cmp = a.compare_by_field(b, field);
        if ascending {
            cmp
        } else {
            cmp.reverse()
        }
    });
}

pub fn get_sort_indicator(current_field: &str, field: &str, ascending: bool) -> &'static str {
    if current_field == field {
        if ascending {
            " ▲"
        } else {
            " ▼"
        }
    } else {
        " ⇅"
    }
}

/// Text input that reports its value after the user stops typing.
/// Clearing is reported at once and cancels any pending report.
#[component]
pub fn SearchInput(
    #[prop(into)] on_change: Callback<String>,
    #[prop(optional, into)] placeholder: String,
    #[prop(optional)] delay_ms: Option<u32>,
) -> impl IntoView {
    let placeholder = if placeholder.is_empty() {
        "Cari...".to_string()
    } else {
        placeholder
    };
    let debouncer = Debouncer::new(delay_ms.unwrap_or(config().search_debounce_ms));
    let input_value = RwSignal::new(String::new());

    let on_input = move |ev| {
        let value = event_target_value(&ev);
        input_value.set(value.clone());
        debouncer.call(move || on_change.run(value));
    };

    let clear = move |_| {
        debouncer.cancel();
        input_value.set(String::new());
        on_change.run(String::new());
    };

    view! {
        <div class="search-input">
            <span class="search-input__icon">{icon("search")}</span>
            <input
                type="text"
                class="search-input__field"
                class:search-input__field--active=move || !input_value.get().trim().is_empty()
                placeholder=placeholder
                prop:value=move || input_value.get()
                on:input=on_input
            />
            <Show when=move || !input_value.get().is_empty()>
                <button class="search-input__clear" on:click=clear title="Hapus">
                    {icon("x")}
                </button>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Row(&'static str, u32);

    impl Sortable for Row {
        fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
            match field {
                "name" => self.0.cmp(other.0),
                "count" => self.1.cmp(&other.1),
                _ => Ordering::Equal,
            }
        }
    }

    #[test]
    fn test_sort_both_directions() {
        let mut rows = vec![Row("b", 1), Row("a", 3), Row("c", 2)];
        sort_list(&mut rows, "count", false);
        assert_eq!(rows[0], Row("a", 3));
        sort_list(&mut rows, "name", true);
        assert_eq!(rows[2], Row("c", 2));
    }

    #[test]
    fn test_indicator() {
        assert_eq!(get_sort_indicator("name", "name", true), " ▲");
        assert_eq!(get_sort_indicator("name", "count", true), " ⇅");
    }
}
