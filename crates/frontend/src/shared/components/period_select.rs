use contracts::enums::Period;
use leptos::prelude::*;
use thaw::*;

/// Quarter selector bound to a `Period` signal.
#[component]
pub fn PeriodSelect(period: RwSignal<Period>) -> impl IntoView {
    let select_value = RwSignal::new(period.get_untracked().id().to_string());

    Effect::new(move |_| {
        let raw = select_value.get();
        let next = raw.parse::<u8>().ok().and_then(Period::from_id);
        if let Some(next) = next {
            if period.get_untracked() != next {
                period.set(next);
            }
        }
    });

    view! {
        <div class="period-select">
            <Label>"Periode"</Label>
            <Select value=select_value>
                {Period::all().into_iter().map(|p| view! {
                    <option value=p.id().to_string()>{p.label()}</option>
                }).collect_view()}
            </Select>
        </div>
    }
}
