use leptos::prelude::*;

use crate::domain::format::{month_label, pad2};

/// The picked `(year, month)`, or `None` once the owning section is gone.
///
/// Reloads can be kicked off after an await, when the section may already
/// have been unmounted.
pub fn picked_period(year: RwSignal<i32>, month: RwSignal<u32>) -> Option<(i32, u32)> {
    Some((year.try_get_untracked()?, month.try_get_untracked()?))
}

/// Month select plus year input.
#[component]
pub fn MonthPicker(year: RwSignal<i32>, month: RwSignal<u32>) -> impl IntoView {
    view! {
        <select
            class="select"
            on:change=move |ev| {
                if let Ok(m) = event_target_value(&ev).parse::<u32>() {
                    month.set(m);
                }
            }
        >
            {(1..=12u32)
                .map(|m| {
                    view! {
                        <option value=m.to_string() selected=move || month.get() == m>
                            {format!("{} · {}", pad2(m), month_label(m))}
                        </option>
                    }
                })
                .collect_view()}
        </select>
        <input
            class="input-year"
            type="number"
            min="2000"
            max="2100"
            prop:value=move || year.get().to_string()
            on:change=move |ev| {
                if let Ok(y) = event_target_value(&ev).parse::<i32>() {
                    year.set(y);
                }
            }
        />
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_picked_period_reads_both_signals() {
        let owner = Owner::new();
        owner.with(|| {
            let year = RwSignal::new(2024);
            let month = RwSignal::new(6u32);
            assert_eq!(picked_period(year, month), Some((2024, 6)));
            month.set(7);
            assert_eq!(picked_period(year, month), Some((2024, 7)));
        });
    }

    #[test]
    fn test_picked_period_after_section_disposed() {
        let owner = Owner::new();
        let (year, month) = owner.with(|| (RwSignal::new(2024), RwSignal::new(6u32)));
        owner.cleanup();
        assert_eq!(picked_period(year, month), None);
    }
}
