//! Delete Confirm Button Component
//!
//! Reusable inline delete confirmation button with confirm/cancel actions.

use leptos::prelude::*;

/// Inline delete confirmation button
///
/// Shows the delete button initially. When clicked, shows the question with ✓/✗ buttons.
///
/// # Arguments
/// * `question` - Confirmation text, e.g. "¿Eliminar a Ana?"
/// * `on_confirm` - Callback to execute when user confirms deletion
/// * `disabled` - Greys out the initial button while a request is running
#[component]
pub fn DeleteConfirmButton(
    #[prop(into)] question: String,
    #[prop(into)] on_confirm: Callback<()>,
    #[prop(optional, into)] label: Option<String>,
    #[prop(optional, into)] disabled: Signal<bool>,
) -> impl IntoView {
    let (confirm_delete, set_confirm_delete) = signal(false);
    let label = label.unwrap_or_else(|| "Eliminar".to_string());

    view! {
        <Show when=move || !confirm_delete.get()>
            <button
                class="btn btn-danger-soft"
                disabled=move || disabled.get()
                on:click=move |ev| {
                    ev.stop_propagation();
                    set_confirm_delete.set(true);
                }
            >
                {label.clone()}
            </button>
        </Show>
        <Show when=move || confirm_delete.get()>
            <span class="delete-confirm">
                <span class="delete-confirm-text">{question.clone()}</span>
                <button
                    class="confirm-btn"
                    title="Confirmar"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        set_confirm_delete.set(false);
                        on_confirm.run(());
                    }
                >
                    "✓"
                </button>
                <button
                    class="cancel-btn"
                    title="Cancelar"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        set_confirm_delete.set(false);
                    }
                >
                    "✗"
                </button>
            </span>
        </Show>
    }
}
