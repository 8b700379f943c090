//! Modal name prompt shared by the desktop and the file explorer.

use leptos::*;
use platform_host::validate_item_name;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PromptKey {
    Confirm,
    Cancel,
}

pub(crate) fn prompt_key(key: &str) -> Option<PromptKey> {
    match key {
        "Enter" => Some(PromptKey::Confirm),
        "Escape" | "Esc" => Some(PromptKey::Cancel),
        _ => None,
    }
}

#[component]
/// Single-field dialog for naming a new or renamed item.
///
/// Enter confirms, Escape or a click on the backdrop cancels. `on_submit` receives the validated
/// name; an `Err` keeps the dialog open with the message shown inline.
pub fn NamePrompt(
    #[prop(into)] title: String,
    #[prop(optional, into)] initial: String,
    #[prop(into)] on_submit: Callback<String, Result<(), String>>,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    let value = create_rw_signal(initial);
    let error = create_rw_signal(None::<String>);
    let input_ref = create_node_ref::<html::Input>();

    create_effect(move |_| {
        if let Some(input) = input_ref.get() {
            let _ = input.focus();
            input.select();
        }
    });

    let submit = move || {
        let name = match validate_item_name(&value.get_untracked()) {
            Ok(name) => name,
            Err(err) => {
                error.set(Some(err.to_string()));
                return;
            }
        };
        match on_submit.call(name) {
            Ok(()) => on_close.call(()),
            Err(message) => error.set(Some(message)),
        }
    };

    let on_keydown = move |ev: web_sys::KeyboardEvent| match prompt_key(&ev.key()) {
        Some(PromptKey::Confirm) => {
            ev.prevent_default();
            submit();
        }
        Some(PromptKey::Cancel) => {
            ev.prevent_default();
            ev.stop_propagation();
            on_close.call(());
        }
        None => {}
    };

    view! {
        <div
            class="dialog-backdrop"
            data-ui-kind="dialog-backdrop"
            on:mousedown=move |_| on_close.call(())
        >
            <div
                class="dialog"
                role="dialog"
                aria-modal="true"
                aria-label=title.clone()
                on:mousedown=|ev: web_sys::MouseEvent| ev.stop_propagation()
            >
                <p class="dialog-title">{title}</p>
                <input
                    class="app-field"
                    type="text"
                    node_ref=input_ref
                    prop:value=move || value.get()
                    aria-invalid=move || error.get().is_some().to_string()
                    on:input=move |ev| {
                        value.set(event_target_value(&ev));
                        error.set(None);
                    }
                    on:keydown=on_keydown
                />
                <Show when=move || error.get().is_some() fallback=|| ()>
                    <p class="dialog-error" role="alert">{move || error.get().unwrap_or_default()}</p>
                </Show>
                <div class="dialog-actions">
                    <button type="button" class="app-action" on:click=move |_| submit()>"OK"</button>
                    <button type="button" class="app-action" on:click=move |_| on_close.call(())>
                        "Cancel"
                    </button>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn enter_confirms_and_escape_cancels() {
        assert_eq!(prompt_key("Enter"), Some(PromptKey::Confirm));
        assert_eq!(prompt_key("Escape"), Some(PromptKey::Cancel));
        assert_eq!(prompt_key("Esc"), Some(PromptKey::Cancel));
        assert_eq!(prompt_key("a"), None);
    }
}
