//! Calculator and terminal shells. Their engines are not part of the desktop, so input is
//! collected and echoed back without being evaluated.

use desktop_app_contract::{AppMountContext, AppRenderError};
use leptos::*;

use crate::{host::window_primary_input_dom_id, model::WindowId};

const TERMINAL_PROMPT: &str = "guest@webdesk:~$";
const KEYPAD: [&str; 16] = [
    "7", "8", "9", "/", "4", "5", "6", "*", "1", "2", "3", "-", "0", ".", "C", "+",
];

/// Appends one line pair for `input` to a terminal transcript. Blank input only echoes the prompt.
pub(crate) fn terminal_reply(transcript: &mut Vec<String>, input: &str) {
    let command = input.trim();
    transcript.push(format!("{TERMINAL_PROMPT} {command}"));
    if command.is_empty() {
        return;
    }
    if command == "clear" {
        transcript.clear();
        return;
    }
    let name = command.split_whitespace().next().unwrap_or(command);
    transcript.push(format!("{name}: command not available"));
}

pub(crate) fn calculator_key(display: &mut String, key: &str) {
    match key {
        "C" => display.clear(),
        "=" => *display = "Evaluation not available".to_string(),
        _ => {
            if display.starts_with('E') {
                display.clear();
            }
            display.push_str(key);
        }
    }
}

pub(super) fn mount_calculator(_: AppMountContext) -> Result<View, AppRenderError> {
    let display = create_rw_signal(String::new());
    Ok(view! {
        <div class="app-shell app-calculator-shell">
            <output class="calculator-display" aria-live="polite">
                {move || {
                    let value = display.get();
                    if value.is_empty() { "0".to_string() } else { value }
                }}
            </output>
            <div class="calculator-keypad" role="group" aria-label="Keypad">
                {KEYPAD
                    .into_iter()
                    .chain(std::iter::once("="))
                    .map(|key| {
                        view! {
                            <button
                                type="button"
                                class="app-action calculator-key"
                                on:click=move |_| display.update(|d| calculator_key(d, key))
                            >
                                {key}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>
        </div>
    }
    .into_view())
}

pub(super) fn mount_terminal(context: AppMountContext) -> Result<View, AppRenderError> {
    let window_id = WindowId(context.window_id);
    let transcript = create_rw_signal(vec!["Web desktop terminal. Commands are not available.".to_string()]);
    let input = create_rw_signal(String::new());

    let on_keydown = move |ev: web_sys::KeyboardEvent| {
        if ev.key() != "Enter" {
            return;
        }
        ev.prevent_default();
        let line = input.get_untracked();
        transcript.update(|lines| terminal_reply(lines, &line));
        input.set(String::new());
    };

    Ok(view! {
        <div class="app-shell app-terminal-shell">
            <div class="terminal-output" role="log" aria-live="polite">
                <For
                    each=move || transcript.get().into_iter().enumerate()
                    key=|(index, line)| (*index, line.clone())
                    children=|(_, line)| view! { <div class="terminal-line">{line}</div> }
                />
            </div>
            <label class="terminal-input-row">
                <span class="terminal-prompt">{TERMINAL_PROMPT}</span>
                <input
                    id=window_primary_input_dom_id(window_id)
                    class="terminal-input"
                    type="text"
                    autocomplete="off"
                    spellcheck="false"
                    prop:value=move || input.get()
                    on:input=move |ev| input.set(event_target_value(&ev))
                    on:keydown=on_keydown
                />
            </label>
        </div>
    }
    .into_view())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn terminal_echoes_unavailable_commands() {
        let mut lines = Vec::new();
        terminal_reply(&mut lines, "  ls -la ");
        terminal_reply(&mut lines, "");
        assert_eq!(
            lines,
            vec![
                format!("{TERMINAL_PROMPT} ls -la"),
                "ls: command not available".to_string(),
                format!("{TERMINAL_PROMPT} "),
            ]
        );

        terminal_reply(&mut lines, "clear");
        assert!(lines.is_empty());
    }

    #[test]
    fn calculator_collects_keys_without_evaluating() {
        let mut display = String::new();
        for key in ["1", "+", "2", "="] {
            calculator_key(&mut display, key);
        }
        assert_eq!(display, "Evaluation not available");
        calculator_key(&mut display, "4");
        assert_eq!(display, "4");
        calculator_key(&mut display, "C");
        assert_eq!(display, "");
    }
}
