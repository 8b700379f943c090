//! Plain-text editor bound to a file path; unbound windows edit a scratch buffer.

use desktop_app_contract::{AppCommand, AppMountContext, AppRenderError};
use leptos::*;
use platform_host::{normalize_virtual_path, VirtualFs};

use crate::{components::NamePrompt, host::window_primary_input_dom_id, model::WindowId};

/// Folder that receives "Save As" files from scratch buffers.
const SCRATCH_SAVE_FOLDER: &str = "/Documents";

pub(crate) fn file_text(fs: &VirtualFs, path: &str) -> Result<String, AppRenderError> {
    fs.get(path)
        .filter(|item| !item.is_folder())
        .map(|item| item.content.clone().unwrap_or_default())
        .ok_or_else(|| AppRenderError::MissingFile {
            path: path.to_string(),
        })
}

pub(crate) fn editor_status(text: &str, dirty: bool) -> String {
    let lines = text.lines().count().max(1);
    let chars = text.chars().count();
    let state = if dirty { "Modified" } else { "Saved" };
    format!("{state} | {lines} line(s) | {chars} char(s)")
}

pub(super) fn mount_text_editor(context: AppMountContext) -> Result<View, AppRenderError> {
    let path = context.file_path.as_deref().map(normalize_virtual_path);
    let initial = match &path {
        Some(path) => context.fs.with_untracked(|fs| file_text(fs, path))?,
        None => String::new(),
    };
    Ok(view! { <TextEditorApp context=context path=path initial=initial /> }.into_view())
}

#[component]
fn TextEditorApp(context: AppMountContext, path: Option<String>, initial: String) -> impl IntoView {
    let AppMountContext {
        window_id, fs, host, ..
    } = context;
    let path = store_value(path);
    let text = create_rw_signal(initial.clone());
    let saved = create_rw_signal(initial);
    let notice = create_rw_signal(None::<String>);
    let save_as_open = create_rw_signal(false);
    let dirty = Signal::derive(move || text.with(|text| saved.with(|saved| text != saved)));

    create_effect(move |_| {
        let Some(path) = path.get_value() else {
            return;
        };
        if let Err(err) = fs.with(|fs| file_text(fs, &path)) {
            host.report_fault(&err);
        }
    });

    let save = move || {
        let Some(path) = path.get_value() else {
            save_as_open.set(true);
            return;
        };
        let content = text.get_untracked();
        match host.send(AppCommand::WriteFile {
            path,
            content: content.clone(),
        }) {
            Ok(()) => {
                saved.set(content);
                notice.set(None);
            }
            Err(message) => notice.set(Some(message)),
        }
    };

    let on_keydown = move |ev: web_sys::KeyboardEvent| {
        if (ev.ctrl_key() || ev.meta_key()) && ev.key().eq_ignore_ascii_case("s") {
            ev.prevent_default();
            save();
        }
    };

    let save_as = Callback::new(move |name: String| -> Result<(), String> {
        let content = text.get_untracked();
        host.send(AppCommand::CreateFile {
            parent: SCRATCH_SAVE_FOLDER.to_string(),
            name: name.clone(),
            content: Some(content.clone()),
        })?;
        saved.set(content);
        if let Err(message) = host.open_path(format!("{SCRATCH_SAVE_FOLDER}/{name}")) {
            notice.set(Some(message));
        }
        Ok(())
    });

    view! {
        <div class="app-shell app-editor-shell">
            <div class="app-toolbar" role="toolbar" aria-label="Editor actions">
                <button type="button" class="app-action" on:click=move |_| save()>
                    {move || if path.with_value(Option::is_some) { "Save" } else { "Save As" }}
                </button>
                <span class="app-toolbar-path">
                    {move || path.get_value().unwrap_or_else(|| "Untitled".to_string())}
                </span>
            </div>
            <textarea
                id=window_primary_input_dom_id(WindowId(window_id))
                class="app-editor-text"
                spellcheck="false"
                prop:value=move || text.get()
                on:input=move |ev| text.set(event_target_value(&ev))
                on:keydown=on_keydown
            />
            <div class="app-statusbar">
                <span>{move || text.with(|text| editor_status(text, dirty.get()))}</span>
                <span role="status">{move || notice.get().unwrap_or_default()}</span>
            </div>
            <Show when=move || save_as_open.get() fallback=|| ()>
                <NamePrompt
                    title="Save as"
                    initial="untitled.txt"
                    on_submit=save_as
                    on_close=Callback::new(move |_: ()| save_as_open.set(false))
                />
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn file_text_requires_an_existing_file() {
        let fs = VirtualFs::seeded();
        assert!(file_text(&fs, "/Projects/roadmap.md").is_ok());
        assert_eq!(
            file_text(&fs, "/Projects"),
            Err(AppRenderError::MissingFile {
                path: "/Projects".to_string()
            })
        );
        assert_eq!(
            file_text(&fs, "/gone.txt"),
            Err(AppRenderError::MissingFile {
                path: "/gone.txt".to_string()
            })
        );
    }

    #[test]
    fn status_counts_lines_and_characters() {
        assert_eq!(editor_status("", false), "Saved | 1 line(s) | 0 char(s)");
        assert_eq!(editor_status("ab\ncd", true), "Modified | 2 line(s) | 5 char(s)");
    }
}
