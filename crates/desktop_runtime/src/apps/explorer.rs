//! Folder browser bound to one folder path per window.
//!
//! Opening a subfolder opens (or focuses) another explorer window, so every window keeps a single
//! folder binding that follows renames.

use desktop_app_contract::{AppCommand, AppHost, AppMountContext, AppRenderError};
use leptos::*;
use platform_host::{
    normalize_virtual_path, parent_path, ClipboardOperation, ClipboardState, ItemKind, VirtualFs,
};

use crate::components::NamePrompt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ExplorerEntry {
    pub path: String,
    pub name: String,
    pub kind: ItemKind,
    pub icon: String,
    pub pending_cut: bool,
}

/// Lists `folder`'s children with folders first, then by case-insensitive name.
pub(crate) fn folder_entries(
    fs: &VirtualFs,
    folder: &str,
    clipboard: &ClipboardState,
) -> Vec<ExplorerEntry> {
    let mut entries: Vec<ExplorerEntry> = fs
        .children(folder)
        .map(|children| {
            children
                .iter()
                .map(|item| ExplorerEntry {
                    path: item.path.clone(),
                    name: item.name.clone(),
                    kind: item.kind,
                    icon: item.icon.clone(),
                    pending_cut: clipboard.is_cut(&item.path),
                })
                .collect()
        })
        .unwrap_or_default();
    entries.sort_by(|a, b| {
        let rank = |kind: ItemKind| if kind == ItemKind::Folder { 0 } else { 1 };
        rank(a.kind)
            .cmp(&rank(b.kind))
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
    });
    entries
}

pub(crate) fn clipboard_summary(clipboard: &ClipboardState) -> String {
    match (clipboard.operation, clipboard.items.len()) {
        (ClipboardOperation::None, _) | (_, 0) => "Clipboard empty".to_string(),
        (ClipboardOperation::Copy, 1) => "1 item copied".to_string(),
        (ClipboardOperation::Copy, n) => format!("{n} items copied"),
        (ClipboardOperation::Cut, 1) => "1 item cut".to_string(),
        (ClipboardOperation::Cut, n) => format!("{n} items cut"),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ExplorerPrompt {
    NewFile,
    NewFolder,
    Rename(String),
}

pub(super) fn mount_file_explorer(context: AppMountContext) -> Result<View, AppRenderError> {
    let folder = context
        .file_path
        .as_deref()
        .map(normalize_virtual_path)
        .unwrap_or_else(|| "/".to_string());
    let exists = context
        .fs
        .with_untracked(|fs| fs.get(&folder).is_some_and(|item| item.is_folder()));
    if !exists {
        return Err(AppRenderError::MissingFolder { path: folder });
    }
    Ok(view! { <FileExplorerApp context=context folder=folder /> }.into_view())
}

#[component]
fn FileExplorerApp(context: AppMountContext, folder: String) -> impl IntoView {
    let AppMountContext {
        fs, clipboard, host, ..
    } = context;
    let folder = store_value(folder);
    let selected = create_rw_signal(None::<String>);
    let notice = create_rw_signal(None::<String>);
    let prompt = create_rw_signal(None::<ExplorerPrompt>);

    let entries = create_memo(move |_| {
        let folder = folder.get_value();
        fs.with(|fs| clipboard.with(|clipboard| folder_entries(fs, &folder, clipboard)))
    });

    create_effect(move |_| {
        let path = folder.get_value();
        if !fs.with(|fs| fs.get(&path).is_some_and(|item| item.is_folder())) {
            host.report_fault(&AppRenderError::MissingFolder { path });
        }
    });

    create_effect(move |_| {
        let listed = entries.get();
        selected.update(|current| {
            if current
                .as_ref()
                .is_some_and(|path| listed.iter().all(|entry| &entry.path != path))
            {
                *current = None;
            }
        });
    });

    let run = move |command: AppCommand| match host.send(command) {
        Ok(()) => notice.set(None),
        Err(message) => notice.set(Some(message)),
    };
    let with_selection = move |f: &dyn Fn(String)| match selected.get_untracked() {
        Some(path) => f(path),
        None => notice.set(Some("Select an item first".to_string())),
    };

    let go_up = move |_| {
        if let Some(parent) = parent_path(&folder.get_value()) {
            run(AppCommand::OpenPath { path: parent });
        }
    };
    let delete_selected = move |_| {
        with_selection(&|path| {
            run(AppCommand::Remove { path });
            selected.set(None);
        })
    };
    let copy_selected = move |_| with_selection(&|path| run(AppCommand::Copy { paths: vec![path] }));
    let cut_selected = move |_| with_selection(&|path| run(AppCommand::Cut { paths: vec![path] }));
    let paste_here = move |_| {
        run(AppCommand::Paste {
            destination: folder.get_value(),
        })
    };
    let rename_selected = move |_| with_selection(&|path| prompt.set(Some(ExplorerPrompt::Rename(path))));

    let on_list_keydown = move |ev: web_sys::KeyboardEvent| {
        let Some(path) = selected.get_untracked() else {
            return;
        };
        match ev.key().as_str() {
            "Enter" => {
                ev.prevent_default();
                run(AppCommand::OpenPath { path });
            }
            "Delete" => {
                ev.prevent_default();
                run(AppCommand::Remove { path });
                selected.set(None);
            }
            "F2" => {
                ev.prevent_default();
                prompt.set(Some(ExplorerPrompt::Rename(path)));
            }
            _ => {}
        }
    };

    view! {
        <div class="app-shell app-explorer-shell">
            <div class="app-toolbar" role="toolbar" aria-label="Explorer actions">
                <button
                    type="button"
                    class="app-action"
                    disabled=move || folder.with_value(|folder| folder == "/")
                    on:click=go_up
                >
                    "Up"
                </button>
                <button type="button" class="app-action" on:click=move |_| prompt.set(Some(ExplorerPrompt::NewFile))>
                    "New File"
                </button>
                <button type="button" class="app-action" on:click=move |_| prompt.set(Some(ExplorerPrompt::NewFolder))>
                    "New Folder"
                </button>
                <button type="button" class="app-action" on:click=rename_selected>"Rename"</button>
                <button type="button" class="app-action" on:click=delete_selected>"Delete"</button>
                <button type="button" class="app-action" on:click=copy_selected>"Copy"</button>
                <button type="button" class="app-action" on:click=cut_selected>"Cut"</button>
                <button
                    type="button"
                    class="app-action"
                    disabled=move || clipboard.with(ClipboardState::is_empty)
                    on:click=paste_here
                >
                    "Paste"
                </button>
            </div>

            <div class="pane-path">{move || folder.get_value()}</div>

            <div class="explorer-listwrap">
                <table class="explorer-list" role="grid" aria-label="Folder contents" tabindex="0" on:keydown=on_list_keydown>
                    <thead>
                        <tr>
                            <th>"Name"</th>
                            <th>"Type"</th>
                        </tr>
                    </thead>
                    <tbody>
                        <For each=move || entries.get() key=|entry| entry.path.clone() let:entry>
                            <ExplorerRow entry=entry selected=selected notice=notice host=host />
                        </For>
                    </tbody>
                </table>
            </div>

            <div class="app-statusbar">
                <span>{move || format!("{} item(s)", entries.with(Vec::len))}</span>
                <span>{move || clipboard.with(clipboard_summary)}</span>
                <span role="status">{move || notice.get().unwrap_or_default()}</span>
            </div>

            {move || {
                prompt
                    .get()
                    .map(|kind| {
                        let parent = folder.get_value();
                        let (title, initial) = match &kind {
                            ExplorerPrompt::NewFile => ("New file name", String::new()),
                            ExplorerPrompt::NewFolder => ("New folder name", String::new()),
                            ExplorerPrompt::Rename(path) => (
                                "Rename to",
                                platform_host::base_name(path).to_string(),
                            ),
                        };
                        let on_submit = Callback::new(move |name: String| {
                            let command = match &kind {
                                ExplorerPrompt::NewFile => AppCommand::CreateFile {
                                    parent: parent.clone(),
                                    name,
                                    content: None,
                                },
                                ExplorerPrompt::NewFolder => AppCommand::CreateFolder {
                                    parent: parent.clone(),
                                    name,
                                },
                                ExplorerPrompt::Rename(path) => AppCommand::Rename {
                                    path: path.clone(),
                                    new_name: name,
                                },
                            };
                            host.send(command)
                        });
                        view! {
                            <NamePrompt
                                title=title
                                initial=initial
                                on_submit=on_submit
                                on_close=Callback::new(move |_: ()| prompt.set(None))
                            />
                        }
                    })
            }}
        </div>
    }
}

#[component]
fn ExplorerRow(
    entry: ExplorerEntry,
    selected: RwSignal<Option<String>>,
    notice: RwSignal<Option<String>>,
    host: AppHost,
) -> impl IntoView {
    let path = store_value(entry.path.clone());
    let is_selected =
        Signal::derive(move || selected.with(|current| current.as_deref() == Some(&*path.get_value())));
    let kind = match entry.kind {
        ItemKind::Folder => "Folder",
        ItemKind::File => "File",
    };
    let class = move || {
        let mut class = String::from("explorer-row");
        if is_selected.get() {
            class.push_str(" selected");
        }
        if entry.pending_cut {
            class.push_str(" pending-cut");
        }
        class
    };

    view! {
        <tr
            class=class
            aria-selected=move || is_selected.get().to_string()
            on:mousedown=move |_| selected.set(Some(path.get_value()))
            on:dblclick=move |_| {
                if let Err(message) = host.open_path(path.get_value()) {
                    notice.set(Some(message));
                }
            }
        >
            <td>
                <span class="explorer-icon" data-icon=entry.icon aria-hidden="true"></span>
                <span>{entry.name}</span>
            </td>
            <td>{kind}</td>
        </tr>
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn entries_list_folders_first_then_names() {
        let mut fs = VirtualFs::new();
        fs.create_folder("/", "Work").expect("folder");
        fs.create_file("/Work", "b.txt", None).expect("file");
        fs.create_file("/Work", "A.md", None).expect("file");
        fs.create_folder("/Work", "zeta").expect("folder");

        let names: Vec<_> = folder_entries(&fs, "/Work", &ClipboardState::default())
            .into_iter()
            .map(|entry| entry.name)
            .collect();
        assert_eq!(names, vec!["zeta", "A.md", "b.txt"]);
    }

    #[test]
    fn cut_items_are_marked_pending() {
        let fs = VirtualFs::seeded();
        let clipboard = ClipboardState::cut(["/Projects/roadmap.md"]);
        let entries = folder_entries(&fs, "/Projects", &clipboard);
        assert_eq!(entries.len(), 1);
        assert!(entries[0].pending_cut);
        assert_eq!(clipboard_summary(&clipboard), "1 item cut");
    }

    #[test]
    fn missing_folder_lists_nothing() {
        let fs = VirtualFs::new();
        assert!(folder_entries(&fs, "/gone", &ClipboardState::default()).is_empty());
        assert_eq!(clipboard_summary(&ClipboardState::default()), "Clipboard empty");
    }
}
