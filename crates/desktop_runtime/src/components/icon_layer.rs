use leptos::*;
use platform_host::{base_name, IconPosition, VirtualFs, ICON_HEIGHT, ICON_WIDTH};

use super::{
    a11y::{focus_first_menu_item, handle_menu_roving_keydown},
    stop_mouse_event, use_desktop_runtime, DesktopRuntimeContext, NamePrompt, APP_DRAG_MIME,
};
use crate::{
    desktop_icons::{parse_drag_data, DragData, DragPayload},
    model::WindowRect,
    reducer::DesktopAction,
};

const DESKTOP_FOLDER: &str = "/";
const CONTEXT_MENU_ID: &str = "desktop-context-menu";
const CONTEXT_MENU_SIZE: (i32, i32) = (200, 220);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct DesktopIcon {
    path: String,
    name: String,
    icon: String,
    x: i32,
    y: i32,
    app_payload: Option<String>,
}

/// Top-level items as rendered icons; unplaced items fall back to their grid slot.
fn desktop_icons(fs: &VirtualFs) -> Vec<DesktopIcon> {
    fs.desktop_items()
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let position = item
                .position
                .unwrap_or_else(|| IconPosition::grid_slot(index as i32));
            DesktopIcon {
                path: item.path.clone(),
                name: item.name.clone(),
                icon: item.icon.clone(),
                x: position.x,
                y: position.y,
                app_payload: DragPayload::for_item(item).and_then(|payload| payload.to_json().ok()),
            }
        })
        .collect()
}

/// Keeps a popup of `size` fully inside `viewport` with a small inset.
fn clamp_popup_position(x: i32, y: i32, size: (i32, i32), viewport: WindowRect) -> (i32, i32) {
    let max_x = (viewport.right() - size.0 - 6).max(viewport.x + 6);
    let max_y = (viewport.bottom() - size.1 - 6).max(viewport.y + 6);
    (x.clamp(viewport.x + 6, max_x), y.clamp(viewport.y + 6, max_y))
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum MenuTarget {
    Background,
    Item(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ContextMenuState {
    x: i32,
    y: i32,
    target: MenuTarget,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum DesktopPrompt {
    NewFolder,
    NewFile,
    Rename(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct GrabOffset {
    path: String,
    dx: i32,
    dy: i32,
}

fn try_dispatch(runtime: DesktopRuntimeContext, action: DesktopAction) -> Result<(), String> {
    runtime
        .try_dispatch_action(action)
        .map_err(|err| err.to_string())
}

#[component]
pub(super) fn DesktopIconLayer(viewport: Signal<WindowRect>) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;
    let icons = create_memo(move |_| state.with(|desktop| desktop_icons(&desktop.fs)));
    let selected = create_rw_signal(None::<String>);
    let grab = create_rw_signal(None::<GrabOffset>);
    let menu = create_rw_signal(None::<ContextMenuState>);
    let prompt = create_rw_signal(None::<DesktopPrompt>);

    let outside_click_listener = window_event_listener(ev::mousedown, move |_| {
        if menu.get_untracked().is_some() {
            menu.set(None);
        }
    });
    on_cleanup(move || outside_click_listener.remove());

    create_effect(move |was_open: Option<bool>| {
        let is_open = menu.with(Option::is_some);
        if is_open && was_open != Some(true) {
            queue_microtask(|| {
                let _ = focus_first_menu_item(CONTEXT_MENU_ID);
            });
        }
        is_open
    });

    let open_menu = move |ev: &web_sys::MouseEvent, target: MenuTarget| {
        stop_mouse_event(ev);
        runtime.dispatch_action(DesktopAction::CloseStartMenu);
        let (x, y) = clamp_popup_position(
            ev.client_x(),
            ev.client_y(),
            CONTEXT_MENU_SIZE,
            viewport.get_untracked(),
        );
        menu.set(Some(ContextMenuState { x, y, target }));
    };

    let on_drop = move |ev: web_sys::DragEvent| {
        ev.prevent_default();
        let Some(raw) = ev
            .data_transfer()
            .and_then(|data| data.get_data("text/plain").ok())
        else {
            return;
        };
        let Some(DragData::ItemPath(path)) = parse_drag_data(&raw) else {
            return;
        };
        let (dx, dy) = grab
            .get_untracked()
            .filter(|offset| offset.path == path)
            .map(|offset| (offset.dx, offset.dy))
            .unwrap_or((ICON_WIDTH / 2, ICON_HEIGHT / 2));
        grab.set(None);
        runtime.dispatch_action(DesktopAction::MoveDesktopItem {
            path,
            position: IconPosition {
                x: ev.client_x() - dx,
                y: ev.client_y() - dy,
            },
            bounds: viewport.get_untracked(),
        });
    };

    view! {
        <div
            class="desktop-icon-layer"
            data-ui-slot="icon-layer"
            role="listbox"
            aria-label="Desktop"
            on:mousedown=move |_| selected.set(None)
            on:contextmenu=move |ev| open_menu(&ev, MenuTarget::Background)
            on:dragover=move |ev: web_sys::DragEvent| ev.prevent_default()
            on:drop=on_drop
        >
            <For each=move || icons.get() key=|icon| icon.clone() let:icon>
                <DesktopIconButton
                    icon=icon
                    selected=selected
                    grab=grab
                    on_menu=Callback::new(move |(ev, path): (web_sys::MouseEvent, String)| {
                        open_menu(&ev, MenuTarget::Item(path));
                    })
                    on_rename=Callback::new(move |path: String| prompt.set(Some(DesktopPrompt::Rename(path))))
                />
            </For>

            {move || menu.get().map(|current| view! {
                <DesktopContextMenu current=current menu=menu prompt=prompt selected=selected />
            })}

            {move || {
                prompt
                    .get()
                    .map(|kind| {
                        let (title, initial) = match &kind {
                            DesktopPrompt::NewFolder => ("New folder name", String::new()),
                            DesktopPrompt::NewFile => ("New file name", String::new()),
                            DesktopPrompt::Rename(path) => ("Rename to", base_name(path).to_string()),
                        };
                        let on_submit = Callback::new(move |name: String| -> Result<(), String> {
                            let action = match &kind {
                                DesktopPrompt::NewFolder => DesktopAction::CreateFolder {
                                    parent: DESKTOP_FOLDER.to_string(),
                                    name,
                                },
                                DesktopPrompt::NewFile => DesktopAction::CreateFile {
                                    parent: DESKTOP_FOLDER.to_string(),
                                    name,
                                    content: None,
                                },
                                DesktopPrompt::Rename(path) => DesktopAction::RenameItem {
                                    path: path.clone(),
                                    new_name: name,
                                },
                            };
                            try_dispatch(runtime, action)
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
fn DesktopIconButton(
    icon: DesktopIcon,
    selected: RwSignal<Option<String>>,
    grab: RwSignal<Option<GrabOffset>>,
    on_menu: Callback<(web_sys::MouseEvent, String)>,
    on_rename: Callback<String>,
) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let path = store_value(icon.path.clone());
    let (x, y) = (icon.x, icon.y);
    let payload = icon.app_payload.clone();
    let is_selected = move || selected.with(|s| s.as_deref() == Some(&*path.get_value()));
    let open = move || {
        runtime.dispatch_action(DesktopAction::OpenItem {
            path: path.get_value(),
        })
    };

    let on_dragstart = move |ev: web_sys::DragEvent| {
        let Some(data) = ev.data_transfer() else {
            return;
        };
        let _ = data.set_data("text/plain", &path.get_value());
        if let Some(payload) = &payload {
            let _ = data.set_data(APP_DRAG_MIME, payload);
        }
        data.set_effect_allowed("copyMove");
        selected.set(Some(path.get_value()));
        grab.set(Some(GrabOffset {
            path: path.get_value(),
            dx: ev.client_x() - x,
            dy: ev.client_y() - y,
        }));
    };

    let on_keydown = move |ev: web_sys::KeyboardEvent| match ev.key().as_str() {
        "Enter" | " " => {
            ev.prevent_default();
            open();
        }
        "F2" => {
            ev.prevent_default();
            on_rename.call(path.get_value());
        }
        "Delete" => {
            ev.prevent_default();
            runtime.dispatch_action(DesktopAction::RemoveItem {
                path: path.get_value(),
            });
        }
        _ => {}
    };

    view! {
        <button
            type="button"
            class=move || if is_selected() { "desktop-icon selected" } else { "desktop-icon" }
            role="option"
            aria-selected=move || is_selected().to_string()
            draggable="true"
            style=format!("left:{x}px;top:{y}px;")
            title=icon.path.clone()
            on:mousedown=move |ev| {
                ev.stop_propagation();
                selected.set(Some(path.get_value()));
            }
            on:dblclick=move |_| open()
            on:keydown=on_keydown
            on:dragstart=on_dragstart
            on:contextmenu=move |ev: web_sys::MouseEvent| {
                selected.set(Some(path.get_value()));
                on_menu.call((ev, path.get_value()));
            }
        >
            <span class="desktop-icon-glyph" data-icon=icon.icon aria-hidden="true"></span>
            <span class="desktop-icon-label">{icon.name}</span>
        </button>
    }
}

#[component]
fn DesktopContextMenu(
    current: ContextMenuState,
    menu: RwSignal<Option<ContextMenuState>>,
    prompt: RwSignal<Option<DesktopPrompt>>,
    selected: RwSignal<Option<String>>,
) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let clipboard_empty = move || runtime.state.with(|d| d.clipboard.is_empty());
    let run = move |action: DesktopAction| {
        menu.set(None);
        runtime.dispatch_action(action);
    };
    let ask = move |kind: DesktopPrompt| {
        menu.set(None);
        prompt.set(Some(kind));
    };

    let items = match current.target {
        MenuTarget::Background => view! {
            <button id="desktop-menu-new-folder" type="button" role="menuitem" on:click=move |_| ask(DesktopPrompt::NewFolder)>
                "New Folder"
            </button>
            <button id="desktop-menu-new-file" type="button" role="menuitem" on:click=move |_| ask(DesktopPrompt::NewFile)>
                "New File"
            </button>
            <button
                id="desktop-menu-paste"
                type="button"
                role="menuitem"
                disabled=clipboard_empty
                on:click=move |_| run(DesktopAction::PasteFromClipboard {
                    destination: DESKTOP_FOLDER.to_string(),
                })
            >
                "Paste"
            </button>
        }
        .into_view(),
        MenuTarget::Item(path) => {
            let path = store_value(path);
            view! {
                <button id="desktop-menu-open" type="button" role="menuitem" on:click=move |_| run(DesktopAction::OpenItem { path: path.get_value() })>
                    "Open"
                </button>
                <button id="desktop-menu-rename" type="button" role="menuitem" on:click=move |_| ask(DesktopPrompt::Rename(path.get_value()))>
                    "Rename"
                </button>
                <button id="desktop-menu-copy" type="button" role="menuitem" on:click=move |_| run(DesktopAction::CopyToClipboard { paths: vec![path.get_value()] })>
                    "Copy"
                </button>
                <button id="desktop-menu-cut" type="button" role="menuitem" on:click=move |_| run(DesktopAction::CutToClipboard { paths: vec![path.get_value()] })>
                    "Cut"
                </button>
                <button
                    id="desktop-menu-delete"
                    type="button"
                    role="menuitem"
                    on:click=move |_| {
                        selected.set(None);
                        run(DesktopAction::RemoveItem { path: path.get_value() });
                    }
                >
                    "Delete"
                </button>
            }
            .into_view()
        }
    };

    view! {
        <div
            id=CONTEXT_MENU_ID
            class="desktop-context-menu"
            role="menu"
            style=format!("left:{}px;top:{}px;", current.x, current.y)
            on:mousedown=move |ev| ev.stop_propagation()
            on:contextmenu=move |ev| stop_mouse_event(&ev)
            on:keydown=move |ev| {
                if ev.key() == "Escape" {
                    ev.prevent_default();
                    menu.set(None);
                } else {
                    handle_menu_roving_keydown(&ev, CONTEXT_MENU_ID);
                }
            }
        >
            {items}
        </div>
    }
}
