use std::time::Duration;

use desktop_app_contract::AppKind;
use leptos::*;

use super::{
    a11y::{focus_first_menu_item, handle_menu_roving_keydown},
    use_desktop_runtime, DesktopRuntimeContext, APP_DRAG_MIME,
};
use crate::{
    apps::launcher_apps,
    desktop_icons::{parse_drag_data, DragData, DragPayload},
    model::{DesktopPreferences, DesktopState, WindowId},
    reducer::DesktopAction,
};

const START_MENU_ID: &str = "desktop-launcher-menu";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct TaskbarClockConfig {
    use_24_hour: bool,
    show_date: bool,
}

impl From<&DesktopPreferences> for TaskbarClockConfig {
    fn from(preferences: &DesktopPreferences) -> Self {
        Self {
            use_24_hour: preferences.clock_24_hour,
            show_date: preferences.show_clock_date,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TaskbarClockSnapshot {
    year: u32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
}

impl TaskbarClockSnapshot {
    fn now() -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            let date = js_sys::Date::new_0();
            Self {
                year: date.get_full_year(),
                month: date.get_month() + 1,
                day: date.get_date(),
                hour: date.get_hours(),
                minute: date.get_minutes(),
                second: date.get_seconds(),
            }
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            Self {
                year: 1970,
                month: 1,
                day: 1,
                hour: 0,
                minute: 0,
                second: 0,
            }
        }
    }
}

fn format_taskbar_clock_time(
    snapshot: TaskbarClockSnapshot,
    config: TaskbarClockConfig,
) -> String {
    if config.use_24_hour {
        return format!("{:02}:{:02}", snapshot.hour, snapshot.minute);
    }
    let hour = match snapshot.hour % 12 {
        0 => 12,
        hour => hour,
    };
    let suffix = if snapshot.hour >= 12 { "PM" } else { "AM" };
    format!("{hour}:{:02} {suffix}", snapshot.minute)
}

fn format_taskbar_clock_date(snapshot: TaskbarClockSnapshot) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        snapshot.year, snapshot.month, snapshot.day
    )
}

fn format_taskbar_clock_aria(snapshot: TaskbarClockSnapshot, config: TaskbarClockConfig) -> String {
    let time = format_taskbar_clock_time(snapshot, config);
    if config.show_date {
        format!("{}, {time}", format_taskbar_clock_date(snapshot))
    } else {
        time
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct TaskbarButton {
    window_id: WindowId,
    title: String,
    icon_id: String,
    focused: bool,
    minimized: bool,
}

/// Window buttons in the order their windows were opened.
fn taskbar_buttons(state: &DesktopState) -> Vec<TaskbarButton> {
    let focused = state.focused_window_id();
    let mut buttons: Vec<TaskbarButton> = state
        .windows
        .iter()
        .map(|w| TaskbarButton {
            window_id: w.id,
            title: w.title.clone(),
            icon_id: w.icon_id.clone(),
            focused: focused == Some(w.id),
            minimized: w.minimized,
        })
        .collect();
    buttons.sort_by_key(|button| button.window_id);
    buttons
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TaskbarShortcut {
    ToggleStartMenu,
    CloseStartMenu,
    ActivateWindow(usize),
}

fn taskbar_shortcut(key: &str, ctrl: bool, alt: bool) -> Option<TaskbarShortcut> {
    match key {
        "Escape" if ctrl && !alt => Some(TaskbarShortcut::ToggleStartMenu),
        "Escape" => Some(TaskbarShortcut::CloseStartMenu),
        digit if alt && !ctrl => digit
            .parse::<usize>()
            .ok()
            .filter(|n| (1..=9).contains(n))
            .map(|n| TaskbarShortcut::ActivateWindow(n - 1)),
        _ => None,
    }
}

/// Reads the app a drop on the taskbar asks to pin.
fn pinned_app_from_drop(raw: &str) -> Option<AppKind> {
    match parse_drag_data(raw)? {
        DragData::Payload(DragPayload::DesktopApp { app_info }) => Some(app_info.component),
        DragData::ItemPath(_) => None,
    }
}

fn launch_app(runtime: DesktopRuntimeContext, app: AppKind) {
    runtime.dispatch_action(DesktopAction::LaunchApp { app });
}

#[component]
pub(super) fn Taskbar() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;
    let clock_now = create_rw_signal(TaskbarClockSnapshot::now());
    let clock_config = create_memo(move |_| state.with(|d| TaskbarClockConfig::from(&d.preferences)));
    let start_open = create_memo(move |_| state.with(|d| d.start_menu_open));
    let buttons = create_memo(move |_| state.with(taskbar_buttons));
    let pinned = create_memo(move |_| state.with(|d| d.preferences.pinned_apps.clone()));
    let drop_armed = create_rw_signal(false);

    if let Ok(interval) = set_interval_with_handle(
        move || clock_now.set(TaskbarClockSnapshot::now()),
        Duration::from_secs(1),
    ) {
        on_cleanup(move || interval.clear());
    }

    let outside_click_listener = window_event_listener(ev::mousedown, move |_| {
        if runtime.state.with_untracked(|d| d.start_menu_open) {
            runtime.dispatch_action(DesktopAction::CloseStartMenu);
        }
    });
    on_cleanup(move || outside_click_listener.remove());

    let shortcut_listener = window_event_listener(ev::keydown, move |ev| {
        if ev.default_prevented() {
            return;
        }
        let Some(shortcut) = taskbar_shortcut(&ev.key(), ev.ctrl_key(), ev.alt_key()) else {
            return;
        };
        match shortcut {
            TaskbarShortcut::ToggleStartMenu => {
                ev.prevent_default();
                runtime.dispatch_action(DesktopAction::ToggleStartMenu);
            }
            TaskbarShortcut::CloseStartMenu => {
                if start_open.get_untracked() {
                    ev.prevent_default();
                    runtime.dispatch_action(DesktopAction::CloseStartMenu);
                }
            }
            TaskbarShortcut::ActivateWindow(index) => {
                if let Some(button) = buttons.with_untracked(|b| b.get(index).cloned()) {
                    ev.prevent_default();
                    runtime.dispatch_action(DesktopAction::ToggleTaskbarWindow {
                        window_id: button.window_id,
                    });
                }
            }
        }
    });
    on_cleanup(move || shortcut_listener.remove());

    create_effect(move |was_open: Option<bool>| {
        let is_open = start_open.get();
        if is_open && was_open != Some(true) {
            queue_microtask(|| {
                let _ = focus_first_menu_item(START_MENU_ID);
            });
        }
        is_open
    });

    let on_drop = move |ev: web_sys::DragEvent| {
        ev.prevent_default();
        drop_armed.set(false);
        let Some(raw) = ev
            .data_transfer()
            .and_then(|data| data.get_data(APP_DRAG_MIME).ok())
        else {
            return;
        };
        if let Some(app) = pinned_app_from_drop(&raw) {
            runtime.dispatch_action(DesktopAction::PinTaskbarApp { app });
        }
    };

    view! {
        <footer
            class=move || if drop_armed.get() { "taskbar drop-target" } else { "taskbar" }
            role="toolbar"
            aria-label="Desktop taskbar"
            on:mousedown=move |ev| ev.stop_propagation()
            on:dragover=move |ev: web_sys::DragEvent| {
                ev.prevent_default();
                drop_armed.set(true);
            }
            on:dragleave=move |_| drop_armed.set(false)
            on:drop=on_drop
        >
            <div class="taskbar-left">
                <button
                    id="taskbar-start-button"
                    type="button"
                    class="start-button"
                    aria-label="Open application launcher"
                    aria-haspopup="menu"
                    aria-controls=START_MENU_ID
                    aria-expanded=move || start_open.get().to_string()
                    aria-keyshortcuts="Ctrl+Escape"
                    on:click=move |_| runtime.dispatch_action(DesktopAction::ToggleStartMenu)
                >
                    "Start"
                </button>

                <div class="taskbar-pins" role="group" aria-label="Pinned apps">
                    <For each=move || pinned.get() key=|app| app.tag() let:app>
                        <button
                            type="button"
                            class="taskbar-pin"
                            data-app=app.icon_id()
                            title=format!("{} (right-click to unpin)", app.title())
                            aria-label=format!("Pinned {}", app.title())
                            on:click=move |_| launch_app(runtime, app)
                            on:contextmenu=move |ev| {
                                ev.prevent_default();
                                runtime.dispatch_action(DesktopAction::UnpinTaskbarApp { app });
                            }
                        >
                            <span class="taskbar-app-icon" data-icon=app.icon_id() aria-hidden="true"></span>
                            <span class="visually-hidden">{app.title()}</span>
                        </button>
                    </For>
                </div>
            </div>

            <div class="taskbar-running-strip" role="group" aria-label="Running windows">
                <For each=move || buttons.get() key=|button| button.clone() let:button>
                    <button
                        type="button"
                        class=match (button.focused, button.minimized) {
                            (_, true) => "taskbar-window minimized",
                            (true, false) => "taskbar-window focused",
                            (false, false) => "taskbar-window",
                        }
                        data-app=button.icon_id.clone()
                        aria-pressed=button.focused.to_string()
                        title=button.title.clone()
                        on:click=move |_| {
                            runtime.dispatch_action(DesktopAction::CloseStartMenu);
                            runtime.dispatch_action(DesktopAction::ToggleTaskbarWindow {
                                window_id: button.window_id,
                            });
                        }
                    >
                        <span class="taskbar-app-icon" data-icon=button.icon_id.clone() aria-hidden="true"></span>
                        <span class="taskbar-app-label">{button.title.clone()}</span>
                    </button>
                </For>
            </div>

            <div
                class="taskbar-clock"
                role="timer"
                aria-label=move || format_taskbar_clock_aria(clock_now.get(), clock_config.get())
            >
                <span class="taskbar-clock-time">
                    {move || format_taskbar_clock_time(clock_now.get(), clock_config.get())}
                </span>
                <Show when=move || clock_config.get().show_date fallback=|| ()>
                    <span class="taskbar-clock-date">
                        {move || format_taskbar_clock_date(clock_now.get())}
                    </span>
                </Show>
            </div>

            <Show when=move || start_open.get() fallback=|| ()>
                <StartMenu />
            </Show>
        </footer>
    }
}

#[component]
fn StartMenu() -> impl IntoView {
    let runtime = use_desktop_runtime();
    view! {
        <div
            id=START_MENU_ID
            class="start-menu"
            role="menu"
            aria-label="Applications"
            on:keydown=move |ev| {
                handle_menu_roving_keydown(&ev, START_MENU_ID);
            }
        >
            {launcher_apps()
                .into_iter()
                .map(|app| {
                    view! {
                        <button
                            id=format!("start-menu-item-{}", app.tag())
                            type="button"
                            role="menuitem"
                            class="start-menu-item"
                            data-app=app.icon_id()
                            on:click=move |_| launch_app(runtime, app)
                        >
                            <span class="start-menu-icon" data-icon=app.icon_id() aria-hidden="true"></span>
                            <span>{app.title()}</span>
                        </button>
                    }
                })
                .collect_view()}
        </div>
    }
}
