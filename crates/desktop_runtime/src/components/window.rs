use desktop_app_contract::{AppCommand, AppHost, AppMountContext};
use leptos::*;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

use super::{
    pointer_from_pointer_event, rect_style, resize_edge_class, stop_mouse_event,
    use_desktop_runtime,
};
use crate::{
    apps,
    model::{ResizeEdge, WindowId, WindowRect},
    reducer::DesktopAction,
};

#[cfg(target_arch = "wasm32")]
fn try_set_pointer_capture(ev: &web_sys::PointerEvent) {
    if let Some(target) = ev.current_target() {
        if let Ok(element) = target.dyn_into::<web_sys::Element>() {
            let _ = element.set_pointer_capture(ev.pointer_id());
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn try_set_pointer_capture(_: &web_sys::PointerEvent) {}

fn is_primary_press(ev: &web_sys::PointerEvent) -> bool {
    if ev.pointer_type() == "mouse" {
        ev.button() == 0
    } else {
        ev.is_primary()
    }
}

#[derive(Debug, Clone, PartialEq)]
struct WindowChrome {
    title: String,
    icon_id: String,
    rect: WindowRect,
    z_index: u64,
    focused: bool,
    minimized: bool,
    maximized: bool,
    resizable: bool,
}

#[component]
pub(super) fn DesktopWindow(window_id: WindowId, viewport: Signal<WindowRect>) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;

    let chrome = create_memo(move |_| {
        state.with(|desktop| {
            let focused = desktop.focused_window_id() == Some(window_id);
            desktop.window(window_id).map(|w| WindowChrome {
                title: w.title.clone(),
                icon_id: w.icon_id.clone(),
                rect: w.effective_rect(viewport.get()),
                z_index: w.z_index,
                focused,
                minimized: w.minimized,
                maximized: w.maximized,
                resizable: w.resizable,
            })
        })
    });
    let chrome_flag = move |f: fn(&WindowChrome) -> bool| {
        move || chrome.with(|c| c.as_ref().is_some_and(f))
    };

    let focus = move |_: web_sys::PointerEvent| {
        if !chrome.with_untracked(|c| c.as_ref().is_some_and(|c| c.focused)) {
            runtime.dispatch_action(DesktopAction::FocusWindow { window_id });
        }
    };
    let toggle_maximize = move || {
        if chrome.with_untracked(|c| c.as_ref().is_some_and(|c| c.resizable)) {
            runtime.dispatch_action(DesktopAction::MaximizeWindow { window_id });
        }
    };
    let begin_move = move |ev: web_sys::PointerEvent| {
        if !is_primary_press(&ev) {
            return;
        }
        try_set_pointer_capture(&ev);
        ev.prevent_default();
        runtime.dispatch_action(DesktopAction::BeginMove {
            window_id,
            pointer: pointer_from_pointer_event(&ev),
        });
    };
    let swallow_pointer = move |ev: web_sys::PointerEvent| ev.stop_propagation();

    view! {
        <Show when=move || chrome.with(Option::is_some) fallback=|| ()>
            <section
                class=move || {
                    let mut class = String::from("desktop-window");
                    chrome.with(|c| {
                        if let Some(c) = c {
                            for (on, name) in
                                [(c.focused, " focused"), (c.minimized, " minimized"), (c.maximized, " maximized")]
                            {
                                if on {
                                    class.push_str(name);
                                }
                            }
                        }
                    });
                    class
                }
                style=move || {
                    chrome.with(|c| match c {
                        Some(c) if c.minimized => "display:none;".to_string(),
                        Some(c) => rect_style(c.rect, c.z_index),
                        None => String::new(),
                    })
                }
                role="dialog"
                aria-label=move || chrome.with(|c| c.as_ref().map(|c| c.title.clone()).unwrap_or_default())
                data-window-id=window_id.0.to_string()
                on:pointerdown=focus
            >
                <header
                    class="titlebar"
                    on:pointerdown=begin_move
                    on:dblclick=move |ev| {
                        stop_mouse_event(&ev);
                        toggle_maximize();
                    }
                >
                    <div class="titlebar-title">
                        <span
                            class="titlebar-app-icon"
                            data-icon=move || chrome.with(|c| c.as_ref().map(|c| c.icon_id.clone()).unwrap_or_default())
                            aria-hidden="true"
                        ></span>
                        <span>{move || chrome.with(|c| c.as_ref().map(|c| c.title.clone()).unwrap_or_default())}</span>
                    </div>
                    <div class="titlebar-controls">
                        <button
                            type="button"
                            aria-label="Minimize window"
                            on:pointerdown=swallow_pointer
                            on:click=move |ev| {
                                stop_mouse_event(&ev);
                                runtime.dispatch_action(DesktopAction::MinimizeWindow { window_id });
                            }
                        >
                            "_"
                        </button>
                        <button
                            type="button"
                            disabled=move || !chrome_flag(|c| c.resizable)()
                            aria-label=move || {
                                if chrome_flag(|c| c.maximized)() { "Restore window" } else { "Maximize window" }
                            }
                            on:pointerdown=swallow_pointer
                            on:click=move |ev| {
                                stop_mouse_event(&ev);
                                toggle_maximize();
                            }
                        >
                            {move || if chrome_flag(|c| c.maximized)() { "❐" } else { "□" }}
                        </button>
                        <button
                            type="button"
                            class="titlebar-close"
                            aria-label="Close window"
                            on:pointerdown=swallow_pointer
                            on:click=move |ev| {
                                stop_mouse_event(&ev);
                                runtime.dispatch_action(DesktopAction::CloseWindow { window_id });
                            }
                        >
                            "×"
                        </button>
                    </div>
                </header>
                <div class="window-body">
                    <WindowBody window_id=window_id />
                </div>
                <Show when=chrome_flag(|c| c.resizable && !c.maximized) fallback=|| ()>
                    {ResizeEdge::ALL
                        .into_iter()
                        .map(|edge| view! { <WindowResizeHandle window_id=window_id edge=edge /> })
                        .collect_view()}
                </Show>
            </section>
        </Show>
    }
}

#[component]
fn WindowResizeHandle(window_id: WindowId, edge: ResizeEdge) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let class_name = format!("window-resize-handle {}", resize_edge_class(edge));

    let on_pointerdown = move |ev: web_sys::PointerEvent| {
        if !is_primary_press(&ev) {
            return;
        }
        try_set_pointer_capture(&ev);
        ev.prevent_default();
        ev.stop_propagation();
        runtime.dispatch_action(DesktopAction::FocusWindow { window_id });
        runtime.dispatch_action(DesktopAction::BeginResize {
            window_id,
            edge,
            pointer: pointer_from_pointer_event(&ev),
        });
    };

    view! { <div class=class_name aria-hidden="true" on:pointerdown=on_pointerdown /> }
}

/// Mounts the window's app, or its fault fallback while a render fault is recorded.
///
/// The app remounts when its render epoch or bound path changes; title and geometry updates do
/// not touch it.
#[component]
fn WindowBody(window_id: WindowId) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;

    let mount_key = create_memo(move |_| {
        state.with(|desktop| {
            desktop
                .window(window_id)
                .map(|w| (w.render_epoch, w.file_path.clone()))
        })
    });
    let fault = create_memo(move |_| {
        state.with(|desktop| {
            desktop
                .faults
                .fault(window_id)
                .map(|fault| (fault.message.clone(), fault.attempts))
        })
    });
    let fs = create_memo(move |_| state.with(|desktop| desktop.fs.clone()));
    let clipboard = create_memo(move |_| state.with(|desktop| desktop.clipboard.clone()));

    let host = AppHost::new(Callback::new(move |command: AppCommand| -> Result<(), String> {
        runtime
            .try_dispatch_action(DesktopAction::HandleAppCommand { window_id, command })
            .map_err(|err| err.to_string())
    }));

    let contents = move || {
        if let Some((message, attempts)) = fault.get() {
            return view! { <FaultFallback window_id=window_id message=message attempts=attempts /> }
                .into_view();
        }
        if mount_key.get().is_none() {
            return ().into_view();
        }
        let Some(window) = state.with_untracked(|desktop| desktop.window(window_id).cloned()) else {
            return ().into_view();
        };
        let context = AppMountContext {
            app: window.app,
            window_id: window_id.0,
            file_path: window.file_path,
            launch_params: window.launch_params,
            fs: fs.into(),
            clipboard: clipboard.into(),
            host,
        };
        match untrack(|| apps::app_module(window.app).mount(context)) {
            Ok(view) => view,
            Err(err) => {
                let message = err.to_string();
                queue_microtask(move || {
                    runtime.dispatch_action(DesktopAction::ReportRenderFault { window_id, message });
                });
                ().into_view()
            }
        }
    };

    view! { <div class="window-body-content">{contents}</div> }
}

#[component]
fn FaultFallback(window_id: WindowId, message: String, attempts: u32) -> impl IntoView {
    let runtime = use_desktop_runtime();
    view! {
        <div class="window-fault" role="alert">
            <p class="window-fault-title">"This window stopped working."</p>
            <p class="window-fault-message">{message}</p>
            {(attempts > 1).then(|| view! { <p class="window-fault-attempts">{format!("Failed {attempts} times")}</p> })}
            <div class="app-toolbar">
                <button
                    type="button"
                    class="app-action"
                    on:click=move |_| runtime.dispatch_action(DesktopAction::RetryRender { window_id })
                >
                    "Retry"
                </button>
                <button
                    type="button"
                    class="app-action"
                    on:click=move |_| runtime.dispatch_action(DesktopAction::CloseWindow { window_id })
                >
                    "Close"
                </button>
            </div>
        </div>
    }
}
