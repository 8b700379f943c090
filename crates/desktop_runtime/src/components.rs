//! Desktop shell UI composition and interaction surfaces.

mod a11y;
mod dialogs;
mod icon_layer;
mod taskbar;
mod window;

use leptos::*;

use self::{icon_layer::DesktopIconLayer, taskbar::Taskbar, window::DesktopWindow};
use crate::{
    model::{PointerPosition, ResizeEdge, WindowRect},
    reducer::DesktopAction,
};

pub use self::dialogs::NamePrompt;
pub use crate::runtime_context::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext};

/// Height reserved at the bottom of the viewport for the taskbar.
pub const TASKBAR_HEIGHT_PX: i32 = 38;

/// `DataTransfer` slot carrying a JSON drag payload; the plain-text slot carries the item path.
const APP_DRAG_MIME: &str = "application/json";

#[component]
/// Renders the full desktop shell: icon layer, window layer and taskbar.
pub fn DesktopShell() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;
    let viewport = create_rw_signal(desktop_viewport(runtime));
    runtime.dispatch_action(DesktopAction::SetDesktopBounds {
        bounds: viewport.get_untracked(),
    });

    let resize_listener = window_event_listener(ev::resize, move |_| {
        let bounds = desktop_viewport(runtime);
        viewport.set(bounds);
        runtime.dispatch_action(DesktopAction::SetDesktopBounds { bounds });
    });
    on_cleanup(move || resize_listener.remove());

    let on_pointer_move = move |ev: web_sys::PointerEvent| {
        let pointer = pointer_from_pointer_event(&ev);
        let interaction = runtime.interaction.get_untracked();

        if interaction.dragging.is_some() {
            runtime.dispatch_action(DesktopAction::UpdateMove {
                pointer,
                viewport: viewport.get_untracked(),
            });
        }
        if interaction.resizing.is_some() {
            runtime.dispatch_action(DesktopAction::UpdateResize { pointer });
        }
    };
    let on_pointer_end = move |_| end_active_pointer_interaction(runtime);

    let window_ids = create_memo(move |_| {
        state.with(|desktop| desktop.windows.iter().map(|w| w.id).collect::<Vec<_>>())
    });

    view! {
        <div
            id="desktop-shell-root"
            class="desktop-shell"
            tabindex="-1"
            data-ui-kind="desktop-root"
            data-high-contrast=move || state.with(|d| d.theme.high_contrast).to_string()
            data-reduced-motion=move || state.with(|d| d.theme.reduced_motion).to_string()
            on:pointermove=on_pointer_move
            on:pointerup=on_pointer_end
            on:pointercancel=on_pointer_end
        >
            <div class="desktop-surface" data-ui-slot="desktop-surface">
                <DesktopIconLayer viewport=viewport.into() />
                <div class="desktop-window-layer" data-ui-slot="window-layer">
                    <For each=move || window_ids.get() key=|window_id| window_id.0 let:window_id>
                        <DesktopWindow window_id=window_id viewport=viewport.into() />
                    </For>
                </div>
            </div>
            <Taskbar />
        </div>
    }
}

fn desktop_viewport(runtime: DesktopRuntimeContext) -> WindowRect {
    runtime
        .host
        .get_value()
        .desktop_viewport_rect(TASKBAR_HEIGHT_PX)
}

fn stop_mouse_event(ev: &web_sys::MouseEvent) {
    ev.prevent_default();
    ev.stop_propagation();
}

fn pointer_from_pointer_event(ev: &web_sys::PointerEvent) -> PointerPosition {
    PointerPosition {
        x: ev.client_x(),
        y: ev.client_y(),
    }
}

fn end_active_pointer_interaction(runtime: DesktopRuntimeContext) {
    let interaction = runtime.interaction.get_untracked();
    if interaction.dragging.is_some() {
        runtime.dispatch_action(DesktopAction::EndMove);
    }
    if interaction.resizing.is_some() {
        runtime.dispatch_action(DesktopAction::EndResize);
    }
}

fn resize_edge_class(edge: ResizeEdge) -> &'static str {
    match edge {
        ResizeEdge::North => "edge-n",
        ResizeEdge::South => "edge-s",
        ResizeEdge::East => "edge-e",
        ResizeEdge::West => "edge-w",
        ResizeEdge::NorthEast => "edge-ne",
        ResizeEdge::NorthWest => "edge-nw",
        ResizeEdge::SouthEast => "edge-se",
        ResizeEdge::SouthWest => "edge-sw",
    }
}

fn rect_style(rect: WindowRect, z_index: u64) -> String {
    format!(
        "left:{}px;top:{}px;width:{}px;height:{}px;z-index:{};",
        rect.x, rect.y, rect.w, rect.h, z_index
    )
}
