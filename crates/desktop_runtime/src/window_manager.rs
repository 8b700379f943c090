//! Window-manager transition helpers used by the desktop reducer.

use crate::model::{
    DesktopState, ResizeEdge, WindowId, WindowRecord, WindowRect, CASCADE_SLOTS, CASCADE_STEP,
};

/// Minimum allowed managed window width.
pub const MIN_WINDOW_WIDTH: i32 = 220;
/// Minimum allowed managed window height.
pub const MIN_WINDOW_HEIGHT: i32 = 140;
/// Height of the window title bar that must stay inside the viewport while dragging.
pub const TITLEBAR_HEIGHT: i32 = 32;
/// Horizontal strip of a dragged window that must stay inside the viewport.
pub const MIN_VISIBLE_WIDTH: i32 = 96;

/// Allocates the next window id.
pub fn next_window_id(state: &mut DesktopState) -> WindowId {
    let id = WindowId(state.next_window_id);
    state.next_window_id = state.next_window_id.saturating_add(1);
    id
}

/// Allocates the next z-index. Values are never reused.
pub fn next_z_index(state: &mut DesktopState) -> u64 {
    let z = state.next_z_index;
    state.next_z_index = state.next_z_index.saturating_add(1);
    z
}

/// Default placement for the `nth` window opened this session.
pub fn cascade_rect(nth: u64, size: (i32, i32)) -> WindowRect {
    let offset = (nth.saturating_sub(1) % CASCADE_SLOTS as u64) as i32 * CASCADE_STEP;
    WindowRect {
        x: 40 + offset,
        y: 48 + offset,
        w: size.0,
        h: size.1,
    }
}

pub fn find_window_mut(state: &mut DesktopState, window_id: WindowId) -> Option<&mut WindowRecord> {
    state.windows.iter_mut().find(|w| w.id == window_id)
}

/// Raises `window_id` above every other window and un-minimizes it.
///
/// Returns `false` when the window does not exist. A window that is already the focused top
/// window keeps its z-index.
pub fn focus_window_internal(state: &mut DesktopState, window_id: WindowId) -> bool {
    let top = state.top_z_index();
    let Some(window) = state.windows.iter().find(|w| w.id == window_id) else {
        return false;
    };
    if !window.minimized && Some(window.z_index) == top {
        return true;
    }

    let z = next_z_index(state);
    if let Some(window) = find_window_mut(state, window_id) {
        window.z_index = z;
        window.minimized = false;
    }
    true
}

/// Applies resize deltas for a given edge/corner drag.
pub fn resize_rect(start: WindowRect, edge: ResizeEdge, dx: i32, dy: i32) -> WindowRect {
    match edge {
        ResizeEdge::East => WindowRect {
            w: start.w + dx,
            ..start
        },
        ResizeEdge::West => WindowRect {
            x: start.x + dx,
            w: start.w - dx,
            ..start
        },
        ResizeEdge::South => WindowRect {
            h: start.h + dy,
            ..start
        },
        ResizeEdge::North => WindowRect {
            y: start.y + dy,
            h: start.h - dy,
            ..start
        },
        ResizeEdge::NorthEast => WindowRect {
            y: start.y + dy,
            h: start.h - dy,
            w: start.w + dx,
            ..start
        },
        ResizeEdge::NorthWest => WindowRect {
            x: start.x + dx,
            y: start.y + dy,
            w: start.w - dx,
            h: start.h - dy,
        },
        ResizeEdge::SouthEast => WindowRect {
            w: start.w + dx,
            h: start.h + dy,
            ..start
        },
        ResizeEdge::SouthWest => WindowRect {
            x: start.x + dx,
            w: start.w - dx,
            h: start.h + dy,
            ..start
        },
    }
}

/// Resizes from `start` and enforces the minimum size with the opposite edge anchored.
pub fn resize_rect_clamped(start: WindowRect, edge: ResizeEdge, dx: i32, dy: i32) -> WindowRect {
    let mut rect =
        resize_rect(start, edge, dx, dy).clamped_min(MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT);
    if edge.moves_left_edge() {
        rect.x = start.right() - rect.w;
    }
    if edge.moves_top_edge() {
        rect.y = start.bottom() - rect.h;
    }
    rect
}

/// Clamps a dragged window so its title bar stays reachable inside `viewport`.
pub fn clamp_window_to_viewport(rect: WindowRect, viewport: WindowRect) -> WindowRect {
    let min_x = viewport.x - rect.w + MIN_VISIBLE_WIDTH;
    let max_x = (viewport.right() - MIN_VISIBLE_WIDTH).max(min_x);
    let min_y = viewport.y;
    let max_y = (viewport.bottom() - TITLEBAR_HEIGHT).max(min_y);
    WindowRect {
        x: rect.x.clamp(min_x, max_x),
        y: rect.y.clamp(min_y, max_y),
        ..rect
    }
}
