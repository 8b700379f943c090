use desktop_app_contract::AppKind;
use platform_host::{ClipboardState, VirtualFs};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::boundary::FaultBoundary;

/// Horizontal and vertical step between successive default window placements.
pub const CASCADE_STEP: i32 = 20;
/// Number of cascade steps before placement wraps back to the origin.
pub const CASCADE_SLOTS: i32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WindowId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl WindowRect {
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }

    pub fn clamped_min(self, min_w: i32, min_h: i32) -> Self {
        Self {
            w: self.w.max(min_w),
            h: self.h.max(min_h),
            ..self
        }
    }

    pub fn right(self) -> i32 {
        self.x + self.w
    }

    pub fn bottom(self) -> i32 {
        self.y + self.h
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowRecord {
    pub id: WindowId,
    pub app: AppKind,
    pub title: String,
    pub icon_id: String,
    /// Stored geometry; maximize never overwrites it.
    pub rect: WindowRect,
    pub z_index: u64,
    pub minimized: bool,
    pub maximized: bool,
    pub resizable: bool,
    pub file_path: Option<String>,
    pub launch_params: Value,
    /// Bumped by a fault retry so the window body remounts.
    pub render_epoch: u32,
}

impl WindowRecord {
    /// Geometry the window is rendered at.
    pub fn effective_rect(&self, viewport: WindowRect) -> WindowRect {
        if self.maximized {
            viewport
        } else {
            self.rect
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DesktopTheme {
    pub high_contrast: bool,
    pub reduced_motion: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesktopPreferences {
    pub clock_24_hour: bool,
    pub show_clock_date: bool,
    pub pinned_apps: Vec<AppKind>,
}

impl Default for DesktopPreferences {
    fn default() -> Self {
        Self {
            clock_24_hour: false,
            show_clock_date: true,
            pinned_apps: vec![
                AppKind::FileExplorer,
                AppKind::TextEditor,
                AppKind::Terminal,
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DesktopState {
    pub next_window_id: u64,
    pub next_z_index: u64,
    pub windows: Vec<WindowRecord>,
    pub start_menu_open: bool,
    pub theme: DesktopTheme,
    pub preferences: DesktopPreferences,
    pub fs: VirtualFs,
    pub clipboard: ClipboardState,
    pub faults: FaultBoundary,
    /// Desktop area reported by the shell; top-level icons are kept inside it.
    pub desktop_bounds: Option<WindowRect>,
}

impl Default for DesktopState {
    fn default() -> Self {
        Self {
            next_window_id: 1,
            next_z_index: 1,
            windows: Vec::new(),
            start_menu_open: false,
            theme: DesktopTheme::default(),
            preferences: DesktopPreferences::default(),
            fs: VirtualFs::seeded(),
            clipboard: ClipboardState::default(),
            faults: FaultBoundary::default(),
            desktop_bounds: None,
        }
    }
}

impl DesktopState {
    /// Creates a state with an empty file-system tree.
    pub fn empty() -> Self {
        Self {
            fs: VirtualFs::new(),
            ..Self::default()
        }
    }

    pub fn window(&self, window_id: WindowId) -> Option<&WindowRecord> {
        self.windows.iter().find(|w| w.id == window_id)
    }

    /// The highest non-minimized window.
    pub fn focused_window_id(&self) -> Option<WindowId> {
        self.windows
            .iter()
            .filter(|w| !w.minimized)
            .max_by_key(|w| w.z_index)
            .map(|w| w.id)
    }

    pub fn top_z_index(&self) -> Option<u64> {
        self.windows.iter().map(|w| w.z_index).max()
    }

    /// Windows ordered bottom to top.
    pub fn stacked_windows(&self) -> Vec<WindowRecord> {
        let mut windows = self.windows.clone();
        windows.sort_by_key(|w| w.z_index);
        windows
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenWindowRequest {
    pub app: AppKind,
    pub title: Option<String>,
    pub rect: Option<WindowRect>,
    pub file_path: Option<String>,
    pub launch_params: Value,
}

impl OpenWindowRequest {
    pub fn new(app: AppKind) -> Self {
        Self {
            app,
            title: None,
            rect: None,
            file_path: None,
            launch_params: Value::Null,
        }
    }

    pub fn for_path(app: AppKind, path: impl Into<String>) -> Self {
        Self {
            file_path: Some(path.into()),
            ..Self::new(app)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerPosition {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResizeEdge {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl ResizeEdge {
    pub const ALL: [ResizeEdge; 8] = [
        ResizeEdge::North,
        ResizeEdge::South,
        ResizeEdge::East,
        ResizeEdge::West,
        ResizeEdge::NorthEast,
        ResizeEdge::NorthWest,
        ResizeEdge::SouthEast,
        ResizeEdge::SouthWest,
    ];

    pub fn moves_left_edge(self) -> bool {
        matches!(self, Self::West | Self::NorthWest | Self::SouthWest)
    }

    pub fn moves_top_edge(self) -> bool {
        matches!(self, Self::North | Self::NorthEast | Self::NorthWest)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession {
    pub window_id: WindowId,
    pub pointer_start: PointerPosition,
    pub rect_start: WindowRect,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizeSession {
    pub window_id: WindowId,
    pub edge: ResizeEdge,
    pub pointer_start: PointerPosition,
    pub rect_start: WindowRect,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InteractionState {
    pub dragging: Option<DragSession>,
    pub resizing: Option<ResizeSession>,
}

impl InteractionState {
    /// Drops sessions bound to a closed window.
    pub fn forget_window(&mut self, window_id: WindowId) {
        if self
            .dragging
            .as_ref()
            .is_some_and(|session| session.window_id == window_id)
        {
            self.dragging = None;
        }
        if self
            .resizing
            .as_ref()
            .is_some_and(|session| session.window_id == window_id)
        {
            self.resizing = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn record(id: u64, z_index: u64, minimized: bool) -> WindowRecord {
        WindowRecord {
            id: WindowId(id),
            app: AppKind::TextEditor,
            title: "Text Editor".to_string(),
            icon_id: "document".to_string(),
            rect: WindowRect {
                x: 10,
                y: 20,
                w: 300,
                h: 200,
            },
            z_index,
            minimized,
            maximized: false,
            resizable: true,
            file_path: None,
            launch_params: Value::Null,
            render_epoch: 0,
        }
    }

    #[test]
    fn focused_window_skips_minimized_windows() {
        let mut state = DesktopState::empty();
        state.windows = vec![record(1, 1, false), record(2, 3, true), record(3, 2, false)];
        assert_eq!(state.focused_window_id(), Some(WindowId(3)));
        assert_eq!(state.top_z_index(), Some(3));
    }

    #[test]
    fn maximized_geometry_is_derived_from_viewport() {
        let viewport = WindowRect {
            x: 0,
            y: 0,
            w: 1024,
            h: 730,
        };
        let mut win = record(1, 1, false);
        assert_eq!(win.effective_rect(viewport), win.rect);
        win.maximized = true;
        assert_eq!(win.effective_rect(viewport), viewport);
        assert_eq!(win.rect.w, 300);
    }

    #[test]
    fn preferences_fill_missing_fields_from_defaults() {
        let prefs: DesktopPreferences =
            serde_json::from_str(r#"{"clock_24_hour":true}"#).expect("deserialize");
        assert!(prefs.clock_24_hour);
        assert_eq!(prefs.pinned_apps, DesktopPreferences::default().pinned_apps);
    }
}
