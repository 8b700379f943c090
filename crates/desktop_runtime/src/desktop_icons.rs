//! Desktop icon placement, open routing, and drag payloads.

use desktop_app_contract::AppKind;
use platform_host::{
    FileSystemItem, FsError, IconPosition, VirtualFs, ICON_CELL_HEIGHT, ICON_CELL_WIDTH,
    ICON_GRID_MARGIN, ICON_HEIGHT, ICON_WIDTH,
};
use serde::{Deserialize, Serialize};

use crate::model::WindowRect;

/// Clamps an icon's top-left corner so the whole icon box stays inside `bounds`.
pub fn clamp_icon_position(position: IconPosition, bounds: WindowRect) -> IconPosition {
    let max_x = (bounds.right() - ICON_WIDTH).max(bounds.x);
    let max_y = (bounds.bottom() - ICON_HEIGHT).max(bounds.y);
    IconPosition {
        x: position.x.clamp(bounds.x, max_x),
        y: position.y.clamp(bounds.y, max_y),
    }
}

/// Returns `true` when the whole icon box anchored at `position` lies inside `bounds`.
pub fn icon_fits(position: IconPosition, bounds: WindowRect) -> bool {
    position.x >= bounds.x
        && position.y >= bounds.y
        && position.x + ICON_WIDTH <= bounds.right()
        && position.y + ICON_HEIGHT <= bounds.bottom()
}

/// Resolves where a dropped icon lands.
///
/// The drop point is clamped into `bounds`. When the clamped box overlaps another top-level icon,
/// the nearest free grid slot inside `bounds` is used instead; if none is free the clamped point
/// is kept.
pub fn resolve_drop(
    fs: &VirtualFs,
    path: &str,
    requested: IconPosition,
    bounds: WindowRect,
) -> IconPosition {
    let clamped = clamp_icon_position(requested, bounds);
    let occupied = occupied_positions(fs, path);
    let is_free = |slot: IconPosition| !occupied.iter().any(|taken| taken.overlaps(slot));
    if is_free(clamped) {
        return clamped;
    }

    grid_slots_within(bounds)
        .filter(|slot| is_free(*slot))
        .min_by_key(|slot| distance_sq(*slot, clamped))
        .unwrap_or(clamped)
}

/// Moves every top-level icon whose box leaves `bounds` to the first free grid slot inside them.
///
/// When the grid inside `bounds` is full the icon is clamped instead. Returns the moved paths in
/// desktop order.
///
/// # Errors
///
/// Propagates [`FsError`] from storing a position.
pub fn fit_icons_within(
    fs: &mut VirtualFs,
    bounds: WindowRect,
) -> Result<Vec<String>, FsError> {
    let strays: Vec<(String, IconPosition)> = fs
        .desktop_items()
        .iter()
        .filter_map(|item| item.position.map(|position| (item.path.clone(), position)))
        .filter(|(_, position)| !icon_fits(*position, bounds))
        .collect();

    let mut moved = Vec::with_capacity(strays.len());
    for (path, position) in strays {
        let occupied = occupied_positions(fs, &path);
        let landed = grid_slots_within(bounds)
            .find(|slot| !occupied.iter().any(|taken| taken.overlaps(*slot)))
            .unwrap_or_else(|| clamp_icon_position(position, bounds));
        fs.set_position(&path, landed)?;
        moved.push(path);
    }
    Ok(moved)
}

fn occupied_positions(fs: &VirtualFs, except: &str) -> Vec<IconPosition> {
    fs.desktop_items()
        .iter()
        .filter(|item| item.path != except)
        .filter_map(|item| item.position)
        .collect()
}

fn grid_slots_within(bounds: WindowRect) -> impl Iterator<Item = IconPosition> {
    let columns = ((bounds.w - ICON_GRID_MARGIN - ICON_WIDTH) / ICON_CELL_WIDTH + 1).max(1);
    let rows = ((bounds.h - ICON_GRID_MARGIN - ICON_HEIGHT) / ICON_CELL_HEIGHT + 1).max(1);
    (0..columns).flat_map(move |col| {
        (0..rows).map(move |row| IconPosition {
            x: bounds.x + ICON_GRID_MARGIN + col * ICON_CELL_WIDTH,
            y: bounds.y + ICON_GRID_MARGIN + row * ICON_CELL_HEIGHT,
        })
    })
}

fn distance_sq(a: IconPosition, b: IconPosition) -> i64 {
    let dx = i64::from(a.x - b.x);
    let dy = i64::from(a.y - b.y);
    dx * dx + dy * dy
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// What double-click or Enter/Space on an item opens.
pub enum OpenTarget {
    /// Browse a folder.
    Folder {
        /// Folder path.
        path: String,
    },
    /// Launch an app named by an app-link file.
    App(AppKind),
    /// Open a file in the app its extension maps to.
    File {
        /// Viewer or editor.
        app: AppKind,
        /// File path.
        path: String,
    },
}

/// Routes an item to the app that should open it.
pub fn open_target(item: &FileSystemItem) -> OpenTarget {
    if item.is_folder() {
        return OpenTarget::Folder {
            path: item.path.clone(),
        };
    }
    if let Some(app) = item.app_link_tag().and_then(AppKind::from_tag) {
        return OpenTarget::App(app);
    }
    OpenTarget::File {
        app: AppKind::for_extension(item.extension().as_deref()),
        path: item.path.clone(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// App description carried by a desktop-app drag.
pub struct AppInfo {
    pub name: String,
    pub component: AppKind,
    pub icon: String,
}

impl AppInfo {
    pub fn for_app(app: AppKind) -> Self {
        Self {
            name: app.title().to_string(),
            component: app,
            icon: app.icon_id().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
/// Structured drag payload.
pub enum DragPayload {
    /// An app icon dragged toward the taskbar for pinning.
    #[serde(rename = "desktop-app")]
    DesktopApp {
        #[serde(rename = "appInfo")]
        app_info: AppInfo,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Decoded drag data.
pub enum DragData {
    /// A structured payload.
    Payload(DragPayload),
    /// Plain-text item path for repositioning.
    ItemPath(String),
}

impl DragPayload {
    /// Builds the app payload for an app-link item.
    pub fn for_item(item: &FileSystemItem) -> Option<Self> {
        let app = item.app_link_tag().and_then(AppKind::from_tag)?;
        Some(Self::DesktopApp {
            app_info: AppInfo::for_app(app),
        })
    }

    /// Serializes the payload for a `DataTransfer` slot.
    ///
    /// # Errors
    ///
    /// Returns the JSON serialization error.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Decodes drag text: a JSON payload when it parses as one, otherwise an item path.
pub fn parse_drag_data(raw: &str) -> Option<DragData> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if raw.starts_with('{') {
        return serde_json::from_str::<DragPayload>(raw)
            .ok()
            .map(DragData::Payload);
    }
    Some(DragData::ItemPath(raw.to_string()))
}
