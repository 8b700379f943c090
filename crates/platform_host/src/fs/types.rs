//! Virtual file-system data types shared by the desktop runtime and its apps.

use serde::{Deserialize, Serialize};

use super::path::split_extension;

/// Maximum accepted length (in characters) for a file or folder name.
pub const MAX_ITEM_NAME_LEN: usize = 255;
/// Width of the box a desktop icon occupies.
pub const ICON_WIDTH: i32 = 80;
/// Height of the box a desktop icon occupies.
pub const ICON_HEIGHT: i32 = 88;
/// Horizontal pitch of the default icon grid.
pub const ICON_CELL_WIDTH: i32 = 96;
/// Vertical pitch of the default icon grid.
pub const ICON_CELL_HEIGHT: i32 = 100;
/// Icons per column before the default grid wraps to the next column.
pub const ICON_GRID_ROWS: i32 = 6;
/// Margin between the desktop edge and the first grid slot.
pub const ICON_GRID_MARGIN: i32 = 16;
/// Extension used by desktop app-link files.
pub const APP_LINK_EXTENSION: &str = "app";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
/// Stable identifier assigned to every tree item at creation.
pub struct ItemId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Item kind.
pub enum ItemKind {
    /// Leaf item with optional text content.
    File,
    /// Container item with ordered children.
    Folder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
/// Top-left placement of a desktop icon, in desktop pixels.
pub struct IconPosition {
    /// Horizontal offset.
    pub x: i32,
    /// Vertical offset.
    pub y: i32,
}

impl IconPosition {
    /// Returns the top-left corner of grid slot `index` (column-major).
    pub fn grid_slot(index: i32) -> Self {
        Self {
            x: ICON_GRID_MARGIN + (index / ICON_GRID_ROWS) * ICON_CELL_WIDTH,
            y: ICON_GRID_MARGIN + (index % ICON_GRID_ROWS) * ICON_CELL_HEIGHT,
        }
    }

    /// Returns `true` when the icon boxes anchored at `self` and `other` intersect.
    pub fn overlaps(self, other: Self) -> bool {
        (self.x - other.x).abs() < ICON_WIDTH && (self.y - other.y).abs() < ICON_HEIGHT
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// A file or folder in the virtual tree.
pub struct FileSystemItem {
    /// Identifier assigned at creation; copies receive fresh ids.
    pub id: ItemId,
    /// Base name, unique among siblings.
    pub name: String,
    /// File or folder.
    pub kind: ItemKind,
    /// Full path derived from the parent path and `name`.
    pub path: String,
    /// Icon token used by the shell.
    pub icon: String,
    /// Text content for files and app links.
    pub content: Option<String>,
    /// Ordered children (always empty for files).
    pub children: Vec<FileSystemItem>,
    /// Desktop placement; only top-level items carry one.
    pub position: Option<IconPosition>,
}

impl FileSystemItem {
    /// Returns `true` for folders.
    pub fn is_folder(&self) -> bool {
        self.kind == ItemKind::Folder
    }

    /// Returns the lowercase extension of a file name, if any.
    pub fn extension(&self) -> Option<String> {
        if self.is_folder() {
            return None;
        }
        split_extension(&self.name).1.map(str::to_ascii_lowercase)
    }

    /// Returns the app tag stored in an app-link file.
    pub fn app_link_tag(&self) -> Option<&str> {
        if self.extension().as_deref() != Some(APP_LINK_EXTENSION) {
            return None;
        }
        self.content
            .as_deref()
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
    }

    /// Number of items in this subtree, including `self`.
    pub fn subtree_len(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(FileSystemItem::subtree_len)
            .sum::<usize>()
    }
}

/// Picks the icon token for an item from its kind and extension.
pub fn icon_for(name: &str, kind: ItemKind) -> &'static str {
    if kind == ItemKind::Folder {
        return "folder";
    }
    let ext = split_extension(name).1.map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("app") => "app",
        Some("png" | "jpg" | "jpeg" | "gif" | "svg" | "webp" | "bmp") => "image",
        Some("txt" | "md" | "log" | "csv") => "document",
        Some("rs" | "toml" | "json" | "js" | "ts" | "css" | "html") => "code",
        _ => "file",
    }
}
