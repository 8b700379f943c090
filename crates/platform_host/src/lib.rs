//! Typed host-domain models shared by the desktop runtime, its apps, and browser adapters.
//!
//! The crate owns the virtual file-system tree and clipboard selection, plus the preference
//! storage contract whose browser adapter lives in `platform_host_web`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod fs;
pub mod storage;

pub use fs::clipboard::{ClipboardOperation, ClipboardState};
pub use fs::path::{
    base_name, is_same_or_descendant, join_child_path, normalize_virtual_path, parent_path,
    rebase_path, split_extension,
};
pub use fs::tree::{validate_item_name, FsError, PasteOutcome, VirtualFs};
pub use fs::types::{
    icon_for, FileSystemItem, IconPosition, ItemId, ItemKind, APP_LINK_EXTENSION,
    ICON_CELL_HEIGHT, ICON_CELL_WIDTH, ICON_GRID_MARGIN, ICON_GRID_ROWS, ICON_HEIGHT, ICON_WIDTH,
    MAX_ITEM_NAME_LEN,
};
pub use storage::prefs::{
    MemoryPrefsStore, PrefKey, PrefsError, PrefsStore, PrefsStoreFuture, PREFERENCES_KEY,
    THEME_KEY,
};
