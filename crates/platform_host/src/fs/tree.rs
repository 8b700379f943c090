//! In-memory folder/file tree with path lookup, CRUD, and clipboard paste.
//!
//! Every mutation validates its inputs before touching the tree, so a failed call leaves the tree
//! exactly as it was.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{
    clipboard::{ClipboardOperation, ClipboardState},
    path::{
        is_same_or_descendant, join_child_path, normalize_virtual_path, parent_path,
        split_extension,
    },
    types::{icon_for, FileSystemItem, IconPosition, ItemId, ItemKind, MAX_ITEM_NAME_LEN},
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Errors reported by [`VirtualFs`] operations.
pub enum FsError {
    /// No item exists at the path.
    #[error("no item at `{path}`")]
    NotFound {
        /// Requested path.
        path: String,
    },
    /// The path names a file where a folder is required.
    #[error("`{path}` is not a folder")]
    NotAFolder {
        /// Requested path.
        path: String,
    },
    /// The path names a folder where a file is required.
    #[error("`{path}` is not a file")]
    NotAFile {
        /// Requested path.
        path: String,
    },
    /// A sibling with the same name already exists.
    #[error("an item named `{name}` already exists in `{parent}`")]
    NameCollision {
        /// Folder holding the clashing sibling.
        parent: String,
        /// Clashing name.
        name: String,
    },
    /// The name is empty after trimming.
    #[error("name cannot be empty")]
    EmptyName,
    /// The name exceeds [`MAX_ITEM_NAME_LEN`].
    #[error("name cannot be longer than {max} characters")]
    NameTooLong {
        /// Maximum accepted length.
        max: usize,
    },
    /// The name contains a path separator.
    #[error("name cannot contain `{ch}`")]
    InvalidCharacter {
        /// Offending character.
        ch: char,
    },
    /// The name is `.` or `..`.
    #[error("`{name}` is a reserved name")]
    ReservedName {
        /// Offending name.
        name: String,
    },
    /// The root folder cannot be renamed, removed, or moved.
    #[error("the root folder cannot be changed")]
    RootImmutable,
    /// A folder cannot be pasted into itself or one of its descendants.
    #[error("cannot paste `{path}` into itself")]
    InvalidDestination {
        /// Source folder path.
        path: String,
    },
    /// Only top-level items have desktop positions.
    #[error("`{path}` is not a desktop item")]
    NotTopLevel {
        /// Requested path.
        path: String,
    },
}

/// Validates and trims a user-supplied item name.
///
/// # Errors
///
/// Returns a validation [`FsError`] for empty, overlong, reserved, or separator-bearing names.
pub fn validate_item_name(name: &str) -> Result<String, FsError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(FsError::EmptyName);
    }
    if name.chars().count() > MAX_ITEM_NAME_LEN {
        return Err(FsError::NameTooLong {
            max: MAX_ITEM_NAME_LEN,
        });
    }
    if let Some(ch) = name.chars().find(|ch| matches!(ch, '/' | '\\')) {
        return Err(FsError::InvalidCharacter { ch });
    }
    if name == "." || name == ".." {
        return Err(FsError::ReservedName {
            name: name.to_string(),
        });
    }
    Ok(name.to_string())
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
/// Paths produced and skipped by [`VirtualFs::paste`].
pub struct PasteOutcome {
    /// Destination paths of placed items.
    pub pasted: Vec<String>,
    /// Clipboard sources that no longer exist.
    pub skipped: Vec<String>,
    /// `(from, to)` pairs for items a cut relocated.
    pub moved: Vec<(String, String)>,
}

const SEED_FOLDERS: [&str; 4] = ["Desktop", "Documents", "Projects", "Pictures"];

const SEED_FILES: [(&str, &str, &str); 7] = [
    (
        "/",
        "welcome.txt",
        "Welcome!\n\nDouble-click an icon to open it. Drag icons to rearrange the desktop.",
    ),
    ("/", "Calculator.app", "calculator"),
    ("/", "Terminal.app", "terminal"),
    ("/", "Settings.app", "settings"),
    ("/", "Contact.app", "contact"),
    (
        "/Documents",
        "readme.txt",
        "Files live in memory for the current session.",
    ),
    (
        "/Projects",
        "roadmap.md",
        "# Roadmap\n\n- window snapping\n- themes\n",
    ),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Virtual file-system tree rooted at `/`.
pub struct VirtualFs {
    root: FileSystemItem,
    next_item_id: u64,
}

impl Default for VirtualFs {
    fn default() -> Self {
        Self::new()
    }
}

impl VirtualFs {
    /// Creates a tree containing only the root folder.
    pub fn new() -> Self {
        Self {
            root: FileSystemItem {
                id: ItemId(0),
                name: String::new(),
                kind: ItemKind::Folder,
                path: "/".to_string(),
                icon: "folder".to_string(),
                content: None,
                children: Vec::new(),
                position: None,
            },
            next_item_id: 1,
        }
    }

    /// Creates the startup tree shown on a fresh desktop.
    pub fn seeded() -> Self {
        let mut fs = Self::new();
        for folder in SEED_FOLDERS {
            if let Err(err) = fs.create_folder("/", folder) {
                debug_assert!(false, "seed folder `{folder}` rejected: {err}");
            }
        }
        for (parent, name, content) in SEED_FILES {
            if let Err(err) = fs.create_file(parent, name, Some(content.to_string())) {
                debug_assert!(false, "seed file `{name}` rejected: {err}");
            }
        }
        fs
    }

    /// Returns the root folder.
    pub fn root(&self) -> &FileSystemItem {
        &self.root
    }

    /// Returns the top-level items rendered as desktop icons.
    pub fn desktop_items(&self) -> &[FileSystemItem] {
        &self.root.children
    }

    /// Number of items in the tree, excluding the root.
    pub fn len(&self) -> usize {
        self.root.subtree_len() - 1
    }

    /// Returns `true` when the tree holds nothing but the root.
    pub fn is_empty(&self) -> bool {
        self.root.children.is_empty()
    }

    /// Looks up an item by path.
    pub fn get(&self, path: &str) -> Option<&FileSystemItem> {
        let path = normalize_virtual_path(path);
        let mut node = &self.root;
        for segment in path.split('/').filter(|segment| !segment.is_empty()) {
            node = node.children.iter().find(|child| child.name == segment)?;
        }
        Some(node)
    }

    fn get_mut(&mut self, path: &str) -> Option<&mut FileSystemItem> {
        let path = normalize_virtual_path(path);
        let mut node = &mut self.root;
        for segment in path.split('/').filter(|segment| !segment.is_empty()) {
            node = node
                .children
                .iter_mut()
                .find(|child| child.name == segment)?;
        }
        Some(node)
    }

    /// Returns `true` when an item exists at `path`.
    pub fn exists(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    /// Returns the children of a folder.
    ///
    /// # Errors
    ///
    /// Returns [`FsError::NotFound`] or [`FsError::NotAFolder`].
    pub fn children(&self, path: &str) -> Result<&[FileSystemItem], FsError> {
        Ok(&self.folder(path)?.children)
    }

    fn folder(&self, path: &str) -> Result<&FileSystemItem, FsError> {
        let item = self.get(path).ok_or_else(|| FsError::NotFound {
            path: normalize_virtual_path(path),
        })?;
        if !item.is_folder() {
            return Err(FsError::NotAFolder {
                path: item.path.clone(),
            });
        }
        Ok(item)
    }

    /// Creates a file under `parent` and returns its path.
    ///
    /// # Errors
    ///
    /// Fails on invalid names, a missing or non-folder parent, or a sibling name collision.
    pub fn create_file(
        &mut self,
        parent: &str,
        name: &str,
        content: Option<String>,
    ) -> Result<String, FsError> {
        self.insert_new(parent, name, ItemKind::File, Some(content.unwrap_or_default()))
    }

    /// Creates a folder under `parent` and returns its path.
    ///
    /// # Errors
    ///
    /// Fails on invalid names, a missing or non-folder parent, or a sibling name collision.
    pub fn create_folder(&mut self, parent: &str, name: &str) -> Result<String, FsError> {
        self.insert_new(parent, name, ItemKind::Folder, None)
    }

    fn insert_new(
        &mut self,
        parent: &str,
        name: &str,
        kind: ItemKind,
        content: Option<String>,
    ) -> Result<String, FsError> {
        let name = validate_item_name(name)?;
        let parent = normalize_virtual_path(parent);
        let folder = self.folder(&parent)?;
        if folder.children.iter().any(|child| child.name == name) {
            return Err(FsError::NameCollision { parent, name });
        }

        let position = (parent == "/").then(|| self.next_free_icon_slot(None));
        let item = FileSystemItem {
            id: self.allocate_id(),
            path: join_child_path(&parent, &name),
            icon: icon_for(&name, kind).to_string(),
            name,
            kind,
            content,
            children: Vec::new(),
            position,
        };
        let path = item.path.clone();
        self.push_child(&parent, item)?;
        Ok(path)
    }

    /// Renames an item and re-derives the paths of its descendants. Returns the new path.
    ///
    /// Renaming to the current name is a no-op.
    ///
    /// # Errors
    ///
    /// Fails on invalid names, the root, a missing item, or a sibling name collision.
    pub fn rename(&mut self, path: &str, new_name: &str) -> Result<String, FsError> {
        let path = normalize_virtual_path(path);
        let parent = parent_path(&path).ok_or(FsError::RootImmutable)?;
        let name = validate_item_name(new_name)?;
        let item = self
            .get(&path)
            .ok_or_else(|| FsError::NotFound { path: path.clone() })?;
        if item.name == name {
            return Ok(path);
        }
        if self
            .children(&parent)?
            .iter()
            .any(|sibling| sibling.name == name)
        {
            return Err(FsError::NameCollision { parent, name });
        }

        let new_path = join_child_path(&parent, &name);
        let item = self
            .get_mut(&path)
            .ok_or_else(|| FsError::NotFound { path: path.clone() })?;
        item.icon = icon_for(&name, item.kind).to_string();
        item.name = name;
        rebase_subtree(item, &new_path);
        Ok(new_path)
    }

    /// Removes the subtree rooted at `path` and returns it.
    ///
    /// # Errors
    ///
    /// Fails for the root or a missing item.
    pub fn remove(&mut self, path: &str) -> Result<FileSystemItem, FsError> {
        let path = normalize_virtual_path(path);
        let parent = parent_path(&path).ok_or(FsError::RootImmutable)?;
        let not_found = || FsError::NotFound { path: path.clone() };
        let folder = self.get_mut(&parent).ok_or_else(not_found)?;
        let index = folder
            .children
            .iter()
            .position(|child| child.path == path)
            .ok_or_else(not_found)?;
        Ok(folder.children.remove(index))
    }

    /// Replaces the text content of a file.
    ///
    /// # Errors
    ///
    /// Fails for a missing path or a folder.
    pub fn write_file(&mut self, path: &str, content: String) -> Result<(), FsError> {
        let path = normalize_virtual_path(path);
        let item = self
            .get_mut(&path)
            .ok_or_else(|| FsError::NotFound { path: path.clone() })?;
        if item.is_folder() {
            return Err(FsError::NotAFile { path });
        }
        item.content = Some(content);
        Ok(())
    }

    /// Stores the desktop position of a top-level item. The caller clamps the position.
    ///
    /// # Errors
    ///
    /// Fails for a missing item or one that is not at the top level.
    pub fn set_position(&mut self, path: &str, position: IconPosition) -> Result<(), FsError> {
        let path = normalize_virtual_path(path);
        if parent_path(&path).as_deref() != Some("/") {
            return Err(FsError::NotTopLevel { path });
        }
        let item = self
            .get_mut(&path)
            .ok_or_else(|| FsError::NotFound { path: path.clone() })?;
        item.position = Some(position);
        Ok(())
    }

    /// Returns the first default grid slot not overlapped by another desktop icon.
    ///
    /// `except` excludes one item (the one being placed) from the occupancy check.
    pub fn next_free_icon_slot(&self, except: Option<&str>) -> IconPosition {
        let occupied: Vec<IconPosition> = self
            .root
            .children
            .iter()
            .filter(|item| Some(item.path.as_str()) != except)
            .filter_map(|item| item.position)
            .collect();
        // An arbitrary position overlaps at most four grid slots.
        let limit = occupied.len() as i32 * 4;
        (0..=limit)
            .map(IconPosition::grid_slot)
            .find(|slot| !occupied.iter().any(|taken| taken.overlaps(*slot)))
            .unwrap_or_else(|| IconPosition::grid_slot(limit + 1))
    }

    /// Returns a sibling-unique name derived from `name` by suffixing ` (2)`, ` (3)`, ...
    pub fn unique_child_name(&self, parent: &str, name: &str, kind: ItemKind) -> String {
        let taken = |candidate: &str| {
            self.get(parent)
                .map(|folder| folder.children.iter().any(|child| child.name == candidate))
                .unwrap_or(false)
        };
        if !taken(name) {
            return name.to_string();
        }
        let (stem, ext) = match kind {
            ItemKind::File => split_extension(name),
            ItemKind::Folder => (name, None),
        };
        (2u32..)
            .map(|n| match ext {
                Some(ext) => format!("{stem} ({n}).{ext}"),
                None => format!("{stem} ({n})"),
            })
            .find(|candidate| !taken(candidate))
            .unwrap_or_else(|| name.to_string())
    }

    /// Places every clipboard source under `destination`.
    ///
    /// Copies get fresh ids; cuts keep them and remove the source once the item is placed. Name
    /// collisions at the destination are resolved with [`VirtualFs::unique_child_name`]. A cut
    /// into the source's own parent leaves the item where it is. Sources that no longer exist are
    /// reported in [`PasteOutcome::skipped`].
    ///
    /// # Errors
    ///
    /// Fails without mutating anything when the destination is missing or not a folder, or when a
    /// folder would be pasted into itself.
    pub fn paste(
        &mut self,
        clipboard: &ClipboardState,
        destination: &str,
    ) -> Result<PasteOutcome, FsError> {
        let destination = normalize_virtual_path(destination);
        self.folder(&destination)?;

        let mut outcome = PasteOutcome::default();
        if clipboard.is_empty() {
            return Ok(outcome);
        }

        let mut sources = Vec::new();
        for raw in &clipboard.items {
            let source = normalize_virtual_path(raw);
            if source == "/" {
                return Err(FsError::RootImmutable);
            }
            if !self.exists(&source) {
                outcome.skipped.push(source);
                continue;
            }
            if is_same_or_descendant(&destination, &source) {
                return Err(FsError::InvalidDestination { path: source });
            }
            sources.push(source);
        }

        for source in sources {
            // An earlier cut may already have carried this source along with its ancestor.
            let Some(item) = self.get(&source) else {
                outcome.skipped.push(source);
                continue;
            };
            let cut = clipboard.operation == ClipboardOperation::Cut;
            if cut && parent_path(&source).as_deref() == Some(destination.as_str()) {
                outcome.pasted.push(source);
                continue;
            }

            let name = self.unique_child_name(&destination, &item.name, item.kind);
            let mut placed = item.clone();
            if !cut {
                self.reassign_ids(&mut placed);
            }
            let new_path = join_child_path(&destination, &name);
            placed.icon = icon_for(&name, placed.kind).to_string();
            placed.name = name;
            rebase_subtree(&mut placed, &new_path);
            placed.position = (destination == "/").then(|| self.next_free_icon_slot(None));

            self.push_child(&destination, placed)?;
            if cut {
                self.remove(&source)?;
                outcome.moved.push((source, new_path.clone()));
            }
            outcome.pasted.push(new_path);
        }

        Ok(outcome)
    }

    fn push_child(&mut self, parent: &str, item: FileSystemItem) -> Result<(), FsError> {
        let folder = self.get_mut(parent).ok_or_else(|| FsError::NotFound {
            path: parent.to_string(),
        })?;
        folder.children.push(item);
        Ok(())
    }

    fn allocate_id(&mut self) -> ItemId {
        let id = ItemId(self.next_item_id);
        self.next_item_id = self.next_item_id.saturating_add(1);
        id
    }

    fn reassign_ids(&mut self, item: &mut FileSystemItem) {
        item.id = self.allocate_id();
        for child in &mut item.children {
            self.reassign_ids(child);
        }
    }
}

fn rebase_subtree(item: &mut FileSystemItem, new_path: &str) {
    item.path = new_path.to_string();
    for child in &mut item.children {
        let child_path = join_child_path(new_path, &child.name);
        rebase_subtree(child, &child_path);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn tree() -> VirtualFs {
        let mut fs = VirtualFs::new();
        fs.create_folder("/", "Desktop").expect("desktop");
        fs.create_folder("/", "Projects").expect("projects");
        fs
    }

    fn all_paths(item: &FileSystemItem, out: &mut Vec<String>) {
        out.push(item.path.clone());
        for child in &item.children {
            all_paths(child, out);
        }
    }

    #[test]
    fn create_file_twice_reports_collision_and_leaves_tree_unchanged() {
        let mut fs = tree();
        let path = fs
            .create_file("/Desktop", "a.txt", Some("hello".to_string()))
            .expect("first create");
        assert_eq!(path, "/Desktop/a.txt");

        let before = fs.clone();
        let err = fs
            .create_file("/Desktop", "a.txt", None)
            .expect_err("second create collides");
        assert_eq!(
            err,
            FsError::NameCollision {
                parent: "/Desktop".to_string(),
                name: "a.txt".to_string(),
            }
        );
        assert_eq!(fs, before);
    }

    #[test]
    fn create_rejects_invalid_names_and_missing_parents() {
        let mut fs = tree();
        assert_eq!(fs.create_folder("/", "  "), Err(FsError::EmptyName));
        assert_eq!(
            fs.create_folder("/", "a/b"),
            Err(FsError::InvalidCharacter { ch: '/' })
        );
        assert_eq!(
            fs.create_file("/", r"notes\today.txt", None),
            Err(FsError::InvalidCharacter { ch: '\\' })
        );
        for reserved in [".", " .. "] {
            assert_eq!(
                fs.create_folder("/", reserved),
                Err(FsError::ReservedName {
                    name: reserved.trim().to_string()
                })
            );
        }
        assert_eq!(
            fs.rename("/Desktop", ".."),
            Err(FsError::ReservedName {
                name: "..".to_string()
            })
        );
        assert_eq!(
            fs.create_file("/", &"x".repeat(MAX_ITEM_NAME_LEN + 1), None),
            Err(FsError::NameTooLong {
                max: MAX_ITEM_NAME_LEN
            })
        );
        assert_eq!(
            fs.create_file("/Nope", "a.txt", None),
            Err(FsError::NotFound {
                path: "/Nope".to_string()
            })
        );
        fs.create_file("/", "a.txt", None).expect("file");
        assert_eq!(
            fs.create_file("/a.txt", "b.txt", None),
            Err(FsError::NotAFolder {
                path: "/a.txt".to_string()
            })
        );
    }

    #[test]
    fn ids_are_fresh_and_paths_are_unique() {
        let fs = VirtualFs::seeded();
        let mut paths = Vec::new();
        all_paths(fs.root(), &mut paths);
        let mut deduped = paths.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(paths.len(), deduped.len());
        assert_eq!(fs.len() + 1, paths.len());
    }

    #[test]
    fn top_level_items_get_non_overlapping_positions() {
        let fs = VirtualFs::seeded();
        let positions: Vec<IconPosition> = fs
            .desktop_items()
            .iter()
            .map(|item| item.position.expect("top-level position"))
            .collect();
        for (i, a) in positions.iter().enumerate() {
            for b in positions.iter().skip(i + 1) {
                assert!(!a.overlaps(*b), "{a:?} overlaps {b:?}");
            }
        }
        let nested = fs.get("/Documents/readme.txt").expect("readme");
        assert_eq!(nested.position, None);
    }

    #[test]
    fn rename_rederives_descendant_paths() {
        let mut fs = tree();
        fs.create_folder("/Projects", "site").expect("folder");
        fs.create_file("/Projects/site", "index.html", None)
            .expect("file");

        let new_path = fs.rename("/Projects", "Work").expect("rename");
        assert_eq!(new_path, "/Work");
        assert!(!fs.exists("/Projects"));
        let file = fs.get("/Work/site/index.html").expect("moved file");
        assert_eq!(file.path, "/Work/site/index.html");
    }

    #[test]
    fn rename_collision_and_same_name() {
        let mut fs = tree();
        let before = fs.clone();
        assert_eq!(
            fs.rename("/Desktop", "Projects"),
            Err(FsError::NameCollision {
                parent: "/".to_string(),
                name: "Projects".to_string(),
            })
        );
        assert_eq!(fs, before);
        assert_eq!(fs.rename("/Desktop", "Desktop"), Ok("/Desktop".to_string()));
        assert_eq!(fs.rename("/", "x"), Err(FsError::RootImmutable));
    }

    #[test]
    fn remove_deletes_whole_subtree() {
        let mut fs = tree();
        fs.create_file("/Projects", "a.txt", None).expect("file");
        let removed = fs.remove("/Projects").expect("remove");
        assert_eq!(removed.subtree_len(), 2);
        assert!(!fs.exists("/Projects/a.txt"));
        assert_eq!(
            fs.remove("/Projects"),
            Err(FsError::NotFound {
                path: "/Projects".to_string()
            })
        );
    }

    #[test]
    fn cut_paste_moves_item_with_identical_content() {
        let mut fs = tree();
        fs.create_file("/Desktop", "a.txt", Some("payload".to_string()))
            .expect("file");
        let original_id = fs.get("/Desktop/a.txt").expect("file").id;

        let clipboard = ClipboardState::cut(["/Desktop/a.txt"]);
        let outcome = fs.paste(&clipboard, "/Projects").expect("paste");

        assert_eq!(outcome.pasted, vec!["/Projects/a.txt".to_string()]);
        assert_eq!(
            outcome.moved,
            vec![("/Desktop/a.txt".to_string(), "/Projects/a.txt".to_string())]
        );
        assert!(!fs.exists("/Desktop/a.txt"));
        let moved = fs.get("/Projects/a.txt").expect("moved");
        assert_eq!(moved.content.as_deref(), Some("payload"));
        assert_eq!(moved.id, original_id);
    }

    #[test]
    fn copy_paste_suffixes_collisions_and_assigns_fresh_ids() {
        let mut fs = tree();
        fs.create_file("/Desktop", "a.txt", Some("one".to_string()))
            .expect("file");
        let clipboard = ClipboardState::copy(["/Desktop/a.txt"]);

        fs.paste(&clipboard, "/Desktop").expect("first paste");
        let outcome = fs.paste(&clipboard, "/Desktop").expect("second paste");

        assert_eq!(outcome.pasted, vec!["/Desktop/a (3).txt".to_string()]);
        let original = fs.get("/Desktop/a.txt").expect("original");
        let copy = fs.get("/Desktop/a (2).txt").expect("copy");
        assert_ne!(original.id, copy.id);
        assert_eq!(copy.content.as_deref(), Some("one"));
    }

    #[test]
    fn copy_paste_of_folder_copies_subtree_with_rebased_paths() {
        let mut fs = tree();
        fs.create_folder("/Projects", "site").expect("folder");
        fs.create_file("/Projects/site", "index.html", None)
            .expect("file");

        fs.paste(&ClipboardState::copy(["/Projects/site"]), "/Desktop")
            .expect("paste");
        let copied = fs.get("/Desktop/site/index.html").expect("copied child");
        assert_eq!(copied.path, "/Desktop/site/index.html");
        assert!(fs.exists("/Projects/site/index.html"));
    }

    #[test]
    fn paste_into_own_subtree_is_rejected_without_changes() {
        let mut fs = tree();
        fs.create_folder("/Projects", "inner").expect("folder");
        let before = fs.clone();

        let err = fs
            .paste(&ClipboardState::cut(["/Projects"]), "/Projects/inner")
            .expect_err("cannot paste into itself");
        assert_eq!(
            err,
            FsError::InvalidDestination {
                path: "/Projects".to_string()
            }
        );
        assert_eq!(fs, before);
    }

    #[test]
    fn paste_skips_missing_sources_and_keeps_cut_in_same_parent() {
        let mut fs = tree();
        fs.create_file("/Desktop", "a.txt", None).expect("file");
        let clipboard = ClipboardState::cut(["/Desktop/a.txt", "/Desktop/gone.txt"]);

        let outcome = fs.paste(&clipboard, "/Desktop").expect("paste");
        assert_eq!(outcome.pasted, vec!["/Desktop/a.txt".to_string()]);
        assert_eq!(outcome.skipped, vec!["/Desktop/gone.txt".to_string()]);
        assert!(fs.exists("/Desktop/a.txt"));
    }

    #[test]
    fn items_moved_to_top_level_gain_positions_and_lose_them_when_leaving() {
        let mut fs = tree();
        fs.create_file("/Desktop", "a.txt", None).expect("file");
        fs.paste(&ClipboardState::cut(["/Desktop/a.txt"]), "/")
            .expect("to top level");
        assert!(fs.get("/a.txt").and_then(|item| item.position).is_some());

        fs.paste(&ClipboardState::cut(["/a.txt"]), "/Projects")
            .expect("back down");
        assert_eq!(fs.get("/Projects/a.txt").and_then(|item| item.position), None);
    }

    #[test]
    fn set_position_only_applies_to_top_level_items() {
        let mut fs = tree();
        fs.create_file("/Desktop", "a.txt", None).expect("file");
        let position = IconPosition { x: 300, y: 200 };
        fs.set_position("/Desktop", position).expect("top level");
        assert_eq!(fs.get("/Desktop").and_then(|item| item.position), Some(position));
        assert_eq!(
            fs.set_position("/Desktop/a.txt", position),
            Err(FsError::NotTopLevel {
                path: "/Desktop/a.txt".to_string()
            })
        );
    }

    #[test]
    fn write_file_replaces_content_and_rejects_folders() {
        let mut fs = tree();
        fs.create_file("/Desktop", "a.txt", None).expect("file");
        fs.write_file("/Desktop/a.txt", "new".to_string())
            .expect("write");
        assert_eq!(
            fs.get("/Desktop/a.txt").and_then(|item| item.content.clone()),
            Some("new".to_string())
        );
        assert_eq!(
            fs.write_file("/Desktop", String::new()),
            Err(FsError::NotAFile {
                path: "/Desktop".to_string()
            })
        );
    }

    #[test]
    fn seeded_tree_contains_app_links() {
        let fs = VirtualFs::seeded();
        let link = fs.get("/Calculator.app").expect("calculator link");
        assert_eq!(link.app_link_tag(), Some("calculator"));
        assert_eq!(link.icon, "app");
        assert!(fs.get("/Desktop").map(FileSystemItem::is_folder).unwrap_or(false));
    }
}
