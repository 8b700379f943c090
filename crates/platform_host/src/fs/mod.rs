//! Virtual file-system tree, path helpers, and clipboard selection.

pub mod clipboard;
pub mod path;
pub mod tree;
pub mod types;
