//! Browser implementations of [`platform_host`] service contracts.
//!
//! The desktop needs two browser services: preference storage and the viewport size. The
//! file-system tree and clipboard live in memory for the session.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod storage;
pub mod viewport;

pub use storage::local_prefs::WebPrefsStore;
pub use viewport::viewport_size;

/// Returns the preference store the desktop runtime uses by default.
///
/// Browser builds write to `window.localStorage`; other targets keep values in memory so native
/// test runs still observe their own writes.
pub fn prefs_store() -> WebPrefsStore {
    WebPrefsStore::default()
}
