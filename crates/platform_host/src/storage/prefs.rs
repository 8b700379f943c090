//! Preference storage contract and the in-memory adapter.
//!
//! A store keeps raw JSON text per key. [`PrefKey`] binds a key name to the value type stored
//! under it, so the desktop reads and writes its theme and shell preferences without repeating
//! the key string or the serde calls at each call site.

use std::{
    cell::RefCell, collections::HashMap, future::Future, marker::PhantomData, pin::Pin, rc::Rc,
};

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

/// Key holding the serialized desktop theme.
pub const THEME_KEY: &str = "webdesk.theme.v1";
/// Key holding the serialized shell preferences (clock format, pinned apps).
pub const PREFERENCES_KEY: &str = "webdesk.preferences.v1";

/// Object-safe boxed future used by [`PrefsStore`] async methods.
pub type PrefsStoreFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Host service holding raw preference JSON per key.
pub trait PrefsStore {
    /// Loads the raw JSON stored under `key`.
    fn load_pref<'a>(
        &'a self,
        key: &'a str,
    ) -> PrefsStoreFuture<'a, Result<Option<String>, String>>;

    /// Replaces the raw JSON stored under `key`.
    fn save_pref<'a>(
        &'a self,
        key: &'a str,
        raw_json: &'a str,
    ) -> PrefsStoreFuture<'a, Result<(), String>>;
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Failure reading or writing a typed preference.
pub enum PrefsError {
    /// The backing store rejected the call.
    #[error("preference store failed for `{key}`: {message}")]
    Store {
        /// Preference key.
        key: &'static str,
        /// Store error text.
        message: String,
    },
    /// The stored text is not a valid value for the key.
    #[error("stored value for `{key}` is malformed: {message}")]
    Malformed {
        /// Preference key.
        key: &'static str,
        /// Decoder error text.
        message: String,
    },
    /// The value could not be encoded.
    #[error("value for `{key}` could not be encoded: {message}")]
    Encode {
        /// Preference key.
        key: &'static str,
        /// Encoder error text.
        message: String,
    },
}

/// A preference key bound to the type stored under it.
pub struct PrefKey<T> {
    name: &'static str,
    value: PhantomData<fn() -> T>,
}

impl<T> Clone for PrefKey<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for PrefKey<T> {}

impl<T> std::fmt::Debug for PrefKey<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("PrefKey").field(&self.name).finish()
    }
}

impl<T> PrefKey<T> {
    /// Binds `name` to `T`.
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            value: PhantomData,
        }
    }

    /// Storage key name.
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl<T: DeserializeOwned> PrefKey<T> {
    /// Loads and decodes the stored value; `Ok(None)` when nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns [`PrefsError::Store`] when the store fails and [`PrefsError::Malformed`] when the
    /// stored text does not decode as `T`.
    pub async fn load<S: PrefsStore + ?Sized>(self, store: &S) -> Result<Option<T>, PrefsError> {
        let raw = store
            .load_pref(self.name)
            .await
            .map_err(|message| PrefsError::Store {
                key: self.name,
                message,
            })?;
        let Some(raw) = raw else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|err| PrefsError::Malformed {
                key: self.name,
                message: err.to_string(),
            })
    }
}

impl<T: Serialize> PrefKey<T> {
    /// Encodes `value` and stores it, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`PrefsError::Encode`] or [`PrefsError::Store`].
    pub async fn save<S: PrefsStore + ?Sized>(
        self,
        store: &S,
        value: &T,
    ) -> Result<(), PrefsError> {
        let raw = serde_json::to_string(value).map_err(|err| PrefsError::Encode {
            key: self.name,
            message: err.to_string(),
        })?;
        store
            .save_pref(self.name, &raw)
            .await
            .map_err(|message| PrefsError::Store {
                key: self.name,
                message,
            })
    }
}

#[derive(Debug, Clone, Default)]
/// Session-scoped store; clones share the same entries.
pub struct MemoryPrefsStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryPrefsStore {
    /// Returns the raw text stored under `key`.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }
}

impl PrefsStore for MemoryPrefsStore {
    fn load_pref<'a>(
        &'a self,
        key: &'a str,
    ) -> PrefsStoreFuture<'a, Result<Option<String>, String>> {
        Box::pin(async move { Ok(self.raw(key)) })
    }

    fn save_pref<'a>(
        &'a self,
        key: &'a str,
        raw_json: &'a str,
    ) -> PrefsStoreFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.entries
                .borrow_mut()
                .insert(key.to_string(), raw_json.to_string());
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Contrast {
        high_contrast: bool,
    }

    const CONTRAST: PrefKey<Contrast> = PrefKey::new(THEME_KEY);

    struct FailingStore;

    impl PrefsStore for FailingStore {
        fn load_pref<'a>(
            &'a self,
            _key: &'a str,
        ) -> PrefsStoreFuture<'a, Result<Option<String>, String>> {
            Box::pin(async { Err("quota exceeded".to_string()) })
        }

        fn save_pref<'a>(
            &'a self,
            _key: &'a str,
            _raw_json: &'a str,
        ) -> PrefsStoreFuture<'a, Result<(), String>> {
            Box::pin(async { Err("quota exceeded".to_string()) })
        }
    }

    #[test]
    fn typed_key_stores_json_and_reads_it_back() {
        let store = MemoryPrefsStore::default();
        assert_eq!(block_on(CONTRAST.load(&store)), Ok(None));

        block_on(CONTRAST.save(&store, &Contrast { high_contrast: true })).expect("save");
        assert_eq!(
            store.raw(THEME_KEY).as_deref(),
            Some(r#"{"high_contrast":true}"#)
        );
        assert_eq!(
            block_on(CONTRAST.load(&store)),
            Ok(Some(Contrast { high_contrast: true }))
        );
    }

    #[test]
    fn clones_share_entries() {
        let store = MemoryPrefsStore::default();
        let view = store.clone();
        block_on(store.save_pref(PREFERENCES_KEY, "{}")).expect("save");
        assert_eq!(view.raw(PREFERENCES_KEY).as_deref(), Some("{}"));
    }

    #[test]
    fn malformed_text_and_store_failures_name_the_key() {
        let store = MemoryPrefsStore::default();
        block_on(store.save_pref(THEME_KEY, "not json")).expect("save raw");
        assert!(matches!(
            block_on(CONTRAST.load(&store)),
            Err(PrefsError::Malformed { key: THEME_KEY, .. })
        ));

        let err = block_on(CONTRAST.save(&FailingStore, &Contrast { high_contrast: false }))
            .expect_err("store failure");
        assert_eq!(
            err,
            PrefsError::Store {
                key: THEME_KEY,
                message: "quota exceeded".to_string()
            }
        );
        assert_eq!(
            err.to_string(),
            "preference store failed for `webdesk.theme.v1`: quota exceeded"
        );
    }
}
