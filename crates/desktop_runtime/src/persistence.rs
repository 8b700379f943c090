//! Desktop runtime persistence adapters for boot hydration and lightweight local preferences.
//!
//! Only the theme and shell preferences survive a reload. Unreadable stored values are logged and
//! treated as absent so boot always reaches a usable desktop.

use platform_host::{PrefKey, PrefsError, PrefsStore, PREFERENCES_KEY, THEME_KEY};
use serde::de::DeserializeOwned;

use crate::model::{DesktopPreferences, DesktopTheme};

const THEME: PrefKey<DesktopTheme> = PrefKey::new(THEME_KEY);
const PREFERENCES: PrefKey<DesktopPreferences> = PrefKey::new(PREFERENCES_KEY);

async fn load_or_warn<T: DeserializeOwned>(
    key: PrefKey<T>,
    prefs: &dyn PrefsStore,
) -> Option<T> {
    match key.load(prefs).await {
        Ok(value) => value,
        Err(err) => {
            leptos::logging::warn!("ignoring stored `{}`: {err}", key.name());
            None
        }
    }
}

/// Loads the persisted theme, if any.
pub async fn load_theme(prefs: &dyn PrefsStore) -> Option<DesktopTheme> {
    load_or_warn(THEME, prefs).await
}

/// Loads the persisted clock and pinned-app preferences, if any.
pub async fn load_preferences(prefs: &dyn PrefsStore) -> Option<DesktopPreferences> {
    load_or_warn(PREFERENCES, prefs).await
}

/// Persists the desktop theme.
///
/// # Errors
///
/// Returns the [`PrefsError`] raised while encoding or storing.
pub async fn persist_theme(
    prefs: &dyn PrefsStore,
    theme: &DesktopTheme,
) -> Result<(), PrefsError> {
    THEME.save(prefs, theme).await
}

/// Persists shell preferences.
///
/// # Errors
///
/// Returns the [`PrefsError`] raised while encoding or storing.
pub async fn persist_preferences(
    prefs: &dyn PrefsStore,
    preferences: &DesktopPreferences,
) -> Result<(), PrefsError> {
    PREFERENCES.save(prefs, preferences).await
}
