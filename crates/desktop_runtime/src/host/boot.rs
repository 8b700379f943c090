use leptos::{create_effect, spawn_local, Callable, Callback};

use crate::{host::DesktopHostContext, persistence, reducer::DesktopAction};

pub(super) fn install_boot_hydration(host: DesktopHostContext, dispatch: Callback<DesktopAction>) {
    create_effect(move |_| {
        let prefs = host.prefs_store();
        spawn_local(async move {
            let theme = persistence::load_theme(prefs.as_ref()).await;
            let preferences = persistence::load_preferences(prefs.as_ref()).await;
            if theme.is_some() || preferences.is_some() {
                dispatch.call(DesktopAction::HydratePreferences { theme, preferences });
            }
        });
    });
}
