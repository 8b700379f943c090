use desktop_app_contract::{AppCommand, AppHost, AppMountContext, AppRenderError};
use leptos::*;

use crate::runtime_context::use_desktop_runtime;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SettingToggle {
    HighContrast,
    ReducedMotion,
    Clock24Hour,
    ShowClockDate,
}

impl SettingToggle {
    const ALL: [SettingToggle; 4] = [
        SettingToggle::HighContrast,
        SettingToggle::ReducedMotion,
        SettingToggle::Clock24Hour,
        SettingToggle::ShowClockDate,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::HighContrast => "High contrast",
            Self::ReducedMotion => "Reduce motion",
            Self::Clock24Hour => "24-hour clock",
            Self::ShowClockDate => "Show date in taskbar",
        }
    }

    fn command(self, enabled: bool) -> AppCommand {
        match self {
            Self::HighContrast => AppCommand::SetHighContrast { enabled },
            Self::ReducedMotion => AppCommand::SetReducedMotion { enabled },
            Self::Clock24Hour => AppCommand::SetClock24Hour { enabled },
            Self::ShowClockDate => AppCommand::SetShowClockDate { enabled },
        }
    }
}

pub(super) fn mount_settings(context: AppMountContext) -> Result<View, AppRenderError> {
    Ok(view! { <SettingsApp host=context.host /> }.into_view())
}

#[component]
fn SettingsApp(host: AppHost) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;
    let value_of = move |toggle: SettingToggle| {
        state.with(|desktop| match toggle {
            SettingToggle::HighContrast => desktop.theme.high_contrast,
            SettingToggle::ReducedMotion => desktop.theme.reduced_motion,
            SettingToggle::Clock24Hour => desktop.preferences.clock_24_hour,
            SettingToggle::ShowClockDate => desktop.preferences.show_clock_date,
        })
    };

    view! {
        <div class="app-shell app-settings-shell">
            <fieldset class="settings-group">
                <legend>"Appearance and clock"</legend>
                {SettingToggle::ALL
                    .into_iter()
                    .map(|toggle| {
                        view! {
                            <label class="settings-toggle">
                                <input
                                    type="checkbox"
                                    prop:checked=move || value_of(toggle)
                                    on:change=move |ev| {
                                        if let Err(err) = host.send(toggle.command(event_target_checked(&ev))) {
                                            logging::warn!("{} not applied: {err}", toggle.label());
                                        }
                                    }
                                />
                                <span>{toggle.label()}</span>
                            </label>
                        }
                    })
                    .collect_view()}
            </fieldset>
            <fieldset class="settings-group">
                <legend>"Pinned apps"</legend>
                <p>
                    {move || {
                        state.with(|desktop| {
                            desktop
                                .preferences
                                .pinned_apps
                                .iter()
                                .map(|app| app.title())
                                .collect::<Vec<_>>()
                                .join(", ")
                        })
                    }}
                </p>
                <p class="settings-hint">"Drag an app icon onto the taskbar to pin it."</p>
            </fieldset>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn toggles_map_to_preference_commands() {
        assert_eq!(
            SettingToggle::Clock24Hour.command(true),
            AppCommand::SetClock24Hour { enabled: true }
        );
        assert_eq!(
            SettingToggle::HighContrast.command(false),
            AppCommand::SetHighContrast { enabled: false }
        );
    }
}
