//! Host-side runtime helpers for executing reducer effects and querying browser environment state.
//!
//! Effect execution and viewport/window queries sit behind [`DesktopHostContext`] so tests and
//! non-browser targets can inject their own preference store.

mod boot;
mod host_ui;
mod persistence_effects;

use std::rc::Rc;

use leptos::Callback;
use platform_host::PrefsStore;
use platform_host_web::prefs_store;

use crate::{
    model::{WindowId, WindowRect},
    reducer::{DesktopAction, RuntimeEffect},
    runtime_context::DesktopRuntimeContext,
};

#[derive(Clone)]
/// Host service bundle for desktop runtime side effects.
pub struct DesktopHostContext {
    prefs: Rc<dyn PrefsStore>,
}

impl Default for DesktopHostContext {
    fn default() -> Self {
        Self::new(Rc::new(prefs_store()))
    }
}

impl DesktopHostContext {
    /// Creates a host context around an explicit preference store.
    pub fn new(prefs: Rc<dyn PrefsStore>) -> Self {
        Self { prefs }
    }

    /// Returns the configured lightweight preference service.
    pub fn prefs_store(&self) -> Rc<dyn PrefsStore> {
        self.prefs.clone()
    }

    /// Installs boot hydration for the desktop provider.
    ///
    /// Stored theme and preferences are loaded asynchronously and applied with a single
    /// [`DesktopAction::HydratePreferences`].
    pub fn install_boot_hydration(&self, dispatch: Callback<DesktopAction>) {
        boot::install_boot_hydration(self.clone(), dispatch);
    }

    /// Executes a single [`RuntimeEffect`] emitted by the reducer.
    pub fn run_runtime_effect(&self, runtime: DesktopRuntimeContext, effect: RuntimeEffect) {
        match effect {
            RuntimeEffect::PersistTheme => {
                persistence_effects::persist_theme(self.clone(), runtime)
            }
            RuntimeEffect::PersistPreferences => {
                persistence_effects::persist_preferences(self.clone(), runtime)
            }
            RuntimeEffect::FocusWindowInput(window_id) => self.focus_window_input(window_id),
        }
    }

    /// Handles a request to focus the active window's primary input.
    ///
    /// Apps opt in by rendering [`window_primary_input_dom_id`] on their primary text field.
    pub fn focus_window_input(&self, window_id: WindowId) {
        host_ui::focus_window_input(window_id);
    }

    /// Returns the current desktop viewport rect available to the shell window manager.
    pub fn desktop_viewport_rect(&self, taskbar_height_px: i32) -> WindowRect {
        host_ui::desktop_viewport_rect(taskbar_height_px)
    }
}

/// DOM id of the element that receives focus when a window is focused.
pub fn window_primary_input_dom_id(window_id: WindowId) -> String {
    format!("window-primary-input-{}", window_id.0)
}
