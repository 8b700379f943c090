//! Browser desktop runtime: window registry, file-system actions, icon layer, render-fault
//! boundary and the Leptos shell that renders them.
//!
//! All state changes flow through [`reduce_desktop`]; the shell components only translate DOM
//! events into [`DesktopAction`] values and render [`DesktopState`].

pub mod apps;
pub mod boundary;
pub mod components;
pub mod desktop_icons;
mod effect_executor;
pub mod host;
pub mod model;
pub mod persistence;
pub mod reducer;
mod runtime_context;
pub mod window_manager;

pub use boundary::{FaultBoundary, RenderFault};
pub use components::{
    use_desktop_runtime, DesktopProvider, DesktopRuntimeContext, DesktopShell, TASKBAR_HEIGHT_PX,
};
pub use host::DesktopHostContext;
pub use model::*;
pub use persistence::{load_preferences, load_theme, persist_preferences, persist_theme};
pub use reducer::{reduce_desktop, DesktopAction, ReducerError, RuntimeEffect};
