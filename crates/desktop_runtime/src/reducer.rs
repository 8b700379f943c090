//! Reducer actions, side-effect intents, and transition logic for the desktop runtime.

use desktop_app_contract::{AppCommand, AppKind};
use leptos::logging;
use platform_host::{
    base_name, is_same_or_descendant, rebase_path, ClipboardState, FsError, IconPosition,
};
use thiserror::Error;

use crate::{
    desktop_icons::{fit_icons_within, open_target, resolve_drop, OpenTarget},
    model::{
        DesktopPreferences, DesktopState, DesktopTheme, DragSession, InteractionState,
        OpenWindowRequest, PointerPosition, ResizeEdge, ResizeSession, WindowId, WindowRecord,
        WindowRect,
    },
    window_manager::{
        cascade_rect, clamp_window_to_viewport, find_window_mut, focus_window_internal,
        next_window_id, next_z_index, resize_rect_clamped, MIN_WINDOW_HEIGHT, MIN_WINDOW_WIDTH,
    },
};

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_desktop`] to mutate [`DesktopState`].
pub enum DesktopAction {
    /// Open a new window using the supplied request.
    OpenWindow(OpenWindowRequest),
    /// Launch an app, focusing the existing window of a single-instance app.
    LaunchApp {
        /// App to launch.
        app: AppKind,
    },
    /// Open a file-system item with the app its kind and extension map to.
    OpenItem {
        /// Item path.
        path: String,
    },
    /// Close a window by id.
    CloseWindow {
        /// Window to close.
        window_id: WindowId,
    },
    /// Focus (and raise) a window by id.
    FocusWindow {
        /// Window to focus.
        window_id: WindowId,
    },
    /// Toggle a window's minimized flag.
    MinimizeWindow {
        /// Window to minimize.
        window_id: WindowId,
    },
    /// Toggle a window's maximized flag.
    MaximizeWindow {
        /// Window to maximize.
        window_id: WindowId,
    },
    /// Restore a minimized window, or un-maximize a maximized one.
    RestoreWindow {
        /// Window to restore.
        window_id: WindowId,
    },
    /// Toggle taskbar behavior for a window (focus, minimize, or restore).
    ToggleTaskbarWindow {
        /// Window associated with the taskbar button.
        window_id: WindowId,
    },
    /// Replace a window's stored position.
    UpdateWindowPosition {
        /// Window to move.
        window_id: WindowId,
        /// New left edge.
        x: i32,
        /// New top edge.
        y: i32,
    },
    /// Replace a window's stored size.
    UpdateWindowSize {
        /// Window to resize.
        window_id: WindowId,
        /// New width.
        w: i32,
        /// New height.
        h: i32,
    },
    /// Replace a window's title.
    SetWindowTitle {
        /// Window to retitle.
        window_id: WindowId,
        /// New title.
        title: String,
    },
    /// Toggle the start menu open/closed.
    ToggleStartMenu,
    /// Close the start menu if open.
    CloseStartMenu,
    /// Begin dragging a window.
    BeginMove {
        /// Window being dragged.
        window_id: WindowId,
        /// Pointer position at drag start.
        pointer: PointerPosition,
    },
    /// Update an in-progress window drag.
    UpdateMove {
        /// Current pointer position.
        pointer: PointerPosition,
        /// Desktop viewport the title bar must stay inside.
        viewport: WindowRect,
    },
    /// End the active window drag.
    EndMove,
    /// Begin resizing a window.
    BeginResize {
        /// Window being resized.
        window_id: WindowId,
        /// Edge or corner being dragged.
        edge: ResizeEdge,
        /// Pointer position at resize start.
        pointer: PointerPosition,
    },
    /// Update an in-progress window resize.
    UpdateResize {
        /// Current pointer position.
        pointer: PointerPosition,
    },
    /// End the active window resize.
    EndResize,
    /// Create a file.
    CreateFile {
        /// Parent folder path.
        parent: String,
        /// File name.
        name: String,
        /// Initial content.
        content: Option<String>,
    },
    /// Create a folder.
    CreateFolder {
        /// Parent folder path.
        parent: String,
        /// Folder name.
        name: String,
    },
    /// Rename an item; windows and clipboard entries under it follow the new path.
    RenameItem {
        /// Item path.
        path: String,
        /// New base name.
        new_name: String,
    },
    /// Remove an item and its subtree.
    RemoveItem {
        /// Item path.
        path: String,
    },
    /// Replace a file's content.
    WriteFile {
        /// File path.
        path: String,
        /// New content.
        content: String,
    },
    /// Record the desktop area and move icons that no longer fit inside it.
    SetDesktopBounds {
        /// Desktop area above the taskbar.
        bounds: WindowRect,
    },
    /// Drop a top-level desktop icon at a new position.
    MoveDesktopItem {
        /// Item path.
        path: String,
        /// Requested top-left corner.
        position: IconPosition,
        /// Desktop area the icon must stay inside.
        bounds: WindowRect,
    },
    /// Replace the clipboard with a copy selection.
    CopyToClipboard {
        /// Source paths.
        paths: Vec<String>,
    },
    /// Replace the clipboard with a cut selection.
    CutToClipboard {
        /// Source paths.
        paths: Vec<String>,
    },
    /// Paste the clipboard into a folder.
    PasteFromClipboard {
        /// Destination folder path.
        destination: String,
    },
    /// Pin an app to the taskbar.
    PinTaskbarApp {
        /// App to pin.
        app: AppKind,
    },
    /// Unpin an app from the taskbar.
    UnpinTaskbarApp {
        /// App to unpin.
        app: AppKind,
    },
    /// Toggle high-contrast rendering.
    SetHighContrast {
        /// Whether high contrast is enabled.
        enabled: bool,
    },
    /// Toggle reduced-motion rendering.
    SetReducedMotion {
        /// Whether reduced motion is enabled.
        enabled: bool,
    },
    /// Switch the taskbar clock between 12 and 24 hour formats.
    SetClock24Hour {
        /// Whether the clock uses 24 hour format.
        enabled: bool,
    },
    /// Show or hide the taskbar date.
    SetShowClockDate {
        /// Whether the date is shown.
        enabled: bool,
    },
    /// Apply persisted preferences loaded at boot.
    HydratePreferences {
        /// Stored theme, if any.
        theme: Option<DesktopTheme>,
        /// Stored shell preferences, if any.
        preferences: Option<DesktopPreferences>,
    },
    /// Record a render fault for a window's app.
    ReportRenderFault {
        /// Faulting window.
        window_id: WindowId,
        /// Fault message.
        message: String,
    },
    /// Clear a window's render fault and remount its app.
    RetryRender {
        /// Window to retry.
        window_id: WindowId,
    },
    /// Apply a command sent by a window's app.
    HandleAppCommand {
        /// Sending window.
        window_id: WindowId,
        /// App command.
        command: AppCommand,
    },
}

#[derive(Debug, Clone, PartialEq)]
/// Side-effect intents emitted by [`reduce_desktop`] for the shell runtime to execute.
pub enum RuntimeEffect {
    /// Persist theme changes.
    PersistTheme,
    /// Persist clock and pinned-app preferences.
    PersistPreferences,
    /// Move focus into the newly focused window's primary input.
    FocusWindowInput(WindowId),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Errors surfaced to the dialog or app that issued an action.
pub enum ReducerError {
    /// The file-system tree rejected the operation.
    #[error(transparent)]
    Fs(#[from] FsError),
    /// An open request named a path with no item.
    #[error("nothing to open at `{path}`")]
    UnknownItem {
        /// Requested path.
        path: String,
    },
}

/// Applies a [`DesktopAction`] to the desktop runtime state and collects resulting side effects.
///
/// Window actions that reference a missing window are no-ops. Maximize and resize requests for
/// non-resizable windows are absorbed without changing state.
///
/// # Errors
///
/// Returns [`ReducerError`] when a file-system action fails validation; the state is unchanged in
/// that case.
pub fn reduce_desktop(
    state: &mut DesktopState,
    interaction: &mut InteractionState,
    action: DesktopAction,
) -> Result<Vec<RuntimeEffect>, ReducerError> {
    let mut effects = Vec::new();
    match action {
        DesktopAction::OpenWindow(req) => {
            let window_id = open_window(state, req);
            state.start_menu_open = false;
            effects.push(RuntimeEffect::FocusWindowInput(window_id));
        }
        DesktopAction::LaunchApp { app } => {
            state.start_menu_open = false;
            let existing = app
                .is_single_instance()
                .then(|| preferred_window_for_app(state, app))
                .flatten();
            let window_id = match existing {
                Some(window_id) => {
                    focus_window_internal(state, window_id);
                    window_id
                }
                None => open_window(state, OpenWindowRequest::new(app)),
            };
            effects.push(RuntimeEffect::FocusWindowInput(window_id));
        }
        DesktopAction::OpenItem { path } => {
            let target = state
                .fs
                .get(&path)
                .map(open_target)
                .ok_or(ReducerError::UnknownItem { path })?;
            let (app, path) = match target {
                OpenTarget::App(app) => {
                    return reduce_desktop(state, interaction, DesktopAction::LaunchApp { app });
                }
                OpenTarget::Folder { path } => (AppKind::FileExplorer, path),
                OpenTarget::File { app, path } => (app, path),
            };
            state.start_menu_open = false;
            let existing = state
                .windows
                .iter()
                .find(|w| w.app == app && w.file_path.as_deref() == Some(path.as_str()))
                .map(|w| w.id);
            let window_id = match existing {
                Some(window_id) => {
                    focus_window_internal(state, window_id);
                    window_id
                }
                None => open_window(state, OpenWindowRequest::for_path(app, path)),
            };
            effects.push(RuntimeEffect::FocusWindowInput(window_id));
        }
        DesktopAction::CloseWindow { window_id } => {
            state.windows.retain(|w| w.id != window_id);
            state.faults.forget(window_id);
            interaction.forget_window(window_id);
        }
        DesktopAction::FocusWindow { window_id } => {
            if focus_window_internal(state, window_id) {
                state.start_menu_open = false;
                effects.push(RuntimeEffect::FocusWindowInput(window_id));
            }
        }
        DesktopAction::MinimizeWindow { window_id } => {
            let Some(window) = find_window_mut(state, window_id) else {
                return Ok(effects);
            };
            if window.minimized {
                focus_window_internal(state, window_id);
            } else {
                window.minimized = true;
                interaction.forget_window(window_id);
            }
        }
        DesktopAction::MaximizeWindow { window_id } => {
            let Some(window) = find_window_mut(state, window_id) else {
                return Ok(effects);
            };
            if window.maximized {
                window.maximized = false;
            } else if window.resizable {
                window.maximized = true;
                focus_window_internal(state, window_id);
            } else {
                logging::log!("maximize ignored for fixed-size window {}", window_id.0);
            }
        }
        DesktopAction::RestoreWindow { window_id } => {
            let Some(window) = find_window_mut(state, window_id) else {
                return Ok(effects);
            };
            if window.minimized {
                focus_window_internal(state, window_id);
            } else {
                window.maximized = false;
            }
        }
        DesktopAction::ToggleTaskbarWindow { window_id } => {
            let Some(window) = state.window(window_id) else {
                return Ok(effects);
            };
            let focused = state.focused_window_id() == Some(window_id);
            let next = if window.minimized {
                DesktopAction::RestoreWindow { window_id }
            } else if focused {
                DesktopAction::MinimizeWindow { window_id }
            } else {
                DesktopAction::FocusWindow { window_id }
            };
            effects.extend(reduce_desktop(state, interaction, next)?);
        }
        DesktopAction::UpdateWindowPosition { window_id, x, y } => {
            if let Some(window) = find_window_mut(state, window_id) {
                window.rect.x = x;
                window.rect.y = y;
            }
        }
        DesktopAction::UpdateWindowSize { window_id, w, h } => {
            if let Some(window) = find_window_mut(state, window_id) {
                if window.resizable {
                    window.rect.w = w;
                    window.rect.h = h;
                }
            }
        }
        DesktopAction::SetWindowTitle { window_id, title } => {
            if let Some(window) = find_window_mut(state, window_id) {
                let title = title.trim();
                window.title = if title.is_empty() {
                    window.app.title().to_string()
                } else {
                    title.to_string()
                };
            }
        }
        DesktopAction::ToggleStartMenu => {
            state.start_menu_open = !state.start_menu_open;
        }
        DesktopAction::CloseStartMenu => {
            state.start_menu_open = false;
        }
        DesktopAction::BeginMove { window_id, pointer } => {
            let Some(window) = state.window(window_id) else {
                return Ok(effects);
            };
            let movable = !window.maximized;
            let rect_start = window.rect;
            focus_window_internal(state, window_id);
            if movable {
                interaction.dragging = Some(DragSession {
                    window_id,
                    pointer_start: pointer,
                    rect_start,
                });
            }
        }
        DesktopAction::UpdateMove { pointer, viewport } => {
            if let Some(session) = interaction.dragging.as_ref() {
                let dx = pointer.x - session.pointer_start.x;
                let dy = pointer.y - session.pointer_start.y;
                let rect = clamp_window_to_viewport(session.rect_start.offset(dx, dy), viewport);
                if let Some(window) = find_window_mut(state, session.window_id) {
                    if !window.maximized {
                        window.rect = rect;
                    }
                }
            }
        }
        DesktopAction::EndMove => {
            interaction.dragging = None;
        }
        DesktopAction::BeginResize {
            window_id,
            edge,
            pointer,
        } => {
            let Some(window) = state.window(window_id) else {
                return Ok(effects);
            };
            let resizable = window.resizable && !window.maximized;
            let rect_start = window.rect;
            focus_window_internal(state, window_id);
            if resizable {
                interaction.resizing = Some(ResizeSession {
                    window_id,
                    edge,
                    pointer_start: pointer,
                    rect_start,
                });
            }
        }
        DesktopAction::UpdateResize { pointer } => {
            if let Some(session) = interaction.resizing.as_ref() {
                let dx = pointer.x - session.pointer_start.x;
                let dy = pointer.y - session.pointer_start.y;
                let rect = resize_rect_clamped(session.rect_start, session.edge, dx, dy);
                if let Some(window) = find_window_mut(state, session.window_id) {
                    if !window.maximized && window.resizable {
                        window.rect = rect;
                    }
                }
            }
        }
        DesktopAction::EndResize => {
            interaction.resizing = None;
        }
        DesktopAction::CreateFile {
            parent,
            name,
            content,
        } => {
            state.fs.create_file(&parent, &name, content)?;
            keep_icons_on_desktop(state)?;
        }
        DesktopAction::CreateFolder { parent, name } => {
            state.fs.create_folder(&parent, &name)?;
            keep_icons_on_desktop(state)?;
        }
        DesktopAction::RenameItem { path, new_name } => {
            let old_path = platform_host::normalize_virtual_path(&path);
            let new_path = state.fs.rename(&old_path, &new_name)?;
            if new_path != old_path {
                repoint_paths(state, &old_path, &new_path);
            }
            keep_icons_on_desktop(state)?;
        }
        DesktopAction::RemoveItem { path } => {
            let removed = state.fs.remove(&path)?;
            state
                .clipboard
                .items
                .retain(|item| !is_same_or_descendant(item, &removed.path));
            if state.clipboard.items.is_empty() {
                state.clipboard = ClipboardState::default();
            }
        }
        DesktopAction::WriteFile { path, content } => {
            state.fs.write_file(&path, content)?;
        }
        DesktopAction::SetDesktopBounds { bounds } => {
            if state.desktop_bounds != Some(bounds) {
                state.desktop_bounds = Some(bounds);
                keep_icons_on_desktop(state)?;
            }
        }
        DesktopAction::MoveDesktopItem {
            path,
            position,
            bounds,
        } => {
            let path = platform_host::normalize_virtual_path(&path);
            let landed = resolve_drop(&state.fs, &path, position, bounds);
            state.fs.set_position(&path, landed)?;
        }
        DesktopAction::CopyToClipboard { paths } => {
            state.clipboard = ClipboardState::copy(paths);
        }
        DesktopAction::CutToClipboard { paths } => {
            state.clipboard = ClipboardState::cut(paths);
        }
        DesktopAction::PasteFromClipboard { destination } => {
            let outcome = state.fs.paste(&state.clipboard, &destination)?;
            for skipped in &outcome.skipped {
                logging::warn!("paste skipped missing source `{skipped}`");
            }
            for (from, to) in &outcome.moved {
                repoint_windows(state, from, to);
            }
            state.clipboard = std::mem::take(&mut state.clipboard).after_paste();
            keep_icons_on_desktop(state)?;
        }
        DesktopAction::PinTaskbarApp { app } => {
            if !state.preferences.pinned_apps.contains(&app) {
                state.preferences.pinned_apps.push(app);
                effects.push(RuntimeEffect::PersistPreferences);
            }
        }
        DesktopAction::UnpinTaskbarApp { app } => {
            let before = state.preferences.pinned_apps.len();
            state.preferences.pinned_apps.retain(|pinned| *pinned != app);
            if state.preferences.pinned_apps.len() != before {
                effects.push(RuntimeEffect::PersistPreferences);
            }
        }
        DesktopAction::SetHighContrast { enabled } => {
            state.theme.high_contrast = enabled;
            effects.push(RuntimeEffect::PersistTheme);
        }
        DesktopAction::SetReducedMotion { enabled } => {
            state.theme.reduced_motion = enabled;
            effects.push(RuntimeEffect::PersistTheme);
        }
        DesktopAction::SetClock24Hour { enabled } => {
            state.preferences.clock_24_hour = enabled;
            effects.push(RuntimeEffect::PersistPreferences);
        }
        DesktopAction::SetShowClockDate { enabled } => {
            state.preferences.show_clock_date = enabled;
            effects.push(RuntimeEffect::PersistPreferences);
        }
        DesktopAction::HydratePreferences { theme, preferences } => {
            if let Some(theme) = theme {
                state.theme = theme;
            }
            if let Some(preferences) = preferences {
                state.preferences = preferences;
            }
        }
        DesktopAction::ReportRenderFault { window_id, message } => {
            if let Some(window) = state.window(window_id) {
                let app = window.app;
                logging::warn!(
                    "render fault in window {} ({}): {message}",
                    window_id.0,
                    app.tag()
                );
                state.faults.report(window_id, message);
            }
        }
        DesktopAction::RetryRender { window_id } => {
            state.faults.retry(window_id);
            if let Some(window) = find_window_mut(state, window_id) {
                window.render_epoch = window.render_epoch.wrapping_add(1);
            }
        }
        DesktopAction::HandleAppCommand { window_id, command } => {
            let next = app_command_action(window_id, command);
            effects.extend(reduce_desktop(state, interaction, next)?);
        }
    }

    Ok(effects)
}

fn keep_icons_on_desktop(state: &mut DesktopState) -> Result<(), ReducerError> {
    if let Some(bounds) = state.desktop_bounds {
        fit_icons_within(&mut state.fs, bounds)?;
    }
    Ok(())
}

/// Translates an app command into the reducer action it stands for.
pub fn app_command_action(window_id: WindowId, command: AppCommand) -> DesktopAction {
    match command {
        AppCommand::SetWindowTitle { title } => DesktopAction::SetWindowTitle { window_id, title },
        AppCommand::OpenPath { path } => DesktopAction::OpenItem { path },
        AppCommand::OpenApp { app } => DesktopAction::LaunchApp { app },
        AppCommand::WriteFile { path, content } => DesktopAction::WriteFile { path, content },
        AppCommand::CreateFile {
            parent,
            name,
            content,
        } => DesktopAction::CreateFile {
            parent,
            name,
            content,
        },
        AppCommand::CreateFolder { parent, name } => DesktopAction::CreateFolder { parent, name },
        AppCommand::Rename { path, new_name } => DesktopAction::RenameItem { path, new_name },
        AppCommand::Remove { path } => DesktopAction::RemoveItem { path },
        AppCommand::Copy { paths } => DesktopAction::CopyToClipboard { paths },
        AppCommand::Cut { paths } => DesktopAction::CutToClipboard { paths },
        AppCommand::Paste { destination } => DesktopAction::PasteFromClipboard { destination },
        AppCommand::SetHighContrast { enabled } => DesktopAction::SetHighContrast { enabled },
        AppCommand::SetReducedMotion { enabled } => DesktopAction::SetReducedMotion { enabled },
        AppCommand::SetClock24Hour { enabled } => DesktopAction::SetClock24Hour { enabled },
        AppCommand::SetShowClockDate { enabled } => DesktopAction::SetShowClockDate { enabled },
        AppCommand::ReportFault { message } => {
            DesktopAction::ReportRenderFault { window_id, message }
        }
    }
}

/// Returns the window a launcher click should bring forward for `app`.
pub fn preferred_window_for_app(state: &DesktopState, app: AppKind) -> Option<WindowId> {
    state
        .windows
        .iter()
        .filter(|w| w.app == app)
        .max_by_key(|w| (!w.minimized, w.z_index))
        .map(|w| w.id)
}

/// Title for a window bound to `path`.
pub fn window_title_for(app: AppKind, path: Option<&str>) -> String {
    match path.map(base_name) {
        Some(name) if !name.is_empty() => format!("{name} - {}", app.title()),
        _ => app.title().to_string(),
    }
}

fn open_window(state: &mut DesktopState, req: OpenWindowRequest) -> WindowId {
    let window_id = next_window_id(state);
    let rect = req
        .rect
        .unwrap_or_else(|| cascade_rect(window_id.0, req.app.default_size()))
        .clamped_min(MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT);
    let z_index = next_z_index(state);
    let title = req
        .title
        .unwrap_or_else(|| window_title_for(req.app, req.file_path.as_deref()));
    state.windows.push(WindowRecord {
        id: window_id,
        app: req.app,
        title,
        icon_id: req.app.icon_id().to_string(),
        rect,
        z_index,
        minimized: false,
        maximized: false,
        resizable: req.app.is_resizable(),
        file_path: req.file_path,
        launch_params: req.launch_params,
        render_epoch: 0,
    });
    window_id
}

fn repoint_paths(state: &mut DesktopState, old_prefix: &str, new_prefix: &str) {
    repoint_windows(state, old_prefix, new_prefix);
    for item in &mut state.clipboard.items {
        if let Some(rebased) = rebase_path(item, old_prefix, new_prefix) {
            *item = rebased;
        }
    }
}

fn repoint_windows(state: &mut DesktopState, old_prefix: &str, new_prefix: &str) {
    for window in &mut state.windows {
        let Some(path) = window.file_path.as_deref() else {
            continue;
        };
        let Some(rebased) = rebase_path(path, old_prefix, new_prefix) else {
            continue;
        };
        if window.title == window_title_for(window.app, Some(path)) {
            window.title = window_title_for(window.app, Some(&rebased));
        }
        window.file_path = Some(rebased);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use platform_host::ClipboardOperation;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::desktop_icons::icon_fits;

    const VIEWPORT: WindowRect = WindowRect {
        x: 0,
        y: 0,
        w: 1200,
        h: 760,
    };

    fn reduce(
        state: &mut DesktopState,
        interaction: &mut InteractionState,
        action: DesktopAction,
    ) -> Vec<RuntimeEffect> {
        reduce_desktop(state, interaction, action).expect("reduce")
    }

    fn open(state: &mut DesktopState, interaction: &mut InteractionState, app: AppKind) -> WindowId {
        reduce(
            state,
            interaction,
            DesktopAction::OpenWindow(OpenWindowRequest::new(app)),
        );
        state.windows.last().expect("window").id
    }

    fn window(state: &DesktopState, window_id: WindowId) -> &WindowRecord {
        state.window(window_id).expect("window")
    }

    #[test]
    fn open_windows_never_share_ids_or_z_indices() {
        let mut state = DesktopState::empty();
        let mut interaction = InteractionState::default();
        for app in AppKind::ALL.into_iter().chain(AppKind::ALL) {
            open(&mut state, &mut interaction, app);
        }

        let ids: HashSet<_> = state.windows.iter().map(|w| w.id).collect();
        let zs: HashSet<_> = state.windows.iter().map(|w| w.z_index).collect();
        assert_eq!(ids.len(), state.windows.len());
        assert_eq!(zs.len(), state.windows.len());
    }

    #[test]
    fn open_window_focuses_new_window() {
        let mut state = DesktopState::empty();
        let mut interaction = InteractionState::default();

        let first = open(&mut state, &mut interaction, AppKind::FileExplorer);
        let second = open(&mut state, &mut interaction, AppKind::TextEditor);

        assert_eq!(state.focused_window_id(), Some(second));
        assert!(window(&state, second).z_index > window(&state, first).z_index);
    }

    #[test]
    fn focus_yields_strict_maximum_z_index() {
        let mut state = DesktopState::empty();
        let mut interaction = InteractionState::default();
        let ids: Vec<_> = (0..4)
            .map(|_| open(&mut state, &mut interaction, AppKind::TextEditor))
            .collect();

        for window_id in [ids[0], ids[2], ids[2], ids[3], ids[1]] {
            let effects = reduce(
                &mut state,
                &mut interaction,
                DesktopAction::FocusWindow { window_id },
            );
            let z = window(&state, window_id).z_index;
            assert!(state
                .windows
                .iter()
                .filter(|w| w.id != window_id)
                .all(|w| w.z_index < z));
            assert_eq!(state.focused_window_id(), Some(window_id));
            assert!(effects.contains(&RuntimeEffect::FocusWindowInput(window_id)));
        }
    }

    #[test]
    fn focusing_the_top_window_keeps_stack_unchanged() {
        let mut state = DesktopState::empty();
        let mut interaction = InteractionState::default();
        open(&mut state, &mut interaction, AppKind::FileExplorer);
        let top = open(&mut state, &mut interaction, AppKind::Settings);
        let before = state.windows.clone();

        reduce(
            &mut state,
            &mut interaction,
            DesktopAction::FocusWindow { window_id: top },
        );
        assert_eq!(state.windows, before);
    }

    #[test]
    fn operations_after_close_are_noops() {
        let mut state = DesktopState::empty();
        let mut interaction = InteractionState::default();
        let keep = open(&mut state, &mut interaction, AppKind::FileExplorer);
        let closed = open(&mut state, &mut interaction, AppKind::TextEditor);
        reduce(
            &mut state,
            &mut interaction,
            DesktopAction::CloseWindow { window_id: closed },
        );
        let after_close = state.clone();

        for action in [
            DesktopAction::CloseWindow { window_id: closed },
            DesktopAction::FocusWindow { window_id: closed },
            DesktopAction::MinimizeWindow { window_id: closed },
            DesktopAction::MaximizeWindow { window_id: closed },
            DesktopAction::RestoreWindow { window_id: closed },
            DesktopAction::ToggleTaskbarWindow { window_id: closed },
            DesktopAction::UpdateWindowPosition {
                window_id: closed,
                x: 1,
                y: 2,
            },
            DesktopAction::UpdateWindowSize {
                window_id: closed,
                w: 500,
                h: 500,
            },
            DesktopAction::SetWindowTitle {
                window_id: closed,
                title: "ghost".to_string(),
            },
            DesktopAction::ReportRenderFault {
                window_id: closed,
                message: "late".to_string(),
            },
        ] {
            let effects = reduce(&mut state, &mut interaction, action);
            assert!(effects.is_empty());
            assert_eq!(state, after_close);
        }
        assert_eq!(state.focused_window_id(), Some(keep));
    }

    #[test]
    fn minimize_then_restore_keeps_geometry() {
        let mut state = DesktopState::empty();
        let mut interaction = InteractionState::default();
        let win = open(&mut state, &mut interaction, AppKind::TextEditor);
        reduce(
            &mut state,
            &mut interaction,
            DesktopAction::UpdateWindowPosition {
                window_id: win,
                x: 210,
                y: 130,
            },
        );
        let rect = window(&state, win).rect;

        reduce(
            &mut state,
            &mut interaction,
            DesktopAction::MinimizeWindow { window_id: win },
        );
        assert!(window(&state, win).minimized);
        assert_eq!(state.focused_window_id(), None);

        reduce(
            &mut state,
            &mut interaction,
            DesktopAction::RestoreWindow { window_id: win },
        );
        let restored = window(&state, win);
        assert!(!restored.minimized);
        assert_eq!(restored.rect, rect);
        assert_eq!(state.focused_window_id(), Some(win));
    }

    #[test]
    fn maximize_on_fixed_size_window_is_absorbed() {
        let mut state = DesktopState::empty();
        let mut interaction = InteractionState::default();
        let calc = open(&mut state, &mut interaction, AppKind::Calculator);
        let before = state.clone();

        let effects = reduce(
            &mut state,
            &mut interaction,
            DesktopAction::MaximizeWindow { window_id: calc },
        );
        assert!(effects.is_empty());
        assert!(!window(&state, calc).maximized);
        assert_eq!(state, before);
    }

    #[test]
    fn maximize_toggles_without_touching_stored_rect() {
        let mut state = DesktopState::empty();
        let mut interaction = InteractionState::default();
        let win = open(&mut state, &mut interaction, AppKind::TextEditor);
        let rect = window(&state, win).rect;

        reduce(
            &mut state,
            &mut interaction,
            DesktopAction::MaximizeWindow { window_id: win },
        );
        let maximized = window(&state, win);
        assert!(maximized.maximized);
        assert_eq!(maximized.rect, rect);
        assert_eq!(maximized.effective_rect(VIEWPORT), VIEWPORT);

        reduce(
            &mut state,
            &mut interaction,
            DesktopAction::MaximizeWindow { window_id: win },
        );
        assert!(!window(&state, win).maximized);
        assert_eq!(window(&state, win).effective_rect(VIEWPORT), rect);
    }

    #[test]
    fn restore_clears_minimize_before_maximize() {
        let mut state = DesktopState::empty();
        let mut interaction = InteractionState::default();
        let win = open(&mut state, &mut interaction, AppKind::FileExplorer);
        for action in [
            DesktopAction::MaximizeWindow { window_id: win },
            DesktopAction::MinimizeWindow { window_id: win },
        ] {
            reduce(&mut state, &mut interaction, action);
        }

        reduce(
            &mut state,
            &mut interaction,
            DesktopAction::RestoreWindow { window_id: win },
        );
        assert!(!window(&state, win).minimized);
        assert!(window(&state, win).maximized);

        reduce(
            &mut state,
            &mut interaction,
            DesktopAction::RestoreWindow { window_id: win },
        );
        assert!(!window(&state, win).maximized);
    }

    #[test]
    fn taskbar_toggle_minimizes_if_focused_and_restores_if_minimized() {
        let mut state = DesktopState::empty();
        let mut interaction = InteractionState::default();
        let other = open(&mut state, &mut interaction, AppKind::Settings);
        let win = open(&mut state, &mut interaction, AppKind::FileExplorer);

        reduce(
            &mut state,
            &mut interaction,
            DesktopAction::ToggleTaskbarWindow { window_id: win },
        );
        assert!(window(&state, win).minimized);
        assert_eq!(state.focused_window_id(), Some(other));

        reduce(
            &mut state,
            &mut interaction,
            DesktopAction::ToggleTaskbarWindow { window_id: win },
        );
        assert!(!window(&state, win).minimized);
        assert_eq!(state.focused_window_id(), Some(win));

        reduce(
            &mut state,
            &mut interaction,
            DesktopAction::ToggleTaskbarWindow { window_id: other },
        );
        assert_eq!(state.focused_window_id(), Some(other));
    }

    #[test]
    fn single_instance_apps_focus_their_existing_window() {
        let mut state = DesktopState::empty();
        let mut interaction = InteractionState::default();
        for _ in 0..2 {
            reduce(
                &mut state,
                &mut interaction,
                DesktopAction::LaunchApp {
                    app: AppKind::Calculator,
                },
            );
        }
        reduce(
            &mut state,
            &mut interaction,
            DesktopAction::LaunchApp {
                app: AppKind::TextEditor,
            },
        );
        reduce(
            &mut state,
            &mut interaction,
            DesktopAction::LaunchApp {
                app: AppKind::Calculator,
            },
        );

        let calculators: Vec<_> = state
            .windows
            .iter()
            .filter(|w| w.app == AppKind::Calculator)
            .collect();
        assert_eq!(calculators.len(), 1);
        assert_eq!(state.focused_window_id(), Some(calculators[0].id));
    }

    #[test]
    fn open_item_routes_by_kind_and_reuses_file_windows() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();

        for path in ["/Projects", "/Projects/roadmap.md", "/Contact.app", "/Projects/roadmap.md"] {
            reduce(
                &mut state,
                &mut interaction,
                DesktopAction::OpenItem {
                    path: path.to_string(),
                },
            );
        }

        let summary: Vec<_> = state
            .stacked_windows()
            .into_iter()
            .map(|w| (w.app, w.file_path, w.title))
            .collect();
        assert_eq!(
            summary,
            vec![
                (
                    AppKind::FileExplorer,
                    Some("/Projects".to_string()),
                    "Projects - File Explorer".to_string()
                ),
                (AppKind::ContactForm, None, "Contact".to_string()),
                (
                    AppKind::TextEditor,
                    Some("/Projects/roadmap.md".to_string()),
                    "roadmap.md - Text Editor".to_string()
                ),
            ]
        );

        let err = reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::OpenItem {
                path: "/nope".to_string(),
            },
        )
        .expect_err("missing item");
        assert_eq!(
            err,
            ReducerError::UnknownItem {
                path: "/nope".to_string()
            }
        );
    }

    #[test]
    fn drag_updates_rect_and_keeps_title_bar_in_viewport() {
        let mut state = DesktopState::empty();
        let mut interaction = InteractionState::default();
        let win = open(&mut state, &mut interaction, AppKind::Terminal);
        let original = window(&state, win).rect;

        reduce(
            &mut state,
            &mut interaction,
            DesktopAction::BeginMove {
                window_id: win,
                pointer: PointerPosition { x: 10, y: 10 },
            },
        );
        reduce(
            &mut state,
            &mut interaction,
            DesktopAction::UpdateMove {
                pointer: PointerPosition { x: 35, y: 50 },
                viewport: VIEWPORT,
            },
        );
        let moved = window(&state, win).rect;
        assert_eq!((moved.x, moved.y), (original.x + 25, original.y + 40));

        reduce(
            &mut state,
            &mut interaction,
            DesktopAction::UpdateMove {
                pointer: PointerPosition { x: 10, y: -500 },
                viewport: VIEWPORT,
            },
        );
        assert_eq!(window(&state, win).rect.y, 0);

        reduce(&mut state, &mut interaction, DesktopAction::EndMove);
        assert_eq!(interaction.dragging, None);
    }

    #[test]
    fn maximized_windows_ignore_drags() {
        let mut state = DesktopState::empty();
        let mut interaction = InteractionState::default();
        let win = open(&mut state, &mut interaction, AppKind::Terminal);
        reduce(
            &mut state,
            &mut interaction,
            DesktopAction::MaximizeWindow { window_id: win },
        );
        let rect = window(&state, win).rect;

        reduce(
            &mut state,
            &mut interaction,
            DesktopAction::BeginMove {
                window_id: win,
                pointer: PointerPosition { x: 0, y: 0 },
            },
        );
        reduce(
            &mut state,
            &mut interaction,
            DesktopAction::UpdateMove {
                pointer: PointerPosition { x: 200, y: 200 },
                viewport: VIEWPORT,
            },
        );
        assert_eq!(interaction.dragging, None);
        assert_eq!(window(&state, win).rect, rect);
    }

    #[test]
    fn resize_respects_capability_and_minimum_size() {
        let mut state = DesktopState::empty();
        let mut interaction = InteractionState::default();
        let calc = open(&mut state, &mut interaction, AppKind::Calculator);
        reduce(
            &mut state,
            &mut interaction,
            DesktopAction::BeginResize {
                window_id: calc,
                edge: ResizeEdge::SouthEast,
                pointer: PointerPosition { x: 0, y: 0 },
            },
        );
        assert_eq!(interaction.resizing, None);

        let editor = open(&mut state, &mut interaction, AppKind::TextEditor);
        let start = window(&state, editor).rect;
        reduce(
            &mut state,
            &mut interaction,
            DesktopAction::BeginResize {
                window_id: editor,
                edge: ResizeEdge::West,
                pointer: PointerPosition { x: 0, y: 0 },
            },
        );
        reduce(
            &mut state,
            &mut interaction,
            DesktopAction::UpdateResize {
                pointer: PointerPosition { x: 2000, y: 0 },
            },
        );
        let resized = window(&state, editor).rect;
        assert_eq!(resized.w, MIN_WINDOW_WIDTH);
        assert_eq!(resized.right(), start.right());
        reduce(&mut state, &mut interaction, DesktopAction::EndResize);
        assert_eq!(interaction.resizing, None);
    }

    #[test]
    fn duplicate_create_fails_and_leaves_state_unchanged() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let create = DesktopAction::CreateFile {
            parent: "/Desktop".to_string(),
            name: "a.txt".to_string(),
            content: None,
        };
        reduce(&mut state, &mut interaction, create.clone());
        let before = state.clone();

        let err = reduce_desktop(&mut state, &mut interaction, create).expect_err("collision");
        assert_eq!(
            err,
            ReducerError::Fs(FsError::NameCollision {
                parent: "/Desktop".to_string(),
                name: "a.txt".to_string(),
            })
        );
        assert_eq!(state, before);
    }

    #[test]
    fn cut_then_paste_moves_file_and_repoints_its_window() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        reduce(
            &mut state,
            &mut interaction,
            DesktopAction::CreateFile {
                parent: "/Desktop".to_string(),
                name: "a.txt".to_string(),
                content: Some("hello".to_string()),
            },
        );
        reduce(
            &mut state,
            &mut interaction,
            DesktopAction::OpenItem {
                path: "/Desktop/a.txt".to_string(),
            },
        );
        reduce(
            &mut state,
            &mut interaction,
            DesktopAction::CutToClipboard {
                paths: vec!["/Desktop/a.txt".to_string()],
            },
        );
        reduce(
            &mut state,
            &mut interaction,
            DesktopAction::PasteFromClipboard {
                destination: "/Projects".to_string(),
            },
        );

        assert!(!state.fs.exists("/Desktop/a.txt"));
        let moved = state.fs.get("/Projects/a.txt").expect("moved file");
        assert_eq!(moved.content.as_deref(), Some("hello"));
        assert_eq!(state.clipboard.operation, ClipboardOperation::None);
        let editor = state.windows.last().expect("editor");
        assert_eq!(editor.file_path.as_deref(), Some("/Projects/a.txt"));
    }

    #[test]
    fn copy_paste_keeps_clipboard_for_repeated_pastes() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        reduce(
            &mut state,
            &mut interaction,
            DesktopAction::CopyToClipboard {
                paths: vec!["/welcome.txt".to_string()],
            },
        );
        for _ in 0..2 {
            reduce(
                &mut state,
                &mut interaction,
                DesktopAction::PasteFromClipboard {
                    destination: "/Documents".to_string(),
                },
            );
        }
        assert!(state.fs.exists("/welcome.txt"));
        assert!(state.fs.exists("/Documents/welcome.txt"));
        assert!(state.fs.exists("/Documents/welcome (2).txt"));
        assert_eq!(state.clipboard.operation, ClipboardOperation::Copy);
    }

    #[test]
    fn rename_folder_repoints_windows_and_clipboard() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        reduce(
            &mut state,
            &mut interaction,
            DesktopAction::OpenItem {
                path: "/Projects/roadmap.md".to_string(),
            },
        );
        reduce(
            &mut state,
            &mut interaction,
            DesktopAction::CopyToClipboard {
                paths: vec!["/Projects/roadmap.md".to_string()],
            },
        );
        reduce(
            &mut state,
            &mut interaction,
            DesktopAction::RenameItem {
                path: "/Projects".to_string(),
                new_name: "Work".to_string(),
            },
        );

        let editor = state.windows.last().expect("editor");
        assert_eq!(editor.file_path.as_deref(), Some("/Work/roadmap.md"));
        assert_eq!(editor.title, "roadmap.md - Text Editor");
        assert_eq!(state.clipboard.items, vec!["/Work/roadmap.md".to_string()]);
    }

    #[test]
    fn remove_drops_clipboard_entries_under_the_removed_item() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        reduce(
            &mut state,
            &mut interaction,
            DesktopAction::CutToClipboard {
                paths: vec!["/Projects/roadmap.md".to_string()],
            },
        );
        reduce(
            &mut state,
            &mut interaction,
            DesktopAction::RemoveItem {
                path: "/Projects".to_string(),
            },
        );
        assert!(state.clipboard.is_empty());
        assert!(!state.fs.exists("/Projects"));
    }

    #[test]
    fn dropping_icon_outside_desktop_clamps_stored_position() {
        let mut state = DesktopState::empty();
        let mut interaction = InteractionState::default();
        state.fs.create_folder("/", "Desktop").expect("folder");

        reduce(
            &mut state,
            &mut interaction,
            DesktopAction::MoveDesktopItem {
                path: "/Desktop".to_string(),
                position: IconPosition { x: -300, y: 9000 },
                bounds: VIEWPORT,
            },
        );
        let position = state
            .fs
            .get("/Desktop")
            .and_then(|item| item.position)
            .expect("position");
        assert_eq!(
            position,
            IconPosition {
                x: 0,
                y: VIEWPORT.h - platform_host::ICON_HEIGHT
            }
        );
    }

    #[test]
    fn short_desktop_keeps_seeded_and_new_icons_in_bounds() {
        let short = WindowRect {
            x: 0,
            y: 0,
            w: 1024,
            h: 562,
        };
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        reduce(
            &mut state,
            &mut interaction,
            DesktopAction::SetDesktopBounds { bounds: short },
        );
        for n in 1..=4 {
            reduce(
                &mut state,
                &mut interaction,
                DesktopAction::CreateFolder {
                    parent: "/".to_string(),
                    name: format!("Extra {n}"),
                },
            );
        }
        reduce(
            &mut state,
            &mut interaction,
            DesktopAction::CopyToClipboard {
                paths: vec!["/Projects".to_string()],
            },
        );
        reduce(
            &mut state,
            &mut interaction,
            DesktopAction::PasteFromClipboard {
                destination: "/".to_string(),
            },
        );

        let positions: Vec<IconPosition> = state
            .fs
            .desktop_items()
            .iter()
            .map(|item| item.position.expect("top-level position"))
            .collect();
        assert_eq!(positions.len(), 14);
        for (i, a) in positions.iter().enumerate() {
            assert!(icon_fits(*a, short), "{a:?} leaves the desktop");
            for b in positions.iter().skip(i + 1) {
                assert!(!a.overlaps(*b), "{a:?} overlaps {b:?}");
            }
        }
    }

    #[test]
    fn render_fault_is_isolated_and_retry_remounts() {
        let mut state = DesktopState::empty();
        let mut interaction = InteractionState::default();
        let healthy = open(&mut state, &mut interaction, AppKind::Settings);
        let broken = open(&mut state, &mut interaction, AppKind::ImageViewer);
        let healthy_before = window(&state, healthy).clone();

        reduce(
            &mut state,
            &mut interaction,
            DesktopAction::HandleAppCommand {
                window_id: broken,
                command: AppCommand::ReportFault {
                    message: "decode failed".to_string(),
                },
            },
        );
        assert!(state.faults.is_faulted(broken));
        assert!(!state.faults.is_faulted(healthy));
        assert_eq!(window(&state, healthy), &healthy_before);
        assert_eq!(state.windows.len(), 2);

        reduce(
            &mut state,
            &mut interaction,
            DesktopAction::RetryRender { window_id: broken },
        );
        assert!(!state.faults.is_faulted(broken));
        assert_eq!(window(&state, broken).render_epoch, 1);

        reduce(
            &mut state,
            &mut interaction,
            DesktopAction::ReportRenderFault {
                window_id: broken,
                message: "decode failed".to_string(),
            },
        );
        assert_eq!(
            state.faults.fault(broken).map(|fault| fault.attempts),
            Some(2)
        );
    }

    #[test]
    fn closing_a_faulted_window_drops_its_fault() {
        let mut state = DesktopState::empty();
        let mut interaction = InteractionState::default();
        let win = open(&mut state, &mut interaction, AppKind::FileViewer);
        reduce(
            &mut state,
            &mut interaction,
            DesktopAction::ReportRenderFault {
                window_id: win,
                message: "gone".to_string(),
            },
        );
        reduce(
            &mut state,
            &mut interaction,
            DesktopAction::CloseWindow { window_id: win },
        );
        assert!(state.faults.is_empty());
    }

    #[test]
    fn preference_actions_emit_persist_effects() {
        let mut state = DesktopState::empty();
        let mut interaction = InteractionState::default();

        let effects = reduce(
            &mut state,
            &mut interaction,
            DesktopAction::SetHighContrast { enabled: true },
        );
        assert_eq!(effects, vec![RuntimeEffect::PersistTheme]);

        let effects = reduce(
            &mut state,
            &mut interaction,
            DesktopAction::PinTaskbarApp {
                app: AppKind::Calculator,
            },
        );
        assert_eq!(effects, vec![RuntimeEffect::PersistPreferences]);
        let effects = reduce(
            &mut state,
            &mut interaction,
            DesktopAction::PinTaskbarApp {
                app: AppKind::Calculator,
            },
        );
        assert!(effects.is_empty());
        assert_eq!(
            state
                .preferences
                .pinned_apps
                .iter()
                .filter(|app| **app == AppKind::Calculator)
                .count(),
            1
        );
    }

    #[test]
    fn app_commands_map_to_window_scoped_actions() {
        let mut state = DesktopState::empty();
        let mut interaction = InteractionState::default();
        let win = open(&mut state, &mut interaction, AppKind::TextEditor);

        reduce(
            &mut state,
            &mut interaction,
            DesktopAction::HandleAppCommand {
                window_id: win,
                command: AppCommand::SetWindowTitle {
                    title: "draft.txt - Text Editor".to_string(),
                },
            },
        );
        assert_eq!(window(&state, win).title, "draft.txt - Text Editor");

        reduce(
            &mut state,
            &mut interaction,
            DesktopAction::HandleAppCommand {
                window_id: win,
                command: AppCommand::SetWindowTitle {
                    title: "   ".to_string(),
                },
            },
        );
        assert_eq!(window(&state, win).title, "Text Editor");
    }
}
