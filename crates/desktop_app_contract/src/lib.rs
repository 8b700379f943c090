//! Shared contract types between the desktop window manager runtime and the apps it mounts.
//!
//! Apps are identified by the closed [`AppKind`] enum. Each mounted window receives an
//! [`AppMountContext`] carrying read-only views of the shared file-system tree and clipboard, and
//! an [`AppHost`] through which every mutation is sent back to the runtime as an [`AppCommand`].

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use leptos::{Callable, Callback, Signal, View};
use platform_host::{ClipboardState, VirtualFs};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Stable identifier for a runtime-managed window.
pub type WindowRuntimeId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Closed set of applications the desktop can mount.
pub enum AppKind {
    /// Calculator.
    #[serde(rename = "calculator")]
    Calculator,
    /// Terminal.
    #[serde(rename = "terminal")]
    Terminal,
    /// Plain-text editor bound to a file path.
    #[serde(rename = "text-editor")]
    TextEditor,
    /// Folder browser bound to a folder path.
    #[serde(rename = "file-explorer")]
    FileExplorer,
    /// Theme and clock preferences.
    #[serde(rename = "settings")]
    Settings,
    /// Contact form.
    #[serde(rename = "contact")]
    ContactForm,
    /// Image viewer bound to a file path.
    #[serde(rename = "image-viewer")]
    ImageViewer,
    /// Fallback read-only viewer for unrecognized files.
    #[serde(rename = "file-viewer")]
    FileViewer,
}

const TEXT_EXTENSIONS: [&str; 11] = [
    "txt", "md", "rs", "toml", "json", "js", "ts", "css", "html", "log", "csv",
];
const IMAGE_EXTENSIONS: [&str; 7] = ["png", "jpg", "jpeg", "gif", "svg", "webp", "bmp"];

impl AppKind {
    /// Every app kind in launcher order.
    pub const ALL: [AppKind; 8] = [
        AppKind::FileExplorer,
        AppKind::TextEditor,
        AppKind::Calculator,
        AppKind::Terminal,
        AppKind::Settings,
        AppKind::ContactForm,
        AppKind::ImageViewer,
        AppKind::FileViewer,
    ];

    /// Returns the component tag used by app-link files and drag payloads.
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Calculator => "calculator",
            Self::Terminal => "terminal",
            Self::TextEditor => "text-editor",
            Self::FileExplorer => "file-explorer",
            Self::Settings => "settings",
            Self::ContactForm => "contact",
            Self::ImageViewer => "image-viewer",
            Self::FileViewer => "file-viewer",
        }
    }

    /// Parses a component tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let tag = tag.trim();
        Self::ALL.into_iter().find(|kind| kind.tag() == tag)
    }

    /// Default window title.
    pub const fn title(self) -> &'static str {
        match self {
            Self::Calculator => "Calculator",
            Self::Terminal => "Terminal",
            Self::TextEditor => "Text Editor",
            Self::FileExplorer => "File Explorer",
            Self::Settings => "Settings",
            Self::ContactForm => "Contact",
            Self::ImageViewer => "Image Viewer",
            Self::FileViewer => "File Viewer",
        }
    }

    /// Icon token shown in the taskbar and launcher.
    pub const fn icon_id(self) -> &'static str {
        match self {
            Self::Calculator => "calculator",
            Self::Terminal => "terminal",
            Self::TextEditor => "document",
            Self::FileExplorer => "folder",
            Self::Settings => "settings",
            Self::ContactForm => "mail",
            Self::ImageViewer => "image",
            Self::FileViewer => "file",
        }
    }

    /// Default window size as `(width, height)`.
    pub const fn default_size(self) -> (i32, i32) {
        match self {
            Self::Calculator => (320, 460),
            Self::Terminal => (640, 400),
            Self::TextEditor => (640, 480),
            Self::FileExplorer => (680, 460),
            Self::Settings => (520, 420),
            Self::ContactForm => (420, 520),
            Self::ImageViewer => (600, 480),
            Self::FileViewer => (520, 400),
        }
    }

    /// Whether windows of this kind may be resized or maximized.
    pub const fn is_resizable(self) -> bool {
        !matches!(self, Self::Calculator | Self::ContactForm)
    }

    /// Whether a second launch focuses the existing window instead of opening another.
    pub const fn is_single_instance(self) -> bool {
        matches!(
            self,
            Self::Calculator | Self::Terminal | Self::Settings | Self::ContactForm
        )
    }

    /// Whether the app appears in the start menu.
    pub const fn show_in_launcher(self) -> bool {
        !matches!(self, Self::ImageViewer | Self::FileViewer)
    }

    /// Picks the app that opens a file with the given (lowercase) extension.
    pub fn for_extension(extension: Option<&str>) -> Self {
        match extension {
            Some(ext) if TEXT_EXTENSIONS.contains(&ext) => Self::TextEditor,
            Some(ext) if IMAGE_EXTENSIONS.contains(&ext) => Self::ImageViewer,
            _ => Self::FileViewer,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Faults an app can raise while rendering.
pub enum AppRenderError {
    /// The window's file path no longer names a file.
    #[error("file `{path}` is no longer available")]
    MissingFile {
        /// Window file path.
        path: String,
    },
    /// The window's folder path no longer names a folder.
    #[error("folder `{path}` is no longer available")]
    MissingFolder {
        /// Window folder path.
        path: String,
    },
    /// Launch params could not be interpreted.
    #[error("invalid launch parameters: {reason}")]
    InvalidLaunchParams {
        /// Parse failure detail.
        reason: String,
    },
    /// Any other app failure.
    #[error("{message}")]
    Crashed {
        /// Fault message.
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Commands sent by apps to the desktop runtime.
pub enum AppCommand {
    /// Update the title of the sending window.
    SetWindowTitle {
        /// New title text.
        title: String,
    },
    /// Open the item at a path with its default app.
    OpenPath {
        /// Item path.
        path: String,
    },
    /// Launch an app without a file.
    OpenApp {
        /// App to launch.
        app: AppKind,
    },
    /// Replace a file's content.
    WriteFile {
        /// File path.
        path: String,
        /// New content.
        content: String,
    },
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
    /// Rename an item.
    Rename {
        /// Item path.
        path: String,
        /// New base name.
        new_name: String,
    },
    /// Remove an item and its subtree.
    Remove {
        /// Item path.
        path: String,
    },
    /// Replace the clipboard with a copy selection.
    Copy {
        /// Source paths.
        paths: Vec<String>,
    },
    /// Replace the clipboard with a cut selection.
    Cut {
        /// Source paths.
        paths: Vec<String>,
    },
    /// Paste the clipboard into a folder.
    Paste {
        /// Destination folder path.
        destination: String,
    },
    /// Toggle high-contrast rendering.
    SetHighContrast {
        /// Whether high contrast should be enabled.
        enabled: bool,
    },
    /// Toggle reduced-motion rendering.
    SetReducedMotion {
        /// Whether reduced motion should be enabled.
        enabled: bool,
    },
    /// Switch the taskbar clock between 12 and 24 hour formats.
    SetClock24Hour {
        /// Whether the clock uses 24 hour format.
        enabled: bool,
    },
    /// Show or hide the date next to the taskbar clock.
    SetShowClockDate {
        /// Whether the date is shown.
        enabled: bool,
    },
    /// Report a runtime fault; the window switches to its fallback view.
    ReportFault {
        /// Fault message.
        message: String,
    },
}

#[derive(Clone, Copy)]
/// Window-scoped command sender handed to apps.
pub struct AppHost {
    sender: Callback<AppCommand, Result<(), String>>,
}

impl AppHost {
    /// Creates a host from the runtime command callback.
    pub fn new(sender: Callback<AppCommand, Result<(), String>>) -> Self {
        Self { sender }
    }

    /// Sends a command and returns the runtime's validation result.
    ///
    /// # Errors
    ///
    /// Returns the user-facing message when the runtime rejects the command.
    pub fn send(&self, command: AppCommand) -> Result<(), String> {
        self.sender.call(command)
    }

    /// Opens the item at `path` in its default app.
    ///
    /// # Errors
    ///
    /// Returns the runtime's message when nothing can be opened at `path`.
    pub fn open_path(&self, path: impl Into<String>) -> Result<(), String> {
        self.send(AppCommand::OpenPath { path: path.into() })
    }

    /// Switches the current window to its fault fallback.
    ///
    /// A rejected report is logged; the window has usually closed by then.
    pub fn report_fault(&self, error: &AppRenderError) {
        if let Err(message) = self.send(AppCommand::ReportFault {
            message: error.to_string(),
        }) {
            leptos::logging::warn!("fault report dropped ({error}): {message}");
        }
    }
}

#[derive(Clone)]
/// App mount context injected by the desktop runtime per window instance.
pub struct AppMountContext {
    /// App being mounted.
    pub app: AppKind,
    /// Stable runtime window id.
    pub window_id: WindowRuntimeId,
    /// File or folder the window is bound to.
    pub file_path: Option<String>,
    /// Launch params supplied at window-open time.
    pub launch_params: Value,
    /// Shared file-system tree.
    pub fs: Signal<VirtualFs>,
    /// Shared clipboard selection.
    pub clipboard: Signal<ClipboardState>,
    /// Command sender for this window.
    pub host: AppHost,
}

/// Static app mount function used by the runtime registry.
pub type AppMountFn = fn(AppMountContext) -> Result<View, AppRenderError>;

#[derive(Debug, Clone, Copy)]
/// Mountable app module.
pub struct AppModule {
    mount_fn: AppMountFn,
}

impl AppModule {
    /// Creates a module from a mount function.
    pub const fn new(mount_fn: AppMountFn) -> Self {
        Self { mount_fn }
    }

    /// Mounts the app view with a runtime-provided context.
    ///
    /// # Errors
    ///
    /// Returns the app's render fault.
    pub fn mount(self, context: AppMountContext) -> Result<View, AppRenderError> {
        (self.mount_fn)(context)
    }
}
