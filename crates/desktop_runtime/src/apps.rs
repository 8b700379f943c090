//! App registry: maps every [`AppKind`] to the module the window layer mounts.

mod contact;
mod editor;
mod explorer;
mod placeholders;
mod settings;
mod viewer;

use desktop_app_contract::{AppKind, AppModule};

/// Returns the mountable module for `app`.
pub fn app_module(app: AppKind) -> AppModule {
    match app {
        AppKind::Calculator => AppModule::new(placeholders::mount_calculator),
        AppKind::Terminal => AppModule::new(placeholders::mount_terminal),
        AppKind::TextEditor => AppModule::new(editor::mount_text_editor),
        AppKind::FileExplorer => AppModule::new(explorer::mount_file_explorer),
        AppKind::Settings => AppModule::new(settings::mount_settings),
        AppKind::ContactForm => AppModule::new(contact::mount_contact),
        AppKind::ImageViewer => AppModule::new(viewer::mount_image_viewer),
        AppKind::FileViewer => AppModule::new(viewer::mount_file_viewer),
    }
}

/// Apps listed in the start menu, in launcher order.
pub fn launcher_apps() -> Vec<AppKind> {
    AppKind::ALL
        .into_iter()
        .filter(|app| app.show_in_launcher())
        .collect()
}
