//! Read-only viewers: the image viewer for recognized image files and the fallback file viewer.

use desktop_app_contract::{AppMountContext, AppRenderError};
use leptos::*;
use platform_host::{normalize_virtual_path, FileSystemItem, VirtualFs};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FileSummary {
    pub name: String,
    pub path: String,
    pub extension: Option<String>,
    pub content: String,
}

impl FileSummary {
    fn from_item(item: &FileSystemItem) -> Self {
        Self {
            name: item.name.clone(),
            path: item.path.clone(),
            extension: item.extension(),
            content: item.content.clone().unwrap_or_default(),
        }
    }

    pub(crate) fn size_label(&self) -> String {
        match self.content.len() {
            1 => "1 byte".to_string(),
            n => format!("{n} bytes"),
        }
    }
}

fn bound_file(context: &AppMountContext) -> Result<String, AppRenderError> {
    context
        .file_path
        .as_deref()
        .map(normalize_virtual_path)
        .ok_or_else(|| AppRenderError::InvalidLaunchParams {
            reason: "no file selected".to_string(),
        })
}

pub(crate) fn file_summary(fs: &VirtualFs, path: &str) -> Result<FileSummary, AppRenderError> {
    fs.get(path)
        .filter(|item| !item.is_folder())
        .map(FileSummary::from_item)
        .ok_or_else(|| AppRenderError::MissingFile {
            path: path.to_string(),
        })
}

/// Checks that an image file carries a source the browser can load.
pub(crate) fn image_source(summary: &FileSummary) -> Result<String, AppRenderError> {
    let source = summary.content.trim();
    if source.is_empty() {
        return Err(AppRenderError::Crashed {
            message: format!("`{}` has no image data", summary.name),
        });
    }
    Ok(source.to_string())
}

fn watch_file(context: &AppMountContext, path: String) {
    let fs = context.fs;
    let host = context.host;
    create_effect(move |_| {
        if let Err(err) = fs.with(|fs| file_summary(fs, &path)) {
            host.report_fault(&err);
        }
    });
}

pub(super) fn mount_file_viewer(context: AppMountContext) -> Result<View, AppRenderError> {
    let path = bound_file(&context)?;
    context.fs.with_untracked(|fs| file_summary(fs, &path))?;
    watch_file(&context, path.clone());

    let fs = context.fs;
    let summary = create_memo(move |_| fs.with(|fs| file_summary(fs, &path).ok()));
    Ok(view! {
        <div class="app-shell app-viewer-shell">
            {move || {
                summary
                    .get()
                    .map(|summary| {
                        view! {
                            <div class="details-grid">
                                <div>"Name"</div><div>{summary.name.clone()}</div>
                                <div>"Location"</div><div>{summary.path.clone()}</div>
                                <div>"Type"</div>
                                <div>
                                    {summary
                                        .extension
                                        .clone()
                                        .map(|ext| format!("{} file", ext.to_uppercase()))
                                        .unwrap_or_else(|| "File".to_string())}
                                </div>
                                <div>"Size"</div><div>{summary.size_label()}</div>
                            </div>
                            <pre class="app-viewer-content">{summary.content}</pre>
                        }
                    })
            }}
        </div>
    }
    .into_view())
}

pub(super) fn mount_image_viewer(context: AppMountContext) -> Result<View, AppRenderError> {
    let path = bound_file(&context)?;
    let summary = context.fs.with_untracked(|fs| file_summary(fs, &path))?;
    image_source(&summary)?;
    watch_file(&context, path.clone());

    let fs = context.fs;
    let host = context.host;
    let source = create_memo(move |_| {
        fs.with(|fs| file_summary(fs, &path).ok())
            .and_then(|summary| image_source(&summary).ok())
    });
    let name = summary.name;
    let zoomed = create_rw_signal(false);

    Ok(view! {
        <div class="app-shell app-image-shell">
            <div class="app-toolbar" role="toolbar" aria-label="Image viewer actions">
                <button
                    type="button"
                    class="app-action"
                    aria-pressed=move || zoomed.get().to_string()
                    on:click=move |_| zoomed.update(|z| *z = !*z)
                >
                    {move || if zoomed.get() { "Fit" } else { "Actual size" }}
                </button>
            </div>
            <div class=move || if zoomed.get() { "app-image-stage actual" } else { "app-image-stage fit" }>
                <img
                    src=move || source.get().unwrap_or_default()
                    alt=name.clone()
                    on:error=move |_| {
                        host.report_fault(&AppRenderError::Crashed {
                            message: "image could not be decoded".to_string(),
                        });
                    }
                />
            </div>
        </div>
    }
    .into_view())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn summary_reports_size_and_extension() {
        let mut fs = VirtualFs::new();
        fs.create_file("/", "notes.LOG", Some("x".to_string()))
            .expect("file");
        let summary = file_summary(&fs, "/notes.LOG").expect("summary");
        assert_eq!(summary.extension.as_deref(), Some("log"));
        assert_eq!(summary.size_label(), "1 byte");
    }

    #[test]
    fn empty_images_are_render_faults() {
        let mut fs = VirtualFs::new();
        fs.create_file("/", "blank.png", None).expect("file");
        fs.create_file("/", "logo.svg", Some(" data:image/svg+xml,<svg/> ".to_string()))
            .expect("file");

        let blank = file_summary(&fs, "/blank.png").expect("summary");
        assert_eq!(
            image_source(&blank),
            Err(AppRenderError::Crashed {
                message: "`blank.png` has no image data".to_string()
            })
        );
        let logo = file_summary(&fs, "/logo.svg").expect("summary");
        assert_eq!(image_source(&logo).as_deref(), Ok("data:image/svg+xml,<svg/>"));
    }
}
