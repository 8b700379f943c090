#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{closure::Closure, JsCast};

#[cfg(target_arch = "wasm32")]
use crate::host::window_primary_input_dom_id;
use crate::model::{WindowId, WindowRect};

const FALLBACK_VIEWPORT_WIDTH: i32 = 1024;
const FALLBACK_VIEWPORT_HEIGHT: i32 = 768;

pub(super) fn focus_window_input(window_id: WindowId) {
    #[cfg(target_arch = "wasm32")]
    {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };
        let Some(element) = document.get_element_by_id(&window_primary_input_dom_id(window_id))
        else {
            return;
        };
        let Ok(element) = element.dyn_into::<web_sys::HtmlElement>() else {
            return;
        };
        let callback = Closure::once_into_js(move || {
            let _ = element.focus();
        });
        let _ = window
            .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), 0);
    }
    #[cfg(not(target_arch = "wasm32"))]
    let _ = window_id;
}

pub(super) fn desktop_viewport_rect(taskbar_height_px: i32) -> WindowRect {
    let (width, height) = platform_host_web::viewport_size()
        .unwrap_or((FALLBACK_VIEWPORT_WIDTH, FALLBACK_VIEWPORT_HEIGHT));
    WindowRect {
        x: 0,
        y: 0,
        w: width.max(320),
        h: (height - taskbar_height_px).max(220),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn non_browser_viewport_excludes_taskbar() {
        assert_eq!(
            desktop_viewport_rect(38),
            WindowRect {
                x: 0,
                y: 0,
                w: 1024,
                h: 730,
            }
        );
    }
}
