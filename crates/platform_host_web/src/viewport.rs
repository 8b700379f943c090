//! Browser viewport measurement.

/// Returns the browser window's inner size in CSS pixels, or `None` off the browser.
pub fn viewport_size() -> Option<(i32, i32)> {
    #[cfg(target_arch = "wasm32")]
    {
        let window = web_sys::window()?;
        let width = window.inner_width().ok()?.as_f64()?;
        let height = window.inner_height().ok()?.as_f64()?;
        Some((width as i32, height as i32))
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        None
    }
}
