use image::RgbaImage;
use tracing::debug;

use crate::items::{ItemImageCapturer, MenuBarItem};
use crate::window::WindowError;

/// Captures item windows with `xcap`.
#[derive(Debug, Default)]
pub struct XcapItemCapturer;

impl XcapItemCapturer {
    pub fn new() -> Self {
        Self
    }
}

impl ItemImageCapturer for XcapItemCapturer {
    fn capture(&self, item: &MenuBarItem) -> Result<RgbaImage, WindowError> {
        let window_id = item.window_id();
        let capture_failed = |message: String| WindowError::CaptureFailed { window_id, message };

        let windows = xcap::Window::all().map_err(|e| capture_failed(e.to_string()))?;
        let window = windows
            .into_iter()
            .find(|w| w.id().ok() == Some(window_id))
            .ok_or_else(|| capture_failed("window not listed".to_string()))?;

        let image = window
            .capture_image()
            .map_err(|e| capture_failed(e.to_string()))?;

        debug!(
            event = "core.platform.item_captured",
            window_id = window_id,
            width = image.width(),
            height = image.height()
        );
        Ok(image)
    }
}
