use core_graphics::display::CGDisplay;
use core_graphics::event::CGEvent;
use core_graphics::event_source::{CGEventSource, CGEventSourceStateID};
use tracing::debug;

use super::{to_cg_point, to_point};
use crate::geometry::Point;
use crate::input::{CursorControl, InputError};

/// Pointer and cursor control through Core Graphics display services.
#[derive(Debug, Default)]
pub struct CoreGraphicsCursor;

impl CoreGraphicsCursor {
    pub fn new() -> Self {
        Self
    }
}

impl CursorControl for CoreGraphicsCursor {
    fn pointer_location(&self) -> Result<Point, InputError> {
        let source = CGEventSource::new(CGEventSourceStateID::CombinedSessionState)
            .map_err(|()| InputError::NoMouseLocation)?;
        let event = CGEvent::new(source).map_err(|()| InputError::NoMouseLocation)?;
        Ok(to_point(event.location()))
    }

    fn warp_pointer(&self, to: Point) -> Result<(), InputError> {
        debug!(event = "core.platform.pointer_warp", x = to.x, y = to.y);
        CGDisplay::warp_mouse_cursor_position(to_cg_point(to)).map_err(|e| {
            InputError::CursorFailed {
                message: format!("CGWarpMouseCursorPosition failed with error {}", e),
            }
        })
    }

    fn set_pointer_coupled(&self, coupled: bool) -> Result<(), InputError> {
        CGDisplay::associate_mouse_and_mouse_cursor_position(coupled).map_err(|e| {
            InputError::CursorFailed {
                message: format!(
                    "CGAssociateMouseAndMouseCursorPosition({}) failed with error {}",
                    coupled, e
                ),
            }
        })
    }

    fn set_cursor_visible(&self, visible: bool) -> Result<(), InputError> {
        let display = CGDisplay::main();
        let result = if visible {
            display.show_cursor()
        } else {
            display.hide_cursor()
        };
        result.map_err(|e| InputError::CursorFailed {
            message: format!(
                "{} failed with error {}",
                if visible {
                    "CGDisplayShowCursor"
                } else {
                    "CGDisplayHideCursor"
                },
                e
            ),
        })
    }
}
