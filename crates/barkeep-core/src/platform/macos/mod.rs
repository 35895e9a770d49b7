//! Core Graphics backends.

mod capture;
mod cursor;
mod input;
mod process;
mod windows;

use accessibility_sys::AXIsProcessTrusted;
use core_graphics::geometry::{CGPoint, CGRect};

use crate::geometry::{Point, Rect};
use crate::input::InputError;

pub use capture::XcapItemCapturer;
pub use cursor::CoreGraphicsCursor;
pub use input::CoreGraphicsInput;
pub use windows::CoreGraphicsWindowSource;

pub(crate) fn check_accessibility_permission() -> Result<(), InputError> {
    let trusted = unsafe { AXIsProcessTrusted() };
    if !trusted {
        return Err(InputError::AccessibilityPermissionDenied);
    }
    Ok(())
}

fn to_rect(rect: &CGRect) -> Rect {
    Rect::new(
        rect.origin.x,
        rect.origin.y,
        rect.size.width,
        rect.size.height,
    )
}

fn to_cg_point(point: Point) -> CGPoint {
    CGPoint::new(point.x, point.y)
}

fn to_point(point: CGPoint) -> Point {
    Point::new(point.x, point.y)
}
