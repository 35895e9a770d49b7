//! Operating system backends.
//!
//! Only macOS has a window server with status item windows; elsewhere the
//! platform entry points report [`InputError::Unsupported`] or
//! [`crate::window::WindowError::Unsupported`].

use std::path::Path;

use crate::input::InputError;

#[cfg(target_os = "macos")]
pub mod macos;

#[cfg(target_os = "macos")]
pub use macos::{
    CoreGraphicsCursor, CoreGraphicsInput, CoreGraphicsWindowSource, XcapItemCapturer,
};

/// Check that this process may observe and post input events.
#[cfg(target_os = "macos")]
pub fn check_accessibility() -> Result<(), InputError> {
    macos::check_accessibility_permission()
}

#[cfg(not(target_os = "macos"))]
pub fn check_accessibility() -> Result<(), InputError> {
    Err(InputError::Unsupported)
}

/// The `.app` bundle an executable lives in, if any.
///
/// `/Applications/Foo.app/Contents/MacOS/Foo` yields `/Applications/Foo.app`;
/// the innermost bundle wins for helpers nested inside another app.
#[cfg_attr(not(target_os = "macos"), allow(dead_code))]
pub(crate) fn app_bundle_path(executable: &Path) -> Option<&Path> {
    executable
        .ancestors()
        .skip(1)
        .find(|p| p.extension().is_some_and(|ext| ext == "app"))
}
