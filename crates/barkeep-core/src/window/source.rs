//! Window snapshot source trait.

use super::errors::WindowError;
use super::types::{DisplayInfo, SnapshotScope, WindowRecord};

/// Point-in-time access to the window server's window list.
///
/// Implementations must return records in the window server's front-to-back
/// order; the classifier relies on it to pick between competing menu bar
/// windows.
pub trait WindowSource: Send + Sync {
    /// Take a snapshot of windows in `scope`, optionally restricted to the
    /// windows that overlap `display`.
    fn windows(
        &self,
        scope: SnapshotScope,
        display: Option<&DisplayInfo>,
    ) -> Result<Vec<WindowRecord>, WindowError>;

    /// List the active displays.
    fn displays(&self) -> Result<Vec<DisplayInfo>, WindowError>;

    /// The main display (the one hosting the active menu bar).
    fn main_display(&self) -> Result<DisplayInfo, WindowError> {
        let displays = self.displays()?;
        let fallback = displays.first().cloned();
        displays
            .into_iter()
            .find(DisplayInfo::is_main)
            .or(fallback)
            .ok_or(WindowError::NoDisplays)
    }

    /// Look up a display by id.
    fn display(&self, id: u32) -> Result<DisplayInfo, WindowError> {
        self.displays()?
            .into_iter()
            .find(|d| d.id() == id)
            .ok_or(WindowError::DisplayNotFound { id })
    }
}

/// Keep the records that belong to `display`, preserving order.
///
/// A window belongs to the display it overlaps. Windows parked past every
/// screen edge, as hidden menu bar items are, belong to each display whose
/// vertical band they share.
pub fn restrict_to_display(
    records: Vec<WindowRecord>,
    display: Option<&DisplayInfo>,
    displays: &[DisplayInfo],
) -> Vec<WindowRecord> {
    let Some(display) = display else {
        return records;
    };

    let bounds = display.frame();
    records
        .into_iter()
        .filter(|r| {
            let frame = r.frame();
            if bounds.intersects(&frame) {
                return true;
            }
            let on_any_display = displays.iter().any(|d| d.frame().intersects(&frame));
            !on_any_display && bounds.overlaps_vertically(&frame)
        })
        .collect()
}
