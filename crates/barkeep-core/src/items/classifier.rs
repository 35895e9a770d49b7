//! Turns a window snapshot into the menu bar window and its items.
//!
//! Classification never fails: windows come and go, so a missing menu bar
//! is reported as `None` and a menu bar without items as an empty list.

use tracing::debug;

use super::types::{MAIN_MENU_LAYER, MENU_BAR_TITLE, MenuBarItem, MenuBarWindow, STATUS_ITEM_LAYER};
use crate::window::{DisplayInfo, WindowRecord};

/// Result of classifying one snapshot for one display
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Classification {
    pub menu_bar: Option<MenuBarWindow>,
    /// Sorted ascending by `frame.max_x()`
    pub items: Vec<MenuBarItem>,
}

/// Whether `record` is the menu bar window of `display`.
pub fn is_menu_bar_window(record: &WindowRecord, display: &DisplayInfo) -> bool {
    record.owner().is_none()
        && record.layer() == MAIN_MENU_LAYER
        && record.title() == Some(MENU_BAR_TITLE)
        && record.is_on_screen()
        && display.frame().contains_rect(&record.frame())
}

/// Whether `record` is a status item drawn inside `menu_bar`.
///
/// Requires an exact match of the top and bottom edges; partially
/// overlapping windows are not items.
pub fn is_item_of(record: &WindowRecord, menu_bar: &MenuBarWindow) -> bool {
    record.layer() == STATUS_ITEM_LAYER && record.frame().same_vertical_extent(&menu_bar.frame())
}

/// Find the menu bar window of `display`.
///
/// The snapshot is in front-to-back order; when several windows qualify the
/// frontmost one wins.
pub fn find_menu_bar_window(
    snapshot: &[WindowRecord],
    display: &DisplayInfo,
) -> Option<MenuBarWindow> {
    snapshot
        .iter()
        .find(|r| is_menu_bar_window(r, display))
        .map(|r| MenuBarWindow::new(r.id(), r.frame(), display.id()))
}

/// Collect the items of `menu_bar`, sorted left to right by their right edge.
pub fn classify_items(snapshot: &[WindowRecord], menu_bar: &MenuBarWindow) -> Vec<MenuBarItem> {
    let mut items: Vec<MenuBarItem> = snapshot
        .iter()
        .filter(|r| is_item_of(r, menu_bar))
        .map(MenuBarItem::from_record)
        .collect();

    // Stable sort keeps snapshot order for equal edges, so repeated runs
    // over the same snapshot agree.
    items.sort_by(|a, b| a.frame().max_x().total_cmp(&b.frame().max_x()));
    items
}

/// Classify a full snapshot for `display`.
pub fn classify(snapshot: &[WindowRecord], display: &DisplayInfo) -> Classification {
    let display_id = display.id();
    let Some(menu_bar) = find_menu_bar_window(snapshot, display) else {
        debug!(
            event = "core.items.classify_no_menu_bar",
            display_id = display_id,
            window_count = snapshot.len()
        );
        return Classification::default();
    };

    let items = classify_items(snapshot, &menu_bar);

    debug!(
        event = "core.items.classify_completed",
        display_id = display_id,
        menu_bar_window = menu_bar.window_id(),
        item_count = items.len()
    );

    Classification {
        menu_bar: Some(menu_bar),
        items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;
    use crate::window::ProcessIdentity;

    fn display() -> DisplayInfo {
        DisplayInfo::new(1, Rect::new(0.0, 0.0, 1440.0, 900.0), true)
    }

    fn menu_bar_record(id: u32, frame: Rect) -> WindowRecord {
        WindowRecord::new(
            id,
            MAIN_MENU_LAYER,
            frame,
            None,
            Some(MENU_BAR_TITLE.to_string()),
            true,
        )
    }

    fn item_record(id: u32, x: f64, width: f64, title: &str) -> WindowRecord {
        WindowRecord::new(
            id,
            STATUS_ITEM_LAYER,
            Rect::new(x, 0.0, width, 24.0),
            Some(ProcessIdentity::new(id as i32, format!("App{}", id), None)),
            Some(title.to_string()),
            true,
        )
    }

    #[test]
    fn test_items_sorted_by_right_edge() {
        let snapshot = vec![
            item_record(12, 270.0, 30.0, "C"),
            menu_bar_record(1, Rect::new(0.0, 0.0, 1440.0, 24.0)),
            item_record(10, 70.0, 30.0, "A"),
            item_record(11, 150.0, 50.0, "B"),
        ];

        let result = classify(&snapshot, &display());
        let titles: Vec<_> = result.items.iter().map(|i| i.title().unwrap()).collect();
        assert_eq!(titles, vec!["A", "B", "C"]);
        assert_eq!(result.menu_bar.unwrap().window_id(), 1);
    }

    #[test]
    fn test_classification_is_deterministic() {
        let snapshot = vec![
            menu_bar_record(1, Rect::new(0.0, 0.0, 1440.0, 24.0)),
            item_record(10, 70.0, 30.0, "A"),
            item_record(11, 60.0, 40.0, "B"),
            item_record(12, 270.0, 30.0, "C"),
        ];

        let first = classify(&snapshot, &display());
        let second = classify(&snapshot, &display());
        assert_eq!(first, second);

        // A and B share a right edge; snapshot order breaks the tie.
        let titles: Vec<_> = first.items.iter().map(|i| i.title().unwrap()).collect();
        assert_eq!(titles, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_no_menu_bar_yields_no_items() {
        let snapshot = vec![item_record(10, 70.0, 30.0, "A")];
        let result = classify(&snapshot, &display());
        assert!(result.menu_bar.is_none());
        assert!(result.items.is_empty());
    }

    #[test]
    fn test_first_matching_menu_bar_wins() {
        let snapshot = vec![
            menu_bar_record(5, Rect::new(0.0, 0.0, 1440.0, 24.0)),
            menu_bar_record(6, Rect::new(0.0, 0.0, 1440.0, 37.0)),
        ];
        let menu_bar = find_menu_bar_window(&snapshot, &display()).unwrap();
        assert_eq!(menu_bar.window_id(), 5);
    }

    #[test]
    fn test_menu_bar_requires_every_property() {
        let frame = Rect::new(0.0, 0.0, 1440.0, 24.0);
        let owned = WindowRecord::new(
            1,
            MAIN_MENU_LAYER,
            frame,
            Some(ProcessIdentity::new(1, "Finder", None)),
            Some(MENU_BAR_TITLE.to_string()),
            true,
        );
        let wrong_title = WindowRecord::new(2, MAIN_MENU_LAYER, frame, None, None, true);
        let off_screen = WindowRecord::new(
            3,
            MAIN_MENU_LAYER,
            frame,
            None,
            Some(MENU_BAR_TITLE.to_string()),
            false,
        );
        let other_display = menu_bar_record(4, Rect::new(1440.0, 0.0, 1920.0, 24.0));
        let wrong_layer = WindowRecord::new(
            5,
            STATUS_ITEM_LAYER,
            frame,
            None,
            Some(MENU_BAR_TITLE.to_string()),
            true,
        );

        let snapshot = vec![owned, wrong_title, off_screen, other_display, wrong_layer];
        assert!(find_menu_bar_window(&snapshot, &display()).is_none());
    }

    #[test]
    fn test_partial_vertical_overlap_is_excluded() {
        let mut snapshot = vec![menu_bar_record(1, Rect::new(0.0, 0.0, 1440.0, 24.0))];
        snapshot.push(WindowRecord::new(
            20,
            STATUS_ITEM_LAYER,
            Rect::new(300.0, 2.0, 30.0, 22.0),
            None,
            Some("Short".to_string()),
            true,
        ));
        snapshot.push(WindowRecord::new(
            21,
            0,
            Rect::new(400.0, 0.0, 30.0, 24.0),
            None,
            Some("Normal layer".to_string()),
            true,
        ));
        snapshot.push(item_record(22, 500.0, 30.0, "Kept"));

        let result = classify(&snapshot, &display());
        assert_eq!(result.items.len(), 1);
        assert_eq!(result.items[0].title(), Some("Kept"));
    }

    #[test]
    fn test_off_screen_items_still_classified() {
        let mut hidden = item_record(30, -200.0, 30.0, "Hidden");
        hidden = WindowRecord::new(
            hidden.id(),
            hidden.layer(),
            hidden.frame(),
            hidden.owner().cloned(),
            hidden.title().map(str::to_string),
            false,
        );
        let snapshot = vec![
            menu_bar_record(1, Rect::new(0.0, 0.0, 1440.0, 24.0)),
            hidden,
        ];

        let result = classify(&snapshot, &display());
        assert_eq!(result.items.len(), 1);
        assert!(!result.items[0].is_on_screen());
    }
}
