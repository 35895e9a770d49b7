use std::sync::Arc;

use tracing::{debug, info, warn};

use super::classifier::{Classification, classify};
use super::image_cache::{ItemImage, ItemImageCache, ItemImageCapturer};
use super::types::{ItemKey, MenuBarItem, MenuBarWindow};
use crate::window::{DisplayInfo, SnapshotScope, WindowError, WindowSource};

/// Queries the window server for menu bar items and caches their images.
///
/// Every query takes a fresh snapshot; nothing about window geometry is
/// cached between calls.
pub struct ItemDirectory<S: WindowSource> {
    source: Arc<S>,
    images: Arc<ItemImageCache>,
    capturer: Option<Arc<dyn ItemImageCapturer>>,
}

impl<S: WindowSource> ItemDirectory<S> {
    pub fn new(source: Arc<S>) -> Self {
        Self {
            source,
            images: Arc::new(ItemImageCache::new()),
            capturer: None,
        }
    }

    /// Capture images of uncached items after each [`ItemDirectory::items`] query.
    pub fn with_capturer(mut self, capturer: Arc<dyn ItemImageCapturer>) -> Self {
        self.capturer = Some(capturer);
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Classify one fresh snapshot of `display`.
    pub fn snapshot(
        &self,
        display: &DisplayInfo,
        scope: SnapshotScope,
    ) -> Result<Classification, WindowError> {
        let display_id = display.id();
        debug!(
            event = "core.items.snapshot_started",
            display_id = display_id,
            scope = scope.as_str()
        );

        let records = self.source.windows(scope, Some(display))?;
        let classification = classify(&records, display);

        debug!(
            event = "core.items.snapshot_completed",
            display_id = display_id,
            window_count = records.len(),
            has_menu_bar = classification.menu_bar.is_some(),
            item_count = classification.items.len()
        );

        Ok(classification)
    }

    /// Menu bar items of `display`, sorted left to right.
    ///
    /// Schedules capture of missing item images in the background when a
    /// capturer is configured; the query itself never waits for it.
    pub fn items(
        &self,
        display: &DisplayInfo,
        scope: SnapshotScope,
    ) -> Result<Vec<MenuBarItem>, WindowError> {
        let display_id = display.id();
        info!(
            event = "core.items.list_started",
            display_id = display_id,
            scope = scope.as_str()
        );

        let items = self.snapshot(display, scope)?.items;
        self.schedule_image_capture(&items);

        info!(
            event = "core.items.list_completed",
            display_id = display_id,
            count = items.len()
        );
        Ok(items)
    }

    /// The menu bar window of `display`, if one is currently on screen.
    pub fn menu_bar_window(
        &self,
        display: &DisplayInfo,
    ) -> Result<Option<MenuBarWindow>, WindowError> {
        Ok(self
            .snapshot(display, SnapshotScope::OnScreenOnly)?
            .menu_bar)
    }

    pub fn cached_image(&self, key: &ItemKey) -> Option<ItemImage> {
        self.images.get(key)
    }

    pub fn cache_image(&self, key: ItemKey, image: ItemImage) {
        self.images.insert(key, image);
    }

    pub fn image_cache(&self) -> &Arc<ItemImageCache> {
        &self.images
    }

    /// Capture uncached items on the blocking pool of the ambient runtime.
    ///
    /// Advisory: without a runtime or a capturer nothing happens, and
    /// capture failures are only logged.
    fn schedule_image_capture(&self, items: &[MenuBarItem]) {
        let Some(capturer) = self.capturer.clone() else {
            return;
        };

        let pending: Vec<MenuBarItem> = items
            .iter()
            .filter(|item| !self.images.contains(&item.key()))
            .cloned()
            .collect();
        if pending.is_empty() {
            return;
        }

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            debug!(
                event = "core.items.image_capture_skipped",
                reason = "no_runtime",
                pending = pending.len()
            );
            return;
        };

        let images = Arc::clone(&self.images);
        runtime.spawn_blocking(move || capture_images(capturer.as_ref(), &images, pending));
    }
}

fn capture_images(
    capturer: &dyn ItemImageCapturer,
    images: &ItemImageCache,
    pending: Vec<MenuBarItem>,
) {
    let mut captured = 0usize;
    for item in pending {
        let key = item.key();
        if images.contains(&key) {
            continue;
        }
        match capturer.capture(&item) {
            Ok(image) => {
                images.insert(key, Arc::new(image));
                captured += 1;
            }
            Err(e) => {
                warn!(
                    event = "core.items.image_capture_failed",
                    item = %key,
                    window_id = item.window_id(),
                    error = %e
                );
            }
        }
    }

    debug!(event = "core.items.image_capture_completed", captured = captured);
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::time::Duration;

    use image::RgbaImage;

    use super::*;
    use crate::geometry::Rect;
    use crate::items::types::{MAIN_MENU_LAYER, MENU_BAR_TITLE, STATUS_ITEM_LAYER};
    use crate::window::{ProcessIdentity, WindowRecord};

    struct FixedSource {
        records: Vec<WindowRecord>,
        scopes: Mutex<Vec<SnapshotScope>>,
    }

    impl FixedSource {
        fn new(records: Vec<WindowRecord>) -> Self {
            Self {
                records,
                scopes: Mutex::new(Vec::new()),
            }
        }
    }

    impl WindowSource for FixedSource {
        fn windows(
            &self,
            scope: SnapshotScope,
            _display: Option<&DisplayInfo>,
        ) -> Result<Vec<WindowRecord>, WindowError> {
            self.scopes.lock().unwrap().push(scope);
            Ok(self
                .records
                .iter()
                .filter(|r| scope == SnapshotScope::All || r.is_on_screen())
                .cloned()
                .collect())
        }

        fn displays(&self) -> Result<Vec<DisplayInfo>, WindowError> {
            Ok(vec![display()])
        }
    }

    struct CountingCapturer {
        calls: Mutex<Vec<u32>>,
    }

    impl ItemImageCapturer for CountingCapturer {
        fn capture(&self, item: &MenuBarItem) -> Result<RgbaImage, WindowError> {
            self.calls.lock().unwrap().push(item.window_id());
            if item.title() == Some("Broken") {
                return Err(WindowError::CaptureFailed {
                    window_id: item.window_id(),
                    message: "no image".to_string(),
                });
            }
            Ok(RgbaImage::new(item.frame().width as u32, 24))
        }
    }

    fn display() -> DisplayInfo {
        DisplayInfo::new(1, Rect::new(0.0, 0.0, 1440.0, 900.0), true)
    }

    fn snapshot_records() -> Vec<WindowRecord> {
        vec![
            WindowRecord::new(
                1,
                MAIN_MENU_LAYER,
                Rect::new(0.0, 0.0, 1440.0, 24.0),
                None,
                Some(MENU_BAR_TITLE.to_string()),
                true,
            ),
            item(10, 200.0, "C", true),
            item(11, 0.0, "A", false),
            item(12, 100.0, "B", true),
        ]
    }

    fn item(id: u32, x: f64, title: &str, on_screen: bool) -> WindowRecord {
        WindowRecord::new(
            id,
            STATUS_ITEM_LAYER,
            Rect::new(x, 0.0, 100.0, 24.0),
            Some(ProcessIdentity::new(id as i32, format!("App{}", id), None)),
            Some(title.to_string()),
            on_screen,
        )
    }

    #[test]
    fn test_items_sorted_and_scoped() {
        let directory = ItemDirectory::new(Arc::new(FixedSource::new(snapshot_records())));

        let all = directory.items(&display(), SnapshotScope::All).unwrap();
        let titles: Vec<_> = all.iter().map(|i| i.title().unwrap()).collect();
        assert_eq!(titles, vec!["A", "B", "C"]);

        let on_screen = directory
            .items(&display(), SnapshotScope::OnScreenOnly)
            .unwrap();
        let titles: Vec<_> = on_screen.iter().map(|i| i.title().unwrap()).collect();
        assert_eq!(titles, vec!["B", "C"]);
    }

    #[test]
    fn test_menu_bar_window_uses_on_screen_snapshot() {
        let source = Arc::new(FixedSource::new(snapshot_records()));
        let directory = ItemDirectory::new(Arc::clone(&source));

        let menu_bar = directory.menu_bar_window(&display()).unwrap().unwrap();
        assert_eq!(menu_bar.window_id(), 1);
        assert_eq!(
            *source.scopes.lock().unwrap(),
            vec![SnapshotScope::OnScreenOnly]
        );
    }

    #[test]
    fn test_menu_bar_window_absent() {
        let directory = ItemDirectory::new(Arc::new(FixedSource::new(Vec::new())));
        assert!(directory.menu_bar_window(&display()).unwrap().is_none());
    }

    #[test]
    fn test_cache_image_roundtrip() {
        let directory = ItemDirectory::new(Arc::new(FixedSource::new(Vec::new())));
        let key = ItemKey::new("App10", "C");
        assert!(directory.cached_image(&key).is_none());
        directory.cache_image(key.clone(), Arc::new(RgbaImage::new(4, 4)));
        assert!(directory.cached_image(&key).is_some());
    }

    #[test]
    fn test_items_without_runtime_skip_capture() {
        let capturer = Arc::new(CountingCapturer {
            calls: Mutex::new(Vec::new()),
        });
        let directory = ItemDirectory::new(Arc::new(FixedSource::new(snapshot_records())))
            .with_capturer(capturer.clone());

        let items = directory.items(&display(), SnapshotScope::All).unwrap();
        assert_eq!(items.len(), 3);
        assert!(capturer.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_items_capture_images_in_background() {
        let capturer = Arc::new(CountingCapturer {
            calls: Mutex::new(Vec::new()),
        });
        let mut records = snapshot_records();
        records.push(item(13, 300.0, "Broken", true));
        let directory = ItemDirectory::new(Arc::new(FixedSource::new(records)))
            .with_capturer(capturer.clone());

        directory.items(&display(), SnapshotScope::All).unwrap();

        let expected = ItemKey::new("App10", "C");
        for _ in 0..100 {
            if directory.image_cache().len() == 3 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        assert_eq!(directory.image_cache().len(), 3);
        assert!(directory.cached_image(&expected).is_some());
        assert!(
            directory
                .cached_image(&ItemKey::new("App13", "Broken"))
                .is_none()
        );
    }
}
