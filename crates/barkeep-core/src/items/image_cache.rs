use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use image::RgbaImage;
use tracing::warn;

use super::types::{ItemKey, MenuBarItem};
use crate::window::WindowError;

/// Shared, immutable bitmap of an item
pub type ItemImage = Arc<RgbaImage>;

/// Captures the current bitmap of an item window.
pub trait ItemImageCapturer: Send + Sync {
    fn capture(&self, item: &MenuBarItem) -> Result<RgbaImage, WindowError>;
}

/// Item images keyed by item identity.
///
/// Entries are created on first successful capture and never evicted here;
/// their lifetime belongs to whoever displays them.
#[derive(Debug, Default)]
pub struct ItemImageCache {
    images: RwLock<HashMap<ItemKey, ItemImage>>,
}

impl ItemImageCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &ItemKey) -> Option<ItemImage> {
        match self.images.read() {
            Ok(images) => images.get(key).cloned(),
            Err(e) => {
                warn!(event = "core.items.image_cache_lock_poisoned", error = %e);
                e.into_inner().get(key).cloned()
            }
        }
    }

    pub fn insert(&self, key: ItemKey, image: ItemImage) {
        match self.images.write() {
            Ok(mut images) => {
                images.insert(key, image);
            }
            Err(e) => {
                warn!(event = "core.items.image_cache_lock_poisoned", error = %e);
                e.into_inner().insert(key, image);
            }
        }
    }

    pub fn contains(&self, key: &ItemKey) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        match self.images.read() {
            Ok(images) => images.len(),
            Err(e) => e.into_inner().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
