pub mod classifier;
pub mod directory;
pub mod image_cache;
pub mod types;

pub use classifier::{Classification, classify, classify_items, find_menu_bar_window};
pub use directory::ItemDirectory;
pub use image_cache::{ItemImage, ItemImageCache, ItemImageCapturer};
pub use types::{
    ItemKey, ItemKeyParseError, MAIN_MENU_LAYER, MENU_BAR_TITLE, MenuBarItem, MenuBarWindow,
    NON_MOVABLE_DISPLAY_NAMES, OWN_ICON_TITLE, OWN_NAMESPACE, STATUS_ITEM_LAYER, display_name,
};
