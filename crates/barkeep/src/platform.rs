//! Entry points that need the window server.
//!
//! Everything else in the CLI is platform independent, so argument errors
//! are reported the same way on every OS.

use barkeep_core::errors::boxed;
use barkeep_core::relocation::Destination;
use barkeep_core::{
    BarkeepResult, DisplayInfo, ItemKey, MenuBarItem, MoveOutcome, RelocationSettings,
    SnapshotScope, WindowError,
};

#[cfg(target_os = "macos")]
mod imp {
    use std::sync::Arc;

    use barkeep_core::platform::{
        CoreGraphicsCursor, CoreGraphicsInput, CoreGraphicsWindowSource, check_accessibility,
    };
    use barkeep_core::{ItemDirectory, MoveRequest, RelocationEngine, WindowSource};

    use super::*;

    pub fn displays() -> Result<Vec<DisplayInfo>, WindowError> {
        CoreGraphicsWindowSource::new().displays()
    }

    pub fn list_items(
        display_id: Option<u32>,
        scope: SnapshotScope,
    ) -> Result<(DisplayInfo, Vec<MenuBarItem>), WindowError> {
        let directory = ItemDirectory::new(Arc::new(CoreGraphicsWindowSource::new()));
        let display = resolve_display(directory.source(), display_id)?;
        let items = directory.items(&display, scope)?;
        Ok((display, items))
    }

    pub async fn move_item(
        item: ItemKey,
        destination: Destination,
        display_id: Option<u32>,
        settings: RelocationSettings,
    ) -> BarkeepResult<MoveOutcome> {
        check_accessibility().map_err(boxed)?;

        let source = Arc::new(CoreGraphicsWindowSource::new());
        let display = resolve_display(source.as_ref(), display_id).map_err(boxed)?;
        let engine = RelocationEngine::with_backend(
            Arc::new(ItemDirectory::new(source)),
            Arc::new(CoreGraphicsInput::new()),
            Arc::new(CoreGraphicsCursor::new()),
            settings,
        );

        let request = MoveRequest::new(item, destination, display);
        engine.move_item(&request).await.map_err(boxed)
    }

    fn resolve_display(
        source: &impl WindowSource,
        display_id: Option<u32>,
    ) -> Result<DisplayInfo, WindowError> {
        match display_id {
            Some(id) => source.display(id),
            None => source.main_display(),
        }
    }
}

#[cfg(not(target_os = "macos"))]
mod imp {
    use super::*;

    pub fn displays() -> Result<Vec<DisplayInfo>, WindowError> {
        Err(WindowError::Unsupported)
    }

    pub fn list_items(
        _display_id: Option<u32>,
        _scope: SnapshotScope,
    ) -> Result<(DisplayInfo, Vec<MenuBarItem>), WindowError> {
        Err(WindowError::Unsupported)
    }

    pub async fn move_item(
        _item: ItemKey,
        _destination: Destination,
        _display_id: Option<u32>,
        _settings: RelocationSettings,
    ) -> BarkeepResult<MoveOutcome> {
        Err(boxed(barkeep_core::InputError::Unsupported))
    }
}

pub use imp::{displays, list_items, move_item};
