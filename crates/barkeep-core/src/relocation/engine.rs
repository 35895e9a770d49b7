//! Moves a menu bar item next to another one with a synthetic Command-drag.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use super::errors::MoveError;
use super::types::{Destination, MoveOutcome, MoveRequest, RelocationSettings};
use crate::geometry::Point;
use crate::input::{
    CursorControl, InputBackend, ModifierFlags, MouseEventKind, SyntheticEvent,
    SyntheticInputChannel,
};
use crate::items::{ItemDirectory, ItemKey, MenuBarItem};
use crate::window::{SnapshotScope, WindowSource};

pub struct RelocationEngine<S: WindowSource, B: InputBackend, C: CursorControl> {
    directory: Arc<ItemDirectory<S>>,
    channel: SyntheticInputChannel<B>,
    cursor: Arc<C>,
    settings: RelocationSettings,
    // The pointer and cursor are process-wide; one drag at a time.
    in_flight: Mutex<()>,
}

impl<S, B, C> RelocationEngine<S, B, C>
where
    S: WindowSource,
    B: InputBackend,
    C: CursorControl,
{
    pub fn new(
        directory: Arc<ItemDirectory<S>>,
        channel: SyntheticInputChannel<B>,
        cursor: Arc<C>,
        settings: RelocationSettings,
    ) -> Self {
        Self {
            directory,
            channel,
            cursor,
            settings,
            in_flight: Mutex::new(()),
        }
    }

    /// Build the input channel from `settings` around `backend`.
    pub fn with_backend(
        directory: Arc<ItemDirectory<S>>,
        backend: Arc<B>,
        cursor: Arc<C>,
        settings: RelocationSettings,
    ) -> Self {
        let channel =
            SyntheticInputChannel::new(backend, settings.tap_location, settings.event_timeout);
        Self::new(directory, channel, cursor, settings)
    }

    pub fn directory(&self) -> &Arc<ItemDirectory<S>> {
        &self.directory
    }

    pub fn settings(&self) -> &RelocationSettings {
        &self.settings
    }

    /// Move an item to the left or right of another item.
    ///
    /// Both items are re-resolved from a fresh snapshot, so positions the
    /// caller saw earlier never matter. Dropping the returned future cancels
    /// the move; the event monitor is torn down and the pointer restored.
    ///
    /// # Errors
    ///
    /// Fails before posting any event when the menu bar or either item cannot
    /// be resolved or either item is not movable. Once dragging has started,
    /// the first unconfirmed event aborts the move.
    pub async fn move_item(&self, request: &MoveRequest) -> Result<MoveOutcome, MoveError> {
        let item = request.item();
        let destination = request.destination();
        let display_id = request.display().id();

        info!(
            event = "core.relocation.move_started",
            item = %item,
            side = destination.side(),
            reference = %destination.reference(),
            display_id = display_id
        );

        let result = self.relocate(request).await;

        match &result {
            Ok(outcome) => info!(
                event = "core.relocation.move_completed",
                item = %item,
                outcome = outcome.as_str()
            ),
            Err(e) => error!(
                event = "core.relocation.move_failed",
                item = %item,
                error = %e
            ),
        }

        result
    }

    async fn relocate(&self, request: &MoveRequest) -> Result<MoveOutcome, MoveError> {
        for key in [request.item(), request.destination().reference()] {
            if key.is_sentinel() {
                return Err(MoveError::ItemNotMovable {
                    item: key.clone(),
                    display_name: key.title().to_string(),
                });
            }
        }

        let _in_flight = self.in_flight.lock().await;

        let origin = self
            .cursor
            .pointer_location()
            .map_err(|_| MoveError::NoMouseLocation)?;

        let display = request.display();
        let classification = self.directory.snapshot(display, SnapshotScope::All)?;
        if classification.menu_bar.is_none() {
            return Err(MoveError::NoMenuBarWindow {
                display_id: display.id(),
            });
        }
        let items = classification.items;

        let source_index = position_of(&items, request.item())?;
        let reference_index = position_of(&items, request.destination().reference())?;
        let source = &items[source_index];
        let reference = &items[reference_index];

        for resolved in [source, reference] {
            if !resolved.is_movable() {
                return Err(MoveError::ItemNotMovable {
                    item: resolved.key(),
                    display_name: resolved.display_name().to_string(),
                });
            }
        }

        let already_adjacent = match request.destination() {
            Destination::LeftOf(_) => source_index + 1 == reference_index,
            Destination::RightOf(_) => reference_index + 1 == source_index,
        };
        if source_index == reference_index || already_adjacent {
            debug!(
                event = "core.relocation.move_skipped",
                item = %request.item(),
                reason = "already_in_place"
            );
            return Ok(MoveOutcome::AlreadyInPlace);
        }

        let start = source.frame().center();
        let end = drop_point(reference, request.destination());
        if start == end {
            debug!(
                event = "core.relocation.move_skipped",
                item = %request.item(),
                reason = "no_distance"
            );
            return Ok(MoveOutcome::AlreadyInPlace);
        }

        debug!(
            event = "core.relocation.drag_planned",
            item = %request.item(),
            window_id = source.window_id(),
            start = %start,
            end = %end,
            origin = %origin
        );

        self.drag(source.display_name(), origin, start, end).await?;
        Ok(MoveOutcome::Moved)
    }

    async fn drag(
        &self,
        display_name: &str,
        origin: Point,
        start: Point,
        end: Point,
    ) -> Result<(), MoveError> {
        let _cursor = CursorGuard::hide(self.cursor.as_ref(), origin)
            .map_err(|e| MoveError::from_input(e, display_name))?;
        self.cursor
            .warp_pointer(start)
            .map_err(|e| MoveError::from_input(e, display_name))?;

        let mouse_down = SyntheticEvent::new(MouseEventKind::LeftMouseDown, start)
            .with_modifiers(ModifierFlags::COMMAND);
        let release_at_start = SyntheticEvent::new(MouseEventKind::LeftMouseUp, start);
        self.channel
            .post(mouse_down, release_at_start)
            .await
            .map_err(|e| MoveError::from_input(e, display_name))?;

        tokio::time::sleep(self.settings.drag_delay).await;

        let mouse_up = SyntheticEvent::new(MouseEventKind::LeftMouseUp, end)
            .with_modifiers(ModifierFlags::COMMAND);
        let release_at_end = SyntheticEvent::new(MouseEventKind::LeftMouseUp, end);
        self.channel
            .post(mouse_up, release_at_end)
            .await
            .map_err(|e| MoveError::from_input(e, display_name))
    }
}

fn position_of(items: &[MenuBarItem], key: &ItemKey) -> Result<usize, MoveError> {
    items
        .iter()
        .position(|item| item.key() == *key)
        .ok_or_else(|| MoveError::ItemVanished { item: key.clone() })
}

/// Where the dragged item is released: the reference item's near edge at
/// its vertical centre.
pub fn drop_point(reference: &MenuBarItem, destination: &Destination) -> Point {
    let frame = reference.frame();
    let x = match destination {
        Destination::LeftOf(_) => frame.min_x(),
        Destination::RightOf(_) => frame.max_x(),
    };
    Point::new(x, frame.mid_y())
}

/// Decouples and hides the cursor; restores pointer position, coupling and
/// visibility when dropped.
struct CursorGuard<'a, C: CursorControl> {
    cursor: &'a C,
    origin: Point,
}

impl<'a, C: CursorControl> CursorGuard<'a, C> {
    fn hide(cursor: &'a C, origin: Point) -> Result<Self, crate::input::InputError> {
        // Built first so a partial failure below is still undone.
        let guard = Self { cursor, origin };
        cursor.set_pointer_coupled(false)?;
        cursor.set_cursor_visible(false)?;
        Ok(guard)
    }
}

impl<C: CursorControl> Drop for CursorGuard<'_, C> {
    fn drop(&mut self) {
        if let Err(e) = self.cursor.warp_pointer(self.origin) {
            warn!(event = "core.relocation.pointer_restore_failed", error = %e);
        }
        if let Err(e) = self.cursor.set_pointer_coupled(true) {
            warn!(event = "core.relocation.pointer_couple_failed", error = %e);
        }
        if let Err(e) = self.cursor.set_cursor_visible(true) {
            warn!(event = "core.relocation.cursor_show_failed", error = %e);
        }
        debug!(event = "core.relocation.cursor_restored", origin = %self.origin);
    }
}
