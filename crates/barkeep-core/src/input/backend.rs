//! OS input primitives used by the channel and the relocation engine.

use std::sync::Arc;

use super::errors::InputError;
use super::registry::{MonitorId, MonitorRegistry};
use super::types::{EventFilter, SyntheticEvent, TapLocation};
use crate::geometry::Point;

/// Posts synthetic events and installs passive event monitors.
pub trait InputBackend: Send + Sync {
    /// Install a listen-only monitor at `location`.
    ///
    /// The monitor must be armed when this returns. Whenever it sees an event
    /// accepted by `filter` it calls `registry.observed(id)`.
    fn install_monitor(
        &self,
        id: MonitorId,
        filter: &EventFilter,
        location: TapLocation,
        registry: Arc<MonitorRegistry>,
    ) -> Result<(), InputError>;

    /// Tear down monitor `id`. Unknown ids are ignored.
    fn remove_monitor(&self, id: MonitorId);

    /// Construct `event` and post it at `location`.
    fn post(&self, event: &SyntheticEvent, location: TapLocation) -> Result<(), InputError>;
}

/// Process-wide pointer and cursor state.
pub trait CursorControl: Send + Sync {
    fn pointer_location(&self) -> Result<Point, InputError>;

    fn warp_pointer(&self, to: Point) -> Result<(), InputError>;

    /// Couple or decouple physical mouse movement from the pointer.
    fn set_pointer_coupled(&self, coupled: bool) -> Result<(), InputError>;

    fn set_cursor_visible(&self, visible: bool) -> Result<(), InputError>;
}

impl<T: InputBackend + ?Sized> InputBackend for Arc<T> {
    fn install_monitor(
        &self,
        id: MonitorId,
        filter: &EventFilter,
        location: TapLocation,
        registry: Arc<MonitorRegistry>,
    ) -> Result<(), InputError> {
        (**self).install_monitor(id, filter, location, registry)
    }

    fn remove_monitor(&self, id: MonitorId) {
        (**self).remove_monitor(id)
    }

    fn post(&self, event: &SyntheticEvent, location: TapLocation) -> Result<(), InputError> {
        (**self).post(event, location)
    }
}

impl<T: CursorControl + ?Sized> CursorControl for Arc<T> {
    fn pointer_location(&self) -> Result<Point, InputError> {
        (**self).pointer_location()
    }

    fn warp_pointer(&self, to: Point) -> Result<(), InputError> {
        (**self).warp_pointer(to)
    }

    fn set_pointer_coupled(&self, coupled: bool) -> Result<(), InputError> {
        (**self).set_pointer_coupled(coupled)
    }

    fn set_cursor_visible(&self, visible: bool) -> Result<(), InputError> {
        (**self).set_cursor_visible(visible)
    }
}
