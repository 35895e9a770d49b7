use std::fmt;
use std::time::Duration;

use crate::input::{DEFAULT_EVENT_TIMEOUT, TapLocation};
use crate::items::ItemKey;
use crate::window::DisplayInfo;

/// Pause between mouse-down and mouse-up; instant clicks are not treated as drags.
pub const DEFAULT_DRAG_DELAY: Duration = Duration::from_millis(25);

/// Where an item should end up, relative to a neighbour
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    LeftOf(ItemKey),
    RightOf(ItemKey),
}

impl Destination {
    /// The item the destination is relative to.
    pub fn reference(&self) -> &ItemKey {
        match self {
            Destination::LeftOf(key) | Destination::RightOf(key) => key,
        }
    }

    pub fn side(&self) -> &'static str {
        match self {
            Destination::LeftOf(_) => "left_of",
            Destination::RightOf(_) => "right_of",
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::LeftOf(key) => write!(f, "left of {}", key),
            Destination::RightOf(key) => write!(f, "right of {}", key),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MoveRequest {
    item: ItemKey,
    destination: Destination,
    display: DisplayInfo,
}

impl MoveRequest {
    pub fn new(item: ItemKey, destination: Destination, display: DisplayInfo) -> Self {
        Self {
            item,
            destination,
            display,
        }
    }

    pub fn item(&self) -> &ItemKey {
        &self.item
    }

    pub fn destination(&self) -> &Destination {
        &self.destination
    }

    pub fn display(&self) -> &DisplayInfo {
        &self.display
    }
}

/// Successful result of a move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The drag was performed and confirmed
    Moved,
    /// The item was already there; no events were posted
    AlreadyInPlace,
}

impl MoveOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            MoveOutcome::Moved => "moved",
            MoveOutcome::AlreadyInPlace => "already_in_place",
        }
    }
}

/// Tunables of the relocation engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelocationSettings {
    pub event_timeout: Duration,
    pub drag_delay: Duration,
    pub tap_location: TapLocation,
}

impl Default for RelocationSettings {
    fn default() -> Self {
        Self {
            event_timeout: DEFAULT_EVENT_TIMEOUT,
            drag_delay: DEFAULT_DRAG_DELAY,
            tap_location: TapLocation::default(),
        }
    }
}
