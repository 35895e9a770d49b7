use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// Mouse event types the relocation protocol synthesizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseEventKind {
    LeftMouseDown,
    LeftMouseUp,
}

impl MouseEventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MouseEventKind::LeftMouseDown => "mouse-down",
            MouseEventKind::LeftMouseUp => "mouse-up",
        }
    }
}

impl fmt::Display for MouseEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Modifier keys held while an event is delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModifierFlags {
    pub command: bool,
}

impl ModifierFlags {
    pub const NONE: ModifierFlags = ModifierFlags { command: false };

    /// The window server only lets items be reordered while Command is held.
    pub const COMMAND: ModifierFlags = ModifierFlags { command: true };

    pub fn is_empty(&self) -> bool {
        !self.command
    }
}

/// Point in the input pipeline where events are posted and observed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TapLocation {
    /// Where hardware events enter the window server
    Hid,
    /// Where events enter the login session
    #[default]
    Session,
    /// Where session events have been annotated with their target
    AnnotatedSession,
}

impl TapLocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            TapLocation::Hid => "hid",
            TapLocation::Session => "session",
            TapLocation::AnnotatedSession => "annotated_session",
        }
    }
}

/// A mouse event waiting to be posted.
///
/// `user_data` travels with the event through the pipeline and lets an
/// event monitor recognise events it was installed for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SyntheticEvent {
    kind: MouseEventKind,
    location: Point,
    modifiers: ModifierFlags,
    user_data: i64,
}

impl SyntheticEvent {
    pub fn new(kind: MouseEventKind, location: Point) -> Self {
        Self {
            kind,
            location,
            modifiers: ModifierFlags::NONE,
            user_data: 0,
        }
    }

    pub fn with_modifiers(mut self, modifiers: ModifierFlags) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_user_data(mut self, user_data: i64) -> Self {
        self.user_data = user_data;
        self
    }

    pub fn kind(&self) -> MouseEventKind {
        self.kind
    }

    pub fn location(&self) -> Point {
        self.location
    }

    pub fn modifiers(&self) -> ModifierFlags {
        self.modifiers
    }

    pub fn user_data(&self) -> i64 {
        self.user_data
    }
}

/// What a listen-only monitor waits for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventFilter {
    kind: MouseEventKind,
    user_data: Option<i64>,
}

impl EventFilter {
    pub fn new(kind: MouseEventKind) -> Self {
        Self {
            kind,
            user_data: None,
        }
    }

    /// Only match events carrying `user_data`.
    pub fn tagged(kind: MouseEventKind, user_data: i64) -> Self {
        Self {
            kind,
            user_data: Some(user_data),
        }
    }

    pub fn kind(&self) -> MouseEventKind {
        self.kind
    }

    pub fn user_data(&self) -> Option<i64> {
        self.user_data
    }

    pub fn matches(&self, kind: MouseEventKind, user_data: i64) -> bool {
        kind == self.kind && self.user_data.is_none_or(|tag| tag == user_data)
    }
}
