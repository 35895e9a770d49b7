use serde::{Deserialize, Serialize};

use crate::geometry::Rect;

/// Window server identifier for a window
pub type WindowId = u32;

/// Identity of the process that owns a window.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProcessIdentity {
    pid: i32,
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    bundle_id: Option<String>,
}

impl ProcessIdentity {
    pub fn new(pid: i32, name: impl Into<String>, bundle_id: Option<String>) -> Self {
        Self {
            pid,
            name: name.into(),
            bundle_id,
        }
    }

    pub fn pid(&self) -> i32 {
        self.pid
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bundle_id(&self) -> Option<&str> {
        self.bundle_id.as_deref()
    }

    /// The namespace half of an item key: bundle identifier when known,
    /// otherwise the process name.
    pub fn namespace(&self) -> &str {
        self.bundle_id.as_deref().unwrap_or(&self.name)
    }
}

/// One entry of a window server snapshot.
///
/// Records are immutable. Windows move and disappear between snapshots, so
/// any operation that needs current truth takes a new snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowRecord {
    id: WindowId,
    layer: i32,
    frame: Rect,
    /// `None` for windows owned by the window server itself
    owner: Option<ProcessIdentity>,
    title: Option<String>,
    is_on_screen: bool,
}

impl WindowRecord {
    pub fn new(
        id: WindowId,
        layer: i32,
        frame: Rect,
        owner: Option<ProcessIdentity>,
        title: Option<String>,
        is_on_screen: bool,
    ) -> Self {
        Self {
            id,
            layer,
            frame,
            owner,
            title,
            is_on_screen,
        }
    }

    pub fn id(&self) -> WindowId {
        self.id
    }

    pub fn layer(&self) -> i32 {
        self.layer
    }

    pub fn frame(&self) -> Rect {
        self.frame
    }

    pub fn owner(&self) -> Option<&ProcessIdentity> {
        self.owner.as_ref()
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn is_on_screen(&self) -> bool {
        self.is_on_screen
    }
}

/// A physical display and its frame in global coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayInfo {
    id: u32,
    frame: Rect,
    is_main: bool,
}

impl DisplayInfo {
    pub fn new(id: u32, frame: Rect, is_main: bool) -> Self {
        Self { id, frame, is_main }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn frame(&self) -> Rect {
        self.frame
    }

    pub fn is_main(&self) -> bool {
        self.is_main
    }
}

/// Which windows a snapshot includes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapshotScope {
    /// Only windows currently on screen
    OnScreenOnly,
    /// Every window the window server knows about, including off-screen ones
    #[default]
    All,
}

impl SnapshotScope {
    pub fn from_on_screen_only(on_screen_only: bool) -> Self {
        if on_screen_only {
            SnapshotScope::OnScreenOnly
        } else {
            SnapshotScope::All
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SnapshotScope::OnScreenOnly => "on_screen_only",
            SnapshotScope::All => "all",
        }
    }
}
