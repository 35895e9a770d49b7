use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::Rect;
use crate::window::{ProcessIdentity, WindowId, WindowRecord};

/// Window layer of the menu bar surface (`kCGMainMenuWindowLevel`)
pub const MAIN_MENU_LAYER: i32 = 24;

/// Window layer of status items (`kCGStatusWindowLevel`)
pub const STATUS_ITEM_LAYER: i32 = 25;

/// Title the window server gives the menu bar window
pub const MENU_BAR_TITLE: &str = "Menubar";

/// Separator between namespace and title in a persisted item key
pub const KEY_SEPARATOR: char = '/';

/// Namespace of the new-items placeholder sentinel
pub const SPECIAL_NAMESPACE: &str = "{Special}";

/// Title of the new-items placeholder sentinel
pub const NEW_ITEMS_TITLE: &str = "NewItems";

/// Namespace of barkeep's own items. The binary has no bundle identifier,
/// so the window server reports it by process name.
pub const OWN_NAMESPACE: &str = "barkeep";

/// Title of barkeep's own menu bar icon
pub const OWN_ICON_TITLE: &str = "BarkeepIcon";

/// Namespace used for items whose owner cannot be identified
pub const UNOWNED_NAMESPACE: &str = "{WindowServer}";

/// Display names of system-reserved items that cannot be dragged
pub const NON_MOVABLE_DISPLAY_NAMES: &[&str] = &["Clock", "Siri", "Control Center"];

const CONTROL_CENTER_NAMESPACE: &str = "com.apple.controlcenter";
const SYSTEM_UI_SERVER_NAMESPACE: &str = "com.apple.systemuiserver";

/// Stable identity of a menu bar item across snapshots.
///
/// Window ids are not stable across snapshots, so items are matched by
/// owning-process namespace and title. Persisted as `namespace/title`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemKey {
    namespace: String,
    title: String,
}

impl ItemKey {
    pub fn new(namespace: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            title: title.into(),
        }
    }

    /// Parse a `namespace/title` token. The namespace ends at the first
    /// separator; the title may itself contain separators.
    pub fn parse(token: &str) -> Result<Self, ItemKeyParseError> {
        let (namespace, title) =
            token
                .split_once(KEY_SEPARATOR)
                .ok_or_else(|| ItemKeyParseError::MissingSeparator {
                    token: token.to_string(),
                })?;

        if namespace.is_empty() {
            return Err(ItemKeyParseError::EmptyNamespace {
                token: token.to_string(),
            });
        }

        Ok(Self::new(namespace, title))
    }

    /// Key of the new-items placeholder
    pub fn new_items() -> Self {
        Self::new(SPECIAL_NAMESPACE, NEW_ITEMS_TITLE)
    }

    /// Key of barkeep's own icon
    pub fn own_icon() -> Self {
        Self::new(OWN_NAMESPACE, OWN_ICON_TITLE)
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Sentinel keys name placeholders, not draggable windows
    pub fn is_sentinel(&self) -> bool {
        *self == Self::new_items() || *self == Self::own_icon()
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.namespace, KEY_SEPARATOR, self.title)
    }
}

impl std::str::FromStr for ItemKey {
    type Err = ItemKeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ItemKeyParseError {
    #[error("Invalid item '{token}': expected '<namespace>/<title>'")]
    MissingSeparator { token: String },

    #[error("Invalid item '{token}': namespace cannot be empty")]
    EmptyNamespace { token: String },
}

/// The window that draws the menu bar itself on one display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuBarWindow {
    window_id: WindowId,
    frame: Rect,
    display_id: u32,
}

impl MenuBarWindow {
    pub(crate) fn new(window_id: WindowId, frame: Rect, display_id: u32) -> Self {
        Self {
            window_id,
            frame,
            display_id,
        }
    }

    pub fn window_id(&self) -> WindowId {
        self.window_id
    }

    pub fn frame(&self) -> Rect {
        self.frame
    }

    pub fn display_id(&self) -> u32 {
        self.display_id
    }
}

/// A status item window living inside a menu bar window.
///
/// Always derived fresh from a snapshot and never mutated; a move
/// invalidates every previously held value for the affected display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuBarItem {
    window_id: WindowId,
    frame: Rect,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    owner: Option<ProcessIdentity>,
    is_on_screen: bool,
    display_name: String,
    is_movable: bool,
}

impl MenuBarItem {
    pub fn from_record(record: &WindowRecord) -> Self {
        let owner = record.owner().cloned();
        let title = record.title().map(str::to_string);
        let display_name = display_name(owner.as_ref(), title.as_deref());
        let is_movable = !NON_MOVABLE_DISPLAY_NAMES.contains(&display_name.as_str());

        Self {
            window_id: record.id(),
            frame: record.frame(),
            title,
            owner,
            is_on_screen: record.is_on_screen(),
            display_name,
            is_movable,
        }
    }

    pub fn window_id(&self) -> WindowId {
        self.window_id
    }

    pub fn frame(&self) -> Rect {
        self.frame
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn owner(&self) -> Option<&ProcessIdentity> {
        self.owner.as_ref()
    }

    pub fn is_on_screen(&self) -> bool {
        self.is_on_screen
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn is_movable(&self) -> bool {
        self.is_movable
    }

    /// Cross-snapshot identity of this item
    pub fn key(&self) -> ItemKey {
        let namespace = self
            .owner
            .as_ref()
            .map_or(UNOWNED_NAMESPACE, ProcessIdentity::namespace);
        ItemKey::new(namespace, self.title.as_deref().unwrap_or_default())
    }
}

/// Resolve the human-readable name of an item.
///
/// Control Center and SystemUIServer host many items under opaque titles;
/// those map to the names users see in System Settings. Everything else is
/// named after its owning process, falling back to the title.
pub fn display_name(owner: Option<&ProcessIdentity>, title: Option<&str>) -> String {
    if let (Some(owner), Some(title)) = (owner, title)
        && let Some(name) = special_display_name(owner.namespace(), title)
    {
        return name.to_string();
    }

    if let Some(owner) = owner
        && !owner.name().is_empty()
    {
        return match (owner.namespace(), title) {
            (CONTROL_CENTER_NAMESPACE | SYSTEM_UI_SERVER_NAMESPACE, Some(title))
                if !title.is_empty() =>
            {
                title.to_string()
            }
            _ => owner.name().to_string(),
        };
    }

    match title {
        Some(title) if !title.is_empty() => title.to_string(),
        _ => "Unknown".to_string(),
    }
}

fn special_display_name(namespace: &str, title: &str) -> Option<&'static str> {
    match (namespace, title) {
        (CONTROL_CENTER_NAMESPACE, "AccessibilityShortcuts") => Some("Accessibility Shortcuts"),
        (CONTROL_CENTER_NAMESPACE, "BentoBox") => Some("Control Center"),
        (CONTROL_CENTER_NAMESPACE, "Clock") => Some("Clock"),
        (CONTROL_CENTER_NAMESPACE, "FocusModes") => Some("Focus"),
        (CONTROL_CENTER_NAMESPACE, "KeyboardBrightness") => Some("Keyboard Brightness"),
        (CONTROL_CENTER_NAMESPACE, "MusicRecognition") => Some("Music Recognition"),
        (CONTROL_CENTER_NAMESPACE, "NowPlaying") => Some("Now Playing"),
        (CONTROL_CENTER_NAMESPACE, "ScreenMirroring") => Some("Screen Mirroring"),
        (CONTROL_CENTER_NAMESPACE, "StageManager") => Some("Stage Manager"),
        (CONTROL_CENTER_NAMESPACE, "UserSwitcher") => Some("Fast User Switching"),
        (CONTROL_CENTER_NAMESPACE, "WiFi") => Some("Wi-Fi"),
        (
            SYSTEM_UI_SERVER_NAMESPACE,
            "TimeMachine.TMMenuExtraHost" | "TimeMachineMenuExtra.TMMenuExtraHost",
        ) => Some("Time Machine"),
        _ => None,
    }
}
