use core_foundation::base::{CFType, TCFType};
use core_foundation::boolean::CFBoolean;
use core_foundation::dictionary::{CFDictionary, CFDictionaryRef};
use core_foundation::number::CFNumber;
use core_foundation::string::{CFString, CFStringRef};
use core_graphics::display::CGDisplay;
use core_graphics::geometry::CGRect;
use core_graphics::window::{
    CGWindowListOption, copy_window_info, kCGNullWindowID, kCGWindowBounds, kCGWindowIsOnscreen,
    kCGWindowLayer, kCGWindowListOptionAll, kCGWindowListOptionOnScreenOnly, kCGWindowName,
    kCGWindowNumber, kCGWindowOwnerName, kCGWindowOwnerPID,
};
use tracing::debug;

use super::process::BundleIdResolver;
use super::to_rect;
use crate::window::{
    DisplayInfo, ProcessIdentity, SnapshotScope, WindowError, WindowRecord, WindowSource,
    restrict_to_display,
};

/// Owner name the window server reports for its own windows
const WINDOW_SERVER_OWNER: &str = "Window Server";

/// Window snapshots from `CGWindowListCopyWindowInfo`.
#[derive(Debug)]
pub struct CoreGraphicsWindowSource {
    bundle_ids: BundleIdResolver,
}

impl Default for CoreGraphicsWindowSource {
    fn default() -> Self {
        Self::new()
    }
}

impl CoreGraphicsWindowSource {
    pub fn new() -> Self {
        Self {
            bundle_ids: BundleIdResolver::new(),
        }
    }

    fn record(&self, info: &WindowInfo) -> Option<WindowRecord> {
        let id = info.number(unsafe { kCGWindowNumber })?;
        let layer = info.number(unsafe { kCGWindowLayer })?;
        let frame = info.bounds(unsafe { kCGWindowBounds })?;

        let owner_name = info.string(unsafe { kCGWindowOwnerName });
        let owner = match (info.number(unsafe { kCGWindowOwnerPID }), owner_name) {
            (_, Some(name)) if name == WINDOW_SERVER_OWNER => None,
            (Some(pid), Some(name)) => {
                let pid = pid as i32;
                Some(ProcessIdentity::new(pid, name, self.bundle_ids.bundle_id(pid)))
            }
            _ => None,
        };

        Some(WindowRecord::new(
            u32::try_from(id).ok()?,
            layer as i32,
            to_rect(&frame),
            owner,
            info.string(unsafe { kCGWindowName }),
            info.flag(unsafe { kCGWindowIsOnscreen }).unwrap_or(false),
        ))
    }
}

impl WindowSource for CoreGraphicsWindowSource {
    fn windows(
        &self,
        scope: SnapshotScope,
        display: Option<&DisplayInfo>,
    ) -> Result<Vec<WindowRecord>, WindowError> {
        let option: CGWindowListOption = match scope {
            SnapshotScope::OnScreenOnly => kCGWindowListOptionOnScreenOnly,
            SnapshotScope::All => kCGWindowListOptionAll,
        };

        let array = copy_window_info(option, kCGNullWindowID).ok_or_else(|| {
            WindowError::EnumerationFailed {
                message: "CGWindowListCopyWindowInfo returned no list".to_string(),
            }
        })?;

        let mut skipped_count = 0;
        let mut records = Vec::with_capacity(array.len() as usize);
        for raw in array.iter() {
            let info = WindowInfo(unsafe {
                CFDictionary::wrap_under_get_rule(*raw as CFDictionaryRef)
            });
            match self.record(&info) {
                Some(record) => records.push(record),
                None => skipped_count += 1,
            }
        }

        if skipped_count > 0 {
            debug!(
                event = "core.platform.windows_skipped",
                count = skipped_count,
                reason = "missing_required_properties"
            );
        }

        let displays = match display {
            Some(_) => self.displays()?,
            None => Vec::new(),
        };
        let records = restrict_to_display(records, display, &displays);
        debug!(
            event = "core.platform.windows_listed",
            scope = scope.as_str(),
            count = records.len()
        );
        Ok(records)
    }

    fn displays(&self) -> Result<Vec<DisplayInfo>, WindowError> {
        debug!(event = "core.platform.displays_list_started");

        let ids = CGDisplay::active_displays().map_err(|e| {
            WindowError::DisplayEnumerationFailed {
                message: format!("CGGetActiveDisplayList failed with error {}", e),
            }
        })?;

        let main_id = CGDisplay::main().id;
        let displays: Vec<DisplayInfo> = ids
            .into_iter()
            .map(|id| DisplayInfo::new(id, to_rect(&CGDisplay::new(id).bounds()), id == main_id))
            .collect();

        if displays.is_empty() {
            return Err(WindowError::NoDisplays);
        }

        debug!(
            event = "core.platform.displays_list_completed",
            count = displays.len()
        );
        Ok(displays)
    }
}

/// One entry of the window list
struct WindowInfo(CFDictionary<CFString, CFType>);

impl WindowInfo {
    fn value(&self, key: CFStringRef) -> Option<CFType> {
        let key = unsafe { CFString::wrap_under_get_rule(key) };
        self.0.find(&key).map(|value| (*value).clone())
    }

    fn number(&self, key: CFStringRef) -> Option<i64> {
        self.value(key)?.downcast::<CFNumber>()?.to_i64()
    }

    fn string(&self, key: CFStringRef) -> Option<String> {
        self.value(key)?
            .downcast::<CFString>()
            .map(|s| s.to_string())
    }

    fn flag(&self, key: CFStringRef) -> Option<bool> {
        let value = self.value(key)?;
        if let Some(flag) = value.downcast::<CFBoolean>() {
            return Some(flag.into());
        }
        value.downcast::<CFNumber>()?.to_i64().map(|n| n != 0)
    }

    fn bounds(&self, key: CFStringRef) -> Option<CGRect> {
        let value = self.value(key)?;
        if value.type_of() != CFDictionary::<CFString, CFType>::type_id() {
            return None;
        }
        let dict: CFDictionary =
            unsafe { CFDictionary::wrap_under_get_rule(value.as_CFTypeRef() as CFDictionaryRef) };
        CGRect::from_dict_representation(&dict)
    }
}
