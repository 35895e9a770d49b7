use std::collections::HashMap;
use std::sync::Mutex;

use core_foundation::bundle::CFBundle;
use core_foundation::string::CFString;
use core_foundation::url::CFURL;
use sysinfo::{Pid as SysinfoPid, ProcessRefreshKind, ProcessesToUpdate, System, UpdateKind};
use tracing::debug;

use crate::platform::app_bundle_path;

/// Resolves process ids to bundle identifiers, caching every answer.
///
/// Pids are reused, but a status item's owner lives as long as its window,
/// which is far shorter than one barkeep invocation.
pub(super) struct BundleIdResolver {
    system: Mutex<System>,
    cache: Mutex<HashMap<i32, Option<String>>>,
}

impl BundleIdResolver {
    pub(super) fn new() -> Self {
        Self {
            system: Mutex::new(System::new()),
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub(super) fn bundle_id(&self, pid: i32) -> Option<String> {
        if let Ok(cache) = self.cache.lock()
            && let Some(cached) = cache.get(&pid)
        {
            return cached.clone();
        }

        let resolved = self.lookup(pid);
        if let Ok(mut cache) = self.cache.lock() {
            cache.insert(pid, resolved.clone());
        }
        resolved
    }

    fn lookup(&self, pid: i32) -> Option<String> {
        let pid_obj = SysinfoPid::from_u32(u32::try_from(pid).ok()?);
        let executable = {
            let mut system = self.system.lock().ok()?;
            system.refresh_processes_specifics(
                ProcessesToUpdate::Some(&[pid_obj]),
                true,
                ProcessRefreshKind::nothing().with_exe(UpdateKind::OnlyIfNotSet),
            );
            system.process(pid_obj)?.exe()?.to_path_buf()
        };

        let bundle_path = app_bundle_path(&executable)?;
        let url = CFURL::from_path(bundle_path, true)?;
        let bundle = CFBundle::new(url)?;
        let info = bundle.info_dictionary();
        let key = CFString::from_static_string("CFBundleIdentifier");
        let bundle_id = info.find(&key)?.downcast::<CFString>()?.to_string();

        debug!(
            event = "core.platform.bundle_id_resolved",
            pid = pid,
            bundle_id = bundle_id.as_str()
        );
        Some(bundle_id)
    }
}

impl std::fmt::Debug for BundleIdResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BundleIdResolver").finish_non_exhaustive()
    }
}
