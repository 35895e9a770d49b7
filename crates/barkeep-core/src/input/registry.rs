//! Arena of active event monitors.
//!
//! Platform callbacks only ever hold a [`MonitorId`]; they report what they
//! saw through [`MonitorRegistry::observed`], which resolves the completion
//! signal of the monitor if it is still registered.

use std::collections::HashMap;
use std::fmt;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, warn};

use super::completion::{Resolution, Resolver};

/// Stable handle of one installed monitor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonitorId(u64);

impl MonitorId {
    pub fn get(&self) -> u64 {
        self.0
    }

    /// Value stamped into the user-data field of the event this monitor waits for.
    pub fn tag(&self) -> i64 {
        self.0 as i64
    }
}

impl fmt::Display for MonitorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "monitor-{}", self.0)
    }
}

#[derive(Debug)]
pub struct MonitorRegistry {
    next_id: AtomicU64,
    active: Mutex<HashMap<MonitorId, Resolver>>,
}

impl Default for MonitorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl MonitorRegistry {
    pub fn new() -> Self {
        Self {
            // Zero is the user data of untagged events.
            next_id: AtomicU64::new(1),
            active: Mutex::new(HashMap::new()),
        }
    }

    pub fn register(&self, resolver: Resolver) -> MonitorId {
        let id = MonitorId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.with_active(|active| {
            active.insert(id, resolver);
        });
        debug!(event = "core.input.monitor_registered", monitor_id = id.get());
        id
    }

    /// Called from the platform callback when monitor `id` saw its event.
    ///
    /// Returns `true` if this observation confirmed a pending wait.
    pub fn observed(&self, id: MonitorId) -> bool {
        let resolver = self.with_active(|active| active.get(&id).cloned());
        match resolver {
            Some(resolver) => resolver.resolve(Resolution::Confirmed),
            None => {
                debug!(event = "core.input.monitor_observed_unknown", monitor_id = id.get());
                false
            }
        }
    }

    pub fn remove(&self, id: MonitorId) -> bool {
        self.with_active(|active| active.remove(&id).is_some())
    }

    pub fn contains(&self, id: MonitorId) -> bool {
        self.with_active(|active| active.contains_key(&id))
    }

    pub fn len(&self) -> usize {
        self.with_active(|active| active.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn with_active<T>(&self, f: impl FnOnce(&mut HashMap<MonitorId, Resolver>) -> T) -> T {
        match self.active.lock() {
            Ok(mut active) => f(&mut active),
            Err(e) => {
                warn!(event = "core.input.monitor_registry_poisoned");
                f(&mut e.into_inner())
            }
        }
    }
}
