//! Post a synthetic event and wait, bounded, for the OS to dispatch it.
//!
//! Each post runs the same sequence:
//!
//! 1. register a monitor and arm it at the tap location (before posting, so
//!    the event can never pass the tap unobserved)
//! 2. post the primary event, tagged with the monitor id
//! 3. race the monitor against a timer through a single completion signal
//! 4. tear the monitor down
//! 5. on timeout only, post the fallback event to leave the input state
//!    machine at rest
//!
//! Teardown lives in [`MonitorGuard`], so it also runs when the caller drops
//! the future mid-wait.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::backend::InputBackend;
use super::completion::{Resolution, completion};
use super::errors::InputError;
use super::registry::{MonitorId, MonitorRegistry};
use super::types::{EventFilter, SyntheticEvent, TapLocation};

/// Per-event confirmation timeout
pub const DEFAULT_EVENT_TIMEOUT: Duration = Duration::from_millis(100);

pub struct SyntheticInputChannel<B: InputBackend> {
    backend: Arc<B>,
    registry: Arc<MonitorRegistry>,
    location: TapLocation,
    timeout: Duration,
}

impl<B: InputBackend> SyntheticInputChannel<B> {
    pub fn new(backend: Arc<B>, location: TapLocation, timeout: Duration) -> Self {
        Self {
            backend,
            registry: Arc::new(MonitorRegistry::new()),
            location,
            timeout,
        }
    }

    pub fn backend(&self) -> &Arc<B> {
        &self.backend
    }

    pub fn registry(&self) -> &Arc<MonitorRegistry> {
        &self.registry
    }

    pub fn location(&self) -> TapLocation {
        self.location
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Post `event` and wait for confirmation.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::Timeout`] after posting `fallback` when no
    /// confirmation arrives in time. Monitor installation and posting
    /// failures are returned as-is; the fallback is not posted for them.
    pub async fn post(
        &self,
        event: SyntheticEvent,
        fallback: SyntheticEvent,
    ) -> Result<(), InputError> {
        let (resolver, waiter) = completion();
        let id = self.registry.register(resolver.clone());
        let mut guard = MonitorGuard {
            backend: self.backend.as_ref(),
            registry: self.registry.as_ref(),
            id,
            installed: false,
            timer: None,
        };

        let filter = EventFilter::tagged(event.kind(), id.tag());
        self.backend
            .install_monitor(id, &filter, self.location, Arc::clone(&self.registry))?;
        guard.installed = true;

        let tagged = event.with_user_data(id.tag());
        debug!(
            event = "core.input.post_started",
            monitor_id = id.get(),
            kind = event.kind().as_str(),
            x = event.location().x,
            y = event.location().y,
            location = self.location.as_str()
        );
        self.backend.post(&tagged, self.location)?;

        let timeout = self.timeout;
        guard.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(timeout).await;
            resolver.resolve(Resolution::TimedOut);
        }));

        let resolution = waiter.wait().await.unwrap_or(Resolution::TimedOut);
        drop(guard);

        match resolution {
            Resolution::Confirmed => {
                debug!(
                    event = "core.input.post_confirmed",
                    monitor_id = id.get(),
                    kind = event.kind().as_str()
                );
                Ok(())
            }
            Resolution::TimedOut => {
                let timeout_ms = timeout.as_millis() as u64;
                warn!(
                    event = "core.input.post_timed_out",
                    monitor_id = id.get(),
                    kind = event.kind().as_str(),
                    timeout_ms = timeout_ms,
                    fallback = fallback.kind().as_str()
                );
                if let Err(e) = self.backend.post(&fallback, self.location) {
                    warn!(
                        event = "core.input.fallback_post_failed",
                        monitor_id = id.get(),
                        error = %e
                    );
                } else {
                    info!(
                        event = "core.input.fallback_posted",
                        monitor_id = id.get(),
                        kind = fallback.kind().as_str()
                    );
                }
                Err(InputError::Timeout {
                    kind: event.kind(),
                    timeout_ms,
                })
            }
        }
    }
}

/// Releases everything one post acquired: the OS monitor, the registry slot
/// and the timer task.
struct MonitorGuard<'a, B: InputBackend> {
    backend: &'a B,
    registry: &'a MonitorRegistry,
    id: MonitorId,
    installed: bool,
    timer: Option<JoinHandle<()>>,
}

impl<B: InputBackend> Drop for MonitorGuard<'_, B> {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
        if self.installed {
            self.backend.remove_monitor(self.id);
        }
        self.registry.remove(self.id);
        debug!(event = "core.input.monitor_removed", monitor_id = self.id.get());
    }
}
