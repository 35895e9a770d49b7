//! Event posting and listen-only event taps.
//!
//! Every monitor owns a thread running its own run loop: the tap is created,
//! scheduled and enabled on that thread, which then reports "armed" back to
//! the installer. Teardown stops the loop and joins the thread. Inside a
//! tokio runtime the join runs on the blocking pool, since monitors are
//! removed from `Drop` on async worker threads.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, mpsc};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use core_foundation::runloop::{CFRunLoop, kCFRunLoopDefaultMode};
use core_graphics::event::{
    CGEvent, CGEventFlags, CGEventTap, CGEventTapLocation, CGEventTapOptions,
    CGEventTapPlacement, CGEventType, CGMouseButton, EventField,
};
use core_graphics::event_source::{CGEventSource, CGEventSourceStateID};
use tracing::{debug, warn};

use super::to_cg_point;
use crate::input::{
    EventFilter, InputBackend, InputError, MonitorId, MonitorRegistry, MouseEventKind,
    SyntheticEvent, TapLocation,
};

/// How long one run loop slice of a monitor thread lasts
const RUN_LOOP_SLICE: Duration = Duration::from_millis(10);

/// How long installation waits for the monitor thread to arm its tap
const ARM_TIMEOUT: Duration = Duration::from_secs(1);

struct MonitorThread {
    stop: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

/// Posts events through `CGEventPost` and observes them with `CGEventTap`.
#[derive(Default)]
pub struct CoreGraphicsInput {
    monitors: Mutex<HashMap<MonitorId, MonitorThread>>,
}

impl CoreGraphicsInput {
    pub fn new() -> Self {
        Self::default()
    }

    fn monitors(&self) -> std::sync::MutexGuard<'_, HashMap<MonitorId, MonitorThread>> {
        match self.monitors.lock() {
            Ok(monitors) => monitors,
            Err(e) => {
                warn!(event = "core.platform.monitor_table_poisoned");
                e.into_inner()
            }
        }
    }
}

impl std::fmt::Debug for CoreGraphicsInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoreGraphicsInput")
            .field("monitors", &self.monitors().len())
            .finish()
    }
}

impl InputBackend for CoreGraphicsInput {
    fn install_monitor(
        &self,
        id: MonitorId,
        filter: &EventFilter,
        location: TapLocation,
        registry: Arc<MonitorRegistry>,
    ) -> Result<(), InputError> {
        let stop = Arc::new(AtomicBool::new(false));
        let (armed_tx, armed_rx) = mpsc::channel::<Result<(), String>>();
        let filter = *filter;
        let thread_stop = Arc::clone(&stop);

        let handle = thread::Builder::new()
            .name(format!("barkeep-{}", id))
            .spawn(move || run_monitor(id, filter, location, registry, thread_stop, armed_tx))
            .map_err(|e| InputError::MonitorInstallFailed {
                message: format!("failed to spawn monitor thread: {}", e),
            })?;

        let armed = armed_rx
            .recv_timeout(ARM_TIMEOUT)
            .map_err(|e| format!("monitor thread did not report: {}", e))
            .and_then(|result| result);

        if let Err(message) = armed {
            stop.store(true, Ordering::Release);
            join_monitor_thread(id.get(), handle);
            return Err(InputError::MonitorInstallFailed { message });
        }

        self.monitors().insert(id, MonitorThread { stop, handle });
        debug!(
            event = "core.platform.monitor_installed",
            monitor_id = id.get(),
            kind = filter.kind().as_str(),
            location = location.as_str()
        );
        Ok(())
    }

    fn remove_monitor(&self, id: MonitorId) {
        let Some(monitor) = self.monitors().remove(&id) else {
            return;
        };
        monitor.stop.store(true, Ordering::Release);
        join_monitor_thread(id.get(), monitor.handle);
        debug!(event = "core.platform.monitor_removed", monitor_id = id.get());
    }

    fn post(&self, event: &SyntheticEvent, location: TapLocation) -> Result<(), InputError> {
        let source = CGEventSource::new(CGEventSourceStateID::HIDSystemState)
            .map_err(|()| InputError::EventSourceFailed)?;

        let cg_event = CGEvent::new_mouse_event(
            source,
            event_type(event.kind()),
            to_cg_point(event.location()),
            CGMouseButton::Left,
        )
        .map_err(|()| InputError::EventConstructionFailure { kind: event.kind() })?;

        if event.modifiers().command {
            cg_event.set_flags(CGEventFlags::CGEventFlagCommand);
        }
        cg_event.set_integer_value_field(EventField::EVENT_SOURCE_USER_DATA, event.user_data());

        debug!(
            event = "core.platform.event_posting",
            kind = event.kind().as_str(),
            x = event.location().x,
            y = event.location().y,
            user_data = event.user_data()
        );
        cg_event.post(tap_location(location));
        Ok(())
    }
}

/// Join a stopped monitor thread without stalling an async worker.
///
/// The thread exits within one run loop slice of its stop flag being set.
fn join_monitor_thread(monitor_id: u64, handle: JoinHandle<()>) {
    let join = move || {
        if handle.join().is_err() {
            warn!(event = "core.platform.monitor_thread_panicked", monitor_id = monitor_id);
        }
    };

    match tokio::runtime::Handle::try_current() {
        Ok(runtime) => {
            runtime.spawn_blocking(join);
        }
        Err(_) => join(),
    }
}

fn run_monitor(
    id: MonitorId,
    filter: EventFilter,
    location: TapLocation,
    registry: Arc<MonitorRegistry>,
    stop: Arc<AtomicBool>,
    armed: mpsc::Sender<Result<(), String>>,
) {
    let tap = CGEventTap::new(
        tap_location(location),
        CGEventTapPlacement::HeadInsertEventTap,
        CGEventTapOptions::ListenOnly,
        vec![event_type(filter.kind())],
        move |_proxy, event_type, event: &CGEvent| {
            let user_data = event.get_integer_value_field(EventField::EVENT_SOURCE_USER_DATA);
            if let Some(kind) = mouse_event_kind(event_type)
                && filter.matches(kind, user_data)
            {
                registry.observed(id);
            }
            None
        },
    );

    let tap = match tap {
        Ok(tap) => tap,
        Err(()) => {
            let _ = armed.send(Err("CGEventTapCreate failed".to_string()));
            return;
        }
    };

    let source = match tap.mach_port.create_runloop_source(0) {
        Ok(source) => source,
        Err(()) => {
            let _ = armed.send(Err("failed to create run loop source".to_string()));
            return;
        }
    };

    let run_loop = CFRunLoop::get_current();
    unsafe {
        run_loop.add_source(&source, kCFRunLoopDefaultMode);
    }
    tap.enable();
    let _ = armed.send(Ok(()));

    while !stop.load(Ordering::Acquire) {
        CFRunLoop::run_in_mode(unsafe { kCFRunLoopDefaultMode }, RUN_LOOP_SLICE, true);
    }

    unsafe {
        run_loop.remove_source(&source, kCFRunLoopDefaultMode);
    }
}

fn event_type(kind: MouseEventKind) -> CGEventType {
    match kind {
        MouseEventKind::LeftMouseDown => CGEventType::LeftMouseDown,
        MouseEventKind::LeftMouseUp => CGEventType::LeftMouseUp,
    }
}

fn mouse_event_kind(event_type: CGEventType) -> Option<MouseEventKind> {
    match event_type {
        CGEventType::LeftMouseDown => Some(MouseEventKind::LeftMouseDown),
        CGEventType::LeftMouseUp => Some(MouseEventKind::LeftMouseUp),
        _ => None,
    }
}

fn tap_location(location: TapLocation) -> CGEventTapLocation {
    match location {
        TapLocation::Hid => CGEventTapLocation::HID,
        TapLocation::Session => CGEventTapLocation::Session,
        TapLocation::AnnotatedSession => CGEventTapLocation::AnnotatedSession,
    }
}
