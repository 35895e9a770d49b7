//! In-memory window server, input backend and cursor for driving the
//! relocation engine without a display.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use barkeep_core::geometry::{Point, Rect};
use barkeep_core::input::{
    CursorControl, EventFilter, InputBackend, InputError, MonitorId, MonitorRegistry,
    MouseEventKind, SyntheticEvent, TapLocation,
};
use barkeep_core::items::{ItemDirectory, ItemKey, MAIN_MENU_LAYER, MENU_BAR_TITLE, STATUS_ITEM_LAYER};
use barkeep_core::relocation::{RelocationEngine, RelocationSettings};
use barkeep_core::window::{
    DisplayInfo, ProcessIdentity, SnapshotScope, WindowError, WindowRecord, WindowSource,
    restrict_to_display,
};

pub const MENU_BAR_HEIGHT: f64 = 24.0;

pub fn main_display() -> DisplayInfo {
    DisplayInfo::new(1, Rect::new(0.0, 0.0, 1440.0, 900.0), true)
}

#[derive(Debug, Clone)]
pub struct FakeItem {
    pub owner: ProcessIdentity,
    pub title: String,
    pub width: f64,
}

impl FakeItem {
    pub fn app(bundle_id: &str, title: &str, width: f64) -> Self {
        let name = bundle_id.rsplit('.').next().unwrap_or(bundle_id).to_string();
        Self {
            owner: ProcessIdentity::new(500, name, Some(bundle_id.to_string())),
            title: title.to_string(),
            width,
        }
    }

    pub fn clock() -> Self {
        Self {
            owner: ProcessIdentity::new(
                400,
                "Control Center",
                Some("com.apple.controlcenter".to_string()),
            ),
            title: "Clock".to_string(),
            width: 80.0,
        }
    }

    pub fn key(&self) -> ItemKey {
        ItemKey::new(self.owner.namespace(), self.title.as_str())
    }
}

/// Lays items out left to right from `origin_x`, like the real menu bar.
/// Items left of x = 0 are hidden past the screen edge.
pub struct FakeWindowServer {
    display: DisplayInfo,
    origin_x: f64,
    has_menu_bar: bool,
    items: Mutex<Vec<FakeItem>>,
    snapshots: AtomicUsize,
}

impl FakeWindowServer {
    pub fn new(items: Vec<FakeItem>) -> Self {
        Self {
            display: main_display(),
            origin_x: 0.0,
            has_menu_bar: true,
            items: Mutex::new(items),
            snapshots: AtomicUsize::new(0),
        }
    }

    /// `hidden` items sit past the left screen edge, `visible` ones from x = 0.
    pub fn with_hidden(hidden: Vec<FakeItem>, visible: Vec<FakeItem>) -> Self {
        let origin_x = -hidden.iter().map(|i| i.width).sum::<f64>();
        let items = hidden.into_iter().chain(visible).collect();
        Self {
            origin_x,
            ..Self::new(items)
        }
    }

    pub fn without_menu_bar(items: Vec<FakeItem>) -> Self {
        Self {
            has_menu_bar: false,
            ..Self::new(items)
        }
    }

    pub fn snapshot_count(&self) -> usize {
        self.snapshots.load(Ordering::SeqCst)
    }

    pub fn order(&self) -> Vec<String> {
        self.items
            .lock()
            .unwrap()
            .iter()
            .map(|i| i.title.clone())
            .collect()
    }

    pub fn frame_of(&self, title: &str) -> Rect {
        self.records()
            .into_iter()
            .find(|r| r.title() == Some(title) && r.layer() == STATUS_ITEM_LAYER)
            .map(|r| r.frame())
            .unwrap()
    }

    /// Emulates the window server accepting a Command-drag from `start` to `end`.
    pub fn drop_item(&self, start: Point, end: Point) {
        let frames: Vec<Rect> = self
            .records()
            .into_iter()
            .filter(|r| r.layer() == STATUS_ITEM_LAYER)
            .map(|r| r.frame())
            .collect();
        let Some(dragged) = frames
            .iter()
            .position(|f| start.x >= f.min_x() && start.x <= f.max_x())
        else {
            return;
        };

        let mut items = self.items.lock().unwrap();
        let item = items.remove(dragged);
        let mut remaining: Vec<Rect> = frames;
        remaining.remove(dragged);
        let index = remaining.iter().filter(|f| f.mid_x() < end.x).count();
        items.insert(index, item);
    }

    fn records(&self) -> Vec<WindowRecord> {
        let mut records = Vec::new();
        if self.has_menu_bar {
            records.push(WindowRecord::new(
                1,
                MAIN_MENU_LAYER,
                Rect::new(0.0, 0.0, self.display.frame().width, MENU_BAR_HEIGHT),
                None,
                Some(MENU_BAR_TITLE.to_string()),
                true,
            ));
        }

        let bounds = self.display.frame();
        let mut x = self.origin_x;
        for (index, item) in self.items.lock().unwrap().iter().enumerate() {
            let frame = Rect::new(x, 0.0, item.width, MENU_BAR_HEIGHT);
            records.push(WindowRecord::new(
                100 + index as u32,
                STATUS_ITEM_LAYER,
                frame,
                Some(item.owner.clone()),
                Some(item.title.clone()),
                bounds.intersects(&frame),
            ));
            x += item.width;
        }
        records
    }
}

impl WindowSource for FakeWindowServer {
    fn windows(
        &self,
        scope: SnapshotScope,
        display: Option<&DisplayInfo>,
    ) -> Result<Vec<WindowRecord>, WindowError> {
        self.snapshots.fetch_add(1, Ordering::SeqCst);
        let records = self
            .records()
            .into_iter()
            .filter(|r| scope == SnapshotScope::All || r.is_on_screen())
            .collect();
        Ok(restrict_to_display(
            records,
            display,
            &[self.display.clone()],
        ))
    }

    fn displays(&self) -> Result<Vec<DisplayInfo>, WindowError> {
        Ok(vec![self.display.clone()])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Every tagged event is observed as soon as it is posted
    Confirm,
    /// Nothing is ever observed
    Drop,
}

/// Records posted events; optionally forwards confirmed drags to a server.
pub struct FakeInput {
    delivery: Delivery,
    server: Option<Arc<FakeWindowServer>>,
    monitors: Mutex<Vec<(MonitorId, EventFilter, Arc<MonitorRegistry>)>>,
    installed_total: AtomicUsize,
    events: Mutex<Vec<SyntheticEvent>>,
    drag_start: Mutex<Option<Point>>,
}

impl FakeInput {
    pub fn new(delivery: Delivery) -> Self {
        Self {
            delivery,
            server: None,
            monitors: Mutex::new(Vec::new()),
            installed_total: AtomicUsize::new(0),
            events: Mutex::new(Vec::new()),
            drag_start: Mutex::new(None),
        }
    }

    pub fn connected(server: Arc<FakeWindowServer>) -> Self {
        Self {
            server: Some(server),
            ..Self::new(Delivery::Confirm)
        }
    }

    pub fn events(&self) -> Vec<SyntheticEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn active_monitors(&self) -> usize {
        self.monitors.lock().unwrap().len()
    }

    pub fn installed_total(&self) -> usize {
        self.installed_total.load(Ordering::SeqCst)
    }
}

impl InputBackend for FakeInput {
    fn install_monitor(
        &self,
        id: MonitorId,
        filter: &EventFilter,
        _location: TapLocation,
        registry: Arc<MonitorRegistry>,
    ) -> Result<(), InputError> {
        self.installed_total.fetch_add(1, Ordering::SeqCst);
        self.monitors.lock().unwrap().push((id, *filter, registry));
        Ok(())
    }

    fn remove_monitor(&self, id: MonitorId) {
        self.monitors.lock().unwrap().retain(|(m, _, _)| *m != id);
    }

    fn post(&self, event: &SyntheticEvent, _location: TapLocation) -> Result<(), InputError> {
        self.events.lock().unwrap().push(*event);

        if self.delivery == Delivery::Drop {
            return Ok(());
        }

        if event.modifiers().command {
            match event.kind() {
                MouseEventKind::LeftMouseDown => {
                    *self.drag_start.lock().unwrap() = Some(event.location());
                }
                MouseEventKind::LeftMouseUp => {
                    if let (Some(start), Some(server)) =
                        (self.drag_start.lock().unwrap().take(), &self.server)
                    {
                        server.drop_item(start, event.location());
                    }
                }
            }
        }

        let matching: Vec<(MonitorId, Arc<MonitorRegistry>)> = self
            .monitors
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, filter, _)| filter.matches(event.kind(), event.user_data()))
            .map(|(id, _, registry)| (*id, Arc::clone(registry)))
            .collect();
        for (id, registry) in matching {
            registry.observed(id);
        }
        Ok(())
    }
}

/// Tracks pointer position, coupling and visibility.
pub struct FakeCursor {
    location: Mutex<Point>,
    coupled: Mutex<bool>,
    visible: Mutex<bool>,
    readable: bool,
    warps: Mutex<Vec<Point>>,
}

impl FakeCursor {
    pub fn at(location: Point) -> Self {
        Self {
            location: Mutex::new(location),
            coupled: Mutex::new(true),
            visible: Mutex::new(true),
            readable: true,
            warps: Mutex::new(Vec::new()),
        }
    }

    pub fn unreadable() -> Self {
        Self {
            readable: false,
            ..Self::at(Point::new(0.0, 0.0))
        }
    }

    pub fn location(&self) -> Point {
        *self.location.lock().unwrap()
    }

    pub fn is_coupled(&self) -> bool {
        *self.coupled.lock().unwrap()
    }

    pub fn is_visible(&self) -> bool {
        *self.visible.lock().unwrap()
    }

    pub fn warps(&self) -> Vec<Point> {
        self.warps.lock().unwrap().clone()
    }
}

impl CursorControl for FakeCursor {
    fn pointer_location(&self) -> Result<Point, InputError> {
        if !self.readable {
            return Err(InputError::NoMouseLocation);
        }
        Ok(self.location())
    }

    fn warp_pointer(&self, to: Point) -> Result<(), InputError> {
        *self.location.lock().unwrap() = to;
        self.warps.lock().unwrap().push(to);
        Ok(())
    }

    fn set_pointer_coupled(&self, coupled: bool) -> Result<(), InputError> {
        *self.coupled.lock().unwrap() = coupled;
        Ok(())
    }

    fn set_cursor_visible(&self, visible: bool) -> Result<(), InputError> {
        *self.visible.lock().unwrap() = visible;
        Ok(())
    }
}

pub type FakeEngine = RelocationEngine<FakeWindowServer, FakeInput, FakeCursor>;

pub fn engine(
    server: &Arc<FakeWindowServer>,
    input: &Arc<FakeInput>,
    cursor: &Arc<FakeCursor>,
) -> FakeEngine {
    RelocationEngine::with_backend(
        Arc::new(ItemDirectory::new(Arc::clone(server))),
        Arc::clone(input),
        Arc::clone(cursor),
        RelocationSettings::default(),
    )
}

/// A(maxX=100), B(maxX=200), C(maxX=300) followed by the clock.
pub fn abc_with_clock() -> Vec<FakeItem> {
    vec![
        FakeItem::app("com.example.alpha", "A", 100.0),
        FakeItem::app("com.example.beta", "B", 100.0),
        FakeItem::app("com.example.gamma", "C", 100.0),
        FakeItem::clock(),
    ]
}
