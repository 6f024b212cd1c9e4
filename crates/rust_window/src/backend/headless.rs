//! In-memory display server
//!
//! [`HeadlessBackend`] implements the whole backend interface against a
//! simulated server, so the event pipeline can run without a display. It
//! can behave like either family of real servers:
//!
//! - [`NotifyStyle::Polling`]: geometry and mode changes made through the
//!   backend are only visible through queries, as with X11 where the
//!   context has to diff `query_mode` results on every poll.
//! - [`NotifyStyle::Push`]: every such change also queues a configure
//!   notification, as Wayland, Win32 and Cocoa deliver them.
//!
//! A [`HeadlessHandle`] shares the simulation and plays the part of the
//! user and the window manager: it injects input, changes window modes
//! behind the context's back, plugs monitors and can make init fail.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::rc::Rc;

use slotmap::SecondaryMap;

use crate::config::PlatformConfig;
use crate::foundation::geometry::{Point, Rect};
use crate::input::{Key, KeycodeMap, Modifiers, MouseButton};
use crate::monitor::Monitor;
use crate::window::{CursorId, Icon, IconSlot, NativeMode, StandardCursor, WindowDesc, WindowId};

use super::{BackendKind, NativeBackend, NativeEvent, WaitTimeout, Waker};

/// How the simulated server reports changes it makes itself
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotifyStyle {
    /// Changes are only observable through queries
    Polling,
    /// Changes are also pushed as configure notifications
    Push,
}

/// US layout, Linux evdev scancodes
const US_LAYOUT: &[(u8, Key)] = &[
    (1, Key::Escape),
    (2, Key::Num1),
    (3, Key::Num2),
    (4, Key::Num3),
    (5, Key::Num4),
    (6, Key::Num5),
    (7, Key::Num6),
    (8, Key::Num7),
    (9, Key::Num8),
    (10, Key::Num9),
    (11, Key::Num0),
    (12, Key::Minus),
    (13, Key::Equals),
    (14, Key::Backspace),
    (15, Key::Tab),
    (16, Key::Q),
    (17, Key::W),
    (18, Key::E),
    (19, Key::R),
    (20, Key::T),
    (21, Key::Y),
    (22, Key::U),
    (23, Key::I),
    (24, Key::O),
    (25, Key::P),
    (26, Key::Bracket),
    (27, Key::CloseBracket),
    (28, Key::Return),
    (29, Key::ControlL),
    (30, Key::A),
    (31, Key::S),
    (32, Key::D),
    (33, Key::F),
    (34, Key::G),
    (35, Key::H),
    (36, Key::J),
    (37, Key::K),
    (38, Key::L),
    (39, Key::Semicolon),
    (40, Key::Quote),
    (41, Key::Backtick),
    (42, Key::ShiftL),
    (43, Key::Backslash),
    (44, Key::Z),
    (45, Key::X),
    (46, Key::C),
    (47, Key::V),
    (48, Key::B),
    (49, Key::N),
    (50, Key::M),
    (51, Key::Comma),
    (52, Key::Period),
    (53, Key::Slash),
    (54, Key::ShiftR),
    (55, Key::KpMultiply),
    (56, Key::AltL),
    (57, Key::Space),
    (58, Key::CapsLock),
    (59, Key::F1),
    (60, Key::F2),
    (61, Key::F3),
    (62, Key::F4),
    (63, Key::F5),
    (64, Key::F6),
    (65, Key::F7),
    (66, Key::F8),
    (67, Key::F9),
    (68, Key::F10),
    (69, Key::NumLock),
    (70, Key::ScrollLock),
    (71, Key::Kp7),
    (72, Key::Kp8),
    (73, Key::Kp9),
    (74, Key::KpMinus),
    (75, Key::Kp4),
    (76, Key::Kp5),
    (77, Key::Kp6),
    (78, Key::KpPlus),
    (79, Key::Kp1),
    (80, Key::Kp2),
    (81, Key::Kp3),
    (82, Key::Kp0),
    (83, Key::KpPeriod),
    (87, Key::F11),
    (88, Key::F12),
    (96, Key::KpReturn),
    (97, Key::ControlR),
    (98, Key::KpSlash),
    (99, Key::PrintScreen),
    (100, Key::AltR),
    (102, Key::Home),
    (103, Key::Up),
    (104, Key::PageUp),
    (105, Key::Left),
    (106, Key::Right),
    (107, Key::End),
    (108, Key::Down),
    (109, Key::PageDown),
    (110, Key::Insert),
    (111, Key::Delete),
    (119, Key::Pause),
    (125, Key::SuperL),
    (126, Key::SuperR),
];

/// Scancode the simulated keyboard sends for `key`
pub fn us_scancode(key: Key) -> Option<u8> {
    US_LAYOUT
        .iter()
        .find(|(_, mapped)| *mapped == key)
        .map(|(code, _)| *code)
}

#[derive(Debug, Clone)]
struct SimWindow {
    rect: Rect,
    saved: Rect,
    title: String,
    mode: NativeMode,
    fullscreen: bool,
    visible: bool,
    mouse: Point,
    captured: bool,
    mouse_visible: bool,
    cursor: StandardCursor,
    custom_cursor: Option<CursorId>,
    window_icon: Option<(u32, u32)>,
    taskbar_icon: Option<(u32, u32)>,
}

#[derive(Debug, Clone, Copy)]
struct LoadedCursor {
    size: (u32, u32),
    hotspot: Point,
}

#[derive(Debug)]
struct Simulation {
    style: NotifyStyle,
    initialized: bool,
    init_failure: Option<String>,
    windows: SecondaryMap<WindowId, SimWindow>,
    cursors: SecondaryMap<CursorId, LoadedCursor>,
    pending: VecDeque<NativeEvent>,
    monitors: Vec<Monitor>,
    clipboard: Option<String>,
    focused: Option<WindowId>,
    locks: Modifiers,
}

impl Simulation {
    fn configured(&mut self, id: WindowId) {
        if self.style != NotifyStyle::Push {
            return;
        }
        if let Some(window) = self.windows.get(id) {
            let rect = window.rect;
            self.pending.push_back(NativeEvent::Configure { window: id, rect });
        }
    }

    /// Work area of the monitor under `rect`'s center, else the primary
    fn work_area(&self, rect: Rect) -> Rect {
        self.monitors
            .iter()
            .find(|m| m.contains(rect.center()))
            .or_else(|| self.monitors.first())
            .map_or(rect, |m| m.rect)
    }

    fn with_window(&mut self, id: WindowId, change: impl FnOnce(&mut SimWindow, Rect)) {
        let Some(rect) = self.windows.get(id).map(|w| w.rect) else {
            log::warn!("Headless: no native window for {:?}", id);
            return;
        };
        let area = self.work_area(rect);
        if let Some(window) = self.windows.get_mut(id) {
            change(window, area);
        }
        self.configured(id);
    }
}

/// Backend backed by an in-memory display server
#[derive(Debug)]
pub struct HeadlessBackend {
    name: &'static str,
    sim: Rc<RefCell<Simulation>>,
    waker: Waker,
}

impl HeadlessBackend {
    /// Create a backend with one 1920×1080 monitor
    pub fn new(style: NotifyStyle) -> Self {
        let name = match style {
            NotifyStyle::Polling => "headless-poll",
            NotifyStyle::Push => "headless-push",
        };
        Self {
            name,
            sim: Rc::new(RefCell::new(Simulation {
                style,
                initialized: false,
                init_failure: None,
                windows: SecondaryMap::new(),
                cursors: SecondaryMap::new(),
                pending: VecDeque::new(),
                monitors: vec![Monitor::new("HEADLESS-1", Rect::new(0, 0, 1920, 1080))
                    .with_physical_size(527.0, 296.0)],
                clipboard: None,
                focused: None,
                locks: Modifiers::empty(),
            })),
            waker: Waker::new(),
        }
    }

    /// Override the name reported in logs and diagnostics
    pub fn named(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Replace the monitors present at init
    pub fn with_monitors(self, monitors: Vec<Monitor>) -> Self {
        self.sim.borrow_mut().monitors = monitors;
        self
    }

    /// Scripting handle sharing this backend's simulation
    pub fn handle(&self) -> HeadlessHandle {
        HeadlessHandle {
            sim: Rc::clone(&self.sim),
            waker: self.waker.clone(),
        }
    }
}

impl NativeBackend for HeadlessBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Headless
    }

    fn name(&self) -> &'static str {
        self.name
    }

    fn init(&mut self, config: &PlatformConfig) -> Result<(), String> {
        let mut sim = self.sim.borrow_mut();
        if let Some(reason) = sim.init_failure.clone() {
            return Err(reason);
        }
        sim.initialized = true;
        sim.pending.reserve(config.event_queue_capacity);
        log::info!("Headless backend '{}' initialized ({:?})", self.name, sim.style);
        Ok(())
    }

    fn deinit(&mut self) {
        let mut sim = self.sim.borrow_mut();
        sim.initialized = false;
        sim.windows.clear();
        sim.cursors.clear();
        sim.pending.clear();
        sim.focused = None;
    }

    fn fill_keycodes(&self, map: &mut KeycodeMap) {
        for &(native, key) in US_LAYOUT {
            map.bind(native, key);
        }
    }

    fn create_window(&mut self, id: WindowId, desc: &WindowDesc) -> Result<Rect, String> {
        let mut sim = self.sim.borrow_mut();
        if !sim.initialized {
            return Err(format!("backend '{}' is not initialized", self.name));
        }
        if desc.rect.w <= 0 || desc.rect.h <= 0 {
            return Err(format!("invalid size {}x{}", desc.rect.w, desc.rect.h));
        }
        sim.windows.insert(
            id,
            SimWindow {
                rect: desc.rect,
                saved: desc.rect,
                title: desc.title.clone(),
                mode: NativeMode::NORMAL,
                fullscreen: false,
                visible: true,
                mouse: Point::default(),
                captured: false,
                mouse_visible: true,
                cursor: StandardCursor::Normal,
                custom_cursor: None,
                window_icon: None,
                taskbar_icon: None,
            },
        );
        Ok(desc.rect)
    }

    fn close_window(&mut self, id: WindowId) {
        let mut sim = self.sim.borrow_mut();
        sim.windows.remove(id);
        if sim.focused == Some(id) {
            sim.focused = None;
        }
    }

    fn poll(&mut self, out: &mut Vec<NativeEvent>) {
        out.extend(self.sim.borrow_mut().pending.drain(..));
    }

    fn wait(&mut self, timeout: WaitTimeout) {
        if !self.sim.borrow().pending.is_empty() {
            return;
        }
        self.waker.wait(timeout);
    }

    fn waker(&self) -> Waker {
        self.waker.clone()
    }

    fn query_mode(&self, id: WindowId) -> NativeMode {
        self.sim.borrow().windows.get(id).map_or(NativeMode::NORMAL, |w| w.mode)
    }

    fn query_rect(&self, id: WindowId) -> Option<Rect> {
        self.sim.borrow().windows.get(id).map(|w| w.rect)
    }

    fn move_window(&mut self, id: WindowId, position: Point) {
        self.sim.borrow_mut().with_window(id, |w, _| {
            w.rect.x = position.x;
            w.rect.y = position.y;
        });
    }

    fn resize(&mut self, id: WindowId, width: i32, height: i32) {
        self.sim.borrow_mut().with_window(id, |w, _| {
            w.rect.w = width;
            w.rect.h = height;
        });
    }

    fn minimize(&mut self, id: WindowId) {
        self.sim.borrow_mut().with_window(id, |w, _| w.mode.minimized = true);
    }

    fn maximize(&mut self, id: WindowId) {
        self.sim.borrow_mut().with_window(id, |w, area| {
            if !w.mode.maximized {
                w.saved = w.rect;
            }
            w.rect = area;
            w.mode = NativeMode::MAXIMIZED;
        });
    }

    fn restore(&mut self, id: WindowId) {
        self.sim.borrow_mut().with_window(id, |w, _| {
            if w.mode.maximized {
                w.rect = w.saved;
            }
            w.mode = NativeMode::NORMAL;
        });
    }

    fn set_fullscreen(&mut self, id: WindowId, fullscreen: bool) {
        self.sim.borrow_mut().with_window(id, |w, area| {
            if fullscreen && !w.fullscreen {
                w.saved = w.rect;
                w.rect = area;
            } else if !fullscreen && w.fullscreen {
                w.rect = w.saved;
            }
            w.fullscreen = fullscreen;
        });
    }

    fn show(&mut self, id: WindowId) {
        self.sim.borrow_mut().with_window(id, |w, _| w.visible = true);
    }

    fn hide(&mut self, id: WindowId) {
        self.sim.borrow_mut().with_window(id, |w, _| w.visible = false);
    }

    fn focus(&mut self, id: WindowId) {
        let mut sim = self.sim.borrow_mut();
        if sim.focused == Some(id) || !sim.windows.contains_key(id) {
            return;
        }
        // Focus changes are always notified, whatever the style.
        if let Some(previous) = sim.focused.replace(id) {
            sim.pending.push_back(NativeEvent::FocusOut { window: previous });
        }
        sim.pending.push_back(NativeEvent::FocusIn { window: id });
    }

    fn set_title(&mut self, id: WindowId, title: &str) {
        if let Some(w) = self.sim.borrow_mut().windows.get_mut(id) {
            w.title.clear();
            w.title.push_str(title);
        }
    }

    fn set_mouse_position(&mut self, id: WindowId, position: Point) {
        if let Some(w) = self.sim.borrow_mut().windows.get_mut(id) {
            w.mouse = position;
        }
    }

    fn capture_mouse(&mut self, id: WindowId) {
        if let Some(w) = self.sim.borrow_mut().windows.get_mut(id) {
            w.captured = true;
        }
    }

    fn release_mouse(&mut self, id: WindowId) {
        if let Some(w) = self.sim.borrow_mut().windows.get_mut(id) {
            w.captured = false;
        }
    }

    fn show_mouse(&mut self, id: WindowId, visible: bool) {
        if let Some(w) = self.sim.borrow_mut().windows.get_mut(id) {
            w.mouse_visible = visible;
        }
    }

    fn set_cursor(&mut self, id: WindowId, cursor: StandardCursor) {
        if let Some(w) = self.sim.borrow_mut().windows.get_mut(id) {
            w.cursor = cursor;
            w.custom_cursor = None;
        }
    }

    fn load_cursor(&mut self, cursor: CursorId, image: &Icon, hotspot: Point) -> Result<(), String> {
        let mut sim = self.sim.borrow_mut();
        if !sim.initialized {
            return Err("no display connection".to_string());
        }
        let inside = u32::try_from(hotspot.x).is_ok_and(|x| x < image.width())
            && u32::try_from(hotspot.y).is_ok_and(|y| y < image.height());
        if !inside {
            return Err(format!(
                "hot spot ({}, {}) outside {}x{} image",
                hotspot.x,
                hotspot.y,
                image.width(),
                image.height()
            ));
        }
        sim.cursors.insert(
            cursor,
            LoadedCursor {
                size: (image.width(), image.height()),
                hotspot,
            },
        );
        Ok(())
    }

    fn set_custom_cursor(&mut self, id: WindowId, cursor: CursorId) {
        let mut sim = self.sim.borrow_mut();
        if !sim.cursors.contains_key(cursor) {
            log::warn!("Headless: cursor {:?} was never loaded", cursor);
            return;
        }
        if let Some(w) = sim.windows.get_mut(id) {
            w.custom_cursor = Some(cursor);
        }
    }

    fn free_cursor(&mut self, cursor: CursorId) {
        let mut sim = self.sim.borrow_mut();
        sim.cursors.remove(cursor);
        for (_, w) in &mut sim.windows {
            if w.custom_cursor == Some(cursor) {
                w.custom_cursor = None;
                w.cursor = StandardCursor::Normal;
            }
        }
    }

    fn set_icon(&mut self, id: WindowId, slot: IconSlot, icon: Option<&Icon>) {
        let size = icon.map(|i| (i.width(), i.height()));
        if let Some(w) = self.sim.borrow_mut().windows.get_mut(id) {
            if slot.covers(IconSlot::Window) {
                w.window_icon = size;
            }
            if slot.covers(IconSlot::Taskbar) {
                w.taskbar_icon = size;
            }
        }
    }

    fn enumerate_monitors(&self) -> Vec<Monitor> {
        self.sim.borrow().monitors.clone()
    }

    fn read_clipboard(&mut self, buffer: &mut String) -> bool {
        match self.sim.borrow().clipboard.as_deref() {
            Some(text) => {
                buffer.clear();
                buffer.push_str(text);
                true
            }
            None => false,
        }
    }

    fn write_clipboard(&mut self, text: &str) -> Result<(), String> {
        let mut sim = self.sim.borrow_mut();
        if !sim.initialized {
            return Err("no display connection".to_string());
        }
        sim.clipboard = Some(text.to_string());
        Ok(())
    }
}

/// Scripting handle for a [`HeadlessBackend`]
///
/// Everything injected here is queued as a native notification and only
/// reaches the context on its next poll.
#[derive(Debug, Clone)]
pub struct HeadlessHandle {
    sim: Rc<RefCell<Simulation>>,
    waker: Waker,
}

impl HeadlessHandle {
    /// Queue a raw native notification
    pub fn inject(&self, event: NativeEvent) {
        self.sim.borrow_mut().pending.push_back(event);
    }

    /// Make the next `init` fail with `reason`
    pub fn fail_init(&self, reason: impl Into<String>) {
        self.sim.borrow_mut().init_failure = Some(reason.into());
    }

    /// Set the lock state sent with key notifications
    pub fn set_locks(&self, locks: Modifiers) {
        self.sim.borrow_mut().locks = locks & Modifiers::LOCKS;
    }

    /// Press `key` on the simulated US keyboard
    pub fn press_key(&self, window: WindowId, key: Key) {
        self.key(window, key, true, false);
    }

    /// Auto-repeat `key`
    pub fn repeat_key(&self, window: WindowId, key: Key) {
        self.key(window, key, true, true);
    }

    /// Release `key`
    pub fn release_key(&self, window: WindowId, key: Key) {
        self.key(window, key, false, false);
    }

    fn key(&self, window: WindowId, key: Key, pressed: bool, repeat: bool) {
        let scancode = us_scancode(key).unwrap_or(0);
        let locks = self.sim.borrow().locks;
        self.inject(NativeEvent::Key {
            window,
            scancode,
            pressed,
            repeat,
            locks,
        });
    }

    /// Type one character of text input
    pub fn type_char(&self, window: WindowId, ch: char) {
        self.inject(NativeEvent::KeyChar { window, ch });
    }

    /// Type `text`, one character notification per scalar value
    pub fn type_text(&self, window: WindowId, text: &str) {
        let mut sim = self.sim.borrow_mut();
        sim.pending
            .extend(text.chars().map(|ch| NativeEvent::KeyChar { window, ch }));
    }

    /// Press a mouse button
    pub fn press_button(&self, window: WindowId, button: MouseButton) {
        self.inject(NativeEvent::MouseButton {
            window,
            button,
            pressed: true,
        });
    }

    /// Release a mouse button
    pub fn release_button(&self, window: WindowId, button: MouseButton) {
        self.inject(NativeEvent::MouseButton {
            window,
            button,
            pressed: false,
        });
    }

    /// Move the cursor to a window-relative position
    pub fn move_mouse(&self, window: WindowId, position: Point) {
        if let Some(w) = self.sim.borrow_mut().windows.get_mut(window) {
            w.mouse = position;
        }
        self.inject(NativeEvent::MouseMove { window, position });
    }

    /// Report relative pointer motion
    pub fn move_mouse_relative(&self, window: WindowId, delta: Point) {
        self.inject(NativeEvent::RawMotion { window, delta });
    }

    /// Scroll the wheel
    pub fn scroll(&self, window: WindowId, dx: f32, dy: f32) {
        self.inject(NativeEvent::Scroll { window, dx, dy });
    }

    /// Cursor enters the window
    pub fn enter(&self, window: WindowId, position: Point) {
        self.inject(NativeEvent::Enter { window, position });
    }

    /// Cursor leaves the window
    pub fn leave(&self, window: WindowId) {
        self.inject(NativeEvent::Leave { window });
    }

    /// The window manager gives the window focus
    pub fn focus_in(&self, window: WindowId) {
        self.sim.borrow_mut().focused = Some(window);
        self.inject(NativeEvent::FocusIn { window });
    }

    /// The window manager takes focus away (alt-tab)
    pub fn focus_out(&self, window: WindowId) {
        let mut sim = self.sim.borrow_mut();
        if sim.focused == Some(window) {
            sim.focused = None;
        }
        sim.pending.push_back(NativeEvent::FocusOut { window });
    }

    /// The user clicks the close button
    pub fn request_close(&self, window: WindowId) {
        self.inject(NativeEvent::CloseRequest { window });
    }

    /// The compositor asks for a redraw
    pub fn refresh(&self, window: WindowId) {
        self.inject(NativeEvent::Refresh { window });
    }

    /// Data is dragged over the window
    pub fn drag(&self, window: WindowId, position: Point) {
        self.inject(NativeEvent::DragOver { window, position });
    }

    /// Files are dropped on the window
    pub fn drop_files(&self, window: WindowId, position: Point, paths: Vec<PathBuf>) {
        self.inject(NativeEvent::Drop {
            window,
            position,
            paths,
        });
    }

    /// The window moves to a monitor with another content scale
    pub fn set_scale(&self, window: WindowId, x: f32, y: f32) {
        self.inject(NativeEvent::ScaleChanged { window, x, y });
    }

    /// The user drags or resizes the window; notified in both styles
    pub fn user_configure(&self, window: WindowId, rect: Rect) {
        let mut sim = self.sim.borrow_mut();
        let Some(w) = sim.windows.get_mut(window) else {
            return;
        };
        w.rect = rect;
        sim.pending.push_back(NativeEvent::Configure { window, rect });
    }

    /// The window manager changes the window's mode
    ///
    /// Only push-style servers notify this; polling ones leave it to be
    /// discovered by the next mode query.
    pub fn set_native_mode(&self, window: WindowId, mode: NativeMode) {
        let mut sim = self.sim.borrow_mut();
        let Some(w) = sim.windows.get_mut(window) else {
            return;
        };
        w.mode = mode;
        sim.configured(window);
    }

    /// Plug a monitor in
    pub fn plug_monitor(&self, monitor: Monitor) {
        let mut sim = self.sim.borrow_mut();
        sim.monitors.push(monitor.clone());
        sim.pending.push_back(NativeEvent::MonitorConnected(monitor));
    }

    /// Unplug the monitor announced as `name`
    pub fn unplug_monitor(&self, name: &str) {
        let mut sim = self.sim.borrow_mut();
        sim.monitors.retain(|m| m.name != name);
        sim.pending.push_back(NativeEvent::MonitorDisconnected {
            name: name.to_string(),
        });
    }

    /// Another application takes the clipboard
    pub fn set_clipboard(&self, text: Option<&str>) {
        self.sim.borrow_mut().clipboard = text.map(str::to_string);
    }

    /// Current clipboard contents
    pub fn clipboard(&self) -> Option<String> {
        self.sim.borrow().clipboard.clone()
    }

    /// Whether the backend is connected
    pub fn is_initialized(&self) -> bool {
        self.sim.borrow().initialized
    }

    /// Notifications not yet polled
    pub fn pending(&self) -> usize {
        self.sim.borrow().pending.len()
    }

    /// Number of native windows
    pub fn window_count(&self) -> usize {
        self.sim.borrow().windows.len()
    }

    /// Native rectangle of a window
    pub fn window_rect(&self, window: WindowId) -> Option<Rect> {
        self.sim.borrow().windows.get(window).map(|w| w.rect)
    }

    /// Native title of a window
    pub fn title(&self, window: WindowId) -> Option<String> {
        self.sim.borrow().windows.get(window).map(|w| w.title.clone())
    }

    /// Native mode of a window
    pub fn native_mode(&self, window: WindowId) -> Option<NativeMode> {
        self.sim.borrow().windows.get(window).map(|w| w.mode)
    }

    /// Whether a window is mapped
    pub fn is_visible(&self, window: WindowId) -> bool {
        self.sim.borrow().windows.get(window).is_some_and(|w| w.visible)
    }

    /// Whether a window is fullscreen
    pub fn is_fullscreen(&self, window: WindowId) -> bool {
        self.sim.borrow().windows.get(window).is_some_and(|w| w.fullscreen)
    }

    /// Whether a window holds the pointer capture
    pub fn is_captured(&self, window: WindowId) -> bool {
        self.sim.borrow().windows.get(window).is_some_and(|w| w.captured)
    }

    /// Whether the cursor is visible over a window
    pub fn is_mouse_visible(&self, window: WindowId) -> bool {
        self.sim.borrow().windows.get(window).is_some_and(|w| w.mouse_visible)
    }

    /// Last warp or move position of the cursor in a window
    pub fn mouse_position(&self, window: WindowId) -> Option<Point> {
        self.sim.borrow().windows.get(window).map(|w| w.mouse)
    }

    /// Cursor shape over a window
    pub fn cursor(&self, window: WindowId) -> Option<StandardCursor> {
        self.sim.borrow().windows.get(window).map(|w| w.cursor)
    }

    /// Custom cursor shown over a window, if any
    pub fn custom_cursor(&self, window: WindowId) -> Option<CursorId> {
        self.sim.borrow().windows.get(window).and_then(|w| w.custom_cursor)
    }

    /// Size and hot spot of a loaded cursor
    pub fn loaded_cursor(&self, cursor: CursorId) -> Option<((u32, u32), Point)> {
        self.sim.borrow().cursors.get(cursor).map(|c| (c.size, c.hotspot))
    }

    /// Size of the icon a window shows in `slot` ([`IconSlot::Both`] reads the title bar icon)
    pub fn icon_size(&self, window: WindowId, slot: IconSlot) -> Option<(u32, u32)> {
        let sim = self.sim.borrow();
        let w = sim.windows.get(window)?;
        match slot {
            IconSlot::Taskbar => w.taskbar_icon,
            IconSlot::Window | IconSlot::Both => w.window_icon,
        }
    }

    /// Window holding keyboard focus
    pub fn focused(&self) -> Option<WindowId> {
        self.sim.borrow().focused
    }

    /// Waker of the backend
    pub fn waker(&self) -> Waker {
        self.waker.clone()
    }
}
