//! Platform context
//!
//! [`Platform`] is the aggregate that owns everything the library keeps
//! between calls: the window table, the event queue, the key and button
//! tables, the monitor registry, keycode map, clipboard buffer, callbacks
//! and the backend dispatch. All of it lives exactly as long as the
//! context.
//!
//! Contexts are plain values. Applications that want the implicit
//! "current context" behaviour use the thread-local slot in [`active`].
//!
//! # Module Organization
//!
//! - **`active`**: thread-local current context, lazy creation
//! - **`translate`**: native notification → event translation

pub mod active;
mod translate;

#[cfg(test)]
mod tests;

use std::collections::VecDeque;

use slotmap::SlotMap;

use crate::backend::{
    BackendDispatch, BackendKind, Backends, NativeBackend, NativeEvent, WaitTimeout, Waker,
};
use crate::config::PlatformConfig;
use crate::error::{DebugCallback, Diagnostics, ErrorCode, Severity, WindowError, WindowResult};
use crate::events::{CallbackCategory, Callbacks, Event, EventCallback, EventData, EventMask, EventQueue};
use crate::foundation::geometry::{Point, Rect};
use crate::input::{Key, KeyStateTable, KeycodeMap, Modifiers, MouseButton};
use crate::monitor::{Monitor, MonitorId, MonitorRegistry};
use crate::window::icon::pick_icons;
use crate::window::{
    CursorId, Icon, IconSlot, ModeChange, StandardCursor, WindowDesc, WindowFlags, WindowId, WindowState,
};

/// Process context owning every window, pool and table
pub struct Platform {
    config: PlatformConfig,
    dispatch: BackendDispatch,
    windows: SlotMap<WindowId, WindowState>,
    queue: EventQueue,
    keys: KeyStateTable<Key>,
    buttons: KeyStateTable<MouseButton>,
    modifiers: Modifiers,
    keycodes: KeycodeMap,
    monitors: MonitorRegistry,
    clipboard: String,
    chars: VecDeque<char>,
    cursors: SlotMap<CursorId, ()>,
    root: Option<WindowId>,
    focused: Option<WindowId>,
    callbacks: Callbacks,
    diagnostics: Diagnostics,
    scratch: Vec<NativeEvent>,
    window_ids: Vec<WindowId>,
    scroll: (f32, f32),
    motion: Point,
    draining: bool,
    lazy: bool,
}

impl Platform {
    /// Context with the default configuration and headless backends
    pub fn new() -> WindowResult<Self> {
        Self::init(PlatformConfig::default(), Backends::default())
    }

    /// Create a context, binding the preferred backend or its fallback
    ///
    /// Every pool is sized from `config` here and never grows afterwards.
    pub fn init(config: PlatformConfig, backends: Backends) -> WindowResult<Self> {
        config.validate().map_err(WindowError::InvalidConfig)?;

        let mut diagnostics = Diagnostics::new();
        let dispatch = BackendDispatch::bind(backends, &config, &mut diagnostics)?;

        let mut queue = EventQueue::new(config.event_queue_capacity);
        queue.set_enabled(config.queue_events);

        let mut platform = Self {
            dispatch,
            windows: SlotMap::with_key(),
            queue,
            keys: KeyStateTable::new(),
            buttons: KeyStateTable::new(),
            modifiers: Modifiers::empty(),
            keycodes: KeycodeMap::new(),
            monitors: MonitorRegistry::new(config.monitor_capacity),
            clipboard: String::with_capacity(config.clipboard_capacity),
            chars: VecDeque::with_capacity(config.char_queue_capacity),
            cursors: SlotMap::with_key(),
            root: None,
            focused: None,
            callbacks: Callbacks::new(),
            diagnostics,
            scratch: Vec::with_capacity(config.event_queue_capacity),
            window_ids: Vec::new(),
            scroll: (0.0, 0.0),
            motion: Point::default(),
            draining: false,
            lazy: false,
            config,
        };
        platform.load_backend_tables();

        log::info!(
            "Platform initialized: backend '{}', {} monitor(s), queue capacity {}",
            platform.dispatch.name(),
            platform.monitors.len(),
            platform.queue.capacity()
        );
        Ok(platform)
    }

    /// Tear the context down (equivalent to dropping it)
    pub fn deinit(self) {
        log::debug!("Deinitializing platform context ({} window(s) open)", self.windows.len());
    }

    fn load_backend_tables(&mut self) {
        self.keycodes.clear();
        self.dispatch.backend().fill_keycodes(&mut self.keycodes);

        self.monitors.clear();
        for monitor in self.dispatch.backend().enumerate_monitors() {
            let name = monitor.name.clone();
            if self.monitors.add(monitor).is_none() {
                self.diagnostics.report(
                    Severity::Warning,
                    ErrorCode::MonitorPoolExhausted,
                    None,
                    format_args!("monitor '{}' ignored: pool of {} is full", name, self.monitors.capacity()),
                );
            }
        }
    }

    /// Switch backends; only allowed before the first window is created
    pub fn select_backend(&mut self, backends: Backends) -> WindowResult<()> {
        self.dispatch.rebind(backends, &self.config, &mut self.diagnostics)?;
        self.load_backend_tables();
        Ok(())
    }

    /// Name of the bound backend
    pub fn backend_name(&self) -> &'static str {
        self.dispatch.name()
    }

    /// Family of the bound backend
    pub fn backend_kind(&self) -> BackendKind {
        self.dispatch.kind()
    }

    /// Configuration the context was created with
    pub const fn config(&self) -> &PlatformConfig {
        &self.config
    }

    /// Whether the context was created implicitly by the first window
    pub const fn is_lazy(&self) -> bool {
        self.lazy
    }

    pub(crate) fn mark_lazy(&mut self) {
        self.lazy = true;
    }

    // Window lifecycle

    /// Create a window and apply its creation flags
    pub fn create_window(&mut self, desc: WindowDesc) -> WindowResult<WindowId> {
        let mut state = WindowState::new(&desc, self.config.max_drops);
        // Applied below through the same path as the runtime toggles.
        state.flags.remove(WindowFlags::FULLSCREEN | WindowFlags::HOLD_MOUSE | WindowFlags::HIDE_MOUSE);
        let id = self.windows.insert(state);

        let rect = match self.dispatch.backend_mut().create_window(id, &desc) {
            Ok(rect) => rect,
            Err(reason) => {
                self.windows.remove(id);
                self.diagnostics.report(
                    Severity::Error,
                    ErrorCode::WindowCreate,
                    None,
                    format_args!("'{}': {}", desc.title, reason),
                );
                return Err(WindowError::CreationFailed(reason));
            }
        };
        self.dispatch.lock();

        if let Some(window) = self.windows.get_mut(id) {
            window.rect = rect;
            window.saved_rect = rect;
        }
        if self.root.is_none() {
            self.root = Some(id);
        }

        self.apply_creation_flags(id, desc.flags);
        self.diagnostics.report(
            Severity::Info,
            ErrorCode::WindowCreated,
            Some(id),
            format_args!("window '{}' created at {:?}", desc.title, rect),
        );
        Ok(id)
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    fn apply_creation_flags(&mut self, id: WindowId, flags: WindowFlags) {
        let area = self.monitors.primary().map(|m| (m.rect, m.scale_x, m.scale_y));
        let Some(rect) = self.windows.get(id).map(|w| w.rect) else {
            return;
        };

        if let (true, Some((_, sx, sy))) = (flags.contains(WindowFlags::SCALE_TO_MONITOR), area) {
            let w = (rect.w as f32 * sx).round() as i32;
            let h = (rect.h as f32 * sy).round() as i32;
            let _ = self.resize(id, w, h);
        }
        if let (true, Some((work_area, _, _))) = (flags.contains(WindowFlags::CENTER), area) {
            let size = self.windows.get(id).map_or(rect, |w| w.rect);
            let centered = size.centered_in(&work_area);
            let _ = self.move_window(id, centered.x, centered.y);
        }
        if flags.contains(WindowFlags::HIDE) {
            let _ = self.hide(id);
        }
        if flags.contains(WindowFlags::HIDE_MOUSE) {
            let _ = self.show_mouse(id, false);
        }
        if flags.contains(WindowFlags::FULLSCREEN) {
            let _ = self.set_fullscreen(id, true);
        }
        if flags.contains(WindowFlags::MAXIMIZE) {
            let _ = self.maximize(id);
        }
        if flags.contains(WindowFlags::MINIMIZE) {
            let _ = self.minimize(id);
        }
        if flags.contains(WindowFlags::HOLD_MOUSE) {
            let _ = self.hold_mouse(id);
        }
        if flags.intersects(WindowFlags::FOCUS | WindowFlags::FOCUS_ON_SHOW) && !flags.contains(WindowFlags::HIDE) {
            let _ = self.focus(id);
        }
    }

    /// Destroy a window and purge its queued events
    pub fn close_window(&mut self, id: WindowId) -> WindowResult<()> {
        let state = self.windows.remove(id).ok_or(WindowError::UnknownWindow(id))?;

        let backend = self.dispatch.backend_mut();
        if state.hold_mouse {
            backend.release_mouse(id);
        }
        backend.close_window(id);

        let purged = self.queue.purge(id);
        if self.root == Some(id) {
            self.root = self.windows.keys().next();
        }
        if self.focused == Some(id) {
            self.focused = None;
        }

        self.diagnostics.report(
            Severity::Info,
            ErrorCode::WindowClosed,
            Some(id),
            format_args!("window '{}' closed, {} queued event(s) purged", state.title, purged),
        );
        Ok(())
    }

    /// State of a live window
    pub fn window(&self, id: WindowId) -> WindowResult<&WindowState> {
        self.windows.get(id).ok_or(WindowError::UnknownWindow(id))
    }

    fn window_mut(&mut self, id: WindowId) -> WindowResult<&mut WindowState> {
        self.windows.get_mut(id).ok_or(WindowError::UnknownWindow(id))
    }

    /// Live windows
    pub fn windows(&self) -> impl Iterator<Item = (WindowId, &WindowState)> + '_ {
        self.windows.iter()
    }

    /// Number of live windows
    pub fn window_count(&self) -> usize {
        self.windows.len()
    }

    /// First window created that is still open
    pub const fn root_window(&self) -> Option<WindowId> {
        self.root
    }

    /// Window holding keyboard focus
    pub const fn focused_window(&self) -> Option<WindowId> {
        self.focused
    }

    /// Whether the window was asked to close (false for unknown windows)
    pub fn should_close(&self, id: WindowId) -> bool {
        self.windows.get(id).is_some_and(WindowState::should_close)
    }

    /// Set or clear the should-close flag
    pub fn set_should_close(&mut self, id: WindowId, should_close: bool) -> WindowResult<()> {
        self.window_mut(id)?.should_close = should_close;
        Ok(())
    }

    // Event retrieval

    /// Run one poll pass: advance frame state, translate pending native
    /// notifications, then re-derive every window's mode
    pub fn poll_events(&mut self) {
        self.begin_frame();
        self.draining = true;

        let mut scratch = std::mem::take(&mut self.scratch);
        self.dispatch.backend_mut().poll(&mut scratch);
        for native in scratch.drain(..) {
            self.handle_native(native);
        }
        self.scratch = scratch;

        let mut ids = std::mem::take(&mut self.window_ids);
        ids.extend(self.windows.keys());
        for &id in &ids {
            let _ = self.check_mode(id);
        }
        ids.clear();
        self.window_ids = ids;
    }

    fn begin_frame(&mut self) {
        self.keys.begin_frame();
        self.buttons.begin_frame();
        self.scroll = (0.0, 0.0);
        self.motion = Point::default();
        self.chars.clear();
        for window in self.windows.values_mut() {
            window.begin_frame();
        }
    }

    /// Next event for `window` (`None` = any), polling first if the queue is empty
    ///
    /// A drain loop polls at most once: after a poll pass, the call that
    /// finds nothing left returns `None` without polling again, so the edges
    /// recorded by that pass stay readable until the next drain starts.
    pub fn check_event(&mut self, window: Option<WindowId>) -> Option<Event> {
        if self.queue.is_empty() && !self.draining {
            self.poll_events();
        }
        let event = self.check_queued_event(window);
        if event.is_none() {
            self.draining = false;
        }
        event
    }

    /// Next already-queued event for `window`, without polling
    ///
    /// Popping a [`EventData::Quit`] marks its window as should-close.
    pub fn check_queued_event(&mut self, window: Option<WindowId>) -> Option<Event> {
        let event = self.queue.pop(window)?;
        if let (EventData::Quit, Some(id)) = (event.data, event.window) {
            if let Some(state) = self.windows.get_mut(id) {
                state.should_close = true;
            }
        }
        Some(event)
    }

    /// Block until a native notification arrives, the waker fires or
    /// `timeout` elapses, then poll
    pub fn wait_for_event(&mut self, timeout: WaitTimeout) {
        self.dispatch.backend_mut().wait(timeout);
        self.poll_events();
    }

    /// Handle that interrupts [`wait_for_event`](Self::wait_for_event) from any thread
    pub fn waker(&self) -> Waker {
        self.dispatch.backend().waker()
    }

    /// Enable or disable event queueing; callbacks fire either way
    pub fn set_queue_events(&mut self, enabled: bool) {
        self.queue.set_enabled(enabled);
    }

    /// Whether events are queued
    pub const fn is_queueing(&self) -> bool {
        self.queue.is_enabled()
    }

    /// Events currently queued
    pub const fn queued_len(&self) -> usize {
        self.queue.len()
    }

    /// Queued events, oldest first
    pub fn queued(&self) -> impl Iterator<Item = &Event> + '_ {
        self.queue.iter()
    }

    /// Drop every queued event
    pub fn flush_events(&mut self) {
        self.queue.flush();
    }

    // Input state

    /// Key is held
    pub fn is_key_down(&self, key: Key) -> bool {
        self.keys.down(key)
    }

    /// Key went down during the last poll pass
    pub fn is_key_pressed(&self, key: Key) -> bool {
        self.keys.pressed(key)
    }

    /// Key went up during the last poll pass
    pub fn is_key_released(&self, key: Key) -> bool {
        self.keys.released(key)
    }

    /// Mouse button is held
    pub fn is_mouse_down(&self, button: MouseButton) -> bool {
        self.buttons.down(button)
    }

    /// Mouse button went down during the last poll pass
    pub fn is_mouse_pressed(&self, button: MouseButton) -> bool {
        self.buttons.pressed(button)
    }

    /// Mouse button went up during the last poll pass
    pub fn is_mouse_released(&self, button: MouseButton) -> bool {
        self.buttons.released(button)
    }

    /// Modifier and lock state after the latest key transition
    pub const fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Scroll accumulated during the last poll pass
    pub const fn scroll_delta(&self) -> (f32, f32) {
        self.scroll
    }

    /// Mouse motion accumulated during the last poll pass
    pub const fn mouse_vector(&self) -> Point {
        self.motion
    }

    /// Next character typed during the last poll pass, oldest first
    ///
    /// At most `char_queue_capacity` characters are kept per pass.
    pub fn char_pressed(&mut self) -> Option<char> {
        self.chars.pop_front()
    }

    /// Keycode map filled by the bound backend
    pub const fn keycodes(&self) -> &KeycodeMap {
        &self.keycodes
    }

    /// Replace a window's enabled event mask
    pub fn set_enabled_events(&mut self, id: WindowId, mask: EventMask) -> WindowResult<()> {
        self.window_mut(id)?.enabled_events = mask;
        Ok(())
    }

    /// Remove kinds from a window's enabled event mask
    pub fn set_disabled_events(&mut self, id: WindowId, mask: EventMask) -> WindowResult<()> {
        self.window_mut(id)?.enabled_events.remove(mask);
        Ok(())
    }

    // Window mutators

    /// Forward an operation to the backend, then resynchronize geometry and mode
    fn forward(
        &mut self,
        id: WindowId,
        op: impl FnOnce(&mut dyn NativeBackend),
    ) -> WindowResult<()> {
        if !self.windows.contains_key(id) {
            return Err(WindowError::UnknownWindow(id));
        }
        op(self.dispatch.backend_mut());
        if let Some(rect) = self.dispatch.backend().query_rect(id) {
            self.apply_geometry(id, rect);
        }
        self.check_mode(id)?;
        Ok(())
    }

    /// Move the window's top-left corner
    pub fn move_window(&mut self, id: WindowId, x: i32, y: i32) -> WindowResult<()> {
        self.forward(id, |b| b.move_window(id, Point::new(x, y)))
    }

    /// Resize the client area
    pub fn resize(&mut self, id: WindowId, width: i32, height: i32) -> WindowResult<()> {
        self.forward(id, |b| b.resize(id, width, height))
    }

    /// Minimize (iconify)
    pub fn minimize(&mut self, id: WindowId) -> WindowResult<()> {
        self.forward(id, |b| b.minimize(id))
    }

    /// Maximize
    pub fn maximize(&mut self, id: WindowId) -> WindowResult<()> {
        self.forward(id, |b| b.maximize(id))
    }

    /// Leave the minimized or maximized state
    pub fn restore(&mut self, id: WindowId) -> WindowResult<()> {
        self.forward(id, |b| b.restore(id))
    }

    /// Enter or leave fullscreen
    pub fn set_fullscreen(&mut self, id: WindowId, fullscreen: bool) -> WindowResult<()> {
        let window = self.window_mut(id)?;
        if window.is_fullscreen() == fullscreen {
            return Ok(());
        }
        if fullscreen {
            window.saved_rect = window.rect;
        }
        window.flags.set(WindowFlags::FULLSCREEN, fullscreen);
        self.forward(id, |b| b.set_fullscreen(id, fullscreen))
    }

    /// Show the window
    pub fn show(&mut self, id: WindowId) -> WindowResult<()> {
        let focus_on_show = self.window_mut(id)?.flags.contains(WindowFlags::FOCUS_ON_SHOW);
        self.window_mut(id)?.flags.remove(WindowFlags::HIDE);
        self.forward(id, |b| {
            b.show(id);
            if focus_on_show {
                b.focus(id);
            }
        })
    }

    /// Hide the window
    pub fn hide(&mut self, id: WindowId) -> WindowResult<()> {
        self.window_mut(id)?.flags.insert(WindowFlags::HIDE);
        self.forward(id, |b| b.hide(id))
    }

    /// Request keyboard focus
    pub fn focus(&mut self, id: WindowId) -> WindowResult<()> {
        self.forward(id, |b| b.focus(id))
    }

    /// Set the title bar text
    pub fn set_title(&mut self, id: WindowId, title: &str) -> WindowResult<()> {
        let window = self.window_mut(id)?;
        window.title.clear();
        window.title.push_str(title);
        self.forward(id, |b| b.set_title(id, title))
    }

    /// Warp the cursor to a window-relative position
    pub fn set_mouse_position(&mut self, id: WindowId, position: Point) -> WindowResult<()> {
        self.window_mut(id)?.last_mouse = position;
        self.forward(id, |b| b.set_mouse_position(id, position))
    }

    /// Show or hide the cursor over the window
    pub fn show_mouse(&mut self, id: WindowId, visible: bool) -> WindowResult<()> {
        self.window_mut(id)?.flags.set(WindowFlags::HIDE_MOUSE, !visible);
        self.forward(id, |b| b.show_mouse(id, visible))
    }

    /// Use a standard cursor shape over the window
    pub fn set_cursor(&mut self, id: WindowId, cursor: StandardCursor) -> WindowResult<()> {
        self.forward(id, |b| b.set_cursor(id, cursor))
    }

    /// Create a custom cursor from `image`, clicking at `hotspot`
    pub fn load_cursor(&mut self, image: &Icon, hotspot: Point) -> WindowResult<CursorId> {
        let cursor = self.cursors.insert(());
        if let Err(reason) = self.dispatch.backend_mut().load_cursor(cursor, image, hotspot) {
            self.cursors.remove(cursor);
            self.diagnostics.report(
                Severity::Error,
                ErrorCode::Cursor,
                None,
                format_args!("loading {}x{} cursor failed: {}", image.width(), image.height(), reason),
            );
            return Err(WindowError::CursorLoad(reason));
        }
        log::debug!("Loaded {}x{} cursor {:?}", image.width(), image.height(), cursor);
        Ok(cursor)
    }

    /// Show a loaded custom cursor over the window
    ///
    /// [`set_cursor`](Self::set_cursor) switches back to a standard shape.
    pub fn set_custom_cursor(&mut self, id: WindowId, cursor: CursorId) -> WindowResult<()> {
        if !self.cursors.contains_key(cursor) {
            return Err(WindowError::UnknownCursor(cursor));
        }
        self.forward(id, |b| b.set_custom_cursor(id, cursor))
    }

    /// Destroy a loaded cursor; windows showing it revert to the default shape
    pub fn free_cursor(&mut self, cursor: CursorId) -> WindowResult<()> {
        self.cursors.remove(cursor).ok_or(WindowError::UnknownCursor(cursor))?;
        self.dispatch.backend_mut().free_cursor(cursor);
        Ok(())
    }

    /// Set both window icons from one image, or clear them with `None`
    pub fn set_window_icon(&mut self, id: WindowId, icon: Option<&Icon>) -> WindowResult<()> {
        self.forward(id, |b| b.set_icon(id, IconSlot::Both, icon))
    }

    /// Set the window icons from a set of sizes
    ///
    /// The smallest image becomes the title bar icon and the largest the
    /// taskbar icon. An empty set clears both.
    pub fn set_window_icons(&mut self, id: WindowId, icons: &[Icon]) -> WindowResult<()> {
        self.forward(id, |b| match pick_icons(icons) {
            Some((small, large)) => {
                b.set_icon(id, IconSlot::Window, Some(small));
                b.set_icon(id, IconSlot::Taskbar, Some(large));
            }
            None => b.set_icon(id, IconSlot::Both, None),
        })
    }

    /// Capture the pointer: absolute motion is replaced by relative motion
    /// and the cursor stays centered
    pub fn hold_mouse(&mut self, id: WindowId) -> WindowResult<()> {
        let window = self.window_mut(id)?;
        window.hold_mouse = true;
        window.flags.insert(WindowFlags::HOLD_MOUSE);
        self.forward(id, |b| b.capture_mouse(id))?;
        self.recenter_mouse(id);
        Ok(())
    }

    /// Release the pointer capture
    pub fn unhold_mouse(&mut self, id: WindowId) -> WindowResult<()> {
        let window = self.window_mut(id)?;
        window.hold_mouse = false;
        window.flags.remove(WindowFlags::HOLD_MOUSE);
        self.forward(id, |b| b.release_mouse(id))
    }

    pub(crate) fn recenter_mouse(&mut self, id: WindowId) {
        let Some(window) = self.windows.get_mut(id) else {
            return;
        };
        let center = Point::new(window.rect.w / 2, window.rect.h / 2);
        window.last_mouse = center;
        self.dispatch.backend_mut().set_mouse_position(id, center);
    }

    /// Re-derive the window's mode from the native state
    ///
    /// Idempotent: with unchanged native state a second call reports and
    /// emits nothing.
    pub fn check_mode(&mut self, id: WindowId) -> WindowResult<Option<ModeChange>> {
        let native = self.dispatch.backend().query_mode(id);
        let window = self.window_mut(id)?;
        let Some(change) = window.mode.observe(native) else {
            return Ok(None);
        };

        let rect = window.rect;
        let data = match change {
            ModeChange::Minimized => EventData::Minimized,
            ModeChange::Maximized => EventData::Maximized { rect },
            ModeChange::Restored => EventData::Restored { rect },
        };
        log::debug!("Window {:?} mode change: {:?}", id, change);
        self.emit(Event::new(id, data));
        Ok(Some(change))
    }

    /// Handle loss of keyboard focus
    ///
    /// Every held key and button is released with an event, a fullscreen
    /// window is minimized and a pointer capture is released natively while
    /// the hold request is kept for the next focus-in.
    pub fn focus_lost(&mut self, id: WindowId) -> WindowResult<()> {
        let window = self.window_mut(id)?;
        window.focus = false;
        let fullscreen = window.is_fullscreen();
        let holding = window.hold_mouse;
        if self.focused == Some(id) {
            self.focused = None;
        }

        if fullscreen {
            self.dispatch.backend_mut().minimize(id);
            self.check_mode(id)?;
        }

        self.release_all_input(id);

        if holding {
            self.dispatch.backend_mut().release_mouse(id);
        }
        Ok(())
    }

    // Callbacks

    /// Install a callback for `category`, returning the previous one
    pub fn set_callback(
        &mut self,
        category: CallbackCategory,
        callback: Option<EventCallback>,
    ) -> Option<EventCallback> {
        self.callbacks.replace(category, callback)
    }

    /// Install the diagnostic hook, returning the previous one
    pub fn set_debug_callback(&mut self, callback: Option<DebugCallback>) -> Option<DebugCallback> {
        self.diagnostics.set_callback(callback)
    }

    // Monitors

    /// Connected monitors in connection order
    pub fn monitors(&self) -> impl Iterator<Item = (MonitorId, &Monitor)> + '_ {
        self.monitors.iter()
    }

    /// A connected monitor
    pub fn monitor(&self, id: MonitorId) -> Option<&Monitor> {
        self.monitors.get(id)
    }

    /// The primary (first connected) monitor
    pub fn primary_monitor(&self) -> Option<&Monitor> {
        self.monitors.primary()
    }

    /// Snapshot of the monitor containing the window's center
    pub fn window_monitor(&self, id: WindowId) -> WindowResult<Option<Monitor>> {
        let rect: Rect = self.window(id)?.rect;
        Ok(self
            .monitors
            .monitor_at(rect.center())
            .or_else(|| self.monitors.primary())
            .cloned())
    }

    // Clipboard

    /// Read the clipboard into the context's buffer; `None` when it holds no text
    pub fn read_clipboard(&mut self) -> Option<&str> {
        self.clipboard.clear();
        if self.dispatch.backend_mut().read_clipboard(&mut self.clipboard) {
            Some(&self.clipboard)
        } else {
            None
        }
    }

    /// Take clipboard ownership with `text`; failures are reported as diagnostics
    pub fn write_clipboard(&mut self, text: &str) -> bool {
        match self.dispatch.backend_mut().write_clipboard(text) {
            Ok(()) => true,
            Err(reason) => {
                self.diagnostics.report(
                    Severity::Error,
                    ErrorCode::Clipboard,
                    None,
                    format_args!("clipboard write failed: {}", reason),
                );
                false
            }
        }
    }
}

macro_rules! callback_setters {
    ($($(#[$doc:meta])* $name:ident => $category:ident),+ $(,)?) => {
        impl Platform {
            $(
                $(#[$doc])*
                ///
                /// Returns the previously installed callback.
                pub fn $name(&mut self, callback: Option<EventCallback>) -> Option<EventCallback> {
                    self.callbacks.replace(CallbackCategory::$category, callback)
                }
            )+
        }
    };
}

callback_setters! {
    /// Key pressed / released
    set_key_callback => Key,
    /// Mouse button pressed / released
    set_mouse_button_callback => MouseButton,
    /// Mouse motion
    set_mouse_motion_callback => MouseMotion,
    /// Mouse scroll
    set_scroll_callback => MouseScroll,
    /// Mouse enter / leave
    set_mouse_notify_callback => MouseNotify,
    /// Focus in / out
    set_focus_callback => Focus,
    /// Window moved / resized
    set_window_geometry_callback => WindowGeometry,
    /// Minimized / maximized / restored
    set_window_mode_callback => WindowMode,
    /// Window refresh
    set_refresh_callback => Refresh,
    /// Close requested
    set_quit_callback => Quit,
    /// Data dragged over a window
    set_data_drag_callback => DataDrag,
    /// Data dropped onto a window
    set_data_drop_callback => DataDrop,
    /// Content scale changed
    set_scale_callback => Scale,
    /// Monitor connected / disconnected
    set_monitor_callback => Monitor,
    /// Character input
    set_key_char_callback => KeyChar,
}

impl std::fmt::Debug for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Platform")
            .field("backend", &self.dispatch.name())
            .field("windows", &self.windows.len())
            .field("queued", &self.queue.len())
            .field("monitors", &self.monitors.len())
            .field("lazy", &self.lazy)
            .finish_non_exhaustive()
    }
}

impl Drop for Platform {
    fn drop(&mut self) {
        for id in self.windows.keys() {
            self.dispatch.backend_mut().close_window(id);
        }
        for cursor in self.cursors.keys() {
            self.dispatch.backend_mut().free_cursor(cursor);
        }
        self.windows.clear();
        self.cursors.clear();
        self.queue.flush();
        self.monitors.clear();
        self.callbacks.clear();
        self.dispatch.shutdown();
        log::info!("Platform context torn down");
    }
}
