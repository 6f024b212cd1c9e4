//! Native notification → event translation
//!
//! Runs inside the poll pass, after the key tables have been advanced.
//! Each notification updates the tables and window state first and then
//! emits its event, so callbacks observe the post-transition state.

use crate::backend::NativeEvent;
use crate::error::{ErrorCode, Severity};
use crate::events::{ButtonEvent, Event, EventData, EventKind, KeyEvent, PushOutcome};
use crate::foundation::geometry::{Point, Rect};
use crate::input::{Key, Modifiers, MouseButton};
use crate::window::{FrameFlags, WindowFlags, WindowId};

use super::Platform;

impl Platform {
    pub(crate) fn handle_native(&mut self, native: NativeEvent) {
        if let Some(id) = native.window() {
            if !self.windows.contains_key(id) {
                self.diagnostics.report(
                    Severity::Warning,
                    ErrorCode::StaleWindow,
                    Some(id),
                    format_args!("dropping notification for closed window: {:?}", native),
                );
                return;
            }
        }

        match native {
            NativeEvent::Key {
                window,
                scancode,
                pressed,
                repeat,
                locks,
            } => self.on_key(window, scancode, pressed, repeat, locks),
            NativeEvent::KeyChar { window, ch } => self.on_char(window, ch),
            NativeEvent::MouseButton {
                window,
                button,
                pressed,
            } => self.on_button(window, button, pressed),
            NativeEvent::MouseMove { window, position } => self.on_mouse_move(window, position),
            NativeEvent::RawMotion { window, delta } => self.on_raw_motion(window, delta),
            NativeEvent::Scroll { window, dx, dy } => {
                self.scroll.0 += dx;
                self.scroll.1 += dy;
                self.emit(Event::new(window, EventData::MouseScroll { dx, dy }));
            }
            NativeEvent::Enter { window, position } => {
                if let Some(state) = self.windows.get_mut(window) {
                    state.mouse_inside = true;
                    state.last_mouse = position;
                    state.frame.insert(FrameFlags::MOUSE_ENTERED);
                }
                self.emit(Event::new(window, EventData::MouseEnter { position }));
            }
            NativeEvent::Leave { window } => {
                if let Some(state) = self.windows.get_mut(window) {
                    state.mouse_inside = false;
                    state.frame.insert(FrameFlags::MOUSE_LEFT);
                }
                self.emit(Event::new(window, EventData::MouseLeave));
            }
            NativeEvent::FocusIn { window } => self.on_focus_in(window),
            NativeEvent::FocusOut { window } => {
                self.emit(Event::new(window, EventData::FocusOut));
                let _ = self.focus_lost(window);
            }
            NativeEvent::Configure { window, rect } => {
                if rect.w <= 0 || rect.h <= 0 {
                    self.diagnostics.report(
                        Severity::Error,
                        ErrorCode::NativeProtocol,
                        Some(window),
                        format_args!("configure with invalid size {}x{} ignored", rect.w, rect.h),
                    );
                    return;
                }
                self.apply_geometry(window, rect);
                let _ = self.check_mode(window);
            }
            NativeEvent::Refresh { window } => self.emit(Event::new(window, EventData::WindowRefresh)),
            NativeEvent::CloseRequest { window } => self.request_close(window),
            NativeEvent::DragOver { window, position } => {
                if self.accepts_drops(window) {
                    self.emit(Event::new(window, EventData::DataDrag { position }));
                }
            }
            NativeEvent::Drop {
                window,
                position,
                paths,
            } => self.on_drop(window, position, paths),
            NativeEvent::ScaleChanged { window, x, y } => {
                self.emit(Event::new(window, EventData::ScaleUpdated { x, y }));
            }
            NativeEvent::MonitorConnected(monitor) => {
                let name = monitor.name.clone();
                match self.monitors.add(monitor) {
                    Some(id) => {
                        log::info!("Monitor '{}' connected as {:?}", name, id);
                        self.emit(Event::global(EventData::MonitorConnected { monitor: id }));
                    }
                    None => self.diagnostics.report(
                        Severity::Warning,
                        ErrorCode::MonitorPoolExhausted,
                        None,
                        format_args!("monitor '{}' ignored: pool of {} is full", name, self.monitors.capacity()),
                    ),
                }
            }
            NativeEvent::MonitorDisconnected { name } => {
                let found = self.monitors.find(|m| m.name == name);
                match found.and_then(|(id, prev)| self.monitors.remove(id, prev).map(|_| id)) {
                    Some(id) => {
                        log::info!("Monitor '{}' disconnected", name);
                        self.emit(Event::global(EventData::MonitorDisconnected { monitor: id }));
                    }
                    None => self.diagnostics.report(
                        Severity::Warning,
                        ErrorCode::UnknownMonitor,
                        None,
                        format_args!("disconnect for unknown monitor '{}'", name),
                    ),
                }
            }
        }
    }

    fn on_key(&mut self, window: WindowId, scancode: u8, pressed: bool, repeat: bool, locks: Modifiers) {
        let key = self.keycodes.key(scancode);
        if key != Key::Unknown {
            self.keys.record_edge(key, pressed);
        }
        let modifiers = self.held_modifiers() | (locks & Modifiers::LOCKS);
        self.modifiers = modifiers;

        let Some(state) = self.windows.get_mut(window) else {
            return;
        };
        state.modifiers = modifiers;
        let exit = pressed && !repeat && key != Key::Unknown && key == state.exit_key;

        let event = KeyEvent {
            key,
            native: scancode,
            repeat,
            modifiers,
        };
        let data = if pressed {
            EventData::KeyPressed(event)
        } else {
            EventData::KeyReleased(event)
        };
        self.emit(Event::new(window, data));

        if exit {
            self.request_close(window);
        }
    }

    fn on_char(&mut self, window: WindowId, ch: char) {
        if self.chars.len() < self.config.char_queue_capacity {
            self.chars.push_back(ch);
        } else {
            log::debug!("Character queue full, {:?} not kept for this pass", ch);
        }
        self.emit(Event::new(window, EventData::KeyChar { ch }));
    }

    fn held_modifiers(&self) -> Modifiers {
        self.keys
            .down_codes()
            .fold(Modifiers::empty(), |held, key| held | key.modifier())
    }

    fn on_button(&mut self, window: WindowId, button: MouseButton, pressed: bool) {
        self.buttons.record_edge(button, pressed);
        let position = self.windows.get(window).map(|w| w.last_mouse).unwrap_or_default();
        let event = ButtonEvent { button, position };
        let data = if pressed {
            EventData::MouseButtonPressed(event)
        } else {
            EventData::MouseButtonReleased(event)
        };
        self.emit(Event::new(window, data));
    }

    fn on_mouse_move(&mut self, window: WindowId, position: Point) {
        let Some(state) = self.windows.get_mut(window) else {
            return;
        };
        // Held pointers only report relative motion.
        if state.hold_mouse {
            return;
        }
        let last = state.last_mouse;
        state.last_mouse = position;

        let delta = Point::new(position.x - last.x, position.y - last.y);
        self.motion = self.motion.offset(delta.x, delta.y);
        self.emit(Event::new(window, EventData::MouseMotion { position, delta }));
    }

    fn on_raw_motion(&mut self, window: WindowId, delta: Point) {
        let Some(state) = self.windows.get(window) else {
            return;
        };
        if !state.hold_mouse {
            return;
        }
        let position = state.last_mouse.offset(delta.x, delta.y);

        self.motion = self.motion.offset(delta.x, delta.y);
        self.emit(Event::new(window, EventData::MouseMotion { position, delta }));
        self.recenter_mouse(window);
    }

    fn on_focus_in(&mut self, window: WindowId) {
        let Some(state) = self.windows.get_mut(window) else {
            return;
        };
        state.focus = true;
        let holding = state.hold_mouse;
        self.focused = Some(window);

        if holding {
            self.dispatch.backend_mut().capture_mouse(window);
            self.recenter_mouse(window);
        }
        self.emit(Event::new(window, EventData::FocusIn));
    }

    fn accepts_drops(&self, window: WindowId) -> bool {
        self.windows
            .get(window)
            .is_some_and(|w| w.flags.contains(WindowFlags::ALLOW_DND))
    }

    fn on_drop(&mut self, window: WindowId, position: Point, paths: Vec<std::path::PathBuf>) {
        if !self.accepts_drops(window) {
            log::debug!("Window {:?} does not accept drops; {} path(s) ignored", window, paths.len());
            return;
        }
        let Some(state) = self.windows.get_mut(window) else {
            return;
        };
        let overflow = state.drops.fill(paths);
        state.frame.insert(FrameFlags::DATA_DROPPED);
        let count = state.drops.len();
        let capacity = state.drops.capacity();

        if overflow > 0 {
            self.diagnostics.report(
                Severity::Warning,
                ErrorCode::DropLimitExceeded,
                Some(window),
                format_args!("{} dropped path(s) discarded, limit is {}", overflow, capacity),
            );
        }
        self.emit(Event::new(window, EventData::DataDrop { position, count }));
    }

    /// Diff the stored rectangle against `rect`, emitting moved / resized
    pub(crate) fn apply_geometry(&mut self, window: WindowId, rect: Rect) {
        let Some(state) = self.windows.get_mut(window) else {
            return;
        };
        let old = state.rect;
        state.rect = rect;

        if old.position() != rect.position() {
            self.emit(Event::new(window, EventData::WindowMoved { rect }));
        }
        if !old.same_size(&rect) {
            self.emit(Event::new(window, EventData::WindowResized { rect }));
        }
    }

    /// Synthesize a release, with its event, for every held key and button
    pub(crate) fn release_all_input(&mut self, window: WindowId) {
        for &key in Key::ALL {
            if !self.keys.down(key) {
                continue;
            }
            self.keys.record_edge(key, false);
            let event = KeyEvent {
                key,
                native: self.keycodes.native(key).unwrap_or(0),
                repeat: false,
                modifiers: self.held_modifiers() | (self.modifiers & Modifiers::LOCKS),
            };
            self.emit(Event::new(window, EventData::KeyReleased(event)));
        }

        let position = self.windows.get(window).map(|w| w.last_mouse).unwrap_or_default();
        for button in MouseButton::ALL {
            if self.buttons.down(button) {
                self.buttons.record_edge(button, false);
                self.emit(Event::new(
                    window,
                    EventData::MouseButtonReleased(ButtonEvent { button, position }),
                ));
            }
        }

        self.modifiers = self.held_modifiers() | (self.modifiers & Modifiers::LOCKS);
        if let Some(state) = self.windows.get_mut(window) {
            state.modifiers = self.modifiers;
        }
    }

    /// Emit `Quit`; without a queue to pop it from, close at once
    pub(crate) fn request_close(&mut self, window: WindowId) {
        let quit = EventKind::Quit.mask();
        let delivered_later = self.queue.is_enabled()
            && self.windows.get(window).is_some_and(|w| w.accepts(quit));
        if !delivered_later {
            if let Some(state) = self.windows.get_mut(window) {
                state.should_close = true;
            }
        }
        self.emit(Event::new(window, EventData::Quit));
    }

    /// Deliver an event to its callback and the queue
    ///
    /// Events a window has disabled go nowhere; events for windows that no
    /// longer exist are dropped.
    pub(crate) fn emit(&mut self, event: Event) {
        if let Some(id) = event.window {
            match self.windows.get(id) {
                Some(state) if !state.accepts(event.kind().mask()) => return,
                Some(_) => {}
                None => {
                    self.diagnostics.report(
                        Severity::Warning,
                        ErrorCode::StaleWindow,
                        Some(id),
                        format_args!("{:?} for closed window dropped", event.kind()),
                    );
                    return;
                }
            }
        }

        self.callbacks.dispatch(&event);

        if let PushOutcome::Overflowed { dropped } = self.queue.push(event) {
            self.diagnostics.report(
                Severity::Warning,
                ErrorCode::EventQueueOverflow,
                event.window,
                format_args!("event queue full ({} slots), {} event(s) dropped", self.queue.capacity(), dropped),
            );
        }
    }
}
