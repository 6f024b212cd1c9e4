//! Unified event model
//!
//! Every native notification style (polled X11 queries, Wayland
//! listeners, the Win32 message pump, Cocoa delegates, browser callbacks)
//! is translated into the same [`Event`] value. Events are small `Copy`
//! records so the bounded [`EventQueue`] can rotate them without
//! allocating.
//!
//! # Module Organization
//!
//! - **`queue`**: fixed-capacity FIFO with per-window delivery
//! - **`callbacks`**: one callback slot per [`CallbackCategory`]

pub mod callbacks;
pub mod queue;

pub use callbacks::{CallbackCategory, Callbacks, EventCallback};
pub use queue::{EventQueue, PushOutcome};

use bitflags::bitflags;

use crate::foundation::geometry::{Point, Rect};
use crate::input::{Key, Modifiers, MouseButton};
use crate::monitor::MonitorId;
use crate::window::WindowId;

/// Payload of key events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// Translated key
    pub key: Key,
    /// Native scancode the key was translated from
    pub native: u8,
    /// Auto-repeat while held
    pub repeat: bool,
    /// Modifier and lock state after this transition
    pub modifiers: Modifiers,
}

/// Payload of mouse button events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonEvent {
    /// Button that changed
    pub button: MouseButton,
    /// Cursor position inside the window
    pub position: Point,
}

/// Event payload, one variant per event kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EventData {
    /// A key went down (or repeated)
    KeyPressed(KeyEvent),
    /// A key went up
    KeyReleased(KeyEvent),
    /// A mouse button went down
    MouseButtonPressed(ButtonEvent),
    /// A mouse button went up
    MouseButtonReleased(ButtonEvent),
    /// Wheel or trackpad scroll
    MouseScroll {
        /// Horizontal delta
        dx: f32,
        /// Vertical delta
        dy: f32,
    },
    /// The cursor moved
    MouseMotion {
        /// New cursor position inside the window
        position: Point,
        /// Movement since the previous position
        delta: Point,
    },
    /// The cursor entered the window
    MouseEnter {
        /// Entry position
        position: Point,
    },
    /// The cursor left the window
    MouseLeave,
    /// The window moved
    WindowMoved {
        /// New window rectangle
        rect: Rect,
    },
    /// The window was resized
    WindowResized {
        /// New window rectangle
        rect: Rect,
    },
    /// The window contents must be redrawn
    WindowRefresh,
    /// The window gained input focus
    FocusIn,
    /// The window lost input focus
    FocusOut,
    /// The window was minimized
    Minimized,
    /// The window was maximized
    Maximized {
        /// Maximized rectangle
        rect: Rect,
    },
    /// The window left the minimized or maximized state
    Restored {
        /// Restored rectangle
        rect: Rect,
    },
    /// The window was asked to close
    Quit,
    /// Dragged data is hovering over the window
    DataDrag {
        /// Hover position
        position: Point,
    },
    /// Data was dropped onto the window
    DataDrop {
        /// Drop position
        position: Point,
        /// Number of paths stored in the window's drop buffer
        count: usize,
    },
    /// The window's content scale changed
    ScaleUpdated {
        /// Horizontal scale
        x: f32,
        /// Vertical scale
        y: f32,
    },
    /// A monitor was connected
    MonitorConnected {
        /// Registry node of the new monitor
        monitor: MonitorId,
    },
    /// A monitor was disconnected
    MonitorDisconnected {
        /// Registry node the monitor occupied
        monitor: MonitorId,
    },
    /// Text input produced a character
    KeyChar {
        /// Unicode scalar after layout and dead-key composition
        ch: char,
    },
}

/// Event type identification, one per [`EventData`] variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum EventKind {
    /// [`EventData::KeyPressed`]
    KeyPressed,
    /// [`EventData::KeyReleased`]
    KeyReleased,
    /// [`EventData::MouseButtonPressed`]
    MouseButtonPressed,
    /// [`EventData::MouseButtonReleased`]
    MouseButtonReleased,
    /// [`EventData::MouseScroll`]
    MouseScroll,
    /// [`EventData::MouseMotion`]
    MouseMotion,
    /// [`EventData::MouseEnter`]
    MouseEnter,
    /// [`EventData::MouseLeave`]
    MouseLeave,
    /// [`EventData::WindowMoved`]
    WindowMoved,
    /// [`EventData::WindowResized`]
    WindowResized,
    /// [`EventData::WindowRefresh`]
    WindowRefresh,
    /// [`EventData::FocusIn`]
    FocusIn,
    /// [`EventData::FocusOut`]
    FocusOut,
    /// [`EventData::Minimized`]
    Minimized,
    /// [`EventData::Maximized`]
    Maximized,
    /// [`EventData::Restored`]
    Restored,
    /// [`EventData::Quit`]
    Quit,
    /// [`EventData::DataDrag`]
    DataDrag,
    /// [`EventData::DataDrop`]
    DataDrop,
    /// [`EventData::ScaleUpdated`]
    ScaleUpdated,
    /// [`EventData::MonitorConnected`]
    MonitorConnected,
    /// [`EventData::MonitorDisconnected`]
    MonitorDisconnected,
    /// [`EventData::KeyChar`]
    KeyChar,
}

impl EventKind {
    /// Mask bit for this kind
    pub const fn mask(self) -> EventMask {
        EventMask::from_bits_truncate(1 << self as u32)
    }

    /// Callback slot that receives this kind
    pub const fn category(self) -> CallbackCategory {
        match self {
            Self::KeyPressed | Self::KeyReleased => CallbackCategory::Key,
            Self::MouseButtonPressed | Self::MouseButtonReleased => CallbackCategory::MouseButton,
            Self::MouseScroll => CallbackCategory::MouseScroll,
            Self::MouseMotion => CallbackCategory::MouseMotion,
            Self::MouseEnter | Self::MouseLeave => CallbackCategory::MouseNotify,
            Self::WindowMoved | Self::WindowResized => CallbackCategory::WindowGeometry,
            Self::WindowRefresh => CallbackCategory::Refresh,
            Self::FocusIn | Self::FocusOut => CallbackCategory::Focus,
            Self::Minimized | Self::Maximized | Self::Restored => CallbackCategory::WindowMode,
            Self::Quit => CallbackCategory::Quit,
            Self::DataDrag => CallbackCategory::DataDrag,
            Self::DataDrop => CallbackCategory::DataDrop,
            Self::ScaleUpdated => CallbackCategory::Scale,
            Self::MonitorConnected | Self::MonitorDisconnected => CallbackCategory::Monitor,
            Self::KeyChar => CallbackCategory::KeyChar,
        }
    }
}

bitflags! {
    /// Per-window set of enabled event kinds
    ///
    /// Bit `n` corresponds to the [`EventKind`] with discriminant `n`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct EventMask: u32 {
        /// Key pressed
        const KEY_PRESSED = 1 << 0;
        /// Key released
        const KEY_RELEASED = 1 << 1;
        /// Mouse button pressed
        const MOUSE_BUTTON_PRESSED = 1 << 2;
        /// Mouse button released
        const MOUSE_BUTTON_RELEASED = 1 << 3;
        /// Mouse scroll
        const MOUSE_SCROLL = 1 << 4;
        /// Mouse motion
        const MOUSE_MOTION = 1 << 5;
        /// Mouse entered
        const MOUSE_ENTER = 1 << 6;
        /// Mouse left
        const MOUSE_LEAVE = 1 << 7;
        /// Window moved
        const WINDOW_MOVED = 1 << 8;
        /// Window resized
        const WINDOW_RESIZED = 1 << 9;
        /// Window refresh
        const WINDOW_REFRESH = 1 << 10;
        /// Focus gained
        const FOCUS_IN = 1 << 11;
        /// Focus lost
        const FOCUS_OUT = 1 << 12;
        /// Minimized
        const MINIMIZED = 1 << 13;
        /// Maximized
        const MAXIMIZED = 1 << 14;
        /// Restored
        const RESTORED = 1 << 15;
        /// Close requested
        const QUIT = 1 << 16;
        /// Data dragged over the window
        const DATA_DRAG = 1 << 17;
        /// Data dropped
        const DATA_DROP = 1 << 18;
        /// Content scale changed
        const SCALE_UPDATED = 1 << 19;
        /// Monitor connected
        const MONITOR_CONNECTED = 1 << 20;
        /// Monitor disconnected
        const MONITOR_DISCONNECTED = 1 << 21;
        /// Character input
        const KEY_CHAR = 1 << 22;

        /// All key events
        const KEY = Self::KEY_PRESSED.bits() | Self::KEY_RELEASED.bits();
        /// All mouse events
        const MOUSE = Self::MOUSE_BUTTON_PRESSED.bits()
            | Self::MOUSE_BUTTON_RELEASED.bits()
            | Self::MOUSE_SCROLL.bits()
            | Self::MOUSE_MOTION.bits()
            | Self::MOUSE_ENTER.bits()
            | Self::MOUSE_LEAVE.bits();
        /// Minimize / maximize / restore
        const WINDOW_MODE = Self::MINIMIZED.bits() | Self::MAXIMIZED.bits() | Self::RESTORED.bits();
        /// Focus in / out
        const FOCUS = Self::FOCUS_IN.bits() | Self::FOCUS_OUT.bits();
        /// Drag and drop
        const DATA = Self::DATA_DRAG.bits() | Self::DATA_DROP.bits();
        /// Monitor hot-plug
        const MONITOR = Self::MONITOR_CONNECTED.bits() | Self::MONITOR_DISCONNECTED.bits();
    }
}

impl Default for EventMask {
    fn default() -> Self {
        Self::all()
    }
}

/// One translated event
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Event {
    /// Target window; `None` for context-wide events such as monitor hot-plug
    pub window: Option<WindowId>,
    /// Payload
    pub data: EventData,
}

impl Event {
    /// Event targeting a window
    pub const fn new(window: WindowId, data: EventData) -> Self {
        Self { window: Some(window), data }
    }

    /// Event with no target window
    pub const fn global(data: EventData) -> Self {
        Self { window: None, data }
    }

    /// Kind of this event
    pub const fn kind(&self) -> EventKind {
        self.data.kind()
    }

    /// Whether a caller polling for `window` may receive this event
    pub fn is_for(&self, window: Option<WindowId>) -> bool {
        match (window, self.window) {
            (Some(wanted), Some(target)) => wanted == target,
            _ => true,
        }
    }
}

impl EventData {
    /// Kind of this payload
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::KeyPressed(_) => EventKind::KeyPressed,
            Self::KeyReleased(_) => EventKind::KeyReleased,
            Self::MouseButtonPressed(_) => EventKind::MouseButtonPressed,
            Self::MouseButtonReleased(_) => EventKind::MouseButtonReleased,
            Self::MouseScroll { .. } => EventKind::MouseScroll,
            Self::MouseMotion { .. } => EventKind::MouseMotion,
            Self::MouseEnter { .. } => EventKind::MouseEnter,
            Self::MouseLeave => EventKind::MouseLeave,
            Self::WindowMoved { .. } => EventKind::WindowMoved,
            Self::WindowResized { .. } => EventKind::WindowResized,
            Self::WindowRefresh => EventKind::WindowRefresh,
            Self::FocusIn => EventKind::FocusIn,
            Self::FocusOut => EventKind::FocusOut,
            Self::Minimized => EventKind::Minimized,
            Self::Maximized { .. } => EventKind::Maximized,
            Self::Restored { .. } => EventKind::Restored,
            Self::Quit => EventKind::Quit,
            Self::DataDrag { .. } => EventKind::DataDrag,
            Self::DataDrop { .. } => EventKind::DataDrop,
            Self::ScaleUpdated { .. } => EventKind::ScaleUpdated,
            Self::MonitorConnected { .. } => EventKind::MonitorConnected,
            Self::MonitorDisconnected { .. } => EventKind::MonitorDisconnected,
            Self::KeyChar { .. } => EventKind::KeyChar,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KINDS: [EventKind; 23] = [
        EventKind::KeyPressed,
        EventKind::KeyReleased,
        EventKind::MouseButtonPressed,
        EventKind::MouseButtonReleased,
        EventKind::MouseScroll,
        EventKind::MouseMotion,
        EventKind::MouseEnter,
        EventKind::MouseLeave,
        EventKind::WindowMoved,
        EventKind::WindowResized,
        EventKind::WindowRefresh,
        EventKind::FocusIn,
        EventKind::FocusOut,
        EventKind::Minimized,
        EventKind::Maximized,
        EventKind::Restored,
        EventKind::Quit,
        EventKind::DataDrag,
        EventKind::DataDrop,
        EventKind::ScaleUpdated,
        EventKind::MonitorConnected,
        EventKind::MonitorDisconnected,
        EventKind::KeyChar,
    ];

    #[test]
    fn test_each_kind_owns_one_distinct_bit() {
        let mut seen = EventMask::empty();
        for kind in KINDS {
            let bit = kind.mask();
            assert_eq!(bit.bits().count_ones(), 1, "{kind:?}");
            assert!(!seen.intersects(bit), "{kind:?} shares a bit");
            seen |= bit;
        }
        assert_eq!(seen, EventMask::all());
    }

    #[test]
    fn test_group_masks() {
        assert!(EventMask::KEY.contains(EventKind::KeyReleased.mask()));
        assert!(EventMask::MOUSE.contains(EventKind::MouseLeave.mask()));
        assert!(EventMask::WINDOW_MODE.contains(EventKind::Restored.mask()));
        assert!(!EventMask::MOUSE.contains(EventKind::FocusIn.mask()));
        assert!(!EventMask::KEY.contains(EventKind::KeyChar.mask()));
        assert_eq!(EventKind::KeyChar.category(), CallbackCategory::KeyChar);
    }

    #[test]
    fn test_global_events_match_every_window() {
        let event = Event::global(EventData::MonitorDisconnected {
            monitor: MonitorId::from_index(0),
        });
        assert!(event.is_for(None));
        assert!(event.is_for(Some(WindowId::default())));
    }
}
