//! Native backend interface
//!
//! A [`NativeBackend`] is the only place that talks to a display server.
//! The platform context never calls one directly: every operation goes
//! through the [`BackendDispatch`], which owns the bound backend and the
//! fallback chosen at start-up.
//!
//! Backends report native notifications as [`NativeEvent`]s. The context
//! translates them into [`crate::events::Event`]s and updates the key
//! tables and window state.
//!
//! # Module Organization
//!
//! - **`dispatch`**: preferred / fallback binding and selection lock
//! - **`headless`**: in-memory display server (polling or push style)

pub mod dispatch;
pub mod headless;

pub use dispatch::{BackendDispatch, Backends};
pub use headless::{HeadlessBackend, HeadlessHandle, NotifyStyle};

use std::path::PathBuf;
use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::time::Duration;

use crate::config::PlatformConfig;
use crate::foundation::geometry::{Point, Rect};
use crate::input::{KeycodeMap, Modifiers, MouseButton};
use crate::monitor::Monitor;
use crate::window::{CursorId, Icon, IconSlot, NativeMode, StandardCursor, WindowDesc, WindowId};

/// Native windowing system family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// X Window System
    X11,
    /// Wayland compositor
    Wayland,
    /// Windows
    Win32,
    /// macOS
    Cocoa,
    /// Browser canvas
    Web,
    /// In-memory simulation
    Headless,
}

/// Notification reported by a backend, not yet translated
#[derive(Debug, Clone, PartialEq)]
pub enum NativeEvent {
    /// Key transition carrying the native scancode
    Key {
        /// Target window
        window: WindowId,
        /// Native scancode
        scancode: u8,
        /// Down or up
        pressed: bool,
        /// Auto-repeat
        repeat: bool,
        /// Lock state reported by the server
        locks: Modifiers,
    },
    /// Composed text input
    KeyChar {
        /// Target window
        window: WindowId,
        /// Character produced by the keyboard layout
        ch: char,
    },
    /// Mouse button transition
    MouseButton {
        /// Target window
        window: WindowId,
        /// Button
        button: MouseButton,
        /// Down or up
        pressed: bool,
    },
    /// Absolute cursor position inside the window
    MouseMove {
        /// Target window
        window: WindowId,
        /// New position
        position: Point,
    },
    /// Relative pointer motion, reported while the pointer is captured
    RawMotion {
        /// Target window
        window: WindowId,
        /// Motion since the last report
        delta: Point,
    },
    /// Wheel or trackpad scroll
    Scroll {
        /// Target window
        window: WindowId,
        /// Horizontal amount
        dx: f32,
        /// Vertical amount
        dy: f32,
    },
    /// Cursor entered the window
    Enter {
        /// Target window
        window: WindowId,
        /// Entry point
        position: Point,
    },
    /// Cursor left the window
    Leave {
        /// Target window
        window: WindowId,
    },
    /// Keyboard focus gained
    FocusIn {
        /// Target window
        window: WindowId,
    },
    /// Keyboard focus lost
    FocusOut {
        /// Target window
        window: WindowId,
    },
    /// Geometry or visibility changed
    Configure {
        /// Target window
        window: WindowId,
        /// Current rectangle
        rect: Rect,
    },
    /// Contents must be redrawn
    Refresh {
        /// Target window
        window: WindowId,
    },
    /// The user asked to close the window
    CloseRequest {
        /// Target window
        window: WindowId,
    },
    /// Data is dragged over the window
    DragOver {
        /// Target window
        window: WindowId,
        /// Hover point
        position: Point,
    },
    /// Files were dropped on the window
    Drop {
        /// Target window
        window: WindowId,
        /// Drop point
        position: Point,
        /// Dropped paths
        paths: Vec<PathBuf>,
    },
    /// The window moved to a monitor with another content scale
    ScaleChanged {
        /// Target window
        window: WindowId,
        /// Horizontal scale
        x: f32,
        /// Vertical scale
        y: f32,
    },
    /// A monitor was plugged in
    MonitorConnected(Monitor),
    /// A monitor was unplugged
    MonitorDisconnected {
        /// Name the monitor was announced with
        name: String,
    },
}

impl NativeEvent {
    /// Window the notification targets, `None` for monitor hot-plug
    pub fn window(&self) -> Option<WindowId> {
        match self {
            Self::Key { window, .. }
            | Self::KeyChar { window, .. }
            | Self::MouseButton { window, .. }
            | Self::MouseMove { window, .. }
            | Self::RawMotion { window, .. }
            | Self::Scroll { window, .. }
            | Self::Enter { window, .. }
            | Self::Leave { window }
            | Self::FocusIn { window }
            | Self::FocusOut { window }
            | Self::Configure { window, .. }
            | Self::Refresh { window }
            | Self::CloseRequest { window }
            | Self::DragOver { window, .. }
            | Self::Drop { window, .. }
            | Self::ScaleChanged { window, .. } => Some(*window),
            Self::MonitorConnected(_) | Self::MonitorDisconnected { .. } => None,
        }
    }
}

/// How long [`NativeBackend::wait`] may block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WaitTimeout {
    /// Return immediately
    #[default]
    NoWait,
    /// Block up to this many milliseconds
    Millis(u32),
    /// Block until an event arrives or the waker fires
    Forever,
}

impl WaitTimeout {
    /// Convert a signed millisecond count: 0 never waits, negative waits forever
    pub fn from_millis(ms: i32) -> Self {
        match u32::try_from(ms) {
            Ok(0) => Self::NoWait,
            Ok(ms) => Self::Millis(ms),
            Err(_) => Self::Forever,
        }
    }

    /// Bounded duration, `None` for [`WaitTimeout::Forever`]
    pub fn duration(self) -> Option<Duration> {
        match self {
            Self::NoWait => Some(Duration::ZERO),
            Self::Millis(ms) => Some(Duration::from_millis(u64::from(ms))),
            Self::Forever => None,
        }
    }
}

#[derive(Debug, Default)]
struct WakeSignal {
    woken: Mutex<bool>,
    cond: Condvar,
}

/// Handle that unblocks a pending wait from any thread
///
/// This is the only type in the crate that is `Send + Sync`; everything
/// else belongs to the thread that owns the context.
#[derive(Debug, Clone, Default)]
pub struct Waker {
    signal: Arc<WakeSignal>,
}

impl Waker {
    /// Create an unsignalled waker
    pub fn new() -> Self {
        Self::default()
    }

    /// Wake the thread blocked in a wait, or make the next wait return at once
    pub fn wake(&self) {
        let mut woken = self.signal.woken.lock().unwrap_or_else(PoisonError::into_inner);
        *woken = true;
        self.signal.cond.notify_all();
    }

    /// Block until woken or `timeout` elapses; returns whether it was woken
    ///
    /// Consumes the wake signal.
    pub fn wait(&self, timeout: WaitTimeout) -> bool {
        let guard = self.signal.woken.lock().unwrap_or_else(PoisonError::into_inner);
        let mut woken = match timeout.duration() {
            None => self
                .signal
                .cond
                .wait_while(guard, |woken| !*woken)
                .unwrap_or_else(PoisonError::into_inner),
            Some(limit) => {
                self.signal
                    .cond
                    .wait_timeout_while(guard, limit, |woken| !*woken)
                    .unwrap_or_else(PoisonError::into_inner)
                    .0
            }
        };
        std::mem::replace(&mut *woken, false)
    }
}

/// Operations every native backend provides
///
/// Window operations take the context's [`WindowId`]; the backend keeps
/// its own native handle per id. Mutators never report failure: a native
/// error is logged by the backend and the context picks up the actual
/// state on the next query.
pub trait NativeBackend {
    /// Windowing system family
    fn kind(&self) -> BackendKind;

    /// Name used in logs and diagnostics
    fn name(&self) -> &'static str;

    /// Connect to the display server
    fn init(&mut self, config: &PlatformConfig) -> Result<(), String>;

    /// Disconnect; safe to call on a backend whose init failed
    fn deinit(&mut self);

    /// Bind every native scancode this backend knows
    fn fill_keycodes(&self, map: &mut KeycodeMap);

    /// Create the native window for `id`, returning its actual rectangle
    fn create_window(&mut self, id: WindowId, desc: &WindowDesc) -> Result<Rect, String>;

    /// Destroy the native window for `id`
    fn close_window(&mut self, id: WindowId);

    /// Append pending notifications to `out` without blocking
    fn poll(&mut self, out: &mut Vec<NativeEvent>);

    /// Block until a notification is pending, the waker fires or `timeout` elapses
    fn wait(&mut self, timeout: WaitTimeout);

    /// Handle that interrupts [`wait`](Self::wait) from another thread
    fn waker(&self) -> Waker;

    /// Native minimized / maximized state
    fn query_mode(&self, id: WindowId) -> NativeMode;

    /// Native rectangle, `None` if the window is unknown
    fn query_rect(&self, id: WindowId) -> Option<Rect>;

    /// Move the top-left corner
    fn move_window(&mut self, id: WindowId, position: Point);

    /// Resize the client area
    fn resize(&mut self, id: WindowId, width: i32, height: i32);

    /// Iconify
    fn minimize(&mut self, id: WindowId);

    /// Maximize
    fn maximize(&mut self, id: WindowId);

    /// Leave minimized / maximized state
    fn restore(&mut self, id: WindowId);

    /// Enter or leave fullscreen
    fn set_fullscreen(&mut self, id: WindowId, fullscreen: bool);

    /// Map the window
    fn show(&mut self, id: WindowId);

    /// Unmap the window
    fn hide(&mut self, id: WindowId);

    /// Request keyboard focus
    fn focus(&mut self, id: WindowId);

    /// Set the title bar text
    fn set_title(&mut self, id: WindowId, title: &str);

    /// Warp the cursor to a window-relative position
    fn set_mouse_position(&mut self, id: WindowId, position: Point);

    /// Confine the pointer and switch to relative motion reports
    fn capture_mouse(&mut self, id: WindowId);

    /// Undo [`capture_mouse`](Self::capture_mouse)
    fn release_mouse(&mut self, id: WindowId);

    /// Show or hide the cursor over the window
    fn show_mouse(&mut self, id: WindowId, visible: bool);

    /// Use a standard cursor shape over the window
    fn set_cursor(&mut self, id: WindowId, cursor: StandardCursor);

    /// Create a native cursor from `image` with its hot spot at `hotspot`
    fn load_cursor(&mut self, cursor: CursorId, image: &Icon, hotspot: Point) -> Result<(), String>;

    /// Use a cursor created by [`load_cursor`](Self::load_cursor) over the window
    fn set_custom_cursor(&mut self, id: WindowId, cursor: CursorId);

    /// Destroy a loaded cursor; windows showing it fall back to the default shape
    fn free_cursor(&mut self, cursor: CursorId);

    /// Set or clear (`None`) the window's icon in `slot`
    fn set_icon(&mut self, id: WindowId, slot: IconSlot, icon: Option<&Icon>);

    /// Monitors connected at init
    fn enumerate_monitors(&self) -> Vec<Monitor>;

    /// Copy clipboard text into `buffer`; `false` when there is no text
    fn read_clipboard(&mut self, buffer: &mut String) -> bool;

    /// Take clipboard ownership with `text`
    fn write_clipboard(&mut self, text: &str) -> Result<(), String>;
}
