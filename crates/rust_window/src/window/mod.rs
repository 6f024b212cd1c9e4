//! Window identifiers, creation parameters and per-window state
//!
//! Windows are owned by the platform context and addressed by
//! [`WindowId`], a generational key: an id that outlives its window simply
//! stops resolving, which is how events targeting a closed window become
//! undeliverable.
//!
//! # Module Organization
//!
//! - **`icon`**: RGBA images for window icons and custom cursors
//! - **`mode`**: minimize / maximize / restore state machine
//! - **`state`**: internal state the context keeps for each window

pub mod icon;
pub mod mode;
pub mod state;

pub use icon::{CursorId, Icon, IconError, IconSlot};
pub use mode::{ModeChange, ModeTracker, NativeMode, WindowMode};
pub use state::{DropBuffer, FrameFlags, WindowState};

use bitflags::bitflags;

use crate::events::EventMask;
use crate::foundation::geometry::Rect;
use crate::input::Key;

slotmap::new_key_type! {
    /// Weak reference to a window owned by a platform context
    pub struct WindowId;
}

bitflags! {
    /// Window creation and runtime flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct WindowFlags: u32 {
        /// No title bar or border
        const NO_BORDER = 1 << 0;
        /// The user cannot resize the window
        const NO_RESIZE = 1 << 1;
        /// Accept drag and drop
        const ALLOW_DND = 1 << 2;
        /// Hide the cursor over the window
        const HIDE_MOUSE = 1 << 3;
        /// Start (or currently is) fullscreen
        const FULLSCREEN = 1 << 4;
        /// Transparent framebuffer
        const TRANSPARENT = 1 << 5;
        /// Center on the primary monitor at creation
        const CENTER = 1 << 6;
        /// Scale the initial size by the monitor's content scale
        const SCALE_TO_MONITOR = 1 << 7;
        /// Start hidden
        const HIDE = 1 << 8;
        /// Start maximized
        const MAXIMIZE = 1 << 9;
        /// Start minimized
        const MINIMIZE = 1 << 10;
        /// Take focus whenever the window is shown
        const FOCUS_ON_SHOW = 1 << 11;
        /// Take focus at creation
        const FOCUS = 1 << 12;
        /// Hold (capture) the mouse at creation
        const HOLD_MOUSE = 1 << 13;
        /// Keep above other windows
        const FLOATING = 1 << 14;
    }
}

/// Standard cursor shapes a backend can show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StandardCursor {
    /// Platform default
    #[default]
    Normal,
    /// Arrow
    Arrow,
    /// Text insertion beam
    IBeam,
    /// Crosshair
    Crosshair,
    /// Pointing hand
    PointingHand,
    /// Horizontal resize
    ResizeEW,
    /// Vertical resize
    ResizeNS,
    /// Diagonal resize (north-west / south-east)
    ResizeNWSE,
    /// Diagonal resize (north-east / south-west)
    ResizeNESW,
    /// Move / resize in every direction
    ResizeAll,
    /// Action not allowed
    NotAllowed,
}

/// Parameters for creating a window
#[derive(Debug, Clone, PartialEq)]
pub struct WindowDesc {
    /// Title bar text
    pub title: String,
    /// Initial rectangle
    pub rect: Rect,
    /// Creation flags
    pub flags: WindowFlags,
    /// Key that requests close when pressed
    pub exit_key: Key,
    /// Event kinds delivered for this window
    pub enabled_events: EventMask,
}

impl WindowDesc {
    /// Describe a `width` × `height` window at the origin
    pub fn new(title: impl Into<String>, width: i32, height: i32) -> Self {
        Self {
            title: title.into(),
            rect: Rect::new(0, 0, width, height),
            flags: WindowFlags::empty(),
            exit_key: Key::Escape,
            enabled_events: EventMask::all(),
        }
    }

    /// Set the initial position
    pub fn with_position(mut self, x: i32, y: i32) -> Self {
        self.rect.x = x;
        self.rect.y = y;
        self
    }

    /// Add creation flags
    pub fn with_flags(mut self, flags: WindowFlags) -> Self {
        self.flags |= flags;
        self
    }

    /// Set the exit key (`Key::Unknown` disables it)
    pub fn with_exit_key(mut self, key: Key) -> Self {
        self.exit_key = key;
        self
    }

    /// Restrict the delivered event kinds
    pub fn with_events(mut self, mask: EventMask) -> Self {
        self.enabled_events = mask;
        self
    }
}

impl Default for WindowDesc {
    fn default() -> Self {
        Self::new("rust_window", 800, 600)
    }
}
