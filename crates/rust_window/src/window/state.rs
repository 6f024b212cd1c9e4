//! Internal per-window state
//!
//! Owned exclusively by the platform context, mutated only while
//! translating native notifications or running the mode state machine,
//! and dropped together with the window.

use std::path::{Path, PathBuf};

use bitflags::bitflags;

use crate::events::EventMask;
use crate::foundation::geometry::{Point, Rect};
use crate::input::{Key, Modifiers};

use super::mode::{ModeTracker, WindowMode};
use super::{WindowDesc, WindowFlags};

bitflags! {
    /// One-shot flags cleared at the start of every poll pass
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FrameFlags: u8 {
        /// The cursor entered the window this pass
        const MOUSE_ENTERED = 1 << 0;
        /// The cursor left the window this pass
        const MOUSE_LEFT = 1 << 1;
        /// Data was dropped this pass
        const DATA_DROPPED = 1 << 2;
    }
}

/// Fixed-capacity storage for dropped paths
#[derive(Debug, Clone)]
pub struct DropBuffer {
    paths: Vec<PathBuf>,
    capacity: usize,
}

impl DropBuffer {
    /// Buffer holding at most `capacity` paths
    pub fn new(capacity: usize) -> Self {
        Self {
            paths: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Replace the contents; returns how many paths did not fit
    pub fn fill(&mut self, paths: impl IntoIterator<Item = PathBuf>) -> usize {
        self.paths.clear();
        let mut overflow = 0;
        for path in paths {
            if self.paths.len() < self.capacity {
                self.paths.push(path);
            } else {
                overflow += 1;
            }
        }
        overflow
    }

    /// Paths from the most recent drop
    pub fn paths(&self) -> impl ExactSizeIterator<Item = &Path> + '_ {
        self.paths.iter().map(PathBuf::as_path)
    }

    /// Number of stored paths
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Whether nothing is stored
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Maximum number of stored paths
    pub const fn capacity(&self) -> usize {
        self.capacity
    }
}

/// State the context keeps for one window
#[derive(Debug, Clone)]
pub struct WindowState {
    pub(crate) title: String,
    pub(crate) rect: Rect,
    pub(crate) saved_rect: Rect,
    pub(crate) flags: WindowFlags,
    pub(crate) exit_key: Key,
    pub(crate) enabled_events: EventMask,
    pub(crate) focus: bool,
    pub(crate) mouse_inside: bool,
    pub(crate) hold_mouse: bool,
    pub(crate) last_mouse: Point,
    pub(crate) modifiers: Modifiers,
    pub(crate) should_close: bool,
    pub(crate) mode: ModeTracker,
    pub(crate) frame: FrameFlags,
    pub(crate) drops: DropBuffer,
}

impl WindowState {
    /// Fresh state for a window created from `desc`
    pub fn new(desc: &WindowDesc, max_drops: usize) -> Self {
        Self {
            title: desc.title.clone(),
            rect: desc.rect,
            saved_rect: desc.rect,
            flags: desc.flags,
            exit_key: desc.exit_key,
            enabled_events: desc.enabled_events,
            focus: false,
            mouse_inside: false,
            hold_mouse: false,
            last_mouse: Point::default(),
            modifiers: Modifiers::empty(),
            should_close: false,
            mode: ModeTracker::default(),
            frame: FrameFlags::empty(),
            drops: DropBuffer::new(max_drops),
        }
    }

    /// Title bar text
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Current rectangle
    pub const fn rect(&self) -> Rect {
        self.rect
    }

    /// Rectangle saved before entering fullscreen
    pub const fn saved_rect(&self) -> Rect {
        self.saved_rect
    }

    /// Current flags
    pub const fn flags(&self) -> WindowFlags {
        self.flags
    }

    /// Key that requests close
    pub const fn exit_key(&self) -> Key {
        self.exit_key
    }

    /// Event kinds delivered for this window
    pub const fn enabled_events(&self) -> EventMask {
        self.enabled_events
    }

    /// Whether this window has input focus
    pub const fn is_focused(&self) -> bool {
        self.focus
    }

    /// Whether the cursor is inside the window
    pub const fn is_mouse_inside(&self) -> bool {
        self.mouse_inside
    }

    /// Whether the mouse is held (captured)
    pub const fn is_holding_mouse(&self) -> bool {
        self.hold_mouse
    }

    /// Last known cursor position inside the window
    pub const fn mouse_position(&self) -> Point {
        self.last_mouse
    }

    /// Modifier state at the last key event
    pub const fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Whether the window was asked to close
    pub const fn should_close(&self) -> bool {
        self.should_close
    }

    /// Last observed minimize / maximize mode
    pub const fn mode(&self) -> WindowMode {
        self.mode.mode()
    }

    /// Whether the window is fullscreen
    pub const fn is_fullscreen(&self) -> bool {
        self.flags.contains(WindowFlags::FULLSCREEN)
    }

    /// The cursor entered during this poll pass
    pub const fn did_mouse_enter(&self) -> bool {
        self.frame.contains(FrameFlags::MOUSE_ENTERED)
    }

    /// The cursor left during this poll pass
    pub const fn did_mouse_leave(&self) -> bool {
        self.frame.contains(FrameFlags::MOUSE_LEFT)
    }

    /// Data was dropped during this poll pass
    pub const fn did_data_drop(&self) -> bool {
        self.frame.contains(FrameFlags::DATA_DROPPED)
    }

    /// Paths from the most recent drop
    pub const fn drops(&self) -> &DropBuffer {
        &self.drops
    }

    /// Whether an event of `mask` should be delivered
    pub const fn accepts(&self, mask: EventMask) -> bool {
        self.enabled_events.contains(mask)
    }

    /// Clear frame-scoped one-shot flags
    pub fn begin_frame(&mut self) {
        self.frame = FrameFlags::empty();
    }
}
