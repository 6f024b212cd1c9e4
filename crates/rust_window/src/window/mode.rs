//! Minimize / maximize / restore state machine
//!
//! X11 has no push notification for iconify or maximize, so the state is
//! derived by diffing native query results. Push-capable backends call the
//! same transition from their configure notifications. [`ModeTracker::observe`]
//! is the single transition function for both triggers and is idempotent:
//! feeding it an unchanged native state never yields a second change.
//!
//! States: normal, minimized, maximized, plus the transient "restoring"
//! step, which is the [`ModeChange::Restored`] edge back to normal.

/// Result of querying the native window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NativeMode {
    /// The native window is iconified / minimized
    pub minimized: bool,
    /// The native window is maximized
    pub maximized: bool,
}

impl NativeMode {
    /// Neither minimized nor maximized
    pub const NORMAL: Self = Self { minimized: false, maximized: false };
    /// Minimized
    pub const MINIMIZED: Self = Self { minimized: true, maximized: false };
    /// Maximized
    pub const MAXIMIZED: Self = Self { minimized: false, maximized: true };
}

/// Stable window mode as last observed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowMode {
    /// Neither minimized nor maximized
    #[default]
    Normal,
    /// Minimized
    Minimized,
    /// Maximized
    Maximized,
}

/// Transition reported by [`ModeTracker::observe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeChange {
    /// Entered the minimized state
    Minimized,
    /// Entered the maximized state
    Maximized,
    /// Left the minimized or maximized state
    Restored,
}

/// Per-window mode flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModeTracker {
    mode: WindowMode,
}

impl ModeTracker {
    /// Tracker starting in `mode`
    pub const fn new(mode: WindowMode) -> Self {
        Self { mode }
    }

    /// Last observed mode
    pub const fn mode(&self) -> WindowMode {
        self.mode
    }

    /// Feed one native query result; first match wins
    ///
    /// 1. minimized natively but not tracked as minimized → `Minimized`
    /// 2. else maximized natively but not tracked as maximized → `Maximized`
    /// 3. else tracked as minimized or maximized but natively neither → `Restored`
    pub fn observe(&mut self, native: NativeMode) -> Option<ModeChange> {
        let (mode, change) = if native.minimized {
            if self.mode == WindowMode::Minimized {
                return None;
            }
            (WindowMode::Minimized, ModeChange::Minimized)
        } else if native.maximized {
            if self.mode == WindowMode::Maximized {
                return None;
            }
            (WindowMode::Maximized, ModeChange::Maximized)
        } else if self.mode != WindowMode::Normal {
            (WindowMode::Normal, ModeChange::Restored)
        } else {
            return None;
        };

        self.mode = mode;
        Some(change)
    }
}
