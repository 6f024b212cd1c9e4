//! Monitor descriptors and the fixed-capacity monitor registry

pub mod registry;

pub use registry::MonitorRegistry;

use crate::foundation::geometry::{Point, Rect};

/// Slot of a monitor in the registry's node pool
///
/// Ids are recycled: once a monitor is removed its node may be handed to
/// the next monitor that is plugged in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonitorId(u16);

impl MonitorId {
    /// Id of pool node `index`
    pub const fn from_index(index: u16) -> Self {
        Self(index)
    }

    /// Pool node index
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Video mode of a monitor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MonitorMode {
    /// Horizontal resolution in pixels
    pub width: i32,
    /// Vertical resolution in pixels
    pub height: i32,
    /// Refresh rate in hertz
    pub refresh_rate: u32,
}

/// Snapshot of one connected monitor
#[derive(Debug, Clone, PartialEq)]
pub struct Monitor {
    /// Human readable name
    pub name: String,
    /// Work area in virtual screen coordinates
    pub rect: Rect,
    /// Horizontal content scale
    pub scale_x: f32,
    /// Vertical content scale
    pub scale_y: f32,
    /// Physical width in millimetres
    pub physical_width: f32,
    /// Physical height in millimetres
    pub physical_height: f32,
    /// Framebuffer pixels per logical pixel
    pub pixel_ratio: f32,
    /// Current video mode
    pub mode: MonitorMode,
}

impl Monitor {
    /// Monitor with unit scale whose mode matches `rect`
    pub fn new(name: impl Into<String>, rect: Rect) -> Self {
        Self {
            name: name.into(),
            rect,
            scale_x: 1.0,
            scale_y: 1.0,
            physical_width: 0.0,
            physical_height: 0.0,
            pixel_ratio: 1.0,
            mode: MonitorMode {
                width: rect.w,
                height: rect.h,
                refresh_rate: 60,
            },
        }
    }

    /// Set the content scale
    pub fn with_scale(mut self, x: f32, y: f32) -> Self {
        self.scale_x = x;
        self.scale_y = y;
        self
    }

    /// Set the physical size in millimetres
    pub fn with_physical_size(mut self, width: f32, height: f32) -> Self {
        self.physical_width = width;
        self.physical_height = height;
        self
    }

    /// Set the refresh rate
    pub fn with_refresh_rate(mut self, hz: u32) -> Self {
        self.mode.refresh_rate = hz;
        self
    }

    /// Whether `point` is inside the work area
    pub const fn contains(&self, point: Point) -> bool {
        self.rect.contains(point)
    }
}
