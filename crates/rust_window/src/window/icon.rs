//! RGBA images for window icons and custom cursors
//!
//! Backends receive pixels as tightly packed, non-premultiplied RGBA8 rows,
//! top row first. Validation happens once, when the [`Icon`] is built.

use thiserror::Error;

slotmap::new_key_type! {
    /// Custom cursor loaded into the backend
    pub struct CursorId;
}

/// Rejected icon image
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IconError {
    /// Width or height is zero
    #[error("icon size {width}x{height} is empty")]
    EmptySize {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
    },

    /// The pixel buffer does not hold `width * height` RGBA8 pixels
    #[error("icon pixel buffer holds {actual} bytes, expected {expected}")]
    BadLength {
        /// Bytes needed for the requested size
        expected: usize,
        /// Bytes supplied
        actual: usize,
    },
}

/// Validated RGBA8 image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Icon {
    width: u32,
    height: u32,
    rgba: Box<[u8]>,
}

impl Icon {
    /// Wrap `rgba`, which must hold exactly `width * height` pixels
    pub fn from_rgba(width: u32, height: u32, rgba: impl Into<Vec<u8>>) -> Result<Self, IconError> {
        let rgba = rgba.into();
        if width == 0 || height == 0 {
            return Err(IconError::EmptySize { width, height });
        }
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|pixels| pixels.checked_mul(4))
            .unwrap_or(usize::MAX);
        if rgba.len() != expected {
            return Err(IconError::BadLength {
                expected,
                actual: rgba.len(),
            });
        }
        Ok(Self {
            width,
            height,
            rgba: rgba.into_boxed_slice(),
        })
    }

    /// Width in pixels
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Pixel count
    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// Packed RGBA8 pixels
    pub fn rgba(&self) -> &[u8] {
        &self.rgba
    }
}

/// Which icon of a window to set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconSlot {
    /// Small icon in the title bar
    Window,
    /// Large icon in the taskbar / dock / alt-tab switcher
    Taskbar,
    /// Both icons from one image
    Both,
}

impl IconSlot {
    /// Whether setting `self` replaces the icon in `slot`
    pub const fn covers(self, slot: Self) -> bool {
        matches!(
            (self, slot),
            (Self::Both, _) | (Self::Window, Self::Window) | (Self::Taskbar, Self::Taskbar)
        )
    }
}

/// Pick the small (title bar) and large (taskbar) icon from a set
///
/// The smallest image goes to the title bar and the largest to the taskbar;
/// with a single image both slots use it.
pub fn pick_icons(icons: &[Icon]) -> Option<(&Icon, &Icon)> {
    let small = icons.iter().min_by_key(|icon| icon.area())?;
    let large = icons.iter().max_by_key(|icon| icon.area())?;
    Some((small, large))
}
