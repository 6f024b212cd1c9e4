//! # Rust Window
//!
//! Cross-platform window, input and monitor abstraction.
//!
//! ## Features
//!
//! - **Unified Events**: one `Copy` event type for every native notification style
//! - **Bounded Queue**: fixed-capacity FIFO with per-window delivery and masks
//! - **Edge Detection**: double-buffered key and button tables
//! - **Mode Tracking**: minimize / maximize / restore derived from polling or push
//! - **Hot-plug Monitors**: allocation-free monitor registry
//! - **Runtime Backends**: preferred backend with start-up fallback
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rust_window::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut platform = Platform::new()?;
//!     let window = platform.create_window(WindowDesc::new("hello", 800, 600))?;
//!
//!     while !platform.should_close(window) {
//!         while let Some(event) = platform.check_event(Some(window)) {
//!             log::info!("{:?}", event.data);
//!         }
//!         if platform.is_key_pressed(Key::Space) {
//!             platform.maximize(window)?;
//!         }
//!     }
//!     platform.close_window(window)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod backend;
pub mod config;
pub mod error;
pub mod events;
pub mod foundation;
pub mod input;
pub mod monitor;
pub mod platform;
pub mod window;

pub use error::{WindowError, WindowResult};
pub use platform::Platform;

/// Common imports for library users
pub mod prelude {
    pub use crate::{
        backend::{Backends, HeadlessBackend, HeadlessHandle, NotifyStyle, WaitTimeout, Waker},
        config::{Config, PlatformConfig},
        error::{Diagnostic, ErrorCode, Severity, WindowError, WindowResult},
        events::{CallbackCategory, Event, EventData, EventKind, EventMask},
        foundation::geometry::{Point, Rect},
        input::{Key, Modifiers, MouseButton},
        monitor::{Monitor, MonitorId},
        platform::{active, Platform},
        window::{CursorId, Icon, IconSlot, StandardCursor, WindowDesc, WindowFlags, WindowId, WindowMode},
    };
}
