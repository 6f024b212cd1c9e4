//! Error types and the diagnostic channel
//!
//! Two channels exist side by side:
//!
//! - [`WindowError`] is returned to the caller when an operation cannot
//!   complete (backend init, unknown window, locked backend selection).
//! - [`Diagnostics`] carries non-fatal reports from inside the event
//!   pipeline (queue overflow, monitor pool exhaustion, dropped paths).
//!   Every report is logged through the `log` facade and forwarded to the
//!   application's debug callback, if one is installed.

use std::fmt;

use thiserror::Error;

use crate::config::ConfigError;
use crate::window::{CursorId, IconError, WindowId};

/// Errors returned by context and window operations
#[derive(Error, Debug)]
pub enum WindowError {
    /// A backend refused to initialize
    #[error("backend '{backend}' failed to initialize: {reason}")]
    BackendInit {
        /// Name of the backend that failed
        backend: &'static str,
        /// Backend-provided reason
        reason: String,
    },

    /// Neither the preferred nor the fallback backend could be bound
    #[error("no usable backend: {0}")]
    NoBackend(String),

    /// The native window could not be created
    #[error("window creation failed: {0}")]
    CreationFailed(String),

    /// The window id does not refer to a live window
    #[error("unknown window {0:?}")]
    UnknownWindow(WindowId),

    /// The cursor id does not refer to a loaded cursor
    #[error("unknown cursor {0:?}")]
    UnknownCursor(CursorId),

    /// An icon or cursor image was rejected
    #[error("invalid image: {0}")]
    Icon(#[from] IconError),

    /// The backend could not create a custom cursor
    #[error("cursor could not be loaded: {0}")]
    CursorLoad(String),

    /// Backend selection was attempted after a window was created
    #[error("backend selection is locked once a window exists")]
    BackendLocked,

    /// Configuration could not be loaded or saved
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// Configuration failed validation
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result alias used across the crate
pub type WindowResult<T> = Result<T, WindowError>;

/// Severity of a diagnostic report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Informational (window created, backend selected)
    Info,
    /// Something was lost or degraded but the pipeline recovered
    Warning,
    /// An operation failed
    Error,
}

impl Severity {
    fn log_level(self) -> log::Level {
        match self {
            Self::Info => log::Level::Info,
            Self::Warning => log::Level::Warn,
            Self::Error => log::Level::Error,
        }
    }
}

/// Finite set of diagnostic codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// A backend failed to initialize
    BackendInit,
    /// The preferred backend failed and the fallback was bound instead
    BackendFallback,
    /// A backend was selected and initialized
    BackendSelected,
    /// The native window could not be created
    WindowCreate,
    /// A window was created
    WindowCreated,
    /// A window was closed
    WindowClosed,
    /// The event queue overflowed and was flushed
    EventQueueOverflow,
    /// A monitor could not be registered because the node pool is full
    MonitorPoolExhausted,
    /// A disconnect notification named a monitor that is not registered
    UnknownMonitor,
    /// More paths were dropped than the drop buffer holds
    DropLimitExceeded,
    /// A native notification referenced a window that no longer exists
    StaleWindow,
    /// The native clipboard could not be read or written
    Clipboard,
    /// A custom cursor could not be created
    Cursor,
    /// A native notification carried inconsistent data
    NativeProtocol,
}

/// One diagnostic report, borrowed for the duration of the callback
#[derive(Debug, Clone, Copy)]
pub struct Diagnostic<'a> {
    /// Severity of the report
    pub severity: Severity,
    /// Error code
    pub code: ErrorCode,
    /// Window the report concerns, if any
    pub window: Option<WindowId>,
    /// Human readable message (formatted lazily)
    pub message: fmt::Arguments<'a>,
}

/// Application debug callback
pub type DebugCallback = Box<dyn FnMut(&Diagnostic<'_>)>;

/// Diagnostic sink owned by the platform context
#[derive(Default)]
pub struct Diagnostics {
    hook: Option<DebugCallback>,
}

impl Diagnostics {
    /// Create a sink with no callback installed
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a debug callback, returning the previous one
    pub fn set_callback(&mut self, callback: Option<DebugCallback>) -> Option<DebugCallback> {
        std::mem::replace(&mut self.hook, callback)
    }

    /// Report a diagnostic: logged, then forwarded to the callback
    pub fn report(
        &mut self,
        severity: Severity,
        code: ErrorCode,
        window: Option<WindowId>,
        message: fmt::Arguments<'_>,
    ) {
        log::log!(severity.log_level(), "[{:?}] {}", code, message);

        if let Some(hook) = self.hook.as_mut() {
            hook(&Diagnostic {
                severity,
                code,
                window,
                message,
            });
        }
    }
}

impl fmt::Debug for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Diagnostics")
            .field("hook", &self.hook.is_some())
            .finish()
    }
}
