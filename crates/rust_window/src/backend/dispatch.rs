//! Backend binding with start-up fallback
//!
//! One build can carry two backends that cannot coexist at runtime
//! (Wayland and X11 on Linux). The dispatch holds both until init: the
//! preferred one is tried first, and if it fails it is torn down and the
//! fallback is bound instead. Once the context has created a window the
//! binding is locked.

use crate::config::PlatformConfig;
use crate::error::{Diagnostics, ErrorCode, Severity, WindowError, WindowResult};

use super::{BackendKind, NativeBackend, NotifyStyle, HeadlessBackend};

/// Preferred backend plus an optional fallback, handed to context init
pub struct Backends {
    /// Tried first
    pub preferred: Box<dyn NativeBackend>,
    /// Bound when the preferred backend fails to initialize
    pub fallback: Option<Box<dyn NativeBackend>>,
}

impl Backends {
    /// Use `preferred` with no fallback
    pub fn new(preferred: impl NativeBackend + 'static) -> Self {
        Self {
            preferred: Box::new(preferred),
            fallback: None,
        }
    }

    /// Add a fallback backend
    pub fn with_fallback(mut self, fallback: impl NativeBackend + 'static) -> Self {
        self.fallback = Some(Box::new(fallback));
        self
    }
}

impl Default for Backends {
    /// Push-style headless backend falling back to the polling one
    fn default() -> Self {
        Self::new(HeadlessBackend::new(NotifyStyle::Push))
            .with_fallback(HeadlessBackend::new(NotifyStyle::Polling))
    }
}

impl std::fmt::Debug for Backends {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Backends")
            .field("preferred", &self.preferred.name())
            .field("fallback", &self.fallback.as_ref().map(|b| b.name()))
            .finish()
    }
}

/// The single bound backend every context operation goes through
pub struct BackendDispatch {
    bound: Box<dyn NativeBackend>,
    initialized: bool,
    locked: bool,
}

impl BackendDispatch {
    /// Initialize the preferred backend, falling back when allowed
    pub fn bind(
        backends: Backends,
        config: &PlatformConfig,
        diagnostics: &mut Diagnostics,
    ) -> WindowResult<Self> {
        let Backends {
            mut preferred,
            fallback,
        } = backends;

        let failure = match preferred.init(config) {
            Ok(()) => return Ok(Self::selected(preferred, diagnostics)),
            Err(reason) => reason,
        };

        diagnostics.report(
            Severity::Warning,
            ErrorCode::BackendInit,
            None,
            format_args!("backend '{}' failed to initialize: {}", preferred.name(), failure),
        );
        preferred.deinit();

        let mut fallback = match fallback {
            Some(fallback) if config.allow_fallback => fallback,
            _ => {
                return Err(WindowError::BackendInit {
                    backend: preferred.name(),
                    reason: failure,
                })
            }
        };

        if let Err(reason) = fallback.init(config) {
            diagnostics.report(
                Severity::Error,
                ErrorCode::BackendInit,
                None,
                format_args!("fallback backend '{}' failed to initialize: {}", fallback.name(), reason),
            );
            fallback.deinit();
            return Err(WindowError::NoBackend(format!(
                "'{}': {}; '{}': {}",
                preferred.name(),
                failure,
                fallback.name(),
                reason
            )));
        }

        diagnostics.report(
            Severity::Warning,
            ErrorCode::BackendFallback,
            None,
            format_args!("falling back from '{}' to '{}'", preferred.name(), fallback.name()),
        );
        Ok(Self::selected(fallback, diagnostics))
    }

    fn selected(bound: Box<dyn NativeBackend>, diagnostics: &mut Diagnostics) -> Self {
        diagnostics.report(
            Severity::Info,
            ErrorCode::BackendSelected,
            None,
            format_args!("using backend '{}' ({:?})", bound.name(), bound.kind()),
        );
        Self {
            bound,
            initialized: true,
            locked: false,
        }
    }

    /// Replace the bound backend before any window exists
    pub fn rebind(
        &mut self,
        backends: Backends,
        config: &PlatformConfig,
        diagnostics: &mut Diagnostics,
    ) -> WindowResult<()> {
        if self.locked {
            return Err(WindowError::BackendLocked);
        }
        let next = Self::bind(backends, config, diagnostics)?;
        self.shutdown();
        *self = next;
        Ok(())
    }

    /// Forbid further rebinding
    pub fn lock(&mut self) {
        self.locked = true;
    }

    /// Whether rebinding is forbidden
    pub const fn is_locked(&self) -> bool {
        self.locked
    }

    /// Family of the bound backend
    pub fn kind(&self) -> BackendKind {
        self.bound.kind()
    }

    /// Name of the bound backend
    pub fn name(&self) -> &'static str {
        self.bound.name()
    }

    /// Bound backend
    pub fn backend(&self) -> &dyn NativeBackend {
        self.bound.as_ref()
    }

    /// Bound backend, mutably
    pub fn backend_mut(&mut self) -> &mut dyn NativeBackend {
        self.bound.as_mut()
    }

    /// Deinitialize the bound backend; later calls do nothing
    pub fn shutdown(&mut self) {
        if self.initialized {
            log::debug!("Shutting down backend '{}'", self.bound.name());
            self.bound.deinit();
            self.initialized = false;
        }
    }
}

impl std::fmt::Debug for BackendDispatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendDispatch")
            .field("bound", &self.bound.name())
            .field("initialized", &self.initialized)
            .field("locked", &self.locked)
            .finish()
    }
}

impl Drop for BackendDispatch {
    fn drop(&mut self) {
        self.shutdown();
    }
}
