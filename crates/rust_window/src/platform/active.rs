//! Thread-local current context
//!
//! Most applications never create a [`Platform`] themselves: the first
//! [`create_window`] call creates one with the default configuration and
//! makes it current, and closing its last window through [`close_window`]
//! tears it down again. Contexts created explicitly can be installed with
//! [`set_active`] and are never torn down implicitly.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::{WindowError, WindowResult};
use crate::window::{WindowDesc, WindowId};

use super::Platform;

/// Context shared between the active slot and the application
pub type SharedPlatform = Rc<RefCell<Platform>>;

thread_local! {
    static ACTIVE: RefCell<Option<SharedPlatform>> = RefCell::new(None);
}

/// Install `platform` as the current context, returning the previous one
pub fn set_active(platform: Option<SharedPlatform>) -> Option<SharedPlatform> {
    ACTIVE.with(|slot| std::mem::replace(&mut *slot.borrow_mut(), platform))
}

/// The current context, if any
pub fn active() -> Option<SharedPlatform> {
    ACTIVE.with(|slot| slot.borrow().clone())
}

/// Run `f` on the current context
///
/// Returns `None` when no context is active.
pub fn with_active<R>(f: impl FnOnce(&mut Platform) -> R) -> Option<R> {
    let platform = active()?;
    let mut platform = platform.borrow_mut();
    Some(f(&mut platform))
}

/// Create a window on the current context, creating the context first if needed
pub fn create_window(desc: WindowDesc) -> WindowResult<WindowId> {
    let platform = match active() {
        Some(platform) => platform,
        None => {
            let mut platform = Platform::new()?;
            platform.mark_lazy();
            log::debug!("Created platform context on first window");
            let platform = Rc::new(RefCell::new(platform));
            set_active(Some(Rc::clone(&platform)));
            platform
        }
    };

    let result = platform.borrow_mut().create_window(desc);
    if result.is_err() {
        release_if_unused(&platform);
    }
    result
}

/// Close a window of the current context
///
/// Closing the last window of a lazily created context also tears the
/// context down and clears the slot.
pub fn close_window(id: WindowId) -> WindowResult<()> {
    let platform = active().ok_or(WindowError::UnknownWindow(id))?;
    platform.borrow_mut().close_window(id)?;
    release_if_unused(&platform);
    Ok(())
}

fn release_if_unused(platform: &SharedPlatform) {
    let unused = {
        let platform = platform.borrow();
        platform.is_lazy() && platform.window_count() == 0
    };
    if !unused {
        return;
    }
    ACTIVE.with(|slot| {
        let mut slot = slot.borrow_mut();
        if slot.as_ref().is_some_and(|current| Rc::ptr_eq(current, platform)) {
            log::debug!("Last window closed, releasing platform context");
            *slot = None;
        }
    });
}
