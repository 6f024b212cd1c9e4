//! Callback slots, one per event category
//!
//! Installing a callback returns the one it replaced, so applications can
//! chain: capture the previous callback in the new closure and call it.

use super::Event;

/// Application event callback
pub type EventCallback = Box<dyn FnMut(&Event)>;

/// Groups of event kinds that share one callback slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CallbackCategory {
    /// Key pressed / released
    Key,
    /// Mouse button pressed / released
    MouseButton,
    /// Mouse motion
    MouseMotion,
    /// Mouse scroll
    MouseScroll,
    /// Mouse enter / leave
    MouseNotify,
    /// Focus in / out
    Focus,
    /// Window moved / resized
    WindowGeometry,
    /// Minimized / maximized / restored
    WindowMode,
    /// Window refresh
    Refresh,
    /// Close requested
    Quit,
    /// Data dragged over a window
    DataDrag,
    /// Data dropped onto a window
    DataDrop,
    /// Content scale changed
    Scale,
    /// Monitor connected / disconnected
    Monitor,
    /// Character input
    KeyChar,
}

impl CallbackCategory {
    /// Number of categories
    pub const COUNT: usize = Self::KeyChar as usize + 1;
}

/// Callback table owned by the platform context
#[derive(Default)]
pub struct Callbacks {
    slots: [Option<EventCallback>; CallbackCategory::COUNT],
}

impl Callbacks {
    /// Create a table with every slot empty
    pub fn new() -> Self {
        Self::default()
    }

    /// Install `callback` for `category`, returning the previous one
    pub fn replace(
        &mut self,
        category: CallbackCategory,
        callback: Option<EventCallback>,
    ) -> Option<EventCallback> {
        std::mem::replace(&mut self.slots[category as usize], callback)
    }

    /// Whether a callback is installed for `category`
    pub fn is_set(&self, category: CallbackCategory) -> bool {
        self.slots[category as usize].is_some()
    }

    /// Deliver an event to the callback of its category, if any
    pub fn dispatch(&mut self, event: &Event) {
        if let Some(callback) = self.slots[event.kind().category() as usize].as_mut() {
            callback(event);
        }
    }

    /// Remove every callback
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = None;
        }
    }
}

impl std::fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let installed = self.slots.iter().filter(|s| s.is_some()).count();
        f.debug_struct("Callbacks").field("installed", &installed).finish()
    }
}
