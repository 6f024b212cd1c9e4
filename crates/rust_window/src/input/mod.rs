//! Input codes, modifier state and native keycode translation
//!
//! - [`Key`] and [`MouseButton`] are the platform-independent codes the
//!   state tables and events use.
//! - [`KeycodeMap`] translates native scancodes into [`Key`]s; the bound
//!   backend fills it once at context init.
//! - [`state`] holds the double-buffered tables used for edge detection.

pub mod state;

pub use state::{InputCode, KeyState, KeyStateTable};

use bitflags::bitflags;

macro_rules! keys {
    ($($(#[$doc:meta])* $name:ident),+ $(,)?) => {
        /// Platform-independent key codes
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
        #[repr(u8)]
        pub enum Key {
            /// Key the backend could not translate
            #[default]
            Unknown = 0,
            $($(#[$doc])* $name,)+
        }

        impl Key {
            /// Every key code, indexed by its discriminant
            pub const ALL: &'static [Key] = &[Key::Unknown, $(Key::$name,)+];

            /// Number of key codes, including [`Key::Unknown`]
            pub const COUNT: usize = Self::ALL.len();

            /// Stable name of the key
            pub const fn name(self) -> &'static str {
                match self {
                    Key::Unknown => "Unknown",
                    $(Key::$name => stringify!($name),)+
                }
            }
        }
    };
}

keys! {
    /// Escape
    Escape,
    /// F1
    F1,
    /// F2
    F2,
    /// F3
    F3,
    /// F4
    F4,
    /// F5
    F5,
    /// F6
    F6,
    /// F7
    F7,
    /// F8
    F8,
    /// F9
    F9,
    /// F10
    F10,
    /// F11
    F11,
    /// F12
    F12,
    /// Backtick / grave accent
    Backtick,
    /// Digit 0
    Num0,
    /// Digit 1
    Num1,
    /// Digit 2
    Num2,
    /// Digit 3
    Num3,
    /// Digit 4
    Num4,
    /// Digit 5
    Num5,
    /// Digit 6
    Num6,
    /// Digit 7
    Num7,
    /// Digit 8
    Num8,
    /// Digit 9
    Num9,
    /// Minus
    Minus,
    /// Equals
    Equals,
    /// Backspace
    Backspace,
    /// Tab
    Tab,
    /// Caps lock
    CapsLock,
    /// Left shift
    ShiftL,
    /// Left control
    ControlL,
    /// Left alt
    AltL,
    /// Left super / command / windows
    SuperL,
    /// Right shift
    ShiftR,
    /// Right control
    ControlR,
    /// Right alt
    AltR,
    /// Right super / command / windows
    SuperR,
    /// Space bar
    Space,
    /// Letter A
    A,
    /// Letter B
    B,
    /// Letter C
    C,
    /// Letter D
    D,
    /// Letter E
    E,
    /// Letter F
    F,
    /// Letter G
    G,
    /// Letter H
    H,
    /// Letter I
    I,
    /// Letter J
    J,
    /// Letter K
    K,
    /// Letter L
    L,
    /// Letter M
    M,
    /// Letter N
    N,
    /// Letter O
    O,
    /// Letter P
    P,
    /// Letter Q
    Q,
    /// Letter R
    R,
    /// Letter S
    S,
    /// Letter T
    T,
    /// Letter U
    U,
    /// Letter V
    V,
    /// Letter W
    W,
    /// Letter X
    X,
    /// Letter Y
    Y,
    /// Letter Z
    Z,
    /// Period
    Period,
    /// Comma
    Comma,
    /// Slash
    Slash,
    /// Opening bracket
    Bracket,
    /// Closing bracket
    CloseBracket,
    /// Semicolon
    Semicolon,
    /// Return / enter
    Return,
    /// Quote
    Quote,
    /// Backslash
    Backslash,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
    /// Delete
    Delete,
    /// Insert
    Insert,
    /// End
    End,
    /// Home
    Home,
    /// Page up
    PageUp,
    /// Page down
    PageDown,
    /// Num lock
    NumLock,
    /// Scroll lock
    ScrollLock,
    /// Print screen
    PrintScreen,
    /// Pause
    Pause,
    /// Keypad slash
    KpSlash,
    /// Keypad multiply
    KpMultiply,
    /// Keypad minus
    KpMinus,
    /// Keypad plus
    KpPlus,
    /// Keypad 0
    Kp0,
    /// Keypad 1
    Kp1,
    /// Keypad 2
    Kp2,
    /// Keypad 3
    Kp3,
    /// Keypad 4
    Kp4,
    /// Keypad 5
    Kp5,
    /// Keypad 6
    Kp6,
    /// Keypad 7
    Kp7,
    /// Keypad 8
    Kp8,
    /// Keypad 9
    Kp9,
    /// Keypad period
    KpPeriod,
    /// Keypad return
    KpReturn,
}

impl InputCode for Key {
    const COUNT: usize = Self::ALL.len();

    fn index(self) -> usize {
        self as usize
    }

    fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

impl Key {
    /// Modifier bit this key contributes while held, if any
    pub const fn modifier(self) -> Modifiers {
        match self {
            Key::ShiftL | Key::ShiftR => Modifiers::SHIFT,
            Key::ControlL | Key::ControlR => Modifiers::CONTROL,
            Key::AltL | Key::AltR => Modifiers::ALT,
            Key::SuperL | Key::SuperR => Modifiers::SUPER,
            _ => Modifiers::empty(),
        }
    }
}

/// Mouse buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum MouseButton {
    /// Left mouse button
    Left,
    /// Middle mouse button
    Middle,
    /// Right mouse button
    Right,
    /// Extra button 1 (usually "back")
    Misc1,
    /// Extra button 2 (usually "forward")
    Misc2,
    /// Extra button 3
    Misc3,
    /// Extra button 4
    Misc4,
    /// Extra button 5
    Misc5,
}

impl MouseButton {
    /// Every button, indexed by its discriminant
    pub const ALL: [Self; 8] = [
        Self::Left,
        Self::Middle,
        Self::Right,
        Self::Misc1,
        Self::Misc2,
        Self::Misc3,
        Self::Misc4,
        Self::Misc5,
    ];
}

impl InputCode for MouseButton {
    const COUNT: usize = Self::ALL.len();

    fn index(self) -> usize {
        self as usize
    }

    fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

bitflags! {
    /// Keyboard modifier and lock state
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        /// Caps lock is on
        const CAPS_LOCK = 1 << 0;
        /// Num lock is on
        const NUM_LOCK = 1 << 1;
        /// Scroll lock is on
        const SCROLL_LOCK = 1 << 2;
        /// A shift key is held
        const SHIFT = 1 << 3;
        /// A control key is held
        const CONTROL = 1 << 4;
        /// An alt key is held
        const ALT = 1 << 5;
        /// A super key is held
        const SUPER = 1 << 6;
    }
}

impl Modifiers {
    /// Lock bits, which only the native side knows
    pub const LOCKS: Self = Self::CAPS_LOCK.union(Self::NUM_LOCK).union(Self::SCROLL_LOCK);
}

/// Native scancode → [`Key`] translation table
///
/// Native codes are limited to one byte, which covers evdev, Win32 scan
/// codes with the extended bit folded in, and macOS virtual key codes.
#[derive(Clone)]
pub struct KeycodeMap {
    to_key: [Key; 256],
    to_native: [Option<u8>; Key::COUNT],
}

impl KeycodeMap {
    /// Create an empty map (everything translates to [`Key::Unknown`])
    pub const fn new() -> Self {
        Self {
            to_key: [Key::Unknown; 256],
            to_native: [None; Key::COUNT],
        }
    }

    /// Bind a native scancode to a key (both directions)
    pub fn bind(&mut self, native: u8, key: Key) {
        self.to_key[usize::from(native)] = key;
        if key != Key::Unknown {
            self.to_native[key as usize] = Some(native);
        }
    }

    /// Translate a native scancode
    pub const fn key(&self, native: u8) -> Key {
        self.to_key[native as usize]
    }

    /// Native scancode bound to `key`, if any
    pub const fn native(&self, key: Key) -> Option<u8> {
        self.to_native[key as usize]
    }

    /// Reset to the empty map
    pub fn clear(&mut self) {
        *self = Self::new();
    }
}

impl Default for KeycodeMap {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for KeycodeMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let bound = self.to_key.iter().filter(|k| **k != Key::Unknown).count();
        f.debug_struct("KeycodeMap").field("bound", &bound).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_indices_match_all_table() {
        for (i, key) in Key::ALL.iter().enumerate() {
            assert_eq!(key.index(), i);
            assert_eq!(Key::from_index(i), Some(*key));
        }
        assert_eq!(Key::from_index(Key::COUNT), None);
    }

    #[test]
    fn test_keycode_map_round_trip() {
        let mut map = KeycodeMap::new();
        map.bind(1, Key::Escape);
        map.bind(30, Key::A);

        assert_eq!(map.key(1), Key::Escape);
        assert_eq!(map.key(30), Key::A);
        assert_eq!(map.key(200), Key::Unknown);
        assert_eq!(map.native(Key::A), Some(30));
        assert_eq!(map.native(Key::Z), None);

        map.clear();
        assert_eq!(map.key(30), Key::Unknown);
    }

    #[test]
    fn test_modifier_keys() {
        assert_eq!(Key::ShiftR.modifier(), Modifiers::SHIFT);
        assert_eq!(Key::SuperL.modifier(), Modifiers::SUPER);
        assert!(Key::A.modifier().is_empty());
        assert!(Modifiers::LOCKS.contains(Modifiers::NUM_LOCK));
        assert!(!Modifiers::LOCKS.contains(Modifiers::ALT));
    }
}
