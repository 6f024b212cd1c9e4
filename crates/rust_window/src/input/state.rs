//! Double-buffered input state for edge detection
//!
//! Each code keeps the sample from the current poll pass and the one
//! before it. `pressed`/`released` are derived from the pair, so the
//! table must be advanced with [`KeyStateTable::begin_frame`] exactly once
//! per pass, before that pass's native events are translated.

use std::marker::PhantomData;

/// A code that owns one slot in a [`KeyStateTable`]
pub trait InputCode: Copy {
    /// Number of slots the table needs
    const COUNT: usize;

    /// Slot index for this code
    fn index(self) -> usize;

    /// Code stored at `index`
    fn from_index(index: usize) -> Option<Self>;
}

/// Current and previous sample for one code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyState {
    /// Sample from this poll pass
    pub current: bool,
    /// Sample from the previous poll pass
    pub previous: bool,
}

impl KeyState {
    /// Went down during this pass
    pub const fn pressed(self) -> bool {
        self.current && !self.previous
    }

    /// Went up during this pass
    pub const fn released(self) -> bool {
        !self.current && self.previous
    }

    /// Currently held
    pub const fn down(self) -> bool {
        self.current
    }
}

/// Fixed table of [`KeyState`]s, one per code of `C`
#[derive(Debug, Clone)]
pub struct KeyStateTable<C: InputCode> {
    states: Box<[KeyState]>,
    _code: PhantomData<C>,
}

impl<C: InputCode> KeyStateTable<C> {
    /// Create a table with every code up
    pub fn new() -> Self {
        Self {
            states: vec![KeyState::default(); C::COUNT].into_boxed_slice(),
            _code: PhantomData,
        }
    }

    /// Record the latest native sample for `code`
    pub fn record_edge(&mut self, code: C, is_down: bool) {
        if let Some(state) = self.states.get_mut(code.index()) {
            state.current = is_down;
        }
    }

    /// Start a new poll pass: `current` becomes `previous` for every code
    pub fn begin_frame(&mut self) {
        for state in self.states.iter_mut() {
            state.previous = state.current;
        }
    }

    /// State of one code
    pub fn state(&self, code: C) -> KeyState {
        self.states.get(code.index()).copied().unwrap_or_default()
    }

    /// Went down during this pass
    pub fn pressed(&self, code: C) -> bool {
        self.state(code).pressed()
    }

    /// Went up during this pass
    pub fn released(&self, code: C) -> bool {
        self.state(code).released()
    }

    /// Currently held
    pub fn down(&self, code: C) -> bool {
        self.state(code).down()
    }

    /// Codes currently held, in index order
    pub fn down_codes(&self) -> impl Iterator<Item = C> + '_ {
        self.states
            .iter()
            .enumerate()
            .filter(|(_, state)| state.current)
            .filter_map(|(index, _)| C::from_index(index))
    }

    /// Forget every sample (both buffers)
    pub fn reset(&mut self) {
        self.states.fill(KeyState::default());
    }
}

impl<C: InputCode> Default for KeyStateTable<C> {
    fn default() -> Self {
        Self::new()
    }
}
