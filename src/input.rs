//! Logical buttons and the per-tick key snapshot.

/// Buttons the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Left,
    Right,
    Ok,
}

impl Key {
    pub const ALL: [Key; 4] = [Key::Up, Key::Left, Key::Right, Key::Ok];

    fn bit(self) -> u8 {
        match self {
            Key::Up => 1,
            Key::Left => 1 << 1,
            Key::Right => 1 << 2,
            Key::Ok => 1 << 3,
        }
    }
}

/// Snapshot of held buttons delivered to every update.
///
/// The host flips keys on press/release events between ticks; held state is
/// coalesced, so a press shorter than one tick still shows up once if the host
/// uses [`KeyStatus::latch`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyStatus {
    held: u8,
    latched: u8,
}

impl KeyStatus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot with the given keys held
    pub fn with(keys: &[Key]) -> Self {
        let mut status = Self::new();
        for key in keys {
            status.set_pressed(*key, true);
        }
        status
    }

    pub fn is_pressed(&self, key: Key) -> bool {
        (self.held | self.latched) & key.bit() != 0
    }

    pub fn set_pressed(&mut self, key: Key, pressed: bool) {
        if pressed {
            self.held |= key.bit();
            self.latched |= key.bit();
        } else {
            self.held &= !key.bit();
        }
    }

    /// Take the snapshot for one tick and forget presses already released
    pub fn latch(&mut self) -> KeyStatus {
        let snapshot = *self;
        self.latched = 0;
        snapshot
    }
}
