//! Named input flags shared between the host and the simulation thread.
//!
//! The host writes flags as key events arrive ([`InputState`]); the
//! simulation thread takes one [`InputSnapshot`] per tick and never looks at
//! the live flags again during that tick. Flags are independent: a snapshot
//! may see half of a multi-key gesture.

use std::sync::atomic::{AtomicU32, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
    TurnUp,
    TurnDown,
    TurnLeft,
    TurnRight,
    ZoomIn,
    ZoomOut,
    Reset,
    NudgeUp,
    NudgeDown,
    NudgeLeft,
    NudgeRight,
}

impl Key {
    pub const ALL: [Key; 17] = [
        Key::Forward,
        Key::Backward,
        Key::Left,
        Key::Right,
        Key::Up,
        Key::Down,
        Key::TurnUp,
        Key::TurnDown,
        Key::TurnLeft,
        Key::TurnRight,
        Key::ZoomIn,
        Key::ZoomOut,
        Key::Reset,
        Key::NudgeUp,
        Key::NudgeDown,
        Key::NudgeLeft,
        Key::NudgeRight,
    ];

    fn bit(self) -> u32 {
        1 << (self as u32)
    }
}

/// Live flags, written by the host's input handler.
#[derive(Debug, Default)]
pub struct InputState {
    flags: AtomicU32,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, key: Key, pressed: bool) {
        if pressed {
            self.flags.fetch_or(key.bit(), Ordering::Relaxed);
        } else {
            self.flags.fetch_and(!key.bit(), Ordering::Relaxed);
        }
    }

    pub fn press(&self, key: Key) {
        self.set(key, true);
    }

    pub fn release(&self, key: Key) {
        self.set(key, false);
    }

    pub fn release_all(&self) {
        self.flags.store(0, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> InputSnapshot {
        InputSnapshot(self.flags.load(Ordering::Relaxed))
    }
}

/// Flags as they were at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputSnapshot(u32);

impl InputSnapshot {
    pub fn empty() -> Self {
        Self(0)
    }

    pub fn with(self, key: Key) -> Self {
        Self(self.0 | key.bit())
    }

    pub fn is_pressed(&self, key: Key) -> bool {
        self.0 & key.bit() != 0
    }

    pub fn pressed(&self) -> impl Iterator<Item = Key> + '_ {
        Key::ALL.into_iter().filter(|k| self.is_pressed(*k))
    }

    /// +1 / -1 / 0 along an axis driven by a pair of keys.
    pub fn axis(&self, positive: Key, negative: Key) -> f64 {
        match (self.is_pressed(positive), self.is_pressed(negative)) {
            (true, false) => 1.0,
            (false, true) => -1.0,
            _ => 0.0,
        }
    }
}
