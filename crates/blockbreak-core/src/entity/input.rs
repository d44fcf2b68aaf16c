//! Player input state

use bitflags::bitflags;
use glam::Vec2;

bitflags! {
    /// Keyboard keys the game reacts to
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Keys: u32 {
        const W = 1 << 0;
        const A = 1 << 1;
        const S = 1 << 2;
        const D = 1 << 3;
        const Y = 1 << 4;
        const N = 1 << 5;
        const R = 1 << 6;
        const MINUS = 1 << 7;
        const ENTER = 1 << 8;
        const BACKSPACE = 1 << 9;
        const LEFT_CONTROL = 1 << 10;
        const LEFT_SHIFT = 1 << 11;
        const ESCAPE = 1 << 12;
        const DIGIT_1 = 1 << 13;
        const DIGIT_2 = 1 << 14;
        const DIGIT_3 = 1 << 15;
        const DIGIT_4 = 1 << 16;
        const DIGIT_5 = 1 << 17;
        const DIGIT_6 = 1 << 18;
        const DIGIT_7 = 1 << 19;
        const DIGIT_8 = 1 << 20;
        const DIGIT_9 = 1 << 21;
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct MouseButtons: u8 {
        const LEFT = 1 << 0;
        const RIGHT = 1 << 1;
    }
}

impl Keys {
    const DIGITS: [Keys; 9] = [
        Keys::DIGIT_1,
        Keys::DIGIT_2,
        Keys::DIGIT_3,
        Keys::DIGIT_4,
        Keys::DIGIT_5,
        Keys::DIGIT_6,
        Keys::DIGIT_7,
        Keys::DIGIT_8,
        Keys::DIGIT_9,
    ];

    /// Key for digit `n` (1-9)
    pub fn digit(n: usize) -> Option<Keys> {
        n.checked_sub(1).and_then(|i| Self::DIGITS.get(i).copied())
    }
}

/// Tracks current input state for one frame.
///
/// The frontend feeds events in through `press_*`/`release_*`, the game reads
/// it during the frame, and `begin_frame` drops the one-frame edges before the
/// next batch of events arrives.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    keys_down: Keys,
    keys_pressed: Keys,
    buttons_down: MouseButtons,
    buttons_pressed: MouseButtons,

    /// Cursor position in screen pixels
    pub mouse_position: Vec2,
    /// Wheel movement this frame in lines (positive = away from the user)
    pub wheel: f32,
    /// Printable characters typed this frame
    pub typed: Vec<char>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear per-frame edges, wheel movement and typed text
    pub fn begin_frame(&mut self) {
        self.keys_pressed = Keys::empty();
        self.buttons_pressed = MouseButtons::empty();
        self.wheel = 0.0;
        self.typed.clear();
    }

    pub fn press_key(&mut self, key: Keys) {
        if !self.keys_down.contains(key) {
            self.keys_pressed.insert(key);
        }
        self.keys_down.insert(key);
    }

    pub fn release_key(&mut self, key: Keys) {
        self.keys_down.remove(key);
    }

    pub fn press_button(&mut self, button: MouseButtons) {
        if !self.buttons_down.contains(button) {
            self.buttons_pressed.insert(button);
        }
        self.buttons_down.insert(button);
    }

    pub fn release_button(&mut self, button: MouseButtons) {
        self.buttons_down.remove(button);
    }

    /// Drop all held state (focus loss, cursor leaving the window)
    pub fn release_all(&mut self) {
        self.keys_down = Keys::empty();
        self.buttons_down = MouseButtons::empty();
    }

    /// Key is held
    #[inline]
    pub fn is_down(&self, key: Keys) -> bool {
        self.keys_down.contains(key)
    }

    /// Key went down this frame
    #[inline]
    pub fn was_pressed(&self, key: Keys) -> bool {
        self.keys_pressed.contains(key)
    }

    #[inline]
    pub fn is_button_down(&self, button: MouseButtons) -> bool {
        self.buttons_down.contains(button)
    }

    #[inline]
    pub fn was_button_pressed(&self, button: MouseButtons) -> bool {
        self.buttons_pressed.contains(button)
    }

    /// Lowest digit key (1-9) pressed this frame
    pub fn pressed_digit(&self) -> Option<usize> {
        (1..=9).find(|&n| Keys::digit(n).is_some_and(|key| self.was_pressed(key)))
    }

    /// Ctrl held and `key` pressed this frame
    pub fn ctrl_pressed(&self, key: Keys) -> bool {
        self.is_down(Keys::LEFT_CONTROL) && self.was_pressed(key)
    }
}
