//! Console buttons — an 8-button pad packed into a byte.
//!
//! Updated by the window event handler; the scene callback reads a
//! [`Buttons`] snapshot through [`Canvas::buttons`](crate::canvas::Canvas::buttons).

use winit::keyboard::KeyCode;

/// Held-button snapshot for one frame. Bit constants identify each button.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Buttons(pub u8);

impl Buttons {
    pub const UP: u8 = 1 << 0;
    pub const DOWN: u8 = 1 << 1;
    pub const LEFT: u8 = 1 << 2;
    pub const RIGHT: u8 = 1 << 3;
    pub const A: u8 = 1 << 4;
    pub const B: u8 = 1 << 5;
    pub const SELECT: u8 = 1 << 6;
    pub const START: u8 = 1 << 7;

    /// Returns `true` if every button in `mask` is held.
    pub fn held(self, mask: u8) -> bool {
        self.0 & mask == mask
    }

    pub(crate) fn press(&mut self, bit: u8) {
        self.0 |= bit;
    }

    pub(crate) fn release(&mut self, bit: u8) {
        self.0 &= !bit;
    }
}

/// Keyboard layout: arrows for the d-pad, Z/X for A/B, Space/Enter for
/// Select/Start.
pub(crate) fn button_for_key(code: KeyCode) -> Option<u8> {
    match code {
        KeyCode::ArrowUp => Some(Buttons::UP),
        KeyCode::ArrowDown => Some(Buttons::DOWN),
        KeyCode::ArrowLeft => Some(Buttons::LEFT),
        KeyCode::ArrowRight => Some(Buttons::RIGHT),
        KeyCode::KeyZ => Some(Buttons::A),
        KeyCode::KeyX => Some(Buttons::B),
        KeyCode::Space => Some(Buttons::SELECT),
        KeyCode::Enter => Some(Buttons::START),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_and_release_toggle_bits() {
        let mut buttons = Buttons::default();
        buttons.press(Buttons::LEFT);
        buttons.press(Buttons::A);
        assert!(buttons.held(Buttons::LEFT));
        assert!(buttons.held(Buttons::LEFT | Buttons::A));
        assert!(!buttons.held(Buttons::RIGHT));

        buttons.release(Buttons::LEFT);
        assert!(!buttons.held(Buttons::LEFT));
        assert!(buttons.held(Buttons::A));
    }

    #[test]
    fn held_requires_the_whole_mask() {
        let buttons = Buttons(Buttons::UP);
        assert!(!buttons.held(Buttons::UP | Buttons::A));
    }

    #[test]
    fn every_button_has_a_distinct_key() {
        let keys = [
            KeyCode::ArrowUp,
            KeyCode::ArrowDown,
            KeyCode::ArrowLeft,
            KeyCode::ArrowRight,
            KeyCode::KeyZ,
            KeyCode::KeyX,
            KeyCode::Space,
            KeyCode::Enter,
        ];
        let mut seen = 0u8;
        for key in keys {
            let bit = button_for_key(key).unwrap();
            assert_eq!(seen & bit, 0);
            seen |= bit;
        }
        assert_eq!(seen, 0xFF);
    }
}
