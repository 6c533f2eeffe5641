//! IPA keypad
//!
//! One button per special character. Each button owns its symbol, so the
//! handler for a button never observes another button's symbol.

use super::input_mode::InputModeController;
use tracing::debug;

/// Phonetic symbols offered by the keypad, in display order
pub const SPECIAL_CHARACTERS: [&str; 14] = [
    "ə", "ɛ", "ʌ", "æ", "ʊ", "ɔ", "ŋ", "θ", "ð", "ʃ", "ʒ", "ɹ", "ʔ", "ɾ",
];

/// A keypad button labeled with the symbol it types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeypadButton {
    symbol: &'static str,
}

impl KeypadButton {
    pub fn symbol(&self) -> &'static str {
        self.symbol
    }
}

/// Builds the keypad and types symbols into the text field
#[derive(Debug, Clone, Default)]
pub struct PhoneticKeypadController {
    buttons: Vec<KeypadButton>,
}

impl PhoneticKeypadController {
    pub fn new() -> Self {
        let mut keypad = Self::default();
        keypad.configure();
        keypad
    }

    /// Create the buttons once; later calls leave the keypad untouched
    pub fn configure(&mut self) {
        if !self.buttons.is_empty() {
            return;
        }
        for symbol in SPECIAL_CHARACTERS {
            self.buttons.push(KeypadButton { symbol });
        }
        debug!(count = self.buttons.len(), "Keypad configured");
    }

    pub fn buttons(&self) -> &[KeypadButton] {
        &self.buttons
    }

    /// Append the button's symbol to the text field
    ///
    /// Returns the caret position (in chars) at the new end of the text, for
    /// widgets that track a caret.
    pub fn press(&self, button: KeypadButton, input: &mut InputModeController) -> usize {
        let caret = input.append_text(button.symbol);
        debug!(symbol = button.symbol, caret, "Keypad symbol inserted");
        caret
    }
}
