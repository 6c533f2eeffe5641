//! Input mode tracking
//!
//! Owns the mode radios, the text field buffer and the enabled state of the
//! input controls. Other controllers borrow it instead of reaching for shared
//! globals.

use tracing::debug;

/// Which kind of input the text field holds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum InputMode {
    /// Plain text, translated to phones by the server
    #[default]
    Text,
    /// Phonetic transcription in IPA
    Ipa,
}

impl InputMode {
    /// Name used both as endpoint suffix and query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            InputMode::Text => "text",
            InputMode::Ipa => "ipa",
        }
    }

    /// Label shown next to the radio control
    pub fn label(&self) -> &'static str {
        match self {
            InputMode::Text => "Text",
            InputMode::Ipa => "IPA",
        }
    }
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A radio input wrapped in a clickable label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledRadio {
    pub mode: InputMode,
    pub checked: bool,
}

impl LabeledRadio {
    pub fn label(&self) -> &'static str {
        self.mode.label()
    }
}

/// Keeps [`InputMode`] in sync with the mode radios
#[derive(Debug, Clone)]
pub struct InputModeController {
    mode: InputMode,
    radios: Vec<LabeledRadio>,
    text: String,
    input_enabled: bool,
    keypad_enabled: bool,
    keypad_visible: bool,
}

impl Default for InputModeController {
    fn default() -> Self {
        Self::new(true)
    }
}

impl InputModeController {
    /// Create a controller; `keypad_enabled` turns on the IPA keypad variant
    pub fn new(keypad_enabled: bool) -> Self {
        let mut controller = Self {
            mode: InputMode::Text,
            radios: Vec::new(),
            text: String::new(),
            input_enabled: true,
            keypad_enabled,
            keypad_visible: false,
        };
        controller.configure();
        controller
    }

    /// Build the radio set with Text checked and sync the mode to it
    pub fn configure(&mut self) {
        self.radios = [InputMode::Text, InputMode::Ipa]
            .into_iter()
            .map(|mode| LabeledRadio {
                mode,
                checked: mode == InputMode::Text,
            })
            .collect();
        self.on_mode_changed();
    }

    /// Click on a labeled radio (label text or the radio itself)
    ///
    /// Checks the clicked radio explicitly before re-evaluating, so a click on
    /// the label alone is enough to switch modes.
    pub fn select(&mut self, mode: InputMode) {
        for radio in &mut self.radios {
            radio.checked = radio.mode == mode;
        }
        self.on_mode_changed();
    }

    /// Re-read the IPA radio and update mode and keypad visibility
    pub fn on_mode_changed(&mut self) {
        let is_ipa = self
            .radios
            .iter()
            .any(|radio| radio.mode == InputMode::Ipa && radio.checked);

        self.mode = if is_ipa { InputMode::Ipa } else { InputMode::Text };
        self.keypad_visible = self.keypad_enabled && is_ipa;

        debug!(mode = %self.mode, keypad_visible = self.keypad_visible, "Input mode changed");
    }

    pub fn radios(&self) -> &[LabeledRadio] {
        &self.radios
    }

    /// Mode of the radio currently checked
    pub fn checked_mode(&self) -> Option<InputMode> {
        self.radios.iter().find(|r| r.checked).map(|r| r.mode)
    }

    pub fn current_mode(&self) -> InputMode {
        self.mode
    }

    /// Live contents of the text field
    pub fn current_text(&self) -> &str {
        &self.text
    }

    /// Buffer edited in place by the text field widget
    pub fn text_mut(&mut self) -> &mut String {
        &mut self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Append to the end of the text field, returning the new length in chars
    pub fn append_text(&mut self, suffix: &str) -> usize {
        self.text.push_str(suffix);
        self.text.chars().count()
    }

    pub fn keypad_enabled(&self) -> bool {
        self.keypad_enabled
    }

    pub fn keypad_visible(&self) -> bool {
        self.keypad_visible
    }

    /// The break separating the keypad row follows the keypad's visibility
    pub fn layout_break_visible(&self) -> bool {
        self.keypad_visible
    }

    pub fn input_enabled(&self) -> bool {
        self.input_enabled
    }

    /// Disable the synthesize button and the text field
    pub fn disable_input(&mut self) {
        self.set_input_enabled(false);
    }

    /// Re-enable the synthesize button and the text field
    pub fn enable_input(&mut self) {
        self.set_input_enabled(true);
    }

    fn set_input_enabled(&mut self, enabled: bool) {
        if self.input_enabled != enabled {
            debug!(enabled, "Input controls toggled");
        }
        self.input_enabled = enabled;
    }
}
