//! UI-independent controllers
//!
//! `InputModeController` owns the input state; the keypad and synthesis
//! controllers borrow it when they need to read or change it.

mod input_mode;
mod keypad;
mod synthesis;

pub use input_mode::{InputMode, InputModeController, LabeledRadio};
pub use keypad::{KeypadButton, PhoneticKeypadController, SPECIAL_CHARACTERS};
pub use synthesis::{
    request_path, LoadEvent, SynthesisController, SynthesisOutcome, SynthesisPhase,
};
