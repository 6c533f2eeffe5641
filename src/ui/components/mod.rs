//! UI Components for ipasay

mod alert;
pub(crate) mod input_bar;
mod keypad;
mod mode_selector;
mod status_bar;

pub use alert::AlertDialog;
pub use input_bar::{InputBar, TEXT_INPUT_ID};
pub use keypad::Keypad;
pub use mode_selector::ModeSelector;
pub use status_bar::StatusBar;
