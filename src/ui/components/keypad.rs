//! IPA keypad component

use crate::controller::KeypadButton;
use crate::ui::components::input_bar::TEXT_INPUT_ID;
use crate::ui::state::AppState;
use crate::ui::theme::Theme;
use egui::text::{CCursor, CCursorRange};
use egui::{self, RichText, Vec2};

/// Row of symbol buttons, shown only in IPA mode
pub struct Keypad<'a> {
    state: &'a mut AppState,
    theme: &'a Theme,
}

impl<'a> Keypad<'a> {
    pub fn new(state: &'a mut AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    pub fn show(self, ui: &mut egui::Ui) {
        if !self.state.input.keypad_visible() {
            return;
        }

        let enabled = self.state.input.input_enabled();
        let buttons: Vec<KeypadButton> = self.state.keypad.buttons().to_vec();
        let mut pressed = None;

        ui.horizontal_wrapped(|ui| {
            ui.spacing_mut().item_spacing = Vec2::splat(4.0);

            for button in buttons {
                let widget = egui::Button::new(
                    RichText::new(button.symbol()).size(self.theme.keypad_font_size),
                )
                .min_size(Vec2::splat(34.0))
                .rounding(self.theme.button_rounding);

                let response = ui.add_enabled(enabled, widget);
                if response.clicked() {
                    pressed = Some(button);
                }
                response.on_hover_text(format!("Insert {}", button.symbol()));
            }
        });

        if self.state.input.layout_break_visible() {
            ui.separator();
        }

        if let Some(button) = pressed {
            let caret = self.state.press_key(button);
            move_caret(ui.ctx(), TEXT_INPUT_ID, caret);
        }
    }
}

/// Put the text field caret at `caret` chars; no-op if the field has no state yet
fn move_caret(ctx: &egui::Context, id_source: &str, caret: usize) {
    let id = egui::Id::new(id_source);
    if let Some(mut edit_state) = egui::TextEdit::load_state(ctx, id) {
        edit_state
            .cursor
            .set_char_range(Some(CCursorRange::one(CCursor::new(caret))));
        edit_state.store(ctx, id);
        ctx.memory_mut(|mem| mem.request_focus(id));
    }
}
