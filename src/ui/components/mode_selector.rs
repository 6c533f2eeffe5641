//! Mode selector component
//!
//! Two labeled radios. Clicking the label text or the radio both check it.

use crate::ui::state::AppState;
use crate::ui::theme::Theme;
use egui::{self, RichText};

pub struct ModeSelector<'a> {
    state: &'a mut AppState,
    theme: &'a Theme,
}

impl<'a> ModeSelector<'a> {
    pub fn new(state: &'a mut AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    pub fn show(self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label(RichText::new("Input:").color(self.theme.text_secondary));
            ui.add_space(self.theme.spacing_sm);

            let mut clicked = None;
            for radio in self.state.input.radios() {
                let response = ui.radio(radio.checked, radio.label());
                if response.clicked() && !radio.checked {
                    clicked = Some(radio.mode);
                }
            }

            if let Some(mode) = clicked {
                self.state.select_mode(mode);
            }
        });
    }
}
