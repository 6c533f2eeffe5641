//! Input bar component
//!
//! Text field plus synthesize and stop controls. Both the field and the
//! synthesize button go through `add_enabled`, so a disabled control really
//! ignores input instead of only looking disabled.

use crate::controller::{InputMode, SynthesisPhase};
use crate::ui::state::AppState;
use crate::ui::theme::Theme;
use egui::{self, Key, RichText, Vec2};
use tracing::debug;

/// Id of the text field, shared with the keypad for caret placement
pub const TEXT_INPUT_ID: &str = "text_input";

pub struct InputBar<'a> {
    state: &'a mut AppState,
    theme: &'a Theme,
}

impl<'a> InputBar<'a> {
    pub fn new(state: &'a mut AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    pub fn show(mut self, ui: &mut egui::Ui) {
        egui::Frame::none()
            .fill(self.theme.bg_secondary)
            .rounding(self.theme.card_rounding)
            .inner_margin(self.theme.spacing)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    let submitted = self.show_text_input(ui);

                    ui.add_space(self.theme.spacing_sm);

                    let clicked = self.show_synthesize_button(ui);

                    if self.state.synthesis.phase() == SynthesisPhase::Playing {
                        ui.add_space(self.theme.spacing_sm);
                        self.show_stop_button(ui);
                    }

                    if submitted || clicked {
                        if let Err(e) = self.state.synthesize() {
                            debug!("Synthesize rejected: {}", e);
                        }
                    }
                });
            });
    }

    /// Returns true when Enter was pressed in the field
    fn show_text_input(&mut self, ui: &mut egui::Ui) -> bool {
        let enabled = self.state.input.input_enabled();
        let hint = match self.state.input.current_mode() {
            InputMode::Text => "Type text to speak...",
            InputMode::Ipa => "Type an IPA transcription...",
        };

        let available_width = ui.available_width() - 140.0;

        let text_edit = egui::TextEdit::singleline(self.state.input.text_mut())
            .hint_text(hint)
            .desired_width(available_width.max(120.0))
            .font(egui::TextStyle::Body)
            .margin(egui::Margin::symmetric(10.0, 6.0))
            .id(egui::Id::new(TEXT_INPUT_ID));

        let response = ui.add_enabled(enabled, text_edit);

        response.widget_info(|| {
            egui::WidgetInfo::labeled(egui::WidgetType::TextEdit, enabled, "Text input")
        });

        response.lost_focus() && enabled && ui.input(|i| i.key_pressed(Key::Enter))
    }

    /// Returns true when the button was clicked
    fn show_synthesize_button(&mut self, ui: &mut egui::Ui) -> bool {
        let enabled = self.state.can_synthesize();

        let (label, tooltip) = if self.state.synthesis.is_in_flight() {
            ("⏳ Synthesize", "Waiting for audio...")
        } else {
            ("🔊 Synthesize", "Speak the text (Enter)")
        };

        let fill = if enabled {
            self.theme.primary
        } else {
            self.theme.text_muted
        };

        let button = egui::Button::new(RichText::new(label).color(egui::Color32::WHITE))
            .min_size(Vec2::new(110.0, 32.0))
            .rounding(self.theme.button_rounding)
            .fill(fill);

        let response = ui.add_enabled(enabled, button);

        response.widget_info(|| {
            egui::WidgetInfo::labeled(egui::WidgetType::Button, enabled, "Synthesize")
        });

        let clicked = response.clicked();
        response.on_hover_text(tooltip);
        clicked
    }

    fn show_stop_button(&mut self, ui: &mut egui::Ui) {
        let button = egui::Button::new(RichText::new("⏹").size(16.0))
            .min_size(Vec2::splat(32.0))
            .rounding(self.theme.button_rounding);

        let response = ui.add(button);
        response.widget_info(|| {
            egui::WidgetInfo::labeled(egui::WidgetType::Button, true, "Stop playback")
        });

        if response.clicked() {
            self.state.stop_playback();
        }
    }
}
