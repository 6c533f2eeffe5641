//! Status bar component
//!
//! Shows the synthesis phase as a colored dot and the last request path.

use crate::controller::SynthesisPhase;
use crate::ui::state::AppState;
use crate::ui::theme::Theme;
use egui::{self, Color32, RichText, Vec2};

pub struct StatusBar<'a> {
    state: &'a AppState,
    theme: &'a Theme,
}

impl<'a> StatusBar<'a> {
    pub fn new(state: &'a AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    fn phase_color(&self, phase: SynthesisPhase) -> Color32 {
        match phase {
            SynthesisPhase::Idle => self.theme.text_muted,
            SynthesisPhase::Requesting => self.theme.warning,
            SynthesisPhase::Playing => self.theme.success,
            SynthesisPhase::Failed => self.theme.error,
        }
    }

    pub fn show(self, ui: &mut egui::Ui) -> egui::Response {
        let phase = self.state.synthesis.phase();
        let color = self.phase_color(phase);

        ui.horizontal(|ui| {
            let (rect, _) = ui.allocate_exact_size(Vec2::splat(10.0), egui::Sense::hover());

            // Pulse while waiting on the server
            let color = if phase == SynthesisPhase::Requesting {
                let t = ui.ctx().input(|i| i.time);
                let pulse = ((t * 3.0).sin() * 0.5 + 0.5) as f32;
                color.gamma_multiply(0.5 + 0.5 * pulse)
            } else {
                color
            };
            ui.painter().circle_filled(rect.center(), 5.0, color);

            let status = phase.to_string();
            let label = ui.label(
                RichText::new(&status)
                    .size(12.0)
                    .color(self.theme.text_secondary),
            );
            label.widget_info(|| {
                egui::WidgetInfo::labeled(
                    egui::WidgetType::Label,
                    true,
                    format!("Status: {}", status),
                )
            });

            if let Some(path) = self.state.synthesis.last_path() {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        RichText::new(path)
                            .size(11.0)
                            .family(egui::FontFamily::Monospace)
                            .color(self.theme.text_muted),
                    );
                });
            }
        })
        .response
    }
}
