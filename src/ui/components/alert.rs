//! Blocking alert dialog
//!
//! While an alert is pending the app renders everything else disabled, so the
//! dialog has to be acknowledged before the user can continue.

use crate::ui::state::AppState;
use crate::ui::theme::Theme;
use egui::{self, Align2, RichText, Vec2};

pub struct AlertDialog<'a> {
    state: &'a mut AppState,
    theme: &'a Theme,
}

impl<'a> AlertDialog<'a> {
    pub fn new(state: &'a mut AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    pub fn show(self, ctx: &egui::Context) {
        let Some(message) = self.state.synthesis.alert().map(str::to_owned) else {
            return;
        };

        let mut dismissed = false;

        egui::Window::new("Alert")
            .title_bar(false)
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, Vec2::ZERO)
            .frame(
                egui::Frame::window(&ctx.style())
                    .fill(self.theme.bg_secondary)
                    .inner_margin(self.theme.spacing),
            )
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    let label = ui.label(
                        RichText::new(&message)
                            .size(16.0)
                            .color(self.theme.error),
                    );
                    label.widget_info(|| {
                        egui::WidgetInfo::labeled(egui::WidgetType::Label, true, &message)
                    });

                    ui.add_space(self.theme.spacing);

                    let ok = ui.add(egui::Button::new("OK").min_size(Vec2::new(80.0, 28.0)));
                    let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));
                    if ok.clicked() || enter {
                        dismissed = true;
                    }
                });
            });

        if dismissed {
            self.state.dismiss_alert();
        }
    }
}
