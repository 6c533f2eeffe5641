//! Main application struct and eframe integration

use crate::ui::components::{AlertDialog, InputBar, Keypad, ModeSelector, StatusBar};
use crate::ui::state::AppState;
use crate::ui::theme::Theme;
use egui::{self, CentralPanel, RichText, TopBottomPanel};
use tracing::info;

/// Main ipasay application
pub struct IpaSayApp {
    state: AppState,
    theme: Theme,
    initialized: bool,
}

impl IpaSayApp {
    pub fn new(cc: &eframe::CreationContext<'_>, mut state: AppState) -> Self {
        let theme = Theme::dark();
        theme.apply(&cc.egui_ctx);

        // Loader threads finish between frames; wake the UI so it sees them
        let ctx = cc.egui_ctx.clone();
        state.synthesis.set_waker(move || ctx.request_repaint());

        Self {
            state,
            theme,
            initialized: false,
        }
    }

    fn initialize(&mut self) {
        if self.initialized {
            return;
        }
        info!(
            "UI ready ({} keypad symbols)",
            self.state.keypad.buttons().len()
        );
        self.initialized = true;
    }

    fn show_header(&self, ctx: &egui::Context) {
        TopBottomPanel::top("header")
            .frame(
                egui::Frame::none()
                    .fill(self.theme.bg_secondary)
                    .inner_margin(self.theme.spacing),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new("ipasay")
                            .size(20.0)
                            .strong()
                            .color(self.theme.text_primary),
                    );
                    ui.label(
                        RichText::new("Speech synthesis demo")
                            .size(13.0)
                            .color(self.theme.text_muted),
                    );
                });
            });
    }

    fn show_status(&self, ctx: &egui::Context) {
        TopBottomPanel::bottom("status")
            .frame(
                egui::Frame::none()
                    .fill(self.theme.bg_secondary)
                    .inner_margin(self.theme.spacing_sm),
            )
            .show(ctx, |ui| {
                StatusBar::new(&self.state, &self.theme).show(ui);
            });
    }

    fn show_content(&mut self, ctx: &egui::Context) {
        let modal_open = self.state.synthesis.alert().is_some();

        CentralPanel::default()
            .frame(
                egui::Frame::none()
                    .fill(self.theme.bg_primary)
                    .inner_margin(self.theme.spacing),
            )
            .show(ctx, |ui| {
                ui.add_enabled_ui(!modal_open, |ui| {
                    ModeSelector::new(&mut self.state, &self.theme).show(ui);
                    ui.add_space(self.theme.spacing_sm);
                    Keypad::new(&mut self.state, &self.theme).show(ui);
                    InputBar::new(&mut self.state, &self.theme).show(ui);
                });
            });
    }
}

impl eframe::App for IpaSayApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.initialize();

        self.state.poll_events();

        self.show_header(ctx);
        self.show_status(ctx);
        self.show_content(ctx);
        AlertDialog::new(&mut self.state, &self.theme).show(ctx);

        // Keep polling playback and animating the status dot
        if self.state.is_busy() {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.state.stop_playback();
        info!("ipasay shutting down");
    }
}
