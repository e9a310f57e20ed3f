use eframe::egui;

use crate::color::ClassPalette;
use crate::config;
use crate::model::loader::ArtifactPaths;
use crate::model::predict::PredictionContext;
use crate::state::{AppState, Tab};
use crate::ui::panels;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct PrecAgroApp {
    pub state: AppState,
    context: PredictionContext,
    palette: ClassPalette,
}

impl PrecAgroApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        context: PredictionContext,
        paths: ArtifactPaths,
    ) -> Self {
        configure_style(&cc.egui_ctx);
        let palette = ClassPalette::new(context.classes().len());
        Self {
            state: AppState::new(paths),
            context,
            palette,
        }
    }
}

/// Light theme with the green panel fill; dark theme stays stock.
fn configure_style(ctx: &egui::Context) {
    ctx.set_theme(egui::Theme::Light);
    ctx.style_mut_of(egui::Theme::Light, |style| {
        style.visuals.panel_fill = config::PANEL_FILL;
    });
}

impl eframe::App for PrecAgroApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar and tabs ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::menu_bar(ui, &mut self.state);
            ui.separator();
            panels::tab_bar(ui, &mut self.state);
        });

        // ---- Central panel: active tab ----
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| match self.state.active_tab {
                    Tab::Dashboard => panels::dashboard(ui, &mut self.state),
                    Tab::NpkCalculations => {
                        panels::npk_calculations(ui, &mut self.state, &self.context, &self.palette)
                    }
                    Tab::Blogs => panels::blogs(ui),
                    Tab::Settings => panels::settings(ui, &mut self.state, &self.context),
                });
        });

        // ---- Modal dialogs ----
        panels::dialogs(ctx, &mut self.state);
    }
}
