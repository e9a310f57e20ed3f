use eframe::egui::{self, RichText, TextEdit, Ui};
use egui_extras::{Column, TableBuilder};

use crate::color::ClassPalette;
use crate::config;
use crate::data::crops::{format_range, CROP_REQUIREMENTS};
use crate::data::sensors::PLACEHOLDER_READING;
use crate::model::features::Feature;
use crate::model::predict::PredictionContext;
use crate::state::{AppState, Dialog, Tab};
use crate::ui::plot;

// ---------------------------------------------------------------------------
// Menu bar and tabs
// ---------------------------------------------------------------------------

/// Render the File / Help menu bar.
pub fn menu_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Exit").clicked() {
                ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
                ui.close_menu();
            }
        });
        ui.menu_button("Help", |ui: &mut Ui| {
            if ui.button("About").clicked() {
                state.show_about();
                ui.close_menu();
            }
        });
    });
}

pub fn tab_bar(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        for tab in Tab::ALL {
            ui.selectable_value(&mut state.active_tab, tab, tab.title());
        }
    });
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

pub fn dashboard(ui: &mut Ui, state: &mut AppState) {
    // ---- Header ----
    ui.horizontal(|ui: &mut Ui| {
        ui.heading(config::APP_TITLE);
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui: &mut Ui| {
            ui.add_enabled(false, egui::Button::new("Profile"))
                .on_disabled_hover_text("Profiles are not available yet");
            if ui.button("Settings").clicked() {
                state.active_tab = Tab::Settings;
            }
        });
    });
    ui.separator();

    ui.columns(2, |cols: &mut [Ui]| {
        // ---- Left: NPK sensor and pH ----
        cols[0].group(|ui: &mut Ui| {
            ui.strong("NPK Values");
            ui.label(format!("N: {}", PLACEHOLDER_READING.n));
            ui.label(format!("P: {}", PLACEHOLDER_READING.p));
            ui.label(format!("K: {}", PLACEHOLDER_READING.k));
        });
        cols[0].add_space(8.0);
        cols[0].group(|ui: &mut Ui| {
            ui.strong("pH Levels");
            ui.add(TextEdit::singleline(&mut state.dashboard.ph).desired_width(80.0));
        });

        // ---- Right: weather ----
        cols[1].group(|ui: &mut Ui| {
            ui.strong("Weather");
            egui::Grid::new("weather_grid")
                .num_columns(2)
                .spacing([8.0, 6.0])
                .show(ui, |ui: &mut Ui| {
                    let dash = &mut state.dashboard;
                    for (label, text) in [
                        ("Humidity:", &mut dash.humidity),
                        ("Temperature:", &mut dash.temperature),
                        ("Rainfall:", &mut dash.rainfall),
                    ] {
                        ui.label(label);
                        ui.add(TextEdit::singleline(text).desired_width(160.0));
                        ui.end_row();
                    }
                });
        });
    });

    ui.add_space(8.0);
    if ui
        .button("Use in NPK Calculations")
        .on_hover_text("Copy the sensor readings and the values above into the prediction form")
        .clicked()
    {
        state.copy_dashboard_to_form();
    }

    ui.add_space(8.0);
    ui.strong("Simulated sensor history (last 24 h)");
    plot::sensor_history(ui);
}

// ---------------------------------------------------------------------------
// NPK Calculations
// ---------------------------------------------------------------------------

pub fn npk_calculations(
    ui: &mut Ui,
    state: &mut AppState,
    context: &PredictionContext,
    palette: &ClassPalette,
) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading("NPK Calculations Section");
    });
    ui.add_space(8.0);

    ui.group(|ui: &mut Ui| {
        ui.strong("Enter NPK Values");
        egui::Grid::new("npk_form")
            .num_columns(2)
            .spacing([8.0, 6.0])
            .show(ui, |ui: &mut Ui| {
                for feature in Feature::ALL {
                    ui.label(feature.label());
                    ui.add(
                        TextEdit::singleline(state.npk_input.get_mut(feature)).desired_width(100.0),
                    );
                    ui.end_row();
                }
            });

        ui.add_space(6.0);
        if ui.button("Predict Plant Type").clicked() {
            state.run_prediction(context);
        }

        ui.add_space(6.0);
        ui.label(RichText::new(&state.result_text).strong().size(16.0));
    });

    if state.show_probabilities {
        if let Some(prediction) = &state.last_prediction {
            ui.add_space(8.0);
            plot::probability_chart(ui, prediction, context.classes(), state.top_k, palette);
        }
    }
}

// ---------------------------------------------------------------------------
// Blogs
// ---------------------------------------------------------------------------

pub fn blogs(ui: &mut Ui) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading("Crops and Soil Health Requirements");
    });
    ui.add_space(8.0);

    TableBuilder::new(ui)
        .striped(true)
        .vscroll(false)
        .column(Column::auto().at_least(100.0))
        .columns(Column::auto().at_least(90.0), 4)
        .header(22.0, |mut header| {
            for title in ["Crop", "pH", "N (kg/ha)", "P (kg/ha)", "K (kg/ha)"] {
                header.col(|ui: &mut Ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|mut body| {
            for req in CROP_REQUIREMENTS.iter() {
                body.row(20.0, |mut row| {
                    row.col(|ui: &mut Ui| {
                        ui.label(req.crop);
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(format_range(&req.ph, 1));
                    });
                    for range in [&req.nitrogen, &req.phosphorus, &req.potassium] {
                        row.col(|ui: &mut Ui| {
                            ui.label(format_range(range, 0));
                        });
                    }
                });
            }
        });
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

pub fn settings(ui: &mut Ui, state: &mut AppState, context: &PredictionContext) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading("Settings Section");
    });
    ui.add_space(8.0);

    ui.strong("Appearance");
    egui::widgets::global_theme_preference_buttons(ui);
    ui.separator();

    ui.strong("Prediction");
    ui.checkbox(&mut state.show_probabilities, "Show class probabilities");
    let max_k = context.classes().len().max(1);
    ui.add(egui::Slider::new(&mut state.top_k, 1..=max_k).text("classes in chart"));
    ui.separator();

    ui.strong("Artifacts");
    egui::Grid::new("artifact_grid")
        .num_columns(2)
        .show(ui, |ui: &mut Ui| {
            let paths = &state.artifact_paths;
            for (name, path) in [
                ("Model", &paths.model),
                ("Scaler", &paths.scaler),
                ("Label encoder", &paths.label_encoder),
            ] {
                ui.label(name);
                ui.monospace(path.display().to_string());
                ui.end_row();
            }
        });
    ui.separator();

    ui.strong("Model");
    for line in context.model_summary() {
        ui.monospace(line);
    }
    if let Some(compiled) = context.compile_config() {
        ui.label(format!("Loss: {}", compiled.loss));
        ui.label(format!("Optimizer: {}", compiled.optimizer));
        let metrics: Vec<String> = compiled.metrics.iter().map(|m| m.to_string()).collect();
        ui.label(format!("Metrics: {}", metrics.join(", ")));
    }
    ui.label(format!(
        "{} classes: {}",
        context.classes().len(),
        context.classes().join(", ")
    ));
}

// ---------------------------------------------------------------------------
// Modal dialogs
// ---------------------------------------------------------------------------

pub fn dialogs(ctx: &egui::Context, state: &mut AppState) {
    let Some(dialog) = &state.dialog else {
        return;
    };

    let (title, message, detail) = match dialog {
        Dialog::About => (
            "About",
            format!("{} v{}", config::APP_TITLE, config::APP_VERSION),
            None,
        ),
        Dialog::InputError { detail } => (
            "Input Error",
            "Please enter valid numeric values for all fields.".to_string(),
            Some(detail.clone()),
        ),
        Dialog::PredictionFailed { detail } => (
            "Prediction Error",
            "The model could not produce a prediction.".to_string(),
            Some(detail.clone()),
        ),
    };

    let response = egui::Modal::new(egui::Id::new("dialog")).show(ctx, |ui: &mut Ui| {
        ui.set_width(340.0);
        ui.heading(title);
        ui.add_space(6.0);
        ui.label(message);
        if let Some(detail) = &detail {
            ui.label(RichText::new(detail).weak());
        }
        ui.add_space(6.0);
        ui.vertical_centered(|ui: &mut Ui| ui.button("OK").clicked()).inner
    });

    if response.inner || response.should_close() {
        state.dismiss_dialog();
    }
}
