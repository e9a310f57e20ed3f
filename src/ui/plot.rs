use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints};

use crate::color::ClassPalette;
use crate::data::sensors::simulated_history;
use crate::model::features::Feature;
use crate::model::predict::Prediction;

// ---------------------------------------------------------------------------
// Class probability chart (NPK Calculations tab)
// ---------------------------------------------------------------------------

/// Bar chart of the `top_k` most likely crops for the last prediction.
pub fn probability_chart(
    ui: &mut Ui,
    prediction: &Prediction,
    classes: &[String],
    top_k: usize,
    palette: &ClassPalette,
) {
    let top = prediction.distribution.top_k(top_k);

    let names: Vec<String> = top
        .iter()
        .map(|&(idx, _)| classes.get(idx).cloned().unwrap_or_else(|| format!("class {idx}")))
        .collect();

    let bars: Vec<Bar> = top
        .iter()
        .zip(&names)
        .enumerate()
        .map(|(pos, (&(idx, p), name))| {
            Bar::new(pos as f64, p)
                .name(name)
                .fill(palette.color_for(idx))
                .width(0.7)
        })
        .collect();

    let axis_names = names.clone();
    Plot::new("probability_chart")
        .height(220.0)
        .y_axis_label("Probability")
        .include_y(0.0)
        .include_y(1.0)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .x_axis_formatter(move |mark, _range| {
            let v = mark.value;
            if v.fract() != 0.0 || v < 0.0 {
                return String::new();
            }
            axis_names.get(v as usize).cloned().unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("Class probability"));
        });
}

// ---------------------------------------------------------------------------
// Simulated sensor history (Dashboard tab)
// ---------------------------------------------------------------------------

pub fn sensor_history(ui: &mut Ui) {
    let series = [
        (Feature::Nitrogen, Color32::from_rgb(0x2e, 0x7d, 0x32)),
        (Feature::Phosphorus, Color32::from_rgb(0xef, 0x6c, 0x00)),
        (Feature::Potassium, Color32::from_rgb(0x6a, 0x1b, 0x9a)),
    ];

    Plot::new("sensor_history")
        .height(180.0)
        .legend(Legend::default())
        .x_axis_label("Hours")
        .y_axis_label("Reading")
        .allow_drag(true)
        .allow_zoom(true)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for (feature, color) in series {
                let points: PlotPoints = simulated_history(feature, 24).into();
                plot_ui.line(
                    Line::new(points)
                        .name(feature.column())
                        .color(color)
                        .width(1.5),
                );
            }
        });
}
