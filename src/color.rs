use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::model::encoder::ClassIndex;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.65, 0.45);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Class colours: crop index → Color32
// ---------------------------------------------------------------------------

/// One stable colour per crop class, used by the probability chart.
#[derive(Debug, Clone)]
pub struct ClassPalette {
    colors: Vec<Color32>,
    default_color: Color32,
}

impl ClassPalette {
    pub fn new(num_classes: usize) -> Self {
        ClassPalette {
            colors: generate_palette(num_classes),
            default_color: Color32::GRAY,
        }
    }

    pub fn color_for(&self, index: ClassIndex) -> Color32 {
        self.colors
            .get(index)
            .copied()
            .unwrap_or(self.default_color)
    }
}
