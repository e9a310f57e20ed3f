use eframe::egui::Color32;

// ---------------------------------------------------------------------------
// Compile-time application settings
// ---------------------------------------------------------------------------

pub const APP_TITLE: &str = "Precision Agriculture App";
pub const APP_VERSION: &str = "1.0";

pub const WINDOW_SIZE: [f32; 2] = [1000.0, 600.0];
pub const WINDOW_MIN_SIZE: [f32; 2] = [640.0, 420.0];

/// Panel fill used by the light theme (`#aee6aa`).
pub const PANEL_FILL: Color32 = Color32::from_rgb(0xae, 0xe6, 0xaa);

/// Artifact file names, resolved against the working directory at startup.
pub const MODEL_FILE: &str = "crop_recommendation_model.json";
pub const SCALER_FILE: &str = "scaler.json";
pub const LABEL_ENCODER_FILE: &str = "label_encoder.json";

/// Number of classes shown in the probability chart by default.
pub const DEFAULT_TOP_K: usize = 5;
